/// Cross-cutting logger for session events.
///
/// Passed into the session at construction so the monitor loop never
/// touches a global. One method per event in the session's taxonomy;
/// implementations decide where the events go (the `log` facade, a GUI
/// signal, nowhere).
pub trait SessionLogger: Send {
    fn session_started(&mut self, camera_index: u32, threshold_frames: u32);
    fn session_stopped(&mut self);
    fn frame_read_failed(&mut self);
    fn face_detected(&mut self);
    fn face_absent(&mut self, streak: u32);
    fn detection_failed(&mut self, reason: &str);
    fn lock_triggered(&mut self);
    fn lock_invocation_failed(&mut self, reason: &str);
    fn camera_open_failed(&mut self, reason: &str);

    /// End-of-session summary. Default: no-op.
    fn summary(&self) {}
}

/// Silent logger for tests and hosts with their own signaling.
pub struct NullSessionLogger;

impl SessionLogger for NullSessionLogger {
    fn session_started(&mut self, _camera_index: u32, _threshold_frames: u32) {}
    fn session_stopped(&mut self) {}
    fn frame_read_failed(&mut self) {}
    fn face_detected(&mut self) {}
    fn face_absent(&mut self, _streak: u32) {}
    fn detection_failed(&mut self, _reason: &str) {}
    fn lock_triggered(&mut self) {}
    fn lock_invocation_failed(&mut self, _reason: &str) {}
    fn camera_open_failed(&mut self, _reason: &str) {}
}

/// Routes events to the `log` facade and keeps running counters for an
/// end-of-session summary.
#[derive(Default)]
pub struct LogSessionLogger {
    frames_observed: u64,
    read_failures: u64,
    detection_failures: u64,
    locks_triggered: u64,
}

impl LogSessionLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames_observed(&self) -> u64 {
        self.frames_observed
    }

    pub fn locks_triggered(&self) -> u64 {
        self.locks_triggered
    }
}

impl SessionLogger for LogSessionLogger {
    fn session_started(&mut self, camera_index: u32, threshold_frames: u32) {
        log::info!("session started on camera {camera_index} (threshold {threshold_frames} frames)");
    }

    fn session_stopped(&mut self) {
        log::info!("session stopped");
    }

    fn frame_read_failed(&mut self) {
        self.read_failures += 1;
        log::warn!("failed to read frame from camera");
    }

    fn face_detected(&mut self) {
        self.frames_observed += 1;
        log::debug!("face detected");
    }

    fn face_absent(&mut self, streak: u32) {
        self.frames_observed += 1;
        log::debug!("no face detected (streak {streak})");
    }

    fn detection_failed(&mut self, reason: &str) {
        self.detection_failures += 1;
        log::warn!("detection failed, treating frame as absent: {reason}");
    }

    fn lock_triggered(&mut self) {
        self.locks_triggered += 1;
        log::info!("sustained absence reached threshold, locking workstation");
    }

    fn lock_invocation_failed(&mut self, reason: &str) {
        log::error!("failed to invoke lock command: {reason}");
    }

    fn camera_open_failed(&mut self, reason: &str) {
        log::error!("failed to open camera: {reason}");
    }

    fn summary(&self) {
        log::info!(
            "session summary: {} frames observed, {} read failures, {} detection failures, {} locks triggered",
            self.frames_observed,
            self.read_failures,
            self.detection_failures,
            self.locks_triggered
        );
    }
}
