use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crossbeam_channel::Receiver;

use crate::capture::domain::frame_source::FrameSource;
use crate::detection::domain::face_detector::FaceDetector;
use crate::lock::domain::lock_actuator::LockActuator;
use crate::monitor::presence_monitor::{Decision, PresenceMonitor};
use crate::monitor::session_error::SessionError;
use crate::monitor::session_logger::SessionLogger;
use crate::monitor::tick_driver::{TickDriver, TickFlow};
use crate::shared::constants::{MAX_LOCK_DELAY_SECS, MIN_LOCK_DELAY_SECS, POLL_INTERVAL};

/// Per-session parameters. The lock delay is converted once, at start,
/// into a frame threshold; it never changes while the session runs.
#[derive(Clone, Copy, Debug)]
pub struct SessionConfig {
    pub camera_index: u32,
    pub delay_secs: u32,
    pub poll_interval: Duration,
}

impl SessionConfig {
    pub fn new(camera_index: u32, delay_secs: u32) -> Self {
        Self {
            camera_index,
            delay_secs,
            poll_interval: POLL_INTERVAL,
        }
    }
}

/// Totals reported when a session ends.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionOutcome {
    pub frames_observed: u64,
    pub locks_fired: u64,
}

struct ActiveSession {
    cancelled: Arc<AtomicBool>,
    handle: thread::JoinHandle<()>,
    outcome_rx: Receiver<SessionOutcome>,
}

/// Owns the start/stop lifecycle of at most one monitoring session.
///
/// `start` acquires the capture device before any session state exists;
/// if acquisition fails, nothing was taken and nothing needs releasing.
/// Once started, a worker thread owns every component and is guaranteed
/// to close the source on the way out, whatever ended the loop.
#[derive(Default)]
pub struct SessionController {
    active: Option<ActiveSession>,
}

impl SessionController {
    pub fn new() -> Self {
        Self { active: None }
    }

    pub fn is_running(&self) -> bool {
        self.active
            .as_ref()
            .is_some_and(|session| !session.handle.is_finished())
    }

    /// Cancellation token of the running session, if any. Setting it has
    /// the same effect as `stop` minus the join; used by signal handlers.
    pub fn cancellation_token(&self) -> Option<Arc<AtomicBool>> {
        self.active.as_ref().map(|s| s.cancelled.clone())
    }

    /// Starts a session: validates the config, opens the camera, derives
    /// the frame threshold, and begins polling on a worker thread.
    pub fn start(
        &mut self,
        config: SessionConfig,
        mut source: Box<dyn FrameSource>,
        detector: Box<dyn FaceDetector>,
        actuator: Box<dyn LockActuator>,
        mut logger: Box<dyn SessionLogger>,
        driver: Box<dyn TickDriver>,
    ) -> Result<(), SessionError> {
        if self.is_running() {
            return Err(SessionError::AlreadyRunning);
        }
        // A finished-but-unjoined worker is not a running session.
        self.reap_finished();

        if !(MIN_LOCK_DELAY_SECS..=MAX_LOCK_DELAY_SECS).contains(&config.delay_secs) {
            return Err(SessionError::DelayOutOfRange {
                got: config.delay_secs,
            });
        }

        if let Err(e) = source.open() {
            let reason = e.to_string();
            logger.camera_open_failed(&reason);
            return Err(SessionError::CameraUnavailable {
                index: config.camera_index,
                reason,
            });
        }

        let monitor = PresenceMonitor::for_delay_secs(config.delay_secs);
        logger.session_started(config.camera_index, monitor.threshold_frames());

        let cancelled = Arc::new(AtomicBool::new(false));
        let worker_cancelled = cancelled.clone();
        let (outcome_tx, outcome_rx) = crossbeam_channel::bounded(1);
        let interval = config.poll_interval;

        let handle = thread::spawn(move || {
            let outcome = run_session(
                monitor,
                source,
                detector,
                actuator,
                &mut logger,
                driver,
                interval,
                worker_cancelled,
            );
            logger.session_stopped();
            logger.summary();
            let _ = outcome_tx.send(outcome);
        });

        self.active = Some(ActiveSession {
            cancelled,
            handle,
            outcome_rx,
        });
        Ok(())
    }

    /// Requests a stop, waits for the worker to wind down, and returns the
    /// session totals. Stopping when nothing runs is a no-op.
    pub fn stop(&mut self) -> Option<SessionOutcome> {
        let session = self.active.take()?;
        session.cancelled.store(true, Ordering::Relaxed);
        Self::join(session)
    }

    /// Blocks until the running session ends on its own (fatal capture
    /// error, or an external set of the cancellation token).
    pub fn wait(&mut self) -> Option<SessionOutcome> {
        let session = self.active.take()?;
        Self::join(session)
    }

    fn join(session: ActiveSession) -> Option<SessionOutcome> {
        let _ = session.handle.join();
        session.outcome_rx.try_recv().ok()
    }

    fn reap_finished(&mut self) {
        if let Some(session) = self.active.take() {
            let _ = session.handle.join();
        }
    }
}

/// One session's poll loop. Runs on the worker thread and closes the
/// source on every exit path before returning.
#[allow(clippy::too_many_arguments)]
fn run_session(
    mut monitor: PresenceMonitor,
    mut source: Box<dyn FrameSource>,
    mut detector: Box<dyn FaceDetector>,
    mut actuator: Box<dyn LockActuator>,
    logger: &mut Box<dyn SessionLogger>,
    driver: Box<dyn TickDriver>,
    interval: Duration,
    cancelled: Arc<AtomicBool>,
) -> SessionOutcome {
    let mut outcome = SessionOutcome::default();
    let tick_cancelled = cancelled.clone();

    let mut tick = || -> TickFlow {
        if tick_cancelled.load(Ordering::Relaxed) {
            return TickFlow::Stop;
        }

        let frame = match source.read_frame() {
            Ok(Some(frame)) => frame,
            Ok(None) => {
                // "No data" is not "no face": the streak is untouched.
                logger.frame_read_failed();
                return TickFlow::Continue;
            }
            Err(e) => {
                log::error!("capture failed, ending session: {e}");
                return TickFlow::Stop;
            }
        };

        // A detector error cannot vouch for presence; it counts as an
        // empty result (and is logged separately).
        let detections = match detector.detect(&frame) {
            Ok(detections) => detections,
            Err(e) => {
                logger.detection_failed(&e.to_string());
                Vec::new()
            }
        };

        outcome.frames_observed += 1;
        let present = !detections.is_empty();

        match monitor.observe(&detections) {
            Decision::None => {
                if present {
                    logger.face_detected();
                } else {
                    logger.face_absent(monitor.absent_streak());
                }
            }
            Decision::Lock => {
                logger.face_absent(monitor.threshold_frames());
                // A stop accepted during this iteration wins over the
                // decision: no lock may fire once stop is observed.
                if tick_cancelled.load(Ordering::Relaxed) {
                    return TickFlow::Stop;
                }
                outcome.locks_fired += 1;
                logger.lock_triggered();
                if let Err(e) = actuator.trigger_lock() {
                    logger.lock_invocation_failed(&e.to_string());
                }
            }
        }

        TickFlow::Continue
    };

    driver.drive(interval, cancelled, &mut tick);
    source.close();
    outcome
}
