use crate::shared::constants::SAMPLING_RATE_HZ;
use crate::shared::region::FaceRegion;

/// What the monitor wants done after one observation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    /// Nothing to do.
    None,
    /// Sustained absence reached the threshold: lock the workstation.
    Lock,
}

/// The presence-debounce state machine.
///
/// Converts a noisy per-frame detection signal into debounced lock
/// decisions. Any frame with at least one face resets the absence streak;
/// a streak of `threshold_frames` consecutive empty results yields
/// `Decision::Lock` and resets the streak, so the monitor retriggers
/// periodically for as long as absence persists.
///
/// The monitor is a pure function of the sequence of results it is fed;
/// cadence is the driver's responsibility.
#[derive(Debug)]
pub struct PresenceMonitor {
    absent_streak: u32,
    threshold_frames: u32,
}

impl PresenceMonitor {
    /// `threshold_frames` is clamped to at least 1.
    pub fn new(threshold_frames: u32) -> Self {
        Self {
            absent_streak: 0,
            threshold_frames: threshold_frames.max(1),
        }
    }

    /// Monitor for a user-facing delay in seconds at the fixed sampling
    /// cadence: `threshold_frames = round(delay_secs * SAMPLING_RATE_HZ)`.
    pub fn for_delay_secs(delay_secs: u32) -> Self {
        Self::new(threshold_frames_for_delay(delay_secs))
    }

    /// Feed one detection result, in strict capture order.
    pub fn observe(&mut self, detections: &[FaceRegion]) -> Decision {
        if !detections.is_empty() {
            self.absent_streak = 0;
            return Decision::None;
        }

        self.absent_streak += 1;
        if self.absent_streak == self.threshold_frames {
            self.absent_streak = 0;
            Decision::Lock
        } else {
            Decision::None
        }
    }

    /// Consecutive empty results since the last non-empty one (or since
    /// the last fired decision).
    pub fn absent_streak(&self) -> u32 {
        self.absent_streak
    }

    pub fn threshold_frames(&self) -> u32 {
        self.threshold_frames
    }
}

/// Frames of sustained absence corresponding to a delay in seconds.
pub fn threshold_frames_for_delay(delay_secs: u32) -> u32 {
    (delay_secs * SAMPLING_RATE_HZ).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const FACE: FaceRegion = FaceRegion {
        x: 0,
        y: 0,
        width: 40,
        height: 40,
    };

    fn observe_empty(monitor: &mut PresenceMonitor) -> Decision {
        monitor.observe(&[])
    }

    fn observe_present(monitor: &mut PresenceMonitor) -> Decision {
        monitor.observe(&[FACE])
    }

    #[test]
    fn test_initial_state_is_active_with_zero_streak() {
        let monitor = PresenceMonitor::new(5);
        assert_eq!(monitor.absent_streak(), 0);
        assert_eq!(monitor.threshold_frames(), 5);
    }

    #[test]
    fn test_presence_keeps_streak_at_zero() {
        let mut monitor = PresenceMonitor::new(3);
        for _ in 0..10 {
            assert_eq!(observe_present(&mut monitor), Decision::None);
            assert_eq!(monitor.absent_streak(), 0);
        }
    }

    #[test]
    fn test_streak_counts_consecutive_empty_results() {
        let mut monitor = PresenceMonitor::new(10);
        for expected in 1..=9 {
            assert_eq!(observe_empty(&mut monitor), Decision::None);
            assert_eq!(monitor.absent_streak(), expected);
        }
    }

    #[test]
    fn test_threshold_five_trace_from_spec_sequence() {
        // present, absent x5, present: streak trace 0,1,2,3,4,(5->fires->0),0
        let mut monitor = PresenceMonitor::new(5);
        assert_eq!(observe_present(&mut monitor), Decision::None);
        for _ in 0..4 {
            assert_eq!(observe_empty(&mut monitor), Decision::None);
        }
        assert_eq!(observe_empty(&mut monitor), Decision::Lock);
        assert_eq!(monitor.absent_streak(), 0);
        assert_eq!(observe_present(&mut monitor), Decision::None);
        assert_eq!(monitor.absent_streak(), 0);
    }

    #[test]
    fn test_periodic_retrigger_every_threshold_frames() {
        // threshold 3, ten consecutive empties: locks at observations 3, 6, 9
        let mut monitor = PresenceMonitor::new(3);
        let mut lock_observations = Vec::new();
        for i in 1..=10 {
            if observe_empty(&mut monitor) == Decision::Lock {
                lock_observations.push(i);
            }
        }
        assert_eq!(lock_observations, vec![3, 6, 9]);
    }

    #[rstest]
    #[case::threshold_1(1, 10, 10)]
    #[case::threshold_3(3, 10, 3)]
    #[case::threshold_5(5, 25, 5)]
    #[case::threshold_7(7, 6, 0)]
    fn test_lock_count_is_floor_of_run_over_threshold(
        #[case] threshold: u32,
        #[case] empties: usize,
        #[case] expected_locks: usize,
    ) {
        let mut monitor = PresenceMonitor::new(threshold);
        let locks = (0..empties)
            .filter(|_| observe_empty(&mut monitor) == Decision::Lock)
            .count();
        assert_eq!(locks, expected_locks);
    }

    #[test]
    fn test_presence_resets_streak_from_any_value() {
        let mut monitor = PresenceMonitor::new(50);
        for _ in 0..49 {
            observe_empty(&mut monitor);
        }
        assert_eq!(monitor.absent_streak(), 49);
        observe_present(&mut monitor);
        assert_eq!(monitor.absent_streak(), 0);
        // The next empty run starts over
        assert_eq!(observe_empty(&mut monitor), Decision::None);
        assert_eq!(monitor.absent_streak(), 1);
    }

    #[test]
    fn test_mixed_sequence_streak_matches_trailing_empties() {
        let mut monitor = PresenceMonitor::new(100);
        let sequence = [true, false, false, true, false, false, false];
        for &present in &sequence {
            if present {
                observe_present(&mut monitor);
            } else {
                observe_empty(&mut monitor);
            }
        }
        assert_eq!(monitor.absent_streak(), 3);
    }

    #[test]
    fn test_zero_threshold_is_clamped_to_one() {
        let mut monitor = PresenceMonitor::new(0);
        assert_eq!(monitor.threshold_frames(), 1);
        assert_eq!(observe_empty(&mut monitor), Decision::Lock);
    }

    #[rstest]
    #[case(1, 10)]
    #[case(5, 50)]
    #[case(10, 100)]
    fn test_threshold_from_delay_at_ten_hertz(#[case] delay_secs: u32, #[case] expected: u32) {
        assert_eq!(threshold_frames_for_delay(delay_secs), expected);
    }

    #[test]
    fn test_for_delay_secs_matches_original_five_second_default() {
        // The original tool hard-coded 50 frames at 0.1s per frame.
        let monitor = PresenceMonitor::for_delay_secs(5);
        assert_eq!(monitor.threshold_frames(), 50);
    }
}
