use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::monitor::tick_driver::{TickDriver, TickFlow};

/// Drives the poll loop on the calling thread, sleeping between ticks.
///
/// Cancellation is checked before every tick, so a stop request is
/// observed within one interval.
pub struct BlockingTickDriver;

impl TickDriver for BlockingTickDriver {
    fn drive(
        &self,
        interval: Duration,
        cancelled: Arc<AtomicBool>,
        tick: &mut dyn FnMut() -> TickFlow,
    ) {
        loop {
            if cancelled.load(Ordering::Relaxed) {
                break;
            }
            if tick() == TickFlow::Stop {
                break;
            }
            thread::sleep(interval);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runs_until_tick_requests_stop() {
        let cancelled = Arc::new(AtomicBool::new(false));
        let mut count = 0;
        let mut tick = || {
            count += 1;
            if count == 5 {
                TickFlow::Stop
            } else {
                TickFlow::Continue
            }
        };
        BlockingTickDriver.drive(Duration::ZERO, cancelled, &mut tick);
        assert_eq!(count, 5);
    }

    #[test]
    fn test_pre_cancelled_token_runs_no_ticks() {
        let cancelled = Arc::new(AtomicBool::new(true));
        let mut count = 0;
        let mut tick = || {
            count += 1;
            TickFlow::Continue
        };
        BlockingTickDriver.drive(Duration::ZERO, cancelled, &mut tick);
        assert_eq!(count, 0);
    }

    #[test]
    fn test_cancellation_from_inside_tick_observed_next_iteration() {
        let cancelled = Arc::new(AtomicBool::new(false));
        let token = cancelled.clone();
        let mut count = 0;
        let mut tick = || {
            count += 1;
            token.store(true, Ordering::Relaxed);
            TickFlow::Continue
        };
        BlockingTickDriver.drive(Duration::ZERO, cancelled, &mut tick);
        assert_eq!(count, 1);
    }
}
