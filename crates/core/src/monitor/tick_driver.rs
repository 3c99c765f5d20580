use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Duration;

/// What the tick closure wants the driver to do next.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickFlow {
    Continue,
    Stop,
}

/// Abstracts how the poll loop is scheduled.
///
/// One tick is one read-detect-decide iteration. The driver guarantees
/// ticks never overlap, runs them in order, and observes the cancellation
/// token within one interval. The session logic is identical whether the
/// driver blocks a thread or cooperates with a host scheduler.
pub trait TickDriver: Send {
    fn drive(
        &self,
        interval: Duration,
        cancelled: Arc<AtomicBool>,
        tick: &mut dyn FnMut() -> TickFlow,
    );
}
