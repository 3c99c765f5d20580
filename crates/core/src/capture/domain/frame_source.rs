use crate::shared::frame::Frame;

/// Produces frames from a capture device and owns the device handle.
///
/// `read_frame` is tri-state: `Ok(Some(frame))` delivers data,
/// `Ok(None)` is a transient "no data this tick" signal that the session
/// driver logs and skips (it is never presented to the monitor as face
/// absence), and `Err` is a hard capture failure.
pub trait FrameSource: Send {
    /// Acquires the capture device. Failure means no resource was taken.
    fn open(&mut self) -> Result<(), Box<dyn std::error::Error>>;

    /// Reads the next frame, or `None` on a transient read failure.
    fn read_frame(&mut self) -> Result<Option<Frame>, Box<dyn std::error::Error>>;

    /// Releases the capture device. Idempotent.
    fn close(&mut self);
}
