use crate::shared::frame::Frame;
use crate::shared::region::FaceRegion;

/// Domain interface for face detection.
///
/// An empty result means "no face in this frame". Implementations may hold
/// internal inference state, hence `&mut self`. The monitor's correctness
/// reasoning assumes `detect` has no side effects beyond that state.
pub trait FaceDetector: Send {
    fn detect(&mut self, frame: &Frame) -> Result<Vec<FaceRegion>, Box<dyn std::error::Error>>;
}
