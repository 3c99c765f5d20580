use nokhwa::pixel_format::RgbFormat;
use nokhwa::utils::{ApiBackend, CameraIndex, RequestedFormat, RequestedFormatType};
use nokhwa::Camera;

use crate::capture::domain::camera_descriptor::CameraDescriptor;
use crate::capture::domain::frame_source::FrameSource;
use crate::shared::frame::Frame;

/// Webcam frame source backed by nokhwa.
///
/// The device handle exists only between `open` and `close`; a dropped
/// source releases the device through `Camera`'s own drop. Frames are
/// decoded to RGB and stamped with a per-session capture index.
pub struct NokhwaFrameSource {
    camera_index: u32,
    camera: Option<Camera>,
    next_frame_index: u64,
}

impl NokhwaFrameSource {
    pub fn new(camera_index: u32) -> Self {
        Self {
            camera_index,
            camera: None,
            next_frame_index: 0,
        }
    }
}

impl FrameSource for NokhwaFrameSource {
    fn open(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        if self.camera.is_some() {
            return Ok(());
        }
        let requested =
            RequestedFormat::new::<RgbFormat>(RequestedFormatType::AbsoluteHighestFrameRate);
        let mut camera = Camera::new(CameraIndex::Index(self.camera_index), requested)?;
        camera.open_stream()?;
        self.camera = Some(camera);
        self.next_frame_index = 0;
        Ok(())
    }

    fn read_frame(&mut self) -> Result<Option<Frame>, Box<dyn std::error::Error>> {
        let camera = self
            .camera
            .as_mut()
            .ok_or("frame source is not open")?;

        // Grab and decode failures are transient: the driver logs and
        // waits for the next tick rather than tearing the session down.
        let buffer = match camera.frame() {
            Ok(buffer) => buffer,
            Err(e) => {
                log::debug!("camera {} frame grab failed: {e}", self.camera_index);
                return Ok(None);
            }
        };
        let decoded: image::RgbImage = match buffer.decode_image::<RgbFormat>() {
            Ok(image) => image,
            Err(e) => {
                log::debug!("camera {} frame decode failed: {e}", self.camera_index);
                return Ok(None);
            }
        };

        let width = decoded.width();
        let height = decoded.height();
        let index = self.next_frame_index;
        self.next_frame_index += 1;
        Ok(Some(Frame::new(decoded.into_raw(), width, height, 3, index)))
    }

    fn close(&mut self) {
        if let Some(mut camera) = self.camera.take() {
            if let Err(e) = camera.stop_stream() {
                log::warn!("failed to stop camera {} stream: {e}", self.camera_index);
            }
        }
    }
}

/// Enumerates capture devices in backend order.
pub fn list_cameras() -> Result<Vec<CameraDescriptor>, Box<dyn std::error::Error>> {
    let devices = nokhwa::query(ApiBackend::Auto)?;
    Ok(devices
        .iter()
        .enumerate()
        .map(|(position, info)| CameraDescriptor {
            index: info.index().as_index().unwrap_or(position as u32),
            display_name: info.human_name(),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_before_open_is_an_error() {
        let mut source = NokhwaFrameSource::new(0);
        assert!(source.read_frame().is_err());
    }

    #[test]
    fn test_close_without_open_is_a_noop() {
        let mut source = NokhwaFrameSource::new(0);
        source.close();
        source.close();
    }
}
