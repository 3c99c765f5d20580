pub mod camera_descriptor;
pub mod frame_source;
