use thiserror::Error;

use crate::shared::constants::{MAX_LOCK_DELAY_SECS, MIN_LOCK_DELAY_SECS};

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("a monitoring session is already running")]
    AlreadyRunning,
    #[error("failed to open camera {index}: {reason}")]
    CameraUnavailable { index: u32, reason: String },
    #[error(
        "lock delay must be between {MIN_LOCK_DELAY_SECS} and {MAX_LOCK_DELAY_SECS} seconds, got {got}"
    )]
    DelayOutOfRange { got: u32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_unavailable_message_names_index_and_reason() {
        let err = SessionError::CameraUnavailable {
            index: 2,
            reason: "device busy".to_string(),
        };
        assert_eq!(err.to_string(), "failed to open camera 2: device busy");
    }

    #[test]
    fn test_delay_out_of_range_message_includes_bounds() {
        let err = SessionError::DelayOutOfRange { got: 42 };
        let message = err.to_string();
        assert!(message.contains("1"));
        assert!(message.contains("10"));
        assert!(message.contains("42"));
    }
}
