use std::time::Duration;

/// Monitor sampling cadence: ten observations per second.
pub const SAMPLING_RATE_HZ: u32 = 10;

/// Wall-clock interval between poll ticks, derived from the sampling rate.
pub const POLL_INTERVAL: Duration = Duration::from_millis(1000 / SAMPLING_RATE_HZ as u64);

/// Smallest accepted lock delay, in seconds.
pub const MIN_LOCK_DELAY_SECS: u32 = 1;

/// Largest accepted lock delay, in seconds.
pub const MAX_LOCK_DELAY_SECS: u32 = 10;

pub const BLAZEFACE_MODEL_NAME: &str = "blazeface_short_range.onnx";
pub const BLAZEFACE_MODEL_URL: &str =
    "https://github.com/presencelock/presencelock/releases/download/v0.1.0/blazeface_short_range.onnx";

pub const YOLO_MODEL_NAME: &str = "yolo11n_widerface.onnx";
pub const YOLO_MODEL_URL: &str =
    "https://github.com/presencelock/presencelock/releases/download/v0.1.0/yolo11n_widerface.onnx";
