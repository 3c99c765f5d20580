use std::path::Path;

use crate::detection::domain::face_detector::FaceDetector;

use super::model_resolver::{self, ProgressFn};
use super::onnx_blazeface_detector::OnnxBlazefaceDetector;
use super::onnx_yolo_detector::OnnxYoloDetector;
use crate::shared::constants::{
    BLAZEFACE_MODEL_NAME, BLAZEFACE_MODEL_URL, YOLO_MODEL_NAME, YOLO_MODEL_URL,
};

/// Detection strategy, chosen once at session-start configuration time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DetectorKind {
    /// Lightweight anchor-decode detector, cheap enough for CPU polling.
    Blazeface,
    /// Higher-accuracy detector with a larger model.
    Yolo,
}

impl std::str::FromStr for DetectorKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "blazeface" => Ok(DetectorKind::Blazeface),
            "yolo" => Ok(DetectorKind::Yolo),
            other => Err(format!("unknown detector '{other}' (expected 'blazeface' or 'yolo')")),
        }
    }
}

/// Strategy tunables. Each detector reads only the fields that apply to it.
#[derive(Clone, Copy, Debug)]
pub struct DetectorConfig {
    pub confidence: f64,
    /// Minimum face edge in pixels (Blazeface only).
    pub min_region_size: u32,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            confidence: super::onnx_blazeface_detector::DEFAULT_CONFIDENCE,
            min_region_size: super::onnx_blazeface_detector::DEFAULT_MIN_REGION_SIZE,
        }
    }
}

/// Resolves the model for `kind` (cache or download) and constructs the
/// detector. Logs which strategy is in use.
pub fn create_detector(
    kind: DetectorKind,
    config: DetectorConfig,
    download_progress: Option<ProgressFn>,
) -> Result<Box<dyn FaceDetector>, Box<dyn std::error::Error>> {
    let (name, url) = match kind {
        DetectorKind::Blazeface => (BLAZEFACE_MODEL_NAME, BLAZEFACE_MODEL_URL),
        DetectorKind::Yolo => (YOLO_MODEL_NAME, YOLO_MODEL_URL),
    };
    let model_path = model_resolver::resolve(name, url, download_progress)?;
    create_from_model(kind, config, &model_path)
}

/// Constructs a detector from an already-resolved model file.
pub fn create_from_model(
    kind: DetectorKind,
    config: DetectorConfig,
    model_path: &Path,
) -> Result<Box<dyn FaceDetector>, Box<dyn std::error::Error>> {
    log::info!(
        "Using {kind:?} detector (confidence={}, min_region_size={})",
        config.confidence,
        config.min_region_size
    );
    match kind {
        DetectorKind::Blazeface => Ok(Box::new(OnnxBlazefaceDetector::new(
            model_path,
            config.confidence,
            config.min_region_size,
        )?)),
        DetectorKind::Yolo => Ok(Box::new(OnnxYoloDetector::new(
            model_path,
            config.confidence,
        )?)),
    }
}
