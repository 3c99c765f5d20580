/// BlazeFace face detector using ONNX Runtime via `ort`.
///
/// The lightweight strategy: a 128x128 anchor-decode model that is cheap
/// enough to run at the monitor's 10 Hz cadence on CPU. Tunables are the
/// confidence threshold and a minimum region size below which detections
/// are discarded as noise.
use std::path::Path;

use crate::detection::domain::face_detector::FaceDetector;
use crate::shared::frame::Frame;
use crate::shared::region::FaceRegion;

/// BlazeFace model input resolution.
const INPUT_SIZE: u32 = 128;

/// Default confidence threshold.
pub const DEFAULT_CONFIDENCE: f64 = 0.5;

/// Default minimum face region edge, in source-frame pixels.
pub const DEFAULT_MIN_REGION_SIZE: u32 = 30;

/// NMS IoU threshold.
const NMS_IOU_THRESH: f64 = 0.3;

/// Number of BlazeFace anchors (short-range model).
const NUM_ANCHORS: usize = 896;

pub struct OnnxBlazefaceDetector {
    session: ort::session::Session,
    confidence: f64,
    min_region_size: u32,
    anchors: Vec<[f32; 2]>,
}

impl OnnxBlazefaceDetector {
    /// Load a BlazeFace ONNX model.
    pub fn new(
        model_path: &Path,
        confidence: f64,
        min_region_size: u32,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let session = ort::session::Session::builder()?.commit_from_file(model_path)?;
        Ok(Self {
            session,
            confidence,
            min_region_size,
            anchors: generate_anchors(),
        })
    }
}

impl FaceDetector for OnnxBlazefaceDetector {
    fn detect(&mut self, frame: &Frame) -> Result<Vec<FaceRegion>, Box<dyn std::error::Error>> {
        let fw = frame.width();
        let fh = frame.height();

        // 1. Preprocess: resize to 128x128, normalize to [0,1], NCHW
        let input_tensor = preprocess(frame, INPUT_SIZE);

        // 2. Inference
        let input_value = ort::value::Tensor::from_array(input_tensor)?;
        let outputs = self.session.run(ort::inputs![input_value])?;

        // BlazeFace outputs two tensors:
        // - regressors: [1, 896, 16] (box deltas + keypoints)
        // - classificators: [1, 896, 1] (confidence scores)
        if outputs.len() < 2 {
            return Err(
                format!("BlazeFace model expected 2 outputs, got {}", outputs.len()).into(),
            );
        }

        let regressors = outputs[0].try_extract_array::<f32>()?;
        let scores = outputs[1].try_extract_array::<f32>()?;
        let reg_data = regressors.as_slice().ok_or("Cannot get regressor slice")?;
        let score_data = scores.as_slice().ok_or("Cannot get score slice")?;

        // 3. Decode anchor boxes, filter by confidence
        let mut candidates = Vec::new();
        let num_anchors = self.anchors.len().min(NUM_ANCHORS);

        for (i, &raw_score) in score_data.iter().enumerate().take(num_anchors) {
            let score = sigmoid(raw_score);
            if score < self.confidence as f32 {
                continue;
            }

            let anchor = &self.anchors[i];
            let reg_offset = i * 16;
            if reg_offset + 4 > reg_data.len() {
                break;
            }

            // Box center + size relative to anchor, then back to frame coords
            let cx = anchor[0] + reg_data[reg_offset] / INPUT_SIZE as f32;
            let cy = anchor[1] + reg_data[reg_offset + 1] / INPUT_SIZE as f32;
            let w = reg_data[reg_offset + 2] / INPUT_SIZE as f32;
            let h = reg_data[reg_offset + 3] / INPUT_SIZE as f32;

            let x1 = ((cx - w / 2.0) * fw as f32).max(0.0) as f64;
            let y1 = ((cy - h / 2.0) * fh as f32).max(0.0) as f64;
            let x2 = ((cx + w / 2.0) * fw as f32).min(fw as f32) as f64;
            let y2 = ((cy + h / 2.0) * fh as f32).min(fh as f32) as f64;

            candidates.push(Candidate {
                x1,
                y1,
                x2,
                y2,
                score: score as f64,
            });
        }

        // 4. NMS, then drop anything under the minimum size
        let kept = non_max_suppression(&mut candidates, NMS_IOU_THRESH);
        let min_edge = self.min_region_size as i32;
        let regions = kept
            .iter()
            .map(|c| c.to_region(fw, fh))
            .filter(|r| r.width >= min_edge && r.height >= min_edge)
            .collect();

        Ok(regions)
    }
}

// ---------------------------------------------------------------------------
// Preprocessing
// ---------------------------------------------------------------------------

/// Resize frame to `size x size` and normalize to [0,1] NCHW float32.
fn preprocess(frame: &Frame, size: u32) -> ndarray::Array4<f32> {
    let src = frame.as_ndarray();
    let src_h = frame.height() as usize;
    let src_w = frame.width() as usize;
    let s = size as usize;

    let mut tensor = ndarray::Array4::<f32>::zeros((1, 3, s, s));

    for y in 0..s {
        let src_y = (((y as f64 + 0.5) * src_h as f64 / s as f64) as usize).min(src_h - 1);
        for x in 0..s {
            let src_x = (((x as f64 + 0.5) * src_w as f64 / s as f64) as usize).min(src_w - 1);
            for c in 0..3 {
                tensor[[0, c, y, x]] = src[[src_y, src_x, c]] as f32 / 255.0;
            }
        }
    }

    tensor
}

// ---------------------------------------------------------------------------
// Anchor generation (BlazeFace short-range)
// ---------------------------------------------------------------------------

/// Generate BlazeFace anchors for the short-range model: two feature map
/// sizes, 16x16 and 8x8, with 2 and 6 anchors per cell respectively.
fn generate_anchors() -> Vec<[f32; 2]> {
    let strides = [(8, 2), (16, 6)]; // (stride, anchors_per_cell)
    let mut anchors = Vec::with_capacity(NUM_ANCHORS);

    for &(stride, num) in &strides {
        let grid_size = INPUT_SIZE as usize / stride;
        for y in 0..grid_size {
            for x in 0..grid_size {
                let cx = (x as f32 + 0.5) / grid_size as f32;
                let cy = (y as f32 + 0.5) / grid_size as f32;
                for _ in 0..num {
                    anchors.push([cx, cy]);
                }
            }
        }
    }

    anchors
}

// ---------------------------------------------------------------------------
// Post-processing
// ---------------------------------------------------------------------------

#[derive(Clone, Debug)]
struct Candidate {
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
    score: f64,
}

impl Candidate {
    fn to_region(&self, frame_w: u32, frame_h: u32) -> FaceRegion {
        // x1/y1 were clamped to >= 0 during decoding
        let x = self.x1 as i32;
        let y = self.y1 as i32;
        FaceRegion {
            x,
            y,
            width: ((self.x2 - self.x1) as i32).min(frame_w as i32 - x),
            height: ((self.y2 - self.y1) as i32).min(frame_h as i32 - y),
        }
    }
}

fn non_max_suppression(candidates: &mut [Candidate], iou_thresh: f64) -> Vec<Candidate> {
    candidates.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut keep = Vec::new();
    let mut suppressed = vec![false; candidates.len()];

    for i in 0..candidates.len() {
        if suppressed[i] {
            continue;
        }
        keep.push(candidates[i].clone());
        for j in (i + 1)..candidates.len() {
            if !suppressed[j] && candidate_iou(&candidates[i], &candidates[j]) > iou_thresh {
                suppressed[j] = true;
            }
        }
    }
    keep
}

fn candidate_iou(a: &Candidate, b: &Candidate) -> f64 {
    let x1 = a.x1.max(b.x1);
    let y1 = a.y1.max(b.y1);
    let x2 = a.x2.min(b.x2);
    let y2 = a.y2.min(b.y2);

    let inter = (x2 - x1).max(0.0) * (y2 - y1).max(0.0);
    if inter == 0.0 {
        return 0.0;
    }
    let area_a = (a.x2 - a.x1) * (a.y2 - a.y1);
    let area_b = (b.x2 - b.x1) * (b.y2 - b.y1);
    inter / (area_a + area_b - inter)
}

fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(x1: f64, y1: f64, x2: f64, y2: f64, score: f64) -> Candidate {
        Candidate {
            x1,
            y1,
            x2,
            y2,
            score,
        }
    }

    #[test]
    fn test_preprocess_shape() {
        let data = vec![128u8; 200 * 100 * 3];
        let frame = Frame::new(data, 200, 100, 3, 0);
        let tensor = preprocess(&frame, 128);
        assert_eq!(tensor.shape(), &[1, 3, 128, 128]);
    }

    #[test]
    fn test_preprocess_normalized() {
        let data = vec![255u8; 50 * 50 * 3];
        let frame = Frame::new(data, 50, 50, 3, 0);
        let tensor = preprocess(&frame, 128);
        assert!((tensor[[0, 0, 0, 0]] - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_generate_anchors_count() {
        // 16x16 grid x 2 anchors + 8x8 grid x 6 anchors = 512 + 384 = 896
        assert_eq!(generate_anchors().len(), NUM_ANCHORS);
    }

    #[test]
    fn test_anchors_in_unit_range() {
        for a in &generate_anchors() {
            assert!(a[0] > 0.0 && a[0] < 1.0);
            assert!(a[1] > 0.0 && a[1] < 1.0);
        }
    }

    #[test]
    fn test_sigmoid_midpoint_and_tails() {
        assert!((sigmoid(0.0) - 0.5).abs() < 1e-6);
        assert!((sigmoid(10.0) - 1.0).abs() < 0.001);
        assert!(sigmoid(-10.0) < 0.001);
    }

    #[test]
    fn test_nms_suppresses_overlapping() {
        let mut dets = vec![
            candidate(0.0, 0.0, 100.0, 100.0, 0.9),
            candidate(5.0, 5.0, 105.0, 105.0, 0.7),
        ];
        assert_eq!(non_max_suppression(&mut dets, 0.3).len(), 1);
    }

    #[test]
    fn test_nms_keeps_separate() {
        let mut dets = vec![
            candidate(0.0, 0.0, 50.0, 50.0, 0.9),
            candidate(200.0, 200.0, 250.0, 250.0, 0.8),
        ];
        assert_eq!(non_max_suppression(&mut dets, 0.3).len(), 2);
    }

    #[test]
    fn test_nms_keeps_highest_score() {
        let mut dets = vec![
            candidate(5.0, 5.0, 105.0, 105.0, 0.7),
            candidate(0.0, 0.0, 100.0, 100.0, 0.9),
        ];
        let kept = non_max_suppression(&mut dets, 0.3);
        assert_eq!(kept.len(), 1);
        assert!((kept[0].score - 0.9).abs() < f64::EPSILON);
    }

    #[test]
    fn test_candidate_to_region_clamps_to_frame() {
        let c = candidate(600.0, 400.0, 700.0, 500.0, 0.9);
        let r = c.to_region(640, 480);
        assert_eq!(r.x, 600);
        assert_eq!(r.y, 400);
        assert_eq!(r.width, 40);
        assert_eq!(r.height, 80);
    }
}
