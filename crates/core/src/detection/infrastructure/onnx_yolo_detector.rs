/// YOLO face detector using ONNX Runtime via `ort`.
///
/// The higher-accuracy strategy. Letterbox preprocessing, inference, NMS.
/// Identification is a non-goal, so the output is plain bounding boxes
/// with no tracking or landmarks.
use std::path::Path;

use crate::detection::domain::face_detector::FaceDetector;
use crate::shared::frame::Frame;
use crate::shared::region::FaceRegion;

/// Fallback input resolution when the model doesn't specify dimensions.
const DEFAULT_INPUT_SIZE: u32 = 640;

/// Default confidence threshold.
pub const DEFAULT_CONFIDENCE: f64 = 0.25;

/// NMS IoU threshold.
const NMS_IOU_THRESH: f64 = 0.45;

pub struct OnnxYoloDetector {
    session: ort::session::Session,
    confidence: f64,
    input_size: u32,
}

impl OnnxYoloDetector {
    /// Load a YOLO ONNX model and prepare for inference.
    ///
    /// The input resolution is read from the model's input shape (expecting
    /// NCHW). Falls back to 640 if the shape is dynamic or unreadable.
    pub fn new(model_path: &Path, confidence: f64) -> Result<Self, Box<dyn std::error::Error>> {
        let session = ort::session::Session::builder()?.commit_from_file(model_path)?;

        let input_size = session
            .inputs()
            .first()
            .and_then(|input| {
                if let ort::value::ValueType::Tensor { ref shape, .. } = input.dtype() {
                    // shape is [N, C, H, W]; H == W for square input
                    if shape.len() >= 4 && shape[2] > 0 {
                        Some(shape[2] as u32)
                    } else {
                        None
                    }
                } else {
                    None
                }
            })
            .unwrap_or(DEFAULT_INPUT_SIZE);

        Ok(Self {
            session,
            confidence,
            input_size,
        })
    }
}

impl FaceDetector for OnnxYoloDetector {
    fn detect(&mut self, frame: &Frame) -> Result<Vec<FaceRegion>, Box<dyn std::error::Error>> {
        let fw = frame.width();
        let fh = frame.height();

        // 1. Preprocess: letterbox + normalize to NCHW float32
        let (input_tensor, scale, pad_x, pad_y) = letterbox(frame, self.input_size);

        // 2. Inference
        let input_value = ort::value::Tensor::from_array(input_tensor)?;
        let outputs = self.session.run(ort::inputs![input_value])?;
        if outputs.len() == 0 {
            return Err("YOLO model produced no outputs".into());
        }
        let tensor = outputs[0].try_extract_array::<f32>()?;
        let shape = tensor.shape();

        // YOLO output is [1, num_features, num_detections] (transposed)
        // or [1, num_detections, num_features]. Handle both.
        let (num_dets, num_feats) = if shape.len() == 3 {
            if shape[1] < shape[2] {
                (shape[2], shape[1])
            } else {
                (shape[1], shape[2])
            }
        } else {
            return Err(format!("Unexpected YOLO output shape: {shape:?}").into());
        };

        let data = tensor.as_slice().ok_or("Cannot get tensor slice")?;
        let transposed = shape.len() == 3 && shape[1] < shape[2];

        // 3. Parse detections above the confidence threshold
        let mut raw_dets = Vec::new();
        for i in 0..num_dets {
            let row = if transposed {
                (0..num_feats)
                    .map(|f| data[f * num_dets + i])
                    .collect::<Vec<f32>>()
            } else {
                data[i * num_feats..(i + 1) * num_feats].to_vec()
            };

            // row format: [cx, cy, w, h, conf, ...optional keypoints]
            if row.len() < 5 {
                continue;
            }
            let conf = row[4] as f64;
            if conf < self.confidence {
                continue;
            }

            let cx = row[0] as f64;
            let cy = row[1] as f64;
            let w = row[2] as f64;
            let h = row[3] as f64;

            // Letterbox coords back to original frame coords
            raw_dets.push(RawDetection {
                x1: ((cx - w / 2.0) - pad_x as f64) / scale,
                y1: ((cy - h / 2.0) - pad_y as f64) / scale,
                x2: ((cx + w / 2.0) - pad_x as f64) / scale,
                y2: ((cy + h / 2.0) - pad_y as f64) / scale,
                confidence: conf,
            });
        }

        // 4. NMS, then clamp boxes into the frame
        let filtered = nms(&mut raw_dets, NMS_IOU_THRESH);
        let regions = filtered
            .iter()
            .map(|d| clamp_to_frame(d, fw, fh))
            .filter(|r| r.width > 0 && r.height > 0)
            .collect();

        Ok(regions)
    }
}

// ---------------------------------------------------------------------------
// Preprocessing
// ---------------------------------------------------------------------------

/// Letterbox-resize a frame to `target_size` x `target_size`.
///
/// Returns `(NCHW float32 tensor, scale, pad_x, pad_y)`.
fn letterbox(frame: &Frame, target_size: u32) -> (ndarray::Array4<f32>, f64, u32, u32) {
    let fw = frame.width() as f64;
    let fh = frame.height() as f64;
    let target = target_size as f64;

    let scale = (target / fw).min(target / fh);
    let new_w = (fw * scale).round() as u32;
    let new_h = (fh * scale).round() as u32;
    let pad_x = (target_size - new_w) / 2;
    let pad_y = (target_size - new_h) / 2;

    // Pad with 114/255 gray, YOLO convention
    let gray = 114.0f32 / 255.0;
    let mut tensor =
        ndarray::Array4::<f32>::from_elem((1, 3, target_size as usize, target_size as usize), gray);

    let src = frame.as_ndarray(); // [H, W, C] u8
    let src_h = frame.height() as usize;
    let src_w = frame.width() as usize;

    // Nearest-neighbor resize into the padded region
    for y in 0..new_h as usize {
        let src_y = ((y as f64 / scale) as usize).min(src_h - 1);
        for x in 0..new_w as usize {
            let src_x = ((x as f64 / scale) as usize).min(src_w - 1);
            let ty = pad_y as usize + y;
            let tx = pad_x as usize + x;
            for c in 0..3 {
                tensor[[0, c, ty, tx]] = src[[src_y, src_x, c]] as f32 / 255.0;
            }
        }
    }

    (tensor, scale, pad_x, pad_y)
}

// ---------------------------------------------------------------------------
// Post-processing
// ---------------------------------------------------------------------------

#[derive(Clone, Debug)]
struct RawDetection {
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
    confidence: f64,
}

fn clamp_to_frame(d: &RawDetection, frame_w: u32, frame_h: u32) -> FaceRegion {
    let x = d.x1.max(0.0) as i32;
    let y = d.y1.max(0.0) as i32;
    FaceRegion {
        x,
        y,
        width: (d.x2.min(frame_w as f64) as i32 - x).max(0),
        height: (d.y2.min(frame_h as f64) as i32 - y).max(0),
    }
}

/// Greedy NMS: sort by confidence descending, suppress overlapping boxes.
fn nms(dets: &mut [RawDetection], iou_thresh: f64) -> Vec<RawDetection> {
    dets.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut keep = Vec::new();
    let mut suppressed = vec![false; dets.len()];

    for i in 0..dets.len() {
        if suppressed[i] {
            continue;
        }
        keep.push(dets[i].clone());
        for j in (i + 1)..dets.len() {
            if suppressed[j] {
                continue;
            }
            let iou = bbox_iou(
                &[dets[i].x1, dets[i].y1, dets[i].x2, dets[i].y2],
                &[dets[j].x1, dets[j].y1, dets[j].x2, dets[j].y2],
            );
            if iou > iou_thresh {
                suppressed[j] = true;
            }
        }
    }
    keep
}

fn bbox_iou(a: &[f64; 4], b: &[f64; 4]) -> f64 {
    let x1 = a[0].max(b[0]);
    let y1 = a[1].max(b[1]);
    let x2 = a[2].min(b[2]);
    let y2 = a[3].min(b[3]);

    let inter = (x2 - x1).max(0.0) * (y2 - y1).max(0.0);
    if inter == 0.0 {
        return 0.0;
    }
    let area_a = (a[2] - a[0]) * (a[3] - a[1]);
    let area_b = (b[2] - b[0]) * (b[3] - b[1]);
    inter / (area_a + area_b - inter)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(x1: f64, y1: f64, x2: f64, y2: f64, confidence: f64) -> RawDetection {
        RawDetection {
            x1,
            y1,
            x2,
            y2,
            confidence,
        }
    }

    #[test]
    fn test_letterbox_square_input_no_padding() {
        let data = vec![0u8; 100 * 100 * 3];
        let frame = Frame::new(data, 100, 100, 3, 0);
        let (tensor, scale, pad_x, pad_y) = letterbox(&frame, 640);
        assert_eq!(tensor.shape(), &[1, 3, 640, 640]);
        assert!((scale - 6.4).abs() < 1e-9);
        assert_eq!(pad_x, 0);
        assert_eq!(pad_y, 0);
    }

    #[test]
    fn test_letterbox_wide_input_pads_vertically() {
        let data = vec![0u8; 200 * 100 * 3];
        let frame = Frame::new(data, 200, 100, 3, 0);
        let (_, scale, pad_x, pad_y) = letterbox(&frame, 640);
        assert!((scale - 3.2).abs() < 1e-9);
        assert_eq!(pad_x, 0);
        assert_eq!(pad_y, 160);
    }

    #[test]
    fn test_letterbox_pad_is_gray() {
        let data = vec![0u8; 200 * 100 * 3];
        let frame = Frame::new(data, 200, 100, 3, 0);
        let (tensor, _, _, pad_y) = letterbox(&frame, 640);
        // A pixel inside the top pad band keeps the 114/255 fill
        let gray = 114.0f32 / 255.0;
        assert!((tensor[[0, 0, (pad_y / 2) as usize, 320]] - gray).abs() < 1e-6);
    }

    #[test]
    fn test_nms_suppresses_overlapping() {
        let mut dets = vec![
            raw(0.0, 0.0, 100.0, 100.0, 0.9),
            raw(10.0, 10.0, 110.0, 110.0, 0.6),
        ];
        assert_eq!(nms(&mut dets, 0.45).len(), 1);
    }

    #[test]
    fn test_nms_keeps_disjoint() {
        let mut dets = vec![
            raw(0.0, 0.0, 50.0, 50.0, 0.9),
            raw(300.0, 300.0, 350.0, 350.0, 0.8),
        ];
        assert_eq!(nms(&mut dets, 0.45).len(), 2);
    }

    #[test]
    fn test_bbox_iou_identical() {
        let b = [0.0, 0.0, 100.0, 100.0];
        assert!((bbox_iou(&b, &b) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_clamp_to_frame_truncates_out_of_bounds() {
        let d = raw(-10.0, -5.0, 650.0, 490.0, 0.9);
        let r = clamp_to_frame(&d, 640, 480);
        assert_eq!(r.x, 0);
        assert_eq!(r.y, 0);
        assert_eq!(r.width, 640);
        assert_eq!(r.height, 480);
    }

    #[test]
    fn test_clamp_to_frame_degenerate_box_is_empty() {
        let d = raw(700.0, 500.0, 710.0, 510.0, 0.9);
        let r = clamp_to_frame(&d, 640, 480);
        assert_eq!(r.width, 0);
        assert_eq!(r.height, 0);
    }
}
