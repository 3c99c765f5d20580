use ndarray::ArrayView3;

/// One captured camera frame: contiguous RGB bytes in row-major order.
///
/// Pixel format conversion happens at the capture boundary; everything
/// downstream treats the data as opaque. `index` is the capture sequence
/// number, monotonically increasing within a session.
#[derive(Clone, Debug)]
pub struct Frame {
    data: Vec<u8>,
    width: u32,
    height: u32,
    channels: u8,
    index: u64,
}

impl Frame {
    pub fn new(data: Vec<u8>, width: u32, height: u32, channels: u8, index: u64) -> Self {
        debug_assert_eq!(
            data.len(),
            (width as usize) * (height as usize) * (channels as usize),
            "data length must equal width * height * channels"
        );
        Self {
            data,
            width,
            height,
            channels,
            index,
        }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    pub fn index(&self) -> u64 {
        self.index
    }

    /// View as `(height, width, channels)` for detector preprocessing.
    pub fn as_ndarray(&self) -> ArrayView3<'_, u8> {
        let shape = (
            self.height as usize,
            self.width as usize,
            self.channels as usize,
        );
        ArrayView3::from_shape(shape, &self.data)
            .expect("Frame data length must match dimensions")
    }
}
