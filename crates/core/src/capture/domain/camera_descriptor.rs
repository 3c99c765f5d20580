/// One enumerable capture device.
///
/// Produced by device enumeration and consumed only for selection and
/// display; the session itself only ever uses the chosen `index`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CameraDescriptor {
    pub index: u32,
    pub display_name: String,
}

impl std::fmt::Display for CameraDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.index, self.display_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_format() {
        let desc = CameraDescriptor {
            index: 2,
            display_name: "Integrated Webcam".to_string(),
        };
        assert_eq!(desc.to_string(), "[2] Integrated Webcam");
    }
}
