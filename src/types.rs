//! Ut Video type definitions

use crate::error::{Result, UtVideoError};

/// Original-format tag for interleaved RGB
const UTVIDEO_RGB: u32 = 0x18 << 24 | 0x01 << 16;
/// Original-format tag for interleaved RGBA
const UTVIDEO_RGBA: u32 = 0x18 << 24 | 0x02 << 16;
/// Original-format tag for planar 4:2:0 ("YV12")
const UTVIDEO_420: u32 = u32::from_le_bytes(*b"YV12");
/// Original-format tag for planar 4:2:2 ("YUY2")
const UTVIDEO_422: u32 = u32::from_le_bytes(*b"YUY2");

/// Order in which the interleaved RGB(A) channels are encoded as planes:
/// G, B, R, then A.
pub const RGB_PLANE_ORDER: [usize; 4] = [1, 2, 0, 3];

/// Supported input pixel layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    /// Interleaved 8-bit RGB, 3 bytes per pixel
    Rgb24,
    /// Interleaved 8-bit RGBA, 4 bytes per pixel
    Rgba,
    /// Planar 8-bit YUV 4:2:0, chroma halved in both directions
    Yuv420p,
    /// Planar 8-bit YUV 4:2:2, chroma halved horizontally
    Yuv422p,
}

impl PixelFormat {
    /// Number of coded planes
    pub fn planes(&self) -> usize {
        match self {
            PixelFormat::Rgba => 4,
            _ => 3,
        }
    }

    /// Distance in bytes between horizontally adjacent samples of one channel
    pub fn step(&self) -> usize {
        match self {
            PixelFormat::Rgb24 => 3,
            PixelFormat::Rgba => 4,
            PixelFormat::Yuv420p | PixelFormat::Yuv422p => 1,
        }
    }

    /// True for the interleaved RGB(A) layouts
    pub fn is_rgb(&self) -> bool {
        matches!(self, PixelFormat::Rgb24 | PixelFormat::Rgba)
    }

    /// FourCC identifying the coded stream
    pub fn fourcc(&self) -> [u8; 4] {
        match self {
            PixelFormat::Rgb24 => *b"ULRG",
            PixelFormat::Rgba => *b"ULRA",
            PixelFormat::Yuv420p => *b"ULY0",
            PixelFormat::Yuv422p => *b"ULY2",
        }
    }

    /// "Original format" tag stored in the extradata; decoders ignore it
    pub fn original_format(&self) -> u32 {
        match self {
            PixelFormat::Rgb24 => UTVIDEO_RGB,
            PixelFormat::Rgba => UTVIDEO_RGBA,
            PixelFormat::Yuv420p => UTVIDEO_420,
            PixelFormat::Yuv422p => UTVIDEO_422,
        }
    }

    /// Dimensions of a coded plane
    pub fn plane_dimensions(&self, plane: usize, width: u32, height: u32) -> (u32, u32) {
        let chroma = plane > 0;
        match self {
            PixelFormat::Rgb24 | PixelFormat::Rgba => (width, height),
            PixelFormat::Yuv422p => (width >> chroma as u32, height),
            PixelFormat::Yuv420p => (width >> chroma as u32, height >> chroma as u32),
        }
    }

    /// Check the subsampling constraints on the frame dimensions
    pub fn validate_dimensions(&self, width: u32, height: u32) -> Result<()> {
        if width == 0 || height == 0 {
            return Err(UtVideoError::InvalidDimensions {
                width,
                height,
                reason: "dimensions must be non-zero",
            });
        }
        match self {
            PixelFormat::Yuv420p if width & 1 != 0 || height & 1 != 0 => {
                Err(UtVideoError::InvalidDimensions {
                    width,
                    height,
                    reason: "4:2:0 video requires even width and height",
                })
            }
            PixelFormat::Yuv422p if width & 1 != 0 => Err(UtVideoError::InvalidDimensions {
                width,
                height,
                reason: "4:2:2 video requires even width",
            }),
            _ => Ok(()),
        }
    }
}

/// Pixel-domain predictors applied per plane before entropy coding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredictionMethod {
    /// Samples are coded as-is
    None,
    /// Difference to the previous sample in stream order
    Left,
    /// Difference to the median of left, top and left+top-topleft
    Median,
}

impl PredictionMethod {
    /// Map an external prediction-method index to a supported mode.
    ///
    /// Indices 3 (gradient) and 4 (plane) exist in the option space but are
    /// not encodable in Ut Video, as is anything out of range.
    pub fn from_method_index(method: u8) -> Result<Self> {
        match method {
            0 => Ok(PredictionMethod::None),
            1 => Ok(PredictionMethod::Left),
            2 => Ok(PredictionMethod::Median),
            _ => Err(UtVideoError::UnsupportedPrediction(method)),
        }
    }

    /// Wire value carried in the frame-info trailer (bits 8..15)
    pub fn frame_pred(&self) -> u32 {
        match self {
            PredictionMethod::None => 0,
            PredictionMethod::Left => 1,
            PredictionMethod::Median => 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plane_counts() {
        assert_eq!(PixelFormat::Rgb24.planes(), 3);
        assert_eq!(PixelFormat::Rgba.planes(), 4);
        assert_eq!(PixelFormat::Yuv420p.planes(), 3);
        assert_eq!(PixelFormat::Yuv422p.planes(), 3);
    }

    #[test]
    fn test_fourcc() {
        assert_eq!(&PixelFormat::Rgb24.fourcc(), b"ULRG");
        assert_eq!(&PixelFormat::Rgba.fourcc(), b"ULRA");
        assert_eq!(&PixelFormat::Yuv420p.fourcc(), b"ULY0");
        assert_eq!(&PixelFormat::Yuv422p.fourcc(), b"ULY2");
    }

    #[test]
    fn test_plane_dimensions() {
        assert_eq!(PixelFormat::Yuv420p.plane_dimensions(0, 640, 480), (640, 480));
        assert_eq!(PixelFormat::Yuv420p.plane_dimensions(1, 640, 480), (320, 240));
        assert_eq!(PixelFormat::Yuv422p.plane_dimensions(2, 640, 480), (320, 480));
        assert_eq!(PixelFormat::Rgba.plane_dimensions(3, 640, 480), (640, 480));
    }

    #[test]
    fn test_dimension_rules() {
        assert!(PixelFormat::Yuv420p.validate_dimensions(640, 480).is_ok());
        assert!(matches!(
            PixelFormat::Yuv420p.validate_dimensions(3, 480),
            Err(UtVideoError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            PixelFormat::Yuv420p.validate_dimensions(640, 479),
            Err(UtVideoError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            PixelFormat::Yuv422p.validate_dimensions(3, 480),
            Err(UtVideoError::InvalidDimensions { .. })
        ));
        assert!(PixelFormat::Yuv422p.validate_dimensions(4, 479).is_ok());
        assert!(PixelFormat::Rgb24.validate_dimensions(3, 479).is_ok());
    }

    #[test]
    fn test_method_index_mapping() {
        assert_eq!(
            PredictionMethod::from_method_index(0).unwrap(),
            PredictionMethod::None
        );
        assert_eq!(
            PredictionMethod::from_method_index(1).unwrap(),
            PredictionMethod::Left
        );
        assert_eq!(
            PredictionMethod::from_method_index(2).unwrap(),
            PredictionMethod::Median
        );
        for method in 3..=6 {
            assert!(matches!(
                PredictionMethod::from_method_index(method),
                Err(UtVideoError::UnsupportedPrediction(m)) if m == method
            ));
        }
    }

    #[test]
    fn test_frame_pred_values() {
        assert_eq!(PredictionMethod::None.frame_pred(), 0);
        assert_eq!(PredictionMethod::Left.frame_pred(), 1);
        assert_eq!(PredictionMethod::Median.frame_pred(), 3);
    }
}
