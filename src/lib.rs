//! Ut Video Lossless Video Encoder
//!
//! This crate provides a pure Rust encoder for the Ut Video lossless format
//! (FourCCs `ULRG`, `ULRA`, `ULY0`, `ULY2`). Each frame is compressed
//! independently with per-plane pixel prediction followed by canonical
//! Huffman coding, producing packets bit-compatible with Ut Video decoders.
//!
//! # Features
//!
//! - RGB, RGBA, YUV 4:2:0 and YUV 4:2:2 input layouts
//! - None, left and median per-plane prediction
//! - Slice-based plane layout (single slice by default)
//! - 16-byte container extradata emission
//!
//! # Example
//!
//! ```
//! use transcode_utvideo::{EncoderConfig, Picture, PixelFormat, UtVideoEncoder};
//!
//! let y = vec![0x80u8; 64 * 48];
//! let u = vec![0x80u8; 32 * 24];
//! let v = vec![0x80u8; 32 * 24];
//! let picture = Picture::planar(PixelFormat::Yuv420p, 64, 48, [&y, &u, &v], [64, 32, 32])?;
//!
//! let config = EncoderConfig::new(64, 48, PixelFormat::Yuv420p);
//! let mut encoder = UtVideoEncoder::new(config)?;
//!
//! let extradata = encoder.extradata(); // stream header for the container
//! assert_eq!(extradata.len(), 16);
//!
//! let packet = encoder.encode(&picture)?;
//! assert!(packet.keyframe);
//! # Ok::<(), transcode_utvideo::UtVideoError>(())
//! ```

#![warn(missing_docs)]

mod bitstream;
mod encoder;
mod error;
mod frame;
mod huffman;
mod predict;
mod types;

pub use encoder::{EncodedPacket, EncoderConfig, UtVideoEncoder};
pub use error::{Result, UtVideoError};
pub use frame::Picture;
pub use types::{PixelFormat, PredictionMethod};
