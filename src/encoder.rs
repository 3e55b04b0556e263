//! Ut Video encoder implementation
//!
//! Every frame is coded independently: per plane, a pixel-domain predictor
//! turns samples into residuals, a Huffman table is built from the residual
//! histogram, and the bit-packed codes are laid out as length table, slice
//! offset table and byte-swapped slice payloads.

use byteorder::{BigEndian, ByteOrder, LittleEndian};

use crate::bitstream::{bswap_buf32, BitWriter, ByteWriter};
use crate::error::{Result, UtVideoError};
use crate::frame::Picture;
use crate::huffman::{calculate_code_lengths, calculate_codes, count_usage, HuffEntry};
use crate::predict::{left_predict, mangle_rgb_planes, median_predict, write_plane};
use crate::types::{PixelFormat, PredictionMethod, RGB_PLANE_ORDER};

/// Huffman compression mode in the stream flags
const COMP_HUFF: u32 = 1;
/// Size of the per-frame info trailer in bytes
const FRAME_INFO_SIZE: u32 = 4;
/// Guard bytes behind the bit-writer scratch buffer
const SLICE_BITS_PADDING: usize = 16;

/// Ut Video encoder configuration
#[derive(Debug, Clone)]
pub struct EncoderConfig {
    /// Frame width in pixels
    pub width: u32,
    /// Frame height in pixels
    pub height: u32,
    /// Input pixel layout
    pub format: PixelFormat,
    /// Per-plane predictor
    pub prediction: PredictionMethod,
    /// Horizontal slices per plane (1..=256)
    pub slices: u32,
}

impl EncoderConfig {
    /// Create a configuration with left prediction and a single slice.
    pub fn new(width: u32, height: u32, format: PixelFormat) -> Self {
        Self {
            width,
            height,
            format,
            prediction: PredictionMethod::Left,
            slices: 1,
        }
    }

    /// Set the prediction method.
    pub fn with_prediction(mut self, prediction: PredictionMethod) -> Self {
        self.prediction = prediction;
        self
    }

    /// Set the prediction method from an external option index (0..=4).
    pub fn with_method_index(mut self, method: u8) -> Result<Self> {
        self.prediction = PredictionMethod::from_method_index(method)?;
        Ok(self)
    }

    /// Set the slice count, clamped to 1..=256.
    pub fn with_slices(mut self, slices: u32) -> Self {
        self.slices = slices.clamp(1, 256);
        self
    }
}

/// One encoded frame
#[derive(Debug, Clone)]
pub struct EncodedPacket {
    /// Packet bytes
    pub data: Vec<u8>,
    /// Always true: every Ut Video frame is an intra frame
    pub keyframe: bool,
}

/// Ut Video encoder.
///
/// Owns the residual and bit scratch buffers, which are grown once and
/// reused across frames.
pub struct UtVideoEncoder {
    config: EncoderConfig,
    /// Residual plane scratch, one byte per luma-plane sample
    slice_buffer: Vec<u8>,
    /// Bit-packed slice scratch
    slice_bits: Vec<u8>,
    /// Mangled copy of the interleaved RGB(A) input
    rgb_scratch: Vec<u8>,
    frame_count: u64,
}

impl UtVideoEncoder {
    /// Create a new encoder, validating dimensions against the pixel format.
    pub fn new(mut config: EncoderConfig) -> Result<Self> {
        config.format.validate_dimensions(config.width, config.height)?;
        config.slices = config.slices.clamp(1, 256);

        let plane_size = config.width as usize * config.height as usize;
        let mut slice_buffer = Vec::new();
        fast_resize(&mut slice_buffer, plane_size)?;

        Ok(Self {
            config,
            slice_buffer,
            slice_bits: Vec::new(),
            rgb_scratch: Vec::new(),
            frame_count: 0,
        })
    }

    /// Encoder configuration
    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    /// FourCC identifying the coded stream
    pub fn fourcc(&self) -> [u8; 4] {
        self.config.format.fourcc()
    }

    /// Number of frames encoded so far
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Container-level stream header, emitted once per stream.
    pub fn extradata(&self) -> [u8; 16] {
        let mut out = [0u8; 16];

        // Version 1.0.0; the low byte of the tag is the implementation id
        // 0xF0, which leads on the wire
        BigEndian::write_u32(&mut out[0..4], 0xF000_0001);

        // Original input format, informational only
        LittleEndian::write_u32(&mut out[4..8], self.config.format.original_format());

        LittleEndian::write_u32(&mut out[8..12], FRAME_INFO_SIZE);

        // Slice count minus one, interlacing off, Huffman compression
        let flags = ((self.config.slices - 1) << 24) | COMP_HUFF;
        LittleEndian::write_u32(&mut out[12..16], flags);

        out
    }

    /// Encode one picture into a packet.
    pub fn encode(&mut self, picture: &Picture) -> Result<EncodedPacket> {
        let config = &self.config;
        if picture.format() != config.format
            || picture.width() != config.width
            || picture.height() != config.height
        {
            return Err(UtVideoError::PictureMismatch(format!(
                "expected {:?} {}x{}, got {:?} {}x{}",
                config.format,
                config.width,
                config.height,
                picture.format(),
                picture.width(),
                picture.height()
            )));
        }

        let width = config.width as usize;
        let height = config.height as usize;
        let planes = config.format.planes();
        let slices = config.slices as usize;

        let mut packet = Vec::new();
        let capacity = (256 + 4 * slices + width * height) * planes + 4;
        fast_resize(&mut packet, capacity)?;

        fast_resize(&mut self.slice_bits, width * height + SLICE_BITS_PADDING)?;

        let mut pb = ByteWriter::new(&mut packet);

        if config.format.is_rgb() {
            // Mangle a copy of the caller's pixels; the transform is applied
            // once for all channel planes
            let step = config.format.step();
            let stride = picture.linesize(0);
            let needed = (height - 1) * stride + width * step;
            fast_resize(&mut self.rgb_scratch, needed)?;
            self.rgb_scratch[..needed].copy_from_slice(&picture.plane(0)[..needed]);
            mangle_rgb_planes(&mut self.rgb_scratch, step, stride, width, height);

            for plane in 0..planes {
                encode_plane(
                    &self.rgb_scratch[RGB_PLANE_ORDER[plane]..],
                    planes,
                    stride,
                    width,
                    height,
                    config.prediction,
                    slices,
                    &mut self.slice_buffer,
                    &mut self.slice_bits,
                    &mut pb,
                )?;
            }
        } else {
            for plane in 0..planes {
                let (pw, ph) = config
                    .format
                    .plane_dimensions(plane, config.width, config.height);
                encode_plane(
                    picture.plane(plane),
                    1,
                    picture.linesize(plane),
                    pw as usize,
                    ph as usize,
                    config.prediction,
                    slices,
                    &mut self.slice_buffer,
                    &mut self.slice_bits,
                    &mut pb,
                )?;
            }
        }

        // Frame info trailer: prediction method in bits 8..15
        let frame_info = config.prediction.frame_pred() << 8;
        pb.put_le32(frame_info)?;

        let size = pb.tell();
        packet.truncate(size);

        self.frame_count += 1;

        Ok(EncodedPacket {
            data: packet,
            keyframe: true,
        })
    }
}

/// Grow a scratch buffer to at least `needed` bytes without ever shrinking.
fn fast_resize(buf: &mut Vec<u8>, needed: usize) -> Result<()> {
    if buf.len() < needed {
        buf.try_reserve_exact(needed - buf.len())
            .map_err(|_| UtVideoError::OutOfMemory { requested: needed })?;
        buf.resize(needed, 0);
    }
    Ok(())
}

/// Bit-pack the Huffman codes of one residual strip and pad the tail to a
/// 32-bit boundary. Returns the number of bits written including the pad.
fn write_huff_codes(src: &[u8], dst: &mut [u8], he: &[HuffEntry; 256]) -> Result<usize> {
    let mut writer = BitWriter::new(dst);

    for &value in src {
        let entry = he[value as usize];
        writer.put(entry.code, entry.len as u32)?;
    }

    writer.pad_to_32()?;
    let bits = writer.bits_written();
    writer.flush()?;

    Ok(bits)
}

/// Encode one plane: predict, build the code table, then emit the plane
/// header and byte-swapped slice payloads.
#[allow(clippy::too_many_arguments)]
fn encode_plane(
    src: &[u8],
    step: usize,
    stride: usize,
    width: usize,
    height: usize,
    prediction: PredictionMethod,
    slices: usize,
    residual: &mut [u8],
    slice_bits: &mut [u8],
    pb: &mut ByteWriter,
) -> Result<()> {
    let residual = &mut residual[..width * height];

    // Each slice strip is predicted independently
    let mut send = 0;
    for i in 0..slices {
        let sstart = send;
        send = height * (i + 1) / slices;
        let dst = &mut residual[sstart * width..send * width];
        let rows = send - sstart;
        match prediction {
            PredictionMethod::None => {
                write_plane(&src[sstart * stride..], dst, step, stride, width, rows)
            }
            PredictionMethod::Left => {
                left_predict(&src[sstart * stride..], dst, step, stride, width, rows)
            }
            PredictionMethod::Median => {
                median_predict(&src[sstart * stride..], dst, step, stride, width, rows)
            }
        }
    }

    let mut counts = [0u32; 256];
    count_usage(residual, &mut counts);

    // Fast path when the plane uses a single symbol: a length table with one
    // zero entry and empty slices
    for symbol in 0..256usize {
        if counts[symbol] != 0 {
            if counts[symbol] as usize == width * height {
                for i in 0..256usize {
                    pb.put_u8(if i == symbol { 0 } else { 0xFF })?;
                }
                for _ in 0..slices {
                    pb.put_le32(0)?;
                }
                return Ok(());
            }
            break;
        }
    }

    let lengths = calculate_code_lengths(&counts);

    // Plane header: 256 code lengths in symbol order, then the slice end
    // offsets which are interleaved with the payload writes below
    for &len in lengths.iter() {
        pb.put_u8(len)?;
    }

    let he = calculate_codes(&lengths);

    let mut offset: usize = 0;
    let mut send = 0;
    for i in 0..slices {
        let sstart = send;
        send = height * (i + 1) / slices;

        let bits = write_huff_codes(&residual[sstart * width..send * width], slice_bits, &he)?;
        let slice_len = bits >> 3;

        bswap_buf32(&mut slice_bits[..slice_len]);

        offset += slice_len;

        // End offset for this slice, then jump behind the table to append
        // the payload and return for the next slot
        pb.put_le32(offset as u32)?;
        pb.seek_relative((4 * (slices - i - 1) + offset - slice_len) as i64)?;
        pb.put_bytes(&slice_bits[..slice_len])?;
        pb.seek_relative(-((4 * (slices - i - 1) + offset) as i64))?;
    }

    // Leave the cursor at the end of the written slices
    pb.seek_relative(offset as i64)?;

    Ok(())
}
