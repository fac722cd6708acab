//! # Bit-Raster Codec
//!
//! Maps a framed buffer onto a square monochrome frame, one bit per sample,
//! and reads it back.
//!
//! ## Encoding
//! 1. Size the frame with [`FrameLimits::side_for`] (`side² >= 8 * len`)
//! 2. Start with every sample at [`OFF`]
//! 3. Walk the bits MSB-first, byte order preserved, writing [`ON`] for each
//!    `1` bit in row-major order (left to right, then top to bottom)
//! 4. Stop after the last bit; the remaining samples are slack and stay [`OFF`]
//!
//! ## Decoding
//! Every sample is thresholded at the midpoint of the 8-bit range, so drift
//! introduced by a lossy transport still reads back as the right bit as long
//! as it stays on its side of [`THRESHOLD`]. Bits are regrouped MSB-first and a
//! trailing partial byte is dropped.
//!
//! The codec knows nothing about headers; that belongs to
//! [`Framer`](crate::processing::framer::Framer).

use log::debug;

use crate::error::{Result, SmuggleError};
use crate::processing::framer::FramedBuffer;
use crate::processing::sizing::FrameLimits;

/// Sample value written for a `1` bit.
pub const ON: u8 = u8::MAX;

/// Sample value written for a `0` bit and for slack.
pub const OFF: u8 = 0;

/// Samples strictly above this value decode as `1`.
pub const THRESHOLD: u8 = u8::MAX / 2;

/// A square grid of 8-bit intensity samples stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    side: usize,
    samples: Vec<u8>,
}

impl Frame {
    fn blank(side: usize) -> Self {
        Self {
            side,
            samples: vec![OFF; side * side],
        }
    }

    /// Wraps a row-major sample buffer produced by an external decoder.
    ///
    /// # Errors
    /// [`SmuggleError::InvalidFrame`] if the grid is not square or the buffer
    /// does not hold exactly `width * height` samples.
    pub fn from_samples(width: usize, height: usize, samples: Vec<u8>) -> Result<Self> {
        if width != height {
            return Err(SmuggleError::InvalidFrame(format!(
                "frame must be square, got {}x{}",
                width, height
            )));
        }
        if samples.len() != width * height {
            return Err(SmuggleError::InvalidFrame(format!(
                "{}x{} frame needs {} samples, got {}",
                width,
                height,
                width * height,
                samples.len()
            )));
        }

        Ok(Self {
            side: width,
            samples,
        })
    }

    pub fn side(&self) -> usize {
        self.side
    }

    pub fn width(&self) -> usize {
        self.side
    }

    pub fn height(&self) -> usize {
        self.side
    }

    /// Sample at column `x`, row `y`.
    pub fn get(&self, x: usize, y: usize) -> Option<u8> {
        if x >= self.side || y >= self.side {
            return None;
        }
        self.samples.get(y * self.side + x).copied()
    }

    pub fn samples(&self) -> &[u8] {
        &self.samples
    }

    pub fn into_samples(self) -> Vec<u8> {
        self.samples
    }
}

/// Stateless encoder/decoder between framed bytes and frames.
#[derive(Debug, Clone, Copy, Default)]
pub struct RasterCodec {
    limits: FrameLimits,
}

impl RasterCodec {
    pub fn new(limits: FrameLimits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> FrameLimits {
        self.limits
    }

    pub fn encode(&self, framed: &FramedBuffer) -> Result<Frame> {
        self.encode_bytes(framed.as_bytes())
    }

    /// Rasterizes arbitrary bytes; the only failure is an oversized input.
    pub fn encode_bytes(&self, bytes: &[u8]) -> Result<Frame> {
        let bit_count = bytes.len() * 8;
        let side = self.limits.side_for(bit_count)?;
        let mut frame = Frame::blank(side);

        for (index, &byte) in bytes.iter().enumerate() {
            for bit in 0..8 {
                if (byte >> (7 - bit)) & 1 == 1 {
                    frame.samples[index * 8 + bit] = ON;
                }
            }
        }

        debug!(
            "Encoded {} bits into {}x{} frame ({} slack samples)",
            bit_count,
            side,
            side,
            side * side - bit_count
        );

        Ok(frame)
    }

    /// Reads every sample back into bytes, slack included.
    pub fn decode(&self, frame: &Frame) -> Vec<u8> {
        decode_samples(frame.samples())
    }
}

/// Thresholds a row-major sample buffer and regroups the bits into bytes.
pub fn decode_samples(samples: &[u8]) -> Vec<u8> {
    samples
        .chunks_exact(8)
        .map(|group| {
            group
                .iter()
                .fold(0u8, |byte, &sample| (byte << 1) | u8::from(sample > THRESHOLD))
        })
        .collect()
}
