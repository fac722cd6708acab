//! # Frame Dimension Sizing
//!
//! Decides how large a square frame must be to carry a given number of bits.
//!
//! The side is the smallest integer whose square covers every bit, raised to a
//! configured floor so tiny payloads still produce a frame the external video
//! encoder handles comfortably. A floor of `0` disables it and lets the frame
//! shrink to the exact bit count.
//!
//! ```text
//! side = max(min_side, ceil(sqrt(bit_count)))      fails if side > max_side
//! ```

use log::debug;

use crate::error::{Result, SmuggleError};

/// Default minimum frame side, in samples.
pub const DEFAULT_MIN_SIDE: usize = 64;

/// Default maximum frame side, in samples (16 777 216 addressable bits).
pub const DEFAULT_MAX_SIDE: usize = 4096;

/// Largest side accepted by [`FrameLimits::new`]; keeps `side²` inside `u32`.
pub const MAX_SUPPORTED_SIDE: usize = u16::MAX as usize;

/// Smallest side whose square holds `bit_count` bits, raised to `min_side`.
///
/// Non-decreasing in `bit_count`, and `size_for(n, m)² >= n` for every input.
pub fn size_for(bit_count: usize, min_side: usize) -> usize {
    ceil_sqrt(bit_count).max(min_side)
}

fn ceil_sqrt(n: usize) -> usize {
    if n == 0 {
        return 0;
    }

    let square = |r: usize| (r as u128) * (r as u128);

    // Float estimate, then correct the rounding in either direction.
    let mut root = (n as f64).sqrt() as usize;
    while square(root) < n as u128 {
        root += 1;
    }
    while root > 0 && square(root - 1) >= n as u128 {
        root -= 1;
    }
    root
}

/// The floor and ceiling applied to every frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameLimits {
    min_side: usize,
    max_side: usize,
}

impl FrameLimits {
    /// Creates limits after checking they can describe at least one frame.
    ///
    /// # Errors
    /// [`SmuggleError::InvalidConfig`] when `max_side` is zero or above
    /// [`MAX_SUPPORTED_SIDE`], or when `min_side > max_side`.
    pub fn new(min_side: usize, max_side: usize) -> Result<Self> {
        if max_side == 0 {
            return Err(SmuggleError::InvalidConfig(
                "max_side must be at least 1".to_string(),
            ));
        }
        if max_side > MAX_SUPPORTED_SIDE {
            return Err(SmuggleError::InvalidConfig(format!(
                "max_side {} exceeds the supported maximum of {}",
                max_side, MAX_SUPPORTED_SIDE
            )));
        }
        if min_side > max_side {
            return Err(SmuggleError::InvalidConfig(format!(
                "min_side {} is larger than max_side {}",
                min_side, max_side
            )));
        }

        Ok(Self { min_side, max_side })
    }

    pub fn min_side(&self) -> usize {
        self.min_side
    }

    pub fn max_side(&self) -> usize {
        self.max_side
    }

    /// Total number of bits the largest permitted frame can address.
    pub fn max_bits(&self) -> u64 {
        (self.max_side as u64) * (self.max_side as u64)
    }

    /// Fails with [`SmuggleError::PayloadTooLarge`] if `bits` exceed [`Self::max_bits`].
    pub fn check_bits(&self, bits: u64) -> Result<()> {
        let max_bits = self.max_bits();
        if bits > max_bits {
            return Err(SmuggleError::PayloadTooLarge { bits, max_bits });
        }
        Ok(())
    }

    /// Side of the frame needed for `bit_count` bits under these limits.
    pub fn side_for(&self, bit_count: usize) -> Result<usize> {
        self.check_bits(bit_count as u64)?;

        let side = size_for(bit_count, self.min_side);
        debug!(
            "Sized frame for {} bits: {}x{} (floor {}, ceiling {})",
            bit_count, side, side, self.min_side, self.max_side
        );
        Ok(side)
    }
}

impl Default for FrameLimits {
    fn default() -> Self {
        Self {
            min_side: DEFAULT_MIN_SIDE,
            max_side: DEFAULT_MAX_SIDE,
        }
    }
}
