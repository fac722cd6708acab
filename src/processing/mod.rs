//! # Payload Framing and Bit-Raster Encoding
//!
//! The pure, synchronous core of the crate:
//!
//! - [`framer`]: header + payload framing and validation
//! - [`raster`]: framed bytes <-> square monochrome frame
//! - [`sizing`]: frame dimension policy and limits
//!
//! ```text
//! payload -> Framer::build -> FramedBuffer -> RasterCodec::encode -> Frame
//! Frame -> RasterCodec::decode -> bytes -> Framer::parse -> payload
//! ```

pub mod framer;
pub mod raster;
pub mod sizing;

// Re-export main types for convenience
pub use framer::{FramedBuffer, Framer, HeaderVariant, PayloadHeader};
pub use raster::{Frame, RasterCodec};
pub use sizing::{size_for, FrameLimits, DEFAULT_MAX_SIDE, DEFAULT_MIN_SIDE};
