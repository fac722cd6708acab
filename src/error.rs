//! # Error Types
//!
//! Every failure the smuggling core can report. The three codec kinds
//! (`PayloadTooLarge`, `MalformedHeader`, `ChecksumMismatch`) are terminal for
//! the call that raised them; the remaining variants come from the boundary
//! adapters in [`crate::media`] and [`crate::common`].

use thiserror::Error;

use crate::media::video::EncoderEvent;

#[derive(Debug, Error)]
pub enum SmuggleError {
    /// The framed payload needs more bits than the largest frame can hold.
    #[error("payload too large: {bits} bits needed, at most {max_bits} bits fit in a frame")]
    PayloadTooLarge { bits: u64, max_bits: u64 },

    /// The decoded buffer cannot hold the header, or the header points past the data.
    #[error("malformed header: {reason}")]
    MalformedHeader { reason: String },

    /// The recovered payload does not hash to the value stored in the header.
    #[error("checksum mismatch: header says {expected:#010x}, payload hashes to {actual:#010x}")]
    ChecksumMismatch { expected: u32, actual: u32 },

    /// A sample buffer that is not a square grid of the declared size.
    #[error("invalid frame: {0}")]
    InvalidFrame(String),

    /// Configuration values that cannot describe a usable frame.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The external video encoder exited unsuccessfully.
    #[error("video encoder failed ({}) with {} encoder events", .status, .events.len())]
    Video {
        status: String,
        events: Vec<EncoderEvent>,
    },
}

/// Result type alias using [`SmuggleError`].
pub type Result<T> = std::result::Result<T, SmuggleError>;
