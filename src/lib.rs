//! # Pixel Smuggler
//!
//! Hides an arbitrary byte payload inside a square black-and-white image, one
//! bit per pixel, so that an external encoder can wrap the image as a short
//! video clip.
//!
//! ## Modules
//!
//! - [`processing`]: payload framing, bit-raster codec, frame sizing
//! - [`common`]: configuration and payload serialization
//! - [`media`]: PNG transport and external video encoding
//! - [`smuggler`]: one-call façade over framing and rasterizing
//! - [`error`]: error types

pub mod common;
pub mod error;
pub mod media;
pub mod processing;
pub mod smuggler;

pub use error::{Result, SmuggleError};
pub use processing::{Frame, FrameLimits, HeaderVariant};
pub use smuggler::Smuggler;
