//! # Media Adapters
//!
//! Everything that moves a [`Frame`](crate::processing::Frame) across the
//! process boundary. The core in [`crate::processing`] never touches files or
//! processes; these adapters do.
//!
//! - [`image`]: frame <-> PNG / any raster format
//! - [`video`]: frame -> video clip through an external encoder

pub mod image;
pub mod video;

pub use self::image::{frame_from_image_bytes, frame_to_png, open_frame, save_frame};
pub use self::video::{EncoderEvent, EventLevel, VideoConfig, VideoEncoder, VideoReport};
