//! # Frame Image Transport
//!
//! Converts frames to and from raster images with the `image` crate.
//!
//! Frames are written as 8-bit grayscale PNG, which round-trips two-level
//! content losslessly. Reading accepts any format `image` can decode; colour
//! input is reduced to 8-bit luma before thresholding, so a frame that went
//! through an RGB or YUV pipeline still decodes.

use image::{DynamicImage, GrayImage, ImageFormat};
use log::info;
use std::io::Cursor;
use std::path::Path;

use crate::error::{Result, SmuggleError};
use crate::processing::raster::Frame;

fn to_gray(frame: &Frame) -> Result<GrayImage> {
    let side = u32::try_from(frame.side())
        .map_err(|_| SmuggleError::InvalidFrame(format!("side {} too large", frame.side())))?;

    GrayImage::from_raw(side, side, frame.samples().to_vec()).ok_or_else(|| {
        SmuggleError::InvalidFrame(format!("sample buffer does not fill {}x{}", side, side))
    })
}

/// Encode a frame as PNG bytes.
pub fn frame_to_png(frame: &Frame) -> Result<Vec<u8>> {
    let image = to_gray(frame)?;

    let mut output_bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut output_bytes), ImageFormat::Png)?;
    Ok(output_bytes)
}

/// Build a frame from an already decoded image.
///
/// # Errors
/// [`SmuggleError::InvalidFrame`] if the image is not square.
pub fn frame_from_image(image: &DynamicImage) -> Result<Frame> {
    let luma = image.to_luma8();
    let (width, height) = luma.dimensions();
    Frame::from_samples(width as usize, height as usize, luma.into_raw())
}

/// Decode image bytes in any supported format into a frame.
pub fn frame_from_image_bytes(image_bytes: &[u8]) -> Result<Frame> {
    let image = image::load_from_memory(image_bytes)?;
    frame_from_image(&image)
}

/// Write a frame to disk as PNG, regardless of the path's extension.
pub fn save_frame<P: AsRef<Path>>(frame: &Frame, path: P) -> Result<()> {
    let path = path.as_ref();
    to_gray(frame)?.save_with_format(path, ImageFormat::Png)?;
    info!(
        "💾 Saved {}x{} frame to {}",
        frame.side(),
        frame.side(),
        path.display()
    );
    Ok(())
}

/// Read a frame from an image file on disk.
pub fn open_frame<P: AsRef<Path>>(path: P) -> Result<Frame> {
    let path = path.as_ref();
    let frame = frame_from_image(&image::open(path)?)?;
    info!(
        "📂 Loaded {}x{} frame from {}",
        frame.side(),
        frame.side(),
        path.display()
    );
    Ok(frame)
}
