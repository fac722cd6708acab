//! # Smuggler Façade
//!
//! Pairs a [`Framer`] and a [`RasterCodec`] configured from the same
//! [`FrameConfig`], so callers go from bytes (or typed values) to a frame and
//! back in one call.
//!
//! ## Usage
//!
//! ```rust
//! use pixel_smuggler::Smuggler;
//!
//! let smuggler = Smuggler::default();
//! let frame = smuggler.conceal(b"contraband")?;
//! assert_eq!(smuggler.reveal(&frame)?, b"contraband");
//! # Ok::<(), pixel_smuggler::SmuggleError>(())
//! ```

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::common::config::FrameConfig;
use crate::common::serializer::{JsonSerializer, PayloadSerializer};
use crate::error::Result;
use crate::processing::framer::{Framer, HeaderVariant};
use crate::processing::raster::{Frame, RasterCodec};
use crate::processing::sizing::FrameLimits;

/// Stateless; every call allocates its own buffers, so one instance can be
/// shared freely between threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct Smuggler {
    framer: Framer,
    codec: RasterCodec,
}

impl Smuggler {
    /// Builds a smuggler from configuration, validating the frame limits.
    pub fn new(config: FrameConfig) -> Result<Self> {
        let limits = config.limits()?;
        Ok(Self {
            framer: Framer::new(config.header, limits),
            codec: RasterCodec::new(limits),
        })
    }

    pub fn limits(&self) -> FrameLimits {
        self.framer.limits()
    }

    pub fn header(&self) -> HeaderVariant {
        self.framer.variant()
    }

    /// Largest payload in bytes that [`Self::conceal`] accepts.
    pub fn max_payload_len(&self) -> usize {
        self.framer.max_payload_len()
    }

    /// Frames `payload` and rasterizes it.
    pub fn conceal(&self, payload: &[u8]) -> Result<Frame> {
        let framed = self.framer.build(payload)?;
        self.codec.encode(&framed)
    }

    /// Reads a frame back into the original payload.
    pub fn reveal(&self, frame: &Frame) -> Result<Vec<u8>> {
        let candidate = self.codec.decode(frame);
        self.framer.parse(&candidate)
    }

    /// Serializes `value` as JSON and conceals it.
    pub fn conceal_value<T: Serialize>(&self, value: &T) -> Result<Frame> {
        self.conceal_with(&JsonSerializer, value)
    }

    pub fn reveal_value<T: DeserializeOwned>(&self, frame: &Frame) -> Result<T> {
        self.reveal_with(&JsonSerializer, frame)
    }

    pub fn conceal_with<P, T>(&self, serializer: &P, value: &T) -> Result<Frame>
    where
        P: PayloadSerializer,
        T: Serialize,
    {
        let payload = serializer.to_bytes(value)?;
        self.conceal(&payload)
    }

    pub fn reveal_with<P, T>(&self, serializer: &P, frame: &Frame) -> Result<T>
    where
        P: PayloadSerializer,
        T: DeserializeOwned,
    {
        let payload = self.reveal(frame)?;
        serializer.from_bytes(&payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SmuggleError;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct WeatherForecast {
        date: String,
        temperature_c: i32,
        summary: Option<String>,
    }

    #[test]
    fn test_conceal_reveal_bytes() {
        let smuggler = Smuggler::default();
        let frame = smuggler.conceal(b"hello frame").unwrap();
        assert_eq!(frame.side(), 64);
        assert_eq!(smuggler.reveal(&frame).unwrap(), b"hello frame");
    }

    #[test]
    fn test_conceal_reveal_value() {
        let smuggler = Smuggler::default();
        let forecast = WeatherForecast {
            date: "2024-01-01".to_string(),
            temperature_c: 21,
            summary: Some("Balmy".to_string()),
        };

        let frame = smuggler.conceal_value(&forecast).unwrap();
        let back: WeatherForecast = smuggler.reveal_value(&frame).unwrap();
        assert_eq!(back, forecast);
    }

    #[test]
    fn test_mismatched_header_variant_fails() {
        let writer = Smuggler::new(FrameConfig {
            header: HeaderVariant::LengthOnly,
            ..FrameConfig::default()
        })
        .unwrap();
        let reader = Smuggler::default();

        let frame = writer.conceal(b"some bytes to hide").unwrap();
        assert!(reader.reveal(&frame).is_err());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let result = Smuggler::new(FrameConfig {
            min_side: 10,
            max_side: 5,
            ..FrameConfig::default()
        });
        assert!(matches!(result, Err(SmuggleError::InvalidConfig(_))));
    }
}
