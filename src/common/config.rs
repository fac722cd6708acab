//! # Configuration
//!
//! TOML configuration for the framing core and the external video encoder.
//! Every field has a default, so an empty file (or no file at all) yields the
//! standard setup: 64..4096 sample frames with checksummed headers.
//!
//! ```toml
//! [frame]
//! min_side = 64
//! max_side = 4096
//! header = "checksummed"   # or "length"
//!
//! [video]
//! ffmpeg_path = "/usr/bin/ffmpeg"
//! fps = 30
//! ```

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::media::video::VideoConfig;
use crate::processing::framer::HeaderVariant;
use crate::processing::sizing::{FrameLimits, DEFAULT_MAX_SIDE, DEFAULT_MIN_SIDE};

/// Load a TOML configuration file and deserialize it into the specified type.
///
/// # Example
/// ```ignore
/// let config: SmugglerConfig = load_config("config/smuggler.toml")?;
/// ```
pub fn load_config<T, P>(path: P) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
    P: AsRef<Path>,
{
    let content = fs::read_to_string(path)?;
    let config: T = toml::from_str(&content)?;
    Ok(config)
}

/// Top-level configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmugglerConfig {
    pub frame: FrameConfig,
    pub video: VideoConfig,
}

/// Frame budget and header layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameConfig {
    /// Smallest frame side produced; `0` lets frames shrink to the bit count
    pub min_side: usize,
    /// Largest frame side accepted
    pub max_side: usize,
    /// Header layout shared by encoder and decoder
    pub header: HeaderVariant,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            min_side: DEFAULT_MIN_SIDE,
            max_side: DEFAULT_MAX_SIDE,
            header: HeaderVariant::default(),
        }
    }
}

impl FrameConfig {
    /// Validated limits for this configuration.
    pub fn limits(&self) -> crate::error::Result<FrameLimits> {
        FrameLimits::new(self.min_side, self.max_side)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: SmugglerConfig = toml::from_str("").unwrap();
        assert_eq!(config, SmugglerConfig::default());
        assert_eq!(config.frame.min_side, 64);
        assert_eq!(config.frame.max_side, 4096);
        assert_eq!(config.frame.header, HeaderVariant::Checksummed);
        assert_eq!(config.video.ffmpeg_path, "ffmpeg");
    }

    #[test]
    fn test_partial_sections() {
        let config: SmugglerConfig = toml::from_str(
            r#"
            [frame]
            min_side = 0
            header = "length"

            [video]
            ffmpeg_path = "/opt/ffmpeg/bin/ffmpeg"
            fps = 24
            "#,
        )
        .unwrap();

        assert_eq!(config.frame.min_side, 0);
        assert_eq!(config.frame.max_side, 4096);
        assert_eq!(config.frame.header, HeaderVariant::LengthOnly);
        assert_eq!(config.video.ffmpeg_path, "/opt/ffmpeg/bin/ffmpeg");
        assert_eq!(config.video.fps, 24);
        assert_eq!(config.video.crf, 1);
    }

    #[test]
    fn test_invalid_limits_surface_on_use() {
        let config = FrameConfig {
            min_side: 512,
            max_side: 256,
            header: HeaderVariant::LengthOnly,
        };
        assert!(config.limits().is_err());
    }

    #[test]
    fn test_load_config_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("smuggler.toml");
        fs::write(&path, "[frame]\nmax_side = 128\n").unwrap();

        let config: SmugglerConfig = load_config(&path).unwrap();
        assert_eq!(config.frame.max_side, 128);
        assert!(load_config::<SmugglerConfig, _>(dir.path().join("missing.toml")).is_err());
    }
}
