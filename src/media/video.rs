//! # External Video Encoding
//!
//! Wraps a still frame into a short video clip by running an external
//! `ffmpeg`-compatible executable.
//!
//! ## Design
//!
//! - The executable path and every format parameter live in [`VideoConfig`],
//!   handed to [`VideoEncoder::new`]; there is no process-wide handle.
//! - Encoder diagnostics are not printed. Each stderr line becomes an
//!   [`EncoderEvent`] returned to the caller, in [`VideoReport::events`] on
//!   success or inside [`SmuggleError::Video`] on failure.
//! - Settings favour bit-exact stills: near-lossless CRF, the `stillimage`
//!   tune, and an explicit output size equal to the frame side.
//!
//! ```text
//! Frame -> temp PNG -> ffmpeg -loop 1 ... -> output.mp4
//! ```

use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::{Duration, Instant};
use tokio::process::Command;
use uuid::Uuid;

use crate::error::{Result, SmuggleError};
use crate::media::image::save_frame;
use crate::processing::raster::Frame;

/// How the external encoder is invoked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoConfig {
    /// Path to the encoder executable (looked up on `PATH` if bare)
    pub ffmpeg_path: String,
    /// Output frame rate
    pub fps: u32,
    /// Constant rate factor; lower is closer to lossless
    pub crf: u32,
    /// Number of video frames written
    pub frames: u32,
    pub codec: String,
    pub preset: String,
    pub profile: String,
    pub pixel_format: String,
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            ffmpeg_path: "ffmpeg".to_string(),
            fps: 30,
            crf: 1,
            frames: 4,
            codec: "libx264".to_string(),
            preset: "veryslow".to_string(),
            profile: "high".to_string(),
            pixel_format: "yuv420p".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventLevel {
    Info,
    Warning,
    Error,
}

/// One diagnostic line emitted by the external encoder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncoderEvent {
    pub level: EventLevel,
    pub message: String,
}

impl EncoderEvent {
    /// Classifies a raw stderr line by the keywords ffmpeg uses.
    pub fn from_line(line: &str) -> Self {
        let lower = line.to_ascii_lowercase();
        let level = if lower.contains("error") || lower.contains("invalid") {
            EventLevel::Error
        } else if lower.contains("warning") || lower.contains("deprecated") {
            EventLevel::Warning
        } else {
            EventLevel::Info
        };

        Self {
            level,
            message: line.trim().to_string(),
        }
    }
}

/// Outcome of a successful encoder run.
#[derive(Debug, Clone)]
pub struct VideoReport {
    pub output: PathBuf,
    pub events: Vec<EncoderEvent>,
    pub elapsed: Duration,
}

pub struct VideoEncoder {
    config: VideoConfig,
}

impl VideoEncoder {
    pub fn new(config: VideoConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &VideoConfig {
        &self.config
    }

    /// Arguments passed to the executable for a `side`x`side` still.
    pub fn command_args(&self, input: &Path, output: &Path, side: usize) -> Vec<String> {
        let size = format!("{}x{}", side, side);
        vec![
            "-y".to_string(),
            "-loop".to_string(),
            "1".to_string(),
            "-i".to_string(),
            input.display().to_string(),
            "-c:v".to_string(),
            self.config.codec.clone(),
            "-preset".to_string(),
            self.config.preset.clone(),
            "-profile:v".to_string(),
            self.config.profile.clone(),
            "-tune".to_string(),
            "stillimage".to_string(),
            "-crf".to_string(),
            self.config.crf.to_string(),
            "-pix_fmt".to_string(),
            self.config.pixel_format.clone(),
            "-r".to_string(),
            self.config.fps.to_string(),
            "-frames:v".to_string(),
            self.config.frames.to_string(),
            "-s".to_string(),
            size,
            "-movflags".to_string(),
            "+faststart".to_string(),
            output.display().to_string(),
        ]
    }

    /// Runs the encoder on an image already on disk.
    ///
    /// # Errors
    /// - [`SmuggleError::Io`] if the executable cannot be started
    /// - [`SmuggleError::Video`] if it exits unsuccessfully
    pub async fn encode(&self, input: &Path, output: &Path, side: usize) -> Result<VideoReport> {
        if side % 2 == 1 && self.config.pixel_format == "yuv420p" {
            warn!(
                "⚠️  Frame side {} is odd; {} needs even dimensions",
                side, self.config.pixel_format
            );
        }

        let args = self.command_args(input, output, side);
        info!("🎬 Running {} {}", self.config.ffmpeg_path, args.join(" "));

        let started = Instant::now();
        let result = Command::new(&self.config.ffmpeg_path)
            .args(&args)
            .stdin(Stdio::null())
            .output()
            .await?;

        let events: Vec<EncoderEvent> = String::from_utf8_lossy(&result.stderr)
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(EncoderEvent::from_line)
            .collect();

        for event in events.iter().filter(|e| e.level == EventLevel::Error) {
            warn!("⚠️  Encoder reported: {}", event.message);
        }

        if !result.status.success() {
            warn!("❌ Encoder exited with {}", result.status);
            return Err(SmuggleError::Video {
                status: result.status.to_string(),
                events,
            });
        }

        let elapsed = started.elapsed();
        info!(
            "✅ Encoded {} in {:.2}s",
            output.display(),
            elapsed.as_secs_f64()
        );

        Ok(VideoReport {
            output: output.to_path_buf(),
            events,
            elapsed,
        })
    }

    /// Writes `frame` to a temporary PNG, encodes it, and removes the PNG.
    pub async fn encode_frame(&self, frame: &Frame, output: &Path) -> Result<VideoReport> {
        let still = std::env::temp_dir().join(format!("{}.png", Uuid::new_v4()));
        save_frame(frame, &still)?;

        let result = self.encode(&still, output, frame.side()).await;

        if let Err(e) = tokio::fs::remove_file(&still).await {
            warn!("⚠️  Could not remove {}: {}", still.display(), e);
        }
        if result.is_err() && output.exists() {
            let _ = tokio::fs::remove_file(output).await;
        }

        result
    }
}
