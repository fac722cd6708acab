//! # Smuggle Binary Entry Point
//!
//! Thin command-line wrapper around [`Smuggler`] and the media adapters.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --bin smuggle -- encode --input secret.bin --output frame.png
//! cargo run --bin smuggle -- decode --input frame.png --output secret.bin
//! cargo run --bin smuggle -- --config config/smuggler.toml video --input secret.bin --output clip.mp4
//! cargo run --bin smuggle -- limits
//! ```

use anyhow::{Context, Result};
use base64::{engine::general_purpose, Engine as _};
use clap::{Parser, Subcommand};
use env_logger::Builder;
use log::{info, LevelFilter};
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use uuid::Uuid;

use pixel_smuggler::common::config::{load_config, SmugglerConfig};
use pixel_smuggler::media::{self, VideoEncoder};
use pixel_smuggler::Smuggler;

/// Command-line arguments for the smuggle binary
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the configuration file (TOML format); defaults apply if omitted
    ///
    /// Example: config/smuggler.toml
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log debug output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Hide a file inside a PNG frame
    Encode {
        #[arg(short, long)]
        input: PathBuf,

        /// Output PNG path (defaults to a random `<uuid>.png`)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Also print the PNG as a base64 data URI on stdout
        #[arg(long)]
        base64: bool,
    },
    /// Recover a file from a frame image
    Decode {
        #[arg(short, long)]
        input: PathBuf,

        #[arg(short, long)]
        output: PathBuf,
    },
    /// Hide a file inside a frame and wrap it as a video clip
    Video {
        #[arg(short, long)]
        input: PathBuf,

        #[arg(short, long)]
        output: PathBuf,
    },
    /// Print the frame limits of the active configuration
    Limits,
}

/// Initialize the logging system with timestamp, level, and message formatting.
///
/// Format: `[HH:MM:SS] [LEVEL] message`
fn init_logger(verbose: bool) {
    Builder::new()
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] [{}] {}",
                chrono::Local::now().format("%H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .filter_level(if verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        })
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_logger(args.verbose);

    let config: SmugglerConfig = match &args.config {
        Some(path) => load_config(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => SmugglerConfig::default(),
    };

    let smuggler = Smuggler::new(config.frame)?;

    match args.command {
        Command::Encode {
            input,
            output,
            base64,
        } => {
            let payload =
                fs::read(&input).with_context(|| format!("failed to read {}", input.display()))?;
            let frame = smuggler.conceal(&payload)?;

            let output = output.unwrap_or_else(|| PathBuf::from(format!("{}.png", Uuid::new_v4())));
            let png = media::frame_to_png(&frame)?;
            fs::write(&output, &png)?;

            info!(
                "📦 Hid {} bytes in a {}x{} frame: {}",
                payload.len(),
                frame.side(),
                frame.side(),
                output.display()
            );

            if base64 {
                println!(
                    "data:image/png;base64,{}",
                    general_purpose::STANDARD.encode(&png)
                );
            }
        }
        Command::Decode { input, output } => {
            let frame = media::open_frame(&input)?;
            let payload = smuggler.reveal(&frame)?;
            fs::write(&output, &payload)?;

            info!(
                "🔓 Recovered {} bytes into {}",
                payload.len(),
                output.display()
            );
        }
        Command::Video { input, output } => {
            let payload =
                fs::read(&input).with_context(|| format!("failed to read {}", input.display()))?;
            let frame = smuggler.conceal(&payload)?;

            let encoder = VideoEncoder::new(config.video);
            let report = encoder.encode_frame(&frame, &output).await?;

            info!(
                "🎞️  Wrote {} ({} encoder events)",
                report.output.display(),
                report.events.len()
            );
        }
        Command::Limits => {
            let limits = smuggler.limits();
            println!("min side:        {}", limits.min_side());
            println!("max side:        {}", limits.max_side());
            println!(
                "header:          v{} ({} bytes)",
                smuggler.header().version(),
                smuggler.header().header_len()
            );
            println!("max payload:     {} bytes", smuggler.max_payload_len());
        }
    }

    Ok(())
}
