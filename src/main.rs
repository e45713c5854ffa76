use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use sketchpad::{Config, replay};
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "sketchpad")]
#[command(
    version,
    long_version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("SKETCHPAD_GIT_HASH"), ")"),
    about = "Replay a sketch gesture script and export the canvas as PNG"
)]
struct Cli {
    /// Gesture script to replay (TOML)
    #[arg(value_name = "SCRIPT")]
    script: PathBuf,

    /// Where to write the PNG (defaults to sketch.png unless --data-url is given)
    #[arg(long, short = 'o', value_name = "FILE")]
    output: Option<PathBuf>,

    /// Config file to use instead of ~/.config/sketchpad/config.toml
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Export even when nothing was drawn
    #[arg(long, action = ArgAction::SetTrue)]
    force: bool,

    /// Print the export as a base64 data URL
    #[arg(long, action = ArgAction::SetTrue)]
    data_url: bool,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let script = replay::Script::load(&cli.script)?;
    let (mut surface, result) = replay::run(&script, &config)?;

    for (message, level) in &result.statuses {
        println!("[{level}] {message}");
    }
    if result.resize_failures > 0 {
        log::warn!(
            "Canvas container never settled {} time(s)",
            result.resize_failures
        );
    }

    let image = match result.export {
        Some(image) => image,
        None if cli.force => surface
            .send_sketch()
            .context("Failed to encode blank canvas")?,
        None => {
            println!("Canvas is blank, nothing exported (use --force to export anyway)");
            return Ok(());
        }
    };

    if cli.data_url {
        println!("{}", image.to_data_url());
    }

    let output = match cli.output {
        Some(path) => Some(path),
        None if !cli.data_url => Some(PathBuf::from("sketch.png")),
        None => None,
    };
    if let Some(path) = output {
        fs::write(&path, &image.bytes)
            .with_context(|| format!("Failed to write sketch to {}", path.display()))?;
        println!(
            "Wrote {}x{} sketch to {}",
            image.width,
            image.height,
            path.display()
        );
    }

    Ok(())
}
