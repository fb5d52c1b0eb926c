//! iconsprite - combine SVG icons into one themeable sprite.

mod cli;
mod config;
mod embed;
mod logger;
mod sprite;
mod svg;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands, build::build_sprite, serve};
use config::SpriteConfig;
use sprite::Sprite;
use std::sync::Arc;

fn main() -> Result<()> {
    // Setup global Ctrl+C handler (before any blocking operations)
    serve::setup_shutdown_handler()?;

    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.common().verbose);

    let config = SpriteConfig::load(&cli)?;
    let sprite = Sprite::new(config.palette.to_palette())?;
    debug!("config"; "palette roles: {}", sprite.palette().roles().join(", "));

    match &cli.command {
        Commands::Build { .. } => build_sprite(&config, &sprite),
        Commands::Serve { .. } => serve::serve(&config, Arc::new(sprite)),
    }
}
