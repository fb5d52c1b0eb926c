//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::net::IpAddr;
use std::path::PathBuf;

/// Combine SVG icons into one themeable sprite
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: sprite.toml, optional)
    #[arg(short = 'C', long, default_value = "sprite.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Build a sprite and demo page from a directory of SVG files
    #[command(visible_alias = "b")]
    Build {
        /// Directory containing the source SVG files
        #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
        input: Option<PathBuf>,

        /// Directory receiving the sprite and demo page
        #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
        output: Option<PathBuf>,

        #[command(flatten)]
        common: CommonArgs,
    },

    /// Serve the upload page and sprite endpoint over HTTP
    #[command(visible_alias = "s")]
    Serve {
        /// Network interface to bind (e.g., 127.0.0.1, 0.0.0.0)
        #[arg(short, long)]
        interface: Option<IpAddr>,

        /// Port number to listen on
        #[arg(short, long)]
        port: Option<u16>,

        #[command(flatten)]
        common: CommonArgs,
    },
}

/// Arguments shared by all subcommands
#[derive(clap::Args, Debug, Clone, Default)]
pub struct CommonArgs {
    /// Enable verbose output for debugging
    #[arg(short = 'V', long)]
    pub verbose: bool,
}

impl Cli {
    pub const fn common(&self) -> &CommonArgs {
        match &self.command {
            Commands::Build { common, .. } | Commands::Serve { common, .. } => common,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_build() {
        let cli = Cli::parse_from(["iconsprite", "build", "-i", "svgs", "-V"]);
        assert!(cli.common().verbose);
        assert_eq!(cli.config, PathBuf::from("sprite.toml"));
        match cli.command {
            Commands::Build { input, output, .. } => {
                assert_eq!(input, Some(PathBuf::from("svgs")));
                assert_eq!(output, None);
            }
            Commands::Serve { .. } => unreachable!(),
        }
    }

    #[test]
    fn test_parse_serve() {
        let cli = Cli::parse_from([
            "iconsprite", "-C", "alt.toml", "serve", "-i", "0.0.0.0", "-p", "8080",
        ]);
        assert_eq!(cli.config, PathBuf::from("alt.toml"));
        match cli.command {
            Commands::Serve { interface, port, common } => {
                assert!(!common.verbose);
                assert_eq!(interface, Some("0.0.0.0".parse().unwrap()));
                assert_eq!(port, Some(8080));
            }
            Commands::Build { .. } => unreachable!(),
        }
    }

    #[test]
    fn test_invalid_port_rejected() {
        assert!(Cli::try_parse_from(["iconsprite", "serve", "-p", "70000"]).is_err());
    }
}
