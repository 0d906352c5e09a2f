//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Ecosse surface synthesis command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug)]
#[command(name = "ecosse", about = "Ecosse planet surface synthesis")]
pub struct CliArgs {
    /// Noise seed.
    #[arg(long)]
    pub seed: Option<f64>,

    /// Texture width in texels.
    #[arg(long)]
    pub width: Option<u32>,

    /// Texture height in texels.
    #[arg(long)]
    pub height: Option<u32>,

    /// Synthesize only this classification (default: all five).
    #[arg(long)]
    pub class: Option<String>,

    /// Directory PNG files are written to.
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(seed) = args.seed {
            self.noise.seed = seed;
        }
        if let Some(w) = args.width {
            self.surface.width = w;
        }
        if let Some(h) = args.height {
            self.surface.height = h;
        }
        if let Some(ref dir) = args.output_dir {
            self.export.output_dir = dir.clone();
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
