//! Command-line argument definitions for the TreeSnap CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments select the focus files, the game and mod folders
//! their assets are read from, the output directory, configuration file and
//! logging verbosity.

use clap::Parser;

/// Command-line arguments for the TreeSnap focus tree renderer
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Focus tree files to render
    #[arg(required = true, help = "Paths to focus tree files")]
    pub inputs: Vec<String>,

    /// Game installation folder
    #[arg(short, long)]
    pub game: String,

    /// Mod folders, later ones override earlier ones
    #[arg(short = 'm', long = "mod")]
    pub mods: Vec<String>,

    /// Directory the SVG files are written to
    #[arg(short, long, default_value = ".")]
    pub output_dir: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
