//! Command-line arguments for the Tortuga CLI.

use clap::Parser;

/// Render Tortuga markup (TML) scenes to SVG.
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Args {
    /// Path to the input TML file
    pub input: String,

    /// Path to the output SVG file
    #[arg(short, long, default_value = "scene.svg")]
    pub output: String,

    /// Optional path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}
