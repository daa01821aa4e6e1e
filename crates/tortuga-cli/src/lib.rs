//! Tortuga CLI library
//!
//! This module contains the core CLI logic for the Tortuga scene renderer.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::fs;

use log::info;

use tortuga::{SceneBuilder, TortugaError};

/// Run the Tortuga CLI application
///
/// Reads the input TML file, parses and renders it, and writes the
/// resulting SVG to the output file.
///
/// # Errors
///
/// Returns `TortugaError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Parsing errors
/// - Rendering errors
pub fn run(args: &Args) -> Result<(), TortugaError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing scene"
    );

    // Load configuration
    let app_config = config::load_config(args.config.as_ref())?;

    // Read input file
    let source = fs::read_to_string(&args.input)?;

    // Process the scene using the SceneBuilder API
    let builder = SceneBuilder::new(app_config);
    let canvas = builder.parse(&source)?;
    let svg = builder.render_svg(&canvas)?;

    // Write output file
    fs::write(&args.output, svg)?;

    info!(output_file = args.output; "SVG exported successfully");

    Ok(())
}
