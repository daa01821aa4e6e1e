//! Configuration types for Tortuga scene rendering.
//!
//! This module provides configuration structures that control how parsed
//! scenes are exported. All types implement [`serde::Deserialize`] for
//! flexible loading from external sources.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level application configuration combining export and style settings.
//! - [`ExportConfig`] - Controls the world-to-viewport mapping of the SVG backend.
//! - [`StyleConfig`] - Visual fallbacks such as a default background color.
//!
//! # Example
//!
//! ```
//! # use tortuga::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.export().scale(), 1.0);
//! ```

use serde::Deserialize;

/// Top-level application configuration combining export and style settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Export configuration section.
    #[serde(default)]
    export: ExportConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified export and style
    /// configurations.
    pub fn new(export: ExportConfig, style: StyleConfig) -> Self {
        Self { export, style }
    }

    /// Returns the export configuration.
    pub fn export(&self) -> &ExportConfig {
        &self.export
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }
}

/// World-to-viewport mapping for the SVG backend.
#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    /// Viewport pixels per world unit.
    #[serde(default = "default_scale")]
    scale: f64,

    /// Blank border around the mapped world region, in viewport pixels.
    #[serde(default = "default_margin")]
    margin: f64,
}

impl ExportConfig {
    /// Returns the viewport pixels per world unit.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Returns the viewport margin in pixels.
    pub fn margin(&self) -> f64 {
        self.margin
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            scale: default_scale(),
            margin: default_margin(),
        }
    }
}

fn default_scale() -> f64 {
    1.0
}

fn default_margin() -> f64 {
    10.0
}

/// Visual styling fallbacks for rendered scenes.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct StyleConfig {
    /// Background color applied when the document sets none.
    #[serde(default)]
    background_color: Option<String>,
}

impl StyleConfig {
    /// Returns the configured fallback background color, if any.
    pub fn background_color(&self) -> Option<&str> {
        self.background_color.as_deref()
    }
}
