use std::path::{Path, PathBuf};

use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::error::{SketchError, SketchResult};

/// Environment variable naming an optional JSON config file
pub const CONFIG_ENV_VAR: &str = "DECODOODLE_CONFIG";

/// Stickers available before the user adds any of their own
pub const BUILTIN_STICKERS: [&str; 3] = ["👻", "🐈‍⬛", "🌕"];

/// Startup settings for the sketchpad.
///
/// Every field has a default, so a config file only needs to name the
/// values it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SketchConfig {
    /// Width and height of the square working canvas, in pixels
    pub canvas_size: u32,
    /// Width and height of the exported PNG, in pixels
    pub export_size: u32,
    /// Marker thickness when the app starts
    pub default_thickness: u32,
    /// Sticker font size per unit of thickness
    pub glyph_scale: f32,
    /// RGBA color the canvas is cleared to
    pub background: [u8; 4],
    /// Where the exported PNG is written
    pub export_path: PathBuf,
    /// Initial sticker catalog
    pub stickers: Vec<String>,
}

impl Default for SketchConfig {
    fn default() -> Self {
        Self {
            canvas_size: 256,
            export_size: 1024,
            default_thickness: 3,
            glyph_scale: 10.0,
            background: [255, 255, 255, 255],
            export_path: PathBuf::from("drawing.png"),
            stickers: BUILTIN_STICKERS.iter().map(|s| (*s).to_owned()).collect(),
        }
    }
}

impl SketchConfig {
    /// Load a config from a JSON file
    pub fn load(path: &Path) -> SketchResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| SketchError::Io {
            path: path.to_owned(),
            source,
        })?;
        Self::from_json(&text).map_err(|source| SketchError::Config {
            path: path.to_owned(),
            source,
        })
    }

    /// Parse and sanitize a config from JSON text
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        let config: Self = serde_json::from_str(text)?;
        Ok(config.sanitized())
    }

    /// Load the config named by `DECODOODLE_CONFIG`, falling back to defaults.
    ///
    /// A broken config file is not fatal: the error is logged and the
    /// defaults are used instead.
    pub fn from_env() -> Self {
        let Some(path) = std::env::var_os(CONFIG_ENV_VAR) else {
            return Self::default();
        };
        let path = PathBuf::from(path);
        match Self::load(&path) {
            Ok(config) => {
                log::info!("Loaded config from {}", path.display());
                config
            }
            Err(err) => {
                log::warn!("{err}; using default config");
                Self::default()
            }
        }
    }

    /// Clamp values that would make the canvas unusable
    pub fn sanitized(mut self) -> Self {
        self.canvas_size = self.canvas_size.max(1);
        self.export_size = self.export_size.max(1);
        self.default_thickness = self.default_thickness.max(1);
        if !(self.glyph_scale.is_finite() && self.glyph_scale > 0.0) {
            self.glyph_scale = Self::default().glyph_scale;
        }
        self
    }

    pub fn background_color(&self) -> Color32 {
        let [r, g, b, a] = self.background;
        Color32::from_rgba_unmultiplied(r, g, b, a)
    }
}
