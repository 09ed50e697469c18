use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::surface::LineCap;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct BrushPreset {
    pub label: String,
    pub width: f64,
}

/// Board layout, tool presets and ink settings. Every field has a default,
/// so a partial JSON document is enough to override a few of them.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct BoardConfig {
    pub width: f64,
    pub height: f64,
    pub brushes: Vec<BrushPreset>,
    pub stickers: Vec<String>,
    pub initial_brush: f64,
    pub sticker_font: String,
    pub image_scale: f64,
    pub preview_opacity: f64,
    pub ring_line_width: f64,
    pub ink: String,
    pub line_cap: LineCap,
    pub export_scale: f64,
    pub export_name: String,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            width: 1024.0,
            height: 512.0,
            brushes: vec![
                BrushPreset {
                    label: "THIN MARKER [5PX]".to_string(),
                    width: 5.0,
                },
                BrushPreset {
                    label: "THICK MARKER [10PX]".to_string(),
                    width: 10.0,
                },
            ],
            stickers: ["😀", "⭐", "🍀"].map(String::from).to_vec(),
            initial_brush: 5.0,
            sticker_font: "30px sans-serif".to_string(),
            image_scale: 0.15,
            preview_opacity: 0.5,
            ring_line_width: 2.0,
            ink: "black".to_string(),
            line_cap: LineCap::Square,
            export_scale: 2.0,
            export_name: "whiteboard".to_string(),
        }
    }
}

impl BoardConfig {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(ConfigError::CanvasSize {
                width: self.width,
                height: self.height,
            });
        }
        for brush in &self.brushes {
            if !(brush.width > 0.0) {
                return Err(ConfigError::BrushWidth {
                    label: brush.label.clone(),
                    width: brush.width,
                });
            }
        }
        if !(self.initial_brush > 0.0) {
            return Err(ConfigError::BrushWidth {
                label: "initial".to_string(),
                width: self.initial_brush,
            });
        }
        for (name, value) in [
            ("image_scale", self.image_scale),
            ("export_scale", self.export_scale),
            ("ring_line_width", self.ring_line_width),
        ] {
            if !(value > 0.0) {
                return Err(ConfigError::Scale { name, value });
            }
        }
        if !(0.0..=1.0).contains(&self.preview_opacity) {
            return Err(ConfigError::Opacity(self.preview_opacity));
        }
        Ok(())
    }
}
