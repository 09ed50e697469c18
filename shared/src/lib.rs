use serde::{Deserialize, Serialize};

mod board;
mod config;
mod drawable;
mod error;
mod history;
#[cfg(any(test, feature = "testing"))]
mod recorder;
mod surface;
mod svg;
mod tool;

pub use board::{Gesture, Whiteboard};
pub use config::{BoardConfig, BrushPreset};
pub use drawable::{Drawable, ImageId, ImageRef, Mark, MarkContent, MarkUpdate, Stroke};
pub use error::ConfigError;
pub use history::History;
#[cfg(any(test, feature = "testing"))]
pub use recorder::{Recorder, SurfaceOp};
pub use surface::{LineCap, Surface};
pub use svg::SvgSurface;
pub use tool::{Mode, ToolState};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns `None` for coordinates a canvas would silently drop.
    pub fn normalize(self) -> Option<Self> {
        if !self.x.is_finite() || !self.y.is_finite() {
            return None;
        }
        Some(self)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}
