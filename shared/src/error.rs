use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid board config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("canvas size must be positive, got {width}x{height}")]
    CanvasSize { width: f64, height: f64 },
    #[error("brush `{label}` has non-positive width {width}")]
    BrushWidth { label: String, width: f64 },
    #[error("{name} must be positive, got {value}")]
    Scale { name: &'static str, value: f64 },
    #[error("preview opacity must be within 0..=1, got {0}")]
    Opacity(f64),
}
