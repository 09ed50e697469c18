use serde::Serialize;

use crate::drawable::{ImageId, ImageRef};
use crate::surface::{LineCap, Surface};

/// One primitive call issued against a [`Surface`].
#[derive(Serialize, Clone, Debug, PartialEq)]
pub enum SurfaceOp {
    ClearRect(f64, f64),
    Scale(f64, f64),
    BeginPath,
    MoveTo(f64, f64),
    LineTo(f64, f64),
    Arc(f64, f64, f64, f64, f64),
    Stroke,
    SetLineWidth(f64),
    SetLineCap(LineCap),
    SetStrokeStyle(String),
    SetGlobalAlpha(f64),
    SetFont(String),
    FillText(String, f64, f64),
    DrawImage(ImageId, f64, f64, f64, f64),
}

/// A surface that keeps the calls made to it instead of drawing.
#[derive(Default, Debug)]
pub struct Recorder {
    ops: Vec<SurfaceOp>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ops(&self) -> &[SurfaceOp] {
        &self.ops
    }

    pub fn into_ops(self) -> Vec<SurfaceOp> {
        self.ops
    }

    /// Ops issued after the most recent `clear_rect`, i.e. the last frame.
    pub fn last_frame(&self) -> &[SurfaceOp] {
        let start = self
            .ops
            .iter()
            .rposition(|op| matches!(op, SurfaceOp::ClearRect(..)))
            .unwrap_or(0);
        &self.ops[start..]
    }

    pub fn reset(&mut self) {
        self.ops.clear();
    }
}

impl Surface for Recorder {
    fn clear_rect(&mut self, width: f64, height: f64) {
        self.ops.push(SurfaceOp::ClearRect(width, height));
    }

    fn scale(&mut self, sx: f64, sy: f64) {
        self.ops.push(SurfaceOp::Scale(sx, sy));
    }

    fn begin_path(&mut self) {
        self.ops.push(SurfaceOp::BeginPath);
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.ops.push(SurfaceOp::MoveTo(x, y));
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.ops.push(SurfaceOp::LineTo(x, y));
    }

    fn arc(&mut self, x: f64, y: f64, radius: f64, start_angle: f64, end_angle: f64) {
        self.ops
            .push(SurfaceOp::Arc(x, y, radius, start_angle, end_angle));
    }

    fn stroke(&mut self) {
        self.ops.push(SurfaceOp::Stroke);
    }

    fn set_line_width(&mut self, width: f64) {
        self.ops.push(SurfaceOp::SetLineWidth(width));
    }

    fn set_line_cap(&mut self, cap: LineCap) {
        self.ops.push(SurfaceOp::SetLineCap(cap));
    }

    fn set_stroke_style(&mut self, style: &str) {
        self.ops.push(SurfaceOp::SetStrokeStyle(style.to_string()));
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        self.ops.push(SurfaceOp::SetGlobalAlpha(alpha));
    }

    fn set_font(&mut self, font: &str) {
        self.ops.push(SurfaceOp::SetFont(font.to_string()));
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        self.ops.push(SurfaceOp::FillText(text.to_string(), x, y));
    }

    fn draw_image(&mut self, image: &ImageRef, x: f64, y: f64, width: f64, height: f64) {
        self.ops
            .push(SurfaceOp::DrawImage(image.id, x, y, width, height));
    }
}
