use std::f64::consts::{PI, TAU};
use std::fmt::Write;

use crate::drawable::{ImageId, ImageRef};
use crate::surface::{LineCap, Surface};

type ImageHref<'a> = Box<dyn Fn(ImageId) -> Option<String> + 'a>;

/// Builds a standalone SVG document from the calls a board replays onto it.
pub struct SvgSurface<'a> {
    width: f64,
    height: f64,
    scale_x: f64,
    scale_y: f64,
    background: bool,
    image_href: ImageHref<'a>,
    elements: Vec<String>,
    path: String,
    path_has_segments: bool,
    line_width: f64,
    line_cap: LineCap,
    stroke_style: String,
    alpha: f64,
    font: String,
}

impl<'a> SvgSurface<'a> {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            scale_x: 1.0,
            scale_y: 1.0,
            background: false,
            image_href: Box::new(|_: ImageId| None::<String>),
            elements: Vec::new(),
            path: String::new(),
            path_has_segments: false,
            line_width: 1.0,
            line_cap: LineCap::Butt,
            stroke_style: "#000000".to_string(),
            alpha: 1.0,
            font: "10px sans-serif".to_string(),
        }
    }

    pub fn with_background(mut self, background: bool) -> Self {
        self.background = background;
        self
    }

    /// Resolves image handles to an `href` (usually a data URL). Images with
    /// no href are left out of the document.
    pub fn with_image_href(mut self, href: impl Fn(ImageId) -> Option<String> + 'a) -> Self {
        self.image_href = Box::new(href);
        self
    }

    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    pub fn finish(self) -> String {
        let mut out = String::new();
        let _ = write!(
            out,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{}\" height=\"{}\" viewBox=\"0 0 {} {}\">",
            self.width * self.scale_x,
            self.height * self.scale_y,
            self.width * self.scale_x,
            self.height * self.scale_y,
        );
        if self.background {
            out.push_str("<rect width=\"100%\" height=\"100%\" fill=\"#ffffff\" />");
        }
        let _ = write!(
            out,
            "<g transform=\"scale({} {})\">",
            self.scale_x, self.scale_y
        );
        for element in &self.elements {
            out.push_str(element);
        }
        out.push_str("</g></svg>");
        out
    }

    fn opacity_attr(&self) -> String {
        if self.alpha < 1.0 {
            format!(" opacity=\"{}\"", self.alpha)
        } else {
            String::new()
        }
    }
}

impl Surface for SvgSurface<'_> {
    fn clear_rect(&mut self, _width: f64, _height: f64) {
        self.elements.clear();
        self.path.clear();
        self.path_has_segments = false;
    }

    fn scale(&mut self, sx: f64, sy: f64) {
        self.scale_x *= sx;
        self.scale_y *= sy;
    }

    fn begin_path(&mut self) {
        self.path.clear();
        self.path_has_segments = false;
    }

    fn move_to(&mut self, x: f64, y: f64) {
        let _ = write!(self.path, "M {x} {y} ");
    }

    fn line_to(&mut self, x: f64, y: f64) {
        let _ = write!(self.path, "L {x} {y} ");
        self.path_has_segments = true;
    }

    fn arc(&mut self, x: f64, y: f64, radius: f64, start_angle: f64, end_angle: f64) {
        let point_at = |angle: f64| (x + radius * angle.cos(), y + radius * angle.sin());
        let sweep = end_angle - start_angle;
        let (sx, sy) = point_at(start_angle);
        let _ = write!(self.path, "M {sx} {sy} ");
        if sweep.abs() >= TAU {
            let (mx, my) = point_at(start_angle + PI);
            let _ = write!(
                self.path,
                "A {radius} {radius} 0 1 1 {mx} {my} A {radius} {radius} 0 1 1 {sx} {sy} "
            );
        } else {
            let (ex, ey) = point_at(end_angle);
            let large = u8::from(sweep.abs() > PI);
            let positive = u8::from(sweep > 0.0);
            let _ = write!(
                self.path,
                "A {radius} {radius} 0 {large} {positive} {ex} {ey} "
            );
        }
        self.path_has_segments = true;
    }

    fn stroke(&mut self) {
        if !self.path_has_segments {
            return;
        }
        let element = format!(
            "<path d=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{}\" stroke-linecap=\"{}\" stroke-linejoin=\"round\"{} />",
            self.path.trim_end(),
            escape(&self.stroke_style),
            self.line_width,
            self.line_cap.as_str(),
            self.opacity_attr(),
        );
        self.elements.push(element);
    }

    fn set_line_width(&mut self, width: f64) {
        self.line_width = width;
    }

    fn set_line_cap(&mut self, cap: LineCap) {
        self.line_cap = cap;
    }

    fn set_stroke_style(&mut self, style: &str) {
        self.stroke_style = style.to_string();
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        self.alpha = alpha;
    }

    fn set_font(&mut self, font: &str) {
        self.font = font.to_string();
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        let element = format!(
            "<text x=\"{x}\" y=\"{y}\" style=\"font: {}\" fill=\"#000000\"{}>{}</text>",
            escape(&self.font),
            self.opacity_attr(),
            escape(text),
        );
        self.elements.push(element);
    }

    fn draw_image(&mut self, image: &ImageRef, x: f64, y: f64, width: f64, height: f64) {
        let Some(href) = (self.image_href)(image.id) else {
            return;
        };
        let element = format!(
            "<image href=\"{}\" x=\"{x}\" y=\"{y}\" width=\"{width}\" height=\"{height}\"{} />",
            escape(&href),
            self.opacity_attr(),
        );
        self.elements.push(element);
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}
