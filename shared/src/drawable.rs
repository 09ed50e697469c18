use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

use crate::config::BoardConfig;
use crate::surface::Surface;
use crate::Point;

/// Host-assigned handle for an imported bitmap.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ImageId(pub u32);

/// An imported bitmap as the board sees it: the handle plus its natural size.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct ImageRef {
    pub id: ImageId,
    pub width: f64,
    pub height: f64,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub enum MarkContent {
    Glyph(String),
    Image(ImageRef),
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Stroke {
    points: Vec<Point>,
    width: f64,
}

impl Stroke {
    pub fn begin(point: Point, width: f64) -> Self {
        Self {
            points: vec![point],
            width,
        }
    }

    pub fn extend(&mut self, point: Point) {
        self.points.push(point);
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn render(&self, surface: &mut dyn Surface) {
        let Some((first, rest)) = self.points.split_first() else {
            return;
        };
        surface.begin_path();
        surface.set_line_width(self.width);
        surface.move_to(first.x, first.y);
        for point in rest {
            surface.line_to(point.x, point.y);
        }
        surface.stroke();
    }
}

/// Fields to merge into a [`Mark`]. `None` leaves the current value alone.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MarkUpdate {
    pub content: Option<Option<MarkContent>>,
    pub opacity: Option<f64>,
    pub diameter: Option<Option<f64>>,
}

impl MarkUpdate {
    pub fn content(mut self, content: Option<MarkContent>) -> Self {
        self.content = Some(content);
        self
    }

    pub fn opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }

    pub fn diameter(mut self, diameter: Option<f64>) -> Self {
        self.diameter = Some(diameter);
        self
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Mark {
    position: Point,
    content: Option<MarkContent>,
    opacity: f64,
    diameter: Option<f64>,
}

impl Mark {
    pub fn place(position: Point, content: Option<MarkContent>) -> Self {
        Self {
            position,
            content,
            opacity: 1.0,
            diameter: None,
        }
    }

    /// A content-less mark that draws a ring the size of the brush.
    pub fn ring(position: Point, diameter: f64) -> Self {
        Self {
            position,
            content: None,
            opacity: 1.0,
            diameter: Some(diameter),
        }
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn reposition(&mut self, position: Point) {
        self.position = position;
    }

    pub fn update(&mut self, update: MarkUpdate) {
        let MarkUpdate {
            content,
            opacity,
            diameter,
        } = update;
        if let Some(content) = content {
            self.content = content;
        }
        if let Some(opacity) = opacity {
            self.opacity = opacity;
        }
        if let Some(diameter) = diameter {
            self.diameter = diameter;
        }
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn content(&self) -> Option<&MarkContent> {
        self.content.as_ref()
    }

    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    pub fn diameter(&self) -> Option<f64> {
        self.diameter
    }

    pub fn render(&self, surface: &mut dyn Surface, config: &BoardConfig) {
        let Point { x, y } = self.position;
        surface.set_global_alpha(self.opacity);
        if let Some(diameter) = self.diameter {
            surface.begin_path();
            surface.arc(x, y, diameter / 2.0, 0.0, TAU);
            surface.set_stroke_style(&config.ink);
            surface.set_line_width(config.ring_line_width);
            surface.stroke();
        }
        match &self.content {
            Some(MarkContent::Glyph(text)) if !text.is_empty() => {
                surface.set_font(&config.sticker_font);
                surface.fill_text(text, x, y);
            }
            Some(MarkContent::Image(image)) => {
                let width = image.width * config.image_scale;
                let height = image.height * config.image_scale;
                surface.draw_image(image, x - width / 2.0, y - height / 2.0, width, height);
            }
            Some(MarkContent::Glyph(_)) | None => {}
        }
        surface.set_global_alpha(1.0);
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub enum Drawable {
    Stroke(Stroke),
    Mark(Mark),
}

impl Drawable {
    pub fn render(&self, surface: &mut dyn Surface, config: &BoardConfig) {
        match self {
            Drawable::Stroke(stroke) => stroke.render(surface),
            Drawable::Mark(mark) => mark.render(surface, config),
        }
    }

    pub fn as_stroke(&self) -> Option<&Stroke> {
        match self {
            Drawable::Stroke(stroke) => Some(stroke),
            Drawable::Mark(_) => None,
        }
    }

    pub fn as_mark(&self) -> Option<&Mark> {
        match self {
            Drawable::Mark(mark) => Some(mark),
            Drawable::Stroke(_) => None,
        }
    }
}

impl From<Stroke> for Drawable {
    fn from(stroke: Stroke) -> Self {
        Drawable::Stroke(stroke)
    }
}

impl From<Mark> for Drawable {
    fn from(mark: Mark) -> Self {
        Drawable::Mark(mark)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recorder::{Recorder, SurfaceOp};

    fn render(drawable: &Drawable) -> Vec<SurfaceOp> {
        let mut recorder = Recorder::new();
        drawable.render(&mut recorder, &BoardConfig::default());
        recorder.into_ops()
    }

    #[test]
    fn test_stroke_polyline() {
        let mut stroke = Stroke::begin(Point::new(0.0, 0.0), 5.0);
        stroke.extend(Point::new(10.0, 0.0));
        stroke.extend(Point::new(10.0, 10.0));

        assert_eq!(
            render(&stroke.into()),
            vec![
                SurfaceOp::BeginPath,
                SurfaceOp::SetLineWidth(5.0),
                SurfaceOp::MoveTo(0.0, 0.0),
                SurfaceOp::LineTo(10.0, 0.0),
                SurfaceOp::LineTo(10.0, 10.0),
                SurfaceOp::Stroke,
            ]
        );
    }

    #[test]
    fn test_single_point_stroke_has_no_segment() {
        let ops = render(&Stroke::begin(Point::new(3.0, 4.0), 10.0).into());
        assert!(!ops.iter().any(|op| matches!(op, SurfaceOp::LineTo(..))));
    }

    #[test]
    fn test_glyph_mark_full_opacity() {
        let mark = Mark::place(
            Point::new(50.0, 50.0),
            Some(MarkContent::Glyph("★".to_string())),
        );
        assert_eq!(
            render(&mark.into()),
            vec![
                SurfaceOp::SetGlobalAlpha(1.0),
                SurfaceOp::SetFont("30px sans-serif".to_string()),
                SurfaceOp::FillText("★".to_string(), 50.0, 50.0),
                SurfaceOp::SetGlobalAlpha(1.0),
            ]
        );
    }

    #[test]
    fn test_preview_opacity_is_restored() {
        let mark = Mark::place(
            Point::new(50.0, 50.0),
            Some(MarkContent::Glyph("★".to_string())),
        )
        .with_opacity(0.5);
        let ops = render(&mark.into());
        assert_eq!(ops.first(), Some(&SurfaceOp::SetGlobalAlpha(0.5)));
        assert_eq!(ops.last(), Some(&SurfaceOp::SetGlobalAlpha(1.0)));
    }

    #[test]
    fn test_ring_uses_half_diameter() {
        let ops = render(&Mark::ring(Point::new(20.0, 30.0), 10.0).into());
        assert!(ops.contains(&SurfaceOp::Arc(20.0, 30.0, 5.0, 0.0, TAU)));
        assert!(ops.contains(&SurfaceOp::SetLineWidth(2.0)));
    }

    #[test]
    fn test_image_is_scaled_and_centered() {
        let image = ImageRef {
            id: ImageId(7),
            width: 200.0,
            height: 100.0,
        };
        let ops = render(&Mark::place(Point::new(100.0, 100.0), Some(MarkContent::Image(image))).into());
        assert!(ops.contains(&SurfaceOp::DrawImage(ImageId(7), 85.0, 92.5, 30.0, 15.0)));
    }

    #[test]
    fn test_empty_glyph_draws_nothing() {
        let ops = render(&Mark::place(Point::new(1.0, 1.0), Some(MarkContent::Glyph(String::new()))).into());
        assert_eq!(
            ops,
            vec![SurfaceOp::SetGlobalAlpha(1.0), SurfaceOp::SetGlobalAlpha(1.0)]
        );
    }

    #[test]
    fn test_update_merges_fields() {
        let mut mark = Mark::ring(Point::new(0.0, 0.0), 5.0);
        mark.update(MarkUpdate::default().opacity(0.5));
        assert_eq!(mark.diameter(), Some(5.0));
        assert_eq!(mark.opacity(), 0.5);

        mark.update(
            MarkUpdate::default()
                .content(Some(MarkContent::Glyph("🍀".to_string())))
                .diameter(None),
        );
        assert_eq!(mark.diameter(), None);
        assert_eq!(mark.opacity(), 0.5);
        assert_eq!(mark.content(), Some(&MarkContent::Glyph("🍀".to_string())));
    }
}
