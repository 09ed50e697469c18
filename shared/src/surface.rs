use serde::{Deserialize, Serialize};

use crate::drawable::ImageRef;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LineCap {
    Butt,
    Round,
    #[default]
    Square,
}

impl LineCap {
    pub fn as_str(self) -> &'static str {
        match self {
            LineCap::Butt => "butt",
            LineCap::Round => "round",
            LineCap::Square => "square",
        }
    }
}

/// The drawing primitives the board issues. Implementations own the pixels;
/// the board only ever replays drawables through these calls.
pub trait Surface {
    fn clear_rect(&mut self, width: f64, height: f64);
    fn scale(&mut self, sx: f64, sy: f64);

    fn begin_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn arc(&mut self, x: f64, y: f64, radius: f64, start_angle: f64, end_angle: f64);
    fn stroke(&mut self);

    fn set_line_width(&mut self, width: f64);
    fn set_line_cap(&mut self, cap: LineCap);
    fn set_stroke_style(&mut self, style: &str);
    fn set_global_alpha(&mut self, alpha: f64);

    fn set_font(&mut self, font: &str);
    fn fill_text(&mut self, text: &str, x: f64, y: f64);
    fn draw_image(&mut self, image: &ImageRef, x: f64, y: f64, width: f64, height: f64);
}
