use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

use stickerboard_shared::{ImageId, ImageRef, LineCap, Surface};

struct StoredImage {
    element: HtmlImageElement,
    data_url: String,
}

/// Bitmaps imported as stickers, keyed by the handle the board stores.
#[derive(Default)]
pub struct ImageStore {
    next_id: u32,
    images: HashMap<ImageId, StoredImage>,
}

impl ImageStore {
    pub fn insert(&mut self, element: HtmlImageElement, data_url: String) -> ImageRef {
        let id = ImageId(self.next_id);
        self.next_id += 1;
        let image = ImageRef {
            id,
            width: element.natural_width() as f64,
            height: element.natural_height() as f64,
        };
        self.images.insert(id, StoredImage { element, data_url });
        image
    }

    pub fn data_url(&self, id: ImageId) -> Option<String> {
        self.images.get(&id).map(|image| image.data_url.clone())
    }
}

/// [`Surface`] over a 2D canvas context. Canvas errors are dropped: a failed
/// primitive only loses that primitive.
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
    images: Rc<RefCell<ImageStore>>,
}

impl CanvasSurface {
    pub fn new(ctx: CanvasRenderingContext2d, images: Rc<RefCell<ImageStore>>) -> Self {
        Self { ctx, images }
    }
}

impl Surface for CanvasSurface {
    fn clear_rect(&mut self, width: f64, height: f64) {
        self.ctx.clear_rect(0.0, 0.0, width, height);
    }

    fn scale(&mut self, sx: f64, sy: f64) {
        let _ = self.ctx.scale(sx, sy);
    }

    fn begin_path(&mut self) {
        self.ctx.begin_path();
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.ctx.move_to(x, y);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.ctx.line_to(x, y);
    }

    fn arc(&mut self, x: f64, y: f64, radius: f64, start_angle: f64, end_angle: f64) {
        let _ = self.ctx.arc(x, y, radius, start_angle, end_angle);
    }

    fn stroke(&mut self) {
        self.ctx.stroke();
    }

    fn set_line_width(&mut self, width: f64) {
        self.ctx.set_line_width(width);
    }

    fn set_line_cap(&mut self, cap: LineCap) {
        self.ctx.set_line_cap(cap.as_str());
    }

    fn set_stroke_style(&mut self, style: &str) {
        self.ctx.set_stroke_style_str(style);
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        self.ctx.set_global_alpha(alpha);
    }

    fn set_font(&mut self, font: &str) {
        self.ctx.set_font(font);
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        let _ = self.ctx.fill_text(text, x, y);
    }

    fn draw_image(&mut self, image: &ImageRef, x: f64, y: f64, width: f64, height: f64) {
        let images = self.images.borrow();
        let Some(stored) = images.images.get(&image.id) else {
            return;
        };
        let _ = self
            .ctx
            .draw_image_with_html_image_element_and_dw_and_dh(&stored.element, x, y, width, height);
    }
}
