use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement};

use stickerboard_shared::SvgSurface;

use crate::dom::download;
use crate::render::CanvasSurface;
use crate::state::State;

/// Replays the board onto an offscreen canvas at the configured export scale
/// and downloads it as a PNG.
pub fn export_png(document: &Document, state: &State) -> Result<(), JsValue> {
    let config = state.board.config();
    let scale = config.export_scale;
    let (width, height) = state.board.export_size(scale);

    let canvas: HtmlCanvasElement = document.create_element("canvas")?.dyn_into()?;
    canvas.set_width(width as u32);
    canvas.set_height(height as u32);
    let ctx = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("Missing export canvas context"))?
        .dyn_into::<CanvasRenderingContext2d>()?;

    let mut surface = CanvasSurface::new(ctx, state.images.clone());
    state.board.export(&mut surface, scale);

    let href = canvas.to_data_url_with_type("image/png")?;
    download(document, &href, &format!("{}.png", config.export_name));
    log::info!(
        "Exported {}x{} PNG with {} drawables",
        width,
        height,
        state.board.history().len()
    );
    Ok(())
}

pub fn build_svg(state: &State) -> String {
    let config = state.board.config();
    let images = state.images.borrow();
    let mut svg = SvgSurface::new(config.width, config.height)
        .with_background(true)
        .with_image_href(|id| images.data_url(id));
    state.board.export(&mut svg, 1.0);
    svg.finish()
}

pub fn export_svg(document: &Document, state: &State) {
    let svg = build_svg(state);
    let encoded = js_sys::encode_uri_component(&svg);
    let href = format!("data:image/svg+xml;charset=utf-8,{encoded}");
    download(
        document,
        &href,
        &format!("{}.svg", state.board.config().export_name),
    );
}
