use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlAnchorElement, HtmlButtonElement, HtmlCanvasElement, PointerEvent, Window};

use stickerboard_shared::{BoardConfig, Point};

pub fn get_element<T: JsCast>(document: &Document, id: &str) -> Result<T, JsValue> {
    let element = document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("Missing element: {id}")))?;
    element
        .dyn_into::<T>()
        .map_err(|_| JsValue::from_str(&format!("Invalid element type: {id}")))
}

pub fn set_tool_button(button: &HtmlButtonElement, active: bool) {
    let pressed = if active { "true" } else { "false" };
    let _ = button.set_attribute("aria-pressed", pressed);
}

pub fn debug_enabled(window: &Window) -> bool {
    let search = window.location().search().ok().unwrap_or_default();
    query_flag(&search, "debug") || query_flag(&search, "log")
}

/// True when `key=1` or `key=true` appears in a `?a=b&c=d` query string.
pub fn query_flag(search: &str, key: &str) -> bool {
    search
        .trim_start_matches('?')
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .any(|(name, value)| name == key && (value == "1" || value == "true"))
}

/// Reads the optional `<script type="application/json" id="board-config">`.
pub fn read_board_config(document: &Document) -> BoardConfig {
    let Some(text) = document
        .get_element_by_id("board-config")
        .and_then(|element| element.text_content())
    else {
        return BoardConfig::default();
    };
    match BoardConfig::from_json(&text) {
        Ok(config) => config,
        Err(error) => {
            log::warn!("Ignoring board config: {error}");
            BoardConfig::default()
        }
    }
}

pub fn size_canvas(canvas: &HtmlCanvasElement, config: &BoardConfig) {
    canvas.set_width(config.width as u32);
    canvas.set_height(config.height as u32);
}

/// Maps a pointer event into board coordinates, undoing any CSS scaling of the canvas.
pub fn event_to_point(canvas: &HtmlCanvasElement, event: &PointerEvent) -> Option<Point> {
    let rect = canvas.get_bounding_client_rect();
    if rect.width() <= 0.0 || rect.height() <= 0.0 {
        return None;
    }
    let scale_x = canvas.width() as f64 / rect.width();
    let scale_y = canvas.height() as f64 / rect.height();
    let x = (event.client_x() as f64 - rect.left()) * scale_x;
    let y = (event.client_y() as f64 - rect.top()) * scale_y;
    Point::new(x, y).normalize()
}

pub fn download(document: &Document, href: &str, file_name: &str) {
    if let Ok(element) = document.create_element("a") {
        if let Ok(anchor) = element.dyn_into::<HtmlAnchorElement>() {
            anchor.set_href(href);
            anchor.set_download(file_name);
            anchor.click();
        }
    }
}
