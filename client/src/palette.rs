use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlButtonElement, HtmlElement};

use stickerboard_shared::{BoardConfig, MarkContent, Mode};

use crate::dom::set_tool_button;

pub enum ToolAction {
    Brush(usize),
    Sticker(usize),
    Custom,
    Import,
}

enum ToolSlot<'a> {
    Brush(usize, &'a str),
    Sticker(usize, &'a str),
    Custom,
    Import,
}

impl ToolSlot<'_> {
    fn is_active(&self, config: &BoardConfig, mode: &Mode) -> bool {
        match (self, mode) {
            (ToolSlot::Brush(index, _), Mode::Brush { width }) => {
                config.brushes[*index].width == *width
            }
            (ToolSlot::Sticker(_, glyph), Mode::Mark(MarkContent::Glyph(current))) => {
                current.as_str() == *glyph
            }
            (ToolSlot::Custom, Mode::Mark(MarkContent::Glyph(current))) => {
                !config.stickers.iter().any(|glyph| glyph == current)
            }
            (ToolSlot::Import, Mode::Mark(MarkContent::Image(_))) => true,
            _ => false,
        }
    }
}

pub fn render_palette(document: &Document, palette_el: &HtmlElement, config: &BoardConfig, mode: &Mode) {
    palette_el.set_inner_html("");
    let slots = config
        .brushes
        .iter()
        .enumerate()
        .map(|(index, brush)| ToolSlot::Brush(index, brush.label.as_str()))
        .chain(
            config
                .stickers
                .iter()
                .enumerate()
                .map(|(index, glyph)| ToolSlot::Sticker(index, glyph.as_str())),
        )
        .chain([ToolSlot::Custom, ToolSlot::Import]);

    for slot in slots {
        let Ok(element) = document.create_element("button") else {
            continue;
        };
        let Ok(button) = element.dyn_into::<HtmlButtonElement>() else {
            continue;
        };
        let _ = button.set_attribute("type", "button");
        let (tool, index, label, class_name) = match &slot {
            ToolSlot::Brush(index, label) => ("brush", Some(*index), *label, "tool brush"),
            ToolSlot::Sticker(index, glyph) => ("sticker", Some(*index), *glyph, "tool sticker"),
            ToolSlot::Custom => ("custom", None, "Set String Sticker", "tool custom"),
            ToolSlot::Import => ("import", None, "Import Image Sticker", "tool import"),
        };
        let _ = button.set_attribute("data-tool", tool);
        if let Some(index) = index {
            let _ = button.set_attribute("data-index", &index.to_string());
        }
        let _ = button.set_attribute("class", class_name);
        set_tool_button(&button, slot.is_active(config, mode));
        button.set_text_content(Some(label));
        let _ = palette_el.append_child(&button);
    }
}

pub fn tool_action_from_event(event: &Event) -> Option<ToolAction> {
    let mut current = event
        .target()
        .and_then(|target| target.dyn_into::<Element>().ok());
    while let Some(element) = current {
        if let Some(tool) = element.get_attribute("data-tool") {
            let index = element
                .get_attribute("data-index")
                .and_then(|index| index.parse::<usize>().ok());
            return match (tool.as_str(), index) {
                ("brush", Some(index)) => Some(ToolAction::Brush(index)),
                ("sticker", Some(index)) => Some(ToolAction::Sticker(index)),
                ("custom", _) => Some(ToolAction::Custom),
                ("import", _) => Some(ToolAction::Import),
                _ => None,
            };
        }
        current = element.parent_element();
    }
    None
}
