use std::cell::{Cell, RefCell};
use std::rc::Rc;

use js_sys::Reflect;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    CanvasRenderingContext2d, Event, FileReader, HtmlButtonElement, HtmlCanvasElement,
    HtmlElement, HtmlImageElement, HtmlInputElement, KeyboardEvent, PointerEvent, ProgressEvent,
};

use stickerboard_shared::{MarkContent, Whiteboard};

use crate::actions::{shortcut_for, PointerGate, Shortcut};
use crate::dom::{debug_enabled, event_to_point, get_element, read_board_config, size_canvas};
use crate::export::{export_png, export_svg};
use crate::palette::{render_palette, tool_action_from_event, ToolAction};
use crate::render::{CanvasSurface, ImageStore};
use crate::state::{BoardEvent, Buttons, State};

fn document_ready_state(document: &web_sys::Document) -> Option<String> {
    Reflect::get(document.as_ref(), &JsValue::from_str("readyState"))
        .ok()?
        .as_string()
}

#[derive(Clone, Copy)]
enum PointerStop {
    Up,
    Leave,
}

#[wasm_bindgen(start)]
pub fn run() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("Missing window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("Missing document"))?;

    let level = if debug_enabled(&window) {
        log::Level::Debug
    } else {
        log::Level::Info
    };
    let _ = console_log::init_with_level(level);

    let started = Rc::new(Cell::new(false));
    if document_ready_state(&document).as_deref() == Some("complete") {
        started.set(true);
        return start_app();
    }

    let onload_started = started.clone();
    let onload = Closure::<dyn FnMut(Event)>::new(move |_| {
        if onload_started.replace(true) {
            return;
        }
        if let Err(err) = start_app() {
            log::error!("Whiteboard failed to start: {err:?}");
        }
    });
    window.add_event_listener_with_callback("load", onload.as_ref().unchecked_ref())?;
    onload.forget();

    Ok(())
}

fn start_app() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("Missing window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("Missing document"))?;

    let config = read_board_config(&document);
    let canvas: HtmlCanvasElement = get_element(&document, "canvas")?;
    size_canvas(&canvas, &config);
    let ctx = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("Canvas not supported"))?
        .dyn_into::<CanvasRenderingContext2d>()?;

    let palette_el: HtmlElement = get_element(&document, "tools")?;
    let clear_button: HtmlButtonElement = get_element(&document, "clear")?;
    let undo_button: HtmlButtonElement = get_element(&document, "undo")?;
    let redo_button: HtmlButtonElement = get_element(&document, "redo")?;
    let export_button: HtmlButtonElement = get_element(&document, "export")?;
    let export_svg_button: HtmlButtonElement = get_element(&document, "exportSvg")?;
    let sticker_upload: HtmlInputElement = get_element(&document, "sticker-upload")?;

    let images = Rc::new(RefCell::new(ImageStore::default()));
    let state = Rc::new(RefCell::new(State {
        canvas: canvas.clone(),
        board: Whiteboard::new(config),
        surface: CanvasSurface::new(ctx, images.clone()),
        images,
        buttons: Buttons {
            undo: undo_button.clone(),
            redo: redo_button.clone(),
        },
    }));

    let refresh_palette: Rc<dyn Fn()> = Rc::new({
        let state = state.clone();
        let document = document.clone();
        let palette_el = palette_el.clone();
        move || {
            let state = state.borrow();
            render_palette(
                &document,
                &palette_el,
                state.board.config(),
                state.board.tools().mode(),
            );
        }
    });

    {
        let mut state = state.borrow_mut();
        let State { board, surface, .. } = &mut *state;
        board.repaint(surface);
        state.sync_buttons();
    }
    refresh_palette();
    log::info!(
        "Whiteboard ready {}x{}",
        state.borrow().board.config().width,
        state.borrow().board.config().height
    );

    let gate = Rc::new(PointerGate::default());

    {
        let down_state = state.clone();
        let down_gate = gate.clone();
        let down_canvas = canvas.clone();
        let ondown = Closure::<dyn FnMut(PointerEvent)>::new(move |event: PointerEvent| {
            if event.button() != 0 || !down_gate.claim(event.pointer_id()) {
                return;
            }
            event.prevent_default();
            let _ = down_canvas.set_pointer_capture(event.pointer_id());
            let mut state = down_state.borrow_mut();
            if let Some(point) = event_to_point(&state.canvas, &event) {
                state.apply(BoardEvent::PointerDown(point));
            }
        });
        canvas.add_event_listener_with_callback("pointerdown", ondown.as_ref().unchecked_ref())?;
        ondown.forget();
    }

    {
        let move_state = state.clone();
        let move_gate = gate.clone();
        let onmove = Closure::<dyn FnMut(PointerEvent)>::new(move |event: PointerEvent| {
            if !move_gate.allows(event.pointer_id()) {
                return;
            }
            let mut state = move_state.borrow_mut();
            if let Some(point) = event_to_point(&state.canvas, &event) {
                state.apply(BoardEvent::PointerMove(point));
            }
        });
        canvas.add_event_listener_with_callback("pointermove", onmove.as_ref().unchecked_ref())?;
        onmove.forget();
    }

    for (event_name, board_event) in [
        ("pointerup", PointerStop::Up),
        ("pointercancel", PointerStop::Leave),
        ("pointerleave", PointerStop::Leave),
    ] {
        let stop_state = state.clone();
        let stop_gate = gate.clone();
        let stop_canvas = canvas.clone();
        let onstop = Closure::<dyn FnMut(PointerEvent)>::new(move |event: PointerEvent| {
            if !stop_gate.release(event.pointer_id()) {
                return;
            }
            if stop_canvas.has_pointer_capture(event.pointer_id()) {
                let _ = stop_canvas.release_pointer_capture(event.pointer_id());
            }
            let event = match board_event {
                PointerStop::Up => BoardEvent::PointerUp,
                PointerStop::Leave => BoardEvent::PointerLeave,
            };
            stop_state.borrow_mut().apply(event);
        });
        canvas.add_event_listener_with_callback(event_name, onstop.as_ref().unchecked_ref())?;
        onstop.forget();
    }

    {
        let clear_state = state.clone();
        let onclick = Closure::<dyn FnMut(Event)>::new(move |_| {
            clear_state.borrow_mut().apply(BoardEvent::Clear);
        });
        clear_button.add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref())?;
        onclick.forget();
    }

    {
        let undo_state = state.clone();
        let onclick = Closure::<dyn FnMut(Event)>::new(move |_| {
            undo_state.borrow_mut().apply(BoardEvent::Undo);
        });
        undo_button.add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref())?;
        onclick.forget();
    }

    {
        let redo_state = state.clone();
        let onclick = Closure::<dyn FnMut(Event)>::new(move |_| {
            redo_state.borrow_mut().apply(BoardEvent::Redo);
        });
        redo_button.add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref())?;
        onclick.forget();
    }

    {
        let key_state = state.clone();
        let onkeydown = Closure::<dyn FnMut(KeyboardEvent)>::new(move |event: KeyboardEvent| {
            let modifier = event.meta_key() || event.ctrl_key();
            let Some(shortcut) = shortcut_for(&event.key(), modifier, event.shift_key()) else {
                return;
            };
            event.prevent_default();
            let mut state = key_state.borrow_mut();
            match shortcut {
                Shortcut::Undo => state.apply(BoardEvent::Undo),
                Shortcut::Redo => state.apply(BoardEvent::Redo),
            }
        });
        window.add_event_listener_with_callback("keydown", onkeydown.as_ref().unchecked_ref())?;
        onkeydown.forget();
    }

    {
        let export_state = state.clone();
        let document = document.clone();
        let onclick = Closure::<dyn FnMut(Event)>::new(move |_| {
            if let Err(err) = export_png(&document, &export_state.borrow()) {
                log::error!("PNG export failed: {err:?}");
            }
        });
        export_button
            .add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref())?;
        onclick.forget();
    }

    {
        let export_state = state.clone();
        let document = document.clone();
        let onclick = Closure::<dyn FnMut(Event)>::new(move |_| {
            export_svg(&document, &export_state.borrow());
        });
        export_svg_button
            .add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref())?;
        onclick.forget();
    }

    {
        let tool_state = state.clone();
        let refresh_palette = refresh_palette.clone();
        let sticker_upload = sticker_upload.clone();
        let window = window.clone();
        let onclick = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            let Some(action) = tool_action_from_event(&event) else {
                return;
            };
            let selection = tool_selection(&tool_state.borrow(), action, &window, &sticker_upload);
            if let Some(selection) = selection {
                tool_state.borrow_mut().apply(selection);
                refresh_palette();
            }
        });
        palette_el.add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref())?;
        onclick.forget();
    }

    {
        let upload_state = state.clone();
        let upload_input = sticker_upload.clone();
        let refresh_palette = refresh_palette.clone();
        let onchange = Closure::<dyn FnMut(Event)>::new(move |_| {
            let Some(file) = upload_input.files().and_then(|list| list.get(0)) else {
                return;
            };
            let reader = match FileReader::new() {
                Ok(reader) => reader,
                Err(_) => return,
            };
            let image_state = upload_state.clone();
            let refresh_palette = refresh_palette.clone();
            let onload = Closure::<dyn FnMut(ProgressEvent)>::new(move |event: ProgressEvent| {
                let Some(data_url) = read_data_url(&event) else {
                    log::warn!("Image sticker could not be read");
                    return;
                };
                if let Err(err) = load_sticker_image(&image_state, &refresh_palette, data_url) {
                    log::error!("Image sticker failed to load: {err:?}");
                }
            });
            reader.set_onload(Some(onload.as_ref().unchecked_ref()));
            onload.forget();
            if let Err(err) = reader.read_as_data_url(&file) {
                log::error!("Image sticker read failed: {err:?}");
            }
        });
        sticker_upload
            .add_event_listener_with_callback("change", onchange.as_ref().unchecked_ref())?;
        onchange.forget();
    }

    Ok(())
}

fn tool_selection(
    state: &State,
    action: ToolAction,
    window: &web_sys::Window,
    sticker_upload: &HtmlInputElement,
) -> Option<BoardEvent> {
    let config = state.board.config();
    match action {
        ToolAction::Brush(index) => config
            .brushes
            .get(index)
            .map(|brush| BoardEvent::SelectBrush(brush.width)),
        ToolAction::Sticker(index) => config
            .stickers
            .get(index)
            .map(|glyph| BoardEvent::SelectMark(MarkContent::Glyph(glyph.clone()))),
        ToolAction::Custom => window
            .prompt_with_message("Enter sticker content:")
            .ok()
            .flatten()
            .filter(|text| !text.is_empty())
            .map(|text| BoardEvent::SelectMark(MarkContent::Glyph(text))),
        ToolAction::Import => {
            sticker_upload.set_value("");
            sticker_upload.click();
            None
        }
    }
}

fn read_data_url(event: &ProgressEvent) -> Option<String> {
    let reader: FileReader = event.target()?.dyn_into().ok()?;
    reader.result().ok()?.as_string()
}

/// Decodes the data URL into an image element and selects it as the sticker
/// once the browser knows its natural size.
fn load_sticker_image(
    state: &Rc<RefCell<State>>,
    refresh_palette: &Rc<dyn Fn()>,
    data_url: String,
) -> Result<(), JsValue> {
    let image = HtmlImageElement::new()?;
    let onload = {
        let state = state.clone();
        let refresh_palette = refresh_palette.clone();
        let image = image.clone();
        let data_url = data_url.clone();
        Closure::<dyn FnMut(Event)>::new(move |_| {
            let mut state = state.borrow_mut();
            let sticker = state
                .images
                .borrow_mut()
                .insert(image.clone(), data_url.clone());
            log::debug!(
                "Image sticker {:?} loaded {}x{}",
                sticker.id,
                sticker.width,
                sticker.height
            );
            state.apply(BoardEvent::SelectMark(MarkContent::Image(sticker)));
            drop(state);
            refresh_palette();
        })
    };
    image.set_onload(Some(onload.as_ref().unchecked_ref()));
    onload.forget();
    image.set_src(&data_url);
    Ok(())
}
