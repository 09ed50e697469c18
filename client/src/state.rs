use std::cell::RefCell;
use std::rc::Rc;

use web_sys::{HtmlButtonElement, HtmlCanvasElement};

use stickerboard_shared::{MarkContent, Point, Whiteboard};

use crate::render::{CanvasSurface, ImageStore};

pub struct Buttons {
    pub undo: HtmlButtonElement,
    pub redo: HtmlButtonElement,
}

pub struct State {
    pub canvas: HtmlCanvasElement,
    pub board: Whiteboard,
    pub surface: CanvasSurface,
    pub images: Rc<RefCell<ImageStore>>,
    pub buttons: Buttons,
}

/// Input the board reacts to. Every variant repaints the canvas.
pub enum BoardEvent {
    PointerDown(Point),
    PointerMove(Point),
    PointerUp,
    PointerLeave,
    SelectBrush(f64),
    SelectMark(MarkContent),
    Clear,
    Undo,
    Redo,
}

impl State {
    pub fn apply(&mut self, event: BoardEvent) {
        let State { board, surface, .. } = self;
        match event {
            BoardEvent::PointerDown(point) => board.pointer_down(surface, point),
            BoardEvent::PointerMove(point) => board.pointer_move(surface, point),
            BoardEvent::PointerUp => board.pointer_up(surface),
            BoardEvent::PointerLeave => board.pointer_leave(surface),
            BoardEvent::SelectBrush(width) => board.select_brush(surface, width),
            BoardEvent::SelectMark(content) => board.select_mark(surface, content),
            BoardEvent::Clear => board.clear(surface),
            BoardEvent::Undo => {
                board.undo(surface);
            }
            BoardEvent::Redo => {
                board.redo(surface);
            }
        }
        self.sync_buttons();
    }

    pub fn sync_buttons(&self) {
        let history = self.board.history();
        self.buttons.undo.set_disabled(!history.can_undo());
        self.buttons.redo.set_disabled(!history.can_redo());
    }
}
