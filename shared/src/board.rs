use log::{debug, trace};

use crate::config::BoardConfig;
use crate::drawable::{Mark, MarkContent, MarkUpdate, Stroke};
use crate::history::History;
use crate::surface::Surface;
use crate::tool::{Mode, ToolState};
use crate::Point;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Gesture {
    #[default]
    Idle,
    Drawing,
}

/// Owns the whole board: history, tool selection, the live preview and the
/// gesture in progress. Every mutating call ends by repainting `surface`.
pub struct Whiteboard {
    config: BoardConfig,
    history: History,
    tools: ToolState,
    preview: Option<Mark>,
    gesture: Gesture,
}

impl Whiteboard {
    pub fn new(config: BoardConfig) -> Self {
        let tools = ToolState::new(config.initial_brush);
        Self {
            config,
            history: History::new(),
            tools,
            preview: None,
            gesture: Gesture::Idle,
        }
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn tools(&self) -> &ToolState {
        &self.tools
    }

    pub fn preview(&self) -> Option<&Mark> {
        self.preview.as_ref()
    }

    pub fn gesture(&self) -> Gesture {
        self.gesture
    }

    /// A second press while a stroke is in progress is ignored.
    pub fn pointer_down(&mut self, surface: &mut dyn Surface, point: Point) {
        let Some(point) = point.normalize() else {
            return;
        };
        if self.gesture == Gesture::Drawing {
            return;
        }
        match self.tools.mode() {
            Mode::Brush { width } => {
                trace!("stroke begin at ({}, {}) width={width}", point.x, point.y);
                self.history.commit(Stroke::begin(point, *width).into());
                self.gesture = Gesture::Drawing;
            }
            Mode::Mark(content) => {
                trace!("mark placed at ({}, {})", point.x, point.y);
                self.history
                    .commit(Mark::place(point, Some(content.clone())).into());
            }
        }
        self.repaint(surface);
    }

    pub fn pointer_move(&mut self, surface: &mut dyn Surface, point: Point) {
        let Some(point) = point.normalize() else {
            return;
        };
        self.track_preview(point);
        if self.gesture == Gesture::Drawing {
            if let Some(stroke) = self.history.active_stroke_mut() {
                stroke.extend(point);
            }
        }
        self.repaint(surface);
    }

    pub fn pointer_up(&mut self, surface: &mut dyn Surface) {
        self.seal();
        self.repaint(surface);
    }

    /// Leaving the surface seals the stroke in progress; its points stay committed.
    pub fn pointer_leave(&mut self, surface: &mut dyn Surface) {
        self.seal();
        self.preview = None;
        self.repaint(surface);
    }

    pub fn select_brush(&mut self, surface: &mut dyn Surface, width: f64) {
        self.tools.select_brush(width);
        self.preview = None;
        self.repaint(surface);
    }

    pub fn select_mark(&mut self, surface: &mut dyn Surface, content: MarkContent) {
        self.tools.select_mark(content);
        self.preview = None;
        self.repaint(surface);
    }

    pub fn clear(&mut self, surface: &mut dyn Surface) {
        self.seal();
        debug!("clear: dropping {} drawables", self.history.len());
        self.history.clear();
        self.repaint(surface);
    }

    pub fn undo(&mut self, surface: &mut dyn Surface) -> bool {
        self.seal();
        let undone = self.history.undo();
        debug!("undo applied={undone} remaining={}", self.history.len());
        self.repaint(surface);
        undone
    }

    pub fn redo(&mut self, surface: &mut dyn Surface) -> bool {
        self.seal();
        let redone = self.history.redo();
        debug!("redo applied={redone} remaining={}", self.history.len());
        self.repaint(surface);
        redone
    }

    /// Clears the surface and replays every committed drawable, then the
    /// preview on top unless a stroke is being drawn.
    pub fn repaint(&self, surface: &mut dyn Surface) {
        surface.clear_rect(self.config.width, self.config.height);
        self.replay(surface);
        if self.gesture == Gesture::Idle {
            if let Some(preview) = &self.preview {
                preview.render(surface, &self.config);
            }
        }
    }

    /// Replays committed content onto another surface at `scale`. The preview
    /// is never exported.
    pub fn export(&self, surface: &mut dyn Surface, scale: f64) {
        surface.scale(scale, scale);
        self.replay(surface);
    }

    pub fn export_size(&self, scale: f64) -> (f64, f64) {
        (self.config.width * scale, self.config.height * scale)
    }

    fn replay(&self, surface: &mut dyn Surface) {
        surface.set_line_cap(self.config.line_cap);
        surface.set_stroke_style(&self.config.ink);
        for drawable in self.history.snapshot() {
            drawable.render(surface, &self.config);
        }
    }

    fn seal(&mut self) {
        if self.gesture == Gesture::Drawing {
            trace!("stroke sealed");
        }
        self.gesture = Gesture::Idle;
    }

    fn track_preview(&mut self, point: Point) {
        let update = match self.tools.mode() {
            Mode::Brush { width } => MarkUpdate::default()
                .content(None)
                .opacity(1.0)
                .diameter(Some(*width)),
            Mode::Mark(content) => MarkUpdate::default()
                .content(Some(content.clone()))
                .opacity(self.config.preview_opacity)
                .diameter(None),
        };
        let preview = self
            .preview
            .get_or_insert_with(|| Mark::place(point, None));
        preview.reposition(point);
        preview.update(update);
    }
}

impl Default for Whiteboard {
    fn default() -> Self {
        Self::new(BoardConfig::default())
    }
}
