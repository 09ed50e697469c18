use crate::drawable::MarkContent;

#[derive(Clone, Debug, PartialEq)]
pub enum Mode {
    Brush { width: f64 },
    Mark(MarkContent),
}

/// The selected tool. Brush and mark selections replace each other.
#[derive(Clone, Debug, PartialEq)]
pub struct ToolState {
    mode: Mode,
}

impl ToolState {
    pub fn new(brush_width: f64) -> Self {
        Self {
            mode: Mode::Brush { width: brush_width },
        }
    }

    pub fn select_brush(&mut self, width: f64) {
        self.mode = Mode::Brush { width };
    }

    pub fn select_mark(&mut self, content: MarkContent) {
        self.mode = Mode::Mark(content);
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn brush_width(&self) -> Option<f64> {
        match self.mode {
            Mode::Brush { width } => Some(width),
            Mode::Mark(_) => None,
        }
    }

    pub fn mark_content(&self) -> Option<&MarkContent> {
        match &self.mode {
            Mode::Mark(content) => Some(content),
            Mode::Brush { .. } => None,
        }
    }
}
