use crate::drawable::{Drawable, Stroke};

/// Committed drawables in paint order, plus the ones undone since the last commit.
#[derive(Clone, Debug, Default)]
pub struct History {
    committed: Vec<Drawable>,
    undone: Vec<Drawable>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes a new drawable. This is the only operation that drops redo history.
    pub fn commit(&mut self, drawable: Drawable) {
        self.committed.push(drawable);
        self.undone.clear();
    }

    pub fn undo(&mut self) -> bool {
        match self.committed.pop() {
            Some(drawable) => {
                self.undone.push(drawable);
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        match self.undone.pop() {
            Some(drawable) => {
                self.committed.push(drawable);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.committed.clear();
        self.undone.clear();
    }

    /// Committed drawables, oldest first.
    pub fn snapshot(&self) -> &[Drawable] {
        &self.committed
    }

    /// The newest committed drawable, if it is a stroke.
    pub fn active_stroke_mut(&mut self) -> Option<&mut Stroke> {
        match self.committed.last_mut() {
            Some(Drawable::Stroke(stroke)) => Some(stroke),
            _ => None,
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.committed.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.undone.is_empty()
    }

    pub fn len(&self) -> usize {
        self.committed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.committed.is_empty()
    }
}
