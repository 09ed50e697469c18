use std::cell::Cell;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shortcut {
    Undo,
    Redo,
}

/// Ctrl/Cmd+Z undoes; Ctrl/Cmd+Shift+Z and Ctrl/Cmd+Y redo.
pub fn shortcut_for(key: &str, modifier: bool, shift: bool) -> Option<Shortcut> {
    if !modifier {
        return None;
    }
    if key.eq_ignore_ascii_case("z") {
        return Some(if shift { Shortcut::Redo } else { Shortcut::Undo });
    }
    if key.eq_ignore_ascii_case("y") {
        return Some(Shortcut::Redo);
    }
    None
}

/// Pins a gesture to the pointer that started it. Events from other pointers
/// are dropped until that pointer lifts or leaves.
#[derive(Default)]
pub struct PointerGate {
    active: Cell<Option<i32>>,
}

impl PointerGate {
    pub fn allows(&self, pointer_id: i32) -> bool {
        self.active.get().map_or(true, |active| active == pointer_id)
    }

    pub fn claim(&self, pointer_id: i32) -> bool {
        if !self.allows(pointer_id) {
            return false;
        }
        self.active.set(Some(pointer_id));
        true
    }

    pub fn release(&self, pointer_id: i32) -> bool {
        if !self.allows(pointer_id) {
            return false;
        }
        self.active.set(None);
        true
    }

    pub fn active(&self) -> Option<i32> {
        self.active.get()
    }
}
