//! Hover and selection tracking for a box.

/// What the pointer is doing to a box, as used to pick its fill color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    Hovered,
    /// Selected by a click. Takes precedence over hovering.
    Selected,
}

/// Pointer flags of a single box.
///
/// A press while the pointer is over the box toggles the selection and
/// counts as a click. A press anywhere else clears the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Interaction {
    hovered: bool,
    selected: bool,
}

impl Interaction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// The box is drawn with its hover color in this state.
    pub fn is_active(&self) -> bool {
        self.hovered || self.selected
    }

    pub fn state(&self) -> InteractionState {
        if self.selected {
            InteractionState::Selected
        } else if self.hovered {
            InteractionState::Hovered
        } else {
            InteractionState::Idle
        }
    }

    /// Update the hover flag. Returns `true` if it changed.
    pub fn pointer_moved(&mut self, inside: bool) -> bool {
        let changed = self.hovered != inside;
        self.hovered = inside;
        changed
    }

    /// Handle a pointer press. Returns `true` if the press was a click on
    /// this box.
    pub fn press(&mut self) -> bool {
        if self.hovered {
            self.selected = !self.selected;
            true
        } else {
            self.selected = false;
            false
        }
    }

    /// Forget hover and selection, for example when the box is hidden.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
