//! Which user events count as edits.

/// Kind of user event behind an [`crate::form::Edit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    /// Keystroke in a text field. Updates the text only.
    Input,
    /// Focus left a text field.
    Blur,
    /// A selector, optional bool, radio, checkbox or file picker changed.
    Change,
    /// An add control was clicked.
    Click,
}

impl ChangeKind {
    /// True for events that mark the document dirty and trigger validation
    /// of the enclosing sections.
    pub fn is_edit(self) -> bool {
        !matches!(self, ChangeKind::Input)
    }
}

/// Autosave fires only with unsaved changes and no save in flight.
pub fn autosave_due(enabled: bool, dirty: bool, saving: bool) -> bool {
    enabled && dirty && !saving
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typing_is_not_an_edit() {
        assert!(!ChangeKind::Input.is_edit());
        for kind in [ChangeKind::Blur, ChangeKind::Change, ChangeKind::Click] {
            assert!(kind.is_edit(), "{kind:?}");
        }
    }

    #[test]
    fn autosave_needs_dirty_idle_and_enabled() {
        assert!(autosave_due(true, true, false));
        assert!(!autosave_due(true, false, false));
        assert!(!autosave_due(true, true, true));
        assert!(!autosave_due(false, true, false));
    }
}
