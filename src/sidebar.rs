//! Navigation entries and which of them are on screen.

use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarEntry {
    /// DOM id of the section the entry scrolls to.
    pub anchor: String,
    pub label: String,
    pub nested: bool,
}

impl SidebarEntry {
    pub fn top(anchor: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            anchor: anchor.into(),
            label: label.into(),
            nested: false,
        }
    }

    pub fn nested(anchor: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            anchor: anchor.into(),
            label: label.into(),
            nested: true,
        }
    }

    pub fn href(&self) -> String {
        format!("#{}", self.anchor)
    }
}

/// Anchors currently intersecting the viewport, as reported by the observer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SidebarState {
    visible: BTreeSet<String>,
}

impl SidebarState {
    /// Record an observer callback. Returns whether anything changed.
    pub fn set_visibility(&mut self, anchor: &str, visible: bool) -> bool {
        if visible {
            self.visible.insert(anchor.to_string())
        } else {
            self.visible.remove(anchor)
        }
    }

    pub fn is_highlighted(&self, anchor: &str) -> bool {
        self.visible.contains(anchor)
    }

    /// Forget anchors that are no longer rendered, e.g. after a workup removal.
    pub fn retain(&mut self, entries: &[SidebarEntry]) {
        self.visible
            .retain(|anchor| entries.iter().any(|entry| &entry.anchor == anchor));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visibility_toggles_highlight() {
        let mut state = SidebarState::default();
        assert!(state.set_visibility("section_notes", true));
        assert!(!state.set_visibility("section_notes", true));
        assert!(state.is_highlighted("section_notes"));
        assert!(state.set_visibility("section_notes", false));
        assert!(!state.is_highlighted("section_notes"));
    }

    #[test]
    fn stale_anchors_are_dropped() {
        let mut state = SidebarState::default();
        state.set_visibility("workup_s4", true);
        state.set_visibility("section_workups", true);
        state.retain(&[SidebarEntry::top("section_workups", "Workups")]);
        assert!(!state.is_highlighted("workup_s4"));
        assert!(state.is_highlighted("section_workups"));
        assert_eq!(SidebarEntry::nested("workup_s4", "WASH").href(), "#workup_s4");
    }
}
