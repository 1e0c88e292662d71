//! Dropdown state for enumerated and three-way boolean fields.

use crate::enums::{EnumTable, OptionalBool};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Selector {
    table: &'static EnumTable,
    selected: i32,
}

impl Selector {
    /// Build a selector over `table` with the unspecified member selected.
    pub fn new(table: &'static EnumTable) -> Self {
        Self {
            table,
            selected: table.default_code(),
        }
    }

    /// Select the member with `code`. Unknown codes keep the current selection.
    pub fn set(&mut self, code: i32) {
        if self.table.contains(code) {
            self.selected = code;
        }
    }

    pub fn get(&self) -> i32 {
        self.selected
    }

    /// Name of the selected member.
    pub fn text(&self) -> &'static str {
        self.table.name_of(self.selected).unwrap_or_default()
    }

    /// Select by member name, as a `<select>` change event reports it.
    pub fn set_text(&mut self, name: &str) {
        if let Some(code) = self.table.code_of(name) {
            self.selected = code;
        }
    }

    pub fn options(&self) -> impl Iterator<Item = (&'static str, i32)> + '_ {
        self.table.members.iter().copied()
    }
}

/// Three-way true/false/unspecified dropdown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OptionalBoolSelector {
    selected: OptionalBool,
}

impl OptionalBoolSelector {
    pub fn set(&mut self, value: Option<bool>) {
        self.selected = OptionalBool::from(value);
    }

    pub fn get(&self) -> Option<bool> {
        self.selected.into()
    }

    pub fn selected(&self) -> OptionalBool {
        self.selected
    }

    pub fn select(&mut self, value: OptionalBool) {
        self.selected = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::{ALL_TABLES, MASS_UNIT};

    #[test]
    fn starts_unspecified() {
        let selector = Selector::new(&MASS_UNIT);
        assert_eq!(selector.get(), 0);
        assert_eq!(selector.text(), "UNSPECIFIED");
    }

    #[test]
    fn every_member_round_trips() {
        for table in ALL_TABLES {
            let mut selector = Selector::new(table);
            for &(name, code) in table.members {
                selector.set(code);
                assert_eq!(selector.get(), code, "{}.{}", table.name, name);
                assert_eq!(selector.text(), name);
            }
        }
    }

    #[test]
    fn unknown_code_keeps_previous_selection() {
        let mut selector = Selector::new(&MASS_UNIT);
        selector.set(99);
        assert_eq!(selector.get(), 0);
        selector.set(2);
        selector.set(-4);
        assert_eq!(selector.text(), "GRAM");
        selector.set_text("STONE");
        assert_eq!(selector.text(), "GRAM");
    }

    #[test]
    fn optional_bool_round_trips() {
        let mut selector = OptionalBoolSelector::default();
        assert_eq!(selector.get(), None);
        for value in [Some(true), Some(false), None] {
            selector.set(value);
            assert_eq!(selector.get(), value);
        }
    }
}
