use crate::form::{OptionalBoolSelector, SectionForm, SectionIds, SectionTree, TextField};
use crate::record::ReactionNotes;

#[derive(Debug, Clone, PartialEq)]
pub struct NotesForm {
    pub heterogeneous: OptionalBoolSelector,
    pub precipitate: OptionalBoolSelector,
    pub exothermic: OptionalBoolSelector,
    pub offgas: OptionalBoolSelector,
    pub moisture: OptionalBoolSelector,
    pub oxygen: OptionalBoolSelector,
    pub light: OptionalBoolSelector,
    pub safety: TextField,
    pub details: TextField,
}

impl Default for NotesForm {
    fn default() -> Self {
        Self {
            heterogeneous: OptionalBoolSelector::default(),
            precipitate: OptionalBoolSelector::default(),
            exothermic: OptionalBoolSelector::default(),
            offgas: OptionalBoolSelector::default(),
            moisture: OptionalBoolSelector::default(),
            oxygen: OptionalBoolSelector::default(),
            light: OptionalBoolSelector::default(),
            safety: TextField::free("notes_safety"),
            details: TextField::free("notes_details"),
        }
    }
}

impl SectionForm for NotesForm {
    type Record = ReactionNotes;

    fn load(&mut self, notes: &ReactionNotes, _ids: &mut SectionIds) {
        self.heterogeneous.set(notes.is_heterogeneous);
        self.precipitate.set(notes.forms_precipitate);
        self.exothermic.set(notes.is_exothermic);
        self.offgas.set(notes.offgasses);
        self.moisture.set(notes.is_sensitive_to_moisture);
        self.oxygen.set(notes.is_sensitive_to_oxygen);
        self.light.set(notes.is_sensitive_to_light);
        self.safety.set_text(notes.safety_notes.as_str());
        self.details.set_text(notes.procedure_details.as_str());
    }

    fn unload(&self) -> ReactionNotes {
        ReactionNotes {
            is_heterogeneous: self.heterogeneous.get(),
            forms_precipitate: self.precipitate.get(),
            is_exothermic: self.exothermic.get(),
            offgasses: self.offgas.get(),
            is_sensitive_to_moisture: self.moisture.get(),
            is_sensitive_to_oxygen: self.oxygen.get(),
            is_sensitive_to_light: self.light.get(),
            safety_notes: self.safety.text().to_string(),
            procedure_details: self.details.text().to_string(),
        }
    }

    fn collect_invalid(&self, _out: &mut Vec<&'static str>) {}
}

impl SectionTree for NotesForm {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_false_survives_unload() {
        let notes = ReactionNotes {
            is_exothermic: Some(false),
            is_sensitive_to_light: Some(true),
            safety_notes: "Use a blast shield.".into(),
            ..Default::default()
        };
        let mut form = NotesForm::default();
        form.load(&notes, &mut SectionIds::default());
        assert_eq!(form.unload(), notes);
        assert_eq!(form.heterogeneous.get(), None);
    }
}
