//! The whole reaction as form state, and per-section validation payloads.

use crate::codec::{encode, non_empty, Message};
use crate::error::EditorError;
use crate::form::{SectionForm, SectionId, SectionIds, SectionKey, SectionList, SectionTree};
use crate::record::{Extra, Reaction, ReactionConditions};
use crate::sections::{
    ElectroForm, FlowForm, NotesForm, ObservationForm, OutcomeForm, PressureForm, StirringForm,
    TemperatureForm, WorkupForm,
};
use crate::sidebar::SidebarEntry;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReactionForm {
    pub temperature: TemperatureForm,
    pub pressure: PressureForm,
    pub stirring: StirringForm,
    pub flow: FlowForm,
    pub electro: ElectroForm,
    pub notes: NotesForm,
    pub observations: SectionList<ObservationForm>,
    pub workups: SectionList<WorkupForm>,
    pub outcomes: SectionList<OutcomeForm>,
    reaction_id: String,
    conditions_extra: Extra,
    extra: Extra,
}

/// Encoded section plus the client-side format errors found under it.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationRequest {
    pub key: SectionKey,
    pub type_name: &'static str,
    pub body: Vec<u8>,
    pub invalid_fields: Vec<&'static str>,
}

fn request<M: Message>(
    key: SectionKey,
    record: &M,
    invalid_fields: Vec<&'static str>,
) -> Result<ValidationRequest, EditorError> {
    Ok(ValidationRequest {
        key,
        type_name: M::TYPE_NAME,
        body: encode(record)?,
        invalid_fields,
    })
}

fn section_request<F: SectionForm>(
    key: SectionKey,
    form: &F,
) -> Result<ValidationRequest, EditorError> {
    let mut invalid = Vec::new();
    form.collect_invalid(&mut invalid);
    request(key, &form.unload(), invalid)
}

impl ReactionForm {
    pub fn reaction_id(&self) -> &str {
        &self.reaction_id
    }

    fn unload_conditions(&self) -> ReactionConditions {
        ReactionConditions {
            temperature: non_empty(self.temperature.unload()),
            pressure: non_empty(self.pressure.unload()),
            stirring: non_empty(self.stirring.unload()),
            flow: non_empty(self.flow.unload()),
            electrochemistry: non_empty(self.electro.unload()),
            extra: self.conditions_extra.clone(),
        }
    }

    fn collect_conditions_invalid(&self, out: &mut Vec<&'static str>) {
        self.temperature.collect_invalid(out);
        self.pressure.collect_invalid(out);
        self.stirring.collect_invalid(out);
        self.flow.collect_invalid(out);
        self.electro.collect_invalid(out);
    }

    /// Every section that owns a validation indicator, in display order.
    pub fn all_keys(&self) -> Vec<SectionKey> {
        let mut keys = vec![
            SectionKey::Reaction,
            SectionKey::Conditions,
            SectionKey::Temperature,
            SectionKey::Pressure,
            SectionKey::Stirring,
            SectionKey::Flow,
            SectionKey::Electrochemistry,
            SectionKey::Notes,
        ];
        keys.extend(self.observations.live().map(|(id, _)| SectionKey::Observation(id)));
        keys.extend(self.workups.live().map(|(id, _)| SectionKey::Workup(id)));
        for (id, outcome) in self.outcomes.live() {
            keys.push(SectionKey::Outcome(id));
            keys.extend(outcome.analyses.live().map(|(id, _)| SectionKey::Analysis(id)));
            for (id, product) in outcome.products.live() {
                keys.push(SectionKey::Product(id));
                keys.extend(
                    product
                        .measurements
                        .live()
                        .map(|(id, _)| SectionKey::ProductMeasurement(id)),
                );
            }
        }
        keys
    }

    /// True while the section behind `key` is live.
    pub fn contains(&self, key: SectionKey) -> bool {
        match key {
            SectionKey::Observation(id) => self.observations.get(id).is_some(),
            SectionKey::Workup(id) => self.workups.get(id).is_some(),
            SectionKey::Outcome(id) => self.outcomes.get(id).is_some(),
            SectionKey::Analysis(_) | SectionKey::Product(_) | SectionKey::ProductMeasurement(_) => {
                self.all_keys().contains(&key)
            }
            _ => true,
        }
    }

    /// Build the validation payload for `key`; `None` when the section is gone.
    pub fn validation_request(
        &self,
        key: SectionKey,
    ) -> Option<Result<ValidationRequest, EditorError>> {
        let result = match key {
            SectionKey::Reaction => section_request(key, self),
            SectionKey::Conditions => {
                let mut invalid = Vec::new();
                self.collect_conditions_invalid(&mut invalid);
                request(key, &self.unload_conditions(), invalid)
            }
            SectionKey::Temperature => section_request(key, &self.temperature),
            SectionKey::Pressure => section_request(key, &self.pressure),
            SectionKey::Stirring => section_request(key, &self.stirring),
            SectionKey::Flow => section_request(key, &self.flow),
            SectionKey::Electrochemistry => section_request(key, &self.electro),
            SectionKey::Notes => section_request(key, &self.notes),
            SectionKey::Observation(id) => section_request(key, self.observations.get(id)?),
            SectionKey::Workup(id) => section_request(key, self.workups.get(id)?),
            SectionKey::Outcome(id) => section_request(key, self.outcomes.get(id)?),
            SectionKey::Analysis(id) => {
                let analysis = self
                    .outcomes
                    .live()
                    .find_map(|(_, outcome)| outcome.analyses.get(id))?;
                section_request(key, analysis)
            }
            SectionKey::Product(id) => {
                let product = self
                    .outcomes
                    .live()
                    .find_map(|(_, outcome)| outcome.products.get(id))?;
                section_request(key, product)
            }
            SectionKey::ProductMeasurement(id) => {
                let measurement = self.outcomes.live().find_map(|(_, outcome)| {
                    outcome
                        .products
                        .live()
                        .find_map(|(_, product)| product.measurements.get(id))
                })?;
                section_request(key, measurement)
            }
        };
        Some(result)
    }

    /// Navigation entries: the fixed top-level sections, with one nested entry
    /// per workup.
    pub fn sidebar_entries(&self) -> Vec<SidebarEntry> {
        let mut entries = vec![
            SidebarEntry::top("section_conditions", "Conditions"),
            SidebarEntry::top("section_notes", "Notes"),
            SidebarEntry::top("section_observations", "Observations"),
            SidebarEntry::top("section_workups", "Workups"),
        ];
        for (index, (id, workup)) in self.workups.live().enumerate() {
            let label = match workup.kind.kind() {
                0 => format!("(Workup #{})", index + 1),
                _ => workup.kind.kind.text().to_string(),
            };
            entries.push(SidebarEntry::nested(SectionKey::Workup(id).anchor(), label));
        }
        entries.push(SidebarEntry::top("section_outcomes", "Outcomes"));
        entries
    }
}

impl SectionForm for ReactionForm {
    type Record = Reaction;

    /// Load every section. A reaction without outcomes starts with one empty
    /// outcome. Float text is written in display form, so no cleanup pass is
    /// needed afterwards.
    fn load(&mut self, reaction: &Reaction, ids: &mut SectionIds) {
        *self = Self::default();
        if let Some(conditions) = &reaction.conditions {
            if let Some(temperature) = &conditions.temperature {
                self.temperature.load(temperature, ids);
            }
            if let Some(pressure) = &conditions.pressure {
                self.pressure.load(pressure, ids);
            }
            if let Some(stirring) = &conditions.stirring {
                self.stirring.load(stirring, ids);
            }
            if let Some(flow) = &conditions.flow {
                self.flow.load(flow, ids);
            }
            if let Some(electro) = &conditions.electrochemistry {
                self.electro.load(electro, ids);
            }
            self.conditions_extra = conditions.extra.clone();
        }
        if let Some(notes) = &reaction.notes {
            self.notes.load(notes, ids);
        }
        self.observations.load_all(&reaction.observations, ids);
        self.workups.load_all(&reaction.workups, ids);
        if reaction.outcomes.is_empty() {
            self.outcomes.add(ids);
        } else {
            self.outcomes.load_all(&reaction.outcomes, ids);
        }
        self.reaction_id = reaction.reaction_id.clone();
        self.extra = reaction.extra.clone();
    }

    fn unload(&self) -> Reaction {
        Reaction {
            conditions: non_empty(self.unload_conditions()),
            notes: non_empty(self.notes.unload()),
            observations: self.observations.unload_all(),
            workups: self.workups.unload_all(),
            outcomes: self.outcomes.unload_all(),
            reaction_id: self.reaction_id.clone(),
            extra: self.extra.clone(),
        }
    }

    fn collect_invalid(&self, out: &mut Vec<&'static str>) {
        self.collect_conditions_invalid(out);
        self.observations.collect_invalid(out);
        self.workups.collect_invalid(out);
        self.outcomes.collect_invalid(out);
    }
}

impl SectionTree for ReactionForm {
    fn remove_section(&mut self, id: SectionId) -> Option<Vec<SectionKey>> {
        let within = |key: SectionKey| {
            move |mut path: Vec<SectionKey>| {
                path.push(key);
                path.push(SectionKey::Conditions);
                path
            }
        };
        if let Some(path) = self.temperature.remove_section(id) {
            return Some(within(SectionKey::Temperature)(path));
        }
        if let Some(path) = self.pressure.remove_section(id) {
            return Some(within(SectionKey::Pressure)(path));
        }
        if let Some(path) = self.electro.remove_section(id) {
            return Some(within(SectionKey::Electrochemistry)(path));
        }
        self.observations
            .remove_section(id)
            .or_else(|| self.workups.remove_section(id))
            .or_else(|| self.outcomes.remove_section(id))
    }

    fn purge_removed_except(&mut self, keep: SectionId) {
        self.temperature.purge_removed_except(keep);
        self.pressure.purge_removed_except(keep);
        self.electro.purge_removed_except(keep);
        self.observations.purge_removed_except(keep);
        self.workups.purge_removed_except(keep);
        self.outcomes.purge_removed_except(keep);
    }

    fn restore_removed(&mut self) -> bool {
        // Only one section can be buffered, so at most one of these restores.
        [
            self.temperature.restore_removed(),
            self.pressure.restore_removed(),
            self.electro.restore_removed(),
            self.observations.restore_removed(),
            self.workups.restore_removed(),
            self.outcomes.restore_removed(),
        ]
        .contains(&true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::decode;
    use crate::form::sections;
    use crate::record::{ReactionNotes, ReactionOutcome, ReactionWorkup, TemperatureConditions};
    use serde_json::json;

    fn loaded(reaction: &Reaction) -> (ReactionForm, SectionIds) {
        let mut ids = SectionIds::default();
        let mut form = ReactionForm::default();
        form.load(reaction, &mut ids);
        (form, ids)
    }

    fn sample() -> Reaction {
        let bytes = serde_json::to_vec(&json!({
            "identifiers": [{"type": 6, "value": "C=CC(=O)O"}],
            "inputs": {"acid": {"components": [{"identifiers": [{"type": 2, "value": "CC(=O)O"}]}]}},
            "conditions": {
                "temperature": {"control": {"type": 2}, "setpoint": {"value": 25.0, "units": 1}},
                "illumination": {"type": 3},
                "reflux": true
            },
            "notes": {"is_exothermic": true, "safety_notes": "vent"},
            "workups": [{"type": 6, "details": "EtOAc"}],
            "outcomes": [{
                "reaction_time": {"value": 2.0, "units": 2},
                "analyses": {"lc": {"type": 2}},
                "products": [{"measurements": [{"analysis_key": "lc", "type": 3,
                    "percentage": {"value": 85.0}}]}]
            }],
            "provenance": {"city": "Somewhere"},
            "reaction_id": "ord-123"
        }))
        .unwrap();
        decode(&bytes).unwrap()
    }

    #[test]
    fn load_unload_reproduces_the_reaction() {
        let reaction = sample();
        let (form, _) = loaded(&reaction);
        assert_eq!(form.reaction_id(), "ord-123");
        assert_eq!(form.unload(), reaction);
    }

    #[test]
    fn reaction_without_outcomes_gets_one_empty_outcome() {
        let (form, _) = loaded(&Reaction::default());
        assert_eq!(form.outcomes.live_count(), 1);
        assert!(form.unload().outcomes.is_empty());
    }

    #[test]
    fn reload_replaces_previous_state() {
        let (mut form, mut ids) = loaded(&sample());
        form.load(&Reaction::default(), &mut ids);
        assert_eq!(form.workups.live_count(), 0);
        assert_eq!(form.unload(), Reaction::default());
    }

    #[test]
    fn keys_cover_nested_sections() {
        let (form, _) = loaded(&sample());
        let keys = form.all_keys();
        assert_eq!(keys.len(), 8 + 1 + 1 + 1 + 1 + 1);
        assert!(keys
            .iter()
            .any(|key| matches!(key, SectionKey::ProductMeasurement(_))));
        assert!(keys.iter().all(|key| form.contains(*key)));
    }

    #[test]
    fn section_requests_carry_type_and_local_errors() {
        let (mut form, _) = loaded(&sample());
        form.temperature.setpoint.value.set_text("25..0");
        form.temperature.setpoint.value.blur();

        let request = form
            .validation_request(SectionKey::Temperature)
            .unwrap()
            .unwrap();
        assert_eq!(request.type_name, "TemperatureConditions");
        assert_eq!(request.invalid_fields, vec!["temperature_setpoint_value"]);
        let sent: TemperatureConditions = decode(&request.body).unwrap();
        assert_eq!(sent.setpoint.and_then(|s| s.value), Some(25.0));

        let conditions = form
            .validation_request(SectionKey::Conditions)
            .unwrap()
            .unwrap();
        assert_eq!(conditions.invalid_fields, vec!["temperature_setpoint_value"]);
        let notes = form.validation_request(SectionKey::Notes).unwrap().unwrap();
        assert!(notes.invalid_fields.is_empty());
        let sent: ReactionNotes = decode(&notes.body).unwrap();
        assert_eq!(sent.is_exothermic, Some(true));
    }

    #[test]
    fn removed_sections_have_no_request() {
        let (mut form, _) = loaded(&sample());
        let (workup, _) = form.workups.live().next().unwrap();
        let key = SectionKey::Workup(workup);
        assert_eq!(sections::remove(&mut form, workup), Some(vec![]));
        assert!(form.validation_request(key).is_none());
        assert!(!form.contains(key));
        assert!(form.unload().workups.is_empty());

        assert!(sections::undo(&mut form));
        let sent: ReactionWorkup =
            decode(&form.validation_request(key).unwrap().unwrap().body).unwrap();
        assert_eq!(sent.details, "EtOAc");
    }

    #[test]
    fn temperature_measurement_removal_revalidates_conditions() {
        let mut ids = SectionIds::default();
        let mut form = ReactionForm::default();
        let id = form.temperature.measurements.add(&mut ids);
        assert_eq!(
            sections::remove(&mut form, id),
            Some(vec![SectionKey::Temperature, SectionKey::Conditions])
        );
    }

    #[test]
    fn removal_anywhere_evicts_the_previous_buffer() {
        let (mut form, mut ids) = loaded(&sample());
        let observation = form.observations.add(&mut ids);
        let (outcome, _) = form.outcomes.live().next().unwrap();

        sections::remove(&mut form, observation);
        sections::remove(&mut form, outcome);
        assert!(sections::undo(&mut form));
        assert_eq!(form.outcomes.live_count(), 1);
        assert_eq!(form.observations.live_count(), 0);
        assert!(!sections::undo(&mut form));
    }

    #[test]
    fn sidebar_lists_workups_by_type() {
        let (mut form, mut ids) = loaded(&sample());
        form.workups.add(&mut ids);
        let labels: Vec<_> = form
            .sidebar_entries()
            .into_iter()
            .map(|entry| entry.label)
            .collect();
        assert_eq!(
            labels,
            vec![
                "Conditions",
                "Notes",
                "Observations",
                "Workups",
                "EXTRACTION",
                "(Workup #2)",
                "Outcomes"
            ]
        );
    }

    #[test]
    fn outcome_added_by_default_is_validated() {
        let (form, _) = loaded(&Reaction::default());
        let (id, _) = form.outcomes.live().next().unwrap();
        let request = form
            .validation_request(SectionKey::Outcome(id))
            .unwrap()
            .unwrap();
        let sent: ReactionOutcome = decode(&request.body).unwrap();
        assert_eq!(sent, ReactionOutcome::default());
    }
}
