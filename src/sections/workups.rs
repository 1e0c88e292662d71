use super::{AmountForm, StirringForm, TemperatureForm, TypedFields};
use crate::codec::non_empty;
use crate::enums::WORKUP_TYPE;
use crate::form::{
    MetricFields, OptionalBoolSelector, SectionForm, SectionId, SectionIds, SectionKey,
    SectionTree, TextField,
};
use crate::metric_fields;
use crate::record::{Extra, ReactionWorkup, Time};

#[derive(Debug, Clone, PartialEq)]
pub struct WorkupForm {
    pub kind: TypedFields,
    pub duration: MetricFields,
    pub amount: AmountForm,
    pub temperature: TemperatureForm,
    pub keep_phase: TextField,
    pub stirring: StirringForm,
    pub target_ph: TextField,
    pub automated: OptionalBoolSelector,
    /// The workup input compound, edited elsewhere.
    extra: Extra,
}

impl Default for WorkupForm {
    fn default() -> Self {
        Self {
            kind: TypedFields::new(&WORKUP_TYPE, "workup_details"),
            duration: metric_fields!(Time, "workup_duration"),
            amount: AmountForm::default(),
            temperature: TemperatureForm::default(),
            keep_phase: TextField::free("workup_keep_phase"),
            stirring: StirringForm::default(),
            target_ph: TextField::float("workup_target_ph"),
            automated: OptionalBoolSelector::default(),
            extra: Extra::new(),
        }
    }
}

impl SectionForm for WorkupForm {
    type Record = ReactionWorkup;

    fn load(&mut self, workup: &ReactionWorkup, ids: &mut SectionIds) {
        self.kind.write(workup.kind, &workup.details);
        self.duration.write(workup.duration.as_ref());
        if let Some(amount) = &workup.amount {
            self.amount.load(amount, ids);
        }
        if let Some(temperature) = &workup.temperature {
            self.temperature.load(temperature, ids);
        }
        self.keep_phase.set_text(workup.keep_phase.as_str());
        if let Some(stirring) = &workup.stirring {
            self.stirring.load(stirring, ids);
        }
        super::write_opt_float(&mut self.target_ph, workup.target_ph);
        self.automated.set(workup.is_automated);
        self.extra = workup.extra.clone();
    }

    fn unload(&self) -> ReactionWorkup {
        ReactionWorkup {
            kind: self.kind.kind(),
            details: self.kind.details(),
            duration: non_empty(self.duration.read::<Time>()),
            amount: non_empty(self.amount.unload()),
            temperature: non_empty(self.temperature.unload()),
            keep_phase: self.keep_phase.text().to_string(),
            stirring: non_empty(self.stirring.unload()),
            target_ph: self.target_ph.as_float(),
            is_automated: self.automated.get(),
            extra: self.extra.clone(),
        }
    }

    fn collect_invalid(&self, out: &mut Vec<&'static str>) {
        self.duration.collect_invalid(out);
        self.amount.collect_invalid(out);
        self.temperature.collect_invalid(out);
        self.stirring.collect_invalid(out);
        self.target_ph.collect_invalid(out);
    }
}

impl SectionTree for WorkupForm {
    fn scope(id: SectionId) -> Option<SectionKey> {
        Some(SectionKey::Workup(id))
    }

    fn remove_section(&mut self, id: SectionId) -> Option<Vec<SectionKey>> {
        self.temperature.remove_section(id)
    }

    fn purge_removed_except(&mut self, keep: SectionId) {
        self.temperature.purge_removed_except(keep);
    }

    fn restore_removed(&mut self) -> bool {
        self.temperature.restore_removed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{sections, SectionList};
    use crate::record::{
        Amount, StirringConditions, StirringRate, Temperature, TemperatureConditions,
        TemperatureMeasurement, Volume,
    };
    use serde_json::json;

    fn workup() -> ReactionWorkup {
        let mut workup = ReactionWorkup {
            kind: 6,
            details: "EtOAc".into(),
            amount: Some(Amount {
                volume: Some(Volume {
                    value: Some(50.0),
                    precision: None,
                    units: 1,
                }),
                ..Default::default()
            }),
            temperature: Some(TemperatureConditions {
                measurements: vec![TemperatureMeasurement {
                    temperature: Some(Temperature {
                        value: Some(0.0),
                        precision: None,
                        units: 1,
                    }),
                    ..Default::default()
                }],
                ..Default::default()
            }),
            keep_phase: "organic".into(),
            stirring: Some(StirringConditions {
                rate: Some(StirringRate {
                    kind: 2,
                    details: String::new(),
                    rpm: 0,
                }),
                ..Default::default()
            }),
            target_ph: Some(7.0),
            is_automated: Some(false),
            ..Default::default()
        };
        workup
            .extra
            .insert("input".into(), json!({"components": [{"identifiers": []}]}));
        workup
    }

    #[test]
    fn workup_round_trips_with_input_passthrough() {
        let mut form = WorkupForm::default();
        form.load(&workup(), &mut SectionIds::default());
        assert_eq!(form.unload(), workup());
    }

    #[test]
    fn nested_temperature_measurement_removal_scopes_to_the_workup() {
        let mut ids = SectionIds::default();
        let mut workups = SectionList::<WorkupForm>::default();
        let w = workups.add(&mut ids);
        let m = workups
            .get_mut(w)
            .unwrap()
            .temperature
            .measurements
            .add(&mut ids);
        assert_eq!(sections::remove(&mut workups, m), Some(vec![SectionKey::Workup(w)]));
        assert!(sections::undo(&mut workups));
    }

    #[test]
    fn malformed_ph_is_reported() {
        let mut form = WorkupForm::default();
        form.target_ph.set_text("seven");
        form.target_ph.blur();
        let mut invalid = Vec::new();
        form.collect_invalid(&mut invalid);
        assert_eq!(invalid, vec!["workup_target_ph"]);
        assert_eq!(form.unload().target_ph, None);
    }
}
