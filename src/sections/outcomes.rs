use super::{DataForm, ProductForm, TypedFields};
use crate::codec::{is_empty_message, non_empty};
use crate::enums::ANALYSIS_TYPE;
use crate::form::{
    MetricFields, OptionalBoolSelector, SectionForm, SectionId, SectionIds, SectionKey,
    SectionList, SectionTree, TextField,
};
use crate::metric_fields;
use crate::record::{Analysis, Data, DateTime, Percentage, ReactionOutcome, Time};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq)]
pub struct OutcomeForm {
    pub time: MetricFields,
    pub conversion: MetricFields,
    pub analyses: SectionList<AnalysisForm>,
    pub products: SectionList<ProductForm>,
}

impl Default for OutcomeForm {
    fn default() -> Self {
        Self {
            time: metric_fields!(Time, "outcome_time"),
            conversion: metric_fields!(Percentage, "outcome_conversion"),
            analyses: SectionList::default(),
            products: SectionList::default(),
        }
    }
}

impl OutcomeForm {
    /// Non-empty names of live analyses, offered as product measurement keys.
    pub fn analysis_names(&self) -> Vec<String> {
        self.analyses
            .live()
            .map(|(_, analysis)| analysis.name.text())
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Rename analysis `id`. Measurements keyed by the old name lose their key.
    pub fn rename_analysis(&mut self, id: SectionId, name: &str) {
        let Some(analysis) = self.analyses.get_mut(id) else {
            return;
        };
        let old = analysis.name.text().to_string();
        analysis.name.set_text(name);
        if !old.is_empty() && old != name {
            for (_, product) in self.products.live_mut() {
                product.forget_analysis(&old);
            }
        }
    }
}

impl SectionForm for OutcomeForm {
    type Record = ReactionOutcome;

    fn load(&mut self, outcome: &ReactionOutcome, ids: &mut SectionIds) {
        self.time.write(outcome.reaction_time.as_ref());
        self.conversion.write(outcome.conversion.as_ref());
        self.analyses.clear();
        for (name, analysis) in &outcome.analyses {
            let mut form = AnalysisForm::default();
            form.name.set_text(name.as_str());
            form.load(analysis, ids);
            self.analyses.push(ids, form);
        }
        self.products.load_all(&outcome.products, ids);
    }

    fn unload(&self) -> ReactionOutcome {
        let mut analyses = BTreeMap::new();
        for (_, form) in self.analyses.live() {
            let name = form.name.text();
            let analysis = form.unload();
            if !name.is_empty() || !is_empty_message(&analysis) {
                analyses.insert(name.to_string(), analysis);
            }
        }
        ReactionOutcome {
            reaction_time: non_empty(self.time.read::<Time>()),
            conversion: non_empty(self.conversion.read::<Percentage>()),
            products: self.products.unload_all(),
            analyses,
        }
    }

    fn collect_invalid(&self, out: &mut Vec<&'static str>) {
        self.time.collect_invalid(out);
        self.conversion.collect_invalid(out);
        self.analyses.collect_invalid(out);
        self.products.collect_invalid(out);
    }
}

impl SectionTree for OutcomeForm {
    fn scope(id: SectionId) -> Option<SectionKey> {
        Some(SectionKey::Outcome(id))
    }

    fn remove_section(&mut self, id: SectionId) -> Option<Vec<SectionKey>> {
        self.analyses
            .remove_section(id)
            .or_else(|| self.products.remove_section(id))
    }

    fn purge_removed_except(&mut self, keep: SectionId) {
        self.analyses.purge_removed_except(keep);
        self.products.purge_removed_except(keep);
    }

    fn restore_removed(&mut self) -> bool {
        let analysis = self.analyses.restore_removed();
        let product = self.products.restore_removed();
        analysis || product
    }
}

/// An analysis, keyed in its outcome by the editable `name`.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisForm {
    pub name: TextField,
    pub kind: TypedFields,
    pub chmo_id: TextField,
    pub data: SectionList<NamedDataForm>,
    pub manufacturer: TextField,
    pub calibrated: TextField,
    pub isolated_species: OptionalBoolSelector,
}

impl Default for AnalysisForm {
    fn default() -> Self {
        Self {
            name: TextField::free("outcome_analysis_name"),
            kind: TypedFields::new(&ANALYSIS_TYPE, "outcome_analysis_details"),
            chmo_id: TextField::integer("outcome_analysis_chmo_id"),
            data: SectionList::default(),
            manufacturer: TextField::free("outcome_analysis_manufacturer"),
            calibrated: TextField::free("outcome_analysis_calibrated"),
            isolated_species: OptionalBoolSelector::default(),
        }
    }
}

impl SectionForm for AnalysisForm {
    type Record = Analysis;

    /// The name is the map key and is set by the caller.
    fn load(&mut self, analysis: &Analysis, ids: &mut SectionIds) {
        self.kind.write(analysis.kind, &analysis.details);
        if analysis.chmo_id != 0 {
            self.chmo_id.set_integer(analysis.chmo_id);
        }
        self.data.clear();
        for (name, data) in &analysis.data {
            let mut form = NamedDataForm::default();
            form.name.set_text(name.as_str());
            form.data.load(data, ids);
            self.data.push(ids, form);
        }
        self.manufacturer
            .set_text(analysis.instrument_manufacturer.as_str());
        if let Some(calibrated) = &analysis.instrument_last_calibrated {
            self.calibrated.set_text(calibrated.value.as_str());
        }
        self.isolated_species.set(analysis.is_of_isolated_species);
    }

    fn unload(&self) -> Analysis {
        let mut data = BTreeMap::new();
        for (_, entry) in self.data.live() {
            let (name, value) = entry.unload();
            if !name.is_empty() || !is_empty_message(&value) {
                data.insert(name, value);
            }
        }
        Analysis {
            kind: self.kind.kind(),
            details: self.kind.details(),
            chmo_id: self.chmo_id.as_integer().unwrap_or_default(),
            is_of_isolated_species: self.isolated_species.get(),
            data,
            instrument_manufacturer: self.manufacturer.text().to_string(),
            instrument_last_calibrated: non_empty(DateTime {
                value: self.calibrated.text().to_string(),
            }),
        }
    }

    fn collect_invalid(&self, out: &mut Vec<&'static str>) {
        self.chmo_id.collect_invalid(out);
        for (_, entry) in self.data.live() {
            entry.data.collect_invalid(out);
        }
    }
}

impl SectionTree for AnalysisForm {
    fn scope(id: SectionId) -> Option<SectionKey> {
        Some(SectionKey::Analysis(id))
    }

    fn remove_section(&mut self, id: SectionId) -> Option<Vec<SectionKey>> {
        self.data.remove_section(id)
    }

    fn purge_removed_except(&mut self, keep: SectionId) {
        self.data.purge_removed_except(keep);
    }

    fn restore_removed(&mut self) -> bool {
        self.data.restore_removed()
    }
}

/// One entry of an analysis data map.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedDataForm {
    pub name: TextField,
    pub data: DataForm,
}

impl Default for NamedDataForm {
    fn default() -> Self {
        Self {
            name: TextField::free("outcome_data_name"),
            data: DataForm::default(),
        }
    }
}

impl SectionTree for NamedDataForm {}

impl NamedDataForm {
    pub fn unload(&self) -> (String, Data) {
        (self.name.text().to_string(), self.data.unload())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::sections;
    use crate::record::{ProductCompound, ProductMeasurement};

    fn outcome() -> ReactionOutcome {
        let mut analyses = BTreeMap::new();
        let mut data = BTreeMap::new();
        data.insert(
            "trace".to_string(),
            Data {
                url: Some("https://example.org/trace.csv".into()),
                ..Default::default()
            },
        );
        analyses.insert(
            "lc".to_string(),
            Analysis {
                kind: 2,
                chmo_id: 1000,
                data,
                ..Default::default()
            },
        );
        analyses.insert(
            "weight".to_string(),
            Analysis {
                kind: 14,
                instrument_last_calibrated: Some(DateTime {
                    value: "2020-01-01".into(),
                }),
                ..Default::default()
            },
        );
        ReactionOutcome {
            reaction_time: Some(Time {
                value: Some(16.0),
                precision: None,
                units: 2,
            }),
            conversion: Some(Percentage {
                value: Some(95.0),
                precision: None,
            }),
            products: vec![ProductCompound {
                is_desired_product: Some(true),
                measurements: vec![ProductMeasurement {
                    analysis_key: "lc".into(),
                    kind: 5,
                    ..Default::default()
                }],
                ..Default::default()
            }],
            analyses,
        }
    }

    fn loaded() -> (OutcomeForm, SectionIds) {
        let mut ids = SectionIds::default();
        let mut form = OutcomeForm::default();
        form.load(&outcome(), &mut ids);
        (form, ids)
    }

    #[test]
    fn outcome_round_trips() {
        let (form, _) = loaded();
        assert_eq!(form.analysis_names(), vec!["lc", "weight"]);
        assert_eq!(form.unload(), outcome());
    }

    #[test]
    fn unnamed_empty_analyses_are_dropped() {
        let (mut form, mut ids) = loaded();
        form.analyses.add(&mut ids);
        assert_eq!(form.unload().analyses.len(), 2);
    }

    #[test]
    fn renaming_an_analysis_clears_measurement_keys() {
        let (mut form, _) = loaded();
        let (lc, _) = form.analyses.live().next().unwrap();
        form.rename_analysis(lc, "hplc");
        let outcome = form.unload();
        assert!(outcome.analyses.contains_key("hplc"));
        assert_eq!(outcome.products[0].measurements[0].analysis_key, "");
        assert_eq!(outcome.products[0].measurements[0].kind, 5);
    }

    #[test]
    fn removing_a_product_measurement_reports_its_ancestors() {
        let (mut form, _) = loaded();
        let (product, _) = form.products.live().next().unwrap();
        let (measurement, _) = form
            .products
            .get(product)
            .unwrap()
            .measurements
            .live()
            .next()
            .unwrap();
        assert_eq!(
            sections::remove(&mut form, measurement),
            Some(vec![SectionKey::Product(product)])
        );
        assert!(form.unload().products[0].measurements.is_empty());
        assert!(sections::undo(&mut form));
        assert_eq!(form.unload(), outcome());
    }
}
