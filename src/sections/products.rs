use super::{write_opt_float, AmountForm, TypedFields};
use crate::codec::non_empty;
use crate::enums::{MASS_SPEC_TYPE, PRODUCT_MEASUREMENT_TYPE, SELECTIVITY_TYPE, TEXTURE_TYPE};
use crate::form::{
    MetricFields, OptionalBoolSelector, SectionForm, SectionId, SectionIds, SectionKey,
    SectionList, SectionTree, TextField, TextKind,
};
use crate::metric_fields;
use crate::record::{
    Extra, FloatValue, MassSpecMeasurementDetails, Metric, Percentage, ProductCompound,
    ProductMeasurement, Selectivity, Texture, Time, Wavelength,
};

#[derive(Debug, Clone, PartialEq)]
pub struct ProductForm {
    pub desired: OptionalBoolSelector,
    pub measurements: SectionList<ProductMeasurementForm>,
    pub color: TextField,
    pub texture: TypedFields,
    extra: Extra,
}

impl Default for ProductForm {
    fn default() -> Self {
        Self {
            desired: OptionalBoolSelector::default(),
            measurements: SectionList::default(),
            color: TextField::free("outcome_product_color"),
            texture: TypedFields::new(&TEXTURE_TYPE, "outcome_product_texture_details"),
            extra: Extra::new(),
        }
    }
}

impl ProductForm {
    /// Clear measurement references to an analysis that was renamed or removed.
    pub fn forget_analysis(&mut self, key: &str) {
        for (_, measurement) in self.measurements.live_mut() {
            if measurement.analysis_key == key {
                measurement.analysis_key.clear();
            }
        }
    }
}

impl SectionForm for ProductForm {
    type Record = ProductCompound;

    fn load(&mut self, product: &ProductCompound, ids: &mut SectionIds) {
        self.desired.set(product.is_desired_product);
        self.measurements.load_all(&product.measurements, ids);
        self.color.set_text(product.isolated_color.as_str());
        if let Some(texture) = &product.texture {
            self.texture.write(texture.kind, &texture.details);
        }
        self.extra = product.extra.clone();
    }

    fn unload(&self) -> ProductCompound {
        ProductCompound {
            is_desired_product: self.desired.get(),
            measurements: self.measurements.unload_all(),
            isolated_color: self.color.text().to_string(),
            texture: non_empty(Texture {
                kind: self.texture.kind(),
                details: self.texture.details(),
            }),
            extra: self.extra.clone(),
        }
    }

    fn collect_invalid(&self, out: &mut Vec<&'static str>) {
        self.measurements.collect_invalid(out);
    }
}

impl SectionTree for ProductForm {
    fn scope(id: SectionId) -> Option<SectionKey> {
        Some(SectionKey::Product(id))
    }

    fn remove_section(&mut self, id: SectionId) -> Option<Vec<SectionKey>> {
        self.measurements.remove_section(id)
    }

    fn purge_removed_except(&mut self, keep: SectionId) {
        self.measurements.purge_removed_except(keep);
    }

    fn restore_removed(&mut self) -> bool {
        self.measurements.restore_removed()
    }
}

/// Which member of the measurement value oneof is being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasurementValueKind {
    Percentage,
    Float,
    String,
    Amount,
}

impl MeasurementValueKind {
    pub const ALL: [MeasurementValueKind; 4] = [
        MeasurementValueKind::Percentage,
        MeasurementValueKind::Float,
        MeasurementValueKind::String,
        MeasurementValueKind::Amount,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MeasurementValueKind::Percentage => "percentage",
            MeasurementValueKind::Float => "float",
            MeasurementValueKind::String => "string",
            MeasurementValueKind::Amount => "amount",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductMeasurementForm {
    /// Name of an analysis in the enclosing outcome, or empty.
    pub analysis_key: String,
    pub kind: TypedFields,
    pub uses_internal_standard: OptionalBoolSelector,
    pub is_normalized: OptionalBoolSelector,
    pub uses_authentic_standard: OptionalBoolSelector,
    value_kind: Option<MeasurementValueKind>,
    pub value: TextField,
    pub precision: TextField,
    pub amount: AmountForm,
    pub retention_time: MetricFields,
    pub mass_spec: TypedFields,
    pub tic_minimum_mz: TextField,
    pub tic_maximum_mz: TextField,
    pub selectivity: TypedFields,
    pub wavelength: MetricFields,
    extra: Extra,
}

impl Default for ProductMeasurementForm {
    fn default() -> Self {
        Self {
            analysis_key: String::new(),
            kind: TypedFields::new(&PRODUCT_MEASUREMENT_TYPE, "product_measurement_details"),
            uses_internal_standard: OptionalBoolSelector::default(),
            is_normalized: OptionalBoolSelector::default(),
            uses_authentic_standard: OptionalBoolSelector::default(),
            value_kind: None,
            value: TextField::float("product_measurement_value"),
            precision: TextField::float("product_measurement_precision"),
            amount: AmountForm::default(),
            retention_time: metric_fields!(Time, "product_measurement_retention_time"),
            mass_spec: TypedFields::new(&MASS_SPEC_TYPE, "product_measurement_mass_spec_details"),
            tic_minimum_mz: TextField::float("product_measurement_mass_spec_tic_minimum_mz"),
            tic_maximum_mz: TextField::float("product_measurement_mass_spec_tic_maximum_mz"),
            selectivity: TypedFields::new(
                &SELECTIVITY_TYPE,
                "product_measurement_selectivity_details",
            ),
            wavelength: metric_fields!(Wavelength, "product_measurement_wavelength"),
            extra: Extra::new(),
        }
    }
}

impl ProductMeasurementForm {
    pub fn value_kind(&self) -> Option<MeasurementValueKind> {
        self.value_kind
    }

    /// Radio change. String values are free text; the others are floats.
    pub fn set_value_kind(&mut self, kind: MeasurementValueKind) {
        self.value_kind = Some(kind);
        let text_kind = match kind {
            MeasurementValueKind::String => TextKind::Free,
            _ => TextKind::Float,
        };
        self.value.set_kind(text_kind);
    }

    fn write_scalar<M: Metric>(&mut self, kind: MeasurementValueKind, metric: &M) {
        self.set_value_kind(kind);
        write_opt_float(&mut self.value, metric.value());
        write_opt_float(&mut self.precision, metric.precision());
    }

    fn read_scalar<M: Metric>(&self) -> Option<M> {
        let mut metric = M::default();
        if let Some(value) = self.value.as_float() {
            metric.set_value(value);
        }
        if let Some(precision) = self.precision.as_float() {
            metric.set_precision(precision);
        }
        non_empty(metric)
    }
}

impl SectionForm for ProductMeasurementForm {
    type Record = ProductMeasurement;

    fn load(&mut self, m: &ProductMeasurement, ids: &mut SectionIds) {
        self.analysis_key = m.analysis_key.clone();
        self.kind.write(m.kind, &m.details);
        self.uses_internal_standard.set(m.uses_internal_standard);
        self.is_normalized.set(m.is_normalized);
        self.uses_authentic_standard.set(m.uses_authentic_standard);

        if let Some(percentage) = &m.percentage {
            self.write_scalar(MeasurementValueKind::Percentage, percentage);
        } else if let Some(float_value) = &m.float_value {
            self.write_scalar(MeasurementValueKind::Float, float_value);
        } else if let Some(text) = m.string_value.as_deref().filter(|s| !s.is_empty()) {
            self.set_value_kind(MeasurementValueKind::String);
            self.value.set_text(text);
        } else if let Some(amount) = &m.amount {
            self.set_value_kind(MeasurementValueKind::Amount);
            self.amount.load(amount, ids);
        }

        self.retention_time.write(m.retention_time.as_ref());
        if let Some(details) = &m.mass_spec_details {
            self.mass_spec.write(details.kind, &details.details);
            write_opt_float(&mut self.tic_minimum_mz, details.tic_minimum_mz);
            write_opt_float(&mut self.tic_maximum_mz, details.tic_maximum_mz);
        }
        if let Some(selectivity) = &m.selectivity {
            self.selectivity.write(selectivity.kind, &selectivity.details);
        }
        self.wavelength.write(m.wavelength.as_ref());
        self.extra = m.extra.clone();
    }

    fn unload(&self) -> ProductMeasurement {
        let mut m = ProductMeasurement {
            analysis_key: self.analysis_key.clone(),
            kind: self.kind.kind(),
            details: self.kind.details(),
            uses_internal_standard: self.uses_internal_standard.get(),
            is_normalized: self.is_normalized.get(),
            uses_authentic_standard: self.uses_authentic_standard.get(),
            retention_time: non_empty(self.retention_time.read::<Time>()),
            mass_spec_details: non_empty(MassSpecMeasurementDetails {
                kind: self.mass_spec.kind(),
                details: self.mass_spec.details(),
                tic_minimum_mz: self.tic_minimum_mz.as_float(),
                tic_maximum_mz: self.tic_maximum_mz.as_float(),
            }),
            selectivity: non_empty(Selectivity {
                kind: self.selectivity.kind(),
                details: self.selectivity.details(),
            }),
            wavelength: non_empty(self.wavelength.read::<Wavelength>()),
            extra: self.extra.clone(),
            ..Default::default()
        };
        match self.value_kind {
            Some(MeasurementValueKind::Percentage) => m.percentage = self.read_scalar::<Percentage>(),
            Some(MeasurementValueKind::Float) => m.float_value = self.read_scalar::<FloatValue>(),
            Some(MeasurementValueKind::String) => {
                m.string_value = Some(self.value.text().to_string()).filter(|s| !s.is_empty());
            }
            Some(MeasurementValueKind::Amount) => m.amount = non_empty(self.amount.unload()),
            None => {}
        }
        m
    }

    fn collect_invalid(&self, out: &mut Vec<&'static str>) {
        match self.value_kind {
            Some(MeasurementValueKind::Amount) => self.amount.collect_invalid(out),
            Some(_) => {
                self.value.collect_invalid(out);
                self.precision.collect_invalid(out);
            }
            None => {}
        }
        self.retention_time.collect_invalid(out);
        self.tic_minimum_mz.collect_invalid(out);
        self.tic_maximum_mz.collect_invalid(out);
        self.wavelength.collect_invalid(out);
    }
}

impl SectionTree for ProductMeasurementForm {
    fn scope(id: SectionId) -> Option<SectionKey> {
        Some(SectionKey::ProductMeasurement(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{Amount, Mass};

    fn load(m: &ProductMeasurement) -> ProductMeasurementForm {
        let mut form = ProductMeasurementForm::default();
        form.load(m, &mut SectionIds::default());
        form
    }

    #[test]
    fn yield_percentage_round_trips() {
        let m = ProductMeasurement {
            analysis_key: "weight".into(),
            kind: 3,
            percentage: Some(Percentage {
                value: Some(87.5),
                precision: Some(0.5),
            }),
            ..Default::default()
        };
        let form = load(&m);
        assert_eq!(form.value_kind(), Some(MeasurementValueKind::Percentage));
        assert_eq!(form.value.kind(), TextKind::Float);
        assert_eq!(form.unload(), m);
    }

    #[test]
    fn string_values_are_free_text() {
        let m = ProductMeasurement {
            kind: 2,
            string_value: Some("white solid, 1.2.3".into()),
            ..Default::default()
        };
        let mut form = load(&m);
        assert_eq!(form.value.kind(), TextKind::Free);
        form.value.blur();
        assert!(!form.value.is_invalid());
        assert_eq!(form.unload(), m);
    }

    #[test]
    fn amount_values_use_the_amount_widget() {
        let m = ProductMeasurement {
            kind: 9,
            amount: Some(Amount {
                mass: Some(Mass {
                    value: Some(1.5),
                    precision: None,
                    units: 3,
                }),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert_eq!(load(&m).unload(), m);
    }

    #[test]
    fn mass_spec_bounds_are_floats() {
        let m = ProductMeasurement {
            mass_spec_details: Some(MassSpecMeasurementDetails {
                kind: 2,
                details: String::new(),
                tic_minimum_mz: Some(50.0),
                tic_maximum_mz: Some(1000.0),
            }),
            ..Default::default()
        };
        assert_eq!(load(&m).unload(), m);
    }

    #[test]
    fn forgetting_an_analysis_clears_references() {
        let mut ids = SectionIds::default();
        let mut product = ProductForm::default();
        let a = product.measurements.add(&mut ids);
        let b = product.measurements.add(&mut ids);
        product.measurements.get_mut(a).unwrap().analysis_key = "lc".into();
        product.measurements.get_mut(b).unwrap().analysis_key = "nmr".into();

        product.forget_analysis("lc");
        assert_eq!(product.measurements.get(a).unwrap().analysis_key, "");
        assert_eq!(product.measurements.get(b).unwrap().analysis_key, "nmr");
    }

    #[test]
    fn product_identifiers_pass_through() {
        let mut product = ProductCompound {
            isolated_color: "white".into(),
            ..Default::default()
        };
        product
            .extra
            .insert("identifiers".into(), serde_json::json!([{"type": 2, "value": "CCO"}]));
        let mut form = ProductForm::default();
        form.load(&product, &mut SectionIds::default());
        assert_eq!(form.unload(), product);
    }
}
