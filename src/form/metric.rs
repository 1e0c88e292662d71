//! Binds a (value, units, precision) record group to three sibling fields.

use super::selector::Selector;
use super::text::TextField;
use crate::record::Metric;

#[derive(Debug, Clone, PartialEq)]
pub struct MetricFields {
    pub value: TextField,
    pub precision: TextField,
    /// `None` for unitless groups.
    pub units: Option<Selector>,
}

impl MetricFields {
    /// Fields for metric type `M`, named `{prefix}_value`, `{prefix}_precision`.
    pub fn new<M: Metric>(value_name: &'static str, precision_name: &'static str) -> Self {
        Self {
            value: TextField::float(value_name),
            precision: TextField::float(precision_name),
            units: M::units_table().map(Selector::new),
        }
    }

    /// Unload: unparseable value/precision text is skipped, not an error.
    pub fn read<M: Metric>(&self) -> M {
        let mut metric = M::default();
        if let Some(value) = self.value.as_float() {
            metric.set_value(value);
        }
        if let Some(units) = &self.units {
            metric.set_units(units.get());
        }
        if let Some(precision) = self.precision.as_float() {
            metric.set_precision(precision);
        }
        metric
    }

    /// Load: only present values are written, so an unset value leaves the
    /// field untouched while an explicit zero shows "0". `None` is a no-op.
    pub fn write<M: Metric>(&mut self, metric: Option<&M>) {
        let Some(metric) = metric else {
            return;
        };
        if let Some(value) = metric.value() {
            self.value.set_float(value);
        }
        if let Some(units) = self.units.as_mut() {
            units.set(metric.units());
        }
        if let Some(precision) = metric.precision() {
            self.precision.set_float(precision);
        }
    }

    pub fn collect_invalid(&self, out: &mut Vec<&'static str>) {
        self.value.collect_invalid(out);
        self.precision.collect_invalid(out);
    }
}

/// Declare `MetricFields` with conventional `{prefix}_value`/`{prefix}_precision` names.
#[macro_export]
macro_rules! metric_fields {
    ($ty:ty, $prefix:literal) => {
        $crate::form::metric::MetricFields::new::<$ty>(
            concat!($prefix, "_value"),
            concat!($prefix, "_precision"),
        )
    };
}

#[cfg(test)]
mod tests {
    use crate::record::{Mass, Percentage, Time};

    #[test]
    fn loads_and_unloads_a_mass() {
        let mass = Mass {
            value: Some(12.5),
            precision: Some(2.0),
            units: 2,
        };
        let mut fields = crate::metric_fields!(Mass, "amount");
        fields.write(Some(&mass));
        assert_eq!(fields.value.text(), "12.5");
        assert_eq!(fields.precision.text(), "2");
        assert_eq!(fields.units.as_ref().map(|u| u.text()), Some("GRAM"));
        assert_eq!(fields.read::<Mass>(), mass);
    }

    #[test]
    fn unset_stays_distinct_from_zero() {
        let mut fields = crate::metric_fields!(Time, "outcome_time");
        fields.write(Some(&Time {
            value: Some(0.0),
            precision: None,
            units: 0,
        }));
        assert_eq!(fields.value.text(), "0");
        assert_eq!(fields.precision.text(), "");
        let time: Time = fields.read();
        assert_eq!(time.value, Some(0.0));
        assert_eq!(time.precision, None);
    }

    #[test]
    fn missing_group_is_a_no_op() {
        let mut fields = crate::metric_fields!(Time, "observation_time");
        fields.value.set_text("5");
        fields.write::<Time>(None);
        assert_eq!(fields.value.text(), "5");
    }

    #[test]
    fn unitless_groups_skip_the_unit_selector() {
        let mut fields = crate::metric_fields!(Percentage, "outcome_conversion");
        assert!(fields.units.is_none());
        fields.value.set_text("87.5");
        fields.precision.set_text("not a number");
        let conversion: Percentage = fields.read();
        assert_eq!(conversion.value, Some(87.5));
        assert_eq!(conversion.precision, None);
    }

    #[test]
    fn unknown_unit_code_keeps_default() {
        let mut fields = crate::metric_fields!(Mass, "amount");
        fields.write(Some(&Mass {
            value: Some(1.0),
            precision: None,
            units: 77,
        }));
        assert_eq!(fields.read::<Mass>().units, 0);
    }
}
