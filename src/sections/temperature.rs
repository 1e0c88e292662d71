use super::TypedFields;
use crate::codec::non_empty;
use crate::enums::{TEMPERATURE_CONTROL_TYPE, TEMPERATURE_MEASUREMENT_TYPE};
use crate::form::{MetricFields, SectionForm, SectionId, SectionIds, SectionList, SectionTree};
use crate::metric_fields;
use crate::record::{
    Temperature, TemperatureConditions, TemperatureControl, TemperatureMeasurement, Time,
};

/// Temperature conditions. Also embedded in workups.
#[derive(Debug, Clone, PartialEq)]
pub struct TemperatureForm {
    pub control: TypedFields,
    pub setpoint: MetricFields,
    pub measurements: SectionList<TemperatureMeasurementForm>,
}

impl Default for TemperatureForm {
    fn default() -> Self {
        Self {
            control: TypedFields::new(&TEMPERATURE_CONTROL_TYPE, "temperature_control_details"),
            setpoint: metric_fields!(Temperature, "temperature_setpoint"),
            measurements: SectionList::default(),
        }
    }
}

impl SectionForm for TemperatureForm {
    type Record = TemperatureConditions;

    fn load(&mut self, record: &TemperatureConditions, ids: &mut SectionIds) {
        if let Some(control) = &record.control {
            self.control.write(control.kind, &control.details);
        }
        self.measurements.load_all(&record.measurements, ids);
        self.setpoint.write(record.setpoint.as_ref());
    }

    fn unload(&self) -> TemperatureConditions {
        TemperatureConditions {
            control: non_empty(TemperatureControl {
                kind: self.control.kind(),
                details: self.control.details(),
            }),
            setpoint: non_empty(self.setpoint.read::<Temperature>()),
            measurements: self.measurements.unload_all(),
        }
    }

    fn collect_invalid(&self, out: &mut Vec<&'static str>) {
        self.setpoint.collect_invalid(out);
        self.measurements.collect_invalid(out);
    }
}

impl SectionTree for TemperatureForm {
    fn remove_section(&mut self, id: SectionId) -> Option<Vec<crate::form::SectionKey>> {
        self.measurements.remove_section(id)
    }

    fn purge_removed_except(&mut self, keep: SectionId) {
        self.measurements.purge_removed_except(keep);
    }

    fn restore_removed(&mut self) -> bool {
        self.measurements.restore_removed()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TemperatureMeasurementForm {
    pub kind: TypedFields,
    pub temperature: MetricFields,
    pub time: MetricFields,
}

impl Default for TemperatureMeasurementForm {
    fn default() -> Self {
        Self {
            kind: TypedFields::new(
                &TEMPERATURE_MEASUREMENT_TYPE,
                "temperature_measurement_details",
            ),
            temperature: metric_fields!(Temperature, "temperature_measurement_temperature"),
            time: metric_fields!(Time, "temperature_measurement_time"),
        }
    }
}

impl SectionForm for TemperatureMeasurementForm {
    type Record = TemperatureMeasurement;

    fn load(&mut self, record: &TemperatureMeasurement, _ids: &mut SectionIds) {
        self.kind.write(record.kind, &record.details);
        self.temperature.write(record.temperature.as_ref());
        self.time.write(record.time.as_ref());
    }

    fn unload(&self) -> TemperatureMeasurement {
        TemperatureMeasurement {
            kind: self.kind.kind(),
            details: self.kind.details(),
            time: non_empty(self.time.read::<Time>()),
            temperature: non_empty(self.temperature.read::<Temperature>()),
        }
    }

    fn collect_invalid(&self, out: &mut Vec<&'static str>) {
        self.temperature.collect_invalid(out);
        self.time.collect_invalid(out);
    }
}

impl SectionTree for TemperatureMeasurementForm {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::sections;

    fn conditions() -> TemperatureConditions {
        TemperatureConditions {
            control: Some(TemperatureControl {
                kind: 3,
                details: "oil bath".into(),
            }),
            setpoint: Some(Temperature {
                value: Some(80.0),
                precision: None,
                units: 1,
            }),
            measurements: vec![
                TemperatureMeasurement {
                    kind: 2,
                    temperature: Some(Temperature {
                        value: Some(79.5),
                        precision: Some(0.5),
                        units: 1,
                    }),
                    ..Default::default()
                },
                TemperatureMeasurement {
                    details: "after quench".into(),
                    time: Some(Time {
                        value: Some(2.0),
                        precision: None,
                        units: 2,
                    }),
                    ..Default::default()
                },
            ],
        }
    }

    #[test]
    fn load_unload_reproduces_the_record() {
        let mut ids = SectionIds::default();
        let mut form = TemperatureForm::default();
        form.load(&conditions(), &mut ids);
        assert_eq!(form.control.details.text(), "oil bath");
        assert_eq!(form.measurements.live_count(), 2);
        assert_eq!(form.unload(), conditions());
    }

    #[test]
    fn empty_form_unloads_to_an_empty_record() {
        let mut ids = SectionIds::default();
        let mut form = TemperatureForm::default();
        form.measurements.add(&mut ids);
        assert_eq!(form.unload(), TemperatureConditions::default());
    }

    #[test]
    fn removed_measurements_are_skipped() {
        let mut ids = SectionIds::default();
        let mut form = TemperatureForm::default();
        form.load(&conditions(), &mut ids);
        let (first, _) = form.measurements.live().next().unwrap();
        sections::remove(&mut form, first);
        assert_eq!(form.unload().measurements.len(), 1);
        sections::undo(&mut form);
        assert_eq!(form.unload(), conditions());
    }
}
