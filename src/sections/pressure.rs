use super::TypedFields;
use crate::codec::non_empty;
use crate::enums::{ATMOSPHERE_TYPE, PRESSURE_CONTROL_TYPE, PRESSURE_MEASUREMENT_TYPE};
use crate::form::{
    MetricFields, SectionForm, SectionId, SectionIds, SectionKey, SectionList, SectionTree,
};
use crate::metric_fields;
use crate::record::{Atmosphere, Pressure, PressureConditions, PressureControl, PressureMeasurement, Time};

#[derive(Debug, Clone, PartialEq)]
pub struct PressureForm {
    pub control: TypedFields,
    pub setpoint: MetricFields,
    pub atmosphere: TypedFields,
    pub measurements: SectionList<PressureMeasurementForm>,
}

impl Default for PressureForm {
    fn default() -> Self {
        Self {
            control: TypedFields::new(&PRESSURE_CONTROL_TYPE, "pressure_control_details"),
            setpoint: metric_fields!(Pressure, "pressure_setpoint"),
            atmosphere: TypedFields::new(&ATMOSPHERE_TYPE, "pressure_atmosphere_details"),
            measurements: SectionList::default(),
        }
    }
}

impl SectionForm for PressureForm {
    type Record = PressureConditions;

    fn load(&mut self, record: &PressureConditions, ids: &mut SectionIds) {
        if let Some(control) = &record.control {
            self.control.write(control.kind, &control.details);
        }
        self.measurements.load_all(&record.measurements, ids);
        self.setpoint.write(record.setpoint.as_ref());
        if let Some(atmosphere) = &record.atmosphere {
            self.atmosphere.write(atmosphere.kind, &atmosphere.details);
        }
    }

    fn unload(&self) -> PressureConditions {
        PressureConditions {
            control: non_empty(PressureControl {
                kind: self.control.kind(),
                details: self.control.details(),
            }),
            setpoint: non_empty(self.setpoint.read::<Pressure>()),
            atmosphere: non_empty(Atmosphere {
                kind: self.atmosphere.kind(),
                details: self.atmosphere.details(),
            }),
            measurements: self.measurements.unload_all(),
        }
    }

    fn collect_invalid(&self, out: &mut Vec<&'static str>) {
        self.setpoint.collect_invalid(out);
        self.measurements.collect_invalid(out);
    }
}

impl SectionTree for PressureForm {
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

#[derive(Debug, Clone, PartialEq)]
pub struct PressureMeasurementForm {
    pub kind: TypedFields,
    pub pressure: MetricFields,
    pub time: MetricFields,
}

impl Default for PressureMeasurementForm {
    fn default() -> Self {
        Self {
            kind: TypedFields::new(&PRESSURE_MEASUREMENT_TYPE, "pressure_measurement_details"),
            pressure: metric_fields!(Pressure, "pressure_measurement_pressure"),
            time: metric_fields!(Time, "pressure_measurement_time"),
        }
    }
}

impl SectionForm for PressureMeasurementForm {
    type Record = PressureMeasurement;

    fn load(&mut self, record: &PressureMeasurement, _ids: &mut SectionIds) {
        self.kind.write(record.kind, &record.details);
        self.pressure.write(record.pressure.as_ref());
        self.time.write(record.time.as_ref());
    }

    fn unload(&self) -> PressureMeasurement {
        PressureMeasurement {
            kind: self.kind.kind(),
            details: self.kind.details(),
            time: non_empty(self.time.read::<Time>()),
            pressure: non_empty(self.pressure.read::<Pressure>()),
        }
    }

    fn collect_invalid(&self, out: &mut Vec<&'static str>) {
        self.pressure.collect_invalid(out);
        self.time.collect_invalid(out);
    }
}

impl SectionTree for PressureMeasurementForm {}
