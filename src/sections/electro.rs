use super::TypedFields;
use crate::codec::non_empty;
use crate::enums::{ELECTROCHEMISTRY_CELL_TYPE, ELECTROCHEMISTRY_TYPE};
use crate::form::{
    MetricFields, SectionForm, SectionId, SectionIds, SectionKey, SectionList, SectionTree,
    TextField,
};
use crate::metric_fields;
use crate::record::{
    Current, ElectrochemistryCell, ElectrochemistryConditions, ElectrochemistryMeasurement,
    ElectrochemistryType, Length, Time, Voltage,
};

#[derive(Debug, Clone, PartialEq)]
pub struct ElectroForm {
    pub kind: TypedFields,
    pub current: MetricFields,
    pub voltage: MetricFields,
    pub anode: TextField,
    pub cathode: TextField,
    pub separation: MetricFields,
    pub cell: TypedFields,
    pub measurements: SectionList<ElectroMeasurementForm>,
}

impl Default for ElectroForm {
    fn default() -> Self {
        Self {
            kind: TypedFields::new(&ELECTROCHEMISTRY_TYPE, "electro_details"),
            current: metric_fields!(Current, "electro_current"),
            voltage: metric_fields!(Voltage, "electro_voltage"),
            anode: TextField::free("electro_anode"),
            cathode: TextField::free("electro_cathode"),
            separation: metric_fields!(Length, "electro_separation"),
            cell: TypedFields::new(&ELECTROCHEMISTRY_CELL_TYPE, "electro_cell_details"),
            measurements: SectionList::default(),
        }
    }
}

impl SectionForm for ElectroForm {
    type Record = ElectrochemistryConditions;

    fn load(&mut self, record: &ElectrochemistryConditions, ids: &mut SectionIds) {
        if let Some(kind) = &record.electrochemistry_type {
            self.kind.write(kind.kind, &kind.details);
        }
        self.current.write(record.current.as_ref());
        self.voltage.write(record.voltage.as_ref());
        self.anode.set_text(record.anode_material.as_str());
        self.cathode.set_text(record.cathode_material.as_str());
        self.separation.write(record.electrode_separation.as_ref());
        if let Some(cell) = &record.cell {
            self.cell.write(cell.kind, &cell.details);
        }
        self.measurements.load_all(&record.measurements, ids);
    }

    fn unload(&self) -> ElectrochemistryConditions {
        ElectrochemistryConditions {
            electrochemistry_type: non_empty(ElectrochemistryType {
                kind: self.kind.kind(),
                details: self.kind.details(),
            }),
            current: non_empty(self.current.read::<Current>()),
            voltage: non_empty(self.voltage.read::<Voltage>()),
            anode_material: self.anode.text().to_string(),
            cathode_material: self.cathode.text().to_string(),
            electrode_separation: non_empty(self.separation.read::<Length>()),
            cell: non_empty(ElectrochemistryCell {
                kind: self.cell.kind(),
                details: self.cell.details(),
            }),
            measurements: self.measurements.unload_all(),
        }
    }

    fn collect_invalid(&self, out: &mut Vec<&'static str>) {
        self.current.collect_invalid(out);
        self.voltage.collect_invalid(out);
        self.separation.collect_invalid(out);
        self.measurements.collect_invalid(out);
    }
}

impl SectionTree for ElectroForm {
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

/// Which quantity a measurement records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElectroSignal {
    Current,
    Voltage,
}

impl ElectroSignal {
    pub const ALL: [ElectroSignal; 2] = [ElectroSignal::Current, ElectroSignal::Voltage];

    pub fn label(self) -> &'static str {
        match self {
            ElectroSignal::Current => "current",
            ElectroSignal::Voltage => "voltage",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ElectroMeasurementForm {
    pub time: MetricFields,
    /// Radio selection; nothing is unloaded for an unselected signal.
    pub signal: Option<ElectroSignal>,
    pub current: MetricFields,
    pub voltage: MetricFields,
}

impl Default for ElectroMeasurementForm {
    fn default() -> Self {
        Self {
            time: metric_fields!(Time, "electro_measurement_time"),
            signal: None,
            current: metric_fields!(Current, "electro_measurement_current"),
            voltage: metric_fields!(Voltage, "electro_measurement_voltage"),
        }
    }
}

impl SectionForm for ElectroMeasurementForm {
    type Record = ElectrochemistryMeasurement;

    fn load(&mut self, record: &ElectrochemistryMeasurement, _ids: &mut SectionIds) {
        self.time.write(record.time.as_ref());
        if let Some(current) = &record.current {
            self.current.write(Some(current));
            self.signal = Some(ElectroSignal::Current);
        }
        if let Some(voltage) = &record.voltage {
            self.voltage.write(Some(voltage));
            self.signal = Some(ElectroSignal::Voltage);
        }
    }

    fn unload(&self) -> ElectrochemistryMeasurement {
        let mut measurement = ElectrochemistryMeasurement {
            time: non_empty(self.time.read::<Time>()),
            ..Default::default()
        };
        match self.signal {
            Some(ElectroSignal::Current) => {
                measurement.current = non_empty(self.current.read::<Current>());
            }
            Some(ElectroSignal::Voltage) => {
                measurement.voltage = non_empty(self.voltage.read::<Voltage>());
            }
            None => {}
        }
        measurement
    }

    fn collect_invalid(&self, out: &mut Vec<&'static str>) {
        self.time.collect_invalid(out);
        match self.signal {
            Some(ElectroSignal::Current) => self.current.collect_invalid(out),
            Some(ElectroSignal::Voltage) => self.voltage.collect_invalid(out),
            None => {}
        }
    }
}

impl SectionTree for ElectroMeasurementForm {}
