//! Section binders: one form type per bound record, each with `load`/`unload`.
//!
//! Unload always rebuilds the record from scratch and attaches a sub-record to
//! its parent only when it is non-empty. Fields the form does not bind ride
//! along in an `extra` map copied from the loaded record.

pub mod amounts;
pub mod data;
pub mod electro;
pub mod flow;
pub mod notes;
pub mod observations;
pub mod outcomes;
pub mod pressure;
pub mod products;
pub mod stirring;
pub mod temperature;
pub mod workups;

pub use amounts::{AmountForm, AmountKind};
pub use data::{DataForm, DataKind};
pub use electro::{ElectroForm, ElectroMeasurementForm, ElectroSignal};
pub use flow::FlowForm;
pub use notes::NotesForm;
pub use observations::ObservationForm;
pub use outcomes::{AnalysisForm, NamedDataForm, OutcomeForm};
pub use pressure::{PressureForm, PressureMeasurementForm};
pub use products::{MeasurementValueKind, ProductForm, ProductMeasurementForm};
pub use stirring::StirringForm;
pub use temperature::{TemperatureForm, TemperatureMeasurementForm};
pub use workups::WorkupForm;

use crate::enums::EnumTable;
use crate::form::{Selector, TextField};

/// An enum `type` selector paired with its free-text `details` field, the
/// shape shared by control, method, atmosphere and similar sub-records.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedFields {
    pub kind: Selector,
    pub details: TextField,
}

impl TypedFields {
    pub fn new(table: &'static EnumTable, details_name: &'static str) -> Self {
        Self {
            kind: Selector::new(table),
            details: TextField::free(details_name),
        }
    }

    pub fn write(&mut self, kind: i32, details: &str) {
        self.kind.set(kind);
        self.details.set_text(details);
    }

    pub fn kind(&self) -> i32 {
        self.kind.get()
    }

    pub fn details(&self) -> String {
        self.details.text().to_string()
    }
}

/// Float field written only when the record holds a value.
pub(crate) fn write_opt_float(field: &mut TextField, value: Option<f32>) {
    if let Some(value) = value {
        field.set_float(value);
    }
}
