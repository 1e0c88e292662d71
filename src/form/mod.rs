//! In-memory form state: the source of truth the views render from.
//!
//! Every bound record type has a form counterpart implementing
//! [`SectionForm`]: `load` copies a record into the fields, `unload` builds a
//! fresh record from them. Views never read records directly.

pub mod lens;
pub mod metric;
pub mod sections;
pub mod selector;
pub mod text;

pub use lens::{Edit, Lens};
pub use metric::MetricFields;
pub use sections::{SectionId, SectionIds, SectionList, SectionTree};
pub use selector::{OptionalBoolSelector, Selector};
pub use text::{TextField, TextKind};

use crate::codec::Message;

/// Form state bound to one record type.
pub trait SectionForm: Default {
    type Record: Message;

    fn load(&mut self, record: &Self::Record, ids: &mut SectionIds);

    fn unload(&self) -> Self::Record;

    /// Names of fields currently flagged invalid, this section and below.
    fn collect_invalid(&self, out: &mut Vec<&'static str>);
}

/// Sections that own a validation indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SectionKey {
    Reaction,
    Conditions,
    Temperature,
    Pressure,
    Stirring,
    Flow,
    Electrochemistry,
    Notes,
    Observation(SectionId),
    Outcome(SectionId),
    Analysis(SectionId),
    Product(SectionId),
    ProductMeasurement(SectionId),
    Workup(SectionId),
}

impl SectionKey {
    /// Record type name the validation endpoint expects.
    pub fn type_name(&self) -> &'static str {
        match self {
            SectionKey::Reaction => "Reaction",
            SectionKey::Conditions => "ReactionConditions",
            SectionKey::Temperature => "TemperatureConditions",
            SectionKey::Pressure => "PressureConditions",
            SectionKey::Stirring => "StirringConditions",
            SectionKey::Flow => "FlowConditions",
            SectionKey::Electrochemistry => "ElectrochemistryConditions",
            SectionKey::Notes => "ReactionNotes",
            SectionKey::Observation(_) => "ReactionObservation",
            SectionKey::Outcome(_) => "ReactionOutcome",
            SectionKey::Analysis(_) => "Analysis",
            SectionKey::Product(_) => "ProductCompound",
            SectionKey::ProductMeasurement(_) => "ProductMeasurement",
            SectionKey::Workup(_) => "ReactionWorkup",
        }
    }

    /// DOM id of the section element; also the intersection observer target.
    pub fn anchor(&self) -> String {
        match self {
            SectionKey::Reaction => "section_reaction".to_string(),
            SectionKey::Conditions => "section_conditions".to_string(),
            SectionKey::Temperature => "section_conditions_temperature".to_string(),
            SectionKey::Pressure => "section_conditions_pressure".to_string(),
            SectionKey::Stirring => "section_conditions_stirring".to_string(),
            SectionKey::Flow => "section_conditions_flow".to_string(),
            SectionKey::Electrochemistry => "section_conditions_electro".to_string(),
            SectionKey::Notes => "section_notes".to_string(),
            SectionKey::Observation(id) => format!("observation_{}", id),
            SectionKey::Outcome(id) => format!("outcome_{}", id),
            SectionKey::Analysis(id) => format!("analysis_{}", id),
            SectionKey::Product(id) => format!("product_{}", id),
            SectionKey::ProductMeasurement(id) => format!("product_measurement_{}", id),
            SectionKey::Workup(id) => format!("workup_{}", id),
        }
    }
}
