//! The reaction record tree as exchanged with the server.
//!
//! Only the sub-records the editor binds are modeled field by field. Every
//! struct that can hold fields edited elsewhere carries them in `extra` so a
//! load/unload cycle never drops data. Defaults are skipped on serialization,
//! which is what makes an unset sub-record encode as `{}` (see
//! [`crate::codec::is_empty_message`]).

pub mod conditions;
pub mod metrics;
pub mod outcomes;
pub mod workups;

pub use conditions::*;
pub use metrics::*;
pub use outcomes::*;
pub use workups::*;

use serde::{Deserialize, Serialize};

/// Unmodeled fields, preserved verbatim.
pub type Extra = serde_json::Map<String, serde_json::Value>;

pub(crate) fn is_zero(value: &i32) -> bool {
    *value == 0
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Dataset {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub reactions: Vec<Reaction>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub dataset_id: String,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Reaction {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conditions: Option<ReactionConditions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<ReactionNotes>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub observations: Vec<ReactionObservation>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub workups: Vec<ReactionWorkup>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub outcomes: Vec<ReactionOutcome>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub reaction_id: String,
    /// Identifiers, inputs, setup and provenance.
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReactionNotes {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_heterogeneous: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forms_precipitate: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_exothermic: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offgasses: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_sensitive_to_moisture: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_sensitive_to_oxygen: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_sensitive_to_light: Option<bool>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub safety_notes: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub procedure_details: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReactionObservation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<Time>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub comment: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<Data>,
}

/// Attached data. The value fields form a oneof; raw bytes stay in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Data {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub float_value: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub integer_value: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub string_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub format: String,
    #[serde(flatten)]
    pub extra: Extra,
}
