use super::conditions::{StirringConditions, TemperatureConditions};
use super::metrics::{Amount, Time};
use super::{is_zero, Extra};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReactionWorkup {
    #[serde(rename = "type", skip_serializing_if = "is_zero")]
    pub kind: i32,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub details: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<Time>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Amount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<TemperatureConditions>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub keep_phase: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stirring: Option<StirringConditions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_ph: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_automated: Option<bool>,
    /// The workup input compound is carried through unchanged.
    #[serde(flatten)]
    pub extra: Extra,
}
