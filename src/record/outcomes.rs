use super::metrics::{Amount, FloatValue, Percentage, Time, Wavelength};
use super::{is_zero, Data, Extra};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReactionOutcome {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reaction_time: Option<Time>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversion: Option<Percentage>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub products: Vec<ProductCompound>,
    /// Analyses keyed by user-chosen name; product measurements refer to them by key.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub analyses: BTreeMap<String, Analysis>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DateTime {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Analysis {
    #[serde(rename = "type", skip_serializing_if = "is_zero")]
    pub kind: i32,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub details: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub chmo_id: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_of_isolated_species: Option<bool>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub data: BTreeMap<String, Data>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub instrument_manufacturer: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instrument_last_calibrated: Option<DateTime>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Texture {
    #[serde(rename = "type", skip_serializing_if = "is_zero")]
    pub kind: i32,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub details: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductCompound {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_desired_product: Option<bool>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub measurements: Vec<ProductMeasurement>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub isolated_color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub texture: Option<Texture>,
    /// Identifiers and features are edited elsewhere and carried through.
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MassSpecMeasurementDetails {
    #[serde(rename = "type", skip_serializing_if = "is_zero")]
    pub kind: i32,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub details: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tic_minimum_mz: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tic_maximum_mz: Option<f32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Selectivity {
    #[serde(rename = "type", skip_serializing_if = "is_zero")]
    pub kind: i32,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub details: String,
}

/// A measured property of a product. `percentage`, `float_value`,
/// `string_value` and `amount` form a oneof.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductMeasurement {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub analysis_key: String,
    #[serde(rename = "type", skip_serializing_if = "is_zero")]
    pub kind: i32,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub details: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uses_internal_standard: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_normalized: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uses_authentic_standard: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percentage: Option<Percentage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub float_value: Option<FloatValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub string_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Amount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retention_time: Option<Time>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mass_spec_details: Option<MassSpecMeasurementDetails>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selectivity: Option<Selectivity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wavelength: Option<Wavelength>,
    /// Authentic standard compound, carried through.
    #[serde(flatten)]
    pub extra: Extra,
}
