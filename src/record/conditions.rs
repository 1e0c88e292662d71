use super::metrics::{Current, Length, Pressure, Temperature, Time, Voltage};
use super::{is_zero, Extra};
use serde::{Deserialize, Serialize};

/// A typed control or method descriptor: an enum code plus free-text details.
macro_rules! typed_details {
    ($name:ident) => {
        #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
        #[serde(default)]
        pub struct $name {
            #[serde(rename = "type", skip_serializing_if = "is_zero")]
            pub kind: i32,
            #[serde(skip_serializing_if = "String::is_empty")]
            pub details: String,
        }
    };
}

typed_details!(TemperatureControl);
typed_details!(PressureControl);
typed_details!(Atmosphere);
typed_details!(StirringMethod);
typed_details!(FlowType);
typed_details!(ElectrochemistryType);
typed_details!(ElectrochemistryCell);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReactionConditions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<TemperatureConditions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pressure: Option<PressureConditions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stirring: Option<StirringConditions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flow: Option<FlowConditions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub electrochemistry: Option<ElectrochemistryConditions>,
    /// Illumination, pH, reflux and other fields this editor does not bind.
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemperatureConditions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub control: Option<TemperatureControl>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub setpoint: Option<Temperature>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub measurements: Vec<TemperatureMeasurement>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemperatureMeasurement {
    #[serde(rename = "type", skip_serializing_if = "is_zero")]
    pub kind: i32,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub details: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<Time>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<Temperature>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PressureConditions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub control: Option<PressureControl>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub setpoint: Option<Pressure>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub atmosphere: Option<Atmosphere>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub measurements: Vec<PressureMeasurement>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PressureMeasurement {
    #[serde(rename = "type", skip_serializing_if = "is_zero")]
    pub kind: i32,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub details: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<Time>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pressure: Option<Pressure>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StirringConditions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<StirringMethod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate: Option<StirringRate>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StirringRate {
    #[serde(rename = "type", skip_serializing_if = "is_zero")]
    pub kind: i32,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub details: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub rpm: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowConditions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flow_type: Option<FlowType>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub pump_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tubing: Option<Tubing>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tubing {
    #[serde(rename = "type", skip_serializing_if = "is_zero")]
    pub kind: i32,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub details: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diameter: Option<Length>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElectrochemistryConditions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub electrochemistry_type: Option<ElectrochemistryType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current: Option<Current>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voltage: Option<Voltage>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub anode_material: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub cathode_material: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub electrode_separation: Option<Length>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cell: Option<ElectrochemistryCell>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub measurements: Vec<ElectrochemistryMeasurement>,
}

/// Electrochemistry measurement; current and voltage are alternatives.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElectrochemistryMeasurement {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<Time>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current: Option<Current>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voltage: Option<Voltage>,
}
