//! (value, precision, units) tuples and the amount oneof built from them.

use super::is_zero;
use crate::enums::{self, EnumTable};
use serde::{Deserialize, Serialize};

/// A record field group holding an optional value, optional precision and,
/// for most types, a unit code.
pub trait Metric: Default + Clone + PartialEq + Serialize {
    /// Unit table, or `None` for unitless groups such as percentages.
    fn units_table() -> Option<&'static EnumTable>;
    fn value(&self) -> Option<f32>;
    fn set_value(&mut self, value: f32);
    fn precision(&self) -> Option<f32>;
    fn set_precision(&mut self, precision: f32);
    fn units(&self) -> i32 {
        0
    }
    fn set_units(&mut self, _units: i32) {}
}

macro_rules! metric {
    ($(#[$doc:meta])* $name:ident, units = $table:expr) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
        pub struct $name {
            #[serde(default, skip_serializing_if = "Option::is_none")]
            pub value: Option<f32>,
            #[serde(default, skip_serializing_if = "Option::is_none")]
            pub precision: Option<f32>,
            #[serde(default, skip_serializing_if = "is_zero")]
            pub units: i32,
        }

        impl Metric for $name {
            fn units_table() -> Option<&'static EnumTable> {
                Some(&$table)
            }
            fn value(&self) -> Option<f32> {
                self.value
            }
            fn set_value(&mut self, value: f32) {
                self.value = Some(value);
            }
            fn precision(&self) -> Option<f32> {
                self.precision
            }
            fn set_precision(&mut self, precision: f32) {
                self.precision = Some(precision);
            }
            fn units(&self) -> i32 {
                self.units
            }
            fn set_units(&mut self, units: i32) {
                self.units = units;
            }
        }
    };
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
        pub struct $name {
            #[serde(default, skip_serializing_if = "Option::is_none")]
            pub value: Option<f32>,
            #[serde(default, skip_serializing_if = "Option::is_none")]
            pub precision: Option<f32>,
        }

        impl Metric for $name {
            fn units_table() -> Option<&'static EnumTable> {
                None
            }
            fn value(&self) -> Option<f32> {
                self.value
            }
            fn set_value(&mut self, value: f32) {
                self.value = Some(value);
            }
            fn precision(&self) -> Option<f32> {
                self.precision
            }
            fn set_precision(&mut self, precision: f32) {
                self.precision = Some(precision);
            }
        }
    };
}

metric!(Mass, units = enums::MASS_UNIT);
metric!(Moles, units = enums::MOLES_UNIT);
metric!(Volume, units = enums::VOLUME_UNIT);
metric!(Time, units = enums::TIME_UNIT);
metric!(Temperature, units = enums::TEMPERATURE_UNIT);
metric!(Pressure, units = enums::PRESSURE_UNIT);
metric!(Length, units = enums::LENGTH_UNIT);
metric!(Current, units = enums::CURRENT_UNIT);
metric!(Voltage, units = enums::VOLTAGE_UNIT);
metric!(Wavelength, units = enums::WAVELENGTH_UNIT);
metric!(
    /// Unitless; `value` is in percent.
    Percentage
);
metric!(FloatValue);

/// Amount of a compound: exactly one of mass, moles or volume.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Amount {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mass: Option<Mass>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moles: Option<Moles>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<Volume>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume_includes_solutes: Option<bool>,
}
