//! Static enumeration tables backing every dropdown in the form.
//!
//! Each dropdown field names its table at compile time; there is no lookup of
//! enumerations by string name at runtime. Codes follow the record schema.

use crate::config::UNSPECIFIED;

/// Name-to-code table for one enumerated type.
#[derive(Debug, PartialEq, Eq)]
pub struct EnumTable {
    pub name: &'static str,
    pub members: &'static [(&'static str, i32)],
}

impl EnumTable {
    /// Code selected when a dropdown is first built: the `UNSPECIFIED` sentinel,
    /// or the first member for tables without one.
    pub fn default_code(&self) -> i32 {
        self.code_of(UNSPECIFIED)
            .or_else(|| self.members.first().map(|&(_, code)| code))
            .unwrap_or(0)
    }

    pub fn contains(&self, code: i32) -> bool {
        self.members.iter().any(|&(_, c)| c == code)
    }

    pub fn name_of(&self, code: i32) -> Option<&'static str> {
        self.members
            .iter()
            .find(|&&(_, c)| c == code)
            .map(|&(name, _)| name)
    }

    pub fn code_of(&self, name: &str) -> Option<i32> {
        self.members
            .iter()
            .find(|&&(n, _)| n == name)
            .map(|&(_, code)| code)
    }
}

macro_rules! enum_table {
    ($ident:ident = $name:literal { $($member:ident = $code:literal),+ $(,)? }) => {
        pub static $ident: EnumTable = EnumTable {
            name: $name,
            members: &[$((stringify!($member), $code)),+],
        };
    };
}

// Units
enum_table!(MASS_UNIT = "Mass.MassUnit" {
    UNSPECIFIED = 0, KILOGRAM = 1, GRAM = 2, MILLIGRAM = 3, MICROGRAM = 4,
});
enum_table!(MOLES_UNIT = "Moles.MolesUnit" {
    UNSPECIFIED = 0, MOLE = 1, MILLIMOLE = 2, MICROMOLE = 3, NANOMOLE = 4,
});
enum_table!(VOLUME_UNIT = "Volume.VolumeUnit" {
    UNSPECIFIED = 0, MILLILITER = 1, MICROLITER = 2, LITER = 3, NANOLITER = 4,
});
enum_table!(TIME_UNIT = "Time.TimeUnit" {
    UNSPECIFIED = 0, DAY = 1, HOUR = 2, MINUTE = 3, SECOND = 4,
});
enum_table!(TEMPERATURE_UNIT = "Temperature.TemperatureUnit" {
    UNSPECIFIED = 0, CELSIUS = 1, FAHRENHEIT = 2, KELVIN = 3,
});
enum_table!(PRESSURE_UNIT = "Pressure.PressureUnit" {
    UNSPECIFIED = 0, BAR = 1, ATMOSPHERE = 2, PSI = 3, KPSI = 4, PASCAL = 5,
    KILOPASCAL = 6, TORR = 7, MM_HG = 8,
});
enum_table!(LENGTH_UNIT = "Length.LengthUnit" {
    UNSPECIFIED = 0, CENTIMETER = 1, MILLIMETER = 2, METER = 3, INCH = 4, FOOT = 5,
});
enum_table!(CURRENT_UNIT = "Current.CurrentUnit" {
    UNSPECIFIED = 0, AMPERE = 1, MILLIAMPERE = 2,
});
enum_table!(VOLTAGE_UNIT = "Voltage.VoltageUnit" {
    UNSPECIFIED = 0, VOLT = 1, MILLIVOLT = 2,
});
enum_table!(WAVELENGTH_UNIT = "Wavelength.WavelengthUnit" {
    UNSPECIFIED = 0, NANOMETER = 1, WAVENUMBER = 2,
});

// Conditions
enum_table!(TEMPERATURE_CONTROL_TYPE = "TemperatureConditions.TemperatureControl.TemperatureControlType" {
    UNSPECIFIED = 0, CUSTOM = 1, AMBIENT = 2, OIL_BATH = 3, WATER_BATH = 4, SAND_BATH = 5,
    ICE_BATH = 6, DRY_ALUMINUM_PLATE = 7, MICROWAVE = 8, DRY_ICE_BATH = 9, AIR_FAN = 10,
    LIQUID_NITROGEN = 11,
});
enum_table!(TEMPERATURE_MEASUREMENT_TYPE = "TemperatureConditions.Measurement.MeasurementType" {
    UNSPECIFIED = 0, CUSTOM = 1, THERMOCOUPLE_INTERNAL = 2, THERMOCOUPLE_EXTERNAL = 3,
    INFRARED = 4,
});
enum_table!(PRESSURE_CONTROL_TYPE = "PressureConditions.PressureControl.PressureControlType" {
    UNSPECIFIED = 0, CUSTOM = 1, AMBIENT = 2, SLIGHT_POSITIVE = 3, SEALED = 4,
    PRESSURIZED = 5,
});
enum_table!(ATMOSPHERE_TYPE = "PressureConditions.Atmosphere.AtmosphereType" {
    UNSPECIFIED = 0, CUSTOM = 1, AIR = 2, NITROGEN = 3, ARGON = 4, OXYGEN = 5, HYDROGEN = 6,
    CARBON_MONOXIDE = 7, CARBON_DIOXIDE = 8, METHANE = 9, AMMONIA = 10, OZONE = 11,
    ETHYLENE = 12, ACETYLENE = 13,
});
enum_table!(PRESSURE_MEASUREMENT_TYPE = "PressureConditions.Measurement.MeasurementType" {
    UNSPECIFIED = 0, CUSTOM = 1, PRESSURE_TRANSDUCER = 2,
});
enum_table!(STIRRING_METHOD_TYPE = "StirringConditions.StirringMethod.StirringMethodType" {
    UNSPECIFIED = 0, CUSTOM = 1, NONE = 2, STIR_BAR = 3, OVERHEAD_MIXER = 4, AGITATION = 5,
    BALL_MILLING = 6, SONICATION = 7,
});
enum_table!(STIRRING_RATE_TYPE = "StirringConditions.StirringRate.StirringRateType" {
    UNSPECIFIED = 0, HIGH = 1, MEDIUM = 2, LOW = 3,
});
enum_table!(FLOW_TYPE = "FlowConditions.FlowType.FlowTypeEnum" {
    UNSPECIFIED = 0, CUSTOM = 1, PLUG_FLOW_REACTOR = 2, CONTINUOUS_STIRRED_TANK_REACTOR = 3,
    PACKED_BED_REACTOR = 4,
});
enum_table!(TUBING_MATERIAL_TYPE = "FlowConditions.Tubing.TubingMaterialType" {
    UNSPECIFIED = 0, CUSTOM = 1, STEEL = 2, COPPER = 3, PFA = 4, FEP = 5, TEFLONAF = 6,
    PTFE = 7, GLASS = 8, QUARTZ = 9, SILICON = 10, PDMS = 11,
});
enum_table!(ELECTROCHEMISTRY_TYPE = "ElectrochemistryConditions.ElectrochemistryType.ElectrochemistryTypeEnum" {
    UNSPECIFIED = 0, CUSTOM = 1, CONSTANT_CURRENT = 2, CONSTANT_VOLTAGE = 3,
});
enum_table!(ELECTROCHEMISTRY_CELL_TYPE = "ElectrochemistryConditions.ElectrochemistryCell.ElectrochemistryCellType" {
    UNSPECIFIED = 0, CUSTOM = 1, DIVIDED_CELL = 2, UNDIVIDED_CELL = 3,
});

// Outcomes
enum_table!(ANALYSIS_TYPE = "Analysis.AnalysisType" {
    UNSPECIFIED = 0, CUSTOM = 1, LC = 2, GC = 3, IR = 4, NMR_1H = 5, NMR_13C = 6,
    NMR_OTHER = 7, MP = 8, UV = 9, TLC = 10, MS = 11, HRMS = 12, MSMS = 13, WEIGHT = 14,
    LCMS = 15, GCMS = 16, ELSD = 17, CD = 18, SFC = 19, EPR = 20, XRD = 21, RAMAN = 22,
    ED = 23,
});
enum_table!(TEXTURE_TYPE = "ProductCompound.Texture.TextureType" {
    UNSPECIFIED = 0, CUSTOM = 1, POWDER = 2, CRYSTAL = 3, OIL = 4, AMORPHOUS_SOLID = 5,
    FOAM = 6, WAX = 7, SEMI_SOLID = 8, SOLID = 9, LIQUID = 10,
});
enum_table!(PRODUCT_MEASUREMENT_TYPE = "ProductMeasurement.ProductMeasurementType" {
    UNSPECIFIED = 0, CUSTOM = 1, IDENTITY = 2, YIELD = 3, SELECTIVITY = 4, PURITY = 5,
    AREA = 6, COUNTS = 7, INTENSITY = 8, AMOUNT = 9,
});
enum_table!(MASS_SPEC_TYPE = "ProductMeasurement.MassSpecMeasurementDetails.MassSpecMeasurementType" {
    UNSPECIFIED = 0, CUSTOM = 1, TIC = 2, TIC_POSITIVE = 3, TIC_NEGATIVE = 4, EIC = 5,
});
enum_table!(SELECTIVITY_TYPE = "ProductMeasurement.Selectivity.SelectivityType" {
    UNSPECIFIED = 0, CUSTOM = 1, EE = 2, ER = 3, DR = 4, EZ = 5, ZE = 6,
});

// Workups
enum_table!(WORKUP_TYPE = "ReactionWorkup.WorkupType" {
    UNSPECIFIED = 0, CUSTOM = 1, ADDITION = 2, ALIQUOT = 3, TEMPERATURE = 4,
    CONCENTRATION = 5, EXTRACTION = 6, FILTRATION = 7, WASH = 8, DRY_IN_VACUUM = 9,
    DRY_WITH_MATERIAL = 10, FLASH_CHROMATOGRAPHY = 11, OTHER_CHROMATOGRAPHY = 12,
    SCAVENGING = 13, WAIT = 14, STIRRING = 15, PH_ADJUST = 16, DISSOLUTION = 17,
    DISTILLATION = 18,
});

pub static ALL_TABLES: &[&EnumTable] = &[
    &MASS_UNIT,
    &MOLES_UNIT,
    &VOLUME_UNIT,
    &TIME_UNIT,
    &TEMPERATURE_UNIT,
    &PRESSURE_UNIT,
    &LENGTH_UNIT,
    &CURRENT_UNIT,
    &VOLTAGE_UNIT,
    &WAVELENGTH_UNIT,
    &TEMPERATURE_CONTROL_TYPE,
    &TEMPERATURE_MEASUREMENT_TYPE,
    &PRESSURE_CONTROL_TYPE,
    &ATMOSPHERE_TYPE,
    &PRESSURE_MEASUREMENT_TYPE,
    &STIRRING_METHOD_TYPE,
    &STIRRING_RATE_TYPE,
    &FLOW_TYPE,
    &TUBING_MATERIAL_TYPE,
    &ELECTROCHEMISTRY_TYPE,
    &ELECTROCHEMISTRY_CELL_TYPE,
    &ANALYSIS_TYPE,
    &TEXTURE_TYPE,
    &PRODUCT_MEASUREMENT_TYPE,
    &MASS_SPEC_TYPE,
    &SELECTIVITY_TYPE,
    &WORKUP_TYPE,
];

/// Three-way boolean dropdown value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OptionalBool {
    #[default]
    Unspecified,
    True,
    False,
}

impl OptionalBool {
    pub const ALL: [OptionalBool; 3] = [OptionalBool::Unspecified, OptionalBool::True, OptionalBool::False];

    pub fn as_str(self) -> &'static str {
        match self {
            OptionalBool::Unspecified => UNSPECIFIED,
            OptionalBool::True => "TRUE",
            OptionalBool::False => "FALSE",
        }
    }

    /// Unknown option values fall back to `Unspecified`.
    pub fn parse(value: &str) -> Self {
        match value {
            "TRUE" => OptionalBool::True,
            "FALSE" => OptionalBool::False,
            _ => OptionalBool::Unspecified,
        }
    }
}

impl From<Option<bool>> for OptionalBool {
    fn from(value: Option<bool>) -> Self {
        match value {
            Some(true) => OptionalBool::True,
            Some(false) => OptionalBool::False,
            None => OptionalBool::Unspecified,
        }
    }
}

impl From<OptionalBool> for Option<bool> {
    fn from(value: OptionalBool) -> Self {
        match value {
            OptionalBool::True => Some(true),
            OptionalBool::False => Some(false),
            OptionalBool::Unspecified => None,
        }
    }
}
