//! Record serialization and the emptiness rule.
//!
//! Records travel as the protobuf JSON mapping of the schema: snake_case field
//! names, enum fields as integer codes, maps as objects. This module is the
//! only place that knows the encoding.

use crate::error::EditorError;
use crate::record::*;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// A record type the server knows by name.
pub trait Message: Serialize + DeserializeOwned + Default {
    const TYPE_NAME: &'static str;
}

macro_rules! message {
    ($($ty:ty => $name:literal),+ $(,)?) => {
        $(impl Message for $ty {
            const TYPE_NAME: &'static str = $name;
        })+
    };
}

message! {
    Dataset => "Dataset",
    Reaction => "Reaction",
    ReactionConditions => "ReactionConditions",
    TemperatureConditions => "TemperatureConditions",
    TemperatureMeasurement => "TemperatureConditions.Measurement",
    PressureConditions => "PressureConditions",
    PressureMeasurement => "PressureConditions.Measurement",
    StirringConditions => "StirringConditions",
    FlowConditions => "FlowConditions",
    ElectrochemistryConditions => "ElectrochemistryConditions",
    ElectrochemistryMeasurement => "ElectrochemistryConditions.Measurement",
    ReactionNotes => "ReactionNotes",
    ReactionObservation => "ReactionObservation",
    ReactionOutcome => "ReactionOutcome",
    Analysis => "Analysis",
    ProductCompound => "ProductCompound",
    ProductMeasurement => "ProductMeasurement",
    ReactionWorkup => "ReactionWorkup",
    Amount => "Amount",
    Data => "Data",
}

pub fn encode<M: Message>(message: &M) -> Result<Vec<u8>, EditorError> {
    serde_json::to_vec(message).map_err(|source| EditorError::Encode {
        type_name: M::TYPE_NAME,
        source,
    })
}

pub fn decode<M: Message>(bytes: &[u8]) -> Result<M, EditorError> {
    serde_json::from_slice(bytes).map_err(|source| EditorError::Decode {
        type_name: M::TYPE_NAME,
        source,
    })
}

/// True when `value` encodes identically to a freshly constructed default of
/// the same type. Empty strings count as empty; explicitly set zeros do not.
pub fn is_empty_message<T: Serialize + Default>(value: &T) -> bool {
    match (serde_json::to_vec(value), serde_json::to_vec(&T::default())) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Attach `value` to its parent only when it is not empty.
pub fn non_empty<T: Serialize + Default>(value: T) -> Option<T> {
    if is_empty_message(&value) {
        None
    } else {
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_records_are_empty() {
        assert!(is_empty_message(&Reaction::default()));
        assert!(is_empty_message(&TemperatureConditions::default()));
        assert!(is_empty_message(&Mass::default()));
        assert!(is_empty_message(&ProductMeasurement::default()));
    }

    #[test]
    fn all_default_fields_encode_like_a_fresh_record() {
        let notes = ReactionNotes {
            safety_notes: String::new(),
            is_heterogeneous: None,
            ..Default::default()
        };
        assert_eq!(encode(&notes).unwrap(), encode(&ReactionNotes::default()).unwrap());

        let control = TemperatureControl { kind: 0, details: String::new() };
        assert!(is_empty_message(&control));
    }

    #[test]
    fn explicit_zero_is_not_empty() {
        let mass = Mass {
            value: Some(0.0),
            ..Default::default()
        };
        assert!(!is_empty_message(&mass));
        assert!(non_empty(mass).is_some());
        assert!(non_empty(Mass::default()).is_none());
    }

    #[test]
    fn unknown_fields_survive_a_round_trip() {
        let bytes = br#"{"reaction_id":"r1","inputs":{"a":{"components":[]}},"provenance":{"city":"x"}}"#;
        let reaction: Reaction = decode(bytes).unwrap();
        assert_eq!(reaction.reaction_id, "r1");
        assert!(reaction.extra.contains_key("inputs"));
        let again: Reaction = decode(&encode(&reaction).unwrap()).unwrap();
        assert_eq!(again, reaction);
    }

    #[test]
    fn measurement_records_encode_as_messages() {
        let measurement = TemperatureMeasurement {
            kind: 1,
            ..Default::default()
        };
        assert_eq!(encode(&measurement).unwrap(), br#"{"type":1}"#.to_vec());
        assert!(decode::<PressureMeasurement>(b"{}").unwrap() == PressureMeasurement::default());
        let err = decode::<ElectrochemistryMeasurement>(b"[").unwrap_err();
        assert!(err.to_string().contains(ElectrochemistryMeasurement::TYPE_NAME));
    }

    #[test]
    fn decode_reports_the_type_name() {
        let err = decode::<Dataset>(b"not json").unwrap_err();
        assert!(err.to_string().contains("Dataset"));
    }

    #[test]
    fn enum_fields_encode_as_type_codes() {
        let stirring = StirringRate { kind: 2, details: String::new(), rpm: 300 };
        let text = String::from_utf8(serde_json::to_vec(&stirring).unwrap()).unwrap();
        assert_eq!(text, r#"{"type":2,"rpm":300}"#);
    }
}
