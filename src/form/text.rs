//! Editable text fields and their numeric format checks.

use crate::config::FLOAT_DISPLAY_PRECISION;
use once_cell::sync::Lazy;
use regex::Regex;

// Whole-field format checks, run on blur.
static FLOAT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-?(?:\d+|\d+\.\d*|\d*\.\d+)(?:[eE]-?\d+)?$").unwrap());
static INTEGER_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-?\d+$").unwrap());

// Leading-number extraction used when unloading, so "12.5 g" still reads as 12.5.
static FLOAT_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[-+]?(?:\d+\.?\d*|\.\d+)(?:[eE][-+]?\d+)?").unwrap());
static INTEGER_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[-+]?\d+").unwrap());

/// What a field accepts; only numeric kinds are format-checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextKind {
    Free,
    Float,
    Integer,
}

/// True when `text` is empty or a well-formed float (optional leading minus,
/// optional fraction, optional `e`/`E` exponent).
pub fn check_float(text: &str) -> bool {
    let trimmed = text.trim();
    trimmed.is_empty() || FLOAT_PATTERN.is_match(trimmed)
}

/// True when `text` is empty or digits with an optional leading minus.
pub fn check_integer(text: &str) -> bool {
    let trimmed = text.trim();
    trimmed.is_empty() || INTEGER_PATTERN.is_match(trimmed)
}

/// Parse the leading float of `text`, ignoring trailing garbage. `None` when
/// there is no leading number at all.
pub fn parse_leading_float(text: &str) -> Option<f32> {
    FLOAT_PREFIX
        .find(text.trim_start())
        .and_then(|m| m.as_str().parse::<f32>().ok())
}

/// Parse the leading integer of `text`, ignoring trailing garbage.
pub fn parse_leading_integer(text: &str) -> Option<i32> {
    INTEGER_PREFIX
        .find(text.trim_start())
        .and_then(|m| m.as_str().parse::<i32>().ok())
}

/// Round to a fixed number of significant digits so single-precision values
/// display the way they were typed (0.1 rather than 0.100000001).
pub fn prepare_float(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    format!("{:.*e}", FLOAT_DISPLAY_PRECISION - 1, value)
        .parse()
        .unwrap_or(value)
}

pub fn format_float(value: f32) -> String {
    prepare_float(value as f64).to_string()
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextField {
    name: &'static str,
    kind: TextKind,
    text: String,
    invalid: bool,
}

impl TextField {
    pub fn new(name: &'static str, kind: TextKind) -> Self {
        Self {
            name,
            kind,
            text: String::new(),
            invalid: false,
        }
    }

    pub fn free(name: &'static str) -> Self {
        Self::new(name, TextKind::Free)
    }

    pub fn float(name: &'static str) -> Self {
        Self::new(name, TextKind::Float)
    }

    pub fn integer(name: &'static str) -> Self {
        Self::new(name, TextKind::Integer)
    }

    /// Field identifier used in client-side validation messages.
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn kind(&self) -> TextKind {
        self.kind
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_invalid(&self) -> bool {
        self.invalid
    }

    /// Keystroke update. Format flags are left alone until the next blur.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Blur: run the format check for numeric kinds. Well-formed numbers
    /// that do not fit the record's type are flagged too.
    pub fn blur(&mut self) {
        let blank = self.text.trim().is_empty();
        self.invalid = match self.kind {
            TextKind::Free => false,
            TextKind::Float => !check_float(&self.text) || (!blank && self.as_float().is_none()),
            TextKind::Integer => {
                !check_integer(&self.text) || (!blank && self.as_integer().is_none())
            }
        };
    }

    /// Switch between free and numeric entry (product measurement values).
    /// The invalid flag is cleared; it is recomputed on the next blur.
    pub fn set_kind(&mut self, kind: TextKind) {
        self.kind = kind;
        self.invalid = false;
    }

    pub fn set_float(&mut self, value: f32) {
        self.text = format_float(value);
    }

    pub fn set_integer(&mut self, value: i32) {
        self.text = value.to_string();
    }

    /// `None` for text without a leading number and for values outside `f32`.
    pub fn as_float(&self) -> Option<f32> {
        parse_leading_float(&self.text).filter(|value| value.is_finite())
    }

    pub fn as_integer(&self) -> Option<i32> {
        parse_leading_integer(&self.text)
    }

    /// Collect this field's name if it is flagged invalid.
    pub fn collect_invalid(&self, out: &mut Vec<&'static str>) {
        if self.invalid {
            out.push(self.name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn float_check_accepts_plain_and_scientific() {
        for ok in ["", "  ", "1", "-1", "1.", ".5", "-0.25", "1e5", "2.5E-3"] {
            assert!(check_float(ok), "{ok:?}");
        }
        for bad in ["abc", "1.2.3", "--1", "1e", "1,5", "e5"] {
            assert!(!check_float(bad), "{bad:?}");
        }
    }

    #[test]
    fn integer_check() {
        assert!(check_integer("42"));
        assert!(check_integer("-7"));
        assert!(check_integer(""));
        assert!(!check_integer("4.2"));
        assert!(!check_integer("x"));
    }

    #[test]
    fn leading_number_parsing_ignores_trailing_text() {
        assert_eq!(parse_leading_float("12.5 g"), Some(12.5));
        assert_eq!(parse_leading_float("  -3e2"), Some(-300.0));
        assert_eq!(parse_leading_float(".5"), Some(0.5));
        assert_eq!(parse_leading_float("abc"), None);
        assert_eq!(parse_leading_float(""), None);
        assert_eq!(parse_leading_integer("300rpm"), Some(300));
        assert_eq!(parse_leading_integer("rpm"), None);
    }

    #[test]
    fn out_of_range_numbers_are_flagged_on_blur() {
        let mut float = TextField::float("amount_value");
        float.set_text("1e50");
        float.blur();
        assert!(float.is_invalid());
        assert_eq!(float.as_float(), None);
        let mut out = Vec::new();
        float.collect_invalid(&mut out);
        assert_eq!(out, vec!["amount_value"]);

        let mut integer = TextField::integer("analysis_chmo_id");
        integer.set_text("99999999999");
        integer.blur();
        assert!(integer.is_invalid());

        integer.set_text("2147483647");
        integer.blur();
        assert!(!integer.is_invalid());
        assert_eq!(integer.as_integer(), Some(i32::MAX));

        float.set_text("");
        float.blur();
        assert!(!float.is_invalid());
    }

    #[test]
    fn prepared_floats_drop_single_precision_noise() {
        assert_eq!(format_float(0.1), "0.1");
        assert_eq!(format_float(12.5), "12.5");
        assert_eq!(format_float(2.0), "2");
        assert_eq!(prepare_float(1.23456789), 1.234568);
    }

    #[test]
    fn invalid_flag_only_changes_on_blur() {
        let mut field = TextField::float("amount_value");
        field.set_text("1..2");
        assert!(!field.is_invalid());
        field.blur();
        assert!(field.is_invalid());
        let mut names = Vec::new();
        field.collect_invalid(&mut names);
        assert_eq!(names, vec!["amount_value"]);

        field.set_text("1.2");
        assert!(field.is_invalid());
        field.blur();
        assert!(!field.is_invalid());
    }

    #[test]
    fn free_text_is_never_invalid() {
        let mut field = TextField::free("notes_safety");
        field.set_text("1..2 not a number");
        field.blur();
        assert!(!field.is_invalid());
    }
}
