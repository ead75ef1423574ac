//! Input validation for the numeric quiz steps.
//!
//! Invalid input never produces an error. It only keeps the step's
//! continue action disabled.

use serde::{Deserialize, Serialize};

/// Inclusive range accepted for a measurement
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct MeasurementRange {
    pub min: f64,
    pub max: f64,
}

impl MeasurementRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value.is_finite() && value >= self.min && value <= self.max
    }
}

/// Result of reading a raw text entry
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NumericEntry {
    /// Nothing typed; the step default applies
    Empty,
    Value(f64),
    /// Not a finite number
    Invalid,
}

/// Parse a raw text entry
pub fn parse_entry(raw: &str) -> NumericEntry {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return NumericEntry::Empty;
    }

    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => NumericEntry::Value(value),
        _ => NumericEntry::Invalid,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_is_inclusive() {
        let range = MeasurementRange::new(40.0, 150.0);
        assert!(range.contains(40.0));
        assert!(range.contains(150.0));
        assert!(!range.contains(39.9));
        assert!(!range.contains(150.1));
        assert!(!range.contains(f64::NAN));
    }

    #[test]
    fn test_parse_entry() {
        assert_eq!(parse_entry(""), NumericEntry::Empty);
        assert_eq!(parse_entry("   "), NumericEntry::Empty);
        assert_eq!(parse_entry(" 72.5 "), NumericEntry::Value(72.5));
        assert_eq!(parse_entry("abc"), NumericEntry::Invalid);
        assert_eq!(parse_entry("inf"), NumericEntry::Invalid);
        assert_eq!(parse_entry("NaN"), NumericEntry::Invalid);
    }
}
