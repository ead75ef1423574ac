//! Height unit conversions for display.

use std::fmt;

const CM_PER_INCH: f64 = 2.54;

/// A height in whole feet and inches
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FeetInches {
    pub feet: u32,
    pub inches: u32,
}

impl fmt::Display for FeetInches {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}' {}\"", self.feet, self.inches)
    }
}

/// Convert centimeters to feet and inches, rounding to the nearest inch
///
/// Negative or non-finite input converts as zero.
pub fn cm_to_feet_inches(cm: f64) -> FeetInches {
    let total_inches = if cm.is_finite() && cm > 0.0 {
        (cm / CM_PER_INCH).round() as u32
    } else {
        0
    };

    FeetInches {
        feet: total_inches / 12,
        inches: total_inches % 12,
    }
}

/// Label used in height pickers, e.g. `175 cm (5'9")`
pub fn height_label(cm: u32) -> String {
    let imperial = cm_to_feet_inches(cm as f64);
    format!("{} cm ({}'{}\")", cm, imperial.feet, imperial.inches)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cm_to_feet_inches() {
        assert_eq!(cm_to_feet_inches(175.0), FeetInches { feet: 5, inches: 9 });
        assert_eq!(cm_to_feet_inches(150.0), FeetInches { feet: 4, inches: 11 });
        assert_eq!(cm_to_feet_inches(183.0), FeetInches { feet: 6, inches: 0 });
        assert_eq!(cm_to_feet_inches(-3.0), FeetInches { feet: 0, inches: 0 });
    }

    #[test]
    fn test_display() {
        assert_eq!(cm_to_feet_inches(200.0).to_string(), "6' 7\"");
    }

    #[test]
    fn test_height_label() {
        assert_eq!(height_label(175), "175 cm (5'9\")");
        assert_eq!(height_label(195), "195 cm (6'5\")");
    }
}
