//! Core domain types for the fitquiz system.
//!
//! This module defines the fundamental types used throughout the system:
//! - Quiz answers (gender, measurements, body-shape keys, product type)
//! - Size recommendations produced by the engine
//!
//! Every categorical value parses from and displays as a lowercase key
//! (`male`, `flatter`, `t-shirt`), which is also its serde form.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Built-in starting height in centimeters
pub const DEFAULT_HEIGHT_CM: f64 = 175.0;
/// Built-in starting weight in kilograms
pub const DEFAULT_WEIGHT_KG: f64 = 70.0;
/// Built-in starting age in years
pub const DEFAULT_AGE_YEARS: f64 = 25.0;

/// Look up a variant by its key, case-insensitively
fn parse_key<T: Copy>(all: &[T], key: fn(T) -> &'static str, kind: &'static str, s: &str) -> Result<T> {
    let wanted = s.trim().to_ascii_lowercase();
    all.iter()
        .copied()
        .find(|v| key(*v) == wanted)
        .ok_or_else(|| Error::UnknownKey {
            kind,
            value: s.to_string(),
        })
}

// ============================================================================
// Quiz Answer Types
// ============================================================================

/// Gender selection; an unset gender is `None` on [`QuizData`]
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub const ALL: [Gender; 2] = [Gender::Male, Gender::Female];

    pub fn key(self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }
}

/// Side-view belly silhouette
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum BellyShape {
    Flatter,
    Average,
    Rounded,
}

impl BellyShape {
    pub const ALL: [BellyShape; 3] = [BellyShape::Flatter, BellyShape::Average, BellyShape::Rounded];

    pub fn key(self) -> &'static str {
        match self {
            BellyShape::Flatter => "flatter",
            BellyShape::Average => "average",
            BellyShape::Rounded => "rounded",
        }
    }
}

/// Front-view chest/torso silhouette
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ChestShape {
    Slimmer,
    Average,
    Broader,
}

impl ChestShape {
    pub const ALL: [ChestShape; 3] = [ChestShape::Slimmer, ChestShape::Average, ChestShape::Broader];

    pub fn key(self) -> &'static str {
        match self {
            ChestShape::Slimmer => "slimmer",
            ChestShape::Average => "average",
            ChestShape::Broader => "broader",
        }
    }
}

/// Which silhouette a shape step asks about
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Belly,
    Chest,
}

/// Garment the shopper is sizing for. Only affects how results are worded.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum ProductType {
    Polo,
    TShirt,
    Trousers,
    Midlayer,
    Hoodie,
}

impl ProductType {
    pub const ALL: [ProductType; 5] = [
        ProductType::Polo,
        ProductType::TShirt,
        ProductType::Trousers,
        ProductType::Midlayer,
        ProductType::Hoodie,
    ];

    pub fn key(self) -> &'static str {
        match self {
            ProductType::Polo => "polo",
            ProductType::TShirt => "t-shirt",
            ProductType::Trousers => "trousers",
            ProductType::Midlayer => "midlayer",
            ProductType::Hoodie => "hoodie",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ProductType::Polo => "Polo",
            ProductType::TShirt => "T-Shirt",
            ProductType::Trousers => "Trousers",
            ProductType::Midlayer => "Midlayer",
            ProductType::Hoodie => "Hoodie",
        }
    }

    /// Trousers are sized by waist; everything else by chest
    pub fn is_bottomwear(self) -> bool {
        matches!(self, ProductType::Trousers)
    }
}

macro_rules! key_display_and_parse {
    ($ty:ty, $kind:literal) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.key())
            }
        }

        impl FromStr for $ty {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self> {
                parse_key(&<$ty>::ALL, <$ty>::key, $kind, s)
            }
        }
    };
}

key_display_and_parse!(Gender, "gender");
key_display_and_parse!(BellyShape, "belly shape");
key_display_and_parse!(ChestShape, "chest shape");
key_display_and_parse!(ProductType, "product type");

// ============================================================================
// Quiz Data
// ============================================================================

/// Answers collected during one quiz session
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct QuizData {
    pub gender: Option<Gender>,
    /// Centimeters
    pub height: f64,
    /// Kilograms
    pub weight: f64,
    /// Years. Collected but not used for sizing.
    pub age: f64,
    pub belly_shape: Option<BellyShape>,
    pub chest_shape: Option<ChestShape>,
    pub product_type: Option<ProductType>,
}

impl QuizData {
    /// Fresh answers starting from the given measurement defaults
    pub fn with_defaults(height: f64, weight: f64, age: f64) -> Self {
        Self {
            gender: None,
            height,
            weight,
            age,
            belly_shape: None,
            chest_shape: None,
            product_type: None,
        }
    }
}

impl Default for QuizData {
    fn default() -> Self {
        Self::with_defaults(DEFAULT_HEIGHT_CM, DEFAULT_WEIGHT_KG, DEFAULT_AGE_YEARS)
    }
}

// ============================================================================
// Size Results
// ============================================================================

/// Letter size for tops, ordered smallest to largest
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TopSize {
    #[serde(rename = "XS")]
    ExtraSmall,
    #[serde(rename = "S")]
    Small,
    #[serde(rename = "M")]
    Medium,
    #[serde(rename = "L")]
    Large,
    #[serde(rename = "XL")]
    ExtraLarge,
}

impl TopSize {
    pub fn code(self) -> &'static str {
        match self {
            TopSize::ExtraSmall => "XS",
            TopSize::Small => "S",
            TopSize::Medium => "M",
            TopSize::Large => "L",
            TopSize::ExtraLarge => "XL",
        }
    }
}

impl fmt::Display for TopSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Qualitative garment fit
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum FitRecommendation {
    Fitted,
    Regular,
    Relaxed,
}

impl FitRecommendation {
    pub fn description(self) -> &'static str {
        match self {
            FitRecommendation::Fitted => "Slim-fit styles will complement your body shape.",
            FitRecommendation::Regular => "Standard fit styles will work well for you.",
            FitRecommendation::Relaxed => "Comfortable, loose-fitting styles recommended.",
        }
    }
}

impl fmt::Display for FitRecommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FitRecommendation::Fitted => "Fitted",
            FitRecommendation::Regular => "Regular",
            FitRecommendation::Relaxed => "Relaxed",
        };
        f.write_str(name)
    }
}

/// Size recommendations derived from one snapshot of [`QuizData`]
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SizeResult {
    pub top_size: TopSize,
    pub bottom_size: String,
    pub shoe_size_uk: String,
    pub shoe_size_eu: String,
    pub fit_recommendation: FitRecommendation,
    pub fit_description: String,
    pub product_type: Option<ProductType>,
}

/// Product-specific wording of a [`SizeResult`]
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct ProductRecommendation {
    pub product_type: ProductType,
    pub size_label: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_parse_case_insensitively() {
        assert_eq!("Male".parse::<Gender>().unwrap(), Gender::Male);
        assert_eq!(" rounded ".parse::<BellyShape>().unwrap(), BellyShape::Rounded);
        assert_eq!("BROADER".parse::<ChestShape>().unwrap(), ChestShape::Broader);
        assert_eq!("t-shirt".parse::<ProductType>().unwrap(), ProductType::TShirt);
    }

    #[test]
    fn test_unknown_key_is_reported() {
        let err = "tall".parse::<ChestShape>().unwrap_err();
        assert!(matches!(err, Error::UnknownKey { kind: "chest shape", .. }));
        assert_eq!(err.to_string(), "Unknown chest shape: 'tall'");
    }

    #[test]
    fn test_display_matches_serde_form() {
        for product in ProductType::ALL {
            let json = serde_json::to_string(&product).unwrap();
            assert_eq!(json, format!("\"{}\"", product));
        }
        assert_eq!(serde_json::to_string(&TopSize::ExtraLarge).unwrap(), "\"XL\"");
    }

    #[test]
    fn test_default_quiz_data() {
        let data = QuizData::default();
        assert_eq!(data.gender, None);
        assert_eq!(data.height, 175.0);
        assert_eq!(data.weight, 70.0);
        assert_eq!(data.age, 25.0);
        assert!(data.belly_shape.is_none());
        assert!(data.chest_shape.is_none());
        assert!(data.product_type.is_none());
    }

    #[test]
    fn test_top_size_ordering() {
        assert!(TopSize::ExtraSmall < TopSize::Small);
        assert!(TopSize::Small < TopSize::Medium);
        assert!(TopSize::Large < TopSize::ExtraLarge);
    }
}
