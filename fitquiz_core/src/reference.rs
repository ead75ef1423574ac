//! Reference tables used to render the quiz.
//!
//! Shape silhouettes, their descriptions and the height picker options are
//! data rather than logic. The built-in tables can be replaced by a TOML file
//! and are injected into the state machine at construction.

use crate::units::height_label;
use crate::{BellyShape, ChestShape, Error, Gender, Result, ShapeKind};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Cached built-in tables
static DEFAULT_REFERENCE: Lazy<ReferenceData> = Lazy::new(build_default_reference);

/// Get a reference to the cached built-in tables
pub fn get_default_reference() -> &'static ReferenceData {
    &DEFAULT_REFERENCE
}

/// Image per belly silhouette
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct BellyImages {
    pub flatter: String,
    pub average: String,
    pub rounded: String,
}

/// Image per chest silhouette
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ChestImages {
    pub slimmer: String,
    pub average: String,
    pub broader: String,
}

/// Both silhouette views for one gender
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct GenderShapes {
    pub belly: BellyImages,
    pub chest: ChestImages,
}

/// Silhouette images for every gender
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ShapeImages {
    pub male: GenderShapes,
    pub female: GenderShapes,
}

/// Description per belly silhouette
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct BellyDescriptions {
    pub flatter: String,
    pub average: String,
    pub rounded: String,
}

/// Description per chest silhouette
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ChestDescriptions {
    pub slimmer: String,
    pub average: String,
    pub broader: String,
}

/// An entry of the height picker
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct HeightOption {
    pub value_cm: u32,
    pub label: String,
}

/// One selectable silhouette, ready to render
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct ShapeOption {
    pub key: &'static str,
    pub label: String,
    pub image: String,
    pub description: String,
}

/// The full set of reference tables
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ReferenceData {
    pub height_options: Vec<HeightOption>,
    pub shape_images: ShapeImages,
    pub belly_descriptions: BellyDescriptions,
    pub chest_descriptions: ChestDescriptions,
}

impl ReferenceData {
    /// Load tables from a TOML file
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let data: ReferenceData = toml::from_str(&contents)?;

        let errors = data.validate();
        if !errors.is_empty() {
            for error in &errors {
                tracing::warn!("Reference data problem in {:?}: {}", path, error);
            }
            return Err(Error::Reference(errors.join("; ")));
        }

        tracing::info!("Loaded reference data from {:?}", path);
        Ok(data)
    }

    fn gender_shapes(&self, gender: Gender) -> &GenderShapes {
        match gender {
            Gender::Male => &self.shape_images.male,
            Gender::Female => &self.shape_images.female,
        }
    }

    /// Image for a belly silhouette
    pub fn belly_image(&self, gender: Gender, shape: BellyShape) -> &str {
        let images = &self.gender_shapes(gender).belly;
        match shape {
            BellyShape::Flatter => &images.flatter,
            BellyShape::Average => &images.average,
            BellyShape::Rounded => &images.rounded,
        }
    }

    /// Image for a chest silhouette
    pub fn chest_image(&self, gender: Gender, shape: ChestShape) -> &str {
        let images = &self.gender_shapes(gender).chest;
        match shape {
            ChestShape::Slimmer => &images.slimmer,
            ChestShape::Average => &images.average,
            ChestShape::Broader => &images.broader,
        }
    }

    pub fn belly_description(&self, shape: BellyShape) -> &str {
        let d = &self.belly_descriptions;
        match shape {
            BellyShape::Flatter => &d.flatter,
            BellyShape::Average => &d.average,
            BellyShape::Rounded => &d.rounded,
        }
    }

    pub fn chest_description(&self, shape: ChestShape) -> &str {
        let d = &self.chest_descriptions;
        match shape {
            ChestShape::Slimmer => &d.slimmer,
            ChestShape::Average => &d.average,
            ChestShape::Broader => &d.broader,
        }
    }

    /// Options for a shape step, in display order
    pub fn shape_options(&self, gender: Gender, kind: ShapeKind) -> Vec<ShapeOption> {
        match kind {
            ShapeKind::Belly => BellyShape::ALL
                .iter()
                .map(|&shape| ShapeOption {
                    key: shape.key(),
                    label: capitalize(shape.key()),
                    image: self.belly_image(gender, shape).to_string(),
                    description: self.belly_description(shape).to_string(),
                })
                .collect(),
            ShapeKind::Chest => ChestShape::ALL
                .iter()
                .map(|&shape| ShapeOption {
                    key: shape.key(),
                    label: capitalize(shape.key()),
                    image: self.chest_image(gender, shape).to_string(),
                    description: self.chest_description(shape).to_string(),
                })
                .collect(),
        }
    }

    /// Validate the tables and return any problems found
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        for gender in Gender::ALL {
            for shape in BellyShape::ALL {
                if self.belly_image(gender, shape).trim().is_empty() {
                    errors.push(format!("missing {} belly image for {}", shape, gender));
                }
            }
            for shape in ChestShape::ALL {
                if self.chest_image(gender, shape).trim().is_empty() {
                    errors.push(format!("missing {} chest image for {}", shape, gender));
                }
            }
        }

        if self.height_options.is_empty() {
            errors.push("height options table is empty".into());
        }

        for pair in self.height_options.windows(2) {
            if pair[0].value_cm >= pair[1].value_cm {
                errors.push(format!(
                    "height options out of order at {} cm",
                    pair[1].value_cm
                ));
            }
        }

        errors
    }
}

fn capitalize(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Builds the built-in tables
///
/// **Note**: prefer `get_default_reference()`, which returns the cached copy.
pub fn build_default_reference() -> ReferenceData {
    let shapes = |prefix: &str, chest_average: &str| GenderShapes {
        belly: BellyImages {
            flatter: format!("/shapes/{}-side-skinny.svg", prefix),
            average: format!("/shapes/{}-side-average.svg", prefix),
            rounded: format!("/shapes/{}-side-rounded.svg", prefix),
        },
        chest: ChestImages {
            slimmer: format!("/shapes/{}-front-skinny.svg", prefix),
            average: format!("/shapes/{}-front-{}.svg", prefix, chest_average),
            broader: format!("/shapes/{}-front-rounded.svg", prefix),
        },
    };

    ReferenceData {
        height_options: (150..=195)
            .step_by(5)
            .map(|cm| HeightOption {
                value_cm: cm,
                label: height_label(cm),
            })
            .collect(),
        shape_images: ShapeImages {
            male: shapes("m", "average"),
            female: shapes("f", "normal"),
        },
        belly_descriptions: BellyDescriptions {
            flatter: "Straighter abdominal line with minimal protrusion".into(),
            average: "Natural belly curve with balanced proportions".into(),
            rounded: "More pronounced belly curve".into(),
        },
        chest_descriptions: ChestDescriptions {
            slimmer: "Narrower torso and shoulder width".into(),
            average: "Balanced chest and shoulder proportions".into(),
            broader: "Wider chest and shoulder area".into(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_reference_validates() {
        let reference = build_default_reference();
        let errors = reference.validate();
        assert!(
            errors.is_empty(),
            "Default reference data has validation errors: {:?}",
            errors
        );
    }

    #[test]
    fn test_shape_images_by_gender() {
        let reference = get_default_reference();
        assert_eq!(
            reference.belly_image(Gender::Female, BellyShape::Flatter),
            "/shapes/f-side-skinny.svg"
        );
        assert_eq!(
            reference.chest_image(Gender::Female, ChestShape::Average),
            "/shapes/f-front-normal.svg"
        );
        assert_eq!(
            reference.chest_image(Gender::Male, ChestShape::Average),
            "/shapes/m-front-average.svg"
        );
        assert_eq!(
            reference.chest_image(Gender::Male, ChestShape::Broader),
            "/shapes/m-front-rounded.svg"
        );
    }

    #[test]
    fn test_shape_options_in_display_order() {
        let options = get_default_reference().shape_options(Gender::Male, ShapeKind::Chest);
        let keys: Vec<_> = options.iter().map(|o| o.key).collect();
        assert_eq!(keys, vec!["slimmer", "average", "broader"]);
        assert_eq!(options[0].label, "Slimmer");
        assert_eq!(options[2].description, "Wider chest and shoulder area");
    }

    #[test]
    fn test_height_options_table() {
        let options = &get_default_reference().height_options;
        assert_eq!(options.len(), 10);
        assert_eq!(options[0].label, "150 cm (4'11\")");
        assert_eq!(options[5].value_cm, 175);
        assert_eq!(options[5].label, "175 cm (5'9\")");
        assert_eq!(options[9].label, "195 cm (6'5\")");
    }

    #[test]
    fn test_validate_reports_missing_image_and_order() {
        let mut reference = build_default_reference();
        reference.shape_images.male.belly.rounded = String::new();
        reference.height_options.swap(0, 1);

        let errors = reference.validate();
        assert_eq!(errors.len(), 2);
        assert!(errors[0].contains("rounded belly image for male"));
    }

    #[test]
    fn test_load_from_toml() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("reference.toml");

        let mut reference = build_default_reference();
        reference.belly_descriptions.rounded = "Fuller midsection".into();
        std::fs::write(&path, toml::to_string(&reference).unwrap()).unwrap();

        let loaded = ReferenceData::load_from(&path).unwrap();
        assert_eq!(loaded.belly_description(BellyShape::Rounded), "Fuller midsection");
    }

    #[test]
    fn test_load_from_rejects_empty_heights() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("reference.toml");

        let mut reference = build_default_reference();
        reference.height_options.clear();
        std::fs::write(&path, toml::to_string(&reference).unwrap()).unwrap();

        assert!(matches!(
            ReferenceData::load_from(&path),
            Err(Error::Reference(_))
        ));
    }
}
