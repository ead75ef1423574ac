//! The ordered quiz steps and what each one asks for.

use crate::config::ValidationConfig;
use crate::validation::MeasurementRange;
use crate::ShapeKind;
use serde::{Deserialize, Serialize};

/// Number of steps in a quiz session
pub const TOTAL_QUIZ_STEPS: usize = 6;

/// A quiz step, in presentation order
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum QuizStep {
    Gender,
    Height,
    Weight,
    Age,
    BellyShape,
    ChestShape,
}

/// How a step collects its answer
#[derive(Clone, Debug, PartialEq)]
pub enum StepInput {
    /// Picking an option completes the step; there is no continue button
    Choice,
    /// A number within a range, confirmed with a continue action
    Numeric {
        unit: &'static str,
        range: MeasurementRange,
        step: f64,
    },
}

impl QuizStep {
    pub const ALL: [QuizStep; TOTAL_QUIZ_STEPS] = [
        QuizStep::Gender,
        QuizStep::Height,
        QuizStep::Weight,
        QuizStep::Age,
        QuizStep::BellyShape,
        QuizStep::ChestShape,
    ];

    /// 1-based position
    pub fn index(self) -> usize {
        match self {
            QuizStep::Gender => 1,
            QuizStep::Height => 2,
            QuizStep::Weight => 3,
            QuizStep::Age => 4,
            QuizStep::BellyShape => 5,
            QuizStep::ChestShape => 6,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        index.checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }

    /// The following step, or `None` on the last one
    pub fn next(self) -> Option<Self> {
        Self::from_index(self.index() + 1)
    }

    pub fn is_last(self) -> bool {
        self.next().is_none()
    }

    pub fn title(self) -> &'static str {
        match self {
            QuizStep::Gender => "Select Your Gender",
            QuizStep::Height => "Your Height",
            QuizStep::Weight => "Your Weight",
            QuizStep::Age => "Your Age",
            QuizStep::BellyShape => "Select Your Belly Shape",
            QuizStep::ChestShape => "Select Your Chest Shape",
        }
    }

    pub fn subtitle(self) -> Option<&'static str> {
        match self {
            QuizStep::BellyShape => Some("Choose the side view that best matches your belly shape"),
            QuizStep::ChestShape => {
                Some("Choose the front view that best matches your chest/torso shape")
            }
            _ => None,
        }
    }

    /// Which silhouette a shape step asks about
    pub fn shape_kind(self) -> Option<ShapeKind> {
        match self {
            QuizStep::BellyShape => Some(ShapeKind::Belly),
            QuizStep::ChestShape => Some(ShapeKind::Chest),
            _ => None,
        }
    }

    /// Input contract for this step under the given ranges
    pub fn input(self, validation: &ValidationConfig) -> StepInput {
        match self {
            QuizStep::Height => StepInput::Numeric {
                unit: "cm",
                range: validation.height,
                step: 1.0,
            },
            QuizStep::Weight => StepInput::Numeric {
                unit: "kg",
                range: validation.weight,
                step: 1.0,
            },
            QuizStep::Age => StepInput::Numeric {
                unit: "years",
                range: validation.age,
                step: 1.0,
            },
            QuizStep::Gender | QuizStep::BellyShape | QuizStep::ChestShape => StepInput::Choice,
        }
    }
}

/// Progress through the quiz for a step indicator
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
pub struct Progress {
    pub current: usize,
    pub total: usize,
}

impl Progress {
    pub fn of(step: QuizStep) -> Self {
        Self {
            current: step.index(),
            total: TOTAL_QUIZ_STEPS,
        }
    }

    /// Whole percent complete, rounded
    pub fn percent(&self) -> u32 {
        ((self.current as f64 / self.total as f64) * 100.0).round() as u32
    }
}
