#![forbid(unsafe_code)]

//! Core domain model and business logic for the fitquiz size finder.
//!
//! This crate provides:
//! - Domain types (quiz answers, body-shape keys, size results)
//! - Size estimation engine
//! - Quiz state machine with session-owned timers
//! - Reference tables (silhouettes, height options)
//! - Configuration and logging

pub mod types;
pub mod error;
pub mod units;
pub mod validation;
pub mod config;
pub mod logging;
pub mod reference;
pub mod steps;
pub mod engine;
pub mod quiz;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use config::Config;
pub use engine::{bmi, compute_sizes};
pub use reference::{get_default_reference, ReferenceData};
pub use steps::{Progress, QuizStep, StepInput, TOTAL_QUIZ_STEPS};
pub use quiz::{BlockReason, QuizMachine, QuizView, Screen, StepOutcome, Timer, TimerKind};
