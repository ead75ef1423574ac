//! Quiz state machine.
//!
//! Drives a front end through `welcome -> quiz(step 1..6) -> calculating ->
//! results`, with restart returning to welcome. The machine owns the
//! session's answers and result; front ends only call the inbound operations
//! and read the outbound state.
//!
//! ## Timers
//!
//! Step changes and the calculating hold are delayed. Instead of owning a
//! clock, the machine hands back a [`Timer`] describing the delay; the
//! caller's event loop waits it out and calls [`QuizMachine::fire`]. A timer
//! belongs to the session that scheduled it: starting or restarting a session
//! drops the pending timer, and firing a stale handle does nothing. A zero
//! delay applies the transition immediately.

use crate::config::{Config, DefaultsConfig};
use crate::reference::{get_default_reference, ReferenceData, ShapeOption};
use crate::steps::{Progress, QuizStep, StepInput, TOTAL_QUIZ_STEPS};
use crate::validation::{parse_entry, NumericEntry};
use crate::{
    compute_sizes, BellyShape, ChestShape, Gender, ProductType, QuizData, Result, ShapeKind,
    SizeResult,
};
use serde::Serialize;
use std::borrow::Cow;
use std::time::Duration;
use uuid::Uuid;

/// Which screen the front end should show
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    Welcome,
    Quiz,
    Calculating,
    Results,
}

/// Identifies one scheduled transition of one session
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerHandle {
    session: Uuid,
    seq: u64,
}

/// What happens when a timer fires
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerKind {
    /// Show the next step after the current one has been hidden
    RevealNextStep,
    /// Compute the sizes and show results
    FinishCalculation,
}

/// A transition waiting on a delay
#[derive(Clone, Debug, PartialEq)]
pub struct Timer {
    pub handle: TimerHandle,
    pub kind: TimerKind,
    pub delay: Duration,
}

/// Why the active step cannot move on
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlockReason {
    /// Nothing has been picked on a choice step
    NoSelection,
    /// Shape steps need a gender to show the right silhouettes
    GenderUnset,
    /// The typed entry is not a number
    InvalidEntry,
    /// The value lies outside the step's range
    OutOfRange,
}

/// Result of an inbound operation
#[derive(Clone, Debug, PartialEq)]
pub enum StepOutcome {
    /// The answer was recorded; the step is unchanged
    Updated,
    /// The transition was applied immediately
    Advanced,
    /// The transition waits on a timer
    Scheduled(Timer),
    /// The step's gate is closed
    Blocked(BlockReason),
    /// Not applicable to the current screen or step
    Ignored,
}

/// Everything a renderer needs, as one serializable value
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct QuizView {
    pub screen: Screen,
    pub step: QuizStep,
    pub progress: Progress,
    pub data: QuizData,
    pub result: Option<SizeResult>,
    pub is_calculating: bool,
    pub content_visible: bool,
    pub can_continue: bool,
}

/// The quiz state machine
#[derive(Debug)]
pub struct QuizMachine {
    config: Config,
    reference: Cow<'static, ReferenceData>,
    session: Uuid,
    screen: Screen,
    step: QuizStep,
    data: QuizData,
    result: Option<SizeResult>,
    content_visible: bool,
    entry_invalid: bool,
    pending: Option<Timer>,
    next_seq: u64,
}

fn fresh_data(defaults: &DefaultsConfig) -> QuizData {
    QuizData::with_defaults(defaults.height, defaults.weight, defaults.age)
}

impl QuizMachine {
    /// Create a machine using the built-in reference tables
    pub fn new(config: Config) -> Self {
        Self::build(config, Cow::Borrowed(get_default_reference()))
    }

    /// Create a machine with injected reference tables
    pub fn with_reference(config: Config, reference: ReferenceData) -> Self {
        Self::build(config, Cow::Owned(reference))
    }

    /// Create a machine, loading reference tables from the configured path
    /// when one is set
    pub fn from_config(config: Config) -> Result<Self> {
        match config.reference.path.clone() {
            Some(path) => {
                let reference = ReferenceData::load_from(&path)?;
                Ok(Self::with_reference(config, reference))
            }
            None => Ok(Self::new(config)),
        }
    }

    fn build(config: Config, reference: Cow<'static, ReferenceData>) -> Self {
        let data = fresh_data(&config.defaults);
        Self {
            config,
            reference,
            session: Uuid::new_v4(),
            screen: Screen::Welcome,
            step: QuizStep::Gender,
            data,
            result: None,
            content_visible: false,
            entry_invalid: false,
            pending: None,
            next_seq: 0,
        }
    }

    // ------------------------------------------------------------------
    // Session lifecycle
    // ------------------------------------------------------------------

    /// Begin a new session from the welcome screen
    pub fn start_quiz(&mut self) -> StepOutcome {
        if self.screen != Screen::Welcome {
            tracing::debug!("Ignoring start on {:?} screen", self.screen);
            return StepOutcome::Ignored;
        }

        self.reset_session();
        self.screen = Screen::Quiz;
        self.content_visible = true;
        tracing::info!("Started quiz session {}", self.session);
        StepOutcome::Advanced
    }

    /// Discard the session and return to the welcome screen
    ///
    /// Accepted from any screen; a pending timer is invalidated.
    pub fn restart_quiz(&mut self) {
        let previous = self.session;
        self.reset_session();
        self.screen = Screen::Welcome;
        self.content_visible = false;
        tracing::info!("Restarted quiz (previous session {})", previous);
    }

    fn reset_session(&mut self) {
        if let Some(timer) = self.pending.take() {
            tracing::debug!("Cancelled pending {:?} timer", timer.kind);
        }
        self.session = Uuid::new_v4();
        self.step = QuizStep::Gender;
        self.data = fresh_data(&self.config.defaults);
        self.result = None;
        self.entry_invalid = false;
    }

    // ------------------------------------------------------------------
    // Inbound step operations
    // ------------------------------------------------------------------

    /// Whether operations for `step` are currently accepted
    fn accepting(&self, step: QuizStep) -> bool {
        let accepting = self.screen == Screen::Quiz && self.step == step && self.pending.is_none();
        if !accepting {
            tracing::debug!(
                "Ignoring input for {:?} (screen {:?}, step {:?}, pending {})",
                step,
                self.screen,
                self.step,
                self.pending.is_some()
            );
        }
        accepting
    }

    /// Pick a gender; completes the gender step
    pub fn select_gender(&mut self, gender: Gender) -> StepOutcome {
        if !self.accepting(QuizStep::Gender) {
            return StepOutcome::Ignored;
        }
        self.data.gender = Some(gender);
        self.advance()
    }

    pub fn set_height(&mut self, cm: f64) -> StepOutcome {
        self.set_measurement(QuizStep::Height, cm)
    }

    pub fn set_weight(&mut self, kg: f64) -> StepOutcome {
        self.set_measurement(QuizStep::Weight, kg)
    }

    pub fn set_age(&mut self, years: f64) -> StepOutcome {
        self.set_measurement(QuizStep::Age, years)
    }

    /// Height from raw text; an empty entry applies the default
    pub fn enter_height(&mut self, raw: &str) -> StepOutcome {
        self.enter_measurement(QuizStep::Height, raw)
    }

    /// Weight from raw text; an empty entry applies the default
    pub fn enter_weight(&mut self, raw: &str) -> StepOutcome {
        self.enter_measurement(QuizStep::Weight, raw)
    }

    /// Age from raw text; an empty entry applies the default
    pub fn enter_age(&mut self, raw: &str) -> StepOutcome {
        self.enter_measurement(QuizStep::Age, raw)
    }

    fn set_measurement(&mut self, step: QuizStep, value: f64) -> StepOutcome {
        if !self.accepting(step) {
            return StepOutcome::Ignored;
        }
        match step {
            QuizStep::Height => self.data.height = value,
            QuizStep::Weight => self.data.weight = value,
            QuizStep::Age => self.data.age = value,
            _ => return StepOutcome::Ignored,
        }
        self.entry_invalid = false;
        StepOutcome::Updated
    }

    fn enter_measurement(&mut self, step: QuizStep, raw: &str) -> StepOutcome {
        match parse_entry(raw) {
            NumericEntry::Value(value) => self.set_measurement(step, value),
            NumericEntry::Empty => {
                let defaults = &self.config.defaults;
                let value = match step {
                    QuizStep::Height => defaults.height,
                    QuizStep::Weight => defaults.weight,
                    _ => defaults.age,
                };
                self.set_measurement(step, value)
            }
            NumericEntry::Invalid => {
                if !self.accepting(step) {
                    return StepOutcome::Ignored;
                }
                tracing::debug!("Rejected entry {:?} for {:?}", raw, step);
                self.entry_invalid = true;
                StepOutcome::Updated
            }
        }
    }

    /// Confirm a numeric step
    pub fn continue_step(&mut self) -> StepOutcome {
        if self.screen != Screen::Quiz || self.pending.is_some() {
            return StepOutcome::Ignored;
        }
        if !matches!(self.step_input(), StepInput::Numeric { .. }) {
            tracing::debug!("{:?} has no continue action", self.step);
            return StepOutcome::Ignored;
        }
        match self.gate() {
            Some(reason) => StepOutcome::Blocked(reason),
            None => self.advance(),
        }
    }

    /// Pick a belly silhouette; completes the belly step
    pub fn select_belly_shape(&mut self, shape: BellyShape) -> StepOutcome {
        if !self.accepting(QuizStep::BellyShape) {
            return StepOutcome::Ignored;
        }
        if self.data.gender.is_none() {
            return StepOutcome::Blocked(BlockReason::GenderUnset);
        }
        self.data.belly_shape = Some(shape);
        self.advance()
    }

    /// Pick a chest silhouette; completes the quiz
    pub fn select_chest_shape(&mut self, shape: ChestShape) -> StepOutcome {
        if !self.accepting(QuizStep::ChestShape) {
            return StepOutcome::Ignored;
        }
        if self.data.gender.is_none() {
            return StepOutcome::Blocked(BlockReason::GenderUnset);
        }
        self.data.chest_shape = Some(shape);
        self.advance()
    }

    /// Choose the product the results should be worded for
    ///
    /// Not a step of its own; accepted at any point of the quiz screen.
    pub fn select_product_type(&mut self, product: ProductType) -> StepOutcome {
        if self.screen != Screen::Quiz {
            tracing::debug!("Ignoring product selection on {:?} screen", self.screen);
            return StepOutcome::Ignored;
        }
        self.data.product_type = Some(product);
        StepOutcome::Updated
    }

    /// Fire a timer previously handed out by this machine
    ///
    /// Returns `false` for a stale or unknown handle, which changes nothing.
    pub fn fire(&mut self, handle: TimerHandle) -> bool {
        match self.pending.take() {
            Some(timer) if timer.handle == handle => {
                self.apply(timer.kind);
                true
            }
            other => {
                self.pending = other;
                tracing::warn!("Ignoring stale timer {:?}", handle);
                false
            }
        }
    }

    // ------------------------------------------------------------------
    // Transitions
    // ------------------------------------------------------------------

    fn advance(&mut self) -> StepOutcome {
        self.content_visible = false;
        if self.step.is_last() {
            self.screen = Screen::Calculating;
            tracing::debug!("Final step complete, calculating");
            self.schedule(TimerKind::FinishCalculation, self.config.timing.calculating())
        } else {
            self.schedule(TimerKind::RevealNextStep, self.config.timing.transition())
        }
    }

    fn schedule(&mut self, kind: TimerKind, delay: Duration) -> StepOutcome {
        if delay.is_zero() {
            self.apply(kind);
            return StepOutcome::Advanced;
        }

        let timer = Timer {
            handle: TimerHandle {
                session: self.session,
                seq: self.next_seq,
            },
            kind,
            delay,
        };
        self.next_seq += 1;
        self.pending = Some(timer.clone());
        StepOutcome::Scheduled(timer)
    }

    fn apply(&mut self, kind: TimerKind) {
        match kind {
            TimerKind::RevealNextStep => {
                if let Some(next) = self.step.next() {
                    self.step = next;
                }
                self.entry_invalid = false;
                self.content_visible = true;
                tracing::debug!("Showing step {} of {}", self.step.index(), TOTAL_QUIZ_STEPS);
            }
            TimerKind::FinishCalculation => {
                let result = compute_sizes(&self.data);
                tracing::info!(
                    "Session {} complete: top {}, bottom {}, fit {}",
                    self.session,
                    result.top_size,
                    result.bottom_size,
                    result.fit_recommendation
                );
                self.result = Some(result);
                self.screen = Screen::Results;
            }
        }
    }

    /// The reason the active step cannot move on, if any
    fn gate(&self) -> Option<BlockReason> {
        let validation = &self.config.validation;
        let numeric = |value: f64, range: &crate::validation::MeasurementRange| {
            if self.entry_invalid {
                Some(BlockReason::InvalidEntry)
            } else if !range.contains(value) {
                Some(BlockReason::OutOfRange)
            } else {
                None
            }
        };

        match self.step {
            QuizStep::Gender => self.data.gender.is_none().then_some(BlockReason::NoSelection),
            QuizStep::Height => numeric(self.data.height, &validation.height),
            QuizStep::Weight => numeric(self.data.weight, &validation.weight),
            QuizStep::Age => numeric(self.data.age, &validation.age),
            QuizStep::BellyShape | QuizStep::ChestShape if self.data.gender.is_none() => {
                Some(BlockReason::GenderUnset)
            }
            QuizStep::BellyShape => self.data.belly_shape.is_none().then_some(BlockReason::NoSelection),
            QuizStep::ChestShape => self.data.chest_shape.is_none().then_some(BlockReason::NoSelection),
        }
    }

    // ------------------------------------------------------------------
    // Outbound state
    // ------------------------------------------------------------------

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn step(&self) -> QuizStep {
        self.step
    }

    /// 1-based index of the active step
    pub fn step_index(&self) -> usize {
        self.step.index()
    }

    pub fn total_steps(&self) -> usize {
        TOTAL_QUIZ_STEPS
    }

    pub fn progress(&self) -> Progress {
        Progress::of(self.step)
    }

    pub fn data(&self) -> &QuizData {
        &self.data
    }

    pub fn result(&self) -> Option<&SizeResult> {
        self.result.as_ref()
    }

    pub fn is_calculating(&self) -> bool {
        self.screen == Screen::Calculating
    }

    pub fn is_content_visible(&self) -> bool {
        self.content_visible
    }

    /// Whether the active step's continue action is enabled
    pub fn can_continue(&self) -> bool {
        self.screen == Screen::Quiz && self.pending.is_none() && self.gate().is_none()
    }

    pub fn pending_timer(&self) -> Option<&Timer> {
        self.pending.as_ref()
    }

    pub fn session_id(&self) -> Uuid {
        self.session
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn reference(&self) -> &ReferenceData {
        &self.reference
    }

    /// Input contract of the active step
    pub fn step_input(&self) -> StepInput {
        self.step.input(&self.config.validation)
    }

    /// Silhouette options for the selected gender, or `None` while gender is
    /// unset
    pub fn shape_options(&self, kind: ShapeKind) -> Option<Vec<ShapeOption>> {
        self.data
            .gender
            .map(|gender| self.reference.shape_options(gender, kind))
    }

    pub fn snapshot(&self) -> QuizView {
        QuizView {
            screen: self.screen,
            step: self.step,
            progress: self.progress(),
            data: self.data.clone(),
            result: self.result.clone(),
            is_calculating: self.is_calculating(),
            content_visible: self.content_visible,
            can_continue: self.can_continue(),
        }
    }
}
