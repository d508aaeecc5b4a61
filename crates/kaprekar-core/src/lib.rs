//! Kaprekar Core: validation, step, and run for Kaprekar's routine
//!
//! Repeatedly sorts a 4-digit value's digits descending and ascending and
//! subtracts, until the fixed point 6174 or a step budget is reached. Pure and
//! synchronous; presentation and input acquisition live in sibling crates.

pub mod config;
pub mod data_model;
pub mod error;
pub mod routine;
pub mod survey;
pub mod verify;

pub use config::{RoutineConfig, DEFAULT_MAX_STEPS};
pub use data_model::{Candidate, Outcome, PaddedValue, Sequence, Step, StepLabel, Transform};
pub use error::{ErrorKind, KaprekarError};
pub use routine::{run, run_with, step, validate, validate_number};
pub use survey::{candidates, survey, SurveyReport};
pub use verify::{verify, VerifyReport};

/// Kaprekar's constant
pub const KAPREKAR_CONSTANT: u16 = 6174;
