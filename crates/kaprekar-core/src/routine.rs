//! Kaprekar Routine: validation, single step, and iteration to 6174
use crate::config::RoutineConfig;
use crate::data_model::{Candidate, Outcome, PaddedValue, Sequence, Step, Transform};
use crate::error::KaprekarError;

/// Validates raw text as a candidate.
///
/// The text must parse as an integer in [0, 9999]. Values below 1000 are read
/// zero-padded, so `"123"` is the candidate `0123` while `"7"` (`0007`) repeats
/// a zero and is rejected.
pub fn validate(input: &str) -> Result<Candidate, KaprekarError> {
    let trimmed = input.trim();
    let number: i64 = trimmed.parse().map_err(|_| {
        KaprekarError::NotFourDigits(format!("{:?} is not an integer", trimmed))
    })?;
    validate_number(number)
}

pub fn validate_number(number: i64) -> Result<Candidate, KaprekarError> {
    let value = u16::try_from(number)
        .ok()
        .and_then(PaddedValue::new)
        .ok_or_else(|| {
            KaprekarError::NotFourDigits(format!("{} is outside 0..=9999", number))
        })?;
    Candidate::new(value)
}

/// Applies one descending-minus-ascending transformation.
///
/// Digits always come from the zero-padded form, so `999` sorts as `9990 - 0999`.
pub fn step(value: PaddedValue) -> Transform {
    let mut digits = value.digits();
    digits.sort_unstable();
    let ascending = PaddedValue::from_digits(digits);
    digits.reverse();
    let descending = PaddedValue::from_digits(digits);

    // descending >= ascending by construction
    let difference = descending.saturating_sub(ascending);

    Transform {
        descending,
        ascending,
        difference,
    }
}

/// Runs the routine from `candidate` until 6174 or `max_steps` transformations.
pub fn run(candidate: Candidate, max_steps: usize) -> Sequence {
    let mut current = candidate.value();
    let mut steps = vec![Step::start(current)];

    if current.is_kaprekar() {
        tracing::info!(candidate = %candidate, "candidate is already Kaprekar's constant");
        return finish(candidate, max_steps, steps, Outcome::Converged);
    }

    for index in 1..=max_steps {
        let transform = step(current);
        tracing::debug!(step = index, %transform, "kaprekar step");
        steps.push(Step::transformed(index, transform));
        current = transform.difference;

        if current.is_kaprekar() {
            tracing::info!(candidate = %candidate, steps = index, "reached 6174");
            return finish(candidate, max_steps, steps, Outcome::Converged);
        }
    }

    tracing::warn!(
        candidate = %candidate,
        max_steps,
        last = %current,
        "step limit exhausted before reaching 6174"
    );
    finish(candidate, max_steps, steps, Outcome::Exhausted)
}

pub fn run_with(candidate: Candidate, config: &RoutineConfig) -> Sequence {
    run(candidate, config.max_steps)
}

fn finish(candidate: Candidate, max_steps: usize, steps: Vec<Step>, outcome: Outcome) -> Sequence {
    Sequence {
        candidate,
        max_steps,
        steps,
        outcome,
    }
}
