//! Sequence verification
//!
//! Re-derives every step of a [`Sequence`] received from elsewhere (an API
//! client, a stored report) and reports each invariant as a named check.

use serde::{Deserialize, Serialize};

use crate::data_model::{Outcome, Sequence, StepLabel};
use crate::routine::step;

/// Single check result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Check {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckStatus {
    Ok,
    Fail,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyReport {
    pub ok: bool,
    pub checks: Vec<Check>,
}

impl VerifyReport {
    pub fn failures(&self) -> impl Iterator<Item = &Check> {
        self.checks.iter().filter(|c| c.status == CheckStatus::Fail)
    }
}

fn check(name: &str, passed: bool, message: String) -> Check {
    Check {
        name: name.to_string(),
        status: if passed { CheckStatus::Ok } else { CheckStatus::Fail },
        message,
    }
}

pub fn verify(sequence: &Sequence) -> VerifyReport {
    let mut checks = Vec::new();

    // === Start step ===
    match sequence.steps.first() {
        Some(first) => checks.push(check(
            "start_step",
            first.is_start()
                && first.transform.is_none()
                && first.value == sequence.candidate.value(),
            format!(
                "first step is {} with value {} (candidate {})",
                first.label, first.value, sequence.candidate
            ),
        )),
        None => checks.push(check("start_step", false, "sequence has no steps".to_string())),
    }

    // === Transformation steps ===
    let mut chain_ok = true;
    let mut chain_message = format!("{} transformation steps re-derived", sequence.step_count());
    for (i, pair) in sequence.steps.windows(2).enumerate() {
        let (prev, current) = (&pair[0], &pair[1]);
        let expected = step(prev.value);
        let problem = if current.label != StepLabel::Index(i + 1) {
            Some(format!("step {} is labelled {}", i + 1, current.label))
        } else if current.transform != Some(expected) {
            Some(format!(
                "step {} should be {} from {}",
                i + 1,
                expected,
                prev.value
            ))
        } else if current.value != expected.difference {
            Some(format!(
                "step {} value {} differs from its difference {}",
                i + 1,
                current.value,
                expected.difference
            ))
        } else {
            None
        };
        if let Some(message) = problem {
            chain_ok = false;
            chain_message = message;
            break;
        }
    }
    checks.push(check("transform_chain", chain_ok, chain_message));

    // === Fixed point only at the end ===
    let early = sequence
        .steps
        .iter()
        .rev()
        .skip(1)
        .position(|s| s.value.is_kaprekar());
    checks.push(check(
        "terminal_constant",
        early.is_none(),
        match early {
            None => "6174 appears only as the final value".to_string(),
            Some(_) => "6174 appears before the final step".to_string(),
        },
    ));

    // === Outcome ===
    let last_is_constant = sequence.final_value().is_kaprekar();
    let outcome_ok = match sequence.outcome {
        Outcome::Converged => last_is_constant && sequence.step_count() <= sequence.max_steps,
        Outcome::Exhausted => !last_is_constant && sequence.step_count() == sequence.max_steps,
    };
    checks.push(check(
        "outcome",
        outcome_ok,
        format!(
            "{:?} after {} of {} steps, final value {}",
            sequence.outcome,
            sequence.step_count(),
            sequence.max_steps,
            sequence.final_value()
        ),
    ));

    let ok = checks.iter().all(|c| c.status == CheckStatus::Ok);
    if !ok {
        tracing::debug!(candidate = %sequence.candidate, "sequence failed verification");
    }
    VerifyReport { ok, checks }
}
