//! KAPREKAR-OUT: Sequence to Plain-Text Report
//!
//! This crate provides the presentation layer: it turns a finished
//! [`Sequence`] into a human-readable report with an outcome banner, a
//! step-by-step table and a closing summary.
//!
//! # Example
//!
//! ```
//! use kaprekar_core::{run, validate};
//! use kaprekar_out::render_report;
//!
//! let sequence = run(validate("1234").unwrap(), 50);
//! let report = render_report(&sequence).unwrap();
//! assert!(report.contains("8532 - 2358 = 6174"));
//! ```

pub mod renderer;
pub mod templates;

use kaprekar_core::{Sequence, Step};
use renderer::TemplateRenderer;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;

/// Request to render a sequence
#[derive(Debug, Clone, Deserialize)]
pub struct RenderRequest {
    /// Sequence to render
    pub sequence: Sequence,
    /// Path to a templates file (optional, uses the built-in set if not provided)
    pub templates_path: Option<String>,
}

/// Result of a render operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderResult {
    /// The rendered report
    pub output: String,
    /// Where the templates came from
    pub templates_source: String,
}

/// Errors that can occur during rendering
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("TEMPLATE/LOAD: {0}")]
    Template(String),
    #[error("TEMPLATE/MISSING: {0}")]
    Missing(String),
    #[error("TEMPLATE/RENDER: {0}")]
    Render(String),
}

/// Title line above the step table
const TABLE_TITLE: &str = "Step-by-Step Sequence";

/// Render a sequence with the given request
pub fn render(request: RenderRequest) -> Result<RenderResult, RenderError> {
    let (renderer, templates_source) = match request.templates_path.as_deref() {
        Some(path) => {
            let file = templates::TemplatesFile::load(path).map_err(RenderError::Template)?;
            let missing = file.missing_report_templates();
            if !missing.is_empty() {
                return Err(RenderError::Missing(missing.join(", ")));
            }
            let renderer = TemplateRenderer::new(&file).map_err(RenderError::Template)?;
            (renderer, path.to_string())
        }
        None => (
            TemplateRenderer::builtin().map_err(RenderError::Template)?,
            "builtin".to_string(),
        ),
    };

    let output = render_report_with(&request.sequence, &renderer)?;
    Ok(RenderResult {
        output,
        templates_source,
    })
}

/// Render a sequence with the built-in templates
pub fn render_report(sequence: &Sequence) -> Result<String, RenderError> {
    let renderer = TemplateRenderer::builtin().map_err(RenderError::Template)?;
    render_report_with(sequence, &renderer)
}

/// Render a sequence with an already compiled renderer
pub fn render_report_with(
    sequence: &Sequence,
    renderer: &TemplateRenderer,
) -> Result<String, RenderError> {
    let data = report_data(sequence);
    let render = |name: &str, data: &Value| renderer.render(name, data).map_err(RenderError::Render);

    let mut lines = vec![
        render("banner", &data)?,
        String::new(),
        TABLE_TITLE.to_string(),
        render("header", &data)?,
    ];
    if let Some(rows) = data["rows"].as_array() {
        for row in rows {
            lines.push(render("row", row)?);
        }
    }
    lines.push(String::new());
    lines.push(render("summary", &data)?);

    Ok(lines.join("\n"))
}

/// The JSON view of a sequence that report templates consume
pub fn report_data(sequence: &Sequence) -> Value {
    let last = sequence.steps.len().saturating_sub(1);
    let rows: Vec<Value> = sequence
        .steps
        .iter()
        .enumerate()
        .map(|(i, step)| row_data(step, sequence.converged() && i == last))
        .collect();

    json!({
        "start": sequence.candidate.padded(),
        "steps": sequence.step_count(),
        "max_steps": sequence.max_steps,
        "final": sequence.final_value().padded(),
        "converged": sequence.converged(),
        "rows": rows,
    })
}

fn row_data(step: &Step, terminal: bool) -> Value {
    json!({
        "label": step.label.to_string(),
        "value": step.value.padded(),
        "transform": step.transform.map(|t| json!({
            "descending": t.descending_form(),
            "ascending": t.ascending_form(),
            "difference": t.difference.padded(),
        })),
        "constant": terminal && !step.is_start(),
    })
}

/// Render a one-off template string against arbitrary data
pub fn render_string(template: &str, data: &Value) -> Result<String, RenderError> {
    let empty = templates::TemplatesFile {
        version: "1.0".to_string(),
        templates: Default::default(),
    };
    let renderer = TemplateRenderer::new(&empty).map_err(RenderError::Template)?;
    renderer.render_string(template, data).map_err(RenderError::Render)
}

/// Quick render helpers for log lines and short responses
pub mod quick {
    use super::*;

    /// One-line outcome of a run
    pub fn headline(sequence: &Sequence) -> String {
        render_string(
            "{{start}} {{#if converged}}reached 6174 in {{steps}} steps{{else}}did not reach 6174 within {{steps}} steps{{/if}}",
            &report_data(sequence),
        )
        .unwrap_or_else(|_| format!("{} finished after {} steps", sequence.candidate, sequence.step_count()))
    }
}
