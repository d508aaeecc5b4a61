//! API Handlers
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use kaprekar_core::{run_with, ErrorKind, Sequence, VerifyReport};
use kaprekar_in::{acquire, AcquireRequest, AcquireResult};
use kaprekar_out::{quick, render_report, RenderError};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::AppState;

const TEXT_PLAIN: &str = "text/plain; charset=utf-8";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Text,
}

#[derive(Debug, Default, Deserialize)]
pub struct RunQuery {
    pub max_steps: Option<usize>,
    #[serde(default)]
    pub format: OutputFormat,
}

/// Input as sent by a client: any JSON number or raw text.
///
/// Numbers are passed on as written, so out-of-range and fractional values
/// still reach validation and get a typed rejection.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawInput {
    Number(serde_json::Number),
    Text(String),
}

impl RawInput {
    fn into_text(self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RunRequest {
    pub input: RawInput,
    pub max_steps: Option<usize>,
    #[serde(default)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub kind: Option<ErrorKind>,
    pub message: String,
    pub clarification: Option<String>,
    pub suggestions: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunResponse {
    pub converged: bool,
    pub steps: usize,
    pub headline: String,
    /// Present when the step budget ran out
    pub exhausted: Option<ErrorBody>,
    pub sequence: Sequence,
}

impl From<Sequence> for RunResponse {
    fn from(sequence: Sequence) -> Self {
        let exhausted = sequence.check_converged().err().map(|e| ErrorBody {
            kind: Some(e.kind()),
            message: e.to_string(),
            clarification: None,
            suggestions: None,
        });
        Self {
            converged: sequence.converged(),
            steps: sequence.step_count(),
            headline: quick::headline(&sequence),
            exhausted,
            sequence,
        }
    }
}

#[derive(Debug)]
pub enum ApiError {
    Rejected(AcquireResult),
    /// Body or query string could not be decoded
    Malformed(StatusCode, String),
    Render(RenderError),
    Metrics(prometheus::Error),
}

impl From<RenderError> for ApiError {
    fn from(e: RenderError) -> Self {
        Self::Render(e)
    }
}

impl From<prometheus::Error> for ApiError {
    fn from(e: prometheus::Error) -> Self {
        Self::Metrics(e)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(e: JsonRejection) -> Self {
        Self::Malformed(e.status(), e.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(e: QueryRejection) -> Self {
        Self::Malformed(e.status(), e.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            Self::Rejected(result) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorBody {
                    kind: result.error_kind,
                    message: result.error.unwrap_or_default(),
                    clarification: result.clarification,
                    suggestions: result.suggestions,
                },
            ),
            Self::Malformed(status, message) => {
                tracing::debug!(%status, %message, "malformed request");
                (
                    status,
                    ErrorBody {
                        kind: None,
                        message,
                        clarification: None,
                        suggestions: None,
                    },
                )
            }
            Self::Render(e) => (StatusCode::INTERNAL_SERVER_ERROR, internal(e.to_string())),
            Self::Metrics(e) => (StatusCode::INTERNAL_SERVER_ERROR, internal(e.to_string())),
        };
        (status, Json(json!({ "error": body }))).into_response()
    }
}

fn internal(message: String) -> ErrorBody {
    tracing::error!(%message, "request failed");
    ErrorBody {
        kind: None,
        message,
        clarification: None,
        suggestions: None,
    }
}

fn respond(
    state: &AppState,
    text: String,
    max_steps: Option<usize>,
    format: OutputFormat,
) -> Result<Response, ApiError> {
    let acquired = acquire(AcquireRequest { text });
    let candidate = match acquired.candidate {
        Some(candidate) => candidate,
        None => {
            if let Some(kind) = acquired.error_kind {
                state.metrics.observe_rejection(kind);
            }
            return Err(ApiError::Rejected(acquired));
        }
    };

    let config = max_steps.map_or(state.config, |m| state.config.with_max_steps(m));
    let sequence = run_with(candidate, &config);
    state.metrics.observe_run(&sequence);
    tracing::info!(max_steps = config.max_steps, "{}", quick::headline(&sequence));

    match format {
        OutputFormat::Json => Ok(Json(RunResponse::from(sequence)).into_response()),
        OutputFormat::Text => {
            let report = render_report(&sequence)?;
            Ok(([(header::CONTENT_TYPE, TEXT_PLAIN)], report).into_response())
        }
    }
}

pub async fn run_path(
    State(state): State<AppState>,
    Path(input): Path<String>,
    query: Result<Query<RunQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(query) = query?;
    respond(&state, input, query.max_steps, query.format)
}

pub async fn run_body(
    State(state): State<AppState>,
    request: Result<Json<RunRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(request) = request?;
    respond(
        &state,
        request.input.into_text(),
        request.max_steps,
        request.format,
    )
}

pub async fn verify(
    sequence: Result<Json<Sequence>, JsonRejection>,
) -> Result<Json<VerifyReport>, ApiError> {
    let Json(sequence) = sequence?;
    Ok(Json(kaprekar_core::verify(&sequence)))
}

pub async fn survey(State(state): State<AppState>) -> Json<kaprekar_core::SurveyReport> {
    Json(kaprekar_core::survey(&state.config))
}

pub async fn metrics(State(state): State<AppState>) -> Result<Response, ApiError> {
    let text = state.metrics.encode()?;
    Ok(([(header::CONTENT_TYPE, TEXT_PLAIN)], text).into_response())
}

pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "version": env!("CARGO_PKG_VERSION"),
            "max_steps": state.config.max_steps,
        })),
    )
}
