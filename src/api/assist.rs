//! Assist endpoint: one recorded utterance in, one answered reply out

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use base64::Engine as _;
use serde::Serialize;

use super::ApiState;
use crate::pipeline::PipelineError;

/// Build assist router
pub fn router(state: Arc<ApiState>) -> Router {
    Router::new()
        .route("/assist", post(assist))
        .with_state(state)
}

/// Assist response: the three artifacts of one pipeline run
#[derive(Debug, Serialize)]
pub struct AssistResponse {
    /// What the user said
    pub transcript: String,
    /// Displayed assistant response (at most a few sentences)
    pub summary: String,
    /// Base64-encoded MP3 of the spoken (full) answer
    pub audio: String,
}

/// Run the assist pipeline for one recorded utterance
///
/// Accepts raw audio bytes (WAV or `WebM`) as the request body.
async fn assist(
    State(state): State<Arc<ApiState>>,
    body: Bytes,
) -> Result<Json<AssistResponse>, AssistError> {
    let pipeline = state
        .pipeline
        .as_ref()
        .ok_or(AssistError::NotConfigured("voice pipeline not configured"))?;

    if body.is_empty() {
        return Err(AssistError::BadRequest("Empty audio data"));
    }

    let outcome = pipeline.run(&body).await?;

    Ok(Json(AssistResponse {
        transcript: outcome.transcript,
        summary: outcome.summary,
        audio: base64::engine::general_purpose::STANDARD.encode(outcome.audio),
    }))
}

/// Assist API errors
#[derive(Debug)]
pub enum AssistError {
    NotConfigured(&'static str),
    BadRequest(&'static str),
    Pipeline(PipelineError),
}

impl From<PipelineError> for AssistError {
    fn from(e: PipelineError) -> Self {
        Self::Pipeline(e)
    }
}

impl IntoResponse for AssistError {
    fn into_response(self) -> Response {
        #[derive(Serialize)]
        struct ErrorResponse {
            error: ErrorBody,
        }

        #[derive(Serialize)]
        struct ErrorBody {
            code: &'static str,
            message: String,
        }

        let (status, code, message) = match self {
            Self::NotConfigured(msg) => {
                (StatusCode::SERVICE_UNAVAILABLE, "not_configured", msg.to_string())
            }
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg.to_string()),
            Self::Pipeline(e) => {
                let code = match &e {
                    PipelineError::UnintelligibleAudio => "unintelligible_audio",
                    PipelineError::SttUnavailable(_) => "stt_unavailable",
                    PipelineError::SynthesisFailed(_) => "synthesis_failed",
                };
                let status = match &e {
                    PipelineError::UnintelligibleAudio => StatusCode::UNPROCESSABLE_ENTITY,
                    _ => StatusCode::BAD_GATEWAY,
                };
                (status, code, e.to_string())
            }
        };

        (
            status,
            Json(ErrorResponse {
                error: ErrorBody { code, message },
            }),
        )
            .into_response()
    }
}
