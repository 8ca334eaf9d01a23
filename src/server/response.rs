//! Wire types and error responses.

use axum::Json;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::NamecastError;
use crate::error::{EntryPoint, ErrorKind};
use crate::session::SessionId;
use crate::types::{ClassificationResult, CombinedResult, Question};

/// Form body of `POST /classify`.
#[derive(Debug, Deserialize)]
pub struct ClassifyForm {
    /// Missing and blank names are both rejected by the refiner.
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct IndexBody {
    pub service: String,
    pub version: String,
    pub classify: String,
    pub questions: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthBody {
    pub status: String,
    pub version: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ClassifyBody {
    pub session_id: SessionId,
    pub classification: ClassificationResult,
    pub ambiguous: bool,
    /// Where to fetch the questionnaire for this session.
    pub questionnaire: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct QuestionnaireBody {
    pub session_id: SessionId,
    pub name: String,
    pub questions: Vec<Question>,
    /// Where to submit the answers.
    pub submit: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RefineBody {
    pub session_id: SessionId,
    pub name: String,
    #[serde(flatten)]
    pub result: CombinedResult,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
}

/// Path of the classification entry point.
pub const CLASSIFY_ENTRY: &str = "/";

/// Path of the questionnaire for a session.
pub fn questionnaire_path(session: &SessionId) -> String {
    format!("/questionnaire/{session}")
}

/// Path answers are submitted to for a session.
pub fn refine_path(session: &SessionId) -> String {
    format!("/refine/{session}")
}

/// A [`NamecastError`] with the session it happened in, if known.
#[derive(Debug)]
pub struct ApiError {
    error: NamecastError,
    session: Option<SessionId>,
}

impl ApiError {
    pub fn new(error: NamecastError) -> Self {
        Self {
            error,
            session: None,
        }
    }

    /// Attach the session the error occurred in.
    pub fn in_session(mut self, session: SessionId) -> Self {
        self.session = Some(session);
        self
    }

    /// Redirect target for recoverable errors.
    fn redirect(&self) -> Option<String> {
        match self.error.recovery()? {
            EntryPoint::Classification => Some(CLASSIFY_ENTRY.to_string()),
            EntryPoint::Questionnaire => Some(
                self.session
                    .as_ref()
                    .map_or_else(|| CLASSIFY_ENTRY.to_string(), questionnaire_path),
            ),
        }
    }
}

impl From<NamecastError> for ApiError {
    fn from(error: NamecastError) -> Self {
        Self::new(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let kind = self.error.kind();
        let redirect = self.redirect();
        let body = ErrorBody {
            error: self.error.to_string(),
            kind: kind.as_str().to_string(),
            redirect: redirect.clone(),
        };

        match redirect {
            Some(location) => {
                debug!(error = %self.error, %location, "redirecting after recoverable error");
                (
                    StatusCode::SEE_OTHER,
                    [(header::LOCATION, location)],
                    Json(body),
                )
                    .into_response()
            }
            None if kind == ErrorKind::InputValidation => {
                (StatusCode::BAD_REQUEST, Json(body)).into_response()
            }
            None => {
                error!(error = %self.error, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
            }
        }
    }
}
