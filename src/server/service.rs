//! Router and request handlers.

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use tracing::debug;

use super::response::{
    ApiError, CLASSIFY_ENTRY, ClassifyBody, ClassifyForm, HealthBody, IndexBody,
    QuestionnaireBody, RefineBody, questionnaire_path, refine_path,
};
use crate::refiner::Refiner;
use crate::session::{SessionId, SessionStore};
use crate::version;

/// Shared, read-mostly state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub refiner: Arc<Refiner>,
    pub sessions: Arc<SessionStore>,
}

impl AppState {
    pub fn new(refiner: Arc<Refiner>, sessions: Arc<SessionStore>) -> Self {
        Self { refiner, sessions }
    }
}

/// Build the service router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/classify", post(classify))
        .route("/questionnaire/:session", get(questionnaire))
        .route("/refine/:session", post(refine))
        .with_state(state)
}

async fn index(State(state): State<AppState>) -> Json<IndexBody> {
    Json(IndexBody {
        service: version::PKG_NAME.to_string(),
        version: version::PKG_VERSION.to_string(),
        classify: "/classify".to_string(),
        questions: state.refiner.catalog().len(),
    })
}

async fn health() -> Json<HealthBody> {
    Json(HealthBody {
        status: "ok".to_string(),
        version: version::version_string(),
    })
}

async fn classify(
    State(state): State<AppState>,
    Form(form): Form<ClassifyForm>,
) -> Result<Json<ClassifyBody>, ApiError> {
    let classified = state.refiner.classify(&form.name)?;
    let session_id = state.sessions.open(classified.classification.clone());
    debug!(session = %session_id, "opened session");

    Ok(Json(ClassifyBody {
        session_id,
        classification: classified.classification,
        ambiguous: classified.ambiguous,
        questionnaire: questionnaire_path(&session_id),
    }))
}

async fn questionnaire(
    State(state): State<AppState>,
    Path(session): Path<String>,
) -> Result<Json<QuestionnaireBody>, ApiError> {
    let session_id: SessionId = session.parse()?;
    let classification = state.sessions.get(&session_id)?;

    Ok(Json(QuestionnaireBody {
        session_id,
        name: classification.name,
        questions: state.refiner.catalog().questions().to_vec(),
        submit: refine_path(&session_id),
    }))
}

async fn refine(
    State(state): State<AppState>,
    Path(session): Path<String>,
    Form(fields): Form<HashMap<String, String>>,
) -> Result<Json<RefineBody>, ApiError> {
    let session_id: SessionId = session.parse()?;
    let classification = state.sessions.get(&session_id)?;
    let result = state
        .refiner
        .refine_form(&classification, &fields)
        .map_err(|e| ApiError::new(e).in_session(session_id))?;

    Ok(Json(RefineBody {
        session_id,
        name: classification.name,
        result,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_paths() {
        let id = SessionId::new();
        assert_eq!(CLASSIFY_ENTRY, "/");
        assert_eq!(questionnaire_path(&id), format!("/questionnaire/{id}"));
        assert_eq!(refine_path(&id), format!("/refine/{id}"));
    }
}
