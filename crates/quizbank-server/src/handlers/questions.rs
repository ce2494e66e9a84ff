//! Question handlers
//!
//! Each handler validates its payload before opening a database session, so
//! a rejected request never touches storage. Writes commit exactly once.

use crate::error::{ApiError, ApiResult};
use crate::AppState;
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use quizbank_types::{Question, QuestionBase};
use tracing::{debug, info};

pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<Question>>> {
    let mut session = state.db.session().await?;
    let questions = session.list_questions().await?;

    debug!("Listed {} questions", questions.len());
    Ok(Json(questions))
}

pub async fn get(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Question>> {
    let Path(id) = id?;

    let mut session = state.db.session().await?;
    let question = session
        .find_question(id)
        .await?
        .ok_or_else(ApiError::question_not_found)?;

    debug!("Fetched question {}", id);
    Ok(Json(question))
}

pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<QuestionBase>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Question>)> {
    let Json(payload) = payload?;
    let payload = payload.validate()?;

    let mut session = state.db.session().await?;
    let question = session.insert_question(&payload).await?;
    session.commit().await?;

    info!(
        "Created question {} with {} choices",
        question.id,
        question.choices.len()
    );
    Ok((StatusCode::CREATED, Json(question)))
}

pub async fn update(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<QuestionBase>, JsonRejection>,
) -> ApiResult<Json<Question>> {
    let Path(id) = id?;
    let Json(payload) = payload?;
    let payload = payload.validate()?;

    let mut session = state.db.session().await?;
    let question = session
        .update_question(id, &payload)
        .await?
        .ok_or_else(ApiError::question_not_found)?;
    session.commit().await?;

    info!("Updated question {}", id);
    Ok(Json(question))
}

pub async fn delete(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<StatusCode> {
    let Path(id) = id?;

    let mut session = state.db.session().await?;
    if !session.delete_question(id).await? {
        return Err(ApiError::question_not_found());
    }
    session.commit().await?;

    info!("Deleted question {}", id);
    Ok(StatusCode::NO_CONTENT)
}
