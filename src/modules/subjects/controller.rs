use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde_json::{Value, json};
use uuid::Uuid;

use crate::middleware::auth::CurrentUser;
use crate::middleware::role::{ensure_school_admin, ensure_school_record_access};
use crate::modules::SchoolScope;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

use super::model::{CreateSubjectDto, UpdateSubjectDto};
use super::service::SubjectService;

pub async fn create_subject(
    State(state): State<AppState>,
    user: CurrentUser,
    ValidatedJson(dto): ValidatedJson<CreateSubjectDto>,
) -> Result<Json<Value>, AppError> {
    ensure_school_admin(&state.db, &user, dto.school_id).await?;

    let subject = SubjectService::create_subject(&state.db, dto).await?;

    Ok(Json(json!({
        "ok": true,
        "message": "Subject created.",
        "subject": subject,
    })))
}

pub async fn get_subjects(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(scope): Query<SchoolScope>,
) -> Result<Json<Value>, AppError> {
    ensure_school_admin(&state.db, &user, scope.school_id).await?;

    let subjects = SubjectService::get_subjects_for_school(&state.db, scope.school_id).await?;

    Ok(Json(json!({
        "ok": true,
        "message": "OK.",
        "subjects": subjects,
    })))
}

pub async fn get_subject(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let subject = SubjectService::get_subject_by_id(&state.db, id).await?;
    ensure_school_record_access(&state.db, &user, subject.school_id, "Subject").await?;

    Ok(Json(json!({
        "ok": true,
        "message": "OK.",
        "subject": subject,
    })))
}

pub async fn update_subject(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateSubjectDto>,
) -> Result<Json<Value>, AppError> {
    let existing = SubjectService::get_subject_by_id(&state.db, id).await?;
    ensure_school_record_access(&state.db, &user, existing.school_id, "Subject").await?;

    let subject = SubjectService::update_subject(&state.db, id, dto).await?;

    Ok(Json(json!({
        "ok": true,
        "message": "Subject updated.",
        "subject": subject,
    })))
}

pub async fn delete_subject(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let existing = SubjectService::get_subject_by_id(&state.db, id).await?;
    ensure_school_record_access(&state.db, &user, existing.school_id, "Subject").await?;

    SubjectService::delete_subject(&state.db, id).await?;

    Ok(Json(json!({ "ok": true, "message": "Subject deleted." })))
}
