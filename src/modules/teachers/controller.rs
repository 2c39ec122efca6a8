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

use super::model::{CreateTeacherDto, UpdateTeacherDto};
use super::service::TeacherService;

pub async fn create_teacher(
    State(state): State<AppState>,
    user: CurrentUser,
    ValidatedJson(dto): ValidatedJson<CreateTeacherDto>,
) -> Result<Json<Value>, AppError> {
    ensure_school_admin(&state.db, &user, dto.school_id).await?;

    let teacher = TeacherService::create_teacher(&state.db, dto).await?;

    Ok(Json(json!({
        "ok": true,
        "message": "Teacher created.",
        "teacher": teacher,
    })))
}

pub async fn get_teachers(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(scope): Query<SchoolScope>,
) -> Result<Json<Value>, AppError> {
    ensure_school_admin(&state.db, &user, scope.school_id).await?;

    let teachers = TeacherService::get_teachers_for_school(&state.db, scope.school_id).await?;

    Ok(Json(json!({
        "ok": true,
        "message": "OK.",
        "teachers": teachers,
    })))
}

pub async fn get_teacher(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let teacher = TeacherService::get_teacher_by_id(&state.db, id).await?;
    ensure_school_record_access(&state.db, &user, teacher.school_id, "Teacher").await?;

    Ok(Json(json!({
        "ok": true,
        "message": "OK.",
        "teacher": teacher,
    })))
}

pub async fn update_teacher(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateTeacherDto>,
) -> Result<Json<Value>, AppError> {
    let existing = TeacherService::get_teacher_by_id(&state.db, id).await?;
    ensure_school_record_access(&state.db, &user, existing.school_id, "Teacher").await?;

    let teacher = TeacherService::update_teacher(&state.db, id, dto).await?;

    Ok(Json(json!({
        "ok": true,
        "message": "Teacher updated.",
        "teacher": teacher,
    })))
}

pub async fn delete_teacher(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let existing = TeacherService::get_teacher_by_id(&state.db, id).await?;
    ensure_school_record_access(&state.db, &user, existing.school_id, "Teacher").await?;

    TeacherService::delete_teacher(&state.db, id).await?;

    Ok(Json(json!({ "ok": true, "message": "Teacher deleted." })))
}
