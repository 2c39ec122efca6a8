use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde_json::{Value, json};
use uuid::Uuid;

use crate::middleware::auth::CurrentUser;
use crate::middleware::role::{ensure_school_admin, ensure_school_record_access};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

use super::model::{CreateStudentDto, SchoolScope, UpdateStudentDto};
use super::service::StudentService;

pub async fn create_student(
    State(state): State<AppState>,
    user: CurrentUser,
    ValidatedJson(dto): ValidatedJson<CreateStudentDto>,
) -> Result<Json<Value>, AppError> {
    ensure_school_admin(&state.db, &user, dto.school_id).await?;

    let student = StudentService::create_student(&state.db, dto).await?;

    Ok(Json(json!({
        "ok": true,
        "message": "Student created.",
        "student": student,
    })))
}

pub async fn get_students(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(scope): Query<SchoolScope>,
) -> Result<Json<Value>, AppError> {
    ensure_school_admin(&state.db, &user, scope.school_id).await?;

    let students = StudentService::get_students_for_school(&state.db, scope.school_id).await?;

    Ok(Json(json!({
        "ok": true,
        "message": "OK.",
        "students": students,
    })))
}

pub async fn get_student(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let student = StudentService::get_student_by_id(&state.db, id).await?;
    ensure_school_record_access(&state.db, &user, student.school_id, "Student").await?;

    Ok(Json(json!({
        "ok": true,
        "message": "OK.",
        "student": student,
    })))
}

pub async fn update_student(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateStudentDto>,
) -> Result<Json<Value>, AppError> {
    let existing = StudentService::get_student_by_id(&state.db, id).await?;
    ensure_school_record_access(&state.db, &user, existing.school_id, "Student").await?;

    let student = StudentService::update_student(&state.db, id, dto).await?;

    Ok(Json(json!({
        "ok": true,
        "message": "Student updated.",
        "student": student,
    })))
}

pub async fn delete_student(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let existing = StudentService::get_student_by_id(&state.db, id).await?;
    ensure_school_record_access(&state.db, &user, existing.school_id, "Student").await?;

    StudentService::delete_student(&state.db, id).await?;

    Ok(Json(json!({ "ok": true, "message": "Student deleted." })))
}
