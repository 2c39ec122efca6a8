use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde_json::{Value, json};
use uuid::Uuid;

use crate::middleware::auth::CurrentUser;
use crate::middleware::role::ensure_school_record_access;
use crate::modules::classes::service::ClassService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

use super::model::{ClassScope, CreateEnrollmentDto};
use super::service::EnrollmentService;

pub async fn enroll_student(
    State(state): State<AppState>,
    user: CurrentUser,
    ValidatedJson(dto): ValidatedJson<CreateEnrollmentDto>,
) -> Result<Json<Value>, AppError> {
    let class = ClassService::get_class_by_id(&state.db, dto.class_id).await?;
    ensure_school_record_access(&state.db, &user, class.school_id, "Class").await?;

    let enrollment = EnrollmentService::enroll(&state.db, dto).await?;

    Ok(Json(json!({
        "ok": true,
        "message": "Student enrolled.",
        "enrollment": enrollment,
    })))
}

pub async fn get_roster(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(scope): Query<ClassScope>,
) -> Result<Json<Value>, AppError> {
    let class = ClassService::get_class_by_id(&state.db, scope.class_id).await?;
    ensure_school_record_access(&state.db, &user, class.school_id, "Class").await?;

    let roster = EnrollmentService::get_roster_for_class(&state.db, scope.class_id).await?;

    Ok(Json(json!({
        "ok": true,
        "message": "OK.",
        "enrollments": roster,
    })))
}

pub async fn unenroll_student(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let enrollment = EnrollmentService::get_enrollment_by_id(&state.db, id).await?;
    let class = ClassService::get_class_by_id(&state.db, enrollment.class_id).await?;
    ensure_school_record_access(&state.db, &user, class.school_id, "Enrollment").await?;

    EnrollmentService::unenroll(&state.db, id).await?;

    Ok(Json(json!({ "ok": true, "message": "Student unenrolled." })))
}
