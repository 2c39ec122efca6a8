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

use super::model::{CreateClassDto, UpdateClassDto};
use super::service::ClassService;

pub async fn create_class(
    State(state): State<AppState>,
    user: CurrentUser,
    ValidatedJson(dto): ValidatedJson<CreateClassDto>,
) -> Result<Json<Value>, AppError> {
    ensure_school_admin(&state.db, &user, dto.school_id).await?;

    let class = ClassService::create_class(&state.db, dto).await?;

    Ok(Json(json!({
        "ok": true,
        "message": "Class created.",
        "class": class,
    })))
}

pub async fn get_classes(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(scope): Query<SchoolScope>,
) -> Result<Json<Value>, AppError> {
    ensure_school_admin(&state.db, &user, scope.school_id).await?;

    let classes = ClassService::get_classes_for_school(&state.db, scope.school_id).await?;

    Ok(Json(json!({
        "ok": true,
        "message": "OK.",
        "classes": classes,
    })))
}

pub async fn get_class(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let class = ClassService::get_class_by_id(&state.db, id).await?;
    ensure_school_record_access(&state.db, &user, class.school_id, "Class").await?;

    Ok(Json(json!({
        "ok": true,
        "message": "OK.",
        "class": class,
    })))
}

pub async fn update_class(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateClassDto>,
) -> Result<Json<Value>, AppError> {
    let existing = ClassService::get_class_by_id(&state.db, id).await?;
    ensure_school_record_access(&state.db, &user, existing.school_id, "Class").await?;

    let class = ClassService::update_class(&state.db, id, dto).await?;

    Ok(Json(json!({
        "ok": true,
        "message": "Class updated.",
        "class": class,
    })))
}

pub async fn delete_class(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let existing = ClassService::get_class_by_id(&state.db, id).await?;
    ensure_school_record_access(&state.db, &user, existing.school_id, "Class").await?;

    ClassService::delete_class(&state.db, id).await?;

    Ok(Json(json!({ "ok": true, "message": "Class deleted." })))
}
