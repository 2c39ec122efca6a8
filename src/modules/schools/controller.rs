use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::{Value, json};
use uuid::Uuid;

use crate::middleware::auth::CurrentUser;
use crate::middleware::role::require_role;
use crate::modules::auth::model::UserRole;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

use super::model::{CreateSchoolDto, UpdateSchoolDto};
use super::service::SchoolService;

pub async fn create_school(
    State(state): State<AppState>,
    user: CurrentUser,
    ValidatedJson(dto): ValidatedJson<CreateSchoolDto>,
) -> Result<Json<Value>, AppError> {
    require_role(&user, &[UserRole::Admin])?;

    let school = SchoolService::create_school(&state.db, dto).await?;

    Ok(Json(json!({
        "ok": true,
        "message": "School created.",
        "school": school,
    })))
}

pub async fn get_schools(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<Value>, AppError> {
    require_role(&user, &[UserRole::Admin])?;

    let schools = SchoolService::get_all_schools(&state.db).await?;

    Ok(Json(json!({
        "ok": true,
        "message": "OK.",
        "schools": schools,
    })))
}

pub async fn get_school(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    require_role(&user, &[UserRole::Admin])?;

    let school = SchoolService::get_school_by_id(&state.db, id).await?;

    Ok(Json(json!({
        "ok": true,
        "message": "OK.",
        "school": school,
    })))
}

pub async fn update_school(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateSchoolDto>,
) -> Result<Json<Value>, AppError> {
    require_role(&user, &[UserRole::Admin])?;

    let school = SchoolService::update_school(&state.db, id, dto).await?;

    Ok(Json(json!({
        "ok": true,
        "message": "School updated.",
        "school": school,
    })))
}

pub async fn delete_school(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    require_role(&user, &[UserRole::Admin])?;

    SchoolService::delete_school(&state.db, id).await?;

    Ok(Json(json!({ "ok": true, "message": "School deleted." })))
}
