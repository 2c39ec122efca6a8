use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct Class {
    pub id: Uuid,
    pub school_id: Uuid,
    pub name: String,
    pub teacher_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateClassDto {
    pub school_id: Uuid,
    #[validate(length(min = 1, message = "Class name is required"))]
    pub name: String,
    pub teacher_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateClassDto {
    #[validate(length(min = 1, message = "Class name is required"))]
    pub name: String,
    pub teacher_id: Option<Uuid>,
}
