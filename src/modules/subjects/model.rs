use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct Subject {
    pub id: Uuid,
    pub school_id: Uuid,
    pub name: String,
    pub code: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateSubjectDto {
    pub school_id: Uuid,
    #[validate(length(min = 1, message = "Subject name is required"))]
    pub name: String,
    pub code: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateSubjectDto {
    #[validate(length(min = 1, message = "Subject name is required"))]
    pub name: String,
    pub code: Option<String>,
}
