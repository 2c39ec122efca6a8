use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct Student {
    pub id: Uuid,
    pub school_id: Uuid,
    pub admission_no: String,
    pub full_name: String,
    pub email: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateStudentDto {
    pub school_id: Uuid,
    #[validate(length(min = 1, message = "Admission number is required"))]
    pub admission_no: String,
    #[validate(length(min = 1, message = "Full name is required"))]
    pub full_name: String,
    #[validate(email(message = "A valid email is required"))]
    pub email: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateStudentDto {
    #[validate(length(min = 1, message = "Full name is required"))]
    pub full_name: String,
    #[validate(email(message = "A valid email is required"))]
    pub email: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    #[validate(length(min = 1, message = "Status is required"))]
    pub status: String,
}

/// Query parameter selecting the tenant for list endpoints.
#[derive(Debug, Deserialize)]
pub struct SchoolScope {
    pub school_id: Uuid,
}
