use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct Enrollment {
    pub id: Uuid,
    pub student_id: Uuid,
    pub class_id: Uuid,
    pub enrolled_at: DateTime<Utc>,
}

/// Enrollment joined with the student's display fields, for class rosters.
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct EnrollmentWithStudent {
    pub id: Uuid,
    pub student_id: Uuid,
    pub admission_no: String,
    pub full_name: String,
    pub enrolled_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateEnrollmentDto {
    pub student_id: Uuid,
    pub class_id: Uuid,
}

/// Query parameter selecting the class whose roster is listed.
#[derive(Debug, Deserialize)]
pub struct ClassScope {
    pub class_id: Uuid,
}
