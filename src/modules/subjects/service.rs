use sqlx::PgPool;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::utils::errors::AppError;

use super::model::{CreateSubjectDto, Subject, UpdateSubjectDto};

const SUBJECT_COLUMNS: &str = "id, school_id, name, code, created_at";

pub struct SubjectService;

impl SubjectService {
    #[instrument(skip(db, dto), fields(school.id = %dto.school_id, subject.name = %dto.name))]
    pub async fn create_subject(db: &PgPool, dto: CreateSubjectDto) -> Result<Subject, AppError> {
        let subject = sqlx::query_as::<_, Subject>(&format!(
            "INSERT INTO subjects (school_id, name, code)
             VALUES ($1, $2, $3)
             RETURNING {SUBJECT_COLUMNS}"
        ))
        .bind(dto.school_id)
        .bind(&dto.name)
        .bind(&dto.code)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_unique_violation()
            {
                return AppError::bad_request(anyhow::anyhow!(
                    "Subject code already exists in this school"
                ));
            }
            AppError::from(e)
        })?;

        info!(subject.id = %subject.id, "Subject created");

        Ok(subject)
    }

    #[instrument(skip(db), fields(school.id = %school_id))]
    pub async fn get_subjects_for_school(
        db: &PgPool,
        school_id: Uuid,
    ) -> Result<Vec<Subject>, AppError> {
        let subjects = sqlx::query_as::<_, Subject>(&format!(
            "SELECT {SUBJECT_COLUMNS} FROM subjects WHERE school_id = $1 ORDER BY name"
        ))
        .bind(school_id)
        .fetch_all(db)
        .await?;

        Ok(subjects)
    }

    #[instrument(skip(db), fields(subject.id = %subject_id))]
    pub async fn get_subject_by_id(db: &PgPool, subject_id: Uuid) -> Result<Subject, AppError> {
        sqlx::query_as::<_, Subject>(&format!(
            "SELECT {SUBJECT_COLUMNS} FROM subjects WHERE id = $1"
        ))
        .bind(subject_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Subject not found")))
    }

    #[instrument(skip(db, dto), fields(subject.id = %subject_id))]
    pub async fn update_subject(
        db: &PgPool,
        subject_id: Uuid,
        dto: UpdateSubjectDto,
    ) -> Result<Subject, AppError> {
        sqlx::query_as::<_, Subject>(&format!(
            "UPDATE subjects SET name = $1, code = $2 WHERE id = $3
             RETURNING {SUBJECT_COLUMNS}"
        ))
        .bind(&dto.name)
        .bind(&dto.code)
        .bind(subject_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Subject not found")))
    }

    #[instrument(skip(db), fields(subject.id = %subject_id))]
    pub async fn delete_subject(db: &PgPool, subject_id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM subjects WHERE id = $1")
            .bind(subject_id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Subject not found")));
        }

        Ok(())
    }
}
