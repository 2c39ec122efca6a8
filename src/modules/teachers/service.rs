use sqlx::PgPool;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::utils::errors::AppError;

use super::model::{CreateTeacherDto, Teacher, UpdateTeacherDto};

const TEACHER_COLUMNS: &str =
    "id, school_id, user_id, full_name, email, specialty, status, created_at, updated_at";

pub struct TeacherService;

impl TeacherService {
    #[instrument(skip(db, dto), fields(school.id = %dto.school_id))]
    pub async fn create_teacher(db: &PgPool, dto: CreateTeacherDto) -> Result<Teacher, AppError> {
        let teacher = sqlx::query_as::<_, Teacher>(&format!(
            "INSERT INTO teachers (school_id, user_id, full_name, email, specialty)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {TEACHER_COLUMNS}"
        ))
        .bind(dto.school_id)
        .bind(dto.user_id)
        .bind(&dto.full_name)
        .bind(&dto.email)
        .bind(&dto.specialty)
        .fetch_one(db)
        .await?;

        info!(teacher.id = %teacher.id, "Teacher created");

        Ok(teacher)
    }

    #[instrument(skip(db), fields(school.id = %school_id))]
    pub async fn get_teachers_for_school(
        db: &PgPool,
        school_id: Uuid,
    ) -> Result<Vec<Teacher>, AppError> {
        let teachers = sqlx::query_as::<_, Teacher>(&format!(
            "SELECT {TEACHER_COLUMNS} FROM teachers WHERE school_id = $1 ORDER BY full_name"
        ))
        .bind(school_id)
        .fetch_all(db)
        .await?;

        Ok(teachers)
    }

    #[instrument(skip(db), fields(teacher.id = %teacher_id))]
    pub async fn get_teacher_by_id(db: &PgPool, teacher_id: Uuid) -> Result<Teacher, AppError> {
        sqlx::query_as::<_, Teacher>(&format!(
            "SELECT {TEACHER_COLUMNS} FROM teachers WHERE id = $1"
        ))
        .bind(teacher_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Teacher not found")))
    }

    #[instrument(skip(db, dto), fields(teacher.id = %teacher_id))]
    pub async fn update_teacher(
        db: &PgPool,
        teacher_id: Uuid,
        dto: UpdateTeacherDto,
    ) -> Result<Teacher, AppError> {
        sqlx::query_as::<_, Teacher>(&format!(
            "UPDATE teachers
             SET full_name = $1, email = $2, specialty = $3, status = $4, updated_at = now()
             WHERE id = $5
             RETURNING {TEACHER_COLUMNS}"
        ))
        .bind(&dto.full_name)
        .bind(&dto.email)
        .bind(&dto.specialty)
        .bind(&dto.status)
        .bind(teacher_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Teacher not found")))
    }

    #[instrument(skip(db), fields(teacher.id = %teacher_id))]
    pub async fn delete_teacher(db: &PgPool, teacher_id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM teachers WHERE id = $1")
            .bind(teacher_id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Teacher not found")));
        }

        Ok(())
    }
}
