use sqlx::PgPool;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::utils::errors::AppError;

use super::model::{Class, CreateClassDto, UpdateClassDto};

const CLASS_COLUMNS: &str = "id, school_id, name, teacher_id, created_at, updated_at";

pub struct ClassService;

impl ClassService {
    #[instrument(skip(db, dto), fields(school.id = %dto.school_id, class.name = %dto.name))]
    pub async fn create_class(db: &PgPool, dto: CreateClassDto) -> Result<Class, AppError> {
        let class = sqlx::query_as::<_, Class>(&format!(
            "INSERT INTO classes (school_id, name, teacher_id)
             VALUES ($1, $2, $3)
             RETURNING {CLASS_COLUMNS}"
        ))
        .bind(dto.school_id)
        .bind(&dto.name)
        .bind(dto.teacher_id)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_unique_violation()
            {
                return AppError::bad_request(anyhow::anyhow!(
                    "Class name already exists in this school"
                ));
            }
            AppError::from(e)
        })?;

        info!(class.id = %class.id, "Class created");

        Ok(class)
    }

    #[instrument(skip(db), fields(school.id = %school_id))]
    pub async fn get_classes_for_school(
        db: &PgPool,
        school_id: Uuid,
    ) -> Result<Vec<Class>, AppError> {
        let classes = sqlx::query_as::<_, Class>(&format!(
            "SELECT {CLASS_COLUMNS} FROM classes WHERE school_id = $1 ORDER BY name"
        ))
        .bind(school_id)
        .fetch_all(db)
        .await?;

        Ok(classes)
    }

    #[instrument(skip(db), fields(class.id = %class_id))]
    pub async fn get_class_by_id(db: &PgPool, class_id: Uuid) -> Result<Class, AppError> {
        sqlx::query_as::<_, Class>(&format!(
            "SELECT {CLASS_COLUMNS} FROM classes WHERE id = $1"
        ))
        .bind(class_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Class not found")))
    }

    #[instrument(skip(db, dto), fields(class.id = %class_id))]
    pub async fn update_class(
        db: &PgPool,
        class_id: Uuid,
        dto: UpdateClassDto,
    ) -> Result<Class, AppError> {
        sqlx::query_as::<_, Class>(&format!(
            "UPDATE classes SET name = $1, teacher_id = $2, updated_at = now()
             WHERE id = $3
             RETURNING {CLASS_COLUMNS}"
        ))
        .bind(&dto.name)
        .bind(dto.teacher_id)
        .bind(class_id)
        .fetch_optional(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_unique_violation()
            {
                return AppError::bad_request(anyhow::anyhow!(
                    "Class name already exists in this school"
                ));
            }
            AppError::from(e)
        })?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Class not found")))
    }

    #[instrument(skip(db), fields(class.id = %class_id))]
    pub async fn delete_class(db: &PgPool, class_id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM classes WHERE id = $1")
            .bind(class_id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Class not found")));
        }

        Ok(())
    }
}
