use sqlx::PgPool;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::utils::errors::AppError;

use super::model::{CreateSchoolDto, School, UpdateSchoolDto};

const SCHOOL_COLUMNS: &str = "id, name, address, phone, created_at, updated_at";

pub struct SchoolService;

impl SchoolService {
    #[instrument(skip(db, dto), fields(school.name = %dto.name))]
    pub async fn create_school(db: &PgPool, dto: CreateSchoolDto) -> Result<School, AppError> {
        let school = sqlx::query_as::<_, School>(&format!(
            "INSERT INTO schools (name, address, phone) VALUES ($1, $2, $3)
             RETURNING {SCHOOL_COLUMNS}"
        ))
        .bind(&dto.name)
        .bind(&dto.address)
        .bind(&dto.phone)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_unique_violation()
            {
                warn!(school.name = %dto.name, "Attempted to create school with existing name");
                return AppError::bad_request(anyhow::anyhow!("School name already exists"));
            }
            AppError::from(e)
        })?;

        info!(school.id = %school.id, "School created");

        Ok(school)
    }

    #[instrument(skip(db))]
    pub async fn get_all_schools(db: &PgPool) -> Result<Vec<School>, AppError> {
        let schools = sqlx::query_as::<_, School>(&format!(
            "SELECT {SCHOOL_COLUMNS} FROM schools ORDER BY name"
        ))
        .fetch_all(db)
        .await?;

        Ok(schools)
    }

    #[instrument(skip(db), fields(school.id = %school_id))]
    pub async fn get_school_by_id(db: &PgPool, school_id: Uuid) -> Result<School, AppError> {
        sqlx::query_as::<_, School>(&format!(
            "SELECT {SCHOOL_COLUMNS} FROM schools WHERE id = $1"
        ))
        .bind(school_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("School not found")))
    }

    #[instrument(skip(db, dto), fields(school.id = %school_id))]
    pub async fn update_school(
        db: &PgPool,
        school_id: Uuid,
        dto: UpdateSchoolDto,
    ) -> Result<School, AppError> {
        sqlx::query_as::<_, School>(&format!(
            "UPDATE schools SET name = $1, address = $2, phone = $3, updated_at = now()
             WHERE id = $4
             RETURNING {SCHOOL_COLUMNS}"
        ))
        .bind(&dto.name)
        .bind(&dto.address)
        .bind(&dto.phone)
        .bind(school_id)
        .fetch_optional(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_unique_violation()
            {
                return AppError::bad_request(anyhow::anyhow!("School name already exists"));
            }
            AppError::from(e)
        })?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("School not found")))
    }

    #[instrument(skip(db), fields(school.id = %school_id))]
    pub async fn delete_school(db: &PgPool, school_id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM schools WHERE id = $1")
            .bind(school_id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("School not found")));
        }

        info!(school.id = %school_id, "School deleted");

        Ok(())
    }
}
