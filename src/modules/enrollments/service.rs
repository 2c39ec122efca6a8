use sqlx::PgPool;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::utils::errors::AppError;

use super::model::{CreateEnrollmentDto, Enrollment, EnrollmentWithStudent};

pub struct EnrollmentService;

impl EnrollmentService {
    /// Enroll a student into a class. Both must belong to the same school;
    /// enrollment is the one place a cross-tenant link could otherwise
    /// slip in.
    #[instrument(skip(db, dto), fields(student.id = %dto.student_id, class.id = %dto.class_id))]
    pub async fn enroll(db: &PgPool, dto: CreateEnrollmentDto) -> Result<Enrollment, AppError> {
        let same_school = sqlx::query_scalar::<_, bool>(
            "SELECT s.school_id = c.school_id
             FROM students s, classes c
             WHERE s.id = $1 AND c.id = $2",
        )
        .bind(dto.student_id)
        .bind(dto.class_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Student or class not found")))?;

        if !same_school {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "Student and class belong to different schools"
            )));
        }

        let enrollment = sqlx::query_as::<_, Enrollment>(
            "INSERT INTO enrollments (student_id, class_id)
             VALUES ($1, $2)
             RETURNING id, student_id, class_id, enrolled_at",
        )
        .bind(dto.student_id)
        .bind(dto.class_id)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_unique_violation()
            {
                return AppError::bad_request(anyhow::anyhow!(
                    "Student is already enrolled in this class"
                ));
            }
            AppError::from(e)
        })?;

        info!(enrollment.id = %enrollment.id, "Student enrolled");

        Ok(enrollment)
    }

    #[instrument(skip(db), fields(class.id = %class_id))]
    pub async fn get_roster_for_class(
        db: &PgPool,
        class_id: Uuid,
    ) -> Result<Vec<EnrollmentWithStudent>, AppError> {
        let roster = sqlx::query_as::<_, EnrollmentWithStudent>(
            "SELECT e.id, e.student_id, s.admission_no, s.full_name, e.enrolled_at
             FROM enrollments e
             JOIN students s ON s.id = e.student_id
             WHERE e.class_id = $1
             ORDER BY s.full_name",
        )
        .bind(class_id)
        .fetch_all(db)
        .await?;

        Ok(roster)
    }

    #[instrument(skip(db), fields(enrollment.id = %enrollment_id))]
    pub async fn get_enrollment_by_id(
        db: &PgPool,
        enrollment_id: Uuid,
    ) -> Result<Enrollment, AppError> {
        sqlx::query_as::<_, Enrollment>(
            "SELECT id, student_id, class_id, enrolled_at FROM enrollments WHERE id = $1",
        )
        .bind(enrollment_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Enrollment not found")))
    }

    #[instrument(skip(db), fields(enrollment.id = %enrollment_id))]
    pub async fn unenroll(db: &PgPool, enrollment_id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM enrollments WHERE id = $1")
            .bind(enrollment_id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Enrollment not found")));
        }

        Ok(())
    }
}
