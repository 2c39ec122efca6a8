use sqlx::PgPool;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::utils::errors::AppError;

use super::model::{CreateStudentDto, Student, UpdateStudentDto};

const STUDENT_COLUMNS: &str =
    "id, school_id, admission_no, full_name, email, date_of_birth, status, created_at, updated_at";

pub struct StudentService;

impl StudentService {
    #[instrument(skip(db, dto), fields(school.id = %dto.school_id))]
    pub async fn create_student(db: &PgPool, dto: CreateStudentDto) -> Result<Student, AppError> {
        let student = sqlx::query_as::<_, Student>(&format!(
            "INSERT INTO students (school_id, admission_no, full_name, email, date_of_birth)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {STUDENT_COLUMNS}"
        ))
        .bind(dto.school_id)
        .bind(&dto.admission_no)
        .bind(&dto.full_name)
        .bind(&dto.email)
        .bind(dto.date_of_birth)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_unique_violation()
            {
                return AppError::bad_request(anyhow::anyhow!(
                    "Admission number already exists in this school"
                ));
            }
            AppError::from(e)
        })?;

        info!(student.id = %student.id, "Student created");

        Ok(student)
    }

    #[instrument(skip(db), fields(school.id = %school_id))]
    pub async fn get_students_for_school(
        db: &PgPool,
        school_id: Uuid,
    ) -> Result<Vec<Student>, AppError> {
        let students = sqlx::query_as::<_, Student>(&format!(
            "SELECT {STUDENT_COLUMNS} FROM students WHERE school_id = $1 ORDER BY full_name"
        ))
        .bind(school_id)
        .fetch_all(db)
        .await?;

        Ok(students)
    }

    #[instrument(skip(db), fields(student.id = %student_id))]
    pub async fn get_student_by_id(db: &PgPool, student_id: Uuid) -> Result<Student, AppError> {
        sqlx::query_as::<_, Student>(&format!(
            "SELECT {STUDENT_COLUMNS} FROM students WHERE id = $1"
        ))
        .bind(student_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Student not found")))
    }

    #[instrument(skip(db, dto), fields(student.id = %student_id))]
    pub async fn update_student(
        db: &PgPool,
        student_id: Uuid,
        dto: UpdateStudentDto,
    ) -> Result<Student, AppError> {
        sqlx::query_as::<_, Student>(&format!(
            "UPDATE students
             SET full_name = $1, email = $2, date_of_birth = $3, status = $4, updated_at = now()
             WHERE id = $5
             RETURNING {STUDENT_COLUMNS}"
        ))
        .bind(&dto.full_name)
        .bind(&dto.email)
        .bind(dto.date_of_birth)
        .bind(&dto.status)
        .bind(student_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Student not found")))
    }

    #[instrument(skip(db), fields(student.id = %student_id))]
    pub async fn delete_student(db: &PgPool, student_id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM students WHERE id = $1")
            .bind(student_id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Student not found")));
        }

        Ok(())
    }
}
