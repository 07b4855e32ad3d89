use crate::models::{DbDoctor, DbStudent};
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn get_doctor_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbDoctor>> {
    tracing::debug!("Getting doctor by id: {}", id);

    let doctor = sqlx::query_as::<_, DbDoctor>(
        r#"
        SELECT id, name, email, speciality, qualification, experience, currently_working, created_at
        FROM doctors
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(doctor)
}

pub async fn get_student_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbStudent>> {
    tracing::debug!("Getting student by id: {}", id);

    let student = sqlx::query_as::<_, DbStudent>(
        r#"
        SELECT id, name, email, created_at
        FROM students
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(student)
}

pub async fn get_doctors_by_speciality(
    pool: &Pool<Postgres>,
    speciality: &str,
) -> Result<Vec<DbDoctor>> {
    let doctors = sqlx::query_as::<_, DbDoctor>(
        r#"
        SELECT id, name, email, speciality, qualification, experience, currently_working, created_at
        FROM doctors
        WHERE speciality = $1
        ORDER BY name ASC
        "#,
    )
    .bind(speciality)
    .fetch_all(pool)
    .await?;

    Ok(doctors)
}
