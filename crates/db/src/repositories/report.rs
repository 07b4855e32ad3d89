use crate::models::DbReport;
use campuscare_core::models::report::{NewReport, ReportChanges};
use chrono::Utc;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

const REPORT_COLUMNS: &str = "id, student_id, doctor_id, name, dob, blood_group, medications, allergies, diseases, created_at, updated_at";

pub async fn create_report(pool: &Pool<Postgres>, report: &NewReport) -> Result<DbReport> {
    let now = Utc::now();

    let created = sqlx::query_as::<_, DbReport>(&format!(
        r#"
        INSERT INTO reports ({REPORT_COLUMNS})
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $10)
        RETURNING {REPORT_COLUMNS}
        "#
    ))
    .bind(Uuid::new_v4())
    .bind(report.student_id)
    .bind(report.doctor_id)
    .bind(&report.name)
    .bind(report.dob)
    .bind(&report.blood_group)
    .bind(&report.medications)
    .bind(&report.allergies)
    .bind(&report.diseases)
    .bind(now)
    .fetch_one(pool)
    .await?;

    tracing::debug!("Report created: id={}, student={}", created.id, created.student_id);
    Ok(created)
}

/// A student's reports, newest first.
pub async fn get_reports_by_student(
    pool: &Pool<Postgres>,
    student_id: Uuid,
) -> Result<Vec<DbReport>> {
    let reports = sqlx::query_as::<_, DbReport>(&format!(
        r#"
        SELECT {REPORT_COLUMNS}
        FROM reports
        WHERE student_id = $1
        ORDER BY created_at DESC
        "#
    ))
    .bind(student_id)
    .fetch_all(pool)
    .await?;

    Ok(reports)
}

pub async fn get_latest_report(
    pool: &Pool<Postgres>,
    student_id: Uuid,
) -> Result<Option<DbReport>> {
    let report = sqlx::query_as::<_, DbReport>(&format!(
        r#"
        SELECT {REPORT_COLUMNS}
        FROM reports
        WHERE student_id = $1
        ORDER BY created_at DESC
        LIMIT 1
        "#
    ))
    .bind(student_id)
    .fetch_optional(pool)
    .await?;

    Ok(report)
}

/// Overwrites the fields present in `changes`; `None` if the report is gone.
pub async fn update_report(
    pool: &Pool<Postgres>,
    id: Uuid,
    changes: &ReportChanges,
) -> Result<Option<DbReport>> {
    let report = sqlx::query_as::<_, DbReport>(&format!(
        r#"
        UPDATE reports
        SET name = COALESCE($2, name),
            dob = COALESCE($3, dob),
            blood_group = COALESCE($4, blood_group),
            medications = COALESCE($5, medications),
            allergies = COALESCE($6, allergies),
            diseases = COALESCE($7, diseases),
            updated_at = $8
        WHERE id = $1
        RETURNING {REPORT_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(changes.name.as_deref())
    .bind(changes.dob)
    .bind(changes.blood_group.as_deref())
    .bind(changes.medications.as_deref())
    .bind(changes.allergies.as_deref())
    .bind(changes.diseases.as_deref())
    .bind(Utc::now())
    .fetch_optional(pool)
    .await?;

    Ok(report)
}
