use crate::models::DbAlert;
use chrono::Utc;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn create_alert(pool: &Pool<Postgres>, doctor_id: Uuid, message: &str) -> Result<DbAlert> {
    let now = Utc::now();

    let alert = sqlx::query_as::<_, DbAlert>(
        r#"
        WITH inserted AS (
            INSERT INTO alerts (id, doctor_id, message, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $4)
            RETURNING id, doctor_id, message, created_at, updated_at
        )
        SELECT i.id, i.doctor_id, d.name AS owner_name, i.message, i.created_at, i.updated_at
        FROM inserted i
        LEFT JOIN doctors d ON d.id = i.doctor_id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(doctor_id)
    .bind(message)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(alert)
}

pub async fn get_alerts(pool: &Pool<Postgres>) -> Result<Vec<DbAlert>> {
    let alerts = sqlx::query_as::<_, DbAlert>(
        r#"
        SELECT a.id, a.doctor_id, d.name AS owner_name, a.message, a.created_at, a.updated_at
        FROM alerts a
        LEFT JOIN doctors d ON d.id = a.doctor_id
        ORDER BY a.created_at DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(alerts)
}

pub async fn get_alert_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbAlert>> {
    let alert = sqlx::query_as::<_, DbAlert>(
        r#"
        SELECT a.id, a.doctor_id, d.name AS owner_name, a.message, a.created_at, a.updated_at
        FROM alerts a
        LEFT JOIN doctors d ON d.id = a.doctor_id
        WHERE a.id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(alert)
}

pub async fn update_alert(
    pool: &Pool<Postgres>,
    id: Uuid,
    message: &str,
) -> Result<Option<DbAlert>> {
    let alert = sqlx::query_as::<_, DbAlert>(
        r#"
        WITH updated AS (
            UPDATE alerts
            SET message = $2, updated_at = $3
            WHERE id = $1
            RETURNING id, doctor_id, message, created_at, updated_at
        )
        SELECT u.id, u.doctor_id, d.name AS owner_name, u.message, u.created_at, u.updated_at
        FROM updated u
        LEFT JOIN doctors d ON d.id = u.doctor_id
        "#,
    )
    .bind(id)
    .bind(message)
    .bind(Utc::now())
    .fetch_optional(pool)
    .await?;

    Ok(alert)
}

pub async fn delete_alert(pool: &Pool<Postgres>, id: Uuid) -> Result<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM alerts
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}
