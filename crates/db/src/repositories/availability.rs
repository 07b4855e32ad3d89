use crate::models::{DbAvailability, DbSlot};
use campuscare_core::slots::SlotWindow;
use chrono::{NaiveDate, Utc};
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

/// Inserts an availability record and all of its slots in one transaction.
///
/// Returns `None` without writing anything when the doctor already has a
/// record for `date`.
pub async fn create_availability(
    pool: &Pool<Postgres>,
    doctor_id: Uuid,
    date: NaiveDate,
    slots: &[SlotWindow],
) -> Result<Option<(DbAvailability, Vec<DbSlot>)>> {
    let mut tx = pool.begin().await?;

    let record = sqlx::query_as::<_, DbAvailability>(
        r#"
        INSERT INTO availability_records (id, doctor_id, date, created_at)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (doctor_id, date) DO NOTHING
        RETURNING id, doctor_id, date, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(doctor_id)
    .bind(date)
    .bind(Utc::now())
    .fetch_optional(&mut *tx)
    .await?;

    let Some(record) = record else {
        tracing::debug!("Availability already exists: doctor={}, date={}", doctor_id, date);
        tx.rollback().await?;
        return Ok(None);
    };

    let mut created = Vec::with_capacity(slots.len());
    for window in slots {
        let slot = sqlx::query_as::<_, DbSlot>(
            r#"
            INSERT INTO availability_slots (id, record_id, start_time, end_time, is_booked)
            VALUES ($1, $2, $3, $4, FALSE)
            RETURNING id, record_id, start_time, end_time, is_booked
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(record.id)
        .bind(window.start)
        .bind(window.end)
        .fetch_one(&mut *tx)
        .await?;
        created.push(slot);
    }

    tx.commit().await?;

    tracing::debug!(
        "Availability created: id={}, doctor={}, date={}, slots={}",
        record.id, doctor_id, date, created.len()
    );
    Ok(Some((record, created)))
}

pub async fn get_availability(
    pool: &Pool<Postgres>,
    doctor_id: Uuid,
    date: NaiveDate,
) -> Result<Option<DbAvailability>> {
    let record = sqlx::query_as::<_, DbAvailability>(
        r#"
        SELECT id, doctor_id, date, created_at
        FROM availability_records
        WHERE doctor_id = $1 AND date = $2
        "#,
    )
    .bind(doctor_id)
    .bind(date)
    .fetch_optional(pool)
    .await?;

    Ok(record)
}

pub async fn get_availability_by_doctor(
    pool: &Pool<Postgres>,
    doctor_id: Uuid,
) -> Result<Vec<DbAvailability>> {
    let records = sqlx::query_as::<_, DbAvailability>(
        r#"
        SELECT id, doctor_id, date, created_at
        FROM availability_records
        WHERE doctor_id = $1
        ORDER BY date ASC
        "#,
    )
    .bind(doctor_id)
    .fetch_all(pool)
    .await?;

    Ok(records)
}

pub async fn get_slots_by_record_ids(
    pool: &Pool<Postgres>,
    record_ids: &[Uuid],
) -> Result<Vec<DbSlot>> {
    if record_ids.is_empty() {
        return Ok(Vec::new());
    }

    let slots = sqlx::query_as::<_, DbSlot>(
        r#"
        SELECT id, record_id, start_time, end_time, is_booked
        FROM availability_slots
        WHERE record_id = ANY($1)
        ORDER BY start_time ASC
        "#,
    )
    .bind(record_ids.to_vec())
    .fetch_all(pool)
    .await?;

    Ok(slots)
}

/// Deletes the shift for `(doctor_id, date)` together with that day's appointments.
///
/// Returns the number of appointments removed, or `None` if there was no
/// shift to cancel.
pub async fn cancel_shift(
    pool: &Pool<Postgres>,
    doctor_id: Uuid,
    date: NaiveDate,
) -> Result<Option<u64>> {
    let mut tx = pool.begin().await?;

    // Slots go with the record through ON DELETE CASCADE
    let deleted = sqlx::query_scalar::<_, Uuid>(
        r#"
        DELETE FROM availability_records
        WHERE doctor_id = $1 AND date = $2
        RETURNING id
        "#,
    )
    .bind(doctor_id)
    .bind(date)
    .fetch_optional(&mut *tx)
    .await?;

    if deleted.is_none() {
        tx.rollback().await?;
        return Ok(None);
    }

    let appointments = sqlx::query(
        r#"
        DELETE FROM appointments
        WHERE doctor_id = $1 AND date = $2
        "#,
    )
    .bind(doctor_id)
    .bind(date)
    .execute(&mut *tx)
    .await?
    .rows_affected();

    tx.commit().await?;

    tracing::debug!(
        "Shift cancelled: doctor={}, date={}, appointments_removed={}",
        doctor_id, date, appointments
    );
    Ok(Some(appointments))
}
