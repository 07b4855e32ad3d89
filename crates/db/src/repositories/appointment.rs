use crate::models::{DbAppointment, DbAppointmentWithStudent};
use campuscare_core::models::appointment::NewAppointment;
use chrono::Utc;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

/// Reserves the matching open slot and records the appointment atomically.
///
/// The slot flip is a conditional update on `is_booked = FALSE`, so of two
/// concurrent bookings for one slot only the first matches a row. Returns
/// `None` when no open slot matches; nothing is written in that case, and a
/// failed appointment insert rolls the flip back.
pub async fn book_slot(
    pool: &Pool<Postgres>,
    booking: &NewAppointment,
) -> Result<Option<DbAppointment>> {
    let mut tx = pool.begin().await?;

    let slot_id = sqlx::query_scalar::<_, Uuid>(
        r#"
        UPDATE availability_slots AS s
        SET is_booked = TRUE
        FROM availability_records AS r
        WHERE s.record_id = r.id
          AND r.doctor_id = $1
          AND r.date = $2
          AND s.start_time = $3
          AND s.end_time = $4
          AND s.is_booked = FALSE
        RETURNING s.id
        "#,
    )
    .bind(booking.doctor_id)
    .bind(booking.date)
    .bind(booking.start_time)
    .bind(booking.end_time)
    .fetch_optional(&mut *tx)
    .await?;

    let Some(slot_id) = slot_id else {
        tx.rollback().await?;
        return Ok(None);
    };

    let appointment = sqlx::query_as::<_, DbAppointment>(
        r#"
        INSERT INTO appointments (id, student_id, doctor_id, date, start_time, end_time, symptoms, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING id, student_id, doctor_id, date, start_time, end_time, symptoms, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(booking.student_id)
    .bind(booking.doctor_id)
    .bind(booking.date)
    .bind(booking.start_time)
    .bind(booking.end_time)
    .bind(&booking.symptoms)
    .bind(Utc::now())
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    tracing::debug!("Slot {} booked as appointment {}", slot_id, appointment.id);
    Ok(Some(appointment))
}

pub async fn get_appointments_by_doctor(
    pool: &Pool<Postgres>,
    doctor_id: Uuid,
) -> Result<Vec<DbAppointmentWithStudent>> {
    let appointments = sqlx::query_as::<_, DbAppointmentWithStudent>(
        r#"
        SELECT a.id, a.student_id, a.doctor_id, a.date, a.start_time, a.end_time,
               a.symptoms, a.created_at, s.name AS student_name
        FROM appointments a
        JOIN students s ON s.id = a.student_id
        WHERE a.doctor_id = $1
        ORDER BY a.date ASC, a.start_time ASC
        "#,
    )
    .bind(doctor_id)
    .fetch_all(pool)
    .await?;

    Ok(appointments)
}
