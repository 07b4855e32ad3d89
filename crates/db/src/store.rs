//! The storage seam between the HTTP layer and PostgreSQL.
//!
//! Handlers and services only see [`CareStore`]; [`PgStore`] delegates to
//! the free-function repositories and converts rows into domain types.

use async_trait::async_trait;
use campuscare_core::{
    models::{
        alert::Alert,
        appointment::{Appointment, AppointmentWithStudent, NewAppointment},
        availability::AvailabilityRecord,
        directory::{Doctor, Student},
        report::{NewReport, Report, ReportChanges},
    },
    slots::SlotWindow,
};
use chrono::NaiveDate;
use eyre::Result;
use uuid::Uuid;

use crate::{
    DbPool,
    models::assemble_availability,
    repositories::{alert, appointment, availability, directory, report},
};

#[async_trait]
pub trait CareStore: Send + Sync {
    async fn find_doctor(&self, id: Uuid) -> Result<Option<Doctor>>;

    async fn find_student(&self, id: Uuid) -> Result<Option<Student>>;

    async fn doctors_by_speciality(&self, speciality: String) -> Result<Vec<Doctor>>;

    async fn find_availability(
        &self,
        doctor_id: Uuid,
        date: NaiveDate,
    ) -> Result<Option<AvailabilityRecord>>;

    /// Persists a new record with its slots; `None` if one already exists for the day.
    async fn insert_availability(
        &self,
        doctor_id: Uuid,
        date: NaiveDate,
        slots: Vec<SlotWindow>,
    ) -> Result<Option<AvailabilityRecord>>;

    /// All of a doctor's records, oldest date first.
    async fn availability_for_doctor(&self, doctor_id: Uuid) -> Result<Vec<AvailabilityRecord>>;

    /// Flips the matching open slot and records the appointment as one unit.
    ///
    /// `None` means no open slot matched and nothing was written.
    async fn book_slot(&self, booking: NewAppointment) -> Result<Option<Appointment>>;

    /// Removes the day's record and appointments; `None` if there was no record.
    async fn cancel_shift(&self, doctor_id: Uuid, date: NaiveDate) -> Result<Option<u64>>;

    /// Appointments sorted by date then start time.
    async fn appointments_for_doctor(
        &self,
        doctor_id: Uuid,
    ) -> Result<Vec<AppointmentWithStudent>>;

    async fn insert_alert(&self, doctor_id: Uuid, message: String) -> Result<Alert>;

    /// All alerts, newest first.
    async fn list_alerts(&self) -> Result<Vec<Alert>>;

    async fn find_alert(&self, id: Uuid) -> Result<Option<Alert>>;

    async fn update_alert(&self, id: Uuid, message: String) -> Result<Option<Alert>>;

    async fn delete_alert(&self, id: Uuid) -> Result<bool>;

    async fn insert_report(&self, report: NewReport) -> Result<Report>;

    /// A student's reports, newest first.
    async fn reports_for_student(&self, student_id: Uuid) -> Result<Vec<Report>>;

    async fn latest_report(&self, student_id: Uuid) -> Result<Option<Report>>;

    async fn update_report(&self, id: Uuid, changes: ReportChanges) -> Result<Option<Report>>;
}

/// PostgreSQL-backed [`CareStore`].
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CareStore for PgStore {
    async fn find_doctor(&self, id: Uuid) -> Result<Option<Doctor>> {
        let doctor = directory::get_doctor_by_id(&self.pool, id).await?;
        Ok(doctor.map(Into::into))
    }

    async fn find_student(&self, id: Uuid) -> Result<Option<Student>> {
        let student = directory::get_student_by_id(&self.pool, id).await?;
        Ok(student.map(Into::into))
    }

    async fn doctors_by_speciality(&self, speciality: String) -> Result<Vec<Doctor>> {
        let doctors = directory::get_doctors_by_speciality(&self.pool, &speciality).await?;
        Ok(doctors.into_iter().map(Into::into).collect())
    }

    async fn find_availability(
        &self,
        doctor_id: Uuid,
        date: NaiveDate,
    ) -> Result<Option<AvailabilityRecord>> {
        let Some(record) = availability::get_availability(&self.pool, doctor_id, date).await? else {
            return Ok(None);
        };

        let slots = availability::get_slots_by_record_ids(&self.pool, &[record.id]).await?;
        Ok(assemble_availability(vec![record], slots).pop())
    }

    async fn insert_availability(
        &self,
        doctor_id: Uuid,
        date: NaiveDate,
        slots: Vec<SlotWindow>,
    ) -> Result<Option<AvailabilityRecord>> {
        let created = availability::create_availability(&self.pool, doctor_id, date, &slots).await?;
        Ok(created.and_then(|(record, slots)| assemble_availability(vec![record], slots).pop()))
    }

    async fn availability_for_doctor(&self, doctor_id: Uuid) -> Result<Vec<AvailabilityRecord>> {
        let records = availability::get_availability_by_doctor(&self.pool, doctor_id).await?;
        let ids: Vec<Uuid> = records.iter().map(|r| r.id).collect();
        let slots = availability::get_slots_by_record_ids(&self.pool, &ids).await?;
        Ok(assemble_availability(records, slots))
    }

    async fn book_slot(&self, booking: NewAppointment) -> Result<Option<Appointment>> {
        let appointment = appointment::book_slot(&self.pool, &booking).await?;
        Ok(appointment.map(Into::into))
    }

    async fn cancel_shift(&self, doctor_id: Uuid, date: NaiveDate) -> Result<Option<u64>> {
        availability::cancel_shift(&self.pool, doctor_id, date).await
    }

    async fn appointments_for_doctor(
        &self,
        doctor_id: Uuid,
    ) -> Result<Vec<AppointmentWithStudent>> {
        let rows = appointment::get_appointments_by_doctor(&self.pool, doctor_id).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn insert_alert(&self, doctor_id: Uuid, message: String) -> Result<Alert> {
        let alert = alert::create_alert(&self.pool, doctor_id, &message).await?;
        Ok(alert.into())
    }

    async fn list_alerts(&self) -> Result<Vec<Alert>> {
        let alerts = alert::get_alerts(&self.pool).await?;
        Ok(alerts.into_iter().map(Into::into).collect())
    }

    async fn find_alert(&self, id: Uuid) -> Result<Option<Alert>> {
        let alert = alert::get_alert_by_id(&self.pool, id).await?;
        Ok(alert.map(Into::into))
    }

    async fn update_alert(&self, id: Uuid, message: String) -> Result<Option<Alert>> {
        let alert = alert::update_alert(&self.pool, id, &message).await?;
        Ok(alert.map(Into::into))
    }

    async fn delete_alert(&self, id: Uuid) -> Result<bool> {
        alert::delete_alert(&self.pool, id).await
    }

    async fn insert_report(&self, report: NewReport) -> Result<Report> {
        let created = report::create_report(&self.pool, &report).await?;
        Ok(created.into())
    }

    async fn reports_for_student(&self, student_id: Uuid) -> Result<Vec<Report>> {
        let reports = report::get_reports_by_student(&self.pool, student_id).await?;
        Ok(reports.into_iter().map(Into::into).collect())
    }

    async fn latest_report(&self, student_id: Uuid) -> Result<Option<Report>> {
        let latest = report::get_latest_report(&self.pool, student_id).await?;
        Ok(latest.map(Into::into))
    }

    async fn update_report(&self, id: Uuid, changes: ReportChanges) -> Result<Option<Report>> {
        let updated = report::update_report(&self.pool, id, &changes).await?;
        Ok(updated.map(Into::into))
    }
}
