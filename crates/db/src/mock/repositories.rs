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
use mockall::mock;
use uuid::Uuid;

use crate::store::CareStore;

// Mock store for testing services and handlers without a database
mock! {
    pub CareStore {}

    #[async_trait]
    impl CareStore for CareStore {
        async fn find_doctor(&self, id: Uuid) -> eyre::Result<Option<Doctor>>;

        async fn find_student(&self, id: Uuid) -> eyre::Result<Option<Student>>;

        async fn doctors_by_speciality(&self, speciality: String) -> eyre::Result<Vec<Doctor>>;

        async fn find_availability(
            &self,
            doctor_id: Uuid,
            date: NaiveDate,
        ) -> eyre::Result<Option<AvailabilityRecord>>;

        async fn insert_availability(
            &self,
            doctor_id: Uuid,
            date: NaiveDate,
            slots: Vec<SlotWindow>,
        ) -> eyre::Result<Option<AvailabilityRecord>>;

        async fn availability_for_doctor(
            &self,
            doctor_id: Uuid,
        ) -> eyre::Result<Vec<AvailabilityRecord>>;

        async fn book_slot(&self, booking: NewAppointment) -> eyre::Result<Option<Appointment>>;

        async fn cancel_shift(&self, doctor_id: Uuid, date: NaiveDate) -> eyre::Result<Option<u64>>;

        async fn appointments_for_doctor(
            &self,
            doctor_id: Uuid,
        ) -> eyre::Result<Vec<AppointmentWithStudent>>;

        async fn insert_alert(&self, doctor_id: Uuid, message: String) -> eyre::Result<Alert>;

        async fn list_alerts(&self) -> eyre::Result<Vec<Alert>>;

        async fn find_alert(&self, id: Uuid) -> eyre::Result<Option<Alert>>;

        async fn update_alert(&self, id: Uuid, message: String) -> eyre::Result<Option<Alert>>;

        async fn delete_alert(&self, id: Uuid) -> eyre::Result<bool>;

        async fn insert_report(&self, report: NewReport) -> eyre::Result<Report>;

        async fn reports_for_student(&self, student_id: Uuid) -> eyre::Result<Vec<Report>>;

        async fn latest_report(&self, student_id: Uuid) -> eyre::Result<Option<Report>>;

        async fn update_report(
            &self,
            id: Uuid,
            changes: ReportChanges,
        ) -> eyre::Result<Option<Report>>;
    }
}
