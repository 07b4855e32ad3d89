use campuscare_core::models::{
    alert::Alert,
    appointment::{Appointment, AppointmentWithStudent},
    availability::{AvailabilityRecord, Slot},
    directory::{Doctor, Student},
    report::Report,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbDoctor {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub speciality: String,
    pub qualification: String,
    pub experience: String,
    pub currently_working: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbStudent {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAvailability {
    pub id: Uuid,
    pub doctor_id: Uuid,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbSlot {
    pub id: Uuid,
    pub record_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub is_booked: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAppointment {
    pub id: Uuid,
    pub student_id: Uuid,
    pub doctor_id: Uuid,
    pub date: NaiveDate,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub symptoms: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAppointmentWithStudent {
    pub id: Uuid,
    pub student_id: Uuid,
    pub doctor_id: Uuid,
    pub date: NaiveDate,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub symptoms: String,
    pub created_at: DateTime<Utc>,
    pub student_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAlert {
    pub id: Uuid,
    pub doctor_id: Uuid,
    pub owner_name: Option<String>,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<DbDoctor> for Doctor {
    fn from(row: DbDoctor) -> Self {
        Doctor {
            id: row.id,
            name: row.name,
            email: row.email,
            speciality: row.speciality,
            qualification: row.qualification,
            experience: row.experience,
            currently_working: row.currently_working,
            created_at: row.created_at,
        }
    }
}

impl From<DbStudent> for Student {
    fn from(row: DbStudent) -> Self {
        Student {
            id: row.id,
            name: row.name,
            email: row.email,
            created_at: row.created_at,
        }
    }
}

impl From<DbSlot> for Slot {
    fn from(row: DbSlot) -> Self {
        Slot {
            id: row.id,
            start_time: row.start_time,
            end_time: row.end_time,
            is_booked: row.is_booked,
        }
    }
}

impl From<DbAppointment> for Appointment {
    fn from(row: DbAppointment) -> Self {
        Appointment {
            id: row.id,
            student_id: row.student_id,
            doctor_id: row.doctor_id,
            date: row.date,
            start_time: row.start_time,
            end_time: row.end_time,
            symptoms: row.symptoms,
            created_at: row.created_at,
        }
    }
}

impl From<DbAppointmentWithStudent> for AppointmentWithStudent {
    fn from(row: DbAppointmentWithStudent) -> Self {
        AppointmentWithStudent {
            appointment: Appointment {
                id: row.id,
                student_id: row.student_id,
                doctor_id: row.doctor_id,
                date: row.date,
                start_time: row.start_time,
                end_time: row.end_time,
                symptoms: row.symptoms,
                created_at: row.created_at,
            },
            student_name: row.student_name,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbReport {
    pub id: Uuid,
    pub student_id: Uuid,
    pub doctor_id: Uuid,
    pub name: String,
    pub dob: NaiveDate,
    pub blood_group: String,
    pub medications: String,
    pub allergies: String,
    pub diseases: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<DbReport> for Report {
    fn from(row: DbReport) -> Self {
        Report {
            id: row.id,
            student_id: row.student_id,
            doctor_id: row.doctor_id,
            name: row.name,
            dob: row.dob,
            blood_group: row.blood_group,
            medications: row.medications,
            allergies: row.allergies,
            diseases: row.diseases,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl From<DbAlert> for Alert {
    fn from(row: DbAlert) -> Self {
        Alert {
            id: row.id,
            owner: row.doctor_id,
            owner_name: row.owner_name,
            message: row.message,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Joins availability rows with their slot rows.
///
/// Slots whose record is not in `records` are ignored. Each record's slots
/// come out sorted by start time.
pub fn assemble_availability(
    records: Vec<DbAvailability>,
    slots: Vec<DbSlot>,
) -> Vec<AvailabilityRecord> {
    let mut assembled: Vec<AvailabilityRecord> = records
        .into_iter()
        .map(|record| AvailabilityRecord {
            id: record.id,
            owner: record.doctor_id,
            date: record.date,
            slots: Vec::new(),
            created_at: record.created_at,
        })
        .collect();

    for slot in slots {
        if let Some(record) = assembled.iter_mut().find(|r| r.id == slot.record_id) {
            record.slots.push(slot.into());
        }
    }

    for record in &mut assembled {
        record.slots.sort_by_key(|s| s.start_time);
    }

    assembled
}
