use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub speciality: String,
    pub qualification: String,
    pub experience: String,
    pub currently_working: bool,
    pub created_at: DateTime<Utc>,
}

/// The public face of a doctor in the directory; contact details stay private.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorSummary {
    pub id: Uuid,
    pub name: String,
    pub speciality: String,
    pub qualification: String,
    pub experience: String,
    pub currently_working: bool,
}

impl From<Doctor> for DoctorSummary {
    fn from(doctor: Doctor) -> Self {
        Self {
            id: doctor.id,
            name: doctor.name,
            speciality: doctor.speciality,
            qualification: doctor.qualification,
            experience: doctor.experience,
            currently_working: doctor.currently_working,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DoctorQuery {
    pub speciality: Option<String>,
}
