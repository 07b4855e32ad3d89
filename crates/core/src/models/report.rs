use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A medical report a doctor files for a student.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: Uuid,
    pub student_id: Uuid,
    /// Doctor who filed the report
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

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewReport {
    pub student_id: Uuid,
    pub doctor_id: Uuid,
    pub name: String,
    pub dob: NaiveDate,
    pub blood_group: String,
    pub medications: String,
    pub allergies: String,
    pub diseases: String,
}

/// Fields to overwrite on an existing report; `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportChanges {
    pub name: Option<String>,
    pub dob: Option<NaiveDate>,
    pub blood_group: Option<String>,
    pub medications: Option<String>,
    pub allergies: Option<String>,
    pub diseases: Option<String>,
}

impl ReportChanges {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReportRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub dob: String,
    #[serde(default)]
    pub blood_group: String,
    #[serde(default)]
    pub medications: String,
    #[serde(default)]
    pub allergies: String,
    #[serde(default)]
    pub diseases: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReportRequest {
    pub name: Option<String>,
    pub dob: Option<String>,
    pub blood_group: Option<String>,
    pub medications: Option<String>,
    pub allergies: Option<String>,
    pub diseases: Option<String>,
}
