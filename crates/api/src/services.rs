//! Business rules for the API, written against the `CareStore` seam so they
//! can be exercised without a database.

pub mod alerts;
pub mod availability;
pub mod booking;
pub mod directory;
pub mod reports;

use campuscare_core::errors::{CareError, CareResult};
use uuid::Uuid;

use crate::ApiState;

/// Returns the trimmed value, or a validation error naming `field` if it is blank.
pub fn required<'a>(value: &'a str, field: &str) -> CareResult<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(CareError::Validation(format!("{} is required", field)))
    } else {
        Ok(trimmed)
    }
}

/// Parses an identifier taken from a path segment or request body.
pub fn parse_id(raw: &str, what: &str) -> CareResult<Uuid> {
    Uuid::parse_str(raw.trim())
        .map_err(|_| CareError::Validation(format!("{} is invalid", what)))
}

/// Looks up a student, failing with `NotFound` if there is none.
pub async fn existing_student(state: &ApiState, student_id: Uuid) -> CareResult<()> {
    state
        .store
        .find_student(student_id)
        .await?
        .map(|_| ())
        .ok_or_else(|| CareError::not_found("Student not found"))
}
