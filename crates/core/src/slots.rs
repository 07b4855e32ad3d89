//! Partitioning of a doctor's working window into bookable slots.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{CareError, CareResult};

/// Slot length used when `CLINIC_SLOT_MINUTES` is not set
pub const DEFAULT_SLOT_MINUTES: i64 = 30;

/// A half-open interval `[start, end)` that becomes one slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Splits `[window_start, window_end)` into consecutive slots of `slot_length`.
///
/// Slots are emitted from `window_start` onwards while a whole slot still
/// fits. A trailing remainder shorter than `slot_length` is dropped, so the
/// last slot never ends after `window_end`.
///
/// # Errors
///
/// * `CareError::Validation` - non-positive slot length, an empty or
///   inverted window, or a window too short to hold a single slot
pub fn partition_window(
    window_start: DateTime<Utc>,
    window_end: DateTime<Utc>,
    slot_length: Duration,
) -> CareResult<Vec<SlotWindow>> {
    if slot_length <= Duration::zero() {
        return Err(CareError::validation("Slot length must be positive"));
    }

    if window_start >= window_end {
        return Err(CareError::validation("Start time must be before end time"));
    }

    let mut slots = Vec::new();
    let mut cursor = window_start;
    while cursor + slot_length <= window_end {
        let end = cursor + slot_length;
        slots.push(SlotWindow { start: cursor, end });
        cursor = end;
    }

    if slots.is_empty() {
        return Err(CareError::validation(format!(
            "Working window is shorter than one {}-minute slot",
            slot_length.num_minutes()
        )));
    }

    Ok(slots)
}
