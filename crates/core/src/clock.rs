//! # Clinic Clock
//!
//! All user-facing dates and clock times are civil times in the clinic's
//! configured timezone. Storage works in UTC instants plus a plain calendar
//! date, so this module is the single place where the two meet.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::errors::{CareError, CareResult};

/// Timezone used when `CLINIC_TIMEZONE` is not set
pub const DEFAULT_TIMEZONE: &str = "Asia/Kolkata";

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M:%S";
const SHORT_TIME_FORMAT: &str = "%H:%M";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Converts between local civil time in a fixed timezone and UTC instants.
#[derive(Debug, Clone, Copy)]
pub struct ClinicClock {
    tz: Tz,
}

impl ClinicClock {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    /// Builds a clock from an IANA timezone name such as `Europe/Berlin`.
    pub fn from_name(name: &str) -> CareResult<Self> {
        let tz = name
            .trim()
            .parse::<Tz>()
            .map_err(|e| CareError::validation(format!("Unknown timezone '{}': {}", name, e)))?;
        Ok(Self::new(tz))
    }

    pub fn timezone(&self) -> Tz {
        self.tz
    }

    pub fn now(&self) -> DateTime<Tz> {
        Utc::now().with_timezone(&self.tz)
    }

    /// Parses a `YYYY-MM-DD` calendar date.
    pub fn parse_date(&self, raw: &str) -> CareResult<NaiveDate> {
        NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
            .map_err(|_| CareError::validation(format!("Invalid date '{}', expected YYYY-MM-DD", raw)))
    }

    /// Parses a clock time given as `HH:MM:SS` or `HH:MM`.
    pub fn parse_time(&self, raw: &str) -> CareResult<NaiveTime> {
        let raw = raw.trim();
        NaiveTime::parse_from_str(raw, TIME_FORMAT)
            .or_else(|_| NaiveTime::parse_from_str(raw, SHORT_TIME_FORMAT))
            .map_err(|_| CareError::validation(format!("Invalid time '{}', expected HH:MM", raw)))
    }

    /// Resolves a local date and clock time to a UTC instant.
    ///
    /// Times that fall into a DST gap are rejected; ambiguous times resolve
    /// to the earlier instant.
    pub fn local_instant(&self, date: NaiveDate, time: NaiveTime) -> CareResult<DateTime<Utc>> {
        self.tz
            .from_local_datetime(&date.and_time(time))
            .earliest()
            .map(|local| local.with_timezone(&Utc))
            .ok_or_else(|| {
                CareError::validation(format!(
                    "{} {} does not exist in timezone {}",
                    date,
                    time,
                    self.tz.name()
                ))
            })
    }

    /// Parses `date` and `time` strings and resolves them to a UTC instant.
    pub fn instant(&self, date: &str, time: &str) -> CareResult<DateTime<Utc>> {
        let date = self.parse_date(date)?;
        let time = self.parse_time(time)?;
        self.local_instant(date, time)
    }

    pub fn format_date(&self, date: NaiveDate) -> String {
        date.format(DATE_FORMAT).to_string()
    }

    /// Formats the local clock time of an instant as `HH:MM:SS`.
    pub fn format_time(&self, instant: DateTime<Utc>) -> String {
        instant.with_timezone(&self.tz).format(TIME_FORMAT).to_string()
    }

    /// Formats an instant as local `YYYY-MM-DD HH:MM:SS`.
    pub fn format_timestamp(&self, instant: DateTime<Utc>) -> String {
        instant
            .with_timezone(&self.tz)
            .format(TIMESTAMP_FORMAT)
            .to_string()
    }
}

impl Default for ClinicClock {
    fn default() -> Self {
        Self::new(chrono_tz::Asia::Kolkata)
    }
}
