//! Time log record submitted to the People time tracker.
//!
//! Records are built from the raw strings a webhook hands us. The typed
//! constructors reject blank identifiers outright; [`TimeLogRecord::from_strings`]
//! wraps them and turns every failure into `None`.

use chrono::{DateTime, Duration, Local, NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::{PeopleError, Result};

/// Naive layouts tried after the offset-aware ones, most specific first.
const NAIVE_DATE_TIME_FORMATS: [&str; 6] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %I:%M:%S %p",
];

/// Jira sends offsets without a colon, e.g. `2020-05-12T10:00:00.000+0200`.
const OFFSET_DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f%z";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BillingStatus {
    Billable,
    #[default]
    NonBillable,
}

impl BillingStatus {
    /// Token the time tracker expects in the `billingStatus` parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            BillingStatus::Billable => "billable",
            BillingStatus::NonBillable => "non-billable",
        }
    }
}

/// Represents a single logged interval of work, with the person and job it belongs to, its wall-clock start, its length, billing status and optional enrichment fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeLogRecord {
    pub user_email: String,
    pub job_id: String,
    pub start_date_time: NaiveDateTime,
    pub duration: Duration,
    pub billing_status: BillingStatus,
    pub project_id: Option<String>,
    pub project_name: Option<String>,
    pub job_name: Option<String>,
    pub work_item: Option<String>,
    pub description: Option<String>,
}

impl TimeLogRecord {
    /// Creates a non-billable record. Fails when `user_email` or `job_id` is blank, or the duration is negative.
    pub fn new(
        user_email: impl Into<String>,
        job_id: impl Into<String>,
        start_date_time: NaiveDateTime,
        duration: Duration,
    ) -> Result<Self> {
        let user_email = user_email.into();
        let job_id = job_id.into();

        if job_id.trim().is_empty() {
            return Err(PeopleError::invalid_argument("job id is empty"));
        }
        if user_email.trim().is_empty() {
            return Err(PeopleError::invalid_argument("user email is empty"));
        }
        if duration < Duration::zero() {
            return Err(PeopleError::invalid_argument(format!(
                "duration must not be negative, got {}s",
                duration.num_seconds()
            )));
        }
        let record = Self {
            user_email,
            job_id,
            start_date_time,
            duration,
            billing_status: BillingStatus::NonBillable,
            project_id: None,
            project_name: None,
            job_name: None,
            work_item: None,
            description: None,
        };
        record.end_date_time()?;
        Ok(record)
    }

    /// Same as [`TimeLogRecord::new`] with the duration given in whole seconds.
    pub fn from_seconds(
        user_email: impl Into<String>,
        job_id: impl Into<String>,
        start_date_time: NaiveDateTime,
        duration_seconds: i64,
    ) -> Result<Self> {
        let duration = Duration::try_seconds(duration_seconds).ok_or_else(|| {
            PeopleError::invalid_argument(format!("duration of {duration_seconds}s is out of range"))
        })?;
        Self::new(user_email, job_id, start_date_time, duration)
    }

    /// Builds a record from raw webhook values, or `None` if any required value is blank or unparseable.
    pub fn from_strings(
        user_email: Option<&str>,
        job_id: Option<&str>,
        start_date_time: Option<&str>,
        duration_seconds: Option<&str>,
    ) -> Option<Self> {
        let user_email = user_email.filter(|value| !value.trim().is_empty())?;
        let job_id = job_id.filter(|value| !value.trim().is_empty())?;
        let start = start_date_time.and_then(parse_start_date_time)?;
        let seconds = duration_seconds?.trim().parse::<i64>().ok()?;

        Self::from_seconds(user_email, job_id, start, seconds).ok()
    }

    pub fn work_date(&self) -> NaiveDate {
        self.start_date_time.date()
    }

    /// Fails when the duration pushes the end past the representable range.
    pub fn end_date_time(&self) -> Result<NaiveDateTime> {
        self.start_date_time
            .checked_add_signed(self.duration)
            .ok_or_else(|| PeopleError::invalid_argument("end time is out of range"))
    }
}

/// Parses a webhook timestamp into local wall-clock time.
///
/// Offset-aware values are converted to the host's local time zone; naive
/// values are taken as already local. A bare date means midnight.
pub fn parse_start_date_time(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Some(parsed) = DateTime::parse_from_rfc3339(value)
        .ok()
        .or_else(|| DateTime::parse_from_str(value, OFFSET_DATE_TIME_FORMAT).ok())
    {
        return Some(parsed.with_timezone(&Local).naive_local());
    }

    NAIVE_DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .map(|date| date.and_time(NaiveTime::MIN))
        })
}
