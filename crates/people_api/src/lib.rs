//! Typed Zoho People time tracker client used by the webhook service.

pub mod client;
pub mod config;
pub mod error;
pub mod models;

pub use client::{ApiMethod, PeopleClient};
pub use config::PeopleConfig;
pub use error::{PeopleError, Result};
pub use models::{parse_start_date_time, BillingStatus, TimeLogRecord};
