mod response;
mod time_log;

pub use response::{parse_time_log_id, AddTimeLogResponse, ResponseEnvelope, TimeLogResult};
pub use time_log::{parse_start_date_time, BillingStatus, TimeLogRecord};
