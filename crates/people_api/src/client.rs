use crate::config::PeopleConfig;
use crate::error::{PeopleError, Result};
use crate::models::{parse_time_log_id, TimeLogRecord};
use chrono::Duration;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::{Client as HttpClient, Response, StatusCode};
use tracing::{debug, warn};

/// Function name of the time tracker endpoint that creates an entry.
pub const ADD_TIME_LOG: &str = "addtimelog";
/// Date format hint echoed to the service; it must describe `workDate`.
pub const DATE_FORMAT_HINT: &str = "yyyy-MM-dd";

const WORK_DATE_FORMAT: &str = "%Y-%m-%d";
const CLOCK_TIME_FORMAT: &str = "%I:%M%p";

/// API areas the client knows how to address.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApiMethod {
    TimeLogs,
}

impl ApiMethod {
    pub fn path(&self) -> &'static str {
        match self {
            ApiMethod::TimeLogs => "timetracker",
        }
    }
}

#[derive(Clone)]
pub struct PeopleClient {
    http: HttpClient,
    config: PeopleConfig,
}

impl PeopleClient {
    /// Fails when the configured auth token is blank.
    pub fn new(config: PeopleConfig) -> Result<Self> {
        if config.token.trim().is_empty() {
            return Err(PeopleError::invalid_argument("auth token is empty"));
        }
        let http = build_http_client(&config)?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &PeopleConfig {
        &self.config
    }

    pub fn url_for(&self, method: ApiMethod, function: &str) -> String {
        let mut url = self.config.api_root();
        url.push_str(method.path());
        url.push('/');
        url.push_str(function.trim_start_matches('/'));
        url
    }

    /// Query parameters for `addtimelog`, in the order the service documents them.
    ///
    /// Unset enrichment fields are sent as empty strings rather than omitted.
    /// Records with blank identifiers or an invalid duration are rejected.
    pub fn time_log_query(&self, record: &TimeLogRecord) -> Result<Vec<(&'static str, String)>> {
        validate_time_log(record)?;
        let end_date_time = record.end_date_time()?;
        let optional = |value: &Option<String>| value.clone().unwrap_or_default();

        Ok(vec![
            ("authtoken", self.config.token.clone()),
            ("user", record.user_email.clone()),
            ("jobId", record.job_id.clone()),
            (
                "workDate",
                record.work_date().format(WORK_DATE_FORMAT).to_string(),
            ),
            ("dateFormat", DATE_FORMAT_HINT.to_string()),
            ("billingStatus", record.billing_status.as_str().to_string()),
            (
                "fromTime",
                record.start_date_time.format(CLOCK_TIME_FORMAT).to_string(),
            ),
            (
                "toTime",
                end_date_time.format(CLOCK_TIME_FORMAT).to_string(),
            ),
            ("projectId", optional(&record.project_id)),
            ("projectName", optional(&record.project_name)),
            ("jobName", optional(&record.job_name)),
            ("workItem", optional(&record.work_item)),
            ("description", optional(&record.description)),
        ])
    }

    /// Creates a time log entry and returns the id the service assigned, or an empty string if it reported none.
    pub async fn submit_time_log(&self, record: &TimeLogRecord) -> Result<String> {
        let query = self.time_log_query(record)?;
        let url = self.url_for(ApiMethod::TimeLogs, ADD_TIME_LOG);
        debug!(
            user = %record.user_email,
            job_id = %record.job_id,
            work_date = %record.work_date(),
            "submitting time log"
        );

        let response = self.http.get(url).query(&query).send().await?;
        let body = Self::read_body(response).await?;
        let time_log_id = parse_time_log_id(&body)?;

        debug!(time_log_id = %time_log_id, "time log submitted");
        Ok(time_log_id)
    }

    async fn read_body(response: Response) -> Result<String> {
        let status = response.status();
        if status.is_success() {
            return response.text().await.map_err(PeopleError::from);
        }

        let body = response.text().await.unwrap_or_default();
        warn!(%status, "time tracker rejected request");
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            Err(PeopleError::Authentication(format!(
                "Access denied ({}) - {}",
                status, body
            )))
        } else {
            Err(PeopleError::http(status, body))
        }
    }
}

/// Rejects records that cannot be submitted, whoever built them.
fn validate_time_log(record: &TimeLogRecord) -> Result<()> {
    if record.user_email.trim().is_empty() {
        return Err(PeopleError::invalid_argument("user email is empty"));
    }
    if record.job_id.trim().is_empty() {
        return Err(PeopleError::invalid_argument("job id is empty"));
    }
    if record.duration < Duration::zero() {
        return Err(PeopleError::invalid_argument(format!(
            "duration must not be negative, got {}s",
            record.duration.num_seconds()
        )));
    }
    record.end_date_time().map(|_| ())
}

fn build_http_client(config: &PeopleConfig) -> Result<HttpClient> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(
        USER_AGENT,
        HeaderValue::from_str(&config.user_agent)
            .map_err(|err| PeopleError::Other(err.to_string()))?,
    );

    let mut builder = HttpClient::builder()
        .default_headers(headers)
        .connect_timeout(config.connect_timeout);
    if let Some(timeout) = config.timeout {
        builder = builder.timeout(timeout);
    }

    builder
        .build()
        .map_err(|err| PeopleError::Other(err.to_string()))
}
