//! Jira worklog webhook: query parameters in, People time log id out.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::{debug, error, info};
use people_api::{PeopleClient, PeopleError, TimeLogRecord};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::AppState;

/// Query parameters the Jira automation rule attaches to the webhook call.
#[derive(Debug, Clone, Default)]
pub struct WorklogParams {
    pub worklog_started: Option<String>,
    pub worklog_time_spent_seconds: Option<String>,
    pub worklog_user_email: Option<String>,
    pub worklog_job_id: Option<String>,
    pub worklog_comment: Option<String>,
    pub issue_summary: Option<String>,
    pub project_summary: Option<String>,
}

impl WorklogParams {
    /// Collects the known parameters; a repeated key keeps its first value, unknown keys are ignored.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "worklogStarted" => &mut params.worklog_started,
                "worklogTimeSpentSeconds" => &mut params.worklog_time_spent_seconds,
                "worklogUserEmail" => &mut params.worklog_user_email,
                "worklogJobID" => &mut params.worklog_job_id,
                "worklogComment" => &mut params.worklog_comment,
                "issueSummary" => &mut params.issue_summary,
                "projectSummary" => &mut params.project_summary,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        params
    }

    /// Builds the People record and fills `work_item`/`description` from the issue metadata.
    pub fn to_time_log(&self) -> Option<TimeLogRecord> {
        let mut record = TimeLogRecord::from_strings(
            self.worklog_user_email.as_deref(),
            self.worklog_job_id.as_deref(),
            self.worklog_started.as_deref(),
            self.worklog_time_spent_seconds.as_deref(),
        )?;

        let work_item = format!(
            "{}: {}",
            self.project_summary.as_deref().unwrap_or_default(),
            self.issue_summary.as_deref().unwrap_or_default()
        );
        let description = self
            .worklog_comment
            .as_deref()
            .filter(|comment| !comment.trim().is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| work_item.clone());

        record.work_item = Some(work_item);
        record.description = Some(description);
        Some(record)
    }
}

/// Body returned to the webhook caller.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TimeLogCreated {
    pub time_log_id: String,
}

#[derive(Serialize, Debug)]
struct ErrorBody {
    error: String,
}

#[derive(Debug, Error)]
pub enum WebhookError {
    #[error("unable to create a time log from the worklog parameters")]
    InvalidWorklog,
    #[error(transparent)]
    People(#[from] PeopleError),
}

impl WebhookError {
    pub fn status(&self) -> StatusCode {
        match self {
            WebhookError::InvalidWorklog => StatusCode::BAD_REQUEST,
            WebhookError::People(PeopleError::Protocol(_)) => StatusCode::BAD_GATEWAY,
            WebhookError::People(err) if err.is_transport() => StatusCode::BAD_GATEWAY,
            WebhookError::People(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for WebhookError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

/// Validates the worklog and submits it to People.
pub async fn forward_worklog(
    client: &PeopleClient,
    params: &WorklogParams,
) -> Result<TimeLogCreated, WebhookError> {
    debug!("worklog parameters: {:?}", params);

    let Some(record) = params.to_time_log() else {
        error!("Unable to create time log from the webhook parameters");
        return Err(WebhookError::InvalidWorklog);
    };
    info!(
        "Time log created for {} on job {} ({})",
        record.user_email,
        record.job_id,
        record.work_date()
    );

    let time_log_id = client.submit_time_log(&record).await.map_err(|err| {
        error!("Unable to submit time log: {}", err);
        WebhookError::from(err)
    })?;
    info!("Time log submitted with id {:?}", time_log_id);

    Ok(TimeLogCreated { time_log_id })
}

pub async fn handle(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<TimeLogCreated>, WebhookError> {
    info!("JiraWorklogToPeople started");
    let params = WorklogParams::from_pairs(pairs);
    let created = forward_worklog(&state.client, &params).await?;
    info!("JiraWorklogToPeople finished");
    Ok(Json(created))
}
