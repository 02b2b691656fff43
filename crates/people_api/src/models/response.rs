use serde::de::{Deserializer, Error as _};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

use crate::error::{PeopleError, Result};

/// Body returned by `timetracker/addtimelog`.
#[derive(Debug, Deserialize, Clone)]
pub struct AddTimeLogResponse {
    pub response: ResponseEnvelope,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ResponseEnvelope {
    #[serde(default)]
    pub result: Option<Vec<TimeLogResult>>,
    #[serde(default)]
    pub message: Option<Value>,
    #[serde(default)]
    pub errors: Option<Value>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TimeLogResult {
    #[serde(default, deserialize_with = "deserialize_id_field")]
    pub time_log_id: Option<String>,
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

impl AddTimeLogResponse {
    /// Id of the first created entry; empty when the service created none.
    pub fn into_time_log_id(self) -> Result<String> {
        let ResponseEnvelope {
            result,
            message,
            errors,
        } = self.response;

        let Some(results) = result else {
            return Err(PeopleError::Protocol(describe_missing_result(
                message.as_ref(),
                errors.as_ref(),
            )));
        };

        Ok(results
            .into_iter()
            .next()
            .and_then(|entry| entry.time_log_id)
            .unwrap_or_default())
    }
}

/// Extracts the time log id from a raw `addtimelog` response body.
pub fn parse_time_log_id(body: &str) -> Result<String> {
    serde_json::from_str::<AddTimeLogResponse>(body)?.into_time_log_id()
}

fn describe_missing_result(message: Option<&Value>, errors: Option<&Value>) -> String {
    let mut description = String::from("response has no result");
    match message {
        None | Some(Value::Null) => {}
        Some(Value::String(text)) => {
            description.push_str(": ");
            description.push_str(text);
        }
        Some(other) => description.push_str(&format!(": {other}")),
    }
    if let Some(errors) = errors {
        description.push_str(&format!(" ({errors})"));
    }
    description
}

fn deserialize_id_field<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(Some(text)),
        Some(Value::Number(number)) => Ok(Some(number.to_string())),
        Some(other) => Err(D::Error::custom(format!(
            "timeLogId must be a string or number, got {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::parse_time_log_id;
    use crate::error::PeopleError;

    #[test]
    fn first_result_id_is_returned() {
        let body = r#"{"response":{"result":[{"timeLogId":"42"},{"timeLogId":"43"}]}}"#;
        assert_eq!(parse_time_log_id(body).unwrap(), "42");
    }

    #[test]
    fn numeric_ids_are_stringified() {
        let body = r#"{"response":{"result":[{"timeLogId":420000001}]}}"#;
        assert_eq!(parse_time_log_id(body).unwrap(), "420000001");
    }

    #[test]
    fn empty_result_yields_empty_id() {
        assert_eq!(parse_time_log_id(r#"{"response":{"result":[]}}"#).unwrap(), "");
    }

    #[test]
    fn absent_id_yields_empty_id() {
        let body = r#"{"response":{"result":[{"message":"ok"}],"status":0}}"#;
        assert_eq!(parse_time_log_id(body).unwrap(), "");
    }

    #[test]
    fn non_string_message_does_not_hide_the_result() {
        let body = r#"{"response":{"result":[{"timeLogId":"42"}],"message":{"x":1}}}"#;
        assert_eq!(parse_time_log_id(body).unwrap(), "42");
    }

    #[test]
    fn structured_message_is_described_when_result_is_missing() {
        let body = r#"{"response":{"message":{"text":"quota exceeded"},"status":1}}"#;
        match parse_time_log_id(body).unwrap_err() {
            PeopleError::Protocol(message) => assert!(message.contains("quota exceeded")),
            other => panic!("expected protocol error, got {other:?}"),
        }
    }

    #[test]
    fn missing_response_is_a_protocol_error() {
        let err = parse_time_log_id(r#"{"result":[]}"#).unwrap_err();
        assert!(matches!(err, PeopleError::Protocol(_)));
    }

    #[test]
    fn missing_result_is_a_protocol_error() {
        let body = r#"{"response":{"message":"Error occurred","errors":{"code":7202,"message":"Invalid job"},"status":1}}"#;
        let err = parse_time_log_id(body).unwrap_err();
        match err {
            PeopleError::Protocol(message) => {
                assert!(message.contains("Error occurred"));
                assert!(message.contains("7202"));
            }
            other => panic!("expected protocol error, got {other:?}"),
        }
    }

    #[test]
    fn non_array_result_is_a_protocol_error() {
        let err = parse_time_log_id(r#"{"response":{"result":{"timeLogId":"42"}}}"#).unwrap_err();
        assert!(matches!(err, PeopleError::Protocol(_)));
    }

    #[test]
    fn malformed_json_is_a_protocol_error() {
        let err = parse_time_log_id("<html>busy</html>").unwrap_err();
        assert!(matches!(err, PeopleError::Protocol(_)));
    }
}
