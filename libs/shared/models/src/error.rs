use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Error body returned by the video API on non-2xx responses.
///
/// Older endpoints answer with `{"code": 404, "message": ".."}`, newer ones
/// with problem details (`title`/`detail`). Every field is optional so any of
/// these shapes decodes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ApiErrorBody {
    /// Parses an error body, falling back to the raw text when it is not JSON.
    pub fn parse(raw: &str) -> Self {
        serde_json::from_str(raw).unwrap_or_else(|_| Self {
            message: (!raw.trim().is_empty()).then(|| raw.trim().to_string()),
            ..Self::default()
        })
    }

    pub fn summary(&self) -> String {
        let primary = self
            .message
            .as_deref()
            .or(self.title.as_deref())
            .unwrap_or("Unknown error");

        match self.description.as_deref().or(self.detail.as_deref()) {
            Some(extra) if extra != primary => format!("{}: {}", primary, extra),
            _ => primary.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_error_body() {
        let body = ApiErrorBody::parse(r#"{"code":404,"message":"Archive not found"}"#);
        assert_eq!(body.code, Some(Value::from(404)));
        assert_eq!(body.summary(), "Archive not found");
    }

    #[test]
    fn test_problem_details_body() {
        let body = ApiErrorBody::parse(
            r#"{"title":"Bad Request","detail":"maxDuration out of range"}"#,
        );
        assert_eq!(body.summary(), "Bad Request: maxDuration out of range");
    }

    #[test]
    fn test_plain_text_body() {
        let body = ApiErrorBody::parse("Service Unavailable");
        assert_eq!(body.summary(), "Service Unavailable");
        assert_eq!(ApiErrorBody::parse("").summary(), "Unknown error");
    }
}
