// libs/video-api-cell/src/models/render.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::VideoApiError;
use crate::models::common::SessionTokenFields;
use crate::models::composition::from_epoch_millis;
use crate::models::enums::{lenient, RenderStatus, Resolution};
use crate::validation::{check_length, check_range, require_non_empty, require_text};

pub const MIN_RENDER_DURATION_SECS: u32 = 60;
pub const MAX_RENDER_DURATION_SECS: u32 = 36_000;
pub const MIN_RENDER_URL_LENGTH: usize = 15;
pub const MAX_RENDER_URL_LENGTH: usize = 2048;
pub const MAX_RENDER_NAME_LENGTH: usize = 200;

/// Starts an Experience Composer: a headless browser publishing a web page
/// into the session as a stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderRequest {
    #[serde(flatten)]
    session: SessionTokenFields,
    url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    max_duration: Option<u32>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::deserialize"
    )]
    resolution: Option<Resolution>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    properties: Option<RenderProperties>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderProperties {
    pub name: String,
}

impl RenderRequest {
    pub fn builder() -> RenderRequestBuilder {
        RenderRequestBuilder::default()
    }

    pub fn session_id(&self) -> &str {
        self.session.session_id()
    }

    pub fn token(&self) -> &str {
        self.session.token()
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn max_duration(&self) -> Option<u32> {
        self.max_duration
    }

    pub fn resolution(&self) -> Option<Resolution> {
        self.resolution
    }

    pub fn validate(&self) -> Result<(), VideoApiError> {
        self.session.validate()?;
        require_non_empty(&self.url, "url")?;
        check_length(Some(self.url.as_str()), MIN_RENDER_URL_LENGTH, MAX_RENDER_URL_LENGTH, "url")?;
        check_range(
            self.max_duration,
            MIN_RENDER_DURATION_SECS,
            MAX_RENDER_DURATION_SECS,
            "maxDuration",
        )?;

        if let Some(properties) = &self.properties {
            if properties.name.trim().is_empty() {
                return Err(VideoApiError::invalid("name", "name cannot be blank"));
            }
            check_length(Some(properties.name.as_str()), 1, MAX_RENDER_NAME_LENGTH, "name")?;
        }
        Ok(())
    }

    pub fn name(&self) -> Option<&str> {
        self.properties.as_ref().map(|p| p.name.as_str())
    }
}

#[derive(Debug, Clone, Default)]
pub struct RenderRequestBuilder {
    session_id: Option<String>,
    token: Option<String>,
    url: Option<String>,
    max_duration: Option<u32>,
    resolution: Option<Resolution>,
    name: Option<String>,
}

impl RenderRequestBuilder {
    pub fn session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Page loaded by the composer.
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn max_duration(mut self, seconds: u32) -> Self {
        self.max_duration = Some(seconds);
        self
    }

    pub fn resolution(mut self, resolution: Resolution) -> Self {
        self.resolution = Some(resolution);
        self
    }

    /// Name of the published stream.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn build(self) -> Result<RenderRequest, VideoApiError> {
        let request = RenderRequest {
            session: SessionTokenFields::build(self.session_id, self.token)?,
            url: require_text(self.url, "url")?,
            max_duration: self.max_duration,
            resolution: self.resolution,
            properties: self.name.map(|name| RenderProperties { name }),
        };
        request.validate()?;
        Ok(request)
    }
}

/// An Experience Composer as reported by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderResponse {
    pub id: String,
    pub session_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::deserialize"
    )]
    pub resolution: Option<Resolution>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::deserialize"
    )]
    pub status: Option<RenderStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stream_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl RenderResponse {
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at.and_then(from_epoch_millis)
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at.and_then(from_epoch_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    fn base() -> RenderRequestBuilder {
        RenderRequest::builder().session_id("sess1").token("tok")
    }

    #[test]
    fn test_url_minimum_length() {
        let short = "https://t.co/b";
        assert_eq!(short.len(), 14);
        assert_matches!(
            base().url(short).build(),
            Err(VideoApiError::InvalidArgument { field: "url", .. })
        );
        assert!(base().url(format!("{}c", short)).build().is_ok());
    }

    #[test]
    fn test_url_maximum_length() {
        let url = format!("https://{}", "a".repeat(MAX_RENDER_URL_LENGTH - 8));
        assert!(base().url(url.clone()).build().is_ok());
        assert!(base().url(format!("{}a", url)).build().is_err());
    }

    #[test]
    fn test_url_required() {
        assert_matches!(base().build(), Err(VideoApiError::MissingField { field: "url" }));
    }

    #[test]
    fn test_max_duration_bounds() {
        let url = "https://webapp.customer.com";
        for secs in [MIN_RENDER_DURATION_SECS, MAX_RENDER_DURATION_SECS] {
            assert!(base().url(url).max_duration(secs).build().is_ok());
        }
        for secs in [MIN_RENDER_DURATION_SECS - 1, MAX_RENDER_DURATION_SECS + 1] {
            assert!(base().url(url).max_duration(secs).build().is_err());
        }
    }

    #[test]
    fn test_name_bounds() {
        let url = "https://webapp.customer.com";
        assert!(base().url(url).name("a").build().is_ok());
        assert!(base().url(url).name("n".repeat(MAX_RENDER_NAME_LENGTH)).build().is_ok());
        assert!(base().url(url).name("n".repeat(MAX_RENDER_NAME_LENGTH + 1)).build().is_err());
        assert_matches!(
            base().url(url).name("   ").build(),
            Err(VideoApiError::InvalidArgument { field: "name", .. })
        );
    }

    #[test]
    fn test_name_nested_under_properties() {
        let request = base()
            .url("https://webapp.customer.com")
            .resolution(Resolution::HdLandscape)
            .name("Composed stream")
            .build()
            .unwrap();

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "sessionId": "sess1",
                "token": "tok",
                "url": "https://webapp.customer.com",
                "resolution": "1280x720",
                "properties": {"name": "Composed stream"}
            })
        );
    }

    #[test]
    fn test_decoded_request_is_validated() {
        let request: RenderRequest = serde_json::from_value(json!({
            "sessionId": "sess1",
            "token": "tok",
            "url": "https://webapp.customer.com",
            "properties": {"name": "  "}
        }))
        .unwrap();
        assert_matches!(
            request.validate(),
            Err(VideoApiError::InvalidArgument { field: "name", .. })
        );

        let request: RenderRequest = serde_json::from_value(json!({
            "sessionId": "sess1",
            "token": "tok",
            "url": "https://webapp.customer.com",
            "maxDuration": 1
        }))
        .unwrap();
        assert_matches!(
            request.validate(),
            Err(VideoApiError::InvalidArgument { field: "maxDuration", .. })
        );
    }
}
