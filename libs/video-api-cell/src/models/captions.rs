// libs/video-api-cell/src/models/captions.rs
use serde::{Deserialize, Serialize};

use crate::error::VideoApiError;
use crate::models::common::SessionTokenFields;
use crate::models::enums::{lenient, Language};
use crate::validation::{check_length, check_range};

pub const MIN_CAPTIONS_DURATION_SECS: u32 = 300;
pub const MAX_CAPTIONS_DURATION_SECS: u32 = 14_400;
pub const MIN_CALLBACK_URL_LENGTH: usize = 15;
pub const MAX_CALLBACK_URL_LENGTH: usize = 2048;

/// Starts live captioning of a session's audio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptionsRequest {
    #[serde(flatten)]
    session: SessionTokenFields,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::deserialize"
    )]
    language_code: Option<Language>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    max_duration: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    partial_captions: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    status_callback_url: Option<String>,
}

pub type StartCaptionsRequest = CaptionsRequest;

impl CaptionsRequest {
    pub fn builder() -> CaptionsRequestBuilder {
        CaptionsRequestBuilder::default()
    }

    pub fn session_id(&self) -> &str {
        self.session.session_id()
    }

    pub fn token(&self) -> &str {
        self.session.token()
    }

    pub fn language_code(&self) -> Option<Language> {
        self.language_code
    }

    pub fn max_duration(&self) -> Option<u32> {
        self.max_duration
    }

    pub fn partial_captions(&self) -> Option<bool> {
        self.partial_captions
    }

    pub fn validate(&self) -> Result<(), VideoApiError> {
        self.session.validate()?;
        check_range(
            self.max_duration,
            MIN_CAPTIONS_DURATION_SECS,
            MAX_CAPTIONS_DURATION_SECS,
            "maxDuration",
        )?;
        check_length(
            self.status_callback_url.as_deref(),
            MIN_CALLBACK_URL_LENGTH,
            MAX_CALLBACK_URL_LENGTH,
            "statusCallbackUrl",
        )
    }

    pub fn status_callback_url(&self) -> Option<&str> {
        self.status_callback_url.as_deref()
    }
}

#[derive(Debug, Clone, Default)]
pub struct CaptionsRequestBuilder {
    session_id: Option<String>,
    token: Option<String>,
    language_code: Option<Language>,
    max_duration: Option<u32>,
    partial_captions: Option<bool>,
    status_callback_url: Option<String>,
}

impl CaptionsRequestBuilder {
    pub fn session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn language_code(mut self, language: Language) -> Self {
        self.language_code = Some(language);
        self
    }

    pub fn max_duration(mut self, seconds: u32) -> Self {
        self.max_duration = Some(seconds);
        self
    }

    pub fn partial_captions(mut self, partial: bool) -> Self {
        self.partial_captions = Some(partial);
        self
    }

    pub fn status_callback_url(mut self, url: impl Into<String>) -> Self {
        self.status_callback_url = Some(url.into());
        self
    }

    pub fn build(self) -> Result<CaptionsRequest, VideoApiError> {
        let request = CaptionsRequest {
            session: SessionTokenFields::build(self.session_id, self.token)?,
            language_code: self.language_code,
            max_duration: self.max_duration,
            partial_captions: self.partial_captions,
            status_callback_url: self.status_callback_url,
        };
        request.validate()?;
        Ok(request)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptionsResponse {
    pub captions_id: String,
}
