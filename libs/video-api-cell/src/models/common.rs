// libs/video-api-cell/src/models/common.rs
use serde::{Deserialize, Serialize};

use crate::error::VideoApiError;
use crate::validation::{require_text, validate_session_id};

/// Session id and client token carried by requests that make the platform
/// join a session on the caller's behalf (SIP, captions, render, connect).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionTokenFields {
    pub(crate) session_id: String,
    pub(crate) token: String,
}

impl SessionTokenFields {
    pub(crate) fn build(
        session_id: Option<String>,
        token: Option<String>,
    ) -> Result<Self, VideoApiError> {
        let fields = Self {
            session_id: require_text(session_id, "sessionId")?,
            token: require_text(token, "token")?,
        };
        fields.validate()?;
        Ok(fields)
    }

    pub fn validate(&self) -> Result<(), VideoApiError> {
        validate_session_id(&self.session_id)?;
        if self.token.trim().is_empty() {
            return Err(VideoApiError::missing("token"));
        }
        Ok(())
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_both_fields_required() {
        assert_matches!(
            SessionTokenFields::build(None, Some("t".into())),
            Err(VideoApiError::MissingField { field: "sessionId" })
        );
        assert_matches!(
            SessionTokenFields::build(Some("s".into()), Some("".into())),
            Err(VideoApiError::MissingField { field: "token" })
        );
        assert!(SessionTokenFields::build(Some("s".into()), Some("t".into())).is_ok());
    }
}
