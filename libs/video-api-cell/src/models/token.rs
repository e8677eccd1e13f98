// libs/video-api-cell/src/models/token.rs
use chrono::{Duration, Utc};
use uuid::Uuid;

use shared_models::auth::SessionTokenClaims;

use crate::error::VideoApiError;
use crate::models::enums::Role;
use crate::validation::check_length;

pub const DEFAULT_TOKEN_TTL_HOURS: i64 = 24;
pub const MAX_TOKEN_TTL_DAYS: i64 = 30;
pub const MAX_CONNECTION_DATA_LENGTH: usize = 1000;

/// Claims of a client token for joining a session. Never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenOptions {
    role: Role,
    expiry_length: Duration,
    data: Option<String>,
    initial_layout_class_list: Vec<String>,
}

impl Default for TokenOptions {
    fn default() -> Self {
        Self {
            role: Role::default(),
            expiry_length: Duration::hours(DEFAULT_TOKEN_TTL_HOURS),
            data: None,
            initial_layout_class_list: Vec::new(),
        }
    }
}

impl TokenOptions {
    pub fn builder() -> TokenOptionsBuilder {
        TokenOptionsBuilder::default()
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn expiry_length(&self) -> Duration {
        self.expiry_length
    }

    pub fn data(&self) -> Option<&str> {
        self.data.as_deref()
    }

    pub fn initial_layout_class_list(&self) -> &[String] {
        &self.initial_layout_class_list
    }

    pub fn to_claims(&self, application_id: &str, session_id: &str) -> SessionTokenClaims {
        let now = Utc::now();
        SessionTokenClaims {
            application_id: application_id.to_string(),
            scope: "session.connect".to_string(),
            sub: "video".to_string(),
            session_id: session_id.to_string(),
            role: self.role.as_str().to_string(),
            initial_layout_class_list: (!self.initial_layout_class_list.is_empty())
                .then(|| self.initial_layout_class_list.join(" ")),
            connection_data: self.data.clone(),
            iat: now.timestamp(),
            exp: (now + self.expiry_length).timestamp(),
            jti: Uuid::new_v4().to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TokenOptionsBuilder {
    role: Option<Role>,
    expiry_length: Option<Duration>,
    data: Option<String>,
    initial_layout_class_list: Vec<String>,
}

impl TokenOptionsBuilder {
    pub fn role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }

    /// Token lifetime; 24 hours when unset, at most 30 days.
    pub fn expiry_length(mut self, expiry_length: Duration) -> Self {
        self.expiry_length = Some(expiry_length);
        self
    }

    /// Free-form connection metadata visible to other participants.
    pub fn data(mut self, data: impl Into<String>) -> Self {
        self.data = Some(data.into());
        self
    }

    pub fn initial_layout_class_list<I, S>(mut self, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.initial_layout_class_list = classes.into_iter().map(Into::into).collect();
        self
    }

    pub fn build(self) -> Result<TokenOptions, VideoApiError> {
        let expiry_length = self
            .expiry_length
            .unwrap_or_else(|| Duration::hours(DEFAULT_TOKEN_TTL_HOURS));

        if expiry_length <= Duration::zero() {
            return Err(VideoApiError::invalid("expiryLength", "must be positive"));
        }
        if expiry_length > Duration::days(MAX_TOKEN_TTL_DAYS) {
            return Err(VideoApiError::invalid(
                "expiryLength",
                format!("cannot exceed {} days", MAX_TOKEN_TTL_DAYS),
            ));
        }

        check_length(self.data.as_deref(), 0, MAX_CONNECTION_DATA_LENGTH, "data")?;

        Ok(TokenOptions {
            role: self.role.unwrap_or_default(),
            expiry_length,
            data: self.data,
            initial_layout_class_list: self.initial_layout_class_list,
        })
    }
}
