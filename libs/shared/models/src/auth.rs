use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Claims carried by the short-lived token that authenticates REST calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiClaims {
    pub application_id: String,
    pub iat: i64,
    pub exp: i64,
    pub jti: String,
}

impl ApiClaims {
    pub fn new(application_id: &str, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            application_id: application_id.to_string(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
            jti: Uuid::new_v4().to_string(),
        }
    }
}

/// Claims of a client token that lets a participant connect to a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionTokenClaims {
    pub application_id: String,
    pub scope: String,
    pub sub: String,
    pub session_id: String,
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_layout_class_list: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connection_data: Option<String>,
    pub iat: i64,
    pub exp: i64,
    pub jti: String,
}
