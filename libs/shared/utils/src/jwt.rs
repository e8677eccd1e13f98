use std::fmt;

use chrono::Duration;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use shared_models::auth::ApiClaims;

/// Lifetime of the token attached to each REST call.
pub const API_TOKEN_TTL_SECS: i64 = 300;

/// Signs RS256 tokens on behalf of a video application.
pub struct JwtSigner {
    application_id: String,
    key: EncodingKey,
}

impl JwtSigner {
    pub fn new(application_id: &str, private_key_pem: &str) -> Result<Self, String> {
        if application_id.is_empty() {
            return Err("Application ID is not set".to_string());
        }
        if private_key_pem.trim().is_empty() {
            return Err("Private key is not set".to_string());
        }

        let key = EncodingKey::from_rsa_pem(private_key_pem.as_bytes()).map_err(|e| {
            debug!("Failed to parse private key: {}", e);
            "Invalid RSA private key".to_string()
        })?;

        Ok(Self {
            application_id: application_id.to_string(),
            key,
        })
    }

    pub fn application_id(&self) -> &str {
        &self.application_id
    }

    pub fn sign<T: Serialize>(&self, claims: &T) -> Result<String, String> {
        encode(&Header::new(Algorithm::RS256), claims, &self.key).map_err(|e| {
            debug!("Failed to sign token: {}", e);
            format!("Failed to sign token: {}", e)
        })
    }

    /// Fresh bearer token for a single API request.
    pub fn api_token(&self) -> Result<String, String> {
        let claims = ApiClaims::new(&self.application_id, Duration::seconds(API_TOKEN_TTL_SECS));
        self.sign(&claims)
    }
}

impl fmt::Debug for JwtSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtSigner")
            .field("application_id", &self.application_id)
            .finish_non_exhaustive()
    }
}

pub fn validate_token<T: DeserializeOwned>(token: &str, public_key_pem: &str) -> Result<T, String> {
    if public_key_pem.trim().is_empty() {
        return Err("Public key is not set".to_string());
    }

    if token.split('.').count() != 3 {
        return Err("Invalid token format".to_string());
    }

    let key = DecodingKey::from_rsa_pem(public_key_pem.as_bytes())
        .map_err(|_| "Invalid RSA public key".to_string())?;

    match decode::<T>(token, &key, &Validation::new(Algorithm::RS256)) {
        Ok(data) => Ok(data.claims),
        Err(e) => {
            debug!("Token validation failed: {}", e);
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => Err("Token expired".to_string()),
                jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                    Err("Invalid token signature".to_string())
                }
                _ => Err("Invalid token".to_string()),
            }
        }
    }
}
