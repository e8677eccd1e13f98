use std::env;
use std::fs;
use std::time::Duration;
use tracing::warn;

pub const DEFAULT_VIDEO_API_BASE_URL: &str = "https://video.api.vonage.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub video_api_application_id: String,
    /// PEM encoded RSA private key belonging to the application.
    pub video_api_private_key: String,
    pub video_api_base_url: String,
    pub video_api_timeout_secs: u64,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            video_api_application_id: env::var("VIDEO_API_APPLICATION_ID")
                .unwrap_or_else(|_| {
                    warn!("VIDEO_API_APPLICATION_ID not set, using empty value");
                    String::new()
                }),
            video_api_private_key: load_private_key(
                env::var("VIDEO_API_PRIVATE_KEY").ok(),
                env::var("VIDEO_API_PRIVATE_KEY_PATH").ok(),
            ),
            video_api_base_url: env::var("VIDEO_API_BASE_URL")
                .unwrap_or_else(|_| {
                    warn!("VIDEO_API_BASE_URL not set, using default");
                    DEFAULT_VIDEO_API_BASE_URL.to_string()
                }),
            video_api_timeout_secs: env::var("VIDEO_API_TIMEOUT_SECS")
                .ok()
                .and_then(|raw| match raw.parse() {
                    Ok(secs) => Some(secs),
                    Err(_) => {
                        warn!("VIDEO_API_TIMEOUT_SECS is not a number: {}", raw);
                        None
                    }
                })
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
        };

        if !config.is_video_api_configured() {
            warn!("Video API client not fully configured - missing environment variables");
        }

        config
    }

    pub fn is_video_api_configured(&self) -> bool {
        !self.video_api_application_id.is_empty()
            && !self.video_api_private_key.is_empty()
            && !self.video_api_base_url.is_empty()
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.video_api_timeout_secs)
    }
}

/// Inline key contents win over a key file path.
pub fn load_private_key(inline: Option<String>, path: Option<String>) -> String {
    if let Some(contents) = inline.filter(|c| !c.trim().is_empty()) {
        return contents;
    }

    match path {
        Some(path) => fs::read_to_string(&path).unwrap_or_else(|e| {
            warn!("Failed to read private key from {}: {}", path, e);
            String::new()
        }),
        None => {
            warn!("VIDEO_API_PRIVATE_KEY and VIDEO_API_PRIVATE_KEY_PATH not set, using empty value");
            String::new()
        }
    }
}
