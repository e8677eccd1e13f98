// libs/video-api-cell/src/services/transport.rs
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{Client, Method};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error};

use shared_config::AppConfig;
use shared_utils::jwt::JwtSigner;

use crate::error::VideoApiError;

const CLIENT_USER_AGENT: &str = concat!("video-api-rust/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Empty,
    Json(Value),
    Form(Vec<(String, String)>),
}

/// A request relative to the API base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: RequestBody,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: RequestBody::Empty,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn with_query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }

    pub fn with_json<T: Serialize>(mut self, body: &T) -> Result<Self, VideoApiError> {
        self.body = RequestBody::Json(serde_json::to_value(body)?);
        Ok(self)
    }

    pub fn with_form(mut self, params: Vec<(String, String)>) -> Self {
        self.body = RequestBody::Form(params);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends one request and hands back the raw response. Status handling is left
/// to the caller so that alternative transports stay trivial.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, VideoApiError>;
}

/// Default transport backed by `reqwest`, authenticating every call with a
/// short-lived application JWT.
pub struct ReqwestTransport {
    client: Client,
    base_url: String,
    signer: Arc<JwtSigner>,
}

impl ReqwestTransport {
    pub fn new(config: &AppConfig, signer: Arc<JwtSigner>) -> Result<Self, VideoApiError> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self {
            client,
            base_url: config.video_api_base_url.trim_end_matches('/').to_string(),
            signer,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, VideoApiError> {
        let url = format!("{}{}", self.base_url, request.path);
        let token = self
            .signer
            .api_token()
            .map_err(|message| VideoApiError::Token { message })?;

        debug!("Sending {} request to: {}", request.method, url);

        let mut builder = self
            .client
            .request(request.method.clone(), &url)
            .header(AUTHORIZATION, format!("Bearer {}", token))
            .header(ACCEPT, "application/json")
            .header(USER_AGENT, CLIENT_USER_AGENT);

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }

        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(body) => builder.json(&body),
            RequestBody::Form(params) => builder.form(&params),
        };

        let response = builder.send().await.map_err(|e| {
            error!("Request to {} failed: {}", url, e);
            VideoApiError::from(e)
        })?;

        let status = response.status().as_u16();
        let body = response.text().await?;

        debug!("Video API response: {} - {}", status, body);

        Ok(ApiResponse { status, body })
    }
}

impl std::fmt::Debug for ReqwestTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestTransport")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}
