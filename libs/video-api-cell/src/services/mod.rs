// libs/video-api-cell/src/services/mod.rs

pub mod client;
pub mod endpoints;
pub mod transport;

pub use client::VideoClient;
pub use transport::{ApiRequest, ApiResponse, HttpTransport, ReqwestTransport, RequestBody};
