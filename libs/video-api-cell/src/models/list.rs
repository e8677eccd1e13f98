// libs/video-api-cell/src/models/list.rs
use serde::{Deserialize, Serialize};

use crate::error::VideoApiError;
use crate::models::archive::Archive;
use crate::models::broadcast::Broadcast;
use crate::models::render::RenderResponse;
use crate::models::stream::{Connection, GetStreamResponse};
use crate::validation::{check_range, validate_session_id};

pub const MAX_LIST_COUNT: i64 = 1000;

/// `{count, items}` page returned by every list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListResponse<T> {
    #[serde(default)]
    pub count: u32,
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

pub type ListArchivesResponse = ListResponse<Archive>;
pub type ListBroadcastsResponse = ListResponse<Broadcast>;
pub type ListStreamsResponse = ListResponse<GetStreamResponse>;
pub type ListRendersResponse = ListResponse<RenderResponse>;
pub type ListConnectionsResponse = ListResponse<Connection>;

/// Pagination filter for archives, broadcasts and renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListStreamCompositionsRequest {
    offset: Option<u32>,
    count: Option<u32>,
    session_id: Option<String>,
}

impl ListStreamCompositionsRequest {
    pub fn builder() -> ListStreamCompositionsRequestBuilder {
        ListStreamCompositionsRequestBuilder::default()
    }

    /// First page at the maximum page size.
    pub fn all() -> Self {
        Self {
            offset: Some(0),
            count: Some(MAX_LIST_COUNT as u32),
            session_id: None,
        }
    }

    pub fn offset(&self) -> Option<u32> {
        self.offset
    }

    pub fn count(&self) -> Option<u32> {
        self.count
    }

    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    pub fn query_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        if let Some(offset) = self.offset {
            params.push(("offset".to_string(), offset.to_string()));
        }
        if let Some(count) = self.count {
            params.push(("count".to_string(), count.to_string()));
        }
        if let Some(session_id) = &self.session_id {
            params.push(("sessionId".to_string(), session_id.clone()));
        }
        params
    }
}

#[derive(Debug, Clone, Default)]
pub struct ListStreamCompositionsRequestBuilder {
    offset: Option<i64>,
    count: Option<i64>,
    session_id: Option<String>,
}

impl ListStreamCompositionsRequestBuilder {
    pub fn offset(mut self, offset: i64) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn count(mut self, count: i64) -> Self {
        self.count = Some(count);
        self
    }

    pub fn session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    pub fn build(self) -> Result<ListStreamCompositionsRequest, VideoApiError> {
        check_range(self.offset, 0, u32::MAX as i64, "offset")?;
        check_range(self.count, 0, MAX_LIST_COUNT, "count")?;
        if let Some(session_id) = &self.session_id {
            validate_session_id(session_id)?;
        }

        Ok(ListStreamCompositionsRequest {
            offset: self.offset.map(|o| o as u32),
            count: self.count.map(|c| c as u32),
            session_id: self.session_id,
        })
    }
}
