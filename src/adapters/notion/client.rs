//! Notion HTTP client.
//!
//! Implements the record store port against one Notion database: cursor
//! pagination over `databases/{id}/query`, page creation, and page
//! property updates.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Response};
use tracing::debug;

use crate::domain::errors::{SyncError, SyncResult};
use crate::domain::models::{NotionConfig, RecordPage, RecordProperties, StoreRecord};
use crate::domain::ports::RecordStore;

use super::models::{
    CreatePageRequest, DatabaseParent, DatabaseQueryRequest, DatabaseQueryResponse,
    NotionErrorBody, NotionPage, UpdatePageRequest,
};

/// Base URL for the Notion API.
pub const NOTION_API_BASE: &str = "https://api.notion.com";

/// API version sent with every request.
pub const NOTION_VERSION: &str = "2022-06-28";

/// Configuration for [`NotionClient`].
#[derive(Debug, Clone)]
pub struct NotionClientConfig {
    pub token: String,
    pub database_id: String,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for NotionClientConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            database_id: String::new(),
            base_url: NOTION_API_BASE.to_string(),
            timeout_secs: 30,
        }
    }
}

impl From<&NotionConfig> for NotionClientConfig {
    fn from(config: &NotionConfig) -> Self {
        Self {
            token: config.token.clone(),
            database_id: config.database_id.clone(),
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            timeout_secs: config.timeout_secs,
        }
    }
}

/// HTTP client for a single Notion database.
///
/// All failures map to [`SyncError::StoreUnavailable`].
#[derive(Debug, Clone)]
pub struct NotionClient {
    http: Client,
    token: String,
    database_id: String,
    base_url: String,
}

impl NotionClient {
    pub fn with_config(config: NotionClientConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to build Notion HTTP client")?;

        Ok(Self {
            http,
            token: config.token,
            database_id: config.database_id,
            base_url: config.base_url,
        })
    }

    pub fn database_id(&self) -> &str {
        &self.database_id
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        self.http
            .request(method, format!("{}{}", self.base_url, path))
            .bearer_auth(&self.token)
            .header("Notion-Version", NOTION_VERSION)
    }

    /// Turn a non-success response into an error carrying Notion's error
    /// code and message when the body has them.
    async fn check(operation: &str, resp: Response) -> SyncResult<Response> {
        if resp.status().is_success() {
            return Ok(resp);
        }
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        let detail = match serde_json::from_str::<NotionErrorBody>(&body) {
            Ok(err) if !err.code.is_empty() => format!("{}: {}", err.code, err.message),
            _ => body,
        };
        Err(SyncError::StoreUnavailable(format!(
            "Notion {operation} returned {status}: {detail}"
        )))
    }

    async fn send(
        operation: &str,
        request: reqwest::RequestBuilder,
    ) -> SyncResult<Response> {
        let resp = request.send().await.map_err(|e| {
            SyncError::StoreUnavailable(format!("Notion {operation} request failed: {e}"))
        })?;
        Self::check(operation, resp).await
    }
}

#[async_trait]
impl RecordStore for NotionClient {
    async fn query_records(&self, cursor: Option<&str>) -> SyncResult<RecordPage> {
        let path = format!("/v1/databases/{}/query", self.database_id);
        let body = DatabaseQueryRequest {
            start_cursor: cursor.map(str::to_string),
        };

        let resp = Self::send(
            "query_database",
            self.request(reqwest::Method::POST, &path).json(&body),
        )
        .await?;

        let page = resp.json::<DatabaseQueryResponse>().await.map_err(|e| {
            SyncError::StoreUnavailable(format!("Notion query_database parse failed: {e}"))
        })?;
        debug!(
            count = page.results.len(),
            has_more = page.has_more,
            "Fetched Notion database page"
        );

        Ok(RecordPage {
            records: page.results.into_iter().map(StoreRecord::from).collect(),
            next_cursor: page.next_cursor.filter(|c| !c.is_empty()),
        })
    }

    async fn create_record(&self, properties: &RecordProperties) -> SyncResult<String> {
        let body = CreatePageRequest {
            parent: DatabaseParent {
                database_id: &self.database_id,
            },
            properties,
        };

        let resp = Self::send(
            "create_page",
            self.request(reqwest::Method::POST, "/v1/pages").json(&body),
        )
        .await?;

        let page = resp.json::<NotionPage>().await.map_err(|e| {
            SyncError::StoreUnavailable(format!("Notion create_page parse failed: {e}"))
        })?;
        Ok(page.id)
    }

    async fn update_record(
        &self,
        record_id: &str,
        properties: &RecordProperties,
    ) -> SyncResult<()> {
        let path = format!("/v1/pages/{record_id}");
        let body = UpdatePageRequest { properties };

        Self::send(
            "update_page",
            self.request(reqwest::Method::PATCH, &path).json(&body),
        )
        .await?;
        Ok(())
    }
}
