//! Notion API request and response models.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::models::{RecordProperties, StoreRecord};

/// Name of the number property holding the issue number.
pub const ISSUE_NUMBER_PROPERTY: &str = "ID";

/// Body of `POST /v1/databases/{id}/query`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DatabaseQueryRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_cursor: Option<String>,
}

/// Response of `POST /v1/databases/{id}/query`.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseQueryResponse {
    pub results: Vec<NotionPage>,
    #[serde(default)]
    pub next_cursor: Option<String>,
    #[serde(default)]
    pub has_more: bool,
}

/// A database page. Only the id and raw properties are kept.
#[derive(Debug, Clone, Deserialize)]
pub struct NotionPage {
    pub id: String,
    #[serde(default)]
    pub properties: Map<String, Value>,
}

impl NotionPage {
    /// The whole, non-negative value of the `ID` number property.
    pub fn issue_number(&self) -> Option<u64> {
        let number = self
            .properties
            .get(ISSUE_NUMBER_PROPERTY)?
            .get("number")?;
        number.as_u64().or_else(|| {
            number
                .as_f64()
                .filter(|n| n.fract() == 0.0 && *n >= 0.0 && *n <= u64::MAX as f64)
                .map(|n| n as u64)
        })
    }
}

impl From<NotionPage> for StoreRecord {
    fn from(page: NotionPage) -> Self {
        Self {
            issue_number: page.issue_number(),
            id: page.id,
        }
    }
}

/// Parent reference for page creation.
#[derive(Debug, Clone, Serialize)]
pub struct DatabaseParent<'a> {
    pub database_id: &'a str,
}

/// Body of `POST /v1/pages`.
#[derive(Debug, Clone, Serialize)]
pub struct CreatePageRequest<'a> {
    pub parent: DatabaseParent<'a>,
    pub properties: &'a RecordProperties,
}

/// Body of `PATCH /v1/pages/{id}`.
#[derive(Debug, Clone, Serialize)]
pub struct UpdatePageRequest<'a> {
    pub properties: &'a RecordProperties,
}

/// Error object returned by the Notion API.
#[derive(Debug, Clone, Deserialize)]
pub struct NotionErrorBody {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub message: String,
}
