//! Store record models.
//!
//! [`RecordProperties`] is the property payload written to the store for
//! every create and update. Its serialized form is the database schema
//! contract, so the field names and nesting below must not drift.

use serde::{Deserialize, Serialize};

use super::issue::{AssigneeRef, ResolvedIssue};

/// A record read back from the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreRecord {
    /// Store-assigned opaque id.
    pub id: String,
    /// The mirrored issue number from the `ID` property. `None` when the
    /// property is empty or not a whole number.
    pub issue_number: Option<u64>,
}

/// One page of a cursor-paginated record query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordPage {
    pub records: Vec<StoreRecord>,
    pub next_cursor: Option<String>,
}

/// An issue routed to update, paired with the record it overwrites.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingUpdate {
    pub record_id: String,
    pub issue: ResolvedIssue,
}

/// Full tracked property set of a synced record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordProperties {
    #[serde(rename = "Title")]
    pub title: TitleProperty,
    #[serde(rename = "ID")]
    pub id: NumberProperty,
    #[serde(rename = "State")]
    pub state: SelectProperty,
    #[serde(rename = "URL")]
    pub url: UrlProperty,
    #[serde(rename = "Assignees")]
    pub assignees: PeopleProperty,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleProperty {
    pub title: Vec<RichText>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RichText {
    #[serde(rename = "type")]
    pub kind: String,
    pub text: TextContent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextContent {
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberProperty {
    pub number: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectProperty {
    pub select: SelectOption,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlProperty {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeopleProperty {
    pub people: Vec<AssigneeRef>,
}

impl RecordProperties {
    /// Map an issue onto the database schema.
    ///
    /// Every tracked property is always present, which is what makes an
    /// update a full overwrite.
    pub fn from_issue(issue: &ResolvedIssue) -> Self {
        Self {
            title: TitleProperty {
                title: vec![RichText {
                    kind: "text".to_string(),
                    text: TextContent {
                        content: issue.title.clone(),
                    },
                }],
            },
            id: NumberProperty {
                number: issue.number,
            },
            state: SelectProperty {
                select: SelectOption {
                    name: issue.state.as_str().to_string(),
                },
            },
            url: UrlProperty {
                url: issue.url.clone(),
            },
            assignees: PeopleProperty {
                people: issue.assignees.clone(),
            },
        }
    }

    /// Plain-text title, concatenated across rich-text segments.
    pub fn title_text(&self) -> String {
        self.title
            .title
            .iter()
            .map(|t| t.text.content.as_str())
            .collect()
    }

    pub const fn issue_number(&self) -> u64 {
        self.id.number
    }
}
