//! Reward Category Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Named grouping for reward sessions
///
/// Deleting a category never touches rewards that reference it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Create category payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryCreate {
    pub name: String,
}
