//! Content Models
//!
//! Posts, webinars, career pages and premium ads share one shape and one
//! endpoint layout; [`ContentKind`] selects the collection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Content collection managed from the admin panels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContentKind {
    Post,
    Webinar,
    CareerPage,
    Ad,
}

impl ContentKind {
    pub const ALL: [ContentKind; 4] = [Self::Post, Self::Webinar, Self::CareerPage, Self::Ad];

    /// Collection root, e.g. `/api/posts`
    pub fn base_path(&self) -> &'static str {
        match self {
            Self::Post => "/api/posts",
            Self::Webinar => "/api/webinars",
            Self::CareerPage => "/api/career-pages",
            Self::Ad => "/api/ads",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Post => "post",
            Self::Webinar => "webinar",
            Self::CareerPage => "career-page",
            Self::Ad => "ad",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ContentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "post" | "posts" => Ok(Self::Post),
            "webinar" | "webinars" => Ok(Self::Webinar),
            "career-page" | "career-pages" | "career" => Ok(Self::CareerPage),
            "ad" | "ads" => Ok(Self::Ad),
            other => Err(format!("unknown content kind: {other}")),
        }
    }
}

fn default_true() -> bool {
    true
}

/// A post, webinar, career page or ad
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    #[serde(alias = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default = "default_true")]
    pub is_visible: bool,
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub shares: u64,
    pub created_at: DateTime<Utc>,
}

impl ContentItem {
    /// Case-insensitive match on title or body
    pub fn matches(&self, needle: &str) -> bool {
        let needle = needle.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        self.title.to_lowercase().contains(&needle)
            || self
                .body
                .as_deref()
                .is_some_and(|b| b.to_lowercase().contains(&needle))
    }
}

/// Create / update content payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentDraft {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

/// Engagement counter bumped from the public site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Engagement {
    Like,
    Share,
}

impl Engagement {
    /// Path segment after the item id
    pub fn action(&self) -> &'static str {
        match self {
            Self::Like => "like",
            Self::Share => "share",
        }
    }

    /// Mutable access to the matching counter
    pub fn counter<'a>(&self, item: &'a mut ContentItem) -> &'a mut u64 {
        match self {
            Self::Like => &mut item.likes,
            Self::Share => &mut item.shares,
        }
    }
}
