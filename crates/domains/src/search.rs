//! Dynamic search condition for posts.
//!
//! The condition is a transient value object built from request parameters.
//! [`PostSearchCondition::matches`] is the reference predicate; the Postgres
//! adapter translates the same rules into SQL.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Post;

/// Where the keyword applies. Defaults to both fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SearchScope {
    Title,
    Content,
    #[default]
    TitleContent,
}

#[derive(Debug, Clone, Default)]
pub struct PostSearchCondition {
    pub keyword: Option<String>,
    pub scope: SearchScope,
    pub created_from: Option<DateTime<Utc>>,
    pub created_to: Option<DateTime<Utc>>,
}

impl PostSearchCondition {
    /// The effective keyword: trimmed, `None` when absent or blank.
    pub fn keyword(&self) -> Option<&str> {
        self.keyword
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }

    /// All active filters ANDed; with no filters every post matches.
    pub fn matches(&self, post: &Post) -> bool {
        if let Some(keyword) = self.keyword() {
            let needle = keyword.to_lowercase();
            let title_hit = post.title.to_lowercase().contains(&needle);
            let content_hit = post.content.to_lowercase().contains(&needle);
            let hit = match self.scope {
                SearchScope::Title => title_hit,
                SearchScope::Content => content_hit,
                SearchScope::TitleContent => title_hit || content_hit,
            };
            if !hit {
                return false;
            }
        }
        if let Some(from) = self.created_from {
            if post.created_at < from {
                return false;
            }
        }
        if let Some(to) = self.created_to {
            if post.created_at > to {
                return false;
            }
        }
        true
    }
}
