use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Blog post record - the unit exported by a backup run.
///
/// Timestamps are local wall-clock times and serialize as ISO-8601 strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub post_id: String,
    pub blog_name: String,
    pub content: String,
    pub category: String,
    pub category_id: Option<String>,
    pub author_id: Option<i64>,
    pub author_name: Option<String>,
    pub author_email: Option<String>,
    #[serde(default)]
    pub comment_ids: Vec<String>,
    #[serde(default)]
    pub tag_ids: Vec<String>,
    #[serde(default)]
    pub like_ids: Vec<String>,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
    #[serde(default = "default_published")]
    pub is_published: bool,
    #[serde(default)]
    pub view_count: i64,
    #[serde(default)]
    pub like_count: i64,
    #[serde(default)]
    pub comment_count: i64,
}

fn default_published() -> bool {
    true
}

impl BlogPost {
    /// Create a new published post with a generated ID and current timestamps.
    pub fn new(blog_name: String, content: String, category: String) -> Self {
        let now = Local::now().naive_local();
        Self {
            post_id: Uuid::new_v4().to_string(),
            blog_name,
            content,
            category,
            category_id: None,
            author_id: None,
            author_name: None,
            author_email: None,
            comment_ids: Vec::new(),
            tag_ids: Vec::new(),
            like_ids: Vec::new(),
            created_at: Some(now),
            updated_at: Some(now),
            is_published: true,
            view_count: 0,
            like_count: 0,
            comment_count: 0,
        }
    }

    /// Attach the author fields.
    pub fn with_author(
        mut self,
        id: i64,
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        self.author_id = Some(id);
        self.author_name = Some(name.into());
        self.author_email = Some(email.into());
        self
    }
}
