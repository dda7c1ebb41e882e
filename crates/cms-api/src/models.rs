use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentStatus {
    Draft,
    Published,
    Archived,
}

impl ContentStatus {
    pub const ALL: [ContentStatus; 3] = [
        ContentStatus::Draft,
        ContentStatus::Published,
        ContentStatus::Archived,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ContentStatus::Draft => "draft",
            ContentStatus::Published => "published",
            ContentStatus::Archived => "archived",
        }
    }

    /// Exact, case-sensitive match against the wire names.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.as_str() == name)
    }
}

impl fmt::Display for ContentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seo_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seo_description: Option<String>,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured_image_url: Option<String>,
}

/// A single piece of material as returned by the API.
///
/// `published_at` is set exactly when the content was last transitioned to
/// `Published`, and `created_at <= updated_at` holds for every stored item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Content {
    pub id: String,
    pub title: String,
    pub body: String,
    pub status: ContentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub published_at: Option<DateTime<Utc>>,
    pub author_id: String,
    pub metadata: ContentMetadata,
}

/// Row shape of the `contents` table. Metadata fields are flattened and
/// tags live in `content_tags`.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = crate::schema::contents)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ContentRow {
    pub id: String,
    pub title: String,
    pub body: String,
    pub status: String,
    pub author_id: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub published_at: Option<NaiveDateTime>,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    pub category: Option<String>,
    pub excerpt: Option<String>,
    pub featured_image_url: Option<String>,
}

#[derive(Debug, Clone, Queryable, Insertable)]
#[diesel(table_name = crate::schema::content_tags)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ContentTagRow {
    pub content_id: String,
    pub tag: String,
}

impl ContentRow {
    /// Rebuilds the API shape. Returns `None` when the stored status is not
    /// one of the known names.
    pub fn into_content(self, tags: BTreeSet<String>) -> Option<Content> {
        let status = ContentStatus::from_name(&self.status)?;

        Some(Content {
            id: self.id,
            title: self.title,
            body: self.body,
            status,
            created_at: self.created_at.and_utc(),
            updated_at: self.updated_at.and_utc(),
            published_at: self.published_at.map(|at| at.and_utc()),
            author_id: self.author_id,
            metadata: ContentMetadata {
                seo_title: self.seo_title,
                seo_description: self.seo_description,
                tags,
                category: self.category,
                excerpt: self.excerpt,
                featured_image_url: self.featured_image_url,
            },
        })
    }
}

impl From<&Content> for ContentRow {
    fn from(content: &Content) -> Self {
        ContentRow {
            id: content.id.clone(),
            title: content.title.clone(),
            body: content.body.clone(),
            status: content.status.as_str().to_string(),
            author_id: content.author_id.clone(),
            created_at: content.created_at.naive_utc(),
            updated_at: content.updated_at.naive_utc(),
            published_at: content.published_at.map(|at| at.naive_utc()),
            seo_title: content.metadata.seo_title.clone(),
            seo_description: content.metadata.seo_description.clone(),
            category: content.metadata.category.clone(),
            excerpt: content.metadata.excerpt.clone(),
            featured_image_url: content.metadata.featured_image_url.clone(),
        }
    }
}

impl Content {
    pub fn tag_rows(&self) -> Vec<ContentTagRow> {
        self.metadata
            .tags
            .iter()
            .map(|tag| ContentTagRow {
                content_id: self.id.clone(),
                tag: tag.clone(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn sample() -> Content {
        let created = Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap();
        Content {
            id: "c-1".to_string(),
            title: "Hello".to_string(),
            body: "World".to_string(),
            status: ContentStatus::Published,
            created_at: created,
            updated_at: created,
            published_at: Some(created),
            author_id: "author-1".to_string(),
            metadata: ContentMetadata {
                tags: ["rust", "cms"].into_iter().map(String::from).collect(),
                category: Some("Technology".to_string()),
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_status_names_are_case_sensitive() {
        assert_eq!(
            ContentStatus::from_name("archived"),
            Some(ContentStatus::Archived)
        );
        assert_eq!(ContentStatus::from_name("Archived"), None);
        assert_eq!(ContentStatus::from_name(""), None);
    }

    #[test]
    fn test_content_serializes_camel_case() {
        let value = serde_json::to_value(sample()).unwrap();

        assert_eq!(value["authorId"], json!("author-1"));
        assert_eq!(value["status"], json!("published"));
        assert_eq!(value["createdAt"], json!("2024-01-01T10:00:00Z"));
        assert_eq!(value["metadata"]["tags"], json!(["cms", "rust"]));
        assert_eq!(value["metadata"]["category"], json!("Technology"));
        assert!(value["metadata"].get("seoTitle").is_none());
    }

    #[test]
    fn test_unpublished_content_keeps_null_published_at() {
        let mut content = sample();
        content.status = ContentStatus::Draft;
        content.published_at = None;

        let value = serde_json::to_value(content).unwrap();
        assert_eq!(value["publishedAt"], serde_json::Value::Null);
    }

    #[test]
    fn test_row_conversion_preserves_content() {
        let content = sample();
        let row = ContentRow::from(&content);
        let rebuilt = row
            .into_content(content.metadata.tags.clone())
            .expect("known status");

        assert_eq!(rebuilt, content);
    }

    #[test]
    fn test_row_with_unknown_status_is_rejected() {
        let mut row = ContentRow::from(&sample());
        row.status = "deleted".to_string();

        assert!(row.into_content(BTreeSet::new()).is_none());
    }
}
