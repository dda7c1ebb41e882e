use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::client::{ApiClient, ContentItem};
use crate::error::ProviderError;

/// Resources the admin UI can address. The set is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    BlogPosts,
    Categories,
}

impl ResourceKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ResourceKind::BlogPosts => "blog_posts",
            ResourceKind::Categories => "categories",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = ProviderError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "blog_posts" => Ok(ResourceKind::BlogPosts),
            "categories" => Ok(ResourceKind::Categories),
            other => Err(ProviderError::UnknownResource(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Get,
    Create,
    Update,
    Delete,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::List => "list",
            Operation::Get => "get",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
        };
        f.write_str(name)
    }
}

/// Flattened record shape consumed by the admin UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminRecord {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl From<ContentItem> for AdminRecord {
    fn from(item: ContentItem) -> Self {
        AdminRecord {
            id: item.id,
            title: item.title,
            content: Some(item.body),
            category: item.metadata.category,
            status: Some(item.status),
            created_at: Some(item.created_at),
        }
    }
}

/// Result of a local-only mutation: the id plus the submitted fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EchoRecord {
    pub id: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListResult {
    pub data: Vec<AdminRecord>,
    pub total: u64,
}

/// Page-based list request as issued by the admin UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    /// 1-based
    pub page: u64,
    pub per_page: u32,
    pub sort: Option<String>,
    pub order: Option<String>,
    pub filters: Vec<(String, String)>,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: 20,
            sort: None,
            order: None,
            filters: Vec::new(),
        }
    }
}

impl ListQuery {
    /// Query-string pairs for the content API's offset window.
    pub fn to_params(&self) -> Vec<(String, String)> {
        let offset = self.page.saturating_sub(1).saturating_mul(u64::from(self.per_page));

        let mut params = vec![
            ("limit".to_string(), self.per_page.to_string()),
            ("offset".to_string(), offset.to_string()),
        ];
        if let Some(sort) = &self.sort {
            params.push(("sort".to_string(), sort.clone()));
        }
        if let Some(order) = &self.order {
            params.push(("order".to_string(), order.clone()));
        }
        params.extend(self.filters.iter().cloned());
        params
    }
}

const CATEGORIES: [(&str, &str); 3] = [
    ("1", "Technology"),
    ("2", "Lifestyle"),
    ("3", "Business"),
];

fn category_records() -> Vec<AdminRecord> {
    CATEGORIES
        .iter()
        .map(|(id, title)| AdminRecord {
            id: id.to_string(),
            title: title.to_string(),
            content: None,
            category: None,
            status: None,
            created_at: None,
        })
        .collect()
}

/// Dispatches the generic admin interface onto each resource's handler.
#[derive(Debug, Clone)]
pub struct AdminProvider {
    client: ApiClient,
}

impl AdminProvider {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(
        &self,
        resource: ResourceKind,
        query: &ListQuery,
    ) -> Result<ListResult, ProviderError> {
        match resource {
            ResourceKind::BlogPosts => {
                let list = self.client.list_contents(&query.to_params()).await?;
                Ok(ListResult {
                    total: list.pagination.total_count,
                    data: list.contents.into_iter().map(AdminRecord::from).collect(),
                })
            }
            ResourceKind::Categories => {
                let data = category_records();
                Ok(ListResult {
                    total: data.len() as u64,
                    data,
                })
            }
        }
    }

    pub async fn get(
        &self,
        resource: ResourceKind,
        id: &str,
    ) -> Result<AdminRecord, ProviderError> {
        match resource {
            ResourceKind::BlogPosts => Ok(self.client.get_content(id).await?.into()),
            ResourceKind::Categories => category_records()
                .into_iter()
                .find(|record| record.id == id)
                .ok_or_else(|| ProviderError::NotFound {
                    resource,
                    id: id.to_string(),
                }),
        }
    }

    /// Local echo only: nothing is persisted.
    pub fn create(
        &self,
        resource: ResourceKind,
        fields: Map<String, Value>,
    ) -> Result<EchoRecord, ProviderError> {
        match resource {
            ResourceKind::BlogPosts => Ok(EchoRecord {
                id: Utc::now().timestamp_millis().to_string(),
                fields,
            }),
            ResourceKind::Categories => Err(ProviderError::Unsupported {
                resource,
                operation: Operation::Create,
            }),
        }
    }

    /// Local echo only: nothing is persisted.
    pub fn update(
        &self,
        resource: ResourceKind,
        id: &str,
        fields: Map<String, Value>,
    ) -> Result<EchoRecord, ProviderError> {
        match resource {
            ResourceKind::BlogPosts => Ok(EchoRecord {
                id: id.to_string(),
                fields,
            }),
            ResourceKind::Categories => Err(ProviderError::Unsupported {
                resource,
                operation: Operation::Update,
            }),
        }
    }

    /// Local echo only: nothing is deleted.
    pub fn delete(&self, resource: ResourceKind, id: &str) -> Result<EchoRecord, ProviderError> {
        match resource {
            ResourceKind::BlogPosts => Ok(EchoRecord {
                id: id.to_string(),
                fields: Map::new(),
            }),
            ResourceKind::Categories => Err(ProviderError::Unsupported {
                resource,
                operation: Operation::Delete,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn provider() -> AdminProvider {
        AdminProvider::new(ApiClient::parse("http://localhost:8080").unwrap())
    }

    #[test]
    fn test_resource_names_are_closed() {
        assert_eq!("blog_posts".parse::<ResourceKind>().unwrap(), ResourceKind::BlogPosts);
        assert_eq!("categories".parse::<ResourceKind>().unwrap(), ResourceKind::Categories);
        assert!(matches!(
            "users".parse::<ResourceKind>(),
            Err(ProviderError::UnknownResource(name)) if name == "users"
        ));
    }

    #[test]
    fn test_page_maps_to_offset_window() {
        let query = ListQuery {
            page: 3,
            per_page: 10,
            sort: Some("title".to_string()),
            order: Some("asc".to_string()),
            filters: vec![("status".to_string(), "published".to_string())],
        };

        let params = query.to_params();
        assert_eq!(
            params,
            vec![
                ("limit".to_string(), "10".to_string()),
                ("offset".to_string(), "20".to_string()),
                ("sort".to_string(), "title".to_string()),
                ("order".to_string(), "asc".to_string()),
                ("status".to_string(), "published".to_string()),
            ]
        );
    }

    #[test]
    fn test_page_zero_is_first_page() {
        let query = ListQuery {
            page: 0,
            ..ListQuery::default()
        };
        assert_eq!(query.to_params()[1], ("offset".to_string(), "0".to_string()));
    }

    #[tokio::test]
    async fn test_categories_are_static() {
        let provider = provider();

        let list = provider
            .list(ResourceKind::Categories, &ListQuery::default())
            .await
            .unwrap();
        assert_eq!(list.total, 3);
        let titles: Vec<&str> = list.data.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["Technology", "Lifestyle", "Business"]);

        let record = provider.get(ResourceKind::Categories, "2").await.unwrap();
        assert_eq!(record.title, "Lifestyle");

        assert!(matches!(
            provider.get(ResourceKind::Categories, "9").await,
            Err(ProviderError::NotFound { .. })
        ));
    }

    #[test]
    fn test_category_mutations_are_unsupported() {
        let provider = provider();

        let err = provider
            .create(ResourceKind::Categories, Map::new())
            .unwrap_err();
        assert!(matches!(
            err,
            ProviderError::Unsupported {
                operation: Operation::Create,
                ..
            }
        ));
        assert_eq!(err.to_string(), "create is not supported for categories");

        assert!(provider.update(ResourceKind::Categories, "1", Map::new()).is_err());
        assert!(provider.delete(ResourceKind::Categories, "1").is_err());
    }

    #[test]
    fn test_blog_post_mutations_echo() {
        let provider = provider();
        let mut fields = Map::new();
        fields.insert("title".to_string(), json!("Draft post"));

        let created = provider.create(ResourceKind::BlogPosts, fields.clone()).unwrap();
        assert!(created.id.parse::<i64>().unwrap() > 0);
        assert_eq!(
            serde_json::to_value(&created).unwrap()["title"],
            json!("Draft post")
        );

        let updated = provider.update(ResourceKind::BlogPosts, "42", fields).unwrap();
        assert_eq!(updated.id, "42");

        let deleted = provider.delete(ResourceKind::BlogPosts, "42").unwrap();
        assert_eq!(serde_json::to_value(&deleted).unwrap(), json!({ "id": "42" }));
    }

    #[test]
    fn test_record_flattens_content() {
        let item: ContentItem = serde_json::from_value(json!({
            "id": "c1",
            "title": "Hello",
            "body": "World",
            "status": "published",
            "createdAt": "2024-01-01T00:00:00Z",
            "updatedAt": "2024-01-01T00:00:00Z",
            "publishedAt": null,
            "authorId": "a1",
            "metadata": { "tags": ["x"], "category": "Technology" }
        }))
        .unwrap();

        let record = AdminRecord::from(item);
        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({
                "id": "c1",
                "title": "Hello",
                "content": "World",
                "category": "Technology",
                "status": "published",
                "createdAt": "2024-01-01T00:00:00Z"
            })
        );
    }
}
