use super::traits::{ContentPage, ContentRepository, StoreError};
use crate::models::{Content, ContentRow, ContentTagRow};
use crate::planner::{ContentFilter, SelectionPlan, SortOrder};
use crate::schema::{content_tags, contents};
use crate::validation::{SortDirection, SortField};
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sqlite::{Sqlite, SqliteConnection};
use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Mutex};

mod sql {
    use diesel::sql_types::{Integer, Text};

    diesel::define_sql_function!(fn lower(x: Text) -> Text);
    diesel::define_sql_function!(fn instr(haystack: Text, needle: Text) -> Integer);
}

type BoxedContents = contents::BoxedQuery<'static, Sqlite>;

#[derive(Clone)]
pub struct SqliteContentRepository {
    db: Arc<Mutex<SqliteConnection>>,
}

impl SqliteContentRepository {
    pub fn new(db: Arc<Mutex<SqliteConnection>>) -> Self {
        Self { db }
    }

    /// Runs diesel work on the blocking pool so callers can race it against
    /// a deadline. Waiting for the connection lock happens there too.
    async fn with_conn<T, F>(&self, work: F) -> Result<T, StoreError>
    where
        T: Send + 'static,
        F: FnOnce(&mut SqliteConnection) -> Result<T, StoreError> + Send + 'static,
    {
        let db = self.db.clone();
        tokio::task::spawn_blocking(move || {
            let mut conn = db
                .lock()
                .map_err(|_| StoreError::Connection("connection lock poisoned".to_string()))?;
            work(&mut conn)
        })
        .await
        .map_err(|err| StoreError::Database(format!("store task failed: {err}")))?
    }
}

fn filtered(filter: &ContentFilter) -> BoxedContents {
    let mut query = contents::table.into_boxed();

    if let Some(status) = filter.status {
        query = query.filter(contents::status.eq(status.as_str()));
    }

    if let Some(category) = &filter.category {
        query = query.filter(contents::category.eq(category.clone()));
    }

    for tag in &filter.tags {
        let tagged = content_tags::table
            .filter(content_tags::tag.eq(tag.clone()))
            .select(content_tags::content_id);
        query = query.filter(contents::id.eq_any(tagged));
    }

    // Same semantics as `ContentFilter::matches`: SQLite's lower() only
    // folds ASCII.
    if let Some(search) = &filter.search {
        let needle = search.to_ascii_lowercase();
        query = query.filter(
            sql::instr(sql::lower(contents::title), needle.clone())
                .gt(0)
                .or(sql::instr(sql::lower(contents::body), needle).gt(0)),
        );
    }

    query
}

fn ordered(query: BoxedContents, order: SortOrder) -> BoxedContents {
    use SortDirection::{Asc, Desc};
    use SortField::{CreatedAt, PublishedAt, Title, UpdatedAt};

    let query = match (order.field, order.direction) {
        (CreatedAt, Asc) => query.order_by(contents::created_at.asc()),
        (CreatedAt, Desc) => query.order_by(contents::created_at.desc()),
        (UpdatedAt, Asc) => query.order_by(contents::updated_at.asc()),
        (UpdatedAt, Desc) => query.order_by(contents::updated_at.desc()),
        (PublishedAt, Asc) => query.order_by(contents::published_at.asc()),
        (PublishedAt, Desc) => query.order_by(contents::published_at.desc()),
        (Title, Asc) => query.order_by(contents::title.asc()),
        (Title, Desc) => query.order_by(contents::title.desc()),
    };

    query.then_order_by(contents::id.asc())
}

fn load_tags(
    conn: &mut SqliteConnection,
    ids: &[String],
) -> QueryResult<HashMap<String, BTreeSet<String>>> {
    let rows = content_tags::table
        .filter(content_tags::content_id.eq_any(ids))
        .load::<ContentTagRow>(conn)?;

    let mut tags: HashMap<String, BTreeSet<String>> = HashMap::new();
    for row in rows {
        tags.entry(row.content_id).or_default().insert(row.tag);
    }
    Ok(tags)
}

fn hydrate(
    rows: Vec<ContentRow>,
    mut tags: HashMap<String, BTreeSet<String>>,
) -> Result<Vec<Content>, StoreError> {
    rows.into_iter()
        .map(|row| {
            let id = row.id.clone();
            let row_tags = tags.remove(&id).unwrap_or_default();
            row.into_content(row_tags)
                .ok_or_else(|| StoreError::Database(format!("content {id} has an unknown status")))
        })
        .collect()
}

#[async_trait]
impl ContentRepository for SqliteContentRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<Content>, StoreError> {
        let id = id.to_string();
        self.with_conn(move |conn| {
            let row = contents::table
                .find(id.as_str())
                .first::<ContentRow>(conn)
                .optional()?;

            let Some(row) = row else {
                return Ok(None);
            };

            let tags = load_tags(conn, std::slice::from_ref(&row.id))?;
            Ok(hydrate(vec![row], tags)?.pop())
        })
        .await
    }

    async fn list(&self, plan: &SelectionPlan) -> Result<ContentPage, StoreError> {
        let plan = plan.clone();
        let limit = i64::from(plan.window.limit);
        let offset = i64::try_from(plan.window.offset).unwrap_or(i64::MAX);

        self.with_conn(move |conn| {
            // Count and window read from one snapshot.
            let (total, rows, tags) = conn.transaction::<_, diesel::result::Error, _>(|conn| {
                let total = filtered(&plan.filter).count().get_result::<i64>(conn)?;
                let rows = ordered(filtered(&plan.filter), plan.order)
                    .limit(limit)
                    .offset(offset)
                    .load::<ContentRow>(conn)?;
                let ids: Vec<String> = rows.iter().map(|row| row.id.clone()).collect();
                let tags = load_tags(conn, &ids)?;
                Ok((total, rows, tags))
            })?;

            Ok(ContentPage {
                items: hydrate(rows, tags)?,
                total: u64::try_from(total).unwrap_or_default(),
            })
        })
        .await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.with_conn(|conn| {
            diesel::sql_query("SELECT 1")
                .execute(conn)
                .map_err(|err| StoreError::Connection(err.to_string()))?;
            Ok(())
        })
        .await
    }
}
