use diesel::sqlite::SqliteConnection;

use crate::db::establish_connection;

pub fn establish_test_connection() -> SqliteConnection {
    establish_connection(":memory:").expect("Failed to create in-memory database")
}

pub mod test_utils {
    use super::*;
    use crate::models::{Content, ContentMetadata, ContentRow, ContentStatus};
    use crate::schema::{content_tags, contents};
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use diesel::prelude::*;

    /// Fixed reference instant so fixtures sort deterministically.
    pub fn base_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    /// Published item `content-NNN` created `n` hours after [`base_time`].
    pub fn sample_content(n: i64) -> Content {
        let created = base_time() + Duration::hours(n);
        Content {
            id: format!("content-{n:03}"),
            title: format!("Sample {n}"),
            body: format!("Body of sample {n}"),
            status: ContentStatus::Published,
            created_at: created,
            updated_at: created,
            published_at: Some(created),
            author_id: "author-1".to_string(),
            metadata: ContentMetadata::default(),
        }
    }

    pub fn insert_content(conn: &mut SqliteConnection, content: &Content) {
        diesel::insert_into(contents::table)
            .values(ContentRow::from(content))
            .execute(conn)
            .expect("Failed to insert content");

        let tags = content.tag_rows();
        if !tags.is_empty() {
            diesel::insert_into(content_tags::table)
                .values(tags)
                .execute(conn)
                .expect("Failed to insert content tags");
        }
    }

    pub fn count_contents(conn: &mut SqliteConnection) -> i64 {
        contents::table
            .count()
            .get_result(conn)
            .expect("Failed to count contents")
    }
}
