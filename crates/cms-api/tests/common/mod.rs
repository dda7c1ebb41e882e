pub use cms_api::test_helpers::{establish_test_connection, test_utils};

pub mod server_utils {
    use super::*;
    use axum_test::TestServer;
    use cms_api::{AppState, DefaultAppState, create_app, models::Content};
    use diesel::sqlite::SqliteConnection;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    pub fn create_test_server() -> (TestServer, Arc<Mutex<SqliteConnection>>) {
        create_seeded_server(&[])
    }

    pub fn create_seeded_server(items: &[Content]) -> (TestServer, Arc<Mutex<SqliteConnection>>) {
        let mut connection = establish_test_connection();
        for item in items {
            test_utils::insert_content(&mut connection, item);
        }
        let db = Arc::new(Mutex::new(connection));

        let state = DefaultAppState::with_sqlite(db.clone(), Duration::from_secs(5));
        (create_server_with(state, Duration::from_secs(15)), db)
    }

    pub fn create_server_with<S: AppState>(state: S, request_timeout: Duration) -> TestServer {
        TestServer::new(create_app(state, request_timeout)).unwrap()
    }
}
