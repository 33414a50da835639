use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::server::service::mail::{LogMailer, Mailer};

/// Base URL for verification links in state built without a `Config`, as tests do
pub const DEFAULT_APP_URL: &str = "http://localhost:8080";

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub mailer: Arc<dyn Mailer>,
    pub app_url: String,
}

/// Builds state around a database connection with the log-only mailer.
///
/// Used by tests through `TestSetup::state`; `main` builds the state from `Config`.
impl From<DatabaseConnection> for AppState {
    fn from(db: DatabaseConnection) -> Self {
        Self {
            db,
            mailer: Arc::new(LogMailer),
            app_url: DEFAULT_APP_URL.to_string(),
        }
    }
}
