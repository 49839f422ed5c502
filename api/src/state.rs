use std::sync::Arc;

use db::DatabaseConnection;

use crate::services::notifier::OtpNotifier;

/// Shared application state handed to every route and guard.
///
/// Holds the database handle and the notification sink. Both are injected at
/// construction so tests can swap in an in-memory database and a recording
/// notifier.
#[derive(Clone)]
pub struct AppState {
    db: DatabaseConnection,
    notifier: Arc<dyn OtpNotifier>,
}

impl AppState {
    pub fn new(db: DatabaseConnection, notifier: Arc<dyn OtpNotifier>) -> Self {
        Self { db, notifier }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    pub fn notifier(&self) -> &dyn OtpNotifier {
        self.notifier.as_ref()
    }
}
