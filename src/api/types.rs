//! Shared types for the API layer.

use std::path::PathBuf;
use std::sync::Arc;

use rusqlite::Connection;

use crate::db::{self, DatabaseError};

/// Shared context for all API routes.
///
/// Each request opens its own connection against the migrated database —
/// there is no cross-request session state; the connection handle is passed
/// explicitly into every domain call.
#[derive(Clone)]
pub struct ApiContext {
    db_path: Arc<PathBuf>,
}

impl ApiContext {
    pub fn new(db_path: PathBuf) -> Self {
        Self {
            db_path: Arc::new(db_path),
        }
    }

    /// Open a connection for the current request.
    pub fn open_db(&self) -> Result<Connection, DatabaseError> {
        db::connect(&self.db_path)
    }
}
