//! Shared types for the API layer.

use std::sync::Arc;

use rusqlite::Connection;
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::core_state::{CoreError, CoreState};
use crate::db::DatabaseError;

/// Shared context for all API routes and middleware.
#[derive(Clone)]
pub struct ApiContext {
    pub core: Arc<CoreState>,
}

impl ApiContext {
    pub fn new(core: Arc<CoreState>) -> Self {
        Self { core }
    }

    /// Run a database operation on the blocking pool with a fresh connection.
    pub async fn with_db<T, F>(&self, op: F) -> Result<T, ApiError>
    where
        F: FnOnce(&Connection) -> Result<T, DatabaseError> + Send + 'static,
        T: Send + 'static,
    {
        let core = Arc::clone(&self.core);
        tokio::task::spawn_blocking(move || -> Result<T, ApiError> {
            let conn = core.open_db()?;
            Ok(op(&conn)?)
        })
        .await
        .map_err(|e| ApiError::from(CoreError::Task(e.to_string())))?
    }
}

/// Parse a path id, answering 400 on malformed input.
pub fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::BadRequest(format!("Invalid ID format: {raw}")))
}
