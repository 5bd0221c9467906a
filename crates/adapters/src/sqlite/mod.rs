mod queries;

use std::fs;
use std::path::PathBuf;

use labelset_application::{ApplicationError, MetadataStore};
use rusqlite::Connection;
use serde_json::Value;

use crate::migrations::MIGRATIONS;

/// Document store kept in a local SQLite file, one JSON body per
/// `(collection, id)`.
#[derive(Debug, Clone)]
pub struct SqliteMetadataStore {
    path: PathBuf,
}

impl SqliteMetadataStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn open_connection(&self) -> Result<Connection, ApplicationError> {
        Connection::open(&self.path)
            .map_err(|error| ApplicationError::Persistence(error.to_string()))
    }

    pub fn initialize(&self) -> Result<(), ApplicationError> {
        if self.path.as_os_str().is_empty() {
            return Err(ApplicationError::InvalidInput(
                "catalog path must not be empty".to_string(),
            ));
        }

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .map_err(|error| ApplicationError::Io(error.to_string()))?;
            }
        }

        let conn = self.open_connection()?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")
            .map_err(|error| ApplicationError::Persistence(error.to_string()))?;

        for migration in MIGRATIONS {
            conn.execute_batch(migration)
                .map_err(|error| ApplicationError::Persistence(error.to_string()))?;
        }

        Ok(())
    }
}

impl MetadataStore for SqliteMetadataStore {
    fn get_document(&self, collection: &str, id: &str) -> Result<Option<Value>, ApplicationError> {
        let conn = self.open_connection()?;
        let body = queries::find_document(&conn, collection, id)
            .map_err(|error| ApplicationError::Persistence(error.to_string()))?;
        body.map(|json| {
            serde_json::from_str(&json).map_err(|error| ApplicationError::Decode(error.to_string()))
        })
        .transpose()
    }

    fn put_document(
        &self,
        collection: &str,
        id: &str,
        document: &Value,
    ) -> Result<(), ApplicationError> {
        let body_json = serde_json::to_string(document)
            .map_err(|error| ApplicationError::Persistence(error.to_string()))?;
        let conn = self.open_connection()?;
        queries::upsert_document(&conn, collection, id, &body_json)
            .map_err(|error| ApplicationError::Persistence(error.to_string()))
    }

    fn count_documents(&self, collection: &str) -> Result<usize, ApplicationError> {
        let conn = self.open_connection()?;
        let count = queries::count_documents(&conn, collection)
            .map_err(|error| ApplicationError::Persistence(error.to_string()))?;
        usize::try_from(count).map_err(|error| ApplicationError::Persistence(error.to_string()))
    }
}
