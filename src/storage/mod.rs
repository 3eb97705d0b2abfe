//! Document storage for drills and completions.
//!
//! Handlers only see [`DrillStore`]. The backend is picked once at startup
//! from the connection string and shared for the life of the process.

mod json_file;
mod memory;
#[cfg(feature = "mongodb")]
mod mongo;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;
#[cfg(feature = "mongodb")]
pub use mongo::MongoStore;

use crate::errors::StoreError;
use crate::models::{Completion, Drill};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use std::{path::PathBuf, sync::Arc};

#[async_trait]
pub trait DrillStore: Send + Sync {
    /// Short backend name for logs.
    fn backend(&self) -> &'static str;

    /// Drills whose `added` timestamp is at or before `date`, in insertion order.
    async fn drills_added_through(&self, date: NaiveDateTime) -> Result<Vec<Drill>, StoreError>;

    async fn insert_drill(&self, drill: &Drill) -> Result<(), StoreError>;

    /// Completions recorded for exactly `date`, duplicates included.
    async fn completions_on(&self, date: NaiveDateTime) -> Result<Vec<Completion>, StoreError>;

    async fn insert_completion(&self, completion: &Completion) -> Result<(), StoreError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreLocation {
    Memory,
    File(PathBuf),
    Mongo(String),
}

impl StoreLocation {
    pub fn parse(uri: &str) -> Result<Self, StoreError> {
        let uri = uri.trim();
        if uri == "memory:" || uri == "memory" {
            return Ok(Self::Memory);
        }
        if uri.starts_with("mongodb://") || uri.starts_with("mongodb+srv://") {
            return Ok(Self::Mongo(uri.to_string()));
        }
        if let Some(path) = uri.strip_prefix("file://").or_else(|| uri.strip_prefix("file:")) {
            if path.is_empty() {
                return Err(StoreError::UnsupportedUri(uri.to_string()));
            }
            return Ok(Self::File(PathBuf::from(path)));
        }
        if uri.is_empty() || uri.contains("://") {
            return Err(StoreError::UnsupportedUri(uri.to_string()));
        }
        Ok(Self::File(PathBuf::from(uri)))
    }
}

pub async fn connect(uri: &str) -> Result<Arc<dyn DrillStore>, StoreError> {
    match StoreLocation::parse(uri)? {
        StoreLocation::Memory => Ok(Arc::new(MemoryStore::default())),
        StoreLocation::File(path) => Ok(Arc::new(JsonFileStore::open(path).await?)),
        #[cfg(feature = "mongodb")]
        StoreLocation::Mongo(uri) => Ok(Arc::new(MongoStore::connect(&uri).await?)),
        #[cfg(not(feature = "mongodb"))]
        StoreLocation::Mongo(uri) => Err(StoreError::UnsupportedUri(format!(
            "{uri} (built without the `mongodb` feature)"
        ))),
    }
}
