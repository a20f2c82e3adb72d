//! Persistence seam for uploaded files.
//!
//! The document adapter records every upload through [`MemoryStore::save`]
//! and treats the store as opaque. [`SessionMemory`] is the in-process
//! implementation: per-user history, bounded, most recent kept.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::types::FileKind;

/// One remembered upload.
#[derive(Debug, Clone)]
pub struct StoredFile {
    pub id: uuid::Uuid,
    pub name: String,
    pub kind: FileKind,
    /// Short human-readable summary, shown when memory is listed back.
    pub description: String,
    /// Extracted text, when the upload was a document.
    pub text: Option<String>,
    pub bytes: Bytes,
    pub uploaded_at: DateTime<Utc>,
}

impl StoredFile {
    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

#[async_trait]
pub trait MemoryStore: Send + Sync {
    async fn save(&self, user_id: i64, record: StoredFile);
    async fn recall(&self, user_id: i64) -> Vec<StoredFile>;
}

#[derive(Clone)]
pub struct SessionMemory {
    inner: Arc<RwLock<HashMap<i64, Vec<StoredFile>>>>,
    capacity: usize,
}

impl SessionMemory {
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
            capacity,
        }
    }
}

impl Default for SessionMemory {
    fn default() -> Self {
        Self::new(10)
    }
}

#[async_trait]
impl MemoryStore for SessionMemory {
    async fn save(&self, user_id: i64, record: StoredFile) {
        let mut guard = self.inner.write().await;
        let files = guard.entry(user_id).or_default();
        files.push(record);
        if files.len() > self.capacity {
            let excess = files.len() - self.capacity;
            files.drain(..excess);
        }
    }

    async fn recall(&self, user_id: i64) -> Vec<StoredFile> {
        let guard = self.inner.read().await;
        guard.get(&user_id).cloned().unwrap_or_default()
    }
}
