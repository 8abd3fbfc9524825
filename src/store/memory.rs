//! In-memory stand-ins for the remote data service, used by unit tests.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use super::{
    Attachment, BlobStore, CollectionQuery, Direction, Document, DocumentStore, FieldValue,
    Fields, CREATED_AT,
};
use crate::error::SiteError;

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum StoreCall {
    Query(String),
    Create(String, Fields),
    Delete(String, String),
    Update(String, String, Fields),
}

#[derive(Default)]
struct Inner {
    seq: u64,
    // collection -> documents in insertion order
    collections: BTreeMap<String, Vec<Document>>,
    calls: Vec<StoreCall>,
    write_failure: Option<SiteError>,
    query_failure: Option<SiteError>,
}

#[derive(Clone, Default)]
pub(crate) struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|p| p.into_inner())
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<StoreCall> {
        lock(&self.inner).calls.clone()
    }

    pub fn writes(&self) -> Vec<StoreCall> {
        self.calls()
            .into_iter()
            .filter(|c| !matches!(c, StoreCall::Query(_)))
            .collect()
    }

    pub fn query_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, StoreCall::Query(_)))
            .count()
    }

    pub fn fail_writes_with(&self, err: Option<SiteError>) {
        lock(&self.inner).write_failure = err;
    }

    pub fn fail_queries_with(&self, err: Option<SiteError>) {
        lock(&self.inner).query_failure = err;
    }

    /// Seeds a document directly, bypassing call recording.
    pub fn insert(&self, collection: &str, id: &str, mut fields: Fields) {
        let mut inner = lock(&self.inner);
        inner.seq += 1;
        fields
            .entry(CREATED_AT.to_string())
            .or_insert_with(|| FieldValue::Timestamp(timestamp(inner.seq)));
        inner
            .collections
            .entry(collection.to_string())
            .or_default()
            .push(Document {
                id: id.to_string(),
                fields,
            });
    }

    pub fn remove(&self, collection: &str, id: &str) {
        if let Some(docs) = lock(&self.inner).collections.get_mut(collection) {
            docs.retain(|d| d.id != id);
        }
    }

    pub fn get(&self, collection: &str, id: &str) -> Option<Document> {
        lock(&self.inner)
            .collections
            .get(collection)
            .and_then(|docs| docs.iter().find(|d| d.id == id).cloned())
    }
}

// Zero-padded so lexical order matches creation order.
fn timestamp(seq: u64) -> String {
    format!("2024-01-01T00:00:00.{seq:09}Z")
}

#[async_trait(?Send)]
impl DocumentStore for MemoryStore {
    async fn query(&self, query: &CollectionQuery) -> Result<Vec<Document>, SiteError> {
        let mut inner = lock(&self.inner);
        inner
            .calls
            .push(StoreCall::Query(query.collection.to_string()));
        if let Some(err) = inner.query_failure.clone() {
            return Err(err);
        }

        let mut docs = inner
            .collections
            .get(query.collection)
            .cloned()
            .unwrap_or_default();
        let key = |d: &Document| {
            d.fields
                .get(query.order_by)
                .and_then(FieldValue::as_timestamp)
                .unwrap_or_default()
                .to_string()
        };
        docs.sort_by_key(key);
        if query.direction == Direction::Descending {
            docs.reverse();
        }
        Ok(docs)
    }

    async fn create(&self, collection: &str, fields: Fields) -> Result<String, SiteError> {
        let id = {
            let mut inner = lock(&self.inner);
            inner
                .calls
                .push(StoreCall::Create(collection.to_string(), fields.clone()));
            if let Some(err) = inner.write_failure.clone() {
                return Err(err);
            }
            format!("doc-{}", inner.seq + 1)
        };
        self.insert(collection, &id, fields);
        Ok(id)
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), SiteError> {
        {
            let mut inner = lock(&self.inner);
            inner
                .calls
                .push(StoreCall::Delete(collection.to_string(), id.to_string()));
            if let Some(err) = inner.write_failure.clone() {
                return Err(err);
            }
        }
        self.remove(collection, id);
        Ok(())
    }

    async fn update(&self, collection: &str, id: &str, fields: Fields) -> Result<(), SiteError> {
        let mut inner = lock(&self.inner);
        inner.calls.push(StoreCall::Update(
            collection.to_string(),
            id.to_string(),
            fields.clone(),
        ));
        if let Some(err) = inner.write_failure.clone() {
            return Err(err);
        }
        let doc = inner
            .collections
            .get_mut(collection)
            .and_then(|docs| docs.iter_mut().find(|d| d.id == id))
            .ok_or_else(|| SiteError::Write(format!("No document to update: {id}")))?;
        doc.fields.extend(fields);
        Ok(())
    }
}

#[derive(Default)]
struct BlobInner {
    uploads: Vec<(String, Attachment)>,
    failure: Option<SiteError>,
}

#[derive(Clone, Default)]
pub(crate) struct MemoryBlobs {
    inner: Arc<Mutex<BlobInner>>,
}

impl MemoryBlobs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_with(&self, err: Option<SiteError>) {
        lock(&self.inner).failure = err;
    }

    pub fn upload_paths(&self) -> Vec<String> {
        lock(&self.inner)
            .uploads
            .iter()
            .map(|(p, _)| p.clone())
            .collect()
    }
}

#[async_trait(?Send)]
impl BlobStore for MemoryBlobs {
    async fn upload(&self, path: &str, attachment: &Attachment) -> Result<String, SiteError> {
        let mut inner = lock(&self.inner);
        if let Some(err) = inner.failure.clone() {
            return Err(err);
        }
        inner
            .uploads
            .push((path.to_string(), attachment.clone()));
        Ok(format!("https://blobs.test/{path}"))
    }
}
