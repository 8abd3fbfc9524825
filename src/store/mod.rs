use async_trait::async_trait;
use std::collections::BTreeMap;

use crate::error::SiteError;

#[cfg(test)]
pub(crate) mod memory;

/// Server-assigned creation timestamp field on every document.
pub(crate) const CREATED_AT: &str = "createdAt";

pub(crate) type Fields = BTreeMap<String, FieldValue>;

/// The scalar value types the app reads and writes.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum FieldValue {
    Null,
    Bool(bool),
    Integer(i64),
    Double(f64),
    String(String),
    /// RFC 3339, as the backend reports it.
    Timestamp(String),
}

impl FieldValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<&str> {
        match self {
            Self::Timestamp(t) => Some(t),
            _ => None,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Document {
    pub id: String,
    pub fields: Fields,
}

impl Document {
    pub fn string(&self, key: &str) -> Result<String, SiteError> {
        self.fields
            .get(key)
            .and_then(FieldValue::as_str)
            .map(str::to_string)
            .ok_or_else(|| self.malformed(format!("missing string field `{key}`")))
    }

    /// Missing booleans read as `false`.
    pub fn flag(&self, key: &str) -> Result<bool, SiteError> {
        match self.fields.get(key) {
            None | Some(FieldValue::Null) => Ok(false),
            Some(v) => v
                .as_bool()
                .ok_or_else(|| self.malformed(format!("field `{key}` is not a boolean"))),
        }
    }

    /// `None` while the server timestamp is still pending.
    pub fn created_at(&self) -> Option<String> {
        self.fields
            .get(CREATED_AT)
            .and_then(FieldValue::as_timestamp)
            .map(str::to_string)
    }

    fn malformed(&self, reason: String) -> SiteError {
        SiteError::Decode {
            id: self.id.clone(),
            reason,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Direction {
    Ascending,
    Descending,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct CollectionQuery {
    pub collection: &'static str,
    pub order_by: &'static str,
    pub direction: Direction,
}

impl CollectionQuery {
    pub fn newest_first(collection: &'static str) -> Self {
        Self {
            collection,
            order_by: CREATED_AT,
            direction: Direction::Descending,
        }
    }
}

/// A file picked in the browser, read fully into memory.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Attachment {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl Attachment {
    pub fn is_empty(&self) -> bool {
        self.file_name.trim().is_empty() || self.bytes.is_empty()
    }
}

/// Blob key for an uploaded image: `{collection}/{epoch-millis}_{original-filename}`.
pub(crate) fn blob_path(collection: &str, now_ms: i64, file_name: &str) -> String {
    format!("{collection}/{now_ms}_{file_name}")
}

/// Document side of the remote data service.
///
/// Futures are `?Send`: everything runs on the browser event loop.
#[async_trait(?Send)]
pub(crate) trait DocumentStore: Send + Sync {
    /// Full ordered result set of `query`.
    async fn query(&self, query: &CollectionQuery) -> Result<Vec<Document>, SiteError>;

    /// Writes a new document with a server-assigned `createdAt`; returns its id.
    async fn create(&self, collection: &str, fields: Fields) -> Result<String, SiteError>;

    async fn delete(&self, collection: &str, id: &str) -> Result<(), SiteError>;

    /// Partial update: only the given fields change.
    async fn update(&self, collection: &str, id: &str, fields: Fields) -> Result<(), SiteError>;
}

#[async_trait(?Send)]
pub(crate) trait BlobStore: Send + Sync {
    /// Stores `attachment` at `path` and returns a public download URL.
    async fn upload(&self, path: &str, attachment: &Attachment) -> Result<String, SiteError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(fields: &[(&str, FieldValue)]) -> Document {
        Document {
            id: "d1".to_string(),
            fields: fields
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        }
    }

    #[test]
    fn test_blob_path_layout() {
        assert_eq!(
            blob_path("books", 1_700_000_000_123, "cover.png"),
            "books/1700000000123_cover.png"
        );
    }

    #[test]
    fn test_document_string_reports_missing_field() {
        let d = doc(&[("title", "Sapiens".into())]);
        assert_eq!(d.string("title").as_deref(), Ok("Sapiens"));
        assert!(matches!(d.string("author"), Err(SiteError::Decode { .. })));
    }

    #[test]
    fn test_document_flag_defaults_to_false() {
        let d = doc(&[("reviewed", FieldValue::Null)]);
        assert_eq!(d.flag("reviewed"), Ok(false));
        assert_eq!(d.flag("missing"), Ok(false));

        let d = doc(&[("reviewed", "yes".into())]);
        assert!(d.flag("reviewed").is_err());
    }

    #[test]
    fn test_created_at_is_none_while_pending() {
        let d = doc(&[]);
        assert!(d.created_at().is_none());

        let d = doc(&[(CREATED_AT, FieldValue::Timestamp("2024-05-01T10:00:00Z".into()))]);
        assert_eq!(d.created_at().as_deref(), Some("2024-05-01T10:00:00Z"));
    }

    #[test]
    fn test_attachment_requires_name_and_bytes() {
        assert!(Attachment::default().is_empty());
        let a = Attachment {
            file_name: "cover.png".into(),
            content_type: "image/png".into(),
            bytes: vec![1, 2, 3],
        };
        assert!(!a.is_empty());
    }
}
