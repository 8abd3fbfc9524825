//! Document database REST surface: typed-value codec, request bodies and the
//! `DocumentStore` implementation.

use async_trait::async_trait;
use serde_json::{json, Map, Value};

use super::{ApiClient, ApiError, ApiResult};
use crate::error::SiteError;
use crate::store::{CollectionQuery, Direction, Document, DocumentStore, FieldValue, Fields, CREATED_AT};

const AUTO_ID_LEN: usize = 20;
const AUTO_ID_ALPHABET: &[u8; 62] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// 20 alphanumeric characters from the browser CSPRNG.
pub(crate) fn auto_id() -> ApiResult<String> {
    // Largest multiple of 62 below 256; higher bytes would bias the pick.
    const LIMIT: u8 = 248;
    let mut out = String::with_capacity(AUTO_ID_LEN);
    let mut buf = [0u8; 32];
    while out.len() < AUTO_ID_LEN {
        getrandom::getrandom(&mut buf)
            .map_err(|e| ApiError::parse(format!("could not generate document id: {e}")))?;
        for b in buf {
            if b < LIMIT && out.len() < AUTO_ID_LEN {
                out.push(AUTO_ID_ALPHABET[(b % 62) as usize] as char);
            }
        }
    }
    Ok(out)
}

pub(crate) fn encode_value(value: &FieldValue) -> Value {
    match value {
        FieldValue::Null => json!({ "nullValue": null }),
        FieldValue::Bool(b) => json!({ "booleanValue": b }),
        // The wire format carries 64-bit integers as strings.
        FieldValue::Integer(i) => json!({ "integerValue": i.to_string() }),
        FieldValue::Double(d) => json!({ "doubleValue": d }),
        FieldValue::String(s) => json!({ "stringValue": s }),
        FieldValue::Timestamp(t) => json!({ "timestampValue": t }),
    }
}

/// Value kinds the app never writes (maps, arrays, references, ...) decode as `Null`.
pub(crate) fn decode_value(value: &Value) -> FieldValue {
    let Some(obj) = value.as_object() else {
        return FieldValue::Null;
    };
    if let Some(b) = obj.get("booleanValue").and_then(Value::as_bool) {
        return FieldValue::Bool(b);
    }
    if let Some(i) = obj.get("integerValue") {
        let parsed = match i {
            Value::String(s) => s.parse().ok(),
            other => other.as_i64(),
        };
        if let Some(i) = parsed {
            return FieldValue::Integer(i);
        }
    }
    if let Some(d) = obj.get("doubleValue").and_then(Value::as_f64) {
        return FieldValue::Double(d);
    }
    if let Some(s) = obj.get("stringValue").and_then(Value::as_str) {
        return FieldValue::String(s.to_string());
    }
    if let Some(t) = obj.get("timestampValue").and_then(Value::as_str) {
        return FieldValue::Timestamp(t.to_string());
    }
    FieldValue::Null
}

pub(crate) fn encode_fields(fields: &Fields) -> Value {
    let map: Map<String, Value> = fields
        .iter()
        .map(|(k, v)| (k.clone(), encode_value(v)))
        .collect();
    Value::Object(map)
}

/// Reads one `Document` resource; the id is the last segment of its `name`.
pub(crate) fn decode_document(resource: &Value) -> ApiResult<Document> {
    let name = resource
        .get("name")
        .and_then(Value::as_str)
        .ok_or_else(|| ApiError::parse("document without a name"))?;
    let id = name
        .rsplit('/')
        .next()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::parse(format!("malformed document name `{name}`")))?;

    let fields: Fields = resource
        .get("fields")
        .and_then(Value::as_object)
        .map(|m| {
            m.iter()
                .map(|(k, v)| (k.clone(), decode_value(v)))
                .collect()
        })
        .unwrap_or_default();

    Ok(Document {
        id: id.to_string(),
        fields,
    })
}

/// `runQuery` streams one element per hit; an empty result is a single
/// element carrying only `readTime`.
pub(crate) fn parse_run_query_response(data: Value) -> ApiResult<Vec<Document>> {
    let items = data
        .as_array()
        .ok_or_else(|| ApiError::parse("runQuery response is not an array"))?;

    items
        .iter()
        .filter_map(|item| item.get("document"))
        .map(decode_document)
        .collect()
}

pub(crate) fn structured_query(query: &CollectionQuery) -> Value {
    let direction = match query.direction {
        Direction::Ascending => "ASCENDING",
        Direction::Descending => "DESCENDING",
    };
    json!({
        "structuredQuery": {
            "from": [{ "collectionId": query.collection }],
            "orderBy": [{
                "field": { "fieldPath": query.order_by },
                "direction": direction,
            }],
        }
    })
}

/// A single create-only write with `createdAt` stamped by the server.
pub(crate) fn create_commit(document_name: &str, fields: &Fields) -> Value {
    json!({
        "writes": [{
            "update": {
                "name": document_name,
                "fields": encode_fields(fields),
            },
            "currentDocument": { "exists": false },
            "updateTransforms": [{
                "fieldPath": CREATED_AT,
                "setToServerValue": "REQUEST_TIME",
            }],
        }]
    })
}

impl ApiClient {
    fn document_url(&self, collection: &str, id: &str) -> String {
        format!(
            "{}/{}/{}",
            self.config.firestore_base(),
            urlencoding::encode(collection),
            urlencoding::encode(id)
        )
    }

    pub(crate) async fn run_query(&self, query: &CollectionQuery) -> ApiResult<Vec<Document>> {
        let url = format!("{}:runQuery", self.config.firestore_base());
        let req = reqwest::Client::new()
            .post(url)
            .query(&[("key", self.config.api_key.as_str())])
            .json(&structured_query(query));
        let data: Value = self.send_json(req).await?;
        parse_run_query_response(data)
    }

    pub(crate) async fn commit_create(&self, collection: &str, fields: &Fields) -> ApiResult<String> {
        let id = auto_id()?;
        let name = format!("{}/{collection}/{id}", self.config.documents_root());
        let url = format!("{}:commit", self.config.firestore_base());
        let req = reqwest::Client::new()
            .post(url)
            .query(&[("key", self.config.api_key.as_str())])
            .json(&create_commit(&name, fields));
        let _: Value = self.send_json(req).await?;
        Ok(id)
    }

    pub(crate) async fn delete_document(&self, collection: &str, id: &str) -> ApiResult<()> {
        let req = reqwest::Client::new()
            .delete(self.document_url(collection, id))
            .query(&[("key", self.config.api_key.as_str())]);
        self.send(req).await?;
        Ok(())
    }

    /// Partial update of exactly the given fields on an existing document.
    pub(crate) async fn patch_document(
        &self,
        collection: &str,
        id: &str,
        fields: &Fields,
    ) -> ApiResult<()> {
        let mut params: Vec<(&str, &str)> = fields
            .keys()
            .map(|k| ("updateMask.fieldPaths", k.as_str()))
            .collect();
        params.push(("currentDocument.exists", "true"));
        params.push(("key", self.config.api_key.as_str()));

        let req = reqwest::Client::new()
            .patch(self.document_url(collection, id))
            .query(&params)
            .json(&json!({ "fields": encode_fields(fields) }));
        self.send(req).await?;
        Ok(())
    }
}

#[async_trait(?Send)]
impl DocumentStore for ApiClient {
    async fn query(&self, query: &CollectionQuery) -> Result<Vec<Document>, SiteError> {
        self.run_query(query).await.map_err(SiteError::subscription)
    }

    async fn create(&self, collection: &str, fields: Fields) -> Result<String, SiteError> {
        self.commit_create(collection, &fields)
            .await
            .map_err(SiteError::write)
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), SiteError> {
        self.delete_document(collection, id)
            .await
            .map_err(SiteError::write)
    }

    async fn update(&self, collection: &str, id: &str, fields: Fields) -> Result<(), SiteError> {
        self.patch_document(collection, id, &fields)
            .await
            .map_err(SiteError::write)
    }
}
