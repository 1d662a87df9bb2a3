use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::storage::error::{decode_error, missing_download_token, StorageResult};

/// Object metadata as returned by Firebase Storage.
///
/// The response body is kept verbatim; the accessors give typed, optional
/// views over the fields most callers need. Absent fields and fields of an
/// unexpected JSON type both read as `None`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ObjectMetadata {
    raw: Map<String, Value>,
}

impl ObjectMetadata {
    pub fn from_map(raw: Map<String, Value>) -> Self {
        Self { raw }
    }

    /// Accepts only JSON objects.
    pub fn from_value(value: Value) -> StorageResult<Self> {
        match value {
            Value::Object(raw) => Ok(Self { raw }),
            other => Err(decode_error(format!(
                "expected a JSON object in storage response, found {}",
                json_type_name(&other)
            ))),
        }
    }

    pub fn from_slice(body: &[u8]) -> StorageResult<Self> {
        let value: Value = serde_json::from_slice(body)
            .map_err(|err| decode_error(format!("failed to parse storage response: {err}")))?;
        Self::from_value(value)
    }

    pub fn raw(&self) -> &Map<String, Value> {
        &self.raw
    }

    pub fn into_raw(self) -> Map<String, Value> {
        self.raw
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.raw.get(key)
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.raw.get(key).and_then(Value::as_str)
    }

    pub fn name(&self) -> Option<&str> {
        self.str_field("name")
    }

    pub fn bucket(&self) -> Option<&str> {
        self.str_field("bucket")
    }

    pub fn generation(&self) -> Option<&str> {
        self.str_field("generation")
    }

    pub fn metageneration(&self) -> Option<&str> {
        self.str_field("metageneration")
    }

    pub fn content_type(&self) -> Option<&str> {
        self.str_field("contentType")
    }

    pub fn time_created(&self) -> Option<&str> {
        self.str_field("timeCreated")
    }

    pub fn updated(&self) -> Option<&str> {
        self.str_field("updated")
    }

    pub fn md5_hash(&self) -> Option<&str> {
        self.str_field("md5Hash")
    }

    /// Object size in bytes. The REST API encodes it as a decimal string,
    /// emulators sometimes as a number.
    pub fn size(&self) -> Option<u64> {
        match self.raw.get("size")? {
            Value::String(s) => s.parse().ok(),
            Value::Number(n) => n.as_u64(),
            _ => None,
        }
    }

    pub fn custom_metadata(&self) -> Option<BTreeMap<String, String>> {
        let entries = self.raw.get("metadata")?.as_object()?;
        Some(
            entries
                .iter()
                .filter_map(|(key, value)| value.as_str().map(|v| (key.clone(), v.to_owned())))
                .collect(),
        )
    }

    /// The raw `downloadTokens` value, which may list several tokens separated by commas.
    pub fn download_tokens(&self) -> Option<&str> {
        self.str_field("downloadTokens")
    }

    /// First usable download token for `path`.
    ///
    /// # Errors
    ///
    /// `storage/missing-download-token` when `downloadTokens` is absent, not a
    /// string, or holds no non-empty token.
    pub fn download_token(&self, path: &str) -> StorageResult<&str> {
        self.download_tokens()
            .and_then(|tokens| tokens.split(',').find(|segment| !segment.is_empty()))
            .ok_or_else(|| missing_download_token(path))
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::error::StorageErrorCode;
    use serde_json::json;

    fn metadata(value: Value) -> ObjectMetadata {
        ObjectMetadata::from_value(value).unwrap()
    }

    #[test]
    fn exposes_well_known_fields() {
        let meta = metadata(json!({
            "name": "images/cat.png",
            "bucket": "mybucket",
            "contentType": "image/png",
            "size": "5",
            "metadata": {"owner": "ana", "count": 3},
            "downloadTokens": "xyz"
        }));

        assert_eq!(meta.name(), Some("images/cat.png"));
        assert_eq!(meta.bucket(), Some("mybucket"));
        assert_eq!(meta.content_type(), Some("image/png"));
        assert_eq!(meta.size(), Some(5));
        let custom = meta.custom_metadata().unwrap();
        assert_eq!(custom.get("owner").map(String::as_str), Some("ana"));
        assert!(!custom.contains_key("count"));
        assert_eq!(meta.download_token("images/cat.png").unwrap(), "xyz");
    }

    #[test]
    fn numeric_size_is_accepted() {
        assert_eq!(metadata(json!({"size": 42})).size(), Some(42));
        assert_eq!(metadata(json!({"size": true})).size(), None);
    }

    #[test]
    fn first_non_empty_download_token_wins() {
        let meta = metadata(json!({"downloadTokens": ",first,second"}));
        assert_eq!(meta.download_token("p").unwrap(), "first");
    }

    #[test]
    fn download_token_missing_or_mistyped() {
        for value in [json!({}), json!({"downloadTokens": 7}), json!({"downloadTokens": ""})] {
            let err = metadata(value).download_token("p").unwrap_err();
            assert_eq!(err.code, StorageErrorCode::MissingDownloadToken);
        }
    }

    #[test]
    fn rejects_non_object_bodies() {
        let err = ObjectMetadata::from_slice(b"[1,2]").unwrap_err();
        assert_eq!(err.code, StorageErrorCode::Decode);

        let err = ObjectMetadata::from_slice(b"<html>").unwrap_err();
        assert_eq!(err.code, StorageErrorCode::Decode);
    }
}
