use std::fmt;

use serde::Deserialize;

use crate::storage::constants::{
    ACCESS_TOKEN_ENV, API_KEY_ENV, BUCKET_ENV, DEFAULT_HOST, DEFAULT_PROTOCOL, DEFAULT_SECURE_TOKEN_ENDPOINT,
    EMULATOR_HOST_ENV, REFRESH_TOKEN_ENV, SECURE_TOKEN_ENDPOINT_ENV, STORAGE_HOST_ENV,
};

/// Configuration for a [`StorageClient`](crate::storage::StorageClient).
///
/// `storage_host` and `secure_token_endpoint` default to the production Google
/// endpoints and are only overridden for emulators or tests.
#[derive(Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct StorageOptions {
    pub bucket: String,
    pub access_token: String,
    pub refresh_token: String,
    pub api_key: String,
    pub storage_host: String,
    pub secure_token_endpoint: String,
}

impl Default for StorageOptions {
    fn default() -> Self {
        Self {
            bucket: String::new(),
            access_token: String::new(),
            refresh_token: String::new(),
            api_key: String::new(),
            storage_host: format!("{DEFAULT_PROTOCOL}://{DEFAULT_HOST}"),
            secure_token_endpoint: DEFAULT_SECURE_TOKEN_ENDPOINT.to_string(),
        }
    }
}

impl fmt::Debug for StorageOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StorageOptions")
            .field("bucket", &self.bucket)
            .field("access_token", &redacted(&self.access_token))
            .field("refresh_token", &redacted(&self.refresh_token))
            .field("api_key", &redacted(&self.api_key))
            .field("storage_host", &self.storage_host)
            .field("secure_token_endpoint", &self.secure_token_endpoint)
            .finish()
    }
}

fn redacted(secret: &str) -> &'static str {
    if secret.is_empty() {
        "<empty>"
    } else {
        "<redacted>"
    }
}

impl StorageOptions {
    pub fn new(
        bucket: impl Into<String>,
        access_token: impl Into<String>,
        refresh_token: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            bucket: bucket.into(),
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    /// Reads the `FIREBASE_*` environment variables; unset variables keep their defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut options = Self::default();
        if let Some(bucket) = lookup(BUCKET_ENV) {
            options.bucket = bucket;
        }
        if let Some(token) = lookup(ACCESS_TOKEN_ENV) {
            options.access_token = token;
        }
        if let Some(token) = lookup(REFRESH_TOKEN_ENV) {
            options.refresh_token = token;
        }
        if let Some(key) = lookup(API_KEY_ENV) {
            options.api_key = key;
        }
        if let Some(host) = lookup(STORAGE_HOST_ENV) {
            options.storage_host = host;
        }
        if let Some(emulator) = lookup(EMULATOR_HOST_ENV).filter(|host| !host.is_empty()) {
            options.storage_host = format!("http://{emulator}");
        }
        if let Some(endpoint) = lookup(SECURE_TOKEN_ENDPOINT_ENV) {
            options.secure_token_endpoint = endpoint;
        }
        options
    }

    pub fn with_storage_host(mut self, host: impl Into<String>) -> Self {
        self.storage_host = host.into();
        self
    }

    pub fn with_secure_token_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.secure_token_endpoint = endpoint.into();
        self
    }

    /// Points the storage endpoints at a local emulator (`http://host:port`).
    pub fn with_emulator(self, host: &str, port: u16) -> Self {
        self.with_storage_host(format!("http://{host}:{port}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_target_google_endpoints() {
        let options = StorageOptions::new("b", "t", "r", "k");
        assert_eq!(options.storage_host, "https://firebasestorage.googleapis.com");
        assert_eq!(options.secure_token_endpoint, "https://securetoken.googleapis.com/v1/token");
        assert_eq!(options.bucket, "b");
    }

    #[test]
    fn lookup_overrides_fields() {
        let vars: HashMap<&str, &str> = [
            ("FIREBASE_STORAGE_BUCKET", "env-bucket"),
            ("FIREBASE_ACCESS_TOKEN", "A"),
            ("FIREBASE_STORAGE_EMULATOR_HOST", "localhost:9199"),
            ("FIREBASE_SECURE_TOKEN_ENDPOINT", "http://localhost:9099/token"),
        ]
        .into_iter()
        .collect();

        let options = StorageOptions::from_lookup(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(options.bucket, "env-bucket");
        assert_eq!(options.access_token, "A");
        assert_eq!(options.refresh_token, "");
        assert_eq!(options.storage_host, "http://localhost:9199");
        assert_eq!(options.secure_token_endpoint, "http://localhost:9099/token");
    }

    #[test]
    fn deserializes_partial_config() {
        let options: StorageOptions = serde_json::from_str(r#"{"bucket":"b","api_key":"k"}"#).unwrap();
        assert_eq!(options.bucket, "b");
        assert_eq!(options.api_key, "k");
        assert_eq!(options.storage_host, "https://firebasestorage.googleapis.com");
    }

    #[test]
    fn debug_hides_credentials() {
        let rendered = format!("{:?}", StorageOptions::new("b", "secret-access", "", "k"));
        assert!(!rendered.contains("secret-access"));
        assert!(rendered.contains("refresh_token: \"<empty>\""));
    }

    #[test]
    fn emulator_uses_plain_http() {
        let options = StorageOptions::default().with_emulator("127.0.0.1", 9199);
        assert_eq!(options.storage_host, "http://127.0.0.1:9199");
    }
}
