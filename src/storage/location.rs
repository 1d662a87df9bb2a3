use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use url::form_urlencoded;

/// Characters escaped in the `name` query parameter. Slashes stay literal so
/// the parameter reads as the object path.
const NAME_QUERY: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'+')
    .add(b'<')
    .add(b'>')
    .add(b'=');

/// An object inside a bucket, as addressed by the storage REST endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    bucket: String,
    path: String,
}

impl Location {
    pub fn new(bucket: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            path: path.into(),
        }
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Endpoint used both to read metadata (GET) and to upload (PUT).
    pub fn metadata_url(&self, host: &str) -> String {
        format!(
            "{}/v0/b/{}/o?name={}",
            host.trim_end_matches('/'),
            self.bucket,
            utf8_percent_encode(&self.path, NAME_QUERY)
        )
    }

    pub fn media_url(&self, host: &str, download_token: &str) -> String {
        format!(
            "{}/v0/b/{}/o/{}?alt=media&token={}",
            host.trim_end_matches('/'),
            self.bucket,
            query_escape(&self.path),
            query_escape(download_token)
        )
    }
}

/// Query-component escaping: `/` becomes `%2F` and spaces become `+`.
pub fn query_escape(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes()).collect()
}
