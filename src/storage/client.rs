use std::path::Path;

use tokio::fs::File;
use tokio::io::AsyncWriteExt;

use crate::storage::constants::AUTH_SCHEME;
use crate::storage::error::{invalid_argument, io_error, network_error, StorageError, StorageResult};
use crate::storage::location::Location;
use crate::storage::metadata::ObjectMetadata;
use crate::storage::options::StorageOptions;
use crate::storage::request::{
    download_media_request, get_metadata_request, refresh_token_request, upload_file_request, HttpClient,
    RequestInfo, StreamingResponse,
};

/// Client for one Firebase Storage bucket.
///
/// The client owns its credentials. [`refresh_tokens`](Self::refresh_tokens)
/// takes `&mut self` and rewrites them in place; every other operation only
/// reads them. No locking happens internally, so a client shared between
/// tasks that also refresh must be wrapped by the caller (for example in a
/// `tokio::sync::RwLock`). Requests carry no timeout and are never retried.
#[derive(Clone, Debug)]
pub struct StorageClient {
    options: StorageOptions,
    http: HttpClient,
}

impl StorageClient {
    pub fn new(
        bucket: impl Into<String>,
        access_token: impl Into<String>,
        refresh_token: impl Into<String>,
        api_key: impl Into<String>,
    ) -> StorageResult<Self> {
        Self::with_options(StorageOptions::new(bucket, access_token, refresh_token, api_key))
    }

    /// # Errors
    ///
    /// `storage/invalid-argument` when `storage_host` or `secure_token_endpoint`
    /// is not an absolute URL.
    pub fn with_options(options: StorageOptions) -> StorageResult<Self> {
        Self::with_http_client(options, HttpClient::new()?)
    }

    pub fn with_http_client(options: StorageOptions, http: HttpClient) -> StorageResult<Self> {
        ensure_absolute_url("storage_host", &options.storage_host)?;
        ensure_absolute_url("secure_token_endpoint", &options.secure_token_endpoint)?;
        Ok(Self { options, http })
    }

    pub fn options(&self) -> &StorageOptions {
        &self.options
    }

    pub fn bucket(&self) -> &str {
        &self.options.bucket
    }

    pub fn access_token(&self) -> &str {
        &self.options.access_token
    }

    pub fn refresh_token(&self) -> &str {
        &self.options.refresh_token
    }

    pub fn api_key(&self) -> &str {
        &self.options.api_key
    }

    pub fn set_access_token(&mut self, token: impl Into<String>) {
        self.options.access_token = token.into();
    }

    pub fn set_refresh_token(&mut self, token: impl Into<String>) {
        self.options.refresh_token = token.into();
    }

    fn location(&self, path: &str) -> Location {
        Location::new(self.options.bucket.clone(), path)
    }

    /// Retrieves the metadata of the object at `path`.
    pub async fn object_metadata(&self, path: &str) -> StorageResult<ObjectMetadata> {
        let request = get_metadata_request(&self.options.storage_host, &self.location(path));
        self.run_request(request).await
    }

    /// Downloads the object at `path` into `destination`, creating or truncating it.
    ///
    /// The destination is created before the media request is sent. When the
    /// transfer fails midway the partially written file is left in place.
    ///
    /// # Errors
    ///
    /// Returns `storage/missing-download-token` when the object metadata has no
    /// string `downloadTokens` field, `storage/io` for local file failures and
    /// `storage/network` when the body stream breaks.
    pub async fn download_to_file(&self, path: &str, destination: impl AsRef<Path>) -> StorageResult<()> {
        let destination = destination.as_ref();
        let metadata = self.object_metadata(path).await?;
        let token = metadata.download_token(path)?;

        let mut file = File::create(destination)
            .await
            .map_err(|err| io_error(format!("failed to create '{}': {err}", destination.display())))?;

        let mut response = self.read_stream(path, token).await?;
        let written = tokio::io::copy(&mut response.reader, &mut file)
            .await
            .map_err(|err| map_copy_error(err, destination))?;
        file.flush()
            .await
            .map_err(|err| io_error(format!("failed to flush '{}': {err}", destination.display())))?;

        log::debug!("downloaded {written} bytes of '{path}' to '{}'", destination.display());
        Ok(())
    }

    /// Opens the object's media as a live stream.
    ///
    /// The request carries no `Authorization` header; `download_token` alone
    /// grants access. Nothing is buffered. Dropping the returned reader closes
    /// the connection.
    ///
    /// ```rust,ignore
    /// let metadata = client.object_metadata("images/cat.png").await?;
    /// let token = metadata.download_token("images/cat.png")?;
    /// let mut response = client.read_stream("images/cat.png", token).await?;
    /// let mut file = tokio::fs::File::create("cat.png").await?;
    /// tokio::io::copy(&mut response.reader, &mut file).await?;
    /// ```
    pub async fn read_stream(&self, path: &str, download_token: &str) -> StorageResult<StreamingResponse> {
        let request = download_media_request(&self.options.storage_host, &self.location(path), download_token);
        self.http.execute_streaming(request).await
    }

    /// Uploads `local_path` to `remote_path`, replacing any existing object.
    pub async fn upload_from_file(
        &self,
        local_path: impl AsRef<Path>,
        remote_path: &str,
    ) -> StorageResult<ObjectMetadata> {
        let local_path = local_path.as_ref();
        let file = File::open(local_path)
            .await
            .map_err(|err| io_error(format!("failed to open '{}': {err}", local_path.display())))?;

        let request = upload_file_request(&self.options.storage_host, &self.location(remote_path), file);
        self.run_request(request).await
    }

    /// Exchanges the refresh token for a new access token.
    ///
    /// Each returned token replaces the stored one only when it is non-empty.
    /// On any error both stored tokens are left untouched.
    pub async fn refresh_tokens(&mut self) -> StorageResult<()> {
        let request = refresh_token_request(
            &self.options.secure_token_endpoint,
            &self.options.api_key,
            &self.options.refresh_token,
        )?;
        let response = self.http.execute(request).await?;

        if let Some(token) = response.access_token() {
            self.options.access_token = token.to_owned();
        }
        if let Some(token) = response.refresh_token() {
            self.options.refresh_token = token.to_owned();
        }

        log::debug!(
            "token refresh completed (access token {}, refresh token {})",
            if response.access_token().is_some() { "updated" } else { "kept" },
            if response.refresh_token().is_some() { "updated" } else { "kept" },
        );
        Ok(())
    }

    async fn run_request<O>(&self, info: RequestInfo<O>) -> StorageResult<O> {
        let info = self.prepare_request(info);
        self.http.execute(info).await
    }

    fn prepare_request<O>(&self, mut info: RequestInfo<O>) -> RequestInfo<O> {
        if info.authenticated {
            info.headers.insert(
                "Authorization".to_string(),
                format!("{AUTH_SCHEME} {}", self.options.access_token),
            );
        }
        info
    }
}

fn ensure_absolute_url(field: &str, value: &str) -> StorageResult<()> {
    let url = reqwest::Url::parse(value)
        .map_err(|err| invalid_argument(format!("{field} '{value}' is not a valid URL: {err}")))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(invalid_argument(format!(
            "{field} '{value}' must use http or https, not '{scheme}'"
        ))),
    }
}

/// Failures raised by the response stream surface as network errors; the rest
/// come from the local file.
fn map_copy_error(err: std::io::Error, destination: &Path) -> StorageError {
    let from_body = err
        .get_ref()
        .map(|inner| inner.is::<reqwest::Error>())
        .unwrap_or(false);
    if from_body {
        network_error(format!("download stream failed: {err}"))
    } else {
        io_error(format!("failed to write '{}': {err}", destination.display()))
    }
}
