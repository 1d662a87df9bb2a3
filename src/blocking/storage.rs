use std::collections::HashMap;
use std::path::Path;

use reqwest::StatusCode;
use tokio_util::io::SyncIoBridge;

use super::{block_on, RT};
use crate::storage::{
    HttpClient, ObjectMetadata, StorageByteStream, StorageClient as AsyncStorageClient, StorageOptions,
    StorageResult,
};

/// Media response whose body implements [`std::io::Read`].
pub struct BlockingStreamingResponse {
    pub status: StatusCode,
    pub headers: HashMap<String, String>,
    pub reader: SyncIoBridge<StorageByteStream>,
}

/// Synchronous counterpart of [`crate::storage::StorageClient`].
#[derive(Clone, Debug)]
pub struct StorageClient {
    inner: AsyncStorageClient,
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

    pub fn with_options(options: StorageOptions) -> StorageResult<Self> {
        let http = HttpClient::new()?;
        let inner = AsyncStorageClient::with_http_client(options, http)?;
        Ok(Self { inner })
    }

    pub fn from_async(inner: AsyncStorageClient) -> Self {
        Self { inner }
    }

    pub fn into_async(self) -> AsyncStorageClient {
        self.inner
    }

    pub fn get_ref(&self) -> &AsyncStorageClient {
        &self.inner
    }

    pub fn access_token(&self) -> &str {
        self.inner.access_token()
    }

    pub fn refresh_token(&self) -> &str {
        self.inner.refresh_token()
    }

    pub fn object_metadata(&self, path: &str) -> StorageResult<ObjectMetadata> {
        block_on(self.inner.object_metadata(path))
    }

    pub fn download_to_file(&self, path: &str, destination: impl AsRef<Path>) -> StorageResult<()> {
        block_on(self.inner.download_to_file(path, destination))
    }

    /// The reader pulls from the network on the shared runtime as it is read.
    pub fn read_stream(&self, path: &str, download_token: &str) -> StorageResult<BlockingStreamingResponse> {
        let response = block_on(self.inner.read_stream(path, download_token))?;
        Ok(BlockingStreamingResponse {
            status: response.status,
            headers: response.headers,
            reader: SyncIoBridge::new_with_handle(response.reader, RT.handle().clone()),
        })
    }

    pub fn upload_from_file(&self, local_path: impl AsRef<Path>, remote_path: &str) -> StorageResult<ObjectMetadata> {
        block_on(self.inner.upload_from_file(local_path, remote_path))
    }

    pub fn refresh_tokens(&mut self) -> StorageResult<()> {
        block_on(self.inner.refresh_tokens())
    }
}
