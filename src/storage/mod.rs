//! Firebase Storage REST client.
//!
//! [`StorageClient`] reads object metadata, downloads objects to disk or as a
//! live stream, uploads local files and refreshes its own credentials through
//! the Secure Token service.
//!
//! ```rust,ignore
//! use firebase_storage_client::storage::StorageClient;
//!
//! let mut client = StorageClient::new("my-app.appspot.com", access_token, refresh_token, api_key)?;
//! client.refresh_tokens().await?;
//! client.upload_from_file("cat.png", "images/cat.png").await?;
//! client.download_to_file("images/cat.png", "copy.png").await?;
//! ```
mod client;
mod constants;
mod error;
mod location;
mod metadata;
mod options;
mod request;
mod token;

#[doc(inline)]
pub use client::StorageClient;

#[doc(inline)]
pub use constants::{
    ACCESS_TOKEN_ENV, API_KEY_ENV, AUTH_SCHEME, BUCKET_ENV, DEFAULT_HOST, DEFAULT_PROTOCOL,
    DEFAULT_SECURE_TOKEN_ENDPOINT, EMULATOR_HOST_ENV, REFRESH_TOKEN_ENV, SECURE_TOKEN_ENDPOINT_ENV, STORAGE_HOST_ENV,
};

#[doc(inline)]
pub use error::{
    decode_error, internal_error, invalid_argument, io_error, missing_download_token, network_error, status_error,
    unauthenticated, StorageError, StorageErrorCode, StorageResult,
};

#[doc(inline)]
pub use location::{query_escape, Location};

#[doc(inline)]
pub use metadata::ObjectMetadata;

#[doc(inline)]
pub use options::StorageOptions;

#[doc(inline)]
pub use request::{
    download_media_request, get_metadata_request, refresh_token_request, upload_file_request, ErrorHandler,
    HttpClient, RequestBody, RequestInfo, ResponseHandler, ResponsePayload, StorageByteStream, StreamingResponse,
};

#[doc(inline)]
pub use token::{RefreshTokenRequest, TokenRefreshResponse};
