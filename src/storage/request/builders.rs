use std::collections::HashMap;
use std::sync::Arc;

use reqwest::Method;

use crate::storage::error::{internal_error, StorageResult};
use crate::storage::location::{query_escape, Location};
use crate::storage::metadata::ObjectMetadata;
use crate::storage::token::{map_refresh_error, RefreshTokenRequest, TokenRefreshResponse};

use super::{ErrorHandler, RequestBody, RequestInfo, ResponseHandler};

pub fn get_metadata_request(host: &str, location: &Location) -> RequestInfo<ObjectMetadata> {
    let handler: ResponseHandler<ObjectMetadata> = Arc::new(|payload| ObjectMetadata::from_slice(&payload.body));

    RequestInfo::new(location.metadata_url(host), Method::GET, handler)
        .with_headers(default_json_headers())
        .with_authentication()
}

/// PUT of the raw file contents to the metadata endpoint.
pub fn upload_file_request(host: &str, location: &Location, file: tokio::fs::File) -> RequestInfo<ObjectMetadata> {
    let handler: ResponseHandler<ObjectMetadata> = Arc::new(|payload| ObjectMetadata::from_slice(&payload.body));

    RequestInfo::new(location.metadata_url(host), Method::PUT, handler)
        .with_headers(default_json_headers())
        .with_body(RequestBody::File(file))
        .with_authentication()
}

/// Unauthenticated media download; access is granted by the token alone.
pub fn download_media_request(host: &str, location: &Location, download_token: &str) -> RequestInfo<Vec<u8>> {
    let handler: ResponseHandler<Vec<u8>> = Arc::new(|payload| Ok(payload.body));

    RequestInfo::new(location.media_url(host, download_token), Method::GET, handler)
}

pub fn refresh_token_request(
    endpoint: &str,
    api_key: &str,
    refresh_token: &str,
) -> StorageResult<RequestInfo<TokenRefreshResponse>> {
    let url = format!("{endpoint}?key={}", query_escape(api_key));
    let body = serde_json::to_string(&RefreshTokenRequest::new(refresh_token))
        .map_err(|err| internal_error(format!("failed to encode token refresh request: {err}")))?;

    let handler: ResponseHandler<TokenRefreshResponse> =
        Arc::new(|payload| TokenRefreshResponse::from_slice(&payload.body));
    let error_handler: ErrorHandler = Arc::new(|payload, base| map_refresh_error(&payload.body, base));

    Ok(RequestInfo::new(url, Method::POST, handler)
        .with_headers(default_json_headers())
        .with_body(RequestBody::Text(body))
        .with_error_handler(error_handler))
}

fn default_json_headers() -> HashMap<String, String> {
    let mut headers = HashMap::new();
    headers.insert("Content-Type".to_string(), "application/json".to_string());
    headers
}
