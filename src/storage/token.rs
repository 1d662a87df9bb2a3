use serde::{Deserialize, Serialize};

use crate::storage::error::{decode_error, unauthenticated, StorageError, StorageResult};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenRequest<'a> {
    pub grant_type: &'static str,
    pub refresh_token: &'a str,
}

impl<'a> RefreshTokenRequest<'a> {
    pub fn new(refresh_token: &'a str) -> Self {
        Self {
            grant_type: "refresh_token",
            refresh_token,
        }
    }
}

/// Reply of the secure token service.
///
/// Every field is optional; a field present with a non-string value fails the
/// decode instead of being ignored.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct TokenRefreshResponse {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub id_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub project_id: Option<String>,
}

impl TokenRefreshResponse {
    pub fn from_slice(body: &[u8]) -> StorageResult<Self> {
        serde_json::from_slice(body)
            .map_err(|err| decode_error(format!("failed to parse token refresh response: {err}")))
    }

    /// New access token, if the service returned a non-empty one.
    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref().filter(|token| !token.is_empty())
    }

    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_deref().filter(|token| !token.is_empty())
    }
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: Option<ErrorBody>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Replaces a status-based error with the service's own message
/// (`TOKEN_EXPIRED`, `INVALID_REFRESH_TOKEN`, ...) when the body carries one.
pub fn map_refresh_error(body: &[u8], base: StorageError) -> StorageError {
    let message = serde_json::from_slice::<ErrorResponse>(body)
        .ok()
        .and_then(|parsed| parsed.error)
        .and_then(|error| error.message);

    match message {
        Some(message) => {
            let mut mapped = unauthenticated(message);
            mapped.status = base.status;
            mapped.server_response = base.server_response;
            mapped
        }
        None => base,
    }
}
