use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageErrorCode {
    Network,
    Decode,
    MissingDownloadToken,
    Io,
    Unauthenticated,
    Unauthorized,
    ObjectNotFound,
    RequestFailed,
    InvalidArgument,
    InternalError,
}

impl StorageErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageErrorCode::Network => "storage/network",
            StorageErrorCode::Decode => "storage/decode",
            StorageErrorCode::MissingDownloadToken => "storage/missing-download-token",
            StorageErrorCode::Io => "storage/io",
            StorageErrorCode::Unauthenticated => "storage/unauthenticated",
            StorageErrorCode::Unauthorized => "storage/unauthorized",
            StorageErrorCode::ObjectNotFound => "storage/object-not-found",
            StorageErrorCode::RequestFailed => "storage/request-failed",
            StorageErrorCode::InvalidArgument => "storage/invalid-argument",
            StorageErrorCode::InternalError => "storage/internal-error",
        }
    }
}

#[derive(Debug, Clone)]
pub struct StorageError {
    pub code: StorageErrorCode,
    message: String,
    pub status: Option<u16>,
    pub server_response: Option<String>,
}

impl StorageError {
    pub fn new(code: StorageErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            status: None,
            server_response: None,
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_server_response(mut self, response: impl Into<String>) -> Self {
        self.server_response = Some(response.into());
        self
    }

    pub fn code_str(&self) -> &'static str {
        self.code.as_str()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if let Some(server) = &self.server_response {
            write!(f, "{} ({}): {}", self.message, self.code_str(), server)
        } else {
            write!(f, "{} ({})", self.message, self.code_str())
        }
    }
}

impl Error for StorageError {}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        io_error(err.to_string())
    }
}

pub type StorageResult<T> = Result<T, StorageError>;

pub fn network_error(message: impl Into<String>) -> StorageError {
    StorageError::new(StorageErrorCode::Network, message)
}

pub fn decode_error(message: impl Into<String>) -> StorageError {
    StorageError::new(StorageErrorCode::Decode, message)
}

pub fn missing_download_token(path: &str) -> StorageError {
    StorageError::new(
        StorageErrorCode::MissingDownloadToken,
        format!("Metadata for '{path}' does not carry a string 'downloadTokens' field."),
    )
}

pub fn io_error(message: impl Into<String>) -> StorageError {
    StorageError::new(StorageErrorCode::Io, message)
}

pub fn unauthenticated(message: impl Into<String>) -> StorageError {
    StorageError::new(StorageErrorCode::Unauthenticated, message)
}

pub fn invalid_argument(message: impl Into<String>) -> StorageError {
    StorageError::new(StorageErrorCode::InvalidArgument, message)
}

pub fn internal_error(message: impl Into<String>) -> StorageError {
    StorageError::new(StorageErrorCode::InternalError, message)
}

/// Maps a non-success HTTP status to the matching error code.
pub fn status_error(status: u16) -> StorageError {
    let code = match status {
        401 => StorageErrorCode::Unauthenticated,
        403 => StorageErrorCode::Unauthorized,
        404 => StorageErrorCode::ObjectNotFound,
        _ => StorageErrorCode::RequestFailed,
    };
    StorageError::new(code, format!("storage request failed with status {status}")).with_status(status)
}
