use std::collections::HashMap;
use std::sync::Arc;

use reqwest::Method;

use crate::storage::error::{StorageError, StorageResult};

use super::transport::ResponsePayload;

pub type ResponseHandler<O> = Arc<dyn Fn(ResponsePayload) -> StorageResult<O> + Send + Sync>;
pub type ErrorHandler = Arc<dyn Fn(ResponsePayload, StorageError) -> StorageError + Send + Sync>;

#[derive(Debug)]
pub enum RequestBody {
    Text(String),
    /// Streamed from disk; the handle is dropped once the request completes.
    File(tokio::fs::File),
    Empty,
}

impl RequestBody {
    pub fn is_empty(&self) -> bool {
        matches!(self, RequestBody::Empty)
    }
}

pub struct RequestInfo<O> {
    pub url: String,
    pub method: Method,
    pub headers: HashMap<String, String>,
    pub body: RequestBody,
    /// Whether the client attaches its `Authorization: Firebase <token>` header.
    pub authenticated: bool,
    pub response_handler: ResponseHandler<O>,
    pub error_handler: Option<ErrorHandler>,
}

impl<O> RequestInfo<O> {
    pub fn new(url: impl Into<String>, method: Method, response_handler: ResponseHandler<O>) -> Self {
        Self {
            url: url.into(),
            method,
            headers: HashMap::new(),
            body: RequestBody::Empty,
            authenticated: false,
            response_handler,
            error_handler: None,
        }
    }

    pub fn with_body(mut self, body: RequestBody) -> Self {
        self.body = body;
        self
    }

    pub fn with_headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers = headers;
        self
    }

    pub fn with_authentication(mut self) -> Self {
        self.authenticated = true;
        self
    }

    pub fn with_error_handler(mut self, handler: ErrorHandler) -> Self {
        self.error_handler = Some(handler);
        self
    }
}
