use std::collections::HashMap;
use std::io::{Error as IoError, ErrorKind};
use std::pin::Pin;

use bytes::Bytes;
use futures::stream::TryStreamExt;
use reqwest::{Body, Client, Response, StatusCode, Url};
use tokio_util::io::{ReaderStream, StreamReader};

use crate::storage::error::{internal_error, network_error, status_error, StorageError, StorageResult};

use super::info::{RequestBody, RequestInfo};

#[derive(Clone, Debug)]
pub struct ResponsePayload {
    pub status: StatusCode,
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
}

impl ResponsePayload {
    async fn from_response(response: Response) -> StorageResult<Self> {
        let status = response.status();
        let headers = collect_headers(&response);
        let body = response
            .bytes()
            .await
            .map_err(|err| network_error(format!("failed to read response body: {err}")))?
            .to_vec();
        Ok(Self { status, headers, body })
    }
}

type DynByteStream = Pin<Box<dyn futures::stream::Stream<Item = Result<Bytes, IoError>> + Send>>;

/// Live response body exposed as a `tokio::io::AsyncRead`.
pub type StorageByteStream = StreamReader<DynByteStream, Bytes>;

/// A response whose body has not been read yet.
///
/// Dropping `reader` releases the underlying connection.
pub struct StreamingResponse {
    pub status: StatusCode,
    pub headers: HashMap<String, String>,
    pub reader: StorageByteStream,
}

impl std::fmt::Debug for StreamingResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamingResponse")
            .field("status", &self.status)
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}

/// Sends one request per call. Nothing is retried and no timeout is applied.
/// Any 2xx status counts as success.
#[derive(Clone, Debug)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new() -> StorageResult<Self> {
        let client = Client::builder()
            .user_agent(format!("firebase-storage-client/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|err| internal_error(format!("failed to build HTTP client: {err}")))?;
        Ok(Self { client })
    }

    pub async fn execute<O>(&self, info: RequestInfo<O>) -> StorageResult<O> {
        let (response, info) = self.send(info).await?;
        let payload = ResponsePayload::from_response(response).await?;

        if payload.status.is_success() {
            return (info.response_handler)(payload);
        }

        Err(map_failure(payload, &info))
    }

    pub async fn execute_streaming<O>(&self, info: RequestInfo<O>) -> StorageResult<StreamingResponse> {
        let (response, info) = self.send(info).await?;
        let status = response.status();

        if !status.is_success() {
            let payload = ResponsePayload::from_response(response).await?;
            return Err(map_failure(payload, &info));
        }

        let headers = collect_headers(&response);
        let stream = response
            .bytes_stream()
            .map_err(|err| IoError::new(ErrorKind::Other, err));
        let stream: DynByteStream = Box::pin(stream);

        Ok(StreamingResponse {
            status,
            headers,
            reader: StreamReader::new(stream),
        })
    }

    /// Consumes the body out of `info` and hands the rest back for response handling.
    async fn send<O>(&self, mut info: RequestInfo<O>) -> StorageResult<(Response, RequestInfo<O>)> {
        let url = Url::parse(&info.url)
            .map_err(|err| internal_error(format!("invalid storage URL '{}': {err}", info.url)))?;
        log::debug!("{} {}{}", info.method, url.origin().ascii_serialization(), url.path());

        let mut request_builder = self.client.request(info.method.clone(), url);

        for (header, value) in &info.headers {
            request_builder = request_builder.header(header, value);
        }

        match std::mem::replace(&mut info.body, RequestBody::Empty) {
            RequestBody::Text(text) => {
                if !text.is_empty() {
                    request_builder = request_builder.body(text);
                }
            }
            RequestBody::File(file) => {
                request_builder = request_builder.body(Body::wrap_stream(ReaderStream::new(file)));
            }
            RequestBody::Empty => {}
        }

        let response = request_builder
            .send()
            .await
            .map_err(|err| network_error(format!("storage request failed: {err}")))?;

        Ok((response, info))
    }
}

fn collect_headers(response: &Response) -> HashMap<String, String> {
    let mut headers = HashMap::new();
    for (key, value) in response.headers().iter() {
        if let Ok(val) = value.to_str() {
            headers.insert(key.as_str().to_owned(), val.to_owned());
        }
    }
    headers
}

fn map_failure<O>(payload: ResponsePayload, info: &RequestInfo<O>) -> StorageError {
    log::warn!("{} request failed with status {}", info.method, payload.status);

    let base_error = status_error(payload.status.as_u16())
        .with_server_response(String::from_utf8_lossy(&payload.body).to_string());

    if let Some(handler) = &info.error_handler {
        handler(payload, base_error)
    } else {
        base_error
    }
}
