pub mod builders;
pub mod info;
pub mod transport;

pub use builders::{download_media_request, get_metadata_request, refresh_token_request, upload_file_request};
pub use info::{ErrorHandler, RequestBody, RequestInfo, ResponseHandler};

pub use transport::{HttpClient, ResponsePayload, StorageByteStream, StreamingResponse};
