//! Test utilities shared across crate-level unit tests.

pub mod fs;
pub mod http;

pub use fs::temp_path;
pub use http::{mock_options, start_mock_server};
