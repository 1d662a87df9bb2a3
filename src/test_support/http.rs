use httpmock::MockServer;

use crate::storage::StorageOptions;

/// Starts a fresh `httpmock::MockServer` for a single test.
pub fn start_mock_server() -> MockServer {
    MockServer::start()
}

/// Options for bucket `mybucket` (tokens `T1`/`R1`, key `key-1`) with both the
/// storage host and the secure token endpoint served by `server`.
pub fn mock_options(server: &MockServer) -> StorageOptions {
    StorageOptions::new("mybucket", "T1", "R1", "key-1")
        .with_storage_host(server.base_url())
        .with_secure_token_endpoint(server.url("/v1/token"))
}
