//! Blocking wrappers around the async clients.
//!
//! Calls are driven on a shared multi-threaded tokio runtime built on first
//! use. Do not call them from inside an async context.

pub mod storage;

pub use storage::{BlockingStreamingResponse, StorageClient};

use once_cell::sync::Lazy;
use tokio::runtime::Runtime;

static RT: Lazy<Runtime> = Lazy::new(|| {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("Tokio runtime")
});

fn block_on<F: std::future::Future>(fut: F) -> F::Output {
    RT.block_on(fut)
}
