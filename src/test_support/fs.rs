use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Unique, not yet existing path under the system temp directory.
pub fn temp_path(label: &str) -> PathBuf {
    static COUNTER: AtomicUsize = AtomicUsize::new(0);
    std::env::temp_dir().join(format!(
        "firebase-storage-client-{}-{}-{label}",
        std::process::id(),
        COUNTER.fetch_add(1, Ordering::SeqCst)
    ))
}
