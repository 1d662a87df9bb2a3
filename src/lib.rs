//! Thin client for the Firebase Storage REST API and the Google Secure Token service.
//!
//! The async API lives in [`storage`]; [`blocking`] wraps it for synchronous callers.

pub mod blocking;
pub mod storage;

#[cfg(test)]
pub mod test_support;
