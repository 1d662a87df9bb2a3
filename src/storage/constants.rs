pub const DEFAULT_HOST: &str = "firebasestorage.googleapis.com";

pub const DEFAULT_PROTOCOL: &str = "https";

pub const DEFAULT_SECURE_TOKEN_ENDPOINT: &str = "https://securetoken.googleapis.com/v1/token";

/// Prefix of the `Authorization` header value sent to Firebase Storage.
pub const AUTH_SCHEME: &str = "Firebase";

pub const BUCKET_ENV: &str = "FIREBASE_STORAGE_BUCKET";
pub const ACCESS_TOKEN_ENV: &str = "FIREBASE_ACCESS_TOKEN";
pub const REFRESH_TOKEN_ENV: &str = "FIREBASE_REFRESH_TOKEN";
pub const API_KEY_ENV: &str = "FIREBASE_API_KEY";
pub const STORAGE_HOST_ENV: &str = "FIREBASE_STORAGE_HOST";
pub const SECURE_TOKEN_ENDPOINT_ENV: &str = "FIREBASE_SECURE_TOKEN_ENDPOINT";
pub const EMULATOR_HOST_ENV: &str = "FIREBASE_STORAGE_EMULATOR_HOST";
