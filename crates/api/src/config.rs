use std::path::PathBuf;

use crate::auth::jwt::JwtConfig;

/// Default per-file upload limit in bytes.
const DEFAULT_MAX_FILE_SIZE: u64 = 3_000_000;
/// Default whole-request body limit in bytes (3 MiB).
const DEFAULT_MAX_REQUEST_SIZE: usize = 3 * 1024 * 1024;
/// Default free space that must remain before uploads are accepted (3 GiB).
const DEFAULT_REQUIRE_FREE_SPACE: u64 = 3 * 1024 * 1024 * 1024;

/// How the caller's identity is established.
///
/// Login happens elsewhere; this service only verifies what it is handed.
#[derive(Debug, Clone)]
pub enum AuthMode {
    /// HS256 bearer tokens signed by the login front end.
    Jwt(JwtConfig),
    /// Every request acts as the fixed development identity.
    Dev,
}

/// Where uploads go and the limits applied to them.
#[derive(Debug, Clone)]
pub struct UploadConfig {
    /// Absolute path of the flat upload directory.
    pub upload_path: PathBuf,
    /// Largest accepted file, in bytes.
    pub max_file_size: u64,
    /// Uploads are refused when less than this many bytes are free.
    pub require_free_space: u64,
}

/// Server configuration loaded from environment variables.
///
/// All fields except the database URL and JWT secret have defaults suitable
/// for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Site title shown on form descriptions (default: `fbfp`).
    pub site_title: String,
    /// Directory served under `/static` (default: `static`).
    pub static_dir: PathBuf,
    /// Body limit for any single request, in bytes.
    pub max_request_size: usize,
    /// Upload storage settings.
    pub uploads: UploadConfig,
    /// Identity verification mode.
    pub auth: AuthMode,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default       |
    /// |------------------------|---------------|
    /// | `HOST`                 | `0.0.0.0`     |
    /// | `PORT`                 | `3000`        |
    /// | `CORS_ORIGINS`         | (none)        |
    /// | `REQUEST_TIMEOUT_SECS` | `30`          |
    /// | `SITE_TITLE`           | `fbfp`        |
    /// | `STATIC_DIR`           | `static`      |
    /// | `UPLOAD_PATH`          | `uploads`     |
    /// | `MAX_FILE_SIZE`        | `3000000`     |
    /// | `MAX_REQUEST_SIZE`     | `3145728`     |
    /// | `REQUIRE_FREE_SPACE`   | `3221225472`  |
    /// | `AUTH_MODE`            | `jwt`         |
    ///
    /// # Panics
    ///
    /// Panics on unparsable values, an unknown `AUTH_MODE`, or a missing
    /// `JWT_SECRET` in `jwt` mode.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port: u16 = env_parse("PORT", 3000);

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = env_parse("REQUEST_TIMEOUT_SECS", 30);
        let site_title = std::env::var("SITE_TITLE").unwrap_or_else(|_| "fbfp".into());
        let static_dir =
            PathBuf::from(std::env::var("STATIC_DIR").unwrap_or_else(|_| "static".into()));
        let max_request_size: usize = env_parse("MAX_REQUEST_SIZE", DEFAULT_MAX_REQUEST_SIZE);

        let upload_path =
            PathBuf::from(std::env::var("UPLOAD_PATH").unwrap_or_else(|_| "uploads".into()));
        let upload_path =
            std::path::absolute(&upload_path).expect("UPLOAD_PATH must be a resolvable path");
        let uploads = UploadConfig {
            upload_path,
            max_file_size: env_parse("MAX_FILE_SIZE", DEFAULT_MAX_FILE_SIZE),
            require_free_space: env_parse("REQUIRE_FREE_SPACE", DEFAULT_REQUIRE_FREE_SPACE),
        };

        let auth = match std::env::var("AUTH_MODE").as_deref() {
            Ok("jwt") | Err(_) => AuthMode::Jwt(JwtConfig::from_env()),
            Ok("dev") => AuthMode::Dev,
            Ok(other) => panic!("AUTH_MODE must be 'jwt' or 'dev', got '{other}'"),
        };

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            site_title,
            static_dir,
            max_request_size,
            uploads,
            auth,
        }
    }
}

/// Parse an env var, falling back to `default` when unset.
fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse()
            .unwrap_or_else(|e| panic!("{key} must be a valid {}: {e}", std::any::type_name::<T>())),
        Err(_) => default,
    }
}
