#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE, LOCATION};
use axum::http::{Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tempfile::TempDir;
use tower::ServiceExt;

use fbfp_api::auth::jwt::{issue_token, JwtConfig};
use fbfp_api::auth::Identity;
use fbfp_api::config::{AuthMode, ServerConfig, UploadConfig};
use fbfp_api::router::build_app_router;
use fbfp_api::state::AppState;

pub const TEST_SECRET: &str = "test-secret";
pub const MAX_FILE_SIZE: u64 = 1024;
const BOUNDARY: &str = "fbfp-test-boundary";

/// Build a test `ServerConfig` with safe defaults.
///
/// Uploads go to `upload_path`; the free-space requirement is off and
/// files are capped at [`MAX_FILE_SIZE`] so limits are cheap to hit.
pub fn test_config(upload_path: &Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        site_title: "fbfp test".to_string(),
        static_dir: upload_path.join("static"),
        max_request_size: 64 * 1024,
        uploads: UploadConfig {
            upload_path: upload_path.to_path_buf(),
            max_file_size: MAX_FILE_SIZE,
            require_free_space: 0,
        },
        auth: AuthMode::Jwt(JwtConfig {
            secret: TEST_SECRET.to_string(),
        }),
    }
}

/// The application under test plus the upload directory it writes to.
pub struct TestApp {
    pub router: Router,
    uploads: TempDir,
}

impl TestApp {
    pub fn upload_path(&self) -> PathBuf {
        self.uploads.path().to_path_buf()
    }

    /// Names of the files currently stored in the upload directory.
    pub fn stored_files(&self) -> Vec<String> {
        std::fs::read_dir(self.uploads.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .filter(|name| name != "static")
            .collect()
    }
}

/// Build the full application router over `pool` with the test config.
pub fn build_test_app(pool: PgPool) -> TestApp {
    build_test_app_with(pool, |_| {})
}

/// Like [`build_test_app`], with a hook to adjust the config first.
pub fn build_test_app_with(pool: PgPool, adjust: impl FnOnce(&mut ServerConfig)) -> TestApp {
    let uploads = tempfile::tempdir().unwrap();
    let mut config = test_config(uploads.path());
    adjust(&mut config);

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };

    TestApp {
        router: build_app_router(state, &config),
        uploads,
    }
}

// ---------------------------------------------------------------------------
// Identities
// ---------------------------------------------------------------------------

pub fn alice() -> Identity {
    Identity {
        oid: "alice-oid".to_string(),
        name: "Alice".to_string(),
        email: "alice@example.org".to_string(),
    }
}

pub fn bob() -> Identity {
    Identity {
        oid: "bob-oid".to_string(),
        name: "Bob".to_string(),
        email: "bob@example.org".to_string(),
    }
}

/// A valid bearer token for `identity`.
pub fn token(identity: &Identity) -> String {
    let config = JwtConfig {
        secret: TEST_SECRET.to_string(),
    };
    issue_token(identity, 3600, &config).unwrap()
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// Send a fully built request through the router.
pub async fn send(app: &TestApp, request: Request<Body>) -> Response<Body> {
    app.router.clone().oneshot(request).await.unwrap()
}

fn request(method: Method, uri: &str, who: Option<&Identity>) -> axum::http::request::Builder {
    let builder = Request::builder().method(method).uri(uri);
    match who {
        Some(identity) => builder.header(AUTHORIZATION, format!("Bearer {}", token(identity))),
        None => builder,
    }
}

/// GET `uri` as `who`.
pub async fn get(app: &TestApp, uri: &str, who: &Identity) -> Response<Body> {
    send(app, request(Method::GET, uri, Some(who)).body(Body::empty()).unwrap()).await
}

/// GET `uri` without any credentials.
pub async fn get_anonymous(app: &TestApp, uri: &str) -> Response<Body> {
    send(app, request(Method::GET, uri, None).body(Body::empty()).unwrap()).await
}

/// POST an urlencoded form built from `fields` as `who`.
pub async fn post_form(
    app: &TestApp,
    uri: &str,
    who: &Identity,
    fields: &[(&str, &str)],
) -> Response<Body> {
    let body = fields
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");
    let request = request(Method::POST, uri, Some(who))
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .unwrap();
    send(app, request).await
}

/// One part of a multipart submission.
pub enum Part<'a> {
    Text(&'a str, &'a str),
    File {
        name: &'a str,
        filename: &'a str,
        data: &'a [u8],
    },
}

pub fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            Part::File {
                name,
                filename,
                data,
            } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n\
                         Content-Type: application/octet-stream\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(data);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

/// POST a multipart submission as `who`.
pub async fn post_multipart(
    app: &TestApp,
    uri: &str,
    who: &Identity,
    parts: &[Part<'_>],
) -> Response<Body> {
    let request = request(Method::POST, uri, Some(who))
        .header(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(parts)))
        .unwrap();
    send(app, request).await
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

/// Collect a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Collect a response body as raw bytes.
pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

/// Assert a `303 See Other` and return its `Location`.
pub fn redirect_location(response: &Response<Body>) -> String {
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    response.headers()[LOCATION].to_str().unwrap().to_string()
}

/// Submit a work as `who` and return its id.
pub async fn create_work(app: &TestApp, who: &Identity, parts: &[Part<'_>]) -> i64 {
    let response = post_multipart(app, "/new", who, parts).await;
    let location = redirect_location(&response);
    location
        .strip_prefix("/work/")
        .and_then(|wid| wid.parse().ok())
        .unwrap_or_else(|| panic!("unexpected redirect {location}"))
}

/// Submit a comment on `wid` as `who` and return its id.
pub async fn create_comment(app: &TestApp, wid: i64, who: &Identity, parts: &[Part<'_>]) -> i64 {
    let uri = format!("/work/{wid}/comment/new");
    let response = post_multipart(app, &uri, who, parts).await;
    let location = redirect_location(&response);
    location
        .rsplit('/')
        .next()
        .and_then(|cid| cid.parse().ok())
        .unwrap_or_else(|| panic!("unexpected redirect {location}"))
}
