//! HTTP-level integration tests for `/file/{filename}` downloads.

mod common;

use axum::body::Body;
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_LENGTH, CONTENT_TYPE, RANGE};
use axum::http::{Request, StatusCode};
use common::{
    alice, body_bytes, body_json, build_test_app, create_work, get, get_anonymous, send, Part,
};
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn download_needs_no_identity(pool: PgPool) {
    let app = build_test_app(pool);
    let parts = [
        Part::Text("title", "Attachment"),
        Part::Text("text", ""),
        Part::File {
            name: "file",
            filename: "story.txt",
            data: b"once upon a time",
        },
    ];
    let wid = create_work(&app, &alice(), &parts).await;
    let json = body_json(get(&app, &format!("/work/{wid}"), &alice()).await).await;
    let url = json["data"]["file_url"].as_str().unwrap().to_string();
    let filename = json["data"]["filename"].as_str().unwrap().to_string();

    let response = get_anonymous(&app, &url).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[CONTENT_TYPE],
        "application/octet-stream"
    );
    assert_eq!(
        response.headers()[CONTENT_DISPOSITION].to_str().unwrap(),
        format!("attachment; filename=\"{filename}\"")
    );
    assert_eq!(body_bytes(response).await, b"once upon a time");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_file_is_404(pool: PgPool) {
    let app = build_test_app(pool);
    let response = get_anonymous(&app, "/file/missing.AbCd1234.txt").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn traversal_names_are_404(pool: PgPool) {
    let app = build_test_app(pool);
    std::fs::write(app.upload_path().join(".hidden"), b"secret").unwrap();

    for uri in ["/file/..%2Fsecret", "/file/.hidden", "/file/..", "/file/a%5Cb"] {
        let response = get_anonymous(&app, uri).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn download_serves_byte_ranges_from_disk(pool: PgPool) {
    let app = build_test_app(pool);
    let stored = "chapter.AbCd1234.txt";
    std::fs::write(app.upload_path().join(stored), b"once upon a time").unwrap();

    let response = get_anonymous(&app, &format!("/file/{stored}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[CONTENT_LENGTH], "16");

    let request = Request::builder()
        .uri(format!("/file/{stored}"))
        .header(RANGE, "bytes=0-3")
        .body(Body::empty())
        .unwrap();
    let response = send(&app, request).await;
    assert_eq!(response.status(), StatusCode::PARTIAL_CONTENT);
    assert_eq!(
        response.headers()[CONTENT_TYPE],
        "application/octet-stream"
    );
    assert_eq!(
        response.headers()[CONTENT_DISPOSITION].to_str().unwrap(),
        format!("attachment; filename=\"{stored}\"")
    );
    assert_eq!(body_bytes(response).await, b"once");
}
