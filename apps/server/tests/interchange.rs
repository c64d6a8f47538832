mod common;

use axum::http::{header, StatusCode};
use common::{body_bytes, json_body, multipart_request, spawn_app, Part};
use serde_json::json;

#[tokio::test]
async fn export_then_restore_appends_rows() {
    let app = spawn_app(None).await;
    app.create(json!({ "title": "Tea set", "price": 42000, "owner": "Nomuna" }))
        .await;
    app.create(json!({ "title": "Umbrella", "bought": true }))
        .await;

    let response = app.get("/api/export/csv").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "text/csv; charset=utf-8"
    );
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"wishlist.csv\""
    );
    let csv = body_bytes(response).await;
    let text = String::from_utf8(csv.clone()).unwrap();
    assert!(text.starts_with("id,title,description,price,currency,image,link,owner,bought,created_at"));
    assert_eq!(text.lines().count(), 3);

    let response = app
        .send(multipart_request(
            "/api/restore/csv",
            &[Part::File {
                name: "file",
                file_name: "wishlist.csv",
                content_type: "text/csv",
                bytes: &csv,
            }],
            None,
        ))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!({ "ok": true, "added": 2 }));

    let listed = json_body(app.get("/api/items").await).await;
    let listed = listed.as_array().unwrap();
    assert_eq!(listed.len(), 4);
    let tea: Vec<_> = listed.iter().filter(|w| w["title"] == "Tea set").collect();
    assert_eq!(tea.len(), 2);
    assert!(tea.iter().all(|w| w["owner"] == "Nomuna" && w["price"] == 42000.0));
    assert_eq!(
        listed.iter().filter(|w| w["bought"] == true).count(),
        2
    );
}

#[tokio::test]
async fn restore_applies_lenient_defaults() {
    let app = spawn_app(None).await;
    let csv = b"title,price,owner,currency,bought\n,abc,,,yes\nLamp,12.5,Nomuna,USD,1\n";
    let response = app
        .send(multipart_request(
            "/api/restore/csv",
            &[Part::File {
                name: "file",
                file_name: "restore.csv",
                content_type: "text/csv",
                bytes: csv,
            }],
            None,
        ))
        .await;
    assert_eq!(json_body(response).await["added"], 2);

    let listed = json_body(app.get("/api/items").await).await;
    let untitled = listed
        .as_array()
        .unwrap()
        .iter()
        .find(|w| w["title"] == "Untitled")
        .unwrap()
        .clone();
    assert!(untitled["price"].is_null());
    assert_eq!(untitled["owner"], "Munhu");
    assert_eq!(untitled["currency"], "MNT");
    assert_eq!(untitled["bought"], false);
}

#[tokio::test]
async fn malformed_restore_adds_nothing() {
    let app = spawn_app(None).await;
    app.create(json!({ "title": "Existing" })).await;

    let response = app
        .send(multipart_request(
            "/api/restore/csv",
            &[Part::File {
                name: "file",
                file_name: "broken.csv",
                content_type: "text/csv",
                bytes: b"title,price\nLamp,10\nChair,1,2\n",
            }],
            None,
        ))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(json_body(response).await["error"].is_string());

    let listed = json_body(app.get("/api/items").await).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn restore_without_file_is_bad_request() {
    let app = spawn_app(None).await;
    let response = app
        .send(multipart_request(
            "/api/restore/csv",
            &[Part::Text("note", "no file here")],
            None,
        ))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["error"], "file is required");
}

#[tokio::test]
async fn upload_returns_a_served_path() {
    let app = spawn_app(None).await;
    let response = app
        .send(multipart_request(
            "/api/upload",
            &[Part::File {
                name: "file",
                file_name: "../../evil name.png",
                content_type: "image/png",
                bytes: b"png-bytes",
            }],
            None,
        ))
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let url = json_body(response).await["url"].as_str().unwrap().to_string();
    assert!(url.starts_with("/uploads/"));
    assert!(url.ends_with("_evil_name.png"));
    assert!(!url.contains(".."));

    let served = app.get(&url).await;
    assert_eq!(served.status(), StatusCode::OK);
    assert_eq!(body_bytes(served).await, b"png-bytes");
}

#[tokio::test]
async fn backup_is_a_sqlite_file() {
    let app = spawn_app(None).await;
    app.create(json!({ "title": "Snapshot me" })).await;

    let response = app.get("/api/backup/sqlite").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/octet-stream"
    );
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"db.sqlite\""
    );
    let bytes = body_bytes(response).await;
    assert!(bytes.starts_with(b"SQLite format 3\0"));
}
