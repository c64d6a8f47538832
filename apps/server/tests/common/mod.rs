#![allow(dead_code)]

use std::time::Duration;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, Response},
    Router,
};
use tempfile::TempDir;
use tower::ServiceExt;
use wishlist_server::{api::app_router, build_state, config::Config};

pub const BOUNDARY: &str = "wishlist-test-boundary";

pub struct TestApp {
    pub router: Router,
    pub dir: TempDir,
}

fn test_config(dir: &TempDir, pin: Option<&str>) -> Config {
    Config {
        listen_addr: "127.0.0.1:0".parse().unwrap(),
        db_path: dir
            .path()
            .join("data")
            .join("db.sqlite")
            .to_string_lossy()
            .to_string(),
        upload_dir: dir.path().join("data").join("uploads"),
        cors_allow: vec!["*".to_string()],
        auth_pin: pin.map(str::to_string),
        pin_header: "x-auth-pin".to_string(),
        pin_header_aliases: vec!["x-pin".to_string()],
        owners: vec!["Munhu".to_string(), "Nomuna".to_string()],
        default_currency: "MNT".to_string(),
        max_body_bytes: 10 * 1024 * 1024,
        request_timeout: Duration::from_secs(30),
    }
}

pub async fn spawn_app(pin: Option<&str>) -> TestApp {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(&dir, pin);
    let state = build_state(&config).await.unwrap();
    TestApp {
        router: app_router(state, &config),
        dir,
    }
}

impl TestApp {
    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn get(&self, uri: &str) -> Response<Body> {
        self.send(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
    }

    pub async fn send_json(
        &self,
        method: Method,
        uri: &str,
        body: serde_json::Value,
        pin: Option<&str>,
    ) -> Response<Body> {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(pin) = pin {
            builder = builder.header("x-auth-pin", pin);
        }
        self.send(builder.body(Body::from(body.to_string())).unwrap())
            .await
    }

    pub async fn create(&self, body: serde_json::Value) -> serde_json::Value {
        let response = self.send_json(Method::POST, "/api/items", body, None).await;
        assert_eq!(response.status(), 201);
        json_body(response).await
    }
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

pub async fn json_body(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

/// Part of a hand-built multipart body.
pub enum Part<'a> {
    Text(&'a str, &'a str),
    File {
        name: &'a str,
        file_name: &'a str,
        content_type: &'a str,
        bytes: &'a [u8],
    },
}

pub fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name)
                        .as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            Part::File {
                name,
                file_name,
                content_type,
                bytes,
            } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                        name, file_name, content_type
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(bytes);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

pub fn multipart_request(uri: &str, parts: &[Part<'_>], pin: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        );
    if let Some(pin) = pin {
        builder = builder.header("x-auth-pin", pin);
    }
    builder.body(Body::from(multipart_body(parts))).unwrap()
}
