use std::io::Cursor;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;
use zip::ZipArchive;

use sweeper::api::SweeperApi;
use sweeper::conf::Config;
use sweeper::service::SweeperService;

fn setup() -> Router {
    setup_with(Config::default())
}

fn setup_with(config: Config) -> Router {
    SweeperApi::new(SweeperService::new(config)).router()
}

async fn send(router: &Router, req: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = router.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes().to_vec();
    (status, bytes)
}

async fn send_json(router: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let (status, bytes) = send(router, req).await;
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

fn upload(name: &str, content: &str) -> Request<Body> {
    Request::put(format!("/api/v1/files/{name}"))
        .body(Body::from(content.to_string()))
        .unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

#[tokio::test]
async fn test_health() {
    let router = setup();
    let req = Request::get("/health").body(Body::empty()).unwrap();
    let (status, bytes) = send(&router, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(bytes, b"OK");
}

#[tokio::test]
async fn test_upload_then_reupload() {
    let router = setup();
    let (status, json) = send_json(&router, upload("a.csv", "x,y\n1,2\n1,2\n")).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["name"], "a.csv");
    assert_eq!(json["current_shape"], json!({"rows": 2, "columns": 2}));
    assert_eq!(json["numeric_columns"], json!(["x", "y"]));
    assert_eq!(json["size_bytes"], 12);

    let (status, json) = send_json(&router, upload("a.csv", "z\n1\n")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["columns"], json!(["x", "y"]));
}

#[tokio::test]
async fn test_upload_unsupported_format() {
    let router = setup();
    let (status, json) = send_json(&router, upload("notes.txt", "hello")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains(".txt"));

    let req = Request::get("/api/v1/files").body(Body::empty()).unwrap();
    let (_, json) = send_json(&router, req).await;
    assert_eq!(json, json!([]));
}

#[tokio::test]
async fn test_upload_too_large() {
    let mut config = Config::default();
    config.server.max_upload_bytes = 8;
    let router = setup_with(config);
    let (status, _) = send(&router, upload("a.csv", "x,y\n1,2\n3,4\n5,6\n")).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn test_clean_and_summary() {
    let router = setup();
    send(&router, upload("a.csv", "x,y\n1,2\n1,2\n3,\n")).await;

    let body = json!({"operations": [
        {"op": "drop_missing_rows"},
        {"op": "remove_duplicates"},
        {"op": "reset_index"}
    ]});
    let (status, json) = send_json(&router, post_json("/api/v1/files/a.csv/clean", body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json["steps"],
        json!(["Removed duplicates", "Dropped rows with missing values", "Reset index"])
    );
    assert_eq!(json["current_shape"]["rows"], 1);

    let req = Request::get("/api/v1/files/a.csv/summary")
        .body(Body::empty())
        .unwrap();
    let (status, json) = send_json(&router, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["original_shape"]["rows"], 3);
    assert_eq!(json["preview"], json!([{"index": 0, "x": 1, "y": 2}]));
    assert_eq!(json["statistics"][0]["name"], "x");
    assert_eq!(json["missing"][1]["missing"], 0);
}

#[tokio::test]
async fn test_clean_errors() {
    let router = setup();
    send(&router, upload("a.csv", "x,name\n1,\n2,b\n")).await;

    let body = json!({"operations": [
        {"op": "fill_missing", "columns": ["name"], "method": "mean"}
    ]});
    let (status, json) = send_json(&router, post_json("/api/v1/files/a.csv/clean", body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("name"));

    let body = json!({"operations": [{"op": "drop_columns", "columns": ["zzz"]}]});
    let (status, json) = send_json(&router, post_json("/api/v1/files/a.csv/clean", body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Unknown column: zzz");

    let body = json!({"operations": []});
    let (status, _) = send_json(&router, post_json("/api/v1/files/b.csv/clean", body)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_chart() {
    let router = setup();
    send(&router, upload("a.csv", "x,y\n1,2\n3,4\n")).await;

    let body = json!({"kind": "scatter", "x": "x", "y": "y"});
    let (status, json) = send_json(&router, post_json("/api/v1/files/a.csv/chart", body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"][0]["mode"], "markers");
    assert_eq!(json["data"][0]["x"], json!([1.0, 3.0]));
    assert_eq!(json["data"][0]["y"], json!([2.0, 4.0]));

    let body = json!({"kind": "histogram", "x": "y"});
    let (status, json) = send_json(&router, post_json("/api/v1/files/a.csv/chart", body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"][0]["type"], "histogram");

    let body = json!({"kind": "bar", "x": "x"});
    let (status, _) = send_json(&router, post_json("/api/v1/files/a.csv/chart", body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_export_formats() {
    let router = setup();
    send(&router, upload("data.csv", "x,y\n1,2\n3,\n")).await;

    let req = Request::get("/api/v1/files/data.csv/export?format=json")
        .body(Body::empty())
        .unwrap();
    let response = router.clone().oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"data.json\""
    );
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json, json!([{"x": 1, "y": 2}, {"x": 3, "y": null}]));

    let req = Request::get("/api/v1/files/data.csv/export")
        .body(Body::empty())
        .unwrap();
    let (status, bytes) = send(&router, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(bytes, b"x,y\n1,2\n3,\n");

    let req = Request::get("/api/v1/files/data.csv/export?format=excel")
        .body(Body::empty())
        .unwrap();
    let response = router.clone().oneshot(req).await.unwrap();
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
    );
}

#[tokio::test]
async fn test_export_all_and_reset() {
    let router = setup();
    send(&router, upload("a.csv", "x\n1\n")).await;
    send(&router, upload("b.csv", "x\n2\n")).await;

    let req = Request::get("/api/v1/export").body(Body::empty()).unwrap();
    let response = router.clone().oneshot(req).await.unwrap();
    assert_eq!(response.headers()[header::CONTENT_TYPE], "application/zip");
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let archive = ZipArchive::new(Cursor::new(bytes.to_vec())).unwrap();
    assert_eq!(archive.len(), 2);

    let req = Request::delete("/api/v1/files").body(Body::empty()).unwrap();
    let (status, _) = send(&router, req).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let req = Request::get("/api/v1/export").body(Body::empty()).unwrap();
    let (_, bytes) = send(&router, req).await;
    let archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
    assert_eq!(archive.len(), 0);
}
