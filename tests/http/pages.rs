//! Read-only pages and routing.

use reqwest::StatusCode;
use serde_json::Value;

use crate::support::start_server;

#[tokio::test]
async fn home_lists_samples() {
    let app = start_server().await;

    let resp = app.get("/", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.unwrap();
    assert!(body.contains("Awi"));
    assert!(body.contains("Muiz"));
}

#[tokio::test]
async fn profile_page_renders() {
    let app = start_server().await;

    let resp = app.get("/profile", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp
        .headers()
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap()
        .starts_with("text/html"));
}

#[tokio::test]
async fn unknown_route_is_404() {
    let app = start_server().await;

    let resp = app.get("/nowhere", None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(resp.text().await.unwrap(), "404 Not Found");
}

#[tokio::test]
async fn empty_list() {
    let app = start_server().await;

    let resp = app.get("/mahasiswa", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.unwrap();
    assert!(body.contains("Data Mahasiswa Kosong"));
    assert!(body.contains("/mahasiswa/tambah"));
}

#[tokio::test]
async fn create_form_is_empty() {
    let app = start_server().await;

    let resp = app.get("/mahasiswa/tambah", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.unwrap();
    assert!(body.contains(r#"name="nama" value="""#));
    assert!(!body.contains("Tidak Boleh Kosong"));
}

#[tokio::test]
async fn detail_and_edit_pages() {
    let app = start_server().await;
    app.create("Awi", "123", "A").await;

    let body = app.get("/mahasiswa/123", None).await.text().await.unwrap();
    assert!(body.contains("Awi"));

    let resp = app.get("/mahasiswa/edit/123", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.unwrap();
    assert!(body.contains(r#"name="oldNim" value="123""#));
    assert!(body.contains(r#"name="_id""#));
}

#[tokio::test]
async fn missing_record_pages_are_404() {
    let app = start_server().await;

    assert_eq!(
        app.get("/mahasiswa/999", None).await.status(),
        StatusCode::NOT_FOUND
    );
    assert_eq!(
        app.get("/mahasiswa/edit/999", None).await.status(),
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn health_reports_count() {
    let app = start_server().await;
    app.create("Awi", "123", "A").await;

    let resp = app.get("/health", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["ok"], true);
    assert_eq!(body["students"], 1);
}

#[tokio::test]
async fn stored_markup_is_escaped() {
    let app = start_server().await;
    app.create("<script>alert(1)</script>", "1", "A").await;

    let body = app.get("/mahasiswa", None).await.text().await.unwrap();
    assert!(!body.contains("<script>alert(1)</script>"));
    assert!(body.contains("&lt;script&gt;"));
}
