use std::sync::Arc;
use std::time::Duration;

use mahasiswa::{AppContext, InMemoryDocumentStore, DEFAULT_FLASH_TTL, SESSION_COOKIE};
use reqwest::header::{COOKIE, LOCATION, SET_COOKIE};
use reqwest::{Client, Response, StatusCode};

pub struct TestApp {
    pub base: String,
    pub client: Client,
}

/// Bind to port 0 and return a handle with the actual address.
pub async fn start_server() -> TestApp {
    start_server_with_ttl(DEFAULT_FLASH_TTL).await
}

pub async fn start_server_with_ttl(ttl: Duration) -> TestApp {
    let ctx = Arc::new(AppContext::new(InMemoryDocumentStore::new(), ttl));
    let app = mahasiswa::web::router(ctx);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let client = Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap();

    TestApp {
        base: format!("http://{addr}"),
        client,
    }
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    pub async fn get(&self, path: &str, cookie: Option<&str>) -> Response {
        let mut request = self.client.get(self.url(path));
        if let Some(cookie) = cookie {
            request = request.header(COOKIE, cookie);
        }
        request.send().await.unwrap()
    }

    pub async fn post_form(
        &self,
        path: &str,
        fields: &[(&str, &str)],
        cookie: Option<&str>,
    ) -> Response {
        let mut request = self.client.post(self.url(path)).form(fields);
        if let Some(cookie) = cookie {
            request = request.header(COOKIE, cookie);
        }
        request.send().await.unwrap()
    }

    /// Create a record through the form endpoint, asserting success.
    pub async fn create(&self, name: &str, nim: &str, class_name: &str) {
        let resp = self
            .post_form(
                "/mahasiswa",
                &[("nama", name), ("nim", nim), ("kelas", class_name)],
                None,
            )
            .await;
        assert_redirect_to_list(&resp);
    }
}

pub fn assert_redirect_to_list(resp: &Response) {
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers()[LOCATION], "/mahasiswa");
}

/// The `name=value` pair of the session cookie set by `resp`.
pub fn session_cookie(resp: &Response) -> String {
    let header = resp
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with(SESSION_COOKIE))
        .expect("session cookie set");
    header.split(';').next().unwrap().to_string()
}
