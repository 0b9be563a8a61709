//! HTTP surface - server-rendered pages for browsing and editing students.
//!
//! Requires the `http` feature. Uses axum for routing.
//!
//! ## Routes
//!
//! - `GET /`: landing page with a fixed sample list.
//! - `GET /profile`: static page.
//! - `GET /health`: `{ "ok": true, "students": <count> }`.
//! - `GET /mahasiswa`: list, with pending flash notices.
//! - `GET /mahasiswa/tambah`: empty create form.
//! - `POST /mahasiswa`: create; `?_method=PUT` / `?_method=DELETE` reroute
//!   HTML form submissions to update / delete; any other override is 404.
//! - `PUT /mahasiswa`: update.
//! - `DELETE /mahasiswa`: delete by `nim`.
//! - `GET /mahasiswa/edit/:nim`: edit form.
//! - `GET /mahasiswa/:nim`: detail page.
//!
//! Anything else answers `404 Not Found`.

mod error;
mod handlers;
pub mod views;

use std::future::Future;
use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;

use crate::context::AppContext;
use crate::document::DocumentStore;

pub use error::WebError;

pub const NOTICE_ADDED: &str = "Data Mahasiswa Berhasil Ditambahkan";
pub const NOTICE_EDITED: &str = "Data Mahasiswa Berhasil Diedit";
pub const NOTICE_DELETED: &str = "Data Mahasiswa Berhasil Dihapus";

/// Build the application `Router` over the given context.
pub fn router<S: DocumentStore + 'static>(ctx: Arc<AppContext<S>>) -> Router {
    Router::new()
        .route("/", get(handlers::home))
        .route("/profile", get(handlers::profile))
        .route("/health", get(handlers::health::<S>))
        .route(
            "/mahasiswa",
            get(handlers::list::<S>)
                .post(handlers::submit::<S>)
                .put(handlers::update::<S>)
                .delete(handlers::remove::<S>),
        )
        .route("/mahasiswa/tambah", get(handlers::create_form))
        .route("/mahasiswa/edit/:nim", get(handlers::edit_form::<S>))
        .route("/mahasiswa/:nim", get(handlers::detail::<S>))
        .fallback(handlers::not_found)
        .with_state(ctx)
}

/// Serve the application on `listener` until `shutdown` resolves.
///
/// In-flight requests are allowed to finish before this returns.
pub async fn serve<S, F>(
    ctx: Arc<AppContext<S>>,
    listener: TcpListener,
    shutdown: F,
) -> Result<(), std::io::Error>
where
    S: DocumentStore + 'static,
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, router(ctx))
        .with_graceful_shutdown(shutdown)
        .await
}
