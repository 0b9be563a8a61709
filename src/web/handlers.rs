//! Request handlers.
//!
//! Successful writes redirect to the list and queue a flash notice for the
//! caller's session; validation failures render the same form again with the
//! submitted values and field errors.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::{Form, Json};
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;

use super::error::WebError;
use super::views;
use super::{NOTICE_ADDED, NOTICE_DELETED, NOTICE_EDITED};
use crate::context::AppContext;
use crate::document::DocumentStore;
use crate::session::Session;
use crate::student::{ServiceError, StudentForm};
use crate::validation::ValidationErrors;

type Ctx<S> = State<Arc<AppContext<S>>>;

/// `?_method=` override used by HTML forms, which can only POST.
#[derive(Debug, Default, Deserialize)]
pub struct MethodOverride {
    #[serde(rename = "_method")]
    pub method: Option<String>,
}

/// `GET /`
pub async fn home() -> Html<String> {
    Html(views::home(&[("Awi", "A"), ("Muiz", "A")]))
}

/// `GET /profile`
pub async fn profile() -> Html<String> {
    Html(views::profile())
}

/// `GET /health`
pub async fn health<S: DocumentStore + 'static>(
    State(ctx): Ctx<S>,
) -> Result<Json<serde_json::Value>, WebError> {
    let students = ctx.service().count()?;
    Ok(Json(json!({ "ok": true, "students": students })))
}

/// `GET /mahasiswa`
#[instrument(skip_all)]
pub async fn list<S: DocumentStore + 'static>(
    State(ctx): Ctx<S>,
    headers: HeaderMap,
) -> Result<Html<String>, WebError> {
    let session = session_from_headers(&headers);
    let students = ctx.service().list()?;
    let notices = if session.is_fresh() {
        Vec::new()
    } else {
        ctx.flash().take(session.id())
    };
    Ok(Html(views::student_list(&students, &notices)))
}

/// `GET /mahasiswa/tambah`
pub async fn create_form() -> Html<String> {
    Html(views::create_form(
        &StudentForm::default(),
        &ValidationErrors::new(),
    ))
}

/// `GET /mahasiswa/edit/:nim`
#[instrument(skip_all, fields(nim = %nim))]
pub async fn edit_form<S: DocumentStore + 'static>(
    State(ctx): Ctx<S>,
    Path(nim): Path<String>,
) -> Result<Html<String>, WebError> {
    let student = ctx.service().get(&nim)?;
    Ok(Html(views::edit_form(
        &StudentForm::from_student(&student),
        &ValidationErrors::new(),
    )))
}

/// `GET /mahasiswa/:nim`
#[instrument(skip_all, fields(nim = %nim))]
pub async fn detail<S: DocumentStore + 'static>(
    State(ctx): Ctx<S>,
    Path(nim): Path<String>,
) -> Result<Html<String>, WebError> {
    let student = ctx.service().get(&nim)?;
    Ok(Html(views::detail(&student)))
}

/// `POST /mahasiswa`, honouring `?_method=PUT|DELETE`.
#[instrument(skip_all, fields(method = ?method_override.method))]
pub async fn submit<S: DocumentStore + 'static>(
    State(ctx): Ctx<S>,
    Query(method_override): Query<MethodOverride>,
    headers: HeaderMap,
    Form(form): Form<StudentForm>,
) -> Result<Response, WebError> {
    let method = method_override
        .method
        .as_deref()
        .map(str::to_ascii_uppercase);

    match method.as_deref() {
        None => apply_create(&ctx, &headers, form),
        Some("PUT") => apply_update(&ctx, &headers, form),
        Some("DELETE") => apply_delete(&ctx, &headers, form),
        Some(_) => Ok(not_found().await.into_response()),
    }
}

/// `PUT /mahasiswa`
#[instrument(skip_all)]
pub async fn update<S: DocumentStore + 'static>(
    State(ctx): Ctx<S>,
    headers: HeaderMap,
    Form(form): Form<StudentForm>,
) -> Result<Response, WebError> {
    apply_update(&ctx, &headers, form)
}

/// `DELETE /mahasiswa`
#[instrument(skip_all)]
pub async fn remove<S: DocumentStore + 'static>(
    State(ctx): Ctx<S>,
    headers: HeaderMap,
    Form(form): Form<StudentForm>,
) -> Result<Response, WebError> {
    apply_delete(&ctx, &headers, form)
}

/// Unmatched routes.
pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "404 Not Found")
}

fn apply_create<S: DocumentStore>(
    ctx: &AppContext<S>,
    headers: &HeaderMap,
    form: StudentForm,
) -> Result<Response, WebError> {
    match ctx.service().create(&form) {
        Ok(_) => Ok(redirect_with_notice(ctx, headers, NOTICE_ADDED)),
        Err(ServiceError::Invalid(errors)) => {
            Ok(Html(views::create_form(&form, &errors)).into_response())
        }
        Err(err) => Err(err.into()),
    }
}

fn apply_update<S: DocumentStore>(
    ctx: &AppContext<S>,
    headers: &HeaderMap,
    form: StudentForm,
) -> Result<Response, WebError> {
    let id = form.id.clone().unwrap_or_default();
    let old_nim = form.old_nim.clone().unwrap_or_default();

    match ctx.service().update(&id, &old_nim, &form) {
        Ok(_) => Ok(redirect_with_notice(ctx, headers, NOTICE_EDITED)),
        Err(ServiceError::Invalid(errors)) => {
            Ok(Html(views::edit_form(&form, &errors)).into_response())
        }
        Err(err) => Err(err.into()),
    }
}

fn apply_delete<S: DocumentStore>(
    ctx: &AppContext<S>,
    headers: &HeaderMap,
    form: StudentForm,
) -> Result<Response, WebError> {
    ctx.service().delete(&form.nim)?;
    Ok(redirect_with_notice(ctx, headers, NOTICE_DELETED))
}

/// Queue `notice` for the caller's session and redirect to the list.
fn redirect_with_notice<S: DocumentStore>(
    ctx: &AppContext<S>,
    headers: &HeaderMap,
    notice: &str,
) -> Response {
    let session = session_from_headers(headers);
    ctx.flash().push(session.id(), notice);

    let mut response = Redirect::to("/mahasiswa").into_response();
    if let Some(cookie) = session.set_cookie() {
        if let Ok(value) = HeaderValue::from_str(&cookie) {
            response.headers_mut().append(SET_COOKIE, value);
        }
    }
    response
}

/// Resolve the session from every `Cookie` header on the request.
fn session_from_headers(headers: &HeaderMap) -> Session {
    let cookies: Vec<&str> = headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .collect();

    if cookies.is_empty() {
        Session::new()
    } else {
        Session::from_cookie_header(Some(&cookies.join("; ")))
    }
}
