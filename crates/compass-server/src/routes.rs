//! Page handlers
//!
//! Each route maps 1:1 onto a [`CompanyStore`] operation; create and update
//! redirect back to the listing on success. Handlers never know which
//! backend they are talking to.

use crate::error::PageError;
use crate::session::SessionId;
use crate::{pages, AppState};
use axum::extract::{Path, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::{Extension, Form};
use compass_core::Company;
use serde::Deserialize;

/// `GET /` — the company listing
pub(crate) async fn list_companies(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
) -> Result<Html<String>, PageError> {
    let store = state.store_for(session)?;
    let companies = store.list()?;
    Ok(Html(pages::listing(&companies, state.mode().is_demo())))
}

/// `GET /add` — blank form
pub(crate) async fn add_form(State(state): State<AppState>) -> Html<String> {
    Html(pages::company_form(None, None, state.mode().is_demo()))
}

/// `GET /edit/{id}` — form pre-filled from the store
pub(crate) async fn edit_form(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
    Path(id): Path<i64>,
) -> Result<Html<String>, PageError> {
    let store = state.store_for(session)?;
    let company = store.get(id)?;
    Ok(Html(pages::company_form(
        Some(&company),
        None,
        state.mode().is_demo(),
    )))
}

/// Form body for `POST /save`; an empty `id` means "create"
#[derive(Debug, Deserialize)]
pub(crate) struct CompanyForm {
    #[serde(default)]
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    location: String,
}

/// `POST /save` — add when no id is posted, update otherwise
pub(crate) async fn save_company(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
    Form(form): Form<CompanyForm>,
) -> Result<Response, PageError> {
    let store = state.store_for(session)?;

    let mut company = Company::new(&form.name, &form.location);
    company.id = form.id.trim().parse::<i64>().ok();

    // The store accepts anything; requiring a name is the form's job
    if company.name().is_empty() {
        let html = pages::company_form(
            Some(&company),
            Some("A company name is required."),
            state.mode().is_demo(),
        );
        return Ok((axum::http::StatusCode::UNPROCESSABLE_ENTITY, Html(html)).into_response());
    }

    match company.id {
        Some(_) => store.update(&company)?,
        None => store.add(&company)?,
    }
    Ok(Redirect::to("/").into_response())
}

/// `GET /delete/{id}` — remove, then back to the listing
pub(crate) async fn delete_company(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
    Path(id): Path<i64>,
) -> Result<Redirect, PageError> {
    let store = state.store_for(session)?;
    store.delete(id)?;
    Ok(Redirect::to("/"))
}

/// `GET /about`
pub(crate) async fn about_page(State(state): State<AppState>) -> Html<String> {
    Html(pages::about(state.mode().is_demo()))
}

/// `GET /contact`
pub(crate) async fn contact_page(State(state): State<AppState>) -> Html<String> {
    Html(pages::contact(state.mode().is_demo()))
}
