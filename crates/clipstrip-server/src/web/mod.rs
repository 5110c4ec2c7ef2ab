//! HTML form front-end: `GET /` shows the form, `POST /` resolves the pasted link.

mod page;

use axum::{extract::State, response::Html, Form};
use serde::Deserialize;

use crate::api::AppState;
use page::{render_page, PageView};

#[derive(Debug, Deserialize)]
pub(crate) struct ResolveForm {
    #[serde(default)]
    url: String,
}

pub(crate) async fn form_page() -> Html<String> {
    Html(render_page(&PageView::default()))
}

pub(crate) async fn submit_form(
    State(state): State<AppState>,
    Form(form): Form<ResolveForm>,
) -> Html<String> {
    let resolution = state.resolver.resolve(&form.url).await;
    Html(render_page(&PageView::from_resolution(&resolution)))
}
