use axum::extract::State;
use axum::response::Html;

use crate::{templates, InnerState};

#[tracing::instrument(name = "Home page", skip(inner))]
pub async fn home(State(inner): State<InnerState>) -> Html<String> {
    Html(templates::home_page(&inner.settings.app_name))
}
