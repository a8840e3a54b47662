use axum::extract::{Query, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;

use crate::errors::AppError;
use crate::forms::{FormErrors, SearchForm, VideoForm};
use crate::templates::{self, Message};
use crate::utils::{timeout_query, with_timeout};
use crate::videos::{self, SaveError};
use crate::InnerState;

pub const INVALID_URL_MESSAGE: &str = "Invalid Youtube URL";
pub const DUPLICATE_VIDEO_MESSAGE: &str = "Duplicate video, video was already added before";
pub const CHECK_DATA_MESSAGE: &str = "Please check data entered.";

pub async fn add_video_form() -> Html<String> {
    Html(templates::add_page(&VideoForm::default(), &FormErrors::default(), &[]))
}

#[tracing::instrument(name = "Add video", skip(inner, fields))]
pub async fn add_video(
    State(inner): State<InnerState>,
    Form(fields): Form<Vec<(String, String)>>,
) -> Result<Response, AppError> {
    let InnerState { db, settings } = inner;
    let form: VideoForm = fields.into_iter().collect();

    let mut messages = Vec::new();
    let mut errors = FormErrors::default();

    match form.validate() {
        Ok(new_video) => {
            let saved = with_timeout(settings.query_timeout, videos::create(&db, &new_video)).await?;

            match saved {
                Ok(video) => {
                    tracing::info!(id = video.id, video_id = %video.video_id, "Video added");
                    return Ok(Redirect::to("/video_list").into_response());
                }
                Err(SaveError::InvalidUrl(reason)) => {
                    tracing::debug!(url = %new_video.url, %reason, "Rejected video URL");
                    messages.push(Message::warning(INVALID_URL_MESSAGE));
                }
                Err(SaveError::DuplicateVideoId(video_id)) => {
                    tracing::debug!(%video_id, "Video was already added");
                    messages.push(Message::warning(DUPLICATE_VIDEO_MESSAGE));
                }
                Err(SaveError::Database(e)) => return Err(e.into()),
            }
        }
        Err(form_errors) => errors = form_errors,
    }

    messages.push(Message::warning(CHECK_DATA_MESSAGE));

    Ok(Html(templates::add_page(&form, &errors, &messages)).into_response())
}

#[tracing::instrument(name = "Video list", skip(inner, params))]
pub async fn video_list(
    State(inner): State<InnerState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Html<String>, AppError> {
    let InnerState { db, settings } = inner;
    let search: SearchForm = params.into_iter().collect();
    let search_term = search.term();

    let videos = timeout_query(settings.query_timeout, videos::list(&db, search_term)).await?;

    tracing::debug!(count = videos.len(), search_term = ?search_term, "Listing videos");

    Ok(Html(templates::video_list_page(&videos, search_term)))
}
