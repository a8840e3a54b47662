pub(crate) mod health_check;
mod home;
mod videos;

pub use health_check::*;
pub use home::*;
pub use videos::*;

use axum::body::Body;
use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::telemetry;
use crate::InnerState;

/// Builds the application router with request tracing attached.
#[tracing::instrument(name = "create_router", skip(state))]
pub fn create_router(state: InnerState) -> Router {
    tracing::info!("Creating application router");

    Router::new()
        .route("/", get(home))
        .route("/add", get(add_video_form).post(add_video))
        .route("/video_list", get(video_list))
        .route("/health", get(health_check))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(telemetry::make_span::<Body>)
                .on_request(telemetry::on_request::<Body>)
                .on_response(telemetry::on_response::<Body>)
                .on_failure(telemetry::on_failure),
        )
        .with_state(state)
}
