use std::error::Error;
use std::sync::Arc;

use axum::routing::get;
use axum_prometheus::PrometheusMetricLayer;

use video_collection::config::Settings;
use video_collection::db::init_db;
use video_collection::routes::create_router;
use video_collection::telemetry::init_tracing;
use video_collection::InnerState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenv::dotenv().ok();

    init_tracing();

    let settings = Settings::from_env()?;
    let db = init_db(&settings).await?;

    let (prometheus_layer, metric_handle) = PrometheusMetricLayer::pair();

    let listen_addr = settings.listen_addr.clone();
    let app_state = InnerState {
        db,
        settings: Arc::new(settings),
    };

    let app = create_router(app_state)
        .route("/metrics", get(|| async move { metric_handle.render() }))
        .layer(prometheus_layer);

    let listener = tokio::net::TcpListener::bind(&listen_addr).await?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
