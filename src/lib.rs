pub mod config;
pub mod db;
pub mod errors;
pub mod forms;
pub mod routes;
pub mod telemetry;
pub mod templates;
pub mod utils;
pub mod videos;
pub mod youtube;

use sqlx::SqlitePool;
use std::sync::Arc;

use crate::config::Settings;

#[derive(Clone)]
pub struct InnerState {
    pub db: SqlitePool,
    pub settings: Arc<Settings>,
}
