//! The `Video` entity and its store.
//!
//! Every write goes through [`create`] or [`update`], which derive the
//! `video_id` from the URL before touching the database. A URL that does not
//! yield an identifier aborts the write, so no row ever holds a stale or
//! missing `video_id`.

use sqlx::{FromRow, SqlitePool};
use std::fmt;

use crate::youtube::{extract_video_id, VideoIdError};

pub const MAX_NAME_LENGTH: usize = 200;
pub const MAX_URL_LENGTH: usize = 400;
pub const MAX_VIDEO_ID_LENGTH: usize = 40;

const VIDEO_COLUMNS: &str = "id, name, url, notes, video_id";

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Video {
    pub id: i64,
    pub name: String,
    pub url: String,
    pub notes: Option<String>,
    pub video_id: String,
}

impl Video {
    pub fn embed_url(&self) -> String {
        format!("https://www.youtube.com/embed/{}", self.video_id)
    }
}

impl fmt::Display for Video {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let notes: String = self
            .notes
            .as_deref()
            .unwrap_or_default()
            .chars()
            .take(200)
            .collect();
        write!(
            f,
            "ID: {}, Name: {}, URL: {}, Notes: {}",
            self.id, self.name, self.url, notes
        )
    }
}

/// User-supplied fields of a video. `video_id` is never part of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVideo {
    pub name: String,
    pub url: String,
    pub notes: Option<String>,
}

#[derive(thiserror::Error, Debug)]
pub enum SaveError {
    #[error("Invalid video URL: {0}")]
    InvalidUrl(#[from] VideoIdError),

    #[error("Duplicate video ID: {0}")]
    DuplicateVideoId(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

fn derive_video_id(url: &str) -> Result<String, SaveError> {
    let video_id = extract_video_id(url)?;

    // The column is capped; an identifier that cannot be stored is treated
    // like any other unusable URL.
    if video_id.chars().count() > MAX_VIDEO_ID_LENGTH {
        return Err(SaveError::InvalidUrl(VideoIdError::InvalidYoutubeUrl));
    }

    Ok(video_id)
}

fn map_write_error(err: sqlx::Error, video_id: &str) -> SaveError {
    match err {
        sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
            SaveError::DuplicateVideoId(video_id.to_string())
        }
        other => SaveError::Database(other),
    }
}

/// Validates the URL, then inserts the video in its own transaction.
#[tracing::instrument(name = "Create video", skip(db, video), fields(url = %video.url))]
pub async fn create(db: &SqlitePool, video: &NewVideo) -> Result<Video, SaveError> {
    let video_id = derive_video_id(&video.url)?;

    let mut tx = db.begin().await?;

    let created = sqlx::query_as::<_, Video>(&format!(
        "INSERT INTO videos (name, url, notes, video_id) VALUES (?, ?, ?, ?) RETURNING {}",
        VIDEO_COLUMNS
    ))
    .bind(&video.name)
    .bind(&video.url)
    .bind(&video.notes)
    .bind(&video_id)
    .fetch_one(&mut *tx)
    .await
    .map_err(|e| map_write_error(e, &video_id))?;

    tx.commit().await?;

    tracing::debug!("Created {}", created);
    Ok(created)
}

/// Replaces the user-supplied fields of an existing video and re-derives its
/// `video_id` from the new URL.
#[tracing::instrument(name = "Update video", skip(db, video), fields(url = %video.url))]
pub async fn update(db: &SqlitePool, id: i64, video: &NewVideo) -> Result<Video, SaveError> {
    let video_id = derive_video_id(&video.url)?;

    let mut tx = db.begin().await?;

    let updated = sqlx::query_as::<_, Video>(&format!(
        "UPDATE videos SET name = ?, url = ?, notes = ?, video_id = ? WHERE id = ? RETURNING {}",
        VIDEO_COLUMNS
    ))
    .bind(&video.name)
    .bind(&video.url)
    .bind(&video.notes)
    .bind(&video_id)
    .bind(id)
    .fetch_optional(&mut *tx)
    .await
    .map_err(|e| map_write_error(e, &video_id))?
    .ok_or(SaveError::Database(sqlx::Error::RowNotFound))?;

    tx.commit().await?;

    tracing::debug!("Updated {}", updated);
    Ok(updated)
}

/// Lists videos ordered by case-insensitive name, oldest first on ties. With
/// a search term only names containing it (ignoring case) are returned.
pub async fn list(db: &SqlitePool, search_term: Option<&str>) -> Result<Vec<Video>, sqlx::Error> {
    match search_term {
        Some(term) => {
            sqlx::query_as::<_, Video>(&format!(
                "SELECT {} FROM videos WHERE instr(lower(name), lower(?)) > 0 ORDER BY lower(name), id",
                VIDEO_COLUMNS
            ))
            .bind(term)
            .fetch_all(db)
            .await
        }
        None => {
            sqlx::query_as::<_, Video>(&format!(
                "SELECT {} FROM videos ORDER BY lower(name), id",
                VIDEO_COLUMNS
            ))
            .fetch_all(db)
            .await
        }
    }
}

#[cfg(test)]
pub(crate) async fn find(db: &SqlitePool, id: i64) -> Result<Option<Video>, sqlx::Error> {
    sqlx::query_as::<_, Video>(&format!("SELECT {} FROM videos WHERE id = ?", VIDEO_COLUMNS))
        .bind(id)
        .fetch_optional(db)
        .await
}

#[cfg(test)]
pub(crate) async fn count(db: &SqlitePool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM videos")
        .fetch_one(db)
        .await
}
