use url::Url;

/// Every accepted URL starts with exactly this text.
pub const WATCH_URL_PREFIX: &str = "https://www.youtube.com/watch";

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum VideoIdError {
    #[error("Not a YouTube URL")]
    NotYoutubeUrl,

    #[error("Invalid YouTube URL")]
    InvalidYoutubeUrl,

    #[error("URL does not contain a video ID parameter")]
    MissingVideoIdParameter,
}

/// Extracts the video identifier from the `v` query parameter of a YouTube
/// watch URL.
///
/// The query string is parsed strictly: a pair without `=`, with an empty key
/// or with an empty value rejects the whole URL.
pub fn extract_video_id(url: &str) -> Result<String, VideoIdError> {
    if !url.starts_with(WATCH_URL_PREFIX) {
        return Err(VideoIdError::NotYoutubeUrl);
    }

    let parsed = Url::parse(url).map_err(|_| VideoIdError::InvalidYoutubeUrl)?;

    let query = match parsed.query() {
        Some(query) if !query.is_empty() => query,
        _ => return Err(VideoIdError::InvalidYoutubeUrl),
    };

    let pairs = parse_query_strict(query)?;

    pairs
        .into_iter()
        .find(|(key, _)| key == "v")
        .map(|(_, value)| value)
        .ok_or(VideoIdError::MissingVideoIdParameter)
}

fn parse_query_strict(query: &str) -> Result<Vec<(String, String)>, VideoIdError> {
    let well_formed = query.split('&').all(|pair| match pair.split_once('=') {
        Some((key, value)) => !key.is_empty() && !value.is_empty(),
        None => false,
    });

    if !well_formed {
        return Err(VideoIdError::InvalidYoutubeUrl);
    }

    serde_urlencoded::from_str::<Vec<(String, String)>>(query)
        .map_err(|_| VideoIdError::InvalidYoutubeUrl)
}
