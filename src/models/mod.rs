use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

pub mod catalog;

pub use catalog::Catalog;

const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

/// A single movie entry held by a catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieRecord {
    title: String,
    rating: f64,
}

impl MovieRecord {
    /// Creates a record, treating a non-finite rating as 0
    pub fn new(title: impl Into<String>, rating: f64) -> Self {
        Self {
            title: title.into(),
            rating: if rating.is_finite() { rating } else { 0.0 },
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn rating(&self) -> f64 {
        self.rating
    }
}

// ============================================================================
// TMDB API Types
// ============================================================================

/// Entry of the `results` array returned by /movie/popular and /movie/now_playing
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovie {
    pub title: String,
    pub vote_average: f64,
}

impl From<TmdbMovie> for MovieRecord {
    fn from(movie: TmdbMovie) -> Self {
        MovieRecord::new(movie.title, movie.vote_average)
    }
}

/// Response from GET /movie/{id}
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct MovieDetails {
    pub id: u64,
    pub title: String,
    pub vote_average: f64,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub poster_path: Option<String>,
}

impl MovieDetails {
    /// Full poster URL at w500, if TMDB knows a poster
    pub fn poster_url(&self) -> Option<String> {
        self.poster_path
            .as_deref()
            .map(|path| format!("{}{}", IMAGE_BASE_URL, path))
    }
}

/// Decodes one list page into records, in array order
///
/// Elements missing `title` or `vote_average` (or with the wrong types, or an
/// empty title) are skipped. A body without a `results` array is rejected.
pub fn decode_movie_page(body: &str) -> AppResult<Vec<MovieRecord>> {
    let page: serde_json::Value = serde_json::from_str(body)?;
    let results = page["results"]
        .as_array()
        .ok_or_else(|| AppError::Schema("missing `results` array".to_string()))?;

    let records: Vec<MovieRecord> = results
        .iter()
        .filter_map(|result| serde_json::from_value::<TmdbMovie>(result.clone()).ok())
        .filter(|movie| !movie.title.is_empty())
        .map(MovieRecord::from)
        .collect();

    if records.len() < results.len() {
        tracing::debug!(
            skipped = results.len() - records.len(),
            kept = records.len(),
            "Skipped malformed movie entries"
        );
    }

    Ok(records)
}

/// Decodes the body returned for a single movie
pub fn decode_movie_details(body: &str) -> AppResult<MovieDetails> {
    Ok(serde_json::from_str(body)?)
}
