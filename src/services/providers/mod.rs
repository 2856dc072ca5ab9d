/// Movie metadata provider abstraction
///
/// A provider only performs transport: every operation returns the raw response
/// body, and decoding happens in the caller. A failed request yields an empty
/// body after a diagnostic has been written to stderr.
use async_trait::async_trait;

pub mod tmdb;

pub use tmdb::TmdbProvider;

/// Trait for remote movie metadata services
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MovieProvider: Send + Sync {
    /// Raw body of one page (1-based) of popular movies
    async fn get_popular(&self, page: u32) -> String;

    /// Raw body of one page (1-based) of movies now in theatres
    async fn get_now_playing(&self, page: u32) -> String;

    /// Raw body of the details of a single movie
    async fn get_movie_details(&self, id: &str) -> String;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
