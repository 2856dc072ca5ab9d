use std::sync::Arc;

use uuid::Uuid;

use crate::{
    models::{decode_movie_page, Catalog},
    output::Console,
    services::providers::MovieProvider,
};

/// Identifier printed by a pipeline when it starts
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PipelineId(pub Uuid);

impl PipelineId {
    /// Creates a new random pipeline ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PipelineId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for PipelineId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Movie list endpoint family read by one pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feed {
    Popular,
    NowPlaying,
}

impl Feed {
    /// Heading used when the feed's catalog is rendered
    pub fn heading(&self) -> &'static str {
        match self {
            Feed::Popular => "POPULAR",
            Feed::NowPlaying => "NOW PLAYING",
        }
    }

    /// Line printed when the feed's pipeline starts
    pub fn announcement(&self, id: PipelineId) -> String {
        match self {
            Feed::Popular => format!("Popular movies task ID: {}", id),
            Feed::NowPlaying => format!("Now playing movies task ID: {}", id),
        }
    }

    /// Fetches one page of this feed
    pub async fn fetch_page(&self, provider: &dyn MovieProvider, page: u32) -> String {
        match self {
            Feed::Popular => provider.get_popular(page).await,
            Feed::NowPlaying => provider.get_now_playing(page).await,
        }
    }
}

/// Decodes `body` and appends its movies to `catalog`
///
/// Returns the number of movies added; an undecodable page adds none.
pub fn append_page(catalog: &mut Catalog, body: &str) -> usize {
    // Failed requests already reported themselves
    if body.is_empty() {
        return 0;
    }

    match decode_movie_page(body) {
        Ok(records) => {
            let added = records.len();
            catalog.extend(records);
            added
        }
        Err(e) => {
            tracing::warn!(error = %e, kind = e.kind(), "Skipping undecodable page");
            0
        }
    }
}

/// Reads pages `1..=pages` of `feed` sequentially into a fresh catalog
///
/// The catalog is owned by this pipeline and handed back to the caller when
/// it completes; nothing else writes to it.
pub async fn run_pipeline(
    provider: Arc<dyn MovieProvider>,
    console: Arc<Console>,
    feed: Feed,
    pages: u32,
) -> Catalog {
    let id = PipelineId::new();
    if let Err(e) = console.line(&feed.announcement(id)) {
        tracing::warn!(error = %e, "Failed to write pipeline announcement");
    }

    let mut catalog = Catalog::new();
    for page in 1..=pages {
        let body = feed.fetch_page(provider.as_ref(), page).await;
        let added = append_page(&mut catalog, &body);
        tracing::debug!(
            pipeline = %id,
            feed = feed.heading(),
            page,
            added,
            provider = provider.name(),
            "Page processed"
        );
    }

    tracing::info!(
        pipeline = %id,
        feed = feed.heading(),
        movies = catalog.len(),
        "Pipeline finished"
    );

    catalog
}
