use std::io::Write;
use std::sync::Arc;

use regex::Regex;

use crate::{
    config::Config,
    error::{AppError, AppResult},
    models::{Catalog, MovieRecord},
    output::{render, render_matches, Console, SortOrder},
    services::{
        pipeline::{run_pipeline, Feed},
        providers::{MovieProvider, TmdbProvider},
    },
};

/// Parameters of a single run
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub popular_pages: u32,
    pub now_playing_pages: u32,
    pub match_pattern: Regex,
}

impl RunSettings {
    pub fn new(
        popular_pages: u32,
        now_playing_pages: u32,
        match_pattern: &str,
    ) -> AppResult<Self> {
        Ok(Self {
            popular_pages,
            now_playing_pages,
            match_pattern: Regex::new(match_pattern)?,
        })
    }

    pub fn from_config(config: &Config) -> AppResult<Self> {
        Self::new(
            config.popular_pages,
            config.now_playing_pages,
            &config.match_pattern,
        )
    }
}

/// What a run produced, after everything was printed
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub popular: Catalog,
    pub now_playing: Catalog,
    pub matches: Vec<MovieRecord>,
}

/// Fetches both feeds concurrently, renders them and scans popular titles
pub struct Application {
    provider: Arc<dyn MovieProvider>,
    console: Arc<Console>,
    settings: RunSettings,
}

impl Application {
    pub fn new(
        provider: Arc<dyn MovieProvider>,
        console: Arc<Console>,
        settings: RunSettings,
    ) -> Self {
        Self {
            provider,
            console,
            settings,
        }
    }

    /// Builds the TMDB-backed application writing to stdout
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let provider = TmdbProvider::new(
            config.api_key()?,
            config.tmdb_api_url.clone(),
            config.tmdb_language.clone(),
        );
        let settings = RunSettings::from_config(config)?;

        Ok(Self::new(
            Arc::new(provider),
            Arc::new(Console::stdout()),
            settings,
        ))
    }

    /// Runs fan-out, render, scan and shutdown in order
    ///
    /// Fetch failures never surface here: they leave the affected catalog
    /// short. Only a failure to write to the console is returned.
    pub async fn run(&self) -> AppResult<RunSummary> {
        tracing::info!(provider = self.provider.name(), "Starting fetch pipelines");

        let (popular, now_playing) = self.fetch_all().await;

        tracing::info!(
            popular = popular.len(),
            now_playing = now_playing.len(),
            "Fetch pipelines joined"
        );

        self.render_all(&popular, &now_playing)?;
        let matches = self.scan(&popular)?;
        self.shutdown()?;

        Ok(RunSummary {
            popular,
            now_playing,
            matches,
        })
    }

    /// Runs both pipelines in parallel, each filling its own catalog
    async fn fetch_all(&self) -> (Catalog, Catalog) {
        let popular = tokio::spawn(run_pipeline(
            Arc::clone(&self.provider),
            Arc::clone(&self.console),
            Feed::Popular,
            self.settings.popular_pages,
        ));
        let now_playing = tokio::spawn(run_pipeline(
            Arc::clone(&self.provider),
            Arc::clone(&self.console),
            Feed::NowPlaying,
            self.settings.now_playing_pages,
        ));

        let (popular, now_playing) = tokio::join!(popular, now_playing);
        (
            Self::joined(Feed::Popular, popular),
            Self::joined(Feed::NowPlaying, now_playing),
        )
    }

    fn joined(feed: Feed, result: Result<Catalog, tokio::task::JoinError>) -> Catalog {
        result.unwrap_or_else(|e| {
            let e = AppError::Internal(e.to_string());
            tracing::error!(feed = feed.heading(), error = %e, "Pipeline task failed");
            Catalog::new()
        })
    }

    /// Prints every ordering of each catalog, popular first
    fn render_all(&self, popular: &Catalog, now_playing: &Catalog) -> AppResult<()> {
        for (feed, catalog) in [(Feed::Popular, popular), (Feed::NowPlaying, now_playing)] {
            for order in SortOrder::ALL {
                self.console
                    .write_with(|out| render(out, feed.heading(), catalog, order))
                    .map_err(console_error)?;
            }
        }
        Ok(())
    }

    fn scan(&self, popular: &Catalog) -> AppResult<Vec<MovieRecord>> {
        let matches = popular.matching(&self.settings.match_pattern);
        tracing::debug!(
            pattern = %self.settings.match_pattern,
            matches = matches.len(),
            "Scanned popular titles"
        );

        self.console
            .write_with(|out| render_matches(out, &matches))
            .map_err(console_error)?;
        Ok(matches)
    }

    fn shutdown(&self) -> AppResult<()> {
        self.console
            .write_with(|out| {
                writeln!(out)?;
                writeln!(out, "Bye Bye")
            })
            .map_err(console_error)
    }
}

fn console_error(e: std::io::Error) -> AppError {
    AppError::Internal(format!("failed to write output: {}", e))
}
