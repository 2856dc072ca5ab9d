/// The Movie Database (TMDB) v3 provider
///
/// Endpoints used:
/// 1. /movie/popular?api_key=..&language=..&page=N
/// 2. /movie/now_playing?api_key=..&language=..&page=N
/// 3. /movie/{id}?api_key=..
///
/// Transport failures (connection errors and non-2xx statuses alike) are
/// reported on stderr and turned into an empty body.
use crate::{
    error::{AppError, AppResult},
    services::providers::MovieProvider,
};
use reqwest::{Client as HttpClient, RequestBuilder};

#[derive(Clone)]
pub struct TmdbProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    language: String,
}

impl TmdbProvider {
    /// Creates a provider for the given key and base URL
    ///
    /// The base URL is used as a prefix for endpoint paths, so a missing
    /// trailing slash is added.
    pub fn new(api_key: String, api_url: String, language: String) -> Self {
        let api_url = if api_url.ends_with('/') {
            api_url
        } else {
            format!("{}/", api_url)
        };

        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url,
            language,
        }
    }

    /// Builds the request for a paginated movie list endpoint
    fn list_request(&self, path: &str, page: u32) -> AppResult<RequestBuilder> {
        if page == 0 {
            return Err(AppError::InvalidInput("page numbers start at 1".to_string()));
        }

        let url = format!("{}{}", self.api_url, path);
        let page = page.to_string();
        Ok(self.http_client.get(&url).query(&[
            ("api_key", self.api_key.as_str()),
            ("language", self.language.as_str()),
            ("page", page.as_str()),
        ]))
    }

    /// Builds the request for a single movie
    fn details_request(&self, id: &str) -> RequestBuilder {
        let url = format!("{}movie/{}", self.api_url, id);
        self.http_client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
    }

    /// Sends a request and returns the body of a successful response
    async fn send(&self, request: RequestBuilder) -> AppResult<String> {
        // The URL carries the API key, so it is stripped from client errors
        let response = request
            .send()
            .await
            .map_err(|e| AppError::HttpClient(e.without_url()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "TMDB API returned status {}: {}",
                status, body
            )));
        }

        response
            .text()
            .await
            .map_err(|e| AppError::HttpClient(e.without_url()))
    }

    /// Runs a request, reporting any failure and falling back to an empty body
    async fn fetch_body(&self, endpoint: &str, request: AppResult<RequestBuilder>) -> String {
        let result = match request {
            Ok(request) => self.send(request).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(body) => {
                tracing::debug!(
                    endpoint = %endpoint,
                    bytes = body.len(),
                    provider = "tmdb",
                    "Request completed"
                );
                body
            }
            Err(e) => {
                eprintln!("Request failed, error: {}", e);
                tracing::warn!(
                    endpoint = %endpoint,
                    error = %e,
                    kind = e.kind(),
                    provider = "tmdb",
                    "Request failed"
                );
                String::new()
            }
        }
    }
}

#[async_trait::async_trait]
impl MovieProvider for TmdbProvider {
    async fn get_popular(&self, page: u32) -> String {
        let request = self.list_request("movie/popular", page);
        self.fetch_body("movie/popular", request).await
    }

    async fn get_now_playing(&self, page: u32) -> String {
        let request = self.list_request("movie/now_playing", page);
        self.fetch_body("movie/now_playing", request).await
    }

    async fn get_movie_details(&self, id: &str) -> String {
        let request = self.details_request(id);
        self.fetch_body("movie/{id}", Ok(request)).await
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}
