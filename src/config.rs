use serde::Deserialize;
use std::path::PathBuf;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// TMDB v3 API key
    #[serde(default)]
    pub tmdb_api_key: String,

    /// Optional JSON file holding the API key, read when `tmdb_api_key` is empty
    #[serde(default)]
    pub tmdb_api_key_file: Option<PathBuf>,

    /// TMDB API base URL
    #[serde(default = "default_tmdb_api_url")]
    pub tmdb_api_url: String,

    /// Language requested from the list endpoints
    #[serde(default = "default_tmdb_language")]
    pub tmdb_language: String,

    /// Number of pages read from /movie/popular
    #[serde(default = "default_popular_pages")]
    pub popular_pages: u32,

    /// Number of pages read from /movie/now_playing
    #[serde(default = "default_now_playing_pages")]
    pub now_playing_pages: u32,

    /// Regex applied to popular titles after rendering
    #[serde(default = "default_match_pattern")]
    pub match_pattern: String,
}

fn default_tmdb_api_url() -> String {
    "https://api.themoviedb.org/3/".to_string()
}

fn default_tmdb_language() -> String {
    "en-US".to_string()
}

fn default_popular_pages() -> u32 {
    5
}

fn default_now_playing_pages() -> u32 {
    1
}

fn default_match_pattern() -> String {
    ".*[dD]es.*".to_string()
}

#[derive(Debug, Deserialize)]
struct ApiKeyFile {
    api_key: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let config = envy::from_env::<Config>()
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values that would make the run meaningless
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.popular_pages == 0 || self.now_playing_pages == 0 {
            anyhow::bail!("Page counts must be at least 1");
        }
        regex::Regex::new(&self.match_pattern)
            .map_err(|e| anyhow::anyhow!("Invalid MATCH_PATTERN: {}", e))?;
        Ok(())
    }

    /// Resolves the API key, falling back to the key file when the variable is empty
    ///
    /// An empty key is returned as-is: requests will then fail at the remote
    /// service and the fetched catalogs stay empty.
    pub fn api_key(&self) -> anyhow::Result<String> {
        if !self.tmdb_api_key.is_empty() {
            return Ok(self.tmdb_api_key.clone());
        }

        let Some(path) = &self.tmdb_api_key_file else {
            tracing::warn!("TMDB_API_KEY is empty; remote requests will be rejected");
            return Ok(String::new());
        };

        let contents = std::fs::read_to_string(path).map_err(|e| {
            anyhow::anyhow!("Failed to read API key file {}: {}", path.display(), e)
        })?;
        let parsed: ApiKeyFile = serde_json::from_str(&contents).map_err(|e| {
            anyhow::anyhow!("Failed to parse API key file {}: {}", path.display(), e)
        })?;

        tracing::debug!(path = %path.display(), "Loaded TMDB API key from file");
        Ok(parsed.api_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> Config {
        envy::from_iter(vars.iter().map(|(k, v)| (k.to_string(), v.to_string()))).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);
        assert_eq!(config.tmdb_api_key, "");
        assert_eq!(config.tmdb_api_url, "https://api.themoviedb.org/3/");
        assert_eq!(config.tmdb_language, "en-US");
        assert_eq!(config.popular_pages, 5);
        assert_eq!(config.now_playing_pages, 1);
        assert_eq!(config.match_pattern, ".*[dD]es.*");
        assert!(config.tmdb_api_key_file.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("TMDB_API_KEY", "secret"),
            ("TMDB_API_URL", "http://localhost:8080/3/"),
            ("POPULAR_PAGES", "2"),
            ("MATCH_PATTERN", "Matrix"),
        ]);
        assert_eq!(config.tmdb_api_key, "secret");
        assert_eq!(config.tmdb_api_url, "http://localhost:8080/3/");
        assert_eq!(config.popular_pages, 2);
        assert_eq!(config.match_pattern, "Matrix");
        assert_eq!(config.api_key().unwrap(), "secret");
    }

    #[test]
    fn test_validate_rejects_zero_pages() {
        let config = config_from(&[("NOW_PLAYING_PAGES", "0")]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_pattern() {
        let config = config_from(&[("MATCH_PATTERN", "[dD")]);
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("MATCH_PATTERN"));
    }

    #[test]
    fn test_empty_key_without_file() {
        let config = config_from(&[]);
        assert_eq!(config.api_key().unwrap(), "");
    }

    #[test]
    fn test_api_key_from_file() {
        let path = std::env::temp_dir()
            .join(format!("streamflix-key-{}.json", uuid::Uuid::new_v4()));
        std::fs::write(&path, r#"{"api_key": "from-file"}"#).unwrap();

        let config = config_from(&[("TMDB_API_KEY_FILE", path.to_str().unwrap())]);
        assert_eq!(config.api_key().unwrap(), "from-file");

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_variable_wins_over_file() {
        let config = config_from(&[
            ("TMDB_API_KEY", "from-env"),
            ("TMDB_API_KEY_FILE", "/does/not/exist.json"),
        ]);
        assert_eq!(config.api_key().unwrap(), "from-env");
    }

    #[test]
    fn test_missing_key_file_is_error() {
        let config = config_from(&[("TMDB_API_KEY_FILE", "/does/not/exist.json")]);
        assert!(config.api_key().is_err());
    }

    #[test]
    fn test_malformed_key_file_is_error() {
        let path = std::env::temp_dir()
            .join(format!("streamflix-key-{}.json", uuid::Uuid::new_v4()));
        std::fs::write(&path, r#"{"key": 42}"#).unwrap();

        let config = config_from(&[("TMDB_API_KEY_FILE", path.to_str().unwrap())]);
        assert!(config.api_key().is_err());

        std::fs::remove_file(&path).unwrap();
    }
}
