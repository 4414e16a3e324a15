use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_STUDIO_ID: &str = "35787684";
pub const DEFAULT_API_BASE: &str = "https://api.scratch.mit.edu/studios";
pub const DEFAULT_PROJECT_URL_BASE: &str = "https://scratch.mit.edu/projects";
pub const DEFAULT_PUBLIC_DIR: &str = "public";
pub const DEFAULT_SNAPSHOT_FILE: &str = "projects.json";
pub const DEFAULT_PORT: u16 = 3000;
/// Paging stops once the offset cursor passes this value.
pub const DEFAULT_MAX_OFFSET: usize = 2000;
pub const DEFAULT_USER_AGENT: &str = "StudioFetcher/1.0";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

/// Everything the fetcher, writer and server need to know about their surroundings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub studio_id: String,
    pub api_base: String,
    pub project_url_base: String,
    pub public_dir: PathBuf,
    pub snapshot_file: PathBuf,
    pub port: u16,
    pub max_offset: usize,
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            studio_id: DEFAULT_STUDIO_ID.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            project_url_base: DEFAULT_PROJECT_URL_BASE.to_string(),
            public_dir: PathBuf::from(DEFAULT_PUBLIC_DIR),
            snapshot_file: PathBuf::from(DEFAULT_SNAPSHOT_FILE),
            port: DEFAULT_PORT,
            max_offset: DEFAULT_MAX_OFFSET,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Config::default();

        if let Some(v) = get("STUDIO_ID") {
            config.studio_id = v;
        }
        if let Some(v) = get("STUDIO_API_BASE") {
            config.api_base = v.trim_end_matches('/').to_string();
        }
        if let Some(v) = get("PROJECT_URL_BASE") {
            config.project_url_base = v.trim_end_matches('/').to_string();
        }
        if let Some(v) = get("PUBLIC_DIR") {
            config.public_dir = PathBuf::from(v);
        }
        if let Some(v) = get("SNAPSHOT_FILE") {
            config.snapshot_file = PathBuf::from(v);
        }
        if let Some(v) = get("PORT") {
            config.port = v.trim().parse().map_err(|_| ConfigError::Invalid {
                key: "PORT",
                value: v.clone(),
            })?;
        }
        if let Some(v) = get("MAX_OFFSET") {
            config.max_offset = v.trim().parse().map_err(|_| ConfigError::Invalid {
                key: "MAX_OFFSET",
                value: v.clone(),
            })?;
        }

        Ok(config)
    }

    pub fn snapshot_path(&self) -> PathBuf {
        self.public_dir.join(&self.snapshot_file)
    }

    pub fn page_url(&self, offset: usize) -> String {
        format!(
            "{}/{}/projects?offset={}",
            self.api_base, self.studio_id, offset
        )
    }

    pub fn project_url(&self, id: impl std::fmt::Display) -> String {
        format!("{}/{}/", self.project_url_base, id)
    }
}
