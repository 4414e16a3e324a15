use crate::config::Config;
use crate::error::{SyncError, SyncResult};
use crate::models::RawProject;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use serde_json::Value;

/// Pages through a studio's project collection.
///
/// The remote server picks the page size; the cursor simply advances by however many
/// records the last page held, and paging stops on an empty or non-array body.
#[derive(Debug, Clone)]
pub struct StudioClient {
    http: reqwest::Client,
    config: Config,
}

impl StudioClient {
    pub fn new(config: Config) -> SyncResult<Self> {
        let mut headers = HeaderMap::new();
        if let Ok(agent) = HeaderValue::from_str(&config.user_agent) {
            headers.insert(USER_AGENT, agent);
        } else {
            tracing::warn!("ignoring invalid user agent {:?}", config.user_agent);
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(StudioClient { http, config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Fetches every page in order. Any non-2xx page fails the whole run and the
    /// pages gathered so far are dropped.
    pub async fn fetch_all_projects(&self) -> SyncResult<Vec<RawProject>> {
        let mut all = Vec::new();
        let mut offset = 0usize;

        loop {
            let Some(batch) = self.fetch_page(offset).await? else {
                break;
            };

            offset += batch.len();
            all.extend(batch.into_iter().filter_map(|item| {
                match serde_json::from_value::<RawProject>(item) {
                    Ok(project) => Some(project),
                    Err(e) => {
                        tracing::warn!("skipping undecodable project record: {}", e);
                        None
                    }
                }
            }));

            if offset > self.config.max_offset {
                tracing::warn!(
                    "stopping at offset {} (limit {}), result may be truncated",
                    offset,
                    self.config.max_offset
                );
                break;
            }
        }

        tracing::info!(
            "fetched {} projects from studio {}",
            all.len(),
            self.config.studio_id
        );
        Ok(all)
    }

    /// `Ok(None)` means there is nothing more to read at this offset.
    async fn fetch_page(&self, offset: usize) -> SyncResult<Option<Vec<Value>>> {
        let url = self.config.page_url(offset);
        let response = self.http.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SyncError::RemoteStatus {
                status: status.as_u16(),
                offset,
            });
        }

        // Unparsable JSON fails the run; only a parsed non-array body ends paging.
        let body = response.json::<Value>().await?;

        match body {
            Value::Array(items) if items.is_empty() => {
                tracing::debug!("empty page at offset {}", offset);
                Ok(None)
            }
            Value::Array(items) => {
                tracing::debug!("page at offset {} held {} records", offset, items.len());
                Ok(Some(items))
            }
            _ => {
                tracing::warn!("page at offset {} is not an array, treating as end", offset);
                Ok(None)
            }
        }
    }
}
