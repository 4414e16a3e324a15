use crate::config::Config;
use crate::error::{SyncError, SyncResult};
use crate::fetcher::StudioClient;
use crate::models::ProjectEntry;
use crate::snapshot;
use tokio::sync::Mutex;

/// Runs refresh cycles: fetch every page, map to public entries, overwrite the snapshot.
///
/// Only one cycle runs at a time. A trigger that arrives while a cycle is running is
/// rejected with [`SyncError::RefreshInProgress`] instead of being queued.
#[derive(Debug)]
pub struct Refresher {
    client: StudioClient,
    running: Mutex<()>,
}

impl Refresher {
    pub fn new(config: Config) -> SyncResult<Self> {
        Ok(Refresher {
            client: StudioClient::new(config)?,
            running: Mutex::new(()),
        })
    }

    pub fn config(&self) -> &Config {
        self.client.config()
    }

    /// Returns the number of entries written.
    pub async fn refresh(&self) -> SyncResult<usize> {
        let _guard = self
            .running
            .try_lock()
            .map_err(|_| SyncError::RefreshInProgress)?;

        let config = self.client.config();
        let path = config.snapshot_path();
        tracing::info!("refreshing projects for studio {}", config.studio_id);

        let result = self.run_cycle(config, &path).await;
        match &result {
            Ok(count) => tracing::info!("wrote {} projects to {}", count, path.display()),
            Err(e) => tracing::error!("refresh failed: {}", e),
        }
        result
    }

    async fn run_cycle(&self, config: &Config, path: &std::path::Path) -> SyncResult<usize> {
        let projects = self.client.fetch_all_projects().await?;
        let entries: Vec<ProjectEntry> = projects
            .into_iter()
            .map(|raw| ProjectEntry::from_raw(raw, config))
            .collect();

        snapshot::write_snapshot(path, &entries).await?;
        Ok(entries.len())
    }
}
