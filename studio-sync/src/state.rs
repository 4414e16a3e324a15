use crate::config::Config;
use crate::error::SyncResult;
use crate::refresh::Refresher;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub refresher: Arc<Refresher>,
}

impl AppState {
    pub fn new(config: Config) -> SyncResult<Self> {
        Ok(AppState {
            refresher: Arc::new(Refresher::new(config)?),
        })
    }

    pub fn config(&self) -> &Config {
        self.refresher.config()
    }
}
