use std::sync::Arc;

use reqwest::Client;

use super::config::Config;

pub struct AppState {
    pub config: Config,
    pub http_client: Client,
}

impl AppState {
    pub fn new(config: Config) -> Result<Arc<Self>, reqwest::Error> {
        let http_client = Client::builder().timeout(config.timeout).build()?;

        Ok(Arc::new(Self {
            config,
            http_client,
        }))
    }
}
