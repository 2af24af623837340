pub mod availability;
pub mod config;
pub mod entities;
pub mod error;
pub mod estimation;
pub mod handlers;
pub mod live;
pub mod middleware;
pub mod provider;
pub mod routes;
pub mod utils;

use std::sync::Arc;

use entities::driver::{self, Driver};
use estimation::EstimationService;
use live::LiveEstimator;
use provider::{MapboxClient, RouteProvider};
use utils::token_store::TokenStore;

pub use config::Config;
pub use error::{AppError, AppResult};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub estimator: Arc<EstimationService>,
    pub live: Arc<LiveEstimator>,
    pub roster: Arc<[Driver]>,
    pub tokens: Arc<TokenStore>,
}

impl AppState {
    pub fn new(
        config: Config,
        provider: Arc<dyn RouteProvider>,
        roster: Vec<Driver>,
        tokens: TokenStore,
    ) -> Self {
        let estimator = Arc::new(EstimationService::new(provider, config.remote_timeout));
        let live = Arc::new(LiveEstimator::new(estimator.clone(), config.debounce));

        Self {
            config,
            estimator,
            live,
            roster: roster.into(),
            tokens: Arc::new(tokens),
        }
    }

    /// Wire up the Mapbox client, the roster and the token store from config
    pub async fn from_config(config: Config) -> AppResult<Self> {
        let provider = MapboxClient::new(&config.mapbox_base_url, config.remote_timeout)
            .map_err(|e| AppError::Internal(format!("Failed to build Mapbox client: {}", e)))?;
        let roster = driver::load_roster(config.roster_path.as_deref())?;

        let tokens = TokenStore::load(config.token_file.clone()).await?;
        if let (None, Some(seed)) = (tokens.get().await, config.mapbox_token.as_deref()) {
            tokens.set(seed).await?;
        }

        Ok(Self::new(config, Arc::new(provider), roster, tokens))
    }
}
