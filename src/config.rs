use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::estimation::DEFAULT_REMOTE_TIMEOUT;
use crate::live::DEFAULT_QUIET_PERIOD;
use crate::provider::mapbox::DEFAULT_ENDPOINT;

#[derive(Clone, Debug)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub mapbox_base_url: String,
    /// Seeds the token store when no token has been saved yet
    pub mapbox_token: Option<String>,
    pub token_file: PathBuf,
    pub remote_timeout: Duration,
    pub debounce: Duration,
    pub roster_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_host: "0.0.0.0".to_string(),
            server_port: 3000,
            mapbox_base_url: DEFAULT_ENDPOINT.to_string(),
            mapbox_token: None,
            token_file: PathBuf::from(".mapbox_token"),
            remote_timeout: DEFAULT_REMOTE_TIMEOUT,
            debounce: DEFAULT_QUIET_PERIOD,
            roster_path: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let defaults = Self::default();

        Self {
            server_host: env::var("SERVER_HOST").unwrap_or(defaults.server_host),
            server_port: env::var("SERVER_PORT")
                .map(|v| v.parse().expect("SERVER_PORT must be a number"))
                .unwrap_or(defaults.server_port),
            mapbox_base_url: env::var("MAPBOX_BASE_URL").unwrap_or(defaults.mapbox_base_url),
            mapbox_token: env::var("MAPBOX_TOKEN").ok().filter(|t| !t.trim().is_empty()),
            token_file: env::var("TOKEN_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.token_file),
            remote_timeout: env::var("REMOTE_TIMEOUT_MS")
                .map(|v| millis(&v, "REMOTE_TIMEOUT_MS"))
                .unwrap_or(defaults.remote_timeout),
            debounce: env::var("DEBOUNCE_MS")
                .map(|v| millis(&v, "DEBOUNCE_MS"))
                .unwrap_or(defaults.debounce),
            roster_path: env::var("ROSTER_PATH").ok().map(PathBuf::from),
        }
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn millis(value: &str, name: &str) -> Duration {
    let ms: u64 = value
        .parse()
        .unwrap_or_else(|_| panic!("{name} must be a number of milliseconds"));
    Duration::from_millis(ms)
}
