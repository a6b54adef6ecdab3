use std::{env, net::SocketAddr, path::PathBuf, time::Duration};

use crate::error::ConfigError;

/// AppConfig
///
/// Holds the application's entire configuration state. Loaded once at startup and
/// shared through `AppState` via `FromRef`; never mutated afterwards.
#[derive(Clone, Debug)]
pub struct AppConfig {
    // Runtime environment marker. Selects the log format.
    pub env: Env,
    // Socket the local app shell binds to.
    pub bind_addr: SocketAddr,
    // Backing file for the durable local storage (session snapshot lives here).
    pub storage_path: PathBuf,
    // Artificial latency applied to login, register and report submission.
    pub simulated_delay: Duration,
    // What an unmatched application path resolves to.
    pub unmatched_route: UnmatchedRoute,
}

/// Env
///
/// Defines the runtime context: pretty logs for local development, JSON logs for
/// production log aggregation.
#[derive(Clone, PartialEq, Debug)]
pub enum Env {
    Local,
    Production,
}

/// UnmatchedRoute
///
/// Product decision for paths that match no route definition. Both behaviours
/// existed in earlier revisions of the app, so it stays configurable.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum UnmatchedRoute {
    /// Redirect to `/analytics` (the guard then sends citizens to the dashboard
    /// and anonymous visitors to the login page).
    RedirectToAnalytics,
    /// Render the dedicated not-found page.
    NotFoundPage,
}

impl UnmatchedRoute {
    fn parse(raw: &str) -> Result<Self, ConfigError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "analytics" => Ok(Self::RedirectToAnalytics),
            "not-found" | "not_found" | "notfound" => Ok(Self::NotFoundPage),
            other => Err(ConfigError::Invalid {
                var: "APP_UNMATCHED_ROUTE",
                value: other.to_string(),
            }),
        }
    }
}

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_STORAGE_PATH: &str = ".ecowaste/local_storage.json";
const DEFAULT_DELAY_MS: u64 = 600;

impl Default for AppConfig {
    /// default
    ///
    /// Test-friendly configuration: no simulated latency and a storage path in the
    /// system temp directory. Tests that touch the disk override `storage_path`.
    fn default() -> Self {
        Self {
            env: Env::Local,
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
            storage_path: env::temp_dir().join("ecowaste-portal-test.json"),
            simulated_delay: Duration::ZERO,
            unmatched_route: UnmatchedRoute::RedirectToAnalytics,
        }
    }
}

impl AppConfig {
    /// load
    ///
    /// Reads the configuration from environment variables (call `dotenv` first).
    /// Every variable has a local default; a value that is present but malformed is a
    /// hard error so a typo never silently falls back.
    pub fn load() -> Result<Self, ConfigError> {
        let env = match env::var("APP_ENV")
            .unwrap_or_else(|_| "local".to_string())
            .as_str()
        {
            "production" => Env::Production,
            _ => Env::Local,
        };

        let raw_addr = env::var("APP_BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = raw_addr.parse().map_err(|_| ConfigError::Invalid {
            var: "APP_BIND_ADDR",
            value: raw_addr.clone(),
        })?;

        let storage_path = env::var("APP_STORAGE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_STORAGE_PATH));

        let simulated_delay = match env::var("APP_SIMULATED_DELAY_MS") {
            Ok(raw) => {
                let millis = raw.trim().parse::<u64>().map_err(|_| ConfigError::Invalid {
                    var: "APP_SIMULATED_DELAY_MS",
                    value: raw.clone(),
                })?;
                Duration::from_millis(millis)
            }
            Err(_) => Duration::from_millis(DEFAULT_DELAY_MS),
        };

        let unmatched_route = match env::var("APP_UNMATCHED_ROUTE") {
            Ok(raw) => UnmatchedRoute::parse(&raw)?,
            Err(_) => UnmatchedRoute::RedirectToAnalytics,
        };

        Ok(Self {
            env,
            bind_addr,
            storage_path,
            simulated_delay,
            unmatched_route,
        })
    }
}
