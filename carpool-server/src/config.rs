//! Server configuration from environment variables.

use std::fmt::Display;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use tracing::info;

use crate::cache::CacheConfig;
use crate::domain::GeoPoint;
use crate::untis::UntisConfig;

/// Shared reference point: the school all trips lead to.
const DEFAULT_ANCHOR_LATITUDE: f64 = 53.8088002;
const DEFAULT_ANCHOR_LONGITUDE: f64 = 10.3978350;

/// Sweep past days twice a day.
const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 12 * 60 * 60;

/// Error for a variable that is set but unusable.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid {key}={value:?}: {message}")]
pub struct ConfigError {
    pub key: &'static str,
    pub value: String,
    pub message: String,
}

/// Everything the binary needs to start.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub untis: UntisConfig,
    /// Serve provider data from this directory instead of the network.
    pub mock_dir: Option<PathBuf>,
    pub anchor: GeoPoint,
    pub sweep_interval: Duration,
    pub cache: CacheConfig,
    /// Static web assets served under `/`.
    pub static_dir: Option<PathBuf>,
    pub cors_origins: Vec<String>,
}

impl ServerConfig {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using `lookup` to read variables.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let vars = Vars(&lookup);

        let mut untis = UntisConfig::new(vars.string("UNTIS_SCHOOL", ""))
            .with_format_id(vars.parse("UNTIS_FORMAT_ID", 4)?);
        if let Some(url) = lookup("UNTIS_BASE_URL") {
            untis = untis.with_base_url(url);
        }

        let cache = CacheConfig {
            max_capacity: vars.parse("CACHE_MAX_CAPACITY", CacheConfig::default().max_capacity)?,
        };

        let sweep_secs = vars.parse("SWEEP_INTERVAL_SECS", DEFAULT_SWEEP_INTERVAL_SECS)?;
        if sweep_secs == 0 {
            return Err(ConfigError {
                key: "SWEEP_INTERVAL_SECS",
                value: sweep_secs.to_string(),
                message: "must be at least 1".to_string(),
            });
        }

        let cors_origins = lookup("CORS_ORIGINS")
            .map(|list| {
                list.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            bind_addr: vars.parse("BIND_ADDR", SocketAddr::from(([127, 0, 0, 1], 8001)))?,
            untis,
            mock_dir: lookup("UNTIS_MOCK_DIR").map(PathBuf::from),
            anchor: GeoPoint::new(
                vars.parse("ANCHOR_LATITUDE", DEFAULT_ANCHOR_LATITUDE)?,
                vars.parse("ANCHOR_LONGITUDE", DEFAULT_ANCHOR_LONGITUDE)?,
            ),
            sweep_interval: Duration::from_secs(sweep_secs),
            cache,
            static_dir: lookup("STATIC_DIR").map(PathBuf::from),
            cors_origins,
        })
    }
}

struct Vars<'a, F>(&'a F);

impl<F: Fn(&str) -> Option<String>> Vars<'_, F> {
    fn string(&self, key: &'static str, default: &str) -> String {
        (self.0)(key).unwrap_or_else(|| {
            info!("{key} not set, using default: {default:?}");
            default.to_string()
        })
    }

    fn parse<T>(&self, key: &'static str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr + Display,
        T::Err: Display,
    {
        match (self.0)(key) {
            None => {
                info!("{key} not set, using default: {default}");
                Ok(default)
            }
            Some(value) => value.trim().parse().map_err(|e: T::Err| ConfigError {
                key,
                message: e.to_string(),
                value,
            }),
        }
    }
}
