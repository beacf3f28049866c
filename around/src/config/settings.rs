//! Service configuration read from the environment.

use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use around_repository::opensearch::{
    IndexConfig, DEFAULT_DOCUMENT_TYPE, DEFAULT_INDEX_NAME, DEFAULT_MAX_RESULTS,
};
use around_shared::DEFAULT_DISTANCE_KM;

use crate::ServiceError;

/// Default OpenSearch URL.
const DEFAULT_OPENSEARCH_URL: &str = "http://localhost:9200";

/// Default per-request timeout for store calls, in seconds.
const DEFAULT_STORE_TIMEOUT_SECS: u64 = 10;

/// Default listening port.
const DEFAULT_SERVER_PORT: u16 = 8080;

/// Output format for logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable console output.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

impl LogFormat {
    /// Parse a log format name. Unknown names fall back to `Pretty`.
    fn parse(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Pretty,
        }
    }

    /// Read the log format from `LOG_FORMAT`.
    pub fn from_env() -> Self {
        env::var("LOG_FORMAT")
            .map(|v| Self::parse(&v))
            .unwrap_or_default()
    }
}

/// Immutable service configuration.
///
/// Built once at startup and handed to the components that need it.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    /// Base URL of the OpenSearch cluster.
    pub opensearch_url: String,
    /// Index name, document type and per-search hit cap.
    pub index: IndexConfig,
    /// Radius used when a search omits `range`, in kilometres.
    pub default_distance_km: f64,
    /// Upper bound on each store request.
    pub store_timeout: Duration,
    /// Address the HTTP listener binds to.
    pub listen_addr: SocketAddr,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            opensearch_url: DEFAULT_OPENSEARCH_URL.to_string(),
            index: IndexConfig::default(),
            default_distance_km: DEFAULT_DISTANCE_KM,
            store_timeout: Duration::from_secs(DEFAULT_STORE_TIMEOUT_SECS),
            listen_addr: SocketAddr::new(
                IpAddr::V4(Ipv4Addr::UNSPECIFIED),
                DEFAULT_SERVER_PORT,
            ),
        }
    }
}

impl ServiceConfig {
    /// Load configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `OPENSEARCH_URL`: OpenSearch server URL (default: http://localhost:9200)
    /// - `INDEX_NAME`: Index holding posts (default: "around")
    /// - `DOCUMENT_TYPE`: Document type name (default: "post")
    /// - `DEFAULT_DISTANCE_KM`: Search radius when `range` is omitted (default: 200)
    /// - `SEARCH_MAX_RESULTS`: Hit cap per search (default: 100)
    /// - `STORE_TIMEOUT_SECS`: Timeout for each store request (default: 10)
    /// - `SERVER_HOST`: Listen address (default: 0.0.0.0)
    /// - `SERVER_PORT`: Listen port (default: 8080)
    ///
    /// # Returns
    ///
    /// * `Ok(ServiceConfig)` - The effective configuration
    /// * `Err(ServiceError)` - If a variable is set but cannot be parsed
    pub fn from_env() -> Result<Self, ServiceError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ServiceError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let opensearch_url = lookup("OPENSEARCH_URL").unwrap_or(defaults.opensearch_url);
        let index_name =
            lookup("INDEX_NAME").unwrap_or_else(|| DEFAULT_INDEX_NAME.to_string());
        let document_type =
            lookup("DOCUMENT_TYPE").unwrap_or_else(|| DEFAULT_DOCUMENT_TYPE.to_string());
        let max_results =
            parse_var(&lookup, "SEARCH_MAX_RESULTS")?.unwrap_or(DEFAULT_MAX_RESULTS);
        let default_distance_km =
            parse_var(&lookup, "DEFAULT_DISTANCE_KM")?.unwrap_or(defaults.default_distance_km);
        let store_timeout_secs =
            parse_var(&lookup, "STORE_TIMEOUT_SECS")?.unwrap_or(DEFAULT_STORE_TIMEOUT_SECS);
        let host: IpAddr =
            parse_var(&lookup, "SERVER_HOST")?.unwrap_or(defaults.listen_addr.ip());
        let port: u16 = parse_var(&lookup, "SERVER_PORT")?.unwrap_or(DEFAULT_SERVER_PORT);

        if index_name.is_empty() {
            return Err(ServiceError::config("INDEX_NAME cannot be empty"));
        }
        if document_type.is_empty() {
            return Err(ServiceError::config("DOCUMENT_TYPE cannot be empty"));
        }
        if !default_distance_km.is_finite() || default_distance_km < 0.0 {
            return Err(ServiceError::config(
                "DEFAULT_DISTANCE_KM must be a non-negative number",
            ));
        }
        if max_results == 0 {
            return Err(ServiceError::config("SEARCH_MAX_RESULTS must be at least 1"));
        }
        if store_timeout_secs == 0 {
            return Err(ServiceError::config("STORE_TIMEOUT_SECS must be at least 1"));
        }

        Ok(Self {
            opensearch_url,
            index: IndexConfig::new(index_name, document_type).with_max_results(max_results),
            default_distance_km,
            store_timeout: Duration::from_secs(store_timeout_secs),
            listen_addr: SocketAddr::new(host, port),
        })
    }
}

/// Parse an optional variable, failing if it is set but malformed.
fn parse_var<F, T>(lookup: &F, key: &str) -> Result<Option<T>, ServiceError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| ServiceError::config(format!("Invalid {}='{}': {}", key, raw, e))),
    }
}
