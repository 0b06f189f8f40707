//! Configuration Module
//!
//! Handles loading and managing service configuration from environment variables.
//! Enumerated settings (eviction policy, device type, routing mode) stay as raw
//! strings here and are validated by the component that consumes them.

use std::env;
use std::str::FromStr;

use crate::error::{Result, WelpError};

// == Role ==
/// Which service this process runs, selected by the first command line argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Cache,
    Storage,
    Detail,
    Review,
    Reservation,
    Gateway,
    /// Gateway, replicas, caches and storage all in one process
    Standalone,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Cache => "cache",
            Role::Storage => "storage",
            Role::Detail => "detail",
            Role::Review => "review",
            Role::Reservation => "reservation",
            Role::Gateway => "gateway",
            Role::Standalone => "standalone",
        }
    }
}

impl FromStr for Role {
    type Err = WelpError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "cache" => Ok(Role::Cache),
            "storage" | "database" => Ok(Role::Storage),
            "detail" => Ok(Role::Detail),
            "review" => Ok(Role::Review),
            "reservation" => Ok(Role::Reservation),
            "gateway" | "frontend" => Ok(Role::Gateway),
            "standalone" => Ok(Role::Standalone),
            other => Err(WelpError::InvalidConfiguration(format!(
                "unknown role: {}",
                other
            ))),
        }
    }
}

/// Service configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Name used in log lines
    pub service_name: Option<String>,
    /// Maximum number of entries per cache store
    pub cache_capacity: usize,
    /// Eviction policy name (fifo, random, lru, mru, lfu)
    pub eviction_policy: String,
    /// Whether data services populate and update their cache
    pub cache_enabled: bool,
    /// Emulated storage device type (ssd, disk, cloud)
    pub storage_device_type: String,
    /// When set, the storage service persists to this JSON file
    pub storage_file: Option<String>,
    /// Gateway routing mode (hash, sequential, none)
    pub load_balancing: String,
    /// Replicas per sharded service in standalone mode
    pub replica_count: usize,
    /// Cache service base URL used by a data service
    pub cache_url: String,
    /// Storage service base URL used by a data service
    pub storage_url: String,
    /// Detail replica base URLs used by the gateway
    pub detail_replicas: Vec<String>,
    /// Review replica base URLs used by the gateway
    pub review_replicas: Vec<String>,
    /// Reservation service base URL used by the gateway
    pub reservation_url: String,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 8080)
    /// - `SERVICE_NAME` - Name for log lines (default: role name)
    /// - `CACHE_CAPACITY` - Entries per cache store (default: 100)
    /// - `EVICTION_POLICY` - fifo | random | lru | mru | lfu (default: lru)
    /// - `CACHE_ENABLED` - true | false (default: true)
    /// - `STORAGE_DEVICE_TYPE` - ssd | disk | cloud (default: ssd)
    /// - `STORAGE_FILE` - JSON file for persistent storage (default: unset)
    /// - `LOAD_BALANCING` - hash | sequential | none (default: hash)
    /// - `REPLICA_COUNT` - replicas in standalone mode (default: 3)
    /// - `CACHE_URL`, `STORAGE_URL` - peers of a data service
    /// - `DETAIL_REPLICAS`, `REVIEW_REPLICAS` - comma-separated replica URLs
    /// - `RESERVATION_URL` - reservation service URL
    ///
    /// A numeric or boolean variable that is set but does not parse is an
    /// `InvalidConfiguration` error.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        Ok(Self {
            server_port: parsed_var("SERVER_PORT")?.unwrap_or(defaults.server_port),
            service_name: env::var("SERVICE_NAME").ok().filter(|v| !v.is_empty()),
            cache_capacity: parsed_var("CACHE_CAPACITY")?.unwrap_or(defaults.cache_capacity),
            eviction_policy: env::var("EVICTION_POLICY").unwrap_or(defaults.eviction_policy),
            cache_enabled: parsed_var("CACHE_ENABLED")?.unwrap_or(defaults.cache_enabled),
            storage_device_type: env::var("STORAGE_DEVICE_TYPE")
                .unwrap_or(defaults.storage_device_type),
            storage_file: env::var("STORAGE_FILE").ok().filter(|v| !v.is_empty()),
            load_balancing: env::var("LOAD_BALANCING").unwrap_or(defaults.load_balancing),
            replica_count: parsed_var("REPLICA_COUNT")?.unwrap_or(defaults.replica_count),
            cache_url: env::var("CACHE_URL").unwrap_or(defaults.cache_url),
            storage_url: env::var("STORAGE_URL").unwrap_or(defaults.storage_url),
            detail_replicas: list_var("DETAIL_REPLICAS").unwrap_or(defaults.detail_replicas),
            review_replicas: list_var("REVIEW_REPLICAS").unwrap_or(defaults.review_replicas),
            reservation_url: env::var("RESERVATION_URL").unwrap_or(defaults.reservation_url),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 8080,
            service_name: None,
            cache_capacity: 100,
            eviction_policy: "lru".to_string(),
            cache_enabled: true,
            storage_device_type: "ssd".to_string(),
            storage_file: None,
            load_balancing: "hash".to_string(),
            replica_count: 3,
            cache_url: "http://127.0.0.1:11211".to_string(),
            storage_url: "http://127.0.0.1:27017".to_string(),
            detail_replicas: vec![
                "http://127.0.0.1:8081".to_string(),
                "http://127.0.0.1:8084".to_string(),
                "http://127.0.0.1:8085".to_string(),
            ],
            review_replicas: vec![
                "http://127.0.0.1:8082".to_string(),
                "http://127.0.0.1:8086".to_string(),
                "http://127.0.0.1:8087".to_string(),
            ],
            reservation_url: "http://127.0.0.1:8083".to_string(),
        }
    }
}

fn parsed_var<T: FromStr>(name: &str) -> Result<Option<T>> {
    parse_setting(name, env::var(name).ok())
}

/// Unset or blank is `None`; anything else must parse.
fn parse_setting<T: FromStr>(name: &str, raw: Option<String>) -> Result<Option<T>> {
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(|_| {
            WelpError::InvalidConfiguration(format!("{} has invalid value {:?}", name, value))
        }),
    }
}

fn list_var(name: &str) -> Option<Vec<String>> {
    let raw = env::var(name).ok()?;
    let items: Vec<String> = raw
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    if items.is_empty() {
        None
    } else {
        Some(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.server_port, 8080);
        assert_eq!(config.cache_capacity, 100);
        assert_eq!(config.eviction_policy, "lru");
        assert!(config.cache_enabled);
        assert_eq!(config.storage_device_type, "ssd");
        assert!(config.storage_file.is_none());
        assert_eq!(config.load_balancing, "hash");
        assert_eq!(config.detail_replicas.len(), 3);
        assert_eq!(config.review_replicas.len(), 3);
    }

    #[test]
    fn test_config_from_env_lists() {
        env::set_var("DETAIL_REPLICAS", "http://a:1, http://b:2,,");
        env::remove_var("REVIEW_REPLICAS");

        let config = Config::from_env().unwrap();
        assert_eq!(config.detail_replicas, vec!["http://a:1", "http://b:2"]);
        assert_eq!(config.review_replicas, Config::default().review_replicas);

        env::remove_var("DETAIL_REPLICAS");
    }

    #[test]
    fn test_malformed_setting_rejected() {
        assert!(matches!(
            parse_setting::<usize>("CACHE_CAPACITY", Some("lots".to_string())),
            Err(WelpError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            parse_setting::<bool>("CACHE_ENABLED", Some("yes".to_string())),
            Err(WelpError::InvalidConfiguration(_))
        ));
        assert!(parse_setting::<usize>("REPLICA_COUNT", Some("-1".to_string())).is_err());
    }

    #[test]
    fn test_blank_or_unset_setting_defaults() {
        assert_eq!(parse_setting::<usize>("CACHE_CAPACITY", None).unwrap(), None);
        assert_eq!(parse_setting::<u16>("SERVER_PORT", Some("  ".to_string())).unwrap(), None);
        assert_eq!(
            parse_setting::<bool>("CACHE_ENABLED", Some(" false ".to_string())).unwrap(),
            Some(false)
        );
    }

    #[test]
    fn test_role_parse() {
        assert_eq!("cache".parse::<Role>().unwrap(), Role::Cache);
        assert_eq!("Frontend".parse::<Role>().unwrap(), Role::Gateway);
        assert_eq!("database".parse::<Role>().unwrap(), Role::Storage);
        assert!(matches!(
            "mystery".parse::<Role>(),
            Err(WelpError::InvalidConfiguration(_))
        ));
    }
}
