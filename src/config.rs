use std::{env, fmt::Display, str::FromStr, time::Duration};

use tracing::{info, warn};

/// Runtime configuration, loaded from the environment with logged defaults.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub catalog_url: String,
    pub checkout_url: String,
    pub feedback_ttl: Duration,
}

impl Config {
    pub fn load() -> Self {
        Self {
            port: try_load("SHOP_PORT", "8000"),
            catalog_url: try_load("SHOP_CATALOG_URL", "http://localhost:9000/api/products"),
            checkout_url: try_load("SHOP_CHECKOUT_URL", "http://localhost:9000/api/checkout"),
            feedback_ttl: Duration::from_millis(try_load("SHOP_FEEDBACK_TTL_MS", "2000")),
        }
    }
}

fn var(key: &str) -> Result<String, ()> {
    env::var(key).map_err(|_| ())
}

fn try_load<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    var(key)
        .unwrap_or_else(|_| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e| {
            warn!("Invalid {key} value: {e}");
        })
        .expect("Environment misconfigured!")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = Config::load();
        assert_eq!(config.feedback_ttl, Duration::from_millis(2000));
        assert!(!config.catalog_url.is_empty());
        assert!(!config.checkout_url.is_empty());
    }
}
