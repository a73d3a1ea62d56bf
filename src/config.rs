//! Storefront configuration
//!
//! Values come from the environment (a `.env` file is honoured). Every
//! setting has a default so the server starts with no configuration.

use crate::cart::models::CartPolicy;
use crate::error::{StoreError, StoreResult};
use crate::money::{parse_money, require_non_negative};
use rust_decimal::Decimal;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// Storefront server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Bind host (env: STOREFRONT_HOST)
    pub host: IpAddr,
    /// Bind port (env: STOREFRONT_PORT)
    pub port: u16,
    /// Default log filter when RUST_LOG is unset (env: STOREFRONT_LOG)
    pub log_level: String,
    /// Seed the demo catalog on startup (env: STOREFRONT_SEED_DEMO)
    pub seed_demo: bool,
    /// Shipping and tax rules (env: FREE_SHIPPING_THRESHOLD, FLAT_SHIPPING_FEE, TAX_RATE)
    pub policy: CartPolicy,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 8000,
            log_level: "info".to_string(),
            seed_demo: true,
            policy: CartPolicy::default(),
        }
    }
}

impl StoreConfig {
    /// Load configuration from the process environment, after reading `.env`.
    pub fn from_env() -> StoreResult<Self> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> StoreResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let host = match var("STOREFRONT_HOST") {
            Some(raw) => raw.trim().parse().map_err(|_| {
                StoreError::validation(format!("STOREFRONT_HOST is not an IP address: {raw:?}"))
            })?,
            None => defaults.host,
        };
        let port = match var("STOREFRONT_PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| {
                StoreError::validation(format!("STOREFRONT_PORT is not a port number: {raw:?}"))
            })?,
            None => defaults.port,
        };
        let seed_demo = match var("STOREFRONT_SEED_DEMO") {
            Some(raw) => parse_flag(&raw, "STOREFRONT_SEED_DEMO")?,
            None => defaults.seed_demo,
        };

        let mut policy = defaults.policy;
        if let Some(raw) = var("FREE_SHIPPING_THRESHOLD") {
            policy.free_shipping_threshold = parse_money(&raw, "FREE_SHIPPING_THRESHOLD")?;
        }
        if let Some(raw) = var("FLAT_SHIPPING_FEE") {
            policy.flat_shipping_fee = parse_money(&raw, "FLAT_SHIPPING_FEE")?;
        }
        if let Some(raw) = var("TAX_RATE") {
            policy.tax_rate = Some(parse_money(&raw, "TAX_RATE")?);
        }
        require_non_negative(policy.free_shipping_threshold, "FREE_SHIPPING_THRESHOLD")?;
        require_non_negative(policy.flat_shipping_fee, "FLAT_SHIPPING_FEE")?;
        if let Some(rate) = policy.tax_rate {
            require_non_negative(rate, "TAX_RATE")?;
            if rate > Decimal::ONE {
                return Err(StoreError::validation(format!(
                    "TAX_RATE is a fraction between 0 and 1, got {rate}"
                )));
            }
        }

        Ok(Self {
            host,
            port,
            log_level: var("STOREFRONT_LOG").unwrap_or(defaults.log_level),
            seed_demo,
            policy,
        })
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_flag(raw: &str, name: &str) -> StoreResult<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(StoreError::validation(format!(
            "{name} must be a boolean, got {raw:?}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> StoreResult<StoreConfig> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        StoreConfig::from_lookup(|name| map.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config, StoreConfig::default());
        assert_eq!(config.bind_addr().to_string(), "0.0.0.0:8000");
        assert_eq!(config.policy.free_shipping_threshold, Decimal::from(100));
        assert_eq!(config.policy.tax_rate, None);
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("STOREFRONT_HOST", "127.0.0.1"),
            ("STOREFRONT_PORT", "3000"),
            ("STOREFRONT_SEED_DEMO", "no"),
            ("FREE_SHIPPING_THRESHOLD", "75"),
            ("TAX_RATE", "0.08"),
            ("STOREFRONT_LOG", "debug"),
        ])
        .unwrap();
        assert_eq!(config.bind_addr().to_string(), "127.0.0.1:3000");
        assert!(!config.seed_demo);
        assert_eq!(config.policy.free_shipping_threshold, Decimal::from(75));
        assert_eq!(config.policy.tax_rate, Some(Decimal::new(8, 2)));
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_invalid_values_name_the_variable() {
        let err = load(&[("STOREFRONT_PORT", "eighty")]).unwrap_err();
        assert!(err.to_string().contains("STOREFRONT_PORT"));

        let err = load(&[("FLAT_SHIPPING_FEE", "-5")]).unwrap_err();
        assert!(err.to_string().contains("FLAT_SHIPPING_FEE"));

        let err = load(&[("TAX_RATE", "8")]).unwrap_err();
        assert!(err.to_string().contains("TAX_RATE"));
    }
}
