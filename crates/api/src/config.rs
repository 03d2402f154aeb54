//! Runtime configuration (environment driven).

use std::net::SocketAddr;

use anyhow::Context;

use backoffice_pricing::DEFAULT_PLACEHOLDER_IMAGE;

pub const BIND_ADDR_VAR: &str = "BACKOFFICE_BIND_ADDR";
pub const PLACEHOLDER_IMAGE_VAR: &str = "BACKOFFICE_PLACEHOLDER_IMAGE";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
    /// Image URL shown for products without a usable image.
    pub placeholder_image: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            placeholder_image: DEFAULT_PLACEHOLDER_IMAGE.to_string(),
        }
    }
}

impl ApiConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source (unset variables use defaults).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let raw_addr = lookup(BIND_ADDR_VAR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = raw_addr
            .parse()
            .with_context(|| format!("{BIND_ADDR_VAR} is not a socket address: {raw_addr}"))?;

        let placeholder_image = lookup(PLACEHOLDER_IMAGE_VAR)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| {
                tracing::debug!("{PLACEHOLDER_IMAGE_VAR} not set; using default placeholder");
                DEFAULT_PLACEHOLDER_IMAGE.to_string()
            });

        Ok(Self {
            bind_addr,
            placeholder_image,
        })
    }
}
