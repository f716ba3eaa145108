use std::net::SocketAddr;

use anyhow::Context;

pub const ADDR_VAR: &str = "ORDER_SERVICE_ADDR";
pub const CHANNEL_CAPACITY_VAR: &str = "ORDER_SERVICE_CHANNEL_CAPACITY";

/// Runtime settings, read from the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub addr: SocketAddr,
    /// Mailbox size of the store actor.
    pub channel_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            channel_capacity: 100,
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary variable lookup. Unset variables keep
    /// their defaults; set but unparseable ones are an error.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let mut config = Config::default();

        if let Some(raw) = lookup(ADDR_VAR) {
            config.addr = raw
                .parse()
                .with_context(|| format!("{ADDR_VAR} is not a socket address: {raw:?}"))?;
        }
        if let Some(raw) = lookup(CHANNEL_CAPACITY_VAR) {
            let capacity: usize = raw
                .parse()
                .with_context(|| format!("{CHANNEL_CAPACITY_VAR} is not a number: {raw:?}"))?;
            anyhow::ensure!(capacity > 0, "{CHANNEL_CAPACITY_VAR} must be greater than 0");
            config.channel_capacity = capacity;
        }

        Ok(config)
    }
}
