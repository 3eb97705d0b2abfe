use std::{env, net::SocketAddr};

/// Environment variable holding the storage connection string.
pub const STORE_URI_VAR: &str = "MONGODB_URI";
pub const DEFAULT_STORE_URI: &str = "file:data/drills.json";
pub const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub store_uri: String,
    pub port: u16,
}

impl Config {
    /// Reads the process environment. Call after `.env` has been loaded.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let store_uri = lookup(STORE_URI_VAR)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_STORE_URI.to_string());

        let port = lookup("PORT")
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        Self { store_uri, port }
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}
