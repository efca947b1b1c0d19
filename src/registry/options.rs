//! Registry configuration.

use crate::hash::{string_hash, HashFn};

/// Environment variable read by [`RegistryOptions::from_env`].
pub const DEBUG_ENV: &str = "FREE_STYLE_DEBUG";

/// Configuration for a [`Registry`](super::Registry).
#[derive(Debug, Clone, Copy)]
pub struct RegistryOptions {
    /// Prefix generated identifiers with the style's display name.
    pub debug: bool,
    /// Hash function used to compute node keys.
    pub hash: HashFn,
}

impl Default for RegistryOptions {
    fn default() -> Self {
        Self {
            debug: false,
            hash: string_hash,
        }
    }
}

impl RegistryOptions {
    /// Create a new default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults, with `debug` taken from `FREE_STYLE_DEBUG` (`1` or `true`).
    pub fn from_env() -> Self {
        let debug = std::env::var(DEBUG_ENV)
            .map(|v| parse_flag(&v))
            .unwrap_or(false);
        Self::default().with_debug(debug)
    }

    /// Set debug mode (builder).
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Set the hash function (builder).
    pub fn with_hash(mut self, hash: HashFn) -> Self {
        self.hash = hash;
        self
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}
