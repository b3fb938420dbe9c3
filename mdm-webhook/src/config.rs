//! Configuration module for environment variable parsing.
//!
//! The receiver only needs to know where to listen.

use std::env;
use std::fmt::Display;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;

use tracing::warn;

/// Default listening port when `PORT` is unset.
pub const DEFAULT_PORT: u16 = 5000;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Interface to bind the listener on
    pub host: IpAddr,

    /// Port for the web server to listen on
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// `HOST` and `PORT` override the defaults of `0.0.0.0:5000`.
    pub fn from_env() -> Self {
        let defaults = Config::default();

        Config {
            host: parse_var("HOST", defaults.host),
            port: parse_var("PORT", defaults.port),
        }
    }

    /// Socket address the listener binds to.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Parse an environment variable, falling back to `default` when unset or invalid.
fn parse_var<T>(name: &str, default: T) -> T
where
    T: FromStr,
    T::Err: Display,
{
    let raw = match env::var(name) {
        Ok(v) => v,
        Err(_) => return default,
    };

    match raw.trim().parse::<T>() {
        Ok(value) => value,
        Err(e) => {
            warn!(env_var = name, value = %raw, error = %e, "Invalid value, using default");
            default
        }
    }
}
