use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use super::error::{Error, Result};

/// Service settings, read from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub database_url: String,
    pub pool_size: u32,

    /// Whether search results get the wishlist annotation, like the
    /// ordering range listing does.
    pub search_includes_wishlist: bool,
}

impl Config {
    pub fn from_env() -> Result<Config> {
        Config::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Config>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Read the IP address and port on which to listen.
        let ip: IpAddr = parse_or(&lookup, "LISTEN_IP", "127.0.0.1")?;
        let port: u16 = parse_or(&lookup, "PORT", "1234")?;

        let database_url = lookup("DATABASE_URL")
            .ok_or_else(|| Error::Config("DATABASE_URL must be set".to_owned()))?;

        let pool_size: u32 = parse_or(&lookup, "DATABASE_POOL_SIZE", "10")?;
        if pool_size == 0 {
            return Err(Error::Config(
                "DATABASE_POOL_SIZE must be at least 1".to_owned(),
            ));
        }

        let search_includes_wishlist = match lookup("SEARCH_INCLUDES_WISHLIST") {
            None => false,
            Some(v) => parse_flag(&v).ok_or_else(|| {
                Error::Config(format!("Failed to parse SEARCH_INCLUDES_WISHLIST: {}", v))
            })?,
        };

        Ok(Config {
            listen_addr: SocketAddr::new(ip, port),
            database_url,
            pool_size,
            search_includes_wishlist,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: &str) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    let raw = lookup(key).unwrap_or_else(|| {
        debug!("{} not set, using default: {}", key, default);
        default.to_owned()
    });

    raw.trim()
        .parse()
        .map_err(|_| Error::Config(format!("Failed to parse {}: {}", key, raw)))
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" => Some(true),
        "0" | "false" => Some(false),
        _ => None,
    }
}
