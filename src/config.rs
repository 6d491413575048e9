use crate::error::{Error, Result};
use dotenvy::dotenv;
use std::env;
use std::sync::OnceLock;
use url::Url;

pub const DEFAULT_API_URL: &str = "http://localhost:4000";
pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: Url,
    pub http_timeout_secs: u64,
    pub page_size: u32,
    pub log_format: LogFormat,
}

pub static CONFIG: OnceLock<Config> = OnceLock::new();

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let raw_url = env::var("CAREERS_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let api_url = Url::parse(raw_url.trim_end_matches('/'))
            .map_err(|e| Error::Config(format!("Invalid value for CAREERS_API_URL: {}", e)))?;

        let page_size: u32 = get_env_parse_or("VACANCY_PAGE_SIZE", DEFAULT_PAGE_SIZE)?;
        if page_size == 0 {
            return Err(Error::Config(
                "Invalid value for VACANCY_PAGE_SIZE: must be positive".to_string(),
            ));
        }

        let log_format = match env::var("LOG_FORMAT").ok().as_deref() {
            None | Some("") | Some("text") => LogFormat::Text,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(Error::Config(format!(
                    "Invalid value for LOG_FORMAT: {} (expected text or json)",
                    other
                )))
            }
        };

        Ok(Self {
            api_url,
            http_timeout_secs: get_env_parse_or("HTTP_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?,
            page_size,
            log_format,
        })
    }
}

fn get_env_parse_or<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e))),
        _ => Ok(default),
    }
}

pub fn init_config() -> Result<()> {
    let config = Config::from_env()?;
    CONFIG
        .set(config)
        .map_err(|_| Error::Config("Configuration has already been initialized".to_string()))?;
    Ok(())
}

pub fn get_config() -> Result<&'static Config> {
    CONFIG
        .get()
        .ok_or_else(|| Error::Config("Configuration has not been initialized".to_string()))
}
