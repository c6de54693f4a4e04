use std::net::SocketAddr;

use crate::error::ServiceError;

pub const DEFAULT_MODEL_ID: &str = "meta-llama/llama-3-70b-instruct";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_HOST: &str = "0.0.0.0";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable logging for development
    Pretty,
    /// Structured JSON logging for production
    Json,
}

impl LogFormat {
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("pretty") => LogFormat::Pretty,
            _ => LogFormat::Json,
        }
    }
}

/// Runtime settings read from the environment once at startup
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub openrouter_api_key: String,
    pub host: String,
    pub port: u16,
    pub model_id: String,
    pub log_format: LogFormat,
}

impl ServiceConfig {
    pub fn from_env() -> Result<Self, ServiceError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` uses the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ServiceError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let openrouter_api_key = lookup("OPENROUTER_API_KEY")
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| ServiceError::Config("OPENROUTER_API_KEY not set".to_string()))?;

        let port = match lookup("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|_| ServiceError::Config(format!("PORT '{}' is not a valid port", raw)))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            openrouter_api_key,
            host: lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            model_id: lookup("MODEL_ID").unwrap_or_else(|| DEFAULT_MODEL_ID.to_string()),
            log_format: LogFormat::parse(lookup("LOG_FORMAT").as_deref()),
        })
    }

    pub fn bind_address(&self) -> Result<SocketAddr, ServiceError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| ServiceError::Config(format!("Invalid bind address: {}", e)))
    }
}
