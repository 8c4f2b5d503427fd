use std::env;
use tracing::warn;

/// Which record store the API talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// Hosted document store reached over its REST interface.
    Rest,
    /// Process-local store, lost on restart.
    Memory,
}

impl StoreBackend {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "rest" | "remote" => Some(Self::Rest),
            "memory" | "in-memory" | "inmemory" => Some(Self::Memory),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub store_backend: StoreBackend,
    pub store_url: String,
    pub store_api_key: String,
    pub store_timeout_seconds: u64,
    pub api_host: String,
    pub api_port: u16,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let store_backend = match env::var("STORE_BACKEND") {
            Ok(value) => StoreBackend::parse(&value).unwrap_or_else(|| {
                warn!("Unknown STORE_BACKEND '{}', using rest", value);
                StoreBackend::Rest
            }),
            Err(_) => {
                warn!("STORE_BACKEND not set, using rest");
                StoreBackend::Rest
            }
        };

        let config = Self {
            store_backend,
            store_url: env::var("STORE_URL")
                .unwrap_or_else(|_| {
                    warn!("STORE_URL not set, using empty value");
                    String::new()
                }),
            store_api_key: env::var("STORE_API_KEY")
                .unwrap_or_else(|_| {
                    warn!("STORE_API_KEY not set, using empty value");
                    String::new()
                }),
            store_timeout_seconds: env::var("STORE_TIMEOUT_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
            api_host: env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            api_port: env::var("API_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
        };

        if !config.is_configured() {
            warn!("Application not fully configured - missing environment variables");
        }

        config
    }

    /// In-memory configuration, used by tests and local runs.
    pub fn in_memory() -> Self {
        Self {
            store_backend: StoreBackend::Memory,
            store_url: String::new(),
            store_api_key: String::new(),
            store_timeout_seconds: 30,
            api_host: "127.0.0.1".to_string(),
            api_port: 3000,
        }
    }

    pub fn is_configured(&self) -> bool {
        match self.store_backend {
            StoreBackend::Memory => true,
            StoreBackend::Rest => !self.store_url.is_empty() && !self.store_api_key.is_empty(),
        }
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.api_host, self.api_port)
    }
}
