//! Application configuration.
//!
//! Settings are read once at process start, from `config.toml` (or the file
//! named by `CONFIG_PATH`) when present and from environment variables
//! otherwise. The resulting [`AppConfig`] is passed explicitly to whatever
//! needs it; nothing here is global.

use anyhow::{anyhow, Result};
use serde::Deserialize;

pub const DEFAULT_DEV_JWT_SECRET: &str = "test_secret_key";

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub features: FeatureFlags,
    #[serde(default)]
    pub api: ApiConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
    /// Emit JSON logs instead of the compact human format.
    #[serde(default)]
    pub log_json: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 8000, worker_threads: Some(4), log_json: false }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
    #[serde(default = "default_max_lifetime")]
    pub max_lifetime_secs: u64,
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,
    #[serde(default)]
    pub sqlx_logging: bool,
    /// Apply pending migrations when the server starts.
    #[serde(default)]
    pub auto_migrate: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout_secs: default_connect_timeout(),
            idle_timeout_secs: default_idle_timeout(),
            max_lifetime_secs: default_max_lifetime(),
            acquire_timeout_secs: default_acquire_timeout(),
            sqlx_logging: false,
            auto_migrate: false,
        }
    }
}

fn default_max_connections() -> u32 { 10 }
fn default_min_connections() -> u32 { 2 }
fn default_connect_timeout() -> u64 { 30 }
fn default_idle_timeout() -> u64 { 600 }
fn default_max_lifetime() -> u64 { 3600 }
fn default_acquire_timeout() -> u64 { 30 }

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    #[serde(default)]
    pub jwt_secret: String,
    #[serde(default = "default_jwt_algorithm")]
    pub jwt_algorithm: String,
    #[serde(default = "default_token_minutes")]
    pub access_token_expire_minutes: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            jwt_algorithm: default_jwt_algorithm(),
            access_token_expire_minutes: default_token_minutes(),
        }
    }
}

fn default_jwt_algorithm() -> String { "HS256".into() }
// 24 hours
fn default_token_minutes() -> u64 { 60 * 24 }

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
pub struct FeatureFlags {
    #[serde(default = "enabled")]
    pub enable_ai_features: bool,
    #[serde(default = "enabled")]
    pub enable_analytics: bool,
}

impl Default for FeatureFlags {
    fn default() -> Self { Self { enable_ai_features: true, enable_analytics: true } }
}

fn enabled() -> bool { true }

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_prefix")]
    pub prefix: String,
    #[serde(default = "default_project_name")]
    pub project_name: String,
    #[serde(default = "default_version")]
    pub version: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self { prefix: default_prefix(), project_name: default_project_name(), version: default_version() }
    }
}

fn default_prefix() -> String { "/api/v1".into() }
fn default_project_name() -> String { "LEARN-X API".into() }
fn default_version() -> String { "1.0.0".into() }

pub fn config_path() -> String {
    std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string())
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

/// Parse a boolean flag the way the deployment scripts write them:
/// only a case-insensitive `true` enables.
fn env_flag(name: &str) -> Option<bool> {
    std::env::var(name).ok().map(|v| v.trim().eq_ignore_ascii_case("true"))
}

impl AppConfig {
    /// Load from file if one exists, otherwise start from defaults; then
    /// apply env overrides and validate. A file that exists but does not
    /// parse is an error.
    pub fn load() -> Result<Self> {
        let path = config_path();
        let mut cfg = if std::path::Path::new(&path).exists() {
            load_from_file(&path)?
        } else {
            AppConfig::default()
        };
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize_from_env();
        self.server.normalize()?;
        self.database.normalize_from_env();
        self.database.validate()?;
        self.auth.normalize_from_env();
        self.auth.validate()?;
        self.features.normalize_from_env();
        self.api.validate()?;
        Ok(())
    }
}

impl ServerConfig {
    fn normalize_from_env(&mut self) {
        if let Ok(host) = std::env::var("SERVER_HOST") {
            self.host = host;
        }
        if let Some(port) = std::env::var("SERVER_PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
            self.port = port;
        }
    }

    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        match self.worker_threads {
            Some(0) | None => self.worker_threads = Some(4),
            Some(_) => {}
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl DatabaseConfig {
    /// Database settings taken purely from the environment.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        cfg.normalize_from_env();
        cfg
    }

    pub fn normalize_from_env(&mut self) {
        self.override_url(std::env::var("DATABASE_URL").ok());
    }

    /// A non-blank `DATABASE_URL` replaces the file's URL.
    fn override_url(&mut self, url: Option<String>) {
        if let Some(url) = url.filter(|u| !u.trim().is_empty()) {
            self.url = url;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(anyhow!("database.url is empty; set it in config.toml or DATABASE_URL"));
        }
        let lower = self.url.to_lowercase();
        if !(lower.starts_with("postgresql://") || lower.starts_with("postgres://")) {
            return Err(anyhow!("database.url must start with postgresql:// or postgres://"));
        }
        if self.min_connections == 0 {
            return Err(anyhow!("database.min_connections must be >= 1"));
        }
        if self.max_connections < self.min_connections {
            return Err(anyhow!("database.max_connections must be >= min_connections"));
        }
        if self.connect_timeout_secs == 0 || self.acquire_timeout_secs == 0 {
            return Err(anyhow!("database timeouts must be a positive number of seconds"));
        }
        Ok(())
    }
}

impl AuthConfig {
    fn normalize_from_env(&mut self) {
        if let Ok(secret) = std::env::var("JWT_SECRET") {
            self.jwt_secret = secret;
        }
        if self.jwt_secret.trim().is_empty() {
            self.jwt_secret = DEFAULT_DEV_JWT_SECRET.to_string();
        }
    }

    fn validate(&self) -> Result<()> {
        if self.access_token_expire_minutes == 0 {
            return Err(anyhow!("auth.access_token_expire_minutes must be positive"));
        }
        if !self.jwt_algorithm.starts_with("HS") {
            return Err(anyhow!("auth.jwt_algorithm must be an HMAC algorithm (HS256/HS384/HS512)"));
        }
        Ok(())
    }

    pub fn uses_dev_secret(&self) -> bool {
        self.jwt_secret == DEFAULT_DEV_JWT_SECRET
    }
}

impl FeatureFlags {
    fn normalize_from_env(&mut self) {
        if let Some(v) = env_flag("ENABLE_AI_FEATURES") {
            self.enable_ai_features = v;
        }
        if let Some(v) = env_flag("ENABLE_ANALYTICS") {
            self.enable_analytics = v;
        }
    }
}

impl ApiConfig {
    fn validate(&self) -> Result<()> {
        if !self.prefix.starts_with('/') || self.prefix.ends_with('/') {
            return Err(anyhow!("api.prefix must start with '/' and must not end with '/'"));
        }
        Ok(())
    }
}
