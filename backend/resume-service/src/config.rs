/// Configuration management for Resume Service
///
/// Everything is read from environment variables. In development a `.env`
/// file is loaded by the binary before `Config::from_env` runs.
use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application settings
    pub app: AppConfig,
    /// CORS configuration
    pub cors: CorsConfig,
    /// Database configuration
    pub database: DatabaseConfig,
    /// Bearer token validation
    pub auth: AuthConfig,
    /// Hot resume ranking
    pub ranking: RankingConfig,
    /// Client-facing presentation defaults
    pub presentation: PresentationConfig,
}

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment (development, staging, production)
    pub env: String,
    /// Server host to bind to
    pub host: String,
    /// Server port to bind to
    pub port: u16,
    /// actix-web worker count
    pub workers: usize,
    /// Emit JSON log lines instead of the human-readable format
    pub json_logs: bool,
}

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Comma-separated list of allowed origins
    pub allowed_origins: String,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database URL
    pub url: String,
    /// Max connections in pool
    pub max_connections: u32,
    /// Min idle connections kept open
    pub min_connections: u32,
    /// Seconds to wait for a pooled connection
    pub acquire_timeout_secs: u64,
    /// Run embedded migrations at startup
    pub run_migrations: bool,
}

/// Identity provider token settings
#[derive(Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HS256 shared secret used by the identity provider
    pub jwt_secret: String,
    /// Expected `iss` claim, if the provider sets one
    pub jwt_issuer: Option<String>,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"[REDACTED]")
            .field("jwt_issuer", &self.jwt_issuer)
            .finish()
    }
}

/// Hot ranking configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingConfig {
    /// Rows read per chunk while scanning for hot resumes
    pub chunk_size: usize,
}

/// Presentation defaults applied when building response payloads
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresentationConfig {
    /// Avatar used when a profile has none
    pub default_avatar: String,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            chunk_size: crate::services::hot_ranking::DEFAULT_CHUNK_SIZE,
        }
    }
}

impl Default for PresentationConfig {
    fn default() -> Self {
        Self {
            default_avatar: DEFAULT_AVATAR.to_string(),
        }
    }
}

pub const DEFAULT_AVATAR: &str = "/cartoon-avatar-user.png";

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        let app_env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());
        let is_production = app_env.eq_ignore_ascii_case("production");

        Ok(Config {
            app: AppConfig {
                env: app_env.clone(),
                host: std::env::var("RESUME_SERVICE_HOST")
                    .unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: std::env::var("RESUME_SERVICE_PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(8080),
                workers: std::env::var("RESUME_SERVICE_WORKERS")
                    .ok()
                    .and_then(|w| w.parse().ok())
                    .filter(|w: &usize| *w > 0)
                    .unwrap_or(4),
                json_logs: std::env::var("LOG_FORMAT")
                    .map(|v| v.eq_ignore_ascii_case("json"))
                    .unwrap_or(false),
            },
            cors: {
                let allowed_origins = match std::env::var("CORS_ALLOWED_ORIGINS") {
                    Ok(value) => value,
                    Err(_) if is_production => {
                        return Err("CORS_ALLOWED_ORIGINS must be set in production".to_string())
                    }
                    Err(_) => "http://localhost:3000".to_string(),
                };

                if is_production && allowed_origins.trim() == "*" {
                    return Err("CORS_ALLOWED_ORIGINS cannot be '*' in production".to_string());
                }

                CorsConfig { allowed_origins }
            },
            database: DatabaseConfig {
                url: std::env::var("DATABASE_URL")
                    .unwrap_or_else(|_| "postgresql://localhost/roastume".to_string()),
                max_connections: std::env::var("DATABASE_MAX_CONNECTIONS")
                    .ok()
                    .and_then(|c| c.parse().ok())
                    .unwrap_or(10),
                min_connections: std::env::var("DATABASE_MIN_CONNECTIONS")
                    .ok()
                    .and_then(|c| c.parse().ok())
                    .unwrap_or(1),
                acquire_timeout_secs: std::env::var("DATABASE_ACQUIRE_TIMEOUT_SECS")
                    .ok()
                    .and_then(|c| c.parse().ok())
                    .unwrap_or(5),
                run_migrations: std::env::var("DATABASE_RUN_MIGRATIONS")
                    .map(|v| v != "false" && v != "0")
                    .unwrap_or(true),
            },
            auth: {
                let jwt_secret = std::env::var("AUTH_JWT_SECRET").unwrap_or_default();
                if is_production && jwt_secret.trim().is_empty() {
                    return Err("AUTH_JWT_SECRET must be set in production".to_string());
                }

                AuthConfig {
                    jwt_secret,
                    jwt_issuer: std::env::var("AUTH_JWT_ISSUER")
                        .ok()
                        .filter(|s| !s.trim().is_empty()),
                }
            },
            ranking: RankingConfig {
                chunk_size: parse_env_or_default(
                    "HOT_RANKING_CHUNK_SIZE",
                    crate::services::hot_ranking::DEFAULT_CHUNK_SIZE,
                )?
                .max(1),
            },
            presentation: PresentationConfig {
                default_avatar: std::env::var("DEFAULT_AVATAR_URL")
                    .unwrap_or_else(|_| DEFAULT_AVATAR.to_string()),
            },
        })
    }
}

fn parse_env_or_default(key: &str, default: usize) -> Result<usize, String> {
    match std::env::var(key) {
        Ok(val) => val
            .parse()
            .map_err(|e| format!("Failed to parse {}='{}': {}", key, val, e)),
        Err(_) => Ok(default),
    }
}
