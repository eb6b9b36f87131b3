//! Configuration module

use std::env;

/// Longest session lifetime accepted from `JWT_EXPIRATION_HOURS` (one year)
pub const MAX_SESSION_HOURS: u64 = 24 * 365;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,

    /// Database connection URL (in-memory settings store when unset)
    pub database_url: Option<String>,

    /// JWT secret key for session tokens
    pub jwt_secret: String,

    /// JWT expiration in hours, within `1..=MAX_SESSION_HOURS`
    pub jwt_expiration_hours: u64,

    /// Administrator login name
    pub admin_username: String,

    /// Argon2 PHC string for the administrator password
    pub admin_password_hash: Option<String>,

    /// Site name shown in page titles
    pub site_title: String,

    /// Extra markup emitted into every page head
    pub site_head_html: String,

    /// Environment (development, production)
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),

            database_url: env::var("DATABASE_URL")
                .ok()
                .filter(|url| !url.trim().is_empty()),

            jwt_secret: env::var("JWT_SECRET")
                .unwrap_or_else(|_| "maintenance-dev-secret-change-in-production".to_string()),

            jwt_expiration_hours: session_hours(env::var("JWT_EXPIRATION_HOURS").ok().as_deref()),

            admin_username: env::var("ADMIN_USERNAME")
                .unwrap_or_else(|_| "admin".to_string()),

            admin_password_hash: env::var("ADMIN_PASSWORD_HASH")
                .ok()
                .filter(|hash| !hash.trim().is_empty()),

            site_title: env::var("SITE_TITLE")
                .unwrap_or_else(|_| "My Site".to_string()),

            site_head_html: env::var("SITE_HEAD_HTML").unwrap_or_default(),

            environment: env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string()),
        }
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

fn session_hours(raw: Option<&str>) -> u64 {
    raw.and_then(|h| h.trim().parse::<u64>().ok())
        .map(|h| h.clamp(1, MAX_SESSION_HOURS))
        .unwrap_or(24)
}
