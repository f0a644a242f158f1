// Application configuration, loaded once at startup and shared read-only

use std::fmt;

/// Token signing configuration. The secret is process-wide and immutable
/// after startup; Debug output redacts it so it can never reach the logs.
#[derive(Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub ttl_seconds: i64,
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("ttl_seconds", &self.ttl_seconds)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub jwt: JwtConfig,
}

impl AppConfig {
    /// Load configuration from the environment.
    /// DATABASE_URL and JWT_SECRET are required; the rest have defaults.
    pub fn from_env() -> Result<Self, String> {
        let database_url = std::env::var("DATABASE_URL")
            .map_err(|_| "DATABASE_URL must be set in environment".to_string())?;
        let secret = std::env::var("JWT_SECRET")
            .map_err(|_| "JWT_SECRET must be set in environment".to_string())?;
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = std::env::var("PORT")
            .ok()
            .and_then(|v| v.parse::<u16>().ok())
            .unwrap_or(5000);
        let ttl_seconds = std::env::var("JWT_TTL_SECONDS")
            .ok()
            .and_then(|v| v.parse::<i64>().ok())
            .unwrap_or(3600);

        Ok(Self {
            database_url,
            host,
            port,
            jwt: JwtConfig {
                secret,
                ttl_seconds,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_redacts_secret() {
        let config = JwtConfig {
            secret: "super-secret-value".to_string(),
            ttl_seconds: 3600,
        };
        let printed = format!("{:?}", config);
        assert!(!printed.contains("super-secret-value"));
        assert!(printed.contains("<redacted>"));
    }
}
