//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

/// Development default values - NEVER use in production.
pub mod defaults {
    pub const DEV_DATABASE_URL: &str = "sqlite://data/school.db?mode=rwc";
    pub const DEV_HOST: &str = "127.0.0.1";
    pub const DEV_PORT: u16 = 8080;
    pub const DEV_DB_MAX_CONNECTIONS: u32 = 10;
    pub const DEV_DB_MIN_CONNECTIONS: u32 = 1;
    pub const DEV_AVATARS_DIR: &str = "./avatars";
    pub const DEV_MAX_AVATAR_SIZE: usize = 5_242_880; // 5MB per avatar
}

/// Runtime environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    /// Parse environment from string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Some(Self::Development),
            "production" | "prod" => Some(Self::Production),
            _ => None,
        }
    }

    /// Check if this is a development environment.
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    /// Check if this is a production environment.
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
        }
    }
}

/// Database connection settings.
#[derive(Debug, Clone)]
pub struct DatabaseSettings {
    /// SeaORM connection URL (postgres:// or sqlite://)
    pub url: String,
    /// Upper bound on pooled connections
    pub max_connections: u32,
    /// Connections kept open while idle
    pub min_connections: u32,
}

/// Avatar storage settings.
#[derive(Debug, Clone)]
pub struct AvatarSettings {
    /// Root directory for avatar files, one file per student
    pub dir: PathBuf,
    /// Largest accepted avatar payload in bytes
    pub max_size: usize,
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Runtime environment
    pub environment: Environment,
    /// Server host address
    pub host: String,
    /// Server port
    pub port: u16,
    /// Database settings
    pub database: DatabaseSettings,
    /// Avatar storage settings
    pub avatars: AvatarSettings,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `RUST_ENV`: Environment (development/production) - REQUIRED
    /// - `SCHOOL_HOST`: Server host (default: 127.0.0.1)
    /// - `SCHOOL_PORT`: Server port (default: 8080)
    /// - `SCHOOL_DATABASE_URL`: Database URL (must be overridden in production)
    /// - `SCHOOL_DB_MAX_CONNECTIONS`: Pool upper bound (default: 10)
    /// - `SCHOOL_DB_MIN_CONNECTIONS`: Pool lower bound (default: 1)
    /// - `SCHOOL_AVATARS_DIR`: Avatar storage directory (default: ./avatars)
    /// - `SCHOOL_MAX_AVATAR_SIZE`: Max avatar size in bytes (default: 5MB)
    pub fn from_env() -> Result<Self, ConfigError> {
        let env_str = env::var("RUST_ENV").map_err(|_| ConfigError::MissingEnvVar("RUST_ENV"))?;

        let environment = Environment::parse(&env_str).ok_or(ConfigError::InvalidValue(
            "RUST_ENV must be 'development' or 'production'",
        ))?;

        let host = env::var("SCHOOL_HOST").unwrap_or_else(|_| defaults::DEV_HOST.to_string());

        let port = env::var("SCHOOL_PORT")
            .unwrap_or_else(|_| defaults::DEV_PORT.to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidValue("SCHOOL_PORT must be a valid port number"))?;

        let database = DatabaseSettings {
            url: env::var("SCHOOL_DATABASE_URL")
                .unwrap_or_else(|_| defaults::DEV_DATABASE_URL.to_string()),
            max_connections: env::var("SCHOOL_DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| defaults::DEV_DB_MAX_CONNECTIONS.to_string())
                .parse::<u32>()
                .map_err(|_| {
                    ConfigError::InvalidValue("SCHOOL_DB_MAX_CONNECTIONS must be a valid number")
                })?,
            min_connections: env::var("SCHOOL_DB_MIN_CONNECTIONS")
                .unwrap_or_else(|_| defaults::DEV_DB_MIN_CONNECTIONS.to_string())
                .parse::<u32>()
                .map_err(|_| {
                    ConfigError::InvalidValue("SCHOOL_DB_MIN_CONNECTIONS must be a valid number")
                })?,
        };

        let avatars = AvatarSettings {
            dir: env::var("SCHOOL_AVATARS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(defaults::DEV_AVATARS_DIR)),
            max_size: env::var("SCHOOL_MAX_AVATAR_SIZE")
                .unwrap_or_else(|_| defaults::DEV_MAX_AVATAR_SIZE.to_string())
                .parse::<usize>()
                .map_err(|_| {
                    ConfigError::InvalidValue("SCHOOL_MAX_AVATAR_SIZE must be a valid number")
                })?,
        };

        let config = Config {
            environment,
            host,
            port,
            database,
            avatars,
        };

        if environment.is_production() {
            config.validate_production()?;
        }

        Ok(config)
    }

    /// Validate that production configuration does not use development defaults.
    fn validate_production(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if self.database.url == defaults::DEV_DATABASE_URL {
            errors.push(format!(
                "SCHOOL_DATABASE_URL is using development default '{}'. Set a production database URL.",
                defaults::DEV_DATABASE_URL
            ));
        }

        if self.database.min_connections > self.database.max_connections {
            errors.push(format!(
                "SCHOOL_DB_MIN_CONNECTIONS ({}) exceeds SCHOOL_DB_MAX_CONNECTIONS ({})",
                self.database.min_connections, self.database.max_connections
            ));
        }

        if self.avatars.max_size == 0 {
            errors.push("SCHOOL_MAX_AVATAR_SIZE must be greater than zero".to_string());
        }

        if !errors.is_empty() {
            return Err(ConfigError::ProductionValidation(errors));
        }

        Ok(())
    }

    /// Get the server bind address.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Check if running in development mode.
    pub fn is_development(&self) -> bool {
        self.environment.is_development()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(&'static str),

    #[error("Production configuration validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    ProductionValidation(Vec<String>),
}
