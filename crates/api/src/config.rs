use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use valentine_db::rest_store::RestConfig;

use crate::auth::jwt::{JwtConfig, DEFAULT_SESSION_EXPIRY_MINS, MAX_SESSION_EXPIRY_MINS};

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Frontend login page linked from the share page's not-found view.
    pub login_url: String,
    /// Session token configuration.
    pub jwt: JwtConfig,
    /// Which template store to use and how to reach it.
    pub store: StoreConfig,
}

/// Template store backend selection.
#[derive(Clone)]
pub enum StoreConfig {
    /// PostgreSQL at `DATABASE_URL`.
    Postgres { database_url: String },
    /// Hosted PostgREST endpoint with a service-role key.
    Rest(RestConfig),
    /// In-process store, optionally seeded from a JSON array of records.
    Memory { seed_path: Option<PathBuf> },
}

impl StoreConfig {
    /// Short backend name for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Postgres { .. } => "postgres",
            Self::Rest(_) => "supabase",
            Self::Memory { .. } => "memory",
        }
    }
}

impl fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // The URL usually embeds the database password.
            Self::Postgres { .. } => f
                .debug_struct("Postgres")
                .field("database_url", &"***")
                .finish(),
            Self::Rest(rest) => f.debug_tuple("Rest").field(rest).finish(),
            Self::Memory { seed_path } => f
                .debug_struct("Memory")
                .field("seed_path", seed_path)
                .finish(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} has an invalid value '{value}'")]
    Invalid { name: &'static str, value: String },

    #[error("Unknown STORE_BACKEND '{0}' (expected postgres, supabase, or memory)")]
    UnknownBackend(String),
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                     | Default                            |
    /// |-----------------------------|------------------------------------|
    /// | `HOST`                      | `0.0.0.0`                          |
    /// | `PORT`                      | `3000`                             |
    /// | `CORS_ORIGINS`              | `http://localhost:5173`            |
    /// | `REQUEST_TIMEOUT_SECS`      | `30`                               |
    /// | `LOGIN_URL`                 | `http://localhost:5173/auth/login` |
    /// | `JWT_SECRET`                | **required**                       |
    /// | `JWT_EXPIRY_MINS`           | `60` (at most 30 days)             |
    /// | `STORE_BACKEND`             | `postgres`                         |
    /// | `DATABASE_URL`              | required for `postgres`            |
    /// | `SUPABASE_URL`              | required for `supabase`            |
    /// | `SUPABASE_SERVICE_ROLE_KEY` | required for `supabase`            |
    /// | `STORE_TABLE`               | `projects`                         |
    /// | `MEMORY_SEED_PATH`          | unset                              |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let vars = Vars(&lookup);

        let host = vars.or("HOST", "0.0.0.0");
        let port: u16 = vars.parse("PORT", 3000)?;

        let cors_origins: Vec<String> = vars
            .or("CORS_ORIGINS", "http://localhost:5173")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = vars.parse("REQUEST_TIMEOUT_SECS", 30)?;
        let login_url = vars.or("LOGIN_URL", "http://localhost:5173/auth/login");

        let jwt = JwtConfig {
            secret: vars.required("JWT_SECRET")?,
            session_expiry_mins: vars.parse("JWT_EXPIRY_MINS", DEFAULT_SESSION_EXPIRY_MINS)?,
        };
        if !(1..=MAX_SESSION_EXPIRY_MINS).contains(&jwt.session_expiry_mins) {
            return Err(ConfigError::Invalid {
                name: "JWT_EXPIRY_MINS",
                value: jwt.session_expiry_mins.to_string(),
            });
        }

        let store = match vars.or("STORE_BACKEND", "postgres").as_str() {
            "postgres" => StoreConfig::Postgres {
                database_url: vars.required("DATABASE_URL")?,
            },
            "supabase" => StoreConfig::Rest(RestConfig {
                base_url: vars.required("SUPABASE_URL")?,
                service_role_key: vars.required("SUPABASE_SERVICE_ROLE_KEY")?,
                table: vars.or("STORE_TABLE", "projects"),
            }),
            "memory" => StoreConfig::Memory {
                seed_path: vars.get("MEMORY_SEED_PATH").map(PathBuf::from),
            },
            other => return Err(ConfigError::UnknownBackend(other.to_string())),
        };

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            login_url,
            jwt,
            store,
        })
    }
}

/// Variable lookup helpers. Empty values count as unset.
struct Vars<'a, F: Fn(&str) -> Option<String>>(&'a F);

impl<F: Fn(&str) -> Option<String>> Vars<'_, F> {
    fn get(&self, name: &str) -> Option<String> {
        (self.0)(name).filter(|v| !v.trim().is_empty())
    }

    fn or(&self, name: &str, default: &str) -> String {
        self.get(name).unwrap_or_else(|| default.to_string())
    }

    fn required(&self, name: &'static str) -> Result<String, ConfigError> {
        self.get(name).ok_or(ConfigError::Missing(name))
    }

    fn parse<T: FromStr>(&self, name: &'static str, default: T) -> Result<T, ConfigError> {
        match self.get(name) {
            None => Ok(default),
            Some(value) => value
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid { name, value }),
        }
    }
}
