/// Server configuration loaded from environment variables.
///
/// Everything except the database URL has a default suitable for local
/// development. The struct is built once at startup and shared through
/// [`AppState`](crate::state::AppState).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// PostgreSQL connection string (required, `DATABASE_URL`).
    pub database_url: String,
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Maximum size of the connection pool (default: `10`).
    pub db_max_connections: u32,
    /// Maximum accepted request body, in bytes, for ticket uploads (default: 10 MiB).
    pub max_upload_bytes: usize,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default    |
    /// |------------------------|------------|
    /// | `DATABASE_URL`         | (required) |
    /// | `HOST`                 | `0.0.0.0`  |
    /// | `PORT`                 | `3000`     |
    /// | `REQUEST_TIMEOUT_SECS` | `30`       |
    /// | `DB_MAX_CONNECTIONS`   | `10`       |
    /// | `MAX_UPLOAD_BYTES`     | `10485760` |
    ///
    /// Panics on a missing `DATABASE_URL` or an unparsable number, so that
    /// misconfiguration fails at startup rather than on the first request.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let database_url = lookup("DATABASE_URL").expect("DATABASE_URL must be set");

        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".into());

        let port: u16 = lookup("PORT")
            .unwrap_or_else(|| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let request_timeout_secs: u64 = lookup("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let db_max_connections: u32 = lookup("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|| "10".into())
            .parse()
            .expect("DB_MAX_CONNECTIONS must be a valid u32");

        let max_upload_bytes: usize = lookup("MAX_UPLOAD_BYTES")
            .unwrap_or_else(|| (10 * 1024 * 1024).to_string())
            .parse()
            .expect("MAX_UPLOAD_BYTES must be a valid usize");

        Self {
            database_url,
            host,
            port,
            request_timeout_secs,
            db_max_connections,
            max_upload_bytes,
        }
    }
}
