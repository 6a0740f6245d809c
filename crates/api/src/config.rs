use crate::auth::jwt::JwtConfig;

/// Credentials for the first admin account, created at startup when the
/// `admin_users` table is empty.
#[derive(Debug, Clone)]
pub struct BootstrapAdmin {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl BootstrapAdmin {
    /// Read `BOOTSTRAP_ADMIN_USERNAME` / `_EMAIL` / `_PASSWORD`. `None`
    /// unless username and password are both set.
    pub fn from_env() -> Option<Self> {
        let username = std::env::var("BOOTSTRAP_ADMIN_USERNAME").ok()?;
        let password = std::env::var("BOOTSTRAP_ADMIN_PASSWORD").ok()?;
        let email = std::env::var("BOOTSTRAP_ADMIN_EMAIL")
            .unwrap_or_else(|_| format!("{username}@localhost"));
        Some(Self {
            username,
            email,
            password,
        })
    }
}

/// Server configuration loaded from environment variables.
///
/// Defaults suit local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// How long to wait for background tasks after the server stops
    /// (default: `10`).
    pub shutdown_timeout_secs: u64,
    pub jwt: JwtConfig,
    pub bootstrap_admin: Option<BootstrapAdmin>,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                     | Default                 |
    /// |-----------------------------|-------------------------|
    /// | `HOST`                      | `0.0.0.0`               |
    /// | `PORT`                      | `3000`                  |
    /// | `CORS_ORIGINS`              | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`      | `30`                    |
    /// | `SHUTDOWN_TIMEOUT_SECS`     | `10`                    |
    /// | `BOOTSTRAP_ADMIN_USERNAME`  | unset                   |
    /// | `BOOTSTRAP_ADMIN_PASSWORD`  | unset                   |
    /// | `BOOTSTRAP_ADMIN_EMAIL`     | `<username>@localhost`  |
    ///
    /// JWT settings are documented on [`JwtConfig::from_env`].
    ///
    /// # Panics
    ///
    /// Panics on unparseable numeric values.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins = parse_origins(
            &std::env::var("CORS_ORIGINS").unwrap_or_else(|_| "http://localhost:5173".into()),
        );

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let shutdown_timeout_secs: u64 = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "10".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            jwt: JwtConfig::from_env(),
            bootstrap_admin: BootstrapAdmin::from_env(),
        }
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origins_are_trimmed_and_blank_entries_dropped() {
        assert_eq!(
            parse_origins(" http://a.test , ,http://b.test"),
            vec!["http://a.test", "http://b.test"]
        );
        assert!(parse_origins("").is_empty());
    }
}
