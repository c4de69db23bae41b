//! Server configuration, read once at startup from the environment (after
//! `.env` is loaded by `dotenvy`).

use std::str::FromStr;

use crate::auth::jwt::JwtConfig;

/// `key` from the environment, or `default` when unset.
fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse `key` from the environment, falling back to `default` when unset.
///
/// # Panics
///
/// Panics when the variable is set but does not parse.
fn env_parse<T: FromStr>(key: &str, default: T) -> T {
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .unwrap_or_else(|_| panic!("{key} has an invalid value: '{raw}'")),
        Err(_) => default,
    }
}

/// The staff account seeded at startup.
#[derive(Debug, Clone)]
pub struct DemoAccount {
    pub name: String,
    pub email: String,
    /// Plaintext; hashed with Argon2id before it reaches the data layer.
    pub password: String,
}

impl DemoAccount {
    /// | Env Var         | Default              |
    /// |-----------------|----------------------|
    /// | `DEMO_NAME`     | `Dr. Jane Smith`     |
    /// | `DEMO_EMAIL`    | `doctor@example.com` |
    /// | `DEMO_PASSWORD` | `password`           |
    pub fn from_env() -> Self {
        Self {
            name: env_or("DEMO_NAME", "Dr. Jane Smith"),
            email: env_or("DEMO_EMAIL", "doctor@example.com"),
            password: env_or("DEMO_PASSWORD", "password"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Dashboard origins allowed by CORS.
    pub cors_origins: Vec<String>,
    pub request_timeout_secs: u64,
    pub jwt: JwtConfig,
    pub demo: DemoAccount,
}

impl ServerConfig {
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    ///
    /// `CORS_ORIGINS` is comma-separated. See [`JwtConfig::from_env`] and
    /// [`DemoAccount::from_env`] for the rest.
    pub fn from_env() -> Self {
        Self {
            host: env_or("HOST", "0.0.0.0"),
            port: env_parse("PORT", 3000),
            cors_origins: split_origins(&env_or("CORS_ORIGINS", "http://localhost:5173")),
            request_timeout_secs: env_parse("REQUEST_TIMEOUT_SECS", 30),
            jwt: JwtConfig::from_env(),
            demo: DemoAccount::from_env(),
        }
    }
}

fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origins_are_trimmed_and_blank_entries_dropped() {
        assert_eq!(
            split_origins(" http://localhost:5173, ,https://clinic.example.com,"),
            vec!["http://localhost:5173", "https://clinic.example.com"]
        );
    }

    #[test]
    fn unset_variable_uses_default() {
        assert_eq!(env_parse::<u16>("REMINDCARE_TEST_UNSET_PORT", 3000), 3000);
        assert_eq!(env_or("REMINDCARE_TEST_UNSET_HOST", "0.0.0.0"), "0.0.0.0");
    }
}
