//! Console configuration.
//!
//! REMINDCARE_HOME resolution order:
//! 1. `REMINDCARE_HOME` environment variable (if set)
//! 2. `~/.config/remindcare` (default)

use std::path::PathBuf;

/// File inside the home directory that holds the persisted token.
pub const SESSION_FILE: &str = "session.json";

#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    /// Base URL of the API server, without the `/api/v1` prefix.
    pub api_url: String,
    /// Directory holding the session file.
    pub home: PathBuf,
}

impl ConsoleConfig {
    /// | Env Var             | Default                  |
    /// |---------------------|--------------------------|
    /// | `REMINDCARE_API_URL`| `http://localhost:3000`  |
    /// | `REMINDCARE_HOME`   | `~/.config/remindcare`   |
    pub fn from_env() -> anyhow::Result<Self> {
        let api_url = std::env::var("REMINDCARE_API_URL")
            .unwrap_or_else(|_| "http://localhost:3000".into())
            .trim_end_matches('/')
            .to_string();

        let home = match std::env::var("REMINDCARE_HOME") {
            Ok(home) => PathBuf::from(home),
            Err(_) => dirs::home_dir()
                .map(|h| h.join(".config").join("remindcare"))
                .ok_or_else(|| anyhow::anyhow!("Cannot determine home directory"))?,
        };

        Ok(Self { api_url, home })
    }

    pub fn session_path(&self) -> PathBuf {
        self.home.join(SESSION_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_file_lives_in_home() {
        let config = ConsoleConfig {
            api_url: "http://localhost:3000".into(),
            home: PathBuf::from("/tmp/remindcare"),
        };
        assert_eq!(
            config.session_path(),
            PathBuf::from("/tmp/remindcare/session.json")
        );
    }
}
