//! Persisted login session.
//!
//! Holds the bearer token returned by `auth/login` so the command line and a
//! "remember me" GUI login survive restarts. Stored next to the data files as
//! `session.toml`.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::config::project_dirs;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user_id: Option<i64>,
}

impl Session {
    pub fn path() -> Result<PathBuf> {
        let dirs = project_dirs()?;
        let data_dir = dirs.data_dir();
        std::fs::create_dir_all(data_dir)?;
        Ok(data_dir.join("session.toml"))
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        std::fs::write(path, toml::to_string_pretty(self)?)?;
        tracing::debug!("Saved session to {:?}", path);
        Ok(())
    }

    /// Remove the stored session
    pub fn clear() -> Result<()> {
        let path = Self::path()?;
        if path.exists() {
            std::fs::remove_file(&path)?;
            tracing::debug!("Removed session file {:?}", path);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.toml");

        assert_eq!(Session::load_from(&path).unwrap(), Session::default());

        let session = Session {
            token: Some("token-123".to_string()),
            user_id: Some(42),
        };
        session.save_to(&path).unwrap();
        assert_eq!(Session::load_from(&path).unwrap(), session);
    }
}
