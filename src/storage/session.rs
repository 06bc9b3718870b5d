use std::path::PathBuf;

use crate::state::session::Session;

/// On-disk home of the persisted session record. Records are written whole;
/// a half-formed session is never observable on disk.
#[derive(Debug, Clone)]
pub struct SessionStorage {
    dir: PathBuf,
}

impl SessionStorage {
    pub fn new() -> Self {
        Self {
            dir: super::default_data_dir(),
        }
    }

    /// Point at an explicit directory instead of the platform data dir.
    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path(&self) -> PathBuf {
        self.dir.join("session.toml")
    }

    /// Load the persisted session. Missing or malformed records read as "no
    /// session" rather than an error.
    pub fn load(&self) -> Option<Session> {
        let content = std::fs::read_to_string(self.path()).ok()?;
        toml::from_str(&content).ok()
    }

    pub fn save(&self, session: &Session) -> anyhow::Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        let content = toml::to_string_pretty(session)?;
        std::fs::write(self.path(), content)?;
        Ok(())
    }

    /// Remove the persisted record. Succeeds when none exists.
    pub fn clear(&self) -> anyhow::Result<()> {
        match std::fs::remove_file(self.path()) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

impl Default for SessionStorage {
    fn default() -> Self {
        Self::new()
    }
}
