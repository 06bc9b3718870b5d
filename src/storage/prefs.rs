use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// UI preferences that survive logout. Currently just the dark-mode flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Prefs {
    pub dark_mode: bool,
}

#[derive(Debug, Clone)]
pub struct PrefsStorage {
    dir: PathBuf,
}

impl PrefsStorage {
    pub fn new() -> Self {
        Self {
            dir: super::default_data_dir(),
        }
    }

    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path(&self) -> PathBuf {
        self.dir.join("prefs.toml")
    }

    /// Defaults on any read or parse error.
    pub fn load(&self) -> Prefs {
        std::fs::read_to_string(self.path())
            .ok()
            .and_then(|content| toml::from_str(&content).ok())
            .unwrap_or_default()
    }

    pub fn save(&self, prefs: &Prefs) -> anyhow::Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        let content = toml::to_string_pretty(prefs)?;
        std::fs::write(self.path(), content)?;
        Ok(())
    }
}

impl Default for PrefsStorage {
    fn default() -> Self {
        Self::new()
    }
}
