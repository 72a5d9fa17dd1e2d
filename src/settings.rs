use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, sync::RwLock};

use crate::db::models::Brew;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct UserSettings {
    preferred_brew: Brew,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            preferred_brew: Brew::default(),
        }
    }
}

/// JSON-file settings under the app data dir. Remembers the last brew method
/// used so a new wizard starts from it.
pub struct SettingsStore {
    path: PathBuf,
    data: RwLock<UserSettings>,
}

impl SettingsStore {
    pub fn new(path: PathBuf) -> Result<Self> {
        let data = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read settings from {}", path.display()))?;
            serde_json::from_str(&contents).unwrap_or_default()
        } else {
            UserSettings::default()
        };

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    pub fn preferred_brew(&self) -> Brew {
        self.data.read().unwrap().preferred_brew
    }

    pub fn update_preferred_brew(&self, brew: Brew) -> Result<()> {
        {
            let mut guard = self.data.write().unwrap();
            guard.preferred_brew = brew;
            self.persist(&guard)?;
        }
        Ok(())
    }

    fn persist(&self, data: &UserSettings) -> Result<()> {
        let serialized = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("Failed to write settings to {}", self.path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("brewlog-settings-{name}-{}.json", std::process::id()))
    }

    #[test]
    fn missing_file_starts_from_defaults() {
        let path = temp_path("missing");
        let _ = fs::remove_file(&path);

        let store = SettingsStore::new(path).unwrap();
        assert_eq!(store.preferred_brew(), Brew::Coldbrew);
    }

    #[test]
    fn preferred_brew_persists_across_instances() {
        let path = temp_path("persist");
        let _ = fs::remove_file(&path);

        let store = SettingsStore::new(path.clone()).unwrap();
        store.update_preferred_brew(Brew::MokaPot).unwrap();

        let reloaded = SettingsStore::new(path.clone()).unwrap();
        assert_eq!(reloaded.preferred_brew(), Brew::MokaPot);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn corrupt_file_falls_back_to_defaults() {
        let path = temp_path("corrupt");
        fs::write(&path, "not json").unwrap();

        let store = SettingsStore::new(path.clone()).unwrap();
        assert_eq!(store.preferred_brew(), Brew::Coldbrew);

        let _ = fs::remove_file(&path);
    }
}
