use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::{
    errors::Result,
    utils::{app_data_dir, ensure_dir, settings_file_in},
};

const TMP_SUFFIX: &str = "tmp";

/// User-facing preferences persisted next to the bill collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Settings {
    pub user_name: String,
    pub currency: String,
    pub default_reminder_days: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            user_name: "Usuário".into(),
            currency: "R$".into(),
            default_reminder_days: 1,
        }
    }
}

/// Loads and saves [`Settings`], falling back to defaults when the file is
/// missing.
pub struct SettingsManager {
    path: PathBuf,
}

impl SettingsManager {
    pub fn new() -> Result<Self> {
        Self::from_base(app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self> {
        Self::from_base(base)
    }

    fn from_base(base: PathBuf) -> Result<Self> {
        ensure_dir(&base)?;
        Ok(Self {
            path: settings_file_in(&base),
        })
    }

    pub fn load(&self) -> Result<Settings> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(Settings::default())
        }
    }

    pub fn save(&self, settings: &Settings) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            ensure_dir(parent)?;
        }
        let json = serde_json::to_string_pretty(settings)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        tracing::info!(path = %self.path.display(), "saved settings");
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn load_defaults_when_file_missing() {
        let temp = TempDir::new().expect("temp dir");
        let manager = SettingsManager::with_base_dir(temp.path().to_path_buf()).expect("manager");
        let settings = manager.load().expect("load");
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.default_reminder_days, 1);
    }

    #[test]
    fn save_then_load_roundtrip() {
        let temp = TempDir::new().expect("temp dir");
        let manager = SettingsManager::with_base_dir(temp.path().to_path_buf()).expect("manager");
        let settings = Settings {
            user_name: "Ana".into(),
            currency: "R$".into(),
            default_reminder_days: 3,
        };
        manager.save(&settings).expect("save");
        assert_eq!(manager.load().expect("load"), settings);
    }
}
