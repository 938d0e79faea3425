use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const MAX_RECENT_FILES: usize = 10;

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSettings {
    /// Session that was open when the host last shut down
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_session: Option<PathBuf>,
    /// Most recent first
    #[serde(default)]
    pub recent_files: Vec<PathBuf>,
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse settings: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to encode settings: {0}")]
    Encode(#[from] toml::ser::Error),
}

/// User settings and where they are stored. In-memory settings never touch
/// the filesystem.
#[derive(Debug, Default)]
pub struct Settings {
    path: Option<PathBuf>,
    user: UserSettings,
}

impl Settings {
    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("ember").join("settings.toml"))
    }

    /// Load from the platform config directory, falling back to defaults.
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(path),
            None => Self::in_memory(),
        }
    }

    /// Load from `path`. A missing or unreadable file yields defaults bound
    /// to the same path.
    pub fn load_from(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        match Self::try_load_from(&path) {
            Ok(settings) => settings,
            Err(SettingsError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => Self {
                path: Some(path),
                user: UserSettings::default(),
            },
            Err(e) => {
                log::warn!(target: "settings", "ignoring {}: {e}", path.display());
                Self {
                    path: Some(path),
                    user: UserSettings::default(),
                }
            }
        }
    }

    pub fn try_load_from(path: &Path) -> Result<Self, SettingsError> {
        let contents = fs::read_to_string(path)?;
        let user = toml::from_str(&contents)?;
        Ok(Self {
            path: Some(path.to_path_buf()),
            user,
        })
    }

    pub fn in_memory() -> Self {
        Self::default()
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn user(&self) -> &UserSettings {
        &self.user
    }

    pub fn save(&self) -> Result<(), SettingsError> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(&self.user)?;
        fs::write(path, contents)?;
        Ok(())
    }

    pub fn last_session(&self) -> Option<&Path> {
        self.user.last_session.as_deref()
    }

    pub fn set_last_session(&mut self, path: impl Into<PathBuf>) {
        self.user.last_session = Some(path.into());
    }

    pub fn recent_files(&self) -> &[PathBuf] {
        &self.user.recent_files
    }

    pub fn add_recent_file(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        self.user.recent_files.retain(|p| *p != path);
        self.user.recent_files.insert(0, path);
        self.user.recent_files.truncate(MAX_RECENT_FILES);
    }
}
