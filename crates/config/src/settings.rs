use color_eyre::eyre::{Result, bail};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

const APP_NAME: &str = "filedeck";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Directory every listing path is resolved against.
    #[serde(default = "default_storage_root")]
    pub storage_root: PathBuf,
    /// Capacity ceiling used for the file-count percentage.
    #[serde(default = "default_max_files")]
    pub max_files: usize,
    /// Prefix for the public link of each entry.
    #[serde(default = "default_public_url_prefix")]
    pub public_url_prefix: String,
    /// Deepest folder nesting a walk will descend into.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
    /// Filesystem calls allowed in flight at once during one walk.
    #[serde(default = "default_max_concurrent_io")]
    pub max_concurrent_io: usize,
}

// Default value functions for serde
fn default_storage_root() -> PathBuf {
    PathBuf::from("./public/files")
}
const fn default_max_files() -> usize {
    500
}
fn default_public_url_prefix() -> String {
    "/files/".to_string()
}
const fn default_max_depth() -> usize {
    64
}
fn default_max_concurrent_io() -> usize {
    num_cpus::get() * 4
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            storage_root: default_storage_root(),
            max_files: default_max_files(),
            public_url_prefix: default_public_url_prefix(),
            max_depth: default_max_depth(),
            max_concurrent_io: default_max_concurrent_io(),
        }
    }
}

impl Settings {
    /// Loads settings from the user config directory, or defaults if no file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the config directory cannot be determined, or the
    /// file exists but cannot be read, parsed or validated.
    pub async fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load_from(&config_path).await
        } else {
            Ok(Self::default())
        }
    }

    /// Loads settings from an explicit TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid TOML, or
    /// fails [`Settings::validate`].
    pub async fn load_from(path: &Path) -> Result<Self> {
        let content = tokio::fs::read_to_string(path).await?;
        let settings: Settings = toml::from_str(&content)?;
        settings.validate()?;
        info!("Settings loaded from {:?}", path);
        Ok(settings)
    }

    /// Writes the settings as pretty TOML to the user config directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the config directory is unknown or the file cannot be written.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Writes the settings as pretty TOML to `path`, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or any filesystem operation fails.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_string)?;

        info!("Settings saved to {:?}", path);
        Ok(())
    }

    /// Rejects values that would make statistics or walks meaningless.
    ///
    /// # Errors
    ///
    /// Returns an error if `max_files` or `max_concurrent_io` is zero.
    pub fn validate(&self) -> Result<()> {
        if self.max_files == 0 {
            bail!("max_files must be greater than zero");
        }
        if self.max_concurrent_io == 0 {
            bail!("max_concurrent_io must be greater than zero");
        }
        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir =
            dirs::config_dir().ok_or_else(|| color_eyre::eyre::eyre!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }
}
