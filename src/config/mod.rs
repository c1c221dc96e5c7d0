use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::{
    env,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::errors::{Result, WizardError};

const DEFAULT_DIR_NAME: &str = ".request_wizard";
const CONFIG_FILE: &str = "config.json";
const HOME_ENV: &str = "REQUEST_WIZARD_HOME";
const TMP_SUFFIX: &str = "tmp";

/// Service categories offered when no catalog is configured.
pub static DEFAULT_CATEGORIES: Lazy<Vec<String>> = Lazy::new(|| {
    [
        "Plumbing",
        "Electrical",
        "Cleaning",
        "Carpentry",
        "Painting",
        "Moving",
        "Gardening",
        "Appliance Repair",
    ]
    .iter()
    .map(|name| name.to_string())
    .collect()
});

/// Tunables for the request wizard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WizardConfig {
    pub title_max_len: usize,
    pub description_max_len: usize,
    pub max_images: usize,
    pub landing_screen: String,
    pub group_landing_screen: String,
    pub categories: Vec<String>,
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            title_max_len: 100,
            description_max_len: 1000,
            max_images: 5,
            landing_screen: "Home".into(),
            group_landing_screen: "Groups".into(),
            categories: DEFAULT_CATEGORIES.clone(),
        }
    }
}

impl WizardConfig {
    /// Field limits handed to step controllers on mount.
    pub fn limits(&self) -> DraftLimits {
        DraftLimits {
            title_max_len: self.title_max_len,
            description_max_len: self.description_max_len,
            max_images: self.max_images,
        }
    }

    fn check(&self) -> Result<()> {
        if self.title_max_len == 0 || self.description_max_len == 0 {
            return Err(WizardError::Config(
                "text length limits must be greater than zero".into(),
            ));
        }
        if self.landing_screen.trim().is_empty() || self.group_landing_screen.trim().is_empty() {
            return Err(WizardError::Config("landing screens cannot be blank".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DraftLimits {
    pub title_max_len: usize,
    pub description_max_len: usize,
    pub max_images: usize,
}

impl Default for DraftLimits {
    fn default() -> Self {
        WizardConfig::default().limits()
    }
}

/// Returns the application data directory, defaulting to `~/.request_wizard`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// Loads and stores [`WizardConfig`] as JSON.
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self> {
        Self::with_base_dir(app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self> {
        fs::create_dir_all(&base)?;
        Ok(Self {
            path: base.join(CONFIG_FILE),
        })
    }

    pub fn load(&self) -> Result<WizardConfig> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "no config file, using defaults");
            return Ok(WizardConfig::default());
        }
        let data = fs::read_to_string(&self.path)?;
        let config: WizardConfig = serde_json::from_str(&data)?;
        config.check()?;
        Ok(config)
    }

    pub fn save(&self, config: &WizardConfig) -> Result<()> {
        config.check()?;
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
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
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
