//! User configuration, read from `<config_dir>/reminder-tui/config.toml`.
//!
//! Every table and key is optional; anything left out takes its default.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::reminders::codec::{TimeFormatError, DEFAULT_TIME_FORMAT};
use crate::reminders::{JsonLinesCodec, PipeCodec, RecordCodec};

pub const APP_DIR: &str = "reminder-tui";
const CONFIG_FILE: &str = "config.toml";
const DATA_FILE: &str = "reminders.txt";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config `{}`: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config `{}`: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid [storage] time_format: {0}")]
    TimeFormat(#[from] TimeFormatError),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
    pub form: FormConfig,
    pub theme: ThemeConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageFormat {
    #[default]
    Pipe,
    Jsonl,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub path: Option<PathBuf>,
    pub format: StorageFormat,
    pub time_format: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: None,
            format: StorageFormat::Pipe,
            time_format: DEFAULT_TIME_FORMAT.to_string(),
        }
    }
}

impl StorageConfig {
    /// Explicit path, else `<data_dir>/reminder-tui/reminders.txt`, else the
    /// working directory.
    pub fn resolved_path(&self) -> PathBuf {
        self.path
            .clone()
            .or_else(|| dirs::data_dir().map(|d| d.join(APP_DIR).join(DATA_FILE)))
            .unwrap_or_else(|| PathBuf::from(DATA_FILE))
    }

    /// Builds the configured codec. A pipe `time_format` that cannot round
    /// trip a due time is refused here, before any file is read.
    pub fn codec(&self) -> Result<Box<dyn RecordCodec>, ConfigError> {
        let codec: Box<dyn RecordCodec> = match self.format {
            StorageFormat::Pipe => Box::new(PipeCodec::new(self.time_format.clone())?),
            StorageFormat::Jsonl => Box::new(JsonLinesCodec),
        };
        Ok(codec)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            dir: None,
        }
    }
}

impl LoggingConfig {
    pub fn resolved_dir(&self) -> PathBuf {
        self.dir
            .clone()
            .or_else(|| dirs::data_local_dir().map(|d| d.join(APP_DIR).join("logs")))
            .unwrap_or_else(|| PathBuf::from("logs"))
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    /// Suggestions cycled in the category field. Free text is still accepted.
    pub categories: Vec<String>,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            categories: ["Personal", "Work", "Finance", "Health"]
                .map(String::from)
                .to_vec(),
        }
    }
}

/// Colour overrides, applied on top of `preset`. Values are `#rrggbb` or a
/// named terminal colour.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub preset: Option<String>,
    pub selected_fg: Option<String>,
    pub selected_bg: Option<String>,
    pub header_fg: Option<String>,
    pub dim_fg: Option<String>,
    pub border_fg: Option<String>,
    pub status_fg: Option<String>,
    pub status_bg: Option<String>,
    pub high_fg: Option<String>,
    pub medium_fg: Option<String>,
    pub low_fg: Option<String>,
    pub overdue_fg: Option<String>,
}

impl Config {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Loads the default config file; a missing file gives the defaults.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}
