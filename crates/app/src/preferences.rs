//! Flat key/value preference file holding the persisted generation parameters.

use directories::ProjectDirs;
use housegen::{ConfigError, HouseConfig};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

use crate::APP_NAME;

pub const HOUSE_CONFIG_KEY: &str = "HouseConfig";
const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum PreferenceError {
    #[error("failed to access preference file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("preference file {} is not valid JSON", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("preference `{key}` could not be converted")]
    Value {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("stored house configuration is invalid")]
    InvalidConfig(#[from] ConfigError),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
struct PreferenceFile {
    format_version: u32,
    entries: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PreferenceStore {
    path: PathBuf,
    entries: BTreeMap<String, Value>,
}

impl PreferenceStore {
    pub fn get_default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", APP_NAME).map(|proj_dirs| {
            let mut path = proj_dirs.config_dir().to_path_buf();
            path.push("preferences.json");
            path
        })
    }

    /// Opens the store at `path`. A missing file yields an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, PreferenceError> {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(content) => {
                let file: PreferenceFile = serde_json::from_str(&content)
                    .map_err(|source| PreferenceError::Malformed { path: path.clone(), source })?;
                file.entries
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => return Err(PreferenceError::Io { path, source }),
        };
        debug!(path = %path.display(), keys = entries.len(), "preferences opened");
        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn has_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, PreferenceError> {
        self.entries
            .get(key)
            .map(|value| {
                T::deserialize(value)
                    .map_err(|source| PreferenceError::Value { key: key.to_string(), source })
            })
            .transpose()
    }

    pub fn set<T: Serialize>(&mut self, key: &str, value: &T) -> Result<(), PreferenceError> {
        let value = serde_json::to_value(value)
            .map_err(|source| PreferenceError::Value { key: key.to_string(), source })?;
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    pub fn remove(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    /// Writes every entry to a sibling temp file, then renames it over the store.
    pub fn write_atomic(&self) -> Result<(), PreferenceError> {
        let io_error = |source: io::Error| PreferenceError::Io { path: self.path.clone(), source };
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(io_error)?;
        }

        let file = PreferenceFile { format_version: FORMAT_VERSION, entries: self.entries.clone() };
        let tmp_path = self.path.with_extension("json.tmp");
        let json = serde_json::to_string_pretty(&file).map_err(io::Error::other).map_err(io_error)?;

        fs::write(&tmp_path, json).map_err(io_error)?;
        fs::rename(&tmp_path, &self.path).map_err(io_error)?;
        Ok(())
    }

    pub fn save_config(&mut self, config: &HouseConfig) -> Result<(), PreferenceError> {
        self.set(HOUSE_CONFIG_KEY, config)?;
        self.write_atomic()?;
        info!(path = %self.path.display(), "house configuration saved");
        Ok(())
    }

    /// Stored configuration, validated. `None` when nothing was saved yet.
    pub fn load_config(&self) -> Result<Option<HouseConfig>, PreferenceError> {
        let Some(config) = self.get::<HouseConfig>(HOUSE_CONFIG_KEY)? else {
            return Ok(None);
        };
        config.validate()?;
        Ok(Some(config))
    }
}
