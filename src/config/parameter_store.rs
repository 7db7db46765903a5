// src/config/parameter_store.rs

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::world_parameters::WorldGenerationParameters;

/// File holding the parameters of the world currently being played.
pub const CURRENT_CONFIG_FILE: &str = "worldgenconfig.json";
/// Directory (under the store root) holding one file per saved world.
pub const SAVED_GAMES_DIR: &str = "SavedGames";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to access {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to serialize parameters: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("invalid world name {0:?}")]
    InvalidWorldName(String),
}

/// Loads and saves [`WorldGenerationParameters`] as JSON under a cache directory.
pub struct ParameterStore {
    root: PathBuf,
}

impl ParameterStore {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self { root: root.as_ref().to_path_buf() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn current_path(&self) -> PathBuf {
        self.root.join(CURRENT_CONFIG_FILE)
    }

    pub fn world_path(&self, world_name: &str) -> Result<PathBuf, ConfigError> {
        validate_world_name(world_name)?;
        Ok(self.root.join(SAVED_GAMES_DIR).join(format!("{world_name}.json")))
    }

    /// Write default parameters named `world_name` as both the current and the saved world.
    pub fn create_default(
        &self,
        world_name: &str,
    ) -> Result<WorldGenerationParameters, ConfigError> {
        let params = WorldGenerationParameters {
            world_name: world_name.to_string(),
            ..Default::default()
        };
        self.save(&params)?;
        Ok(params)
    }

    /// Persist `params` as the current world and under its own world name.
    pub fn save(&self, params: &WorldGenerationParameters) -> Result<(), ConfigError> {
        let world_path = self.world_path(&params.world_name)?;
        let json = serde_json::to_string_pretty(params).map_err(ConfigError::Serialize)?;

        write_file(&self.current_path(), &json)?;
        write_file(&world_path, &json)?;
        log::info!("ParameterStore: saved world {:?} to {:?}", params.world_name, world_path);
        Ok(())
    }

    /// Load the current world. A missing file yields defaults.
    pub fn load_current(&self) -> Result<WorldGenerationParameters, ConfigError> {
        let path = self.current_path();
        if !path.exists() {
            log::warn!("ParameterStore: {:?} not found, using default parameters", path);
            return Ok(WorldGenerationParameters::default());
        }
        read_file(&path)
    }

    /// Load a saved world and make it the current one.
    pub fn load_world(&self, world_name: &str) -> Result<WorldGenerationParameters, ConfigError> {
        let path = self.world_path(world_name)?;
        let params = read_file(&path)?;
        let json = serde_json::to_string_pretty(&params).map_err(ConfigError::Serialize)?;
        write_file(&self.current_path(), &json)?;
        Ok(params)
    }

    /// Names of every saved world, sorted.
    pub fn saved_worlds(&self) -> Result<Vec<String>, ConfigError> {
        let dir = self.root.join(SAVED_GAMES_DIR);
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let entries =
            fs::read_dir(&dir).map_err(|source| ConfigError::Io { path: dir.clone(), source })?;
        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| ConfigError::Io { path: dir.clone(), source })?;
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }
}

fn validate_world_name(name: &str) -> Result<(), ConfigError> {
    let invalid = name.trim().is_empty()
        || name.contains(['/', '\\'])
        || name == "."
        || name == "..";
    if invalid {
        return Err(ConfigError::InvalidWorldName(name.to_string()));
    }
    Ok(())
}

fn read_file(path: &Path) -> Result<WorldGenerationParameters, ConfigError> {
    let text = fs::read_to_string(path)
        .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
    serde_json::from_str(&text)
        .map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })
}

fn write_file(path: &Path, contents: &str) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|source| ConfigError::Io { path: parent.to_path_buf(), source })?;
    }
    fs::write(path, contents).map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })
}
