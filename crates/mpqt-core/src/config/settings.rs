//! Application configuration loaded from a TOML file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::mime::{ClassificationGraph, MimeTypeDef};
use crate::nav::panel::SortSettings;
use crate::nav::sort::{SortDirection, SortKey};

/// Top-level application configuration.
///
/// All fields have defaults so MPQt works without a config file.
/// Call [`Config::load`] to read from a TOML path.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub extract: ExtractConfig,
    #[serde(default)]
    pub mime: MimeConfig,
}

impl Config {
    /// Loads configuration from a TOML file at `path`.
    ///
    /// # Errors
    ///
    /// - [`CoreError::NotFound`] if the file does not exist.
    /// - [`CoreError::PermissionDenied`] if the file is not readable.
    /// - [`CoreError::ConfigParse`] if the TOML is malformed.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| CoreError::from_io(path, e))?;
        toml::from_str(&content).map_err(|e| CoreError::ConfigParse(e.to_string()))
    }

    /// The built-in content types plus the ones declared under
    /// `[[mime.types]]`.
    pub fn classification_graph(&self) -> ClassificationGraph {
        let mut graph = ClassificationGraph::builtin();
        for def in &self.mime.types {
            graph.register(def.clone());
        }
        graph
    }

    pub fn sort_settings(&self) -> SortSettings {
        SortSettings {
            key: self.general.default_sort,
            direction: self.general.default_direction,
            dirs_first: self.general.sort_dir_first,
        }
    }
}

/// Listing preferences.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneralConfig {
    #[serde(default)]
    pub default_sort: SortKey,
    #[serde(default)]
    pub default_direction: SortDirection,
    #[serde(default)]
    pub sort_dir_first: bool,
}

/// Display preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_true")]
    pub show_icons: bool,
    #[serde(default = "default_true")]
    pub show_type_column: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            show_icons: true,
            show_type_column: true,
        }
    }
}

/// Where extracted files go.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractConfig {
    /// Parent directory for extractions. Each archive extracts into a
    /// subdirectory named after it. Defaults to the working directory.
    #[serde(default)]
    pub destination: Option<PathBuf>,
}

impl ExtractConfig {
    /// The directory files of `archive_name` are extracted into.
    pub fn destination_for(&self, archive_name: &str) -> PathBuf {
        let base = self
            .destination
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));
        let stem = Path::new(archive_name)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "extracted".to_string());
        base.join(stem)
    }
}

/// Extra content types merged into the built-in table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MimeConfig {
    #[serde(default)]
    pub types: Vec<MimeTypeDef>,
}

fn default_true() -> bool {
    true
}
