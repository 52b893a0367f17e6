//! Todo View Configuration
//!
//! Selectors and class names shared by the todo template and the item view,
//! loaded from a TOML file. Every value has a default matching the stock
//! TodoMVC markup, so an empty or missing file is a valid configuration.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default file name looked up by [`ViewConfig::load`] when given a directory
pub const CONFIG_FILE: &str = "todo-view.toml";

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub selectors: SelectorConfig,
    pub classes: ClassConfig,
    pub behavior: BehaviorConfig,
}

/// [selectors] section - how the view finds parts of the rendered row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    pub row: String,
    pub toggle: String,
    pub destroy: String,
    pub label: String,
    pub edit: String,
}

/// [classes] section - class markers on the row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassConfig {
    pub editing: String,
    pub completed: String,
}

/// [behavior] section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Leave edit mode after committing an edit
    pub commit_exits_editing: bool,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            row: "li".to_string(),
            toggle: ".toggle".to_string(),
            destroy: ".destroy".to_string(),
            label: "label".to_string(),
            edit: ".edit".to_string(),
        }
    }
}

impl Default for ClassConfig {
    fn default() -> Self {
        Self {
            editing: "editing".to_string(),
            completed: "completed".to_string(),
        }
    }
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            commit_exits_editing: true,
        }
    }
}

impl ViewConfig {
    /// Load configuration from a file, or from `todo-view.toml` inside a
    /// directory. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let file = if path.is_dir() {
            path.join(CONFIG_FILE)
        } else {
            path.to_path_buf()
        };

        if !file.exists() {
            tracing::debug!(path = %file.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&file).map_err(|source| ConfigError::Io {
            path: file.clone(),
            source,
        })?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML content
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: ViewConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every selector parses and every class name is usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        let selectors = &self.selectors;
        for (key, value) in [
            ("row", &selectors.row),
            ("toggle", &selectors.toggle),
            ("destroy", &selectors.destroy),
            ("label", &selectors.label),
            ("edit", &selectors.edit),
        ] {
            todo_dom::Selector::parse(value).map_err(|source| ConfigError::Selector {
                key: format!("selectors.{key}"),
                source,
            })?;
        }

        for (key, value) in [("editing", &self.classes.editing), ("completed", &self.classes.completed)] {
            if value.is_empty() || value.contains(char::is_whitespace) {
                return Err(ConfigError::ClassName {
                    key: format!("classes.{key}"),
                    value: value.clone(),
                });
            }
        }
        Ok(())
    }
}
