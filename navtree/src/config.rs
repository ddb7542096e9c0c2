//! Outline view configuration.

use std::fs;
use std::io;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::surface::Transition;

/// Landing page of a generated documentation site.
pub const DEFAULT_TARGET: &str = "index.html";

/// Duration of a user-triggered show/hide ("fast").
pub const DEFAULT_ANIMATION_MS: u64 = 200;

/// Settings for a [`NavTree`](crate::NavTree).
///
/// Every field has a default, so a config file only needs the fields it
/// changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavTreeConfig {
    /// Link to reveal when the requested target is not in the catalog.
    /// `None` disables the fallback.
    pub default_target: Option<String>,
    /// Prefix prepended to every link and icon asset.
    pub relpath: String,
    /// Duration of user-triggered show/hide transitions. `0` disables them.
    pub animation_ms: u64,
    /// Recenter the selected row when a user-triggered expand finishes.
    pub recenter_after_expand: bool,
}

impl Default for NavTreeConfig {
    fn default() -> Self {
        Self {
            default_target: Some(DEFAULT_TARGET.to_string()),
            relpath: String::new(),
            animation_ms: DEFAULT_ANIMATION_MS,
            recenter_after_expand: true,
        }
    }
}

impl NavTreeConfig {
    /// Parse a config from JSON.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Load a config file. A missing file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(text) => {
                log::debug!("Loading config from {}", path.display());
                Self::from_json(&text)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::debug!("No config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(source) => Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Set the fallback target.
    pub fn with_default_target(mut self, target: Option<&str>) -> Self {
        self.default_target = target.map(str::to_string);
        self
    }

    /// Set the link/asset prefix.
    pub fn with_relpath(mut self, relpath: impl Into<String>) -> Self {
        self.relpath = relpath.into();
        self
    }

    /// Set the user-triggered transition duration.
    pub fn with_animation(mut self, duration: Duration) -> Self {
        self.animation_ms = duration.as_millis() as u64;
        self
    }

    /// Transition used for clicks; programmatic reveal is always immediate.
    pub fn user_transition(&self) -> Transition {
        match self.animation_ms {
            0 => Transition::Immediate,
            ms => Transition::Animated(Duration::from_millis(ms)),
        }
    }
}
