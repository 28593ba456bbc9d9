//! Render configuration loaded from TOML
//!
//! ```toml
//! [layout]
//! col_width = 12
//! border_width = 1
//!
//! [device]
//! font_size = 24
//! font_family = "宋体"
//! line_height = 28
//! ```
//!
//! Every table and key is optional; missing values take the defaults of
//! [`LayoutOptions`] and [`DeviceSettings`].

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::layout::LayoutOptions;
use crate::features::device::DeviceSettings;
use crate::utils::error::{RenderError, RenderResult};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub layout: LayoutOptions,
    pub device: DeviceSettings,
}

impl RenderConfig {
    /// Parse a configuration document
    pub fn from_toml_str(content: &str) -> RenderResult<Self> {
        toml::from_str(content).map_err(|e| RenderError::config(e.to_string()))
    }

    /// Read and parse a configuration file
    pub fn load(path: impl AsRef<Path>) -> RenderResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| RenderError::config(format!("{}: {}", path.display(), e)))?;
        log::debug!("loaded config from {}", path.display());
        Self::from_toml_str(&content)
    }
}
