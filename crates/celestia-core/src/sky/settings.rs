// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Pipeline-level settings of the sky renderer, loadable from RON.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An error that can occur while loading [`SkyRenderSettings`].
#[derive(Debug)]
pub enum ConfigError {
    /// The RON text could not be parsed.
    InvalidFormat(String),
    /// A value is outside its supported range.
    InvalidValue {
        /// The offending field.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidFormat(details) => {
                write!(f, "Invalid sky settings format: {details}")
            }
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "Invalid sky setting '{field}': {reason}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Settings of the sky rendering pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkyRenderSettings {
    /// Number of directional lights the light buffer is sized for.
    pub max_directional_lights: usize,
    /// Width and height of the surface texture atlas, in texels.
    pub surface_atlas_size: u32,
    /// Last mip level of the atlas that holds valid data.
    pub surface_atlas_last_valid_mip: u32,
}

impl Default for SkyRenderSettings {
    fn default() -> Self {
        Self {
            max_directional_lights: 16,
            surface_atlas_size: 1024,
            surface_atlas_last_valid_mip: 0,
        }
    }
}

impl SkyRenderSettings {
    /// Parses settings from RON text. Missing fields keep their default value.
    pub fn from_ron_str(text: &str) -> Result<Self, ConfigError> {
        let settings: Self =
            ron::from_str(text).map_err(|e| ConfigError::InvalidFormat(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Serializes the settings to pretty-printed RON.
    pub fn to_ron_string(&self) -> Result<String, ConfigError> {
        let pretty = ron::ser::PrettyConfig::default().indentor("  ".to_string());
        ron::ser::to_string_pretty(self, pretty)
            .map_err(|e| ConfigError::InvalidFormat(e.to_string()))
    }

    /// Returns `true` if an atlas of `width` x `height` texels has the
    /// configured size.
    pub fn matches_atlas(&self, width: u32, height: u32) -> bool {
        width == self.surface_atlas_size && height == self.surface_atlas_size
    }

    /// Checks that every value is usable by the pipeline.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_directional_lights == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_directional_lights",
                reason: "must be at least 1".to_string(),
            });
        }
        if !self.surface_atlas_size.is_power_of_two() {
            return Err(ConfigError::InvalidValue {
                field: "surface_atlas_size",
                reason: format!("{} is not a power of two", self.surface_atlas_size),
            });
        }
        let mip_count = 32 - self.surface_atlas_size.leading_zeros();
        if self.surface_atlas_last_valid_mip >= mip_count {
            return Err(ConfigError::InvalidValue {
                field: "surface_atlas_last_valid_mip",
                reason: format!(
                    "mip {} does not exist in a {}px atlas",
                    self.surface_atlas_last_valid_mip, self.surface_atlas_size
                ),
            });
        }
        Ok(())
    }
}
