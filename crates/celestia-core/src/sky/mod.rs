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

//! Sky authoring data and pipeline settings.
//!
//! [`SkyConfig`] and [`CelestialLight`] are owned by the host scene and only
//! read by the sky lanes. [`SkyRenderSettings`] configures the pipeline itself.

pub mod celestial_light;
pub mod config;
pub mod settings;

pub use self::celestial_light::{
    CelestialLight, DiameterOverride, IntensityDrive, ShadingSource, EARTHSHINE_SCALE,
};
pub use self::config::{CloudConfig, ExposureMode, SkyConfig, SpaceBackdrop};
pub use self::settings::{ConfigError, SkyRenderSettings};
