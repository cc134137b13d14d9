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

use celestia_core::renderer::ResourceError;
use celestia_core::sky::ConfigError;
use thiserror::Error;

/// An error raised by the sky lanes.
#[derive(Debug, Error)]
pub enum SkyLaneError {
    /// The renderer was used after [`SkyRenderer::cleanup`](super::SkyRenderer::cleanup).
    #[error("The sky renderer is not built")]
    NotBuilt,
    /// A GPU resource operation failed.
    #[error("Sky GPU resource error: {0}")]
    Resource(#[from] ResourceError),
    /// The pipeline settings are unusable.
    #[error("Invalid sky settings: {0}")]
    Config(#[from] ConfigError),
}
