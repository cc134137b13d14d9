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

//! Data layouts of the celestia sky: the light render database and the
//! component-side binding that keeps it in sync with the host scene.

#![warn(missing_docs)]

pub mod instance;
pub mod registry;

pub use instance::CelestialLightInstance;
pub use registry::{LightBinding, LightHandle, LightRenderDatabase};
