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

//! Sky lanes: light aggregation, per-light packing and sky parameter resolution.

mod aggregate_lane;
mod cloud_lane;
mod error;
mod light_buffer;
mod light_drive_lane;
mod packing;
pub mod properties;
mod renderer;
mod resolve_lane;
mod surface_atlas;

pub use aggregate_lane::*;
pub use cloud_lane::*;
pub use error::*;
pub use light_buffer::*;
pub use light_drive_lane::*;
pub use packing::*;
pub use renderer::*;
pub use resolve_lane::*;
pub use surface_atlas::*;

#[cfg(test)]
mod test_support;
