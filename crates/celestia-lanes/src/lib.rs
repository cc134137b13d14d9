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

//! Hot-path lanes of the stylized sky.
//!
//! Every frame the [`SkyRenderer`] runs, in order:
//!
//! 1. [`LightAggregationLane`]: packs the registered celestial lights into the
//!    directional light buffer, once per frame index.
//! 2. [`SkyParameterLane`]: derives the sky shading constants from the main
//!    light and the [`SkyConfig`](celestia_core::SkyConfig).
//!
//! [`LightDriveLane`] and [`CloudParameterLane`] are optional companions run
//! by the host before aggregation and after the sky respectively.

#![warn(missing_docs)]

pub mod sky_lane;

pub use sky_lane::*;
