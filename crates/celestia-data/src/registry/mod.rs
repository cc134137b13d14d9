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

//! The light render entity registry.
//!
//! Lights are addressed through a [`LightHandle`] whose index never moves,
//! while their data lives in dense parallel arrays compacted with swap-back
//! removal. The handle table maps one to the other.

mod database;
mod handle;

pub use database::{LightBinding, LightRenderDatabase, ARRAY_CAPACITY};
pub use handle::LightHandle;
