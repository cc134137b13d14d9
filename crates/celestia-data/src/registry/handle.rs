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

/// A stable reference to an entity of the [`LightRenderDatabase`](super::LightRenderDatabase).
///
/// Handles carry no generation: once an entity is destroyed its index goes
/// back to the free list and may be handed out again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LightHandle {
    /// Index into the database's handle table.
    pub index: u32,
}

impl LightHandle {
    /// The sentinel handle that never refers to an entity.
    pub const INVALID: Self = Self { index: u32::MAX };
}

impl Default for LightHandle {
    fn default() -> Self {
        Self::INVALID
    }
}
