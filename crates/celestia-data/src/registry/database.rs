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

//! Implements the [`LightRenderDatabase`].

use super::handle::LightHandle;
use celestia_core::renderer::{LightInstanceId, LightKind, SceneKind, SceneObjectId};
use celestia_core::sky::CelestialLight;
use std::collections::HashMap;

/// Minimum number of data slots allocated when the dense arrays grow.
pub const ARRAY_CAPACITY: usize = 100;

/// Identity and context of the source light bound to an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LightBinding {
    /// Identity of the source light in the host scene.
    pub light_id: LightInstanceId,
    /// The kind of the source light.
    pub kind: LightKind,
    /// The scene the source light lives in.
    pub scene: SceneKind,
    /// Scene object rendered alongside the light, if any.
    pub scene_object: Option<SceneObjectId>,
}

impl LightBinding {
    /// Binds a directional light of an active scene.
    pub fn directional(light_id: LightInstanceId) -> Self {
        Self {
            light_id,
            kind: LightKind::Directional,
            scene: SceneKind::Active,
            scene_object: None,
        }
    }

    /// Returns `true` if a light bound this way takes part in the sky.
    pub fn drives_sky(&self) -> bool {
        self.kind == LightKind::Directional && self.scene == SceneKind::Active
    }
}

/// Entry of the handle table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct EntityInfo {
    /// Position of the entity's data in the dense arrays.
    data_index: usize,
    /// The light attached to the entity, once attached.
    light_id: Option<LightInstanceId>,
}

/// Registry of celestial lights, mapping stable handles to densely packed data.
///
/// Data of the `count` live entities occupies indices `0..count` of parallel
/// arrays. Destroying an entity moves the last live slot into the freed one,
/// so iteration over the data never meets holes. The handle table and a
/// reverse map by [`LightInstanceId`] keep track of where each entity lives.
///
/// Every operation on a handle that is not valid is a no-op that returns an
/// empty result.
#[derive(Debug, Default)]
pub struct LightRenderDatabase {
    /// Handle table. `None` marks a freed index.
    entities: Vec<Option<EntityInfo>>,
    /// Freed handle indices, reused last-in first-out.
    free_indices: Vec<u32>,

    // --- Dense data, one element per live entity ---
    owners: Vec<LightHandle>,
    lights: Vec<Option<CelestialLight>>,
    bindings: Vec<Option<LightBinding>>,
    auto_destroy: Vec<bool>,

    /// Number of data slots reserved for the dense arrays.
    capacity: usize,
    /// Number of entities with attached light data.
    attached_count: usize,
    /// Reverse map from source light identity to its entity.
    light_entities: HashMap<LightInstanceId, LightHandle>,
    /// Attached directional lights of active scenes, in attachment order.
    directional_lights: Vec<LightHandle>,
}

impl LightRenderDatabase {
    /// Creates an empty database. No storage is allocated until the first entity.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new entity and returns its handle.
    ///
    /// The entity owns a data slot but no light until [`attach`](Self::attach)
    /// is called.
    pub fn create_entity(&mut self, auto_destroy: bool) -> LightHandle {
        let data_index = self.allocate_data_slot();
        let info = EntityInfo {
            data_index,
            light_id: None,
        };

        let handle = match self.free_indices.pop() {
            Some(index) => {
                self.entities[index as usize] = Some(info);
                LightHandle { index }
            }
            None => {
                let index = self.entities.len() as u32;
                self.entities.push(Some(info));
                LightHandle { index }
            }
        };

        self.owners.push(handle);
        self.lights.push(None);
        self.bindings.push(None);
        self.auto_destroy.push(auto_destroy);
        handle
    }

    fn allocate_data_slot(&mut self) -> usize {
        let count = self.count();
        if self.capacity == 0 || count == self.capacity {
            self.capacity = (self.capacity * 2).max(count).max(ARRAY_CAPACITY);
            let additional = self.capacity - count;
            self.owners.reserve_exact(additional);
            self.lights.reserve_exact(additional);
            self.bindings.reserve_exact(additional);
            self.auto_destroy.reserve_exact(additional);
            log::debug!("Light render database grown to {} slots", self.capacity);
        }
        count
    }

    /// Attaches a source light and its celestial settings to an entity.
    ///
    /// Directional lights of active scenes join the directional light set.
    /// Attaching the same light identity to two live entities is a
    /// programming error.
    pub fn attach(&mut self, handle: LightHandle, binding: LightBinding, light: CelestialLight) {
        let Some(info) = self.info(handle) else {
            log::warn!(
                "Ignoring attach of light {:?} to invalid handle {:?}",
                binding.light_id,
                handle
            );
            return;
        };

        if let Some(previous) = info.light_id {
            self.light_entities.remove(&previous);
        }
        let was_attached = self.lights[info.data_index].is_some();
        self.directional_lights.retain(|h| *h != handle);

        let existing = self.light_entities.insert(binding.light_id, handle);
        debug_assert!(
            existing.is_none(),
            "light {:?} is already registered by entity {:?}",
            binding.light_id,
            existing
        );

        if let Some(Some(entry)) = self.entities.get_mut(handle.index as usize) {
            entry.light_id = Some(binding.light_id);
        }
        self.lights[info.data_index] = Some(light);
        self.bindings[info.data_index] = Some(binding);
        if !was_attached {
            self.attached_count += 1;
        }

        if binding.drives_sky() {
            self.directional_lights.push(handle);
        }
    }

    /// Destroys an entity, releasing its handle index for reuse.
    pub fn destroy_entity(&mut self, handle: LightHandle) {
        let Some(info) = self.info(handle) else {
            return;
        };

        self.entities[handle.index as usize] = None;
        self.free_indices.push(handle.index);
        if let Some(light_id) = info.light_id {
            self.light_entities.remove(&light_id);
        }
        if self.lights[info.data_index].is_some() {
            self.directional_lights.retain(|h| *h != handle);
            self.attached_count -= 1;
        }

        self.remove_at_swap_back(info.data_index);

        if self.count() == 0 {
            self.release_storage();
        } else if let Some(&moved) = self.owners.get(info.data_index) {
            if let Some(Some(entry)) = self.entities.get_mut(moved.index as usize) {
                entry.data_index = info.data_index;
                if let Some(light_id) = entry.light_id {
                    self.light_entities.insert(light_id, moved);
                }
            }
        }
    }

    fn remove_at_swap_back(&mut self, data_index: usize) {
        self.owners.swap_remove(data_index);
        self.lights.swap_remove(data_index);
        self.bindings.swap_remove(data_index);
        self.auto_destroy.swap_remove(data_index);
    }

    fn release_storage(&mut self) {
        self.entities = Vec::new();
        self.free_indices = Vec::new();
        self.owners = Vec::new();
        self.lights = Vec::new();
        self.bindings = Vec::new();
        self.auto_destroy = Vec::new();
        self.light_entities = HashMap::new();
        self.directional_lights = Vec::new();
        self.attached_count = 0;
        self.capacity = 0;
        log::debug!("Light render database is empty, storage released");
    }

    /// Returns `true` if the handle refers to a live entity.
    pub fn is_valid(&self, handle: LightHandle) -> bool {
        self.info(handle).is_some()
    }

    fn info(&self, handle: LightHandle) -> Option<EntityInfo> {
        self.entities.get(handle.index as usize).copied().flatten()
    }

    /// Returns the highest-priority directional light, skipping `exclude`.
    ///
    /// Only a strictly higher priority replaces the current best, so among
    /// equal priorities the first one in the directional light set wins.
    pub fn find_main_light(&self, exclude: Option<LightHandle>) -> Option<LightHandle> {
        let mut best: Option<(LightHandle, i32)> = None;
        for &handle in &self.directional_lights {
            if Some(handle) == exclude {
                continue;
            }
            let Some(light) = self.light(handle) else {
                continue;
            };
            if best.map_or(true, |(_, priority)| light.priority > priority) {
                best = Some((handle, light.priority));
            }
        }
        best.map(|(handle, _)| handle)
    }

    /// The celestial settings of an entity.
    pub fn light(&self, handle: LightHandle) -> Option<&CelestialLight> {
        let info = self.info(handle)?;
        self.lights.get(info.data_index)?.as_ref()
    }

    /// Mutable access to the celestial settings of an entity.
    pub fn light_mut(&mut self, handle: LightHandle) -> Option<&mut CelestialLight> {
        let info = self.info(handle)?;
        self.lights.get_mut(info.data_index)?.as_mut()
    }

    /// The source light binding of an entity.
    pub fn binding(&self, handle: LightHandle) -> Option<&LightBinding> {
        let info = self.info(handle)?;
        self.bindings.get(info.data_index)?.as_ref()
    }

    /// The identity of the source light attached to an entity.
    pub fn light_id(&self, handle: LightHandle) -> Option<LightInstanceId> {
        self.info(handle)?.light_id
    }

    /// The scene object associated with an entity.
    pub fn scene_object(&self, handle: LightHandle) -> Option<SceneObjectId> {
        self.binding(handle)?.scene_object
    }

    /// Whether the entity should be destroyed together with its source light.
    pub fn auto_destroy(&self, handle: LightHandle) -> Option<bool> {
        let info = self.info(handle)?;
        self.auto_destroy.get(info.data_index).copied()
    }

    /// The dense data index of an entity.
    pub fn data_index(&self, handle: LightHandle) -> Option<usize> {
        self.info(handle).map(|info| info.data_index)
    }

    /// Looks up the entity a source light is attached to.
    pub fn handle_for_light(&self, light_id: LightInstanceId) -> Option<LightHandle> {
        self.light_entities.get(&light_id).copied()
    }

    /// The attached directional lights of active scenes, in attachment order.
    pub fn directional_lights(&self) -> &[LightHandle] {
        &self.directional_lights
    }

    /// The handles of all live entities, in dense data order.
    pub fn handles(&self) -> &[LightHandle] {
        &self.owners
    }

    /// The number of live entities.
    pub fn count(&self) -> usize {
        self.owners.len()
    }

    /// The number of live entities with an attached light.
    pub fn attached_count(&self) -> usize {
        self.attached_count
    }

    /// The number of data slots currently reserved.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
