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

//! Binds a scene-side celestial light to its registry entity.

use crate::registry::{LightBinding, LightHandle, LightRenderDatabase};
use celestia_core::sky::CelestialLight;

/// The component-side half of a celestial light.
///
/// The host calls [`enable`](Self::enable) and [`disable`](Self::disable)
/// from the owning object's lifecycle events, never while a frame is being
/// aggregated.
#[derive(Debug, Clone, Default)]
pub struct CelestialLightInstance {
    /// The authored settings.
    pub settings: CelestialLight,
    handle: LightHandle,
}

impl CelestialLightInstance {
    /// Wraps authored settings. The instance is not registered yet.
    pub fn new(settings: CelestialLight) -> Self {
        Self {
            settings,
            handle: LightHandle::INVALID,
        }
    }

    /// The registry handle, [`LightHandle::INVALID`] while disabled.
    pub fn handle(&self) -> LightHandle {
        self.handle
    }

    /// Registers the light, unless it is already registered.
    pub fn enable(&mut self, db: &mut LightRenderDatabase, binding: LightBinding) -> LightHandle {
        if !db.is_valid(self.handle) {
            self.handle = db.create_entity(true);
            db.attach(self.handle, binding, self.settings.clone());
        }
        self.handle
    }

    /// Removes the light from the registry.
    pub fn disable(&mut self, db: &mut LightRenderDatabase) {
        db.destroy_entity(self.handle);
        self.handle = LightHandle::INVALID;
    }

    /// Pushes edited settings into the registry.
    pub fn sync(&self, db: &mut LightRenderDatabase) {
        if let Some(light) = db.light_mut(self.handle) {
            *light = self.settings.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use celestia_core::renderer::LightInstanceId;

    #[test]
    fn test_enable_is_idempotent() {
        let mut db = LightRenderDatabase::new();
        let mut instance = CelestialLightInstance::new(CelestialLight::default());

        let first = instance.enable(&mut db, LightBinding::directional(LightInstanceId(1)));
        let second = instance.enable(&mut db, LightBinding::directional(LightInstanceId(1)));

        assert_eq!(first, second);
        assert_eq!(db.count(), 1);
        assert_eq!(db.auto_destroy(first), Some(true));
    }

    #[test]
    fn test_disable_invalidates_handle() {
        let mut db = LightRenderDatabase::new();
        let mut instance = CelestialLightInstance::default();
        let handle = instance.enable(&mut db, LightBinding::directional(LightInstanceId(1)));

        instance.disable(&mut db);

        assert!(!db.is_valid(handle));
        assert_eq!(instance.handle(), LightHandle::INVALID);
        // Disabling twice is harmless.
        instance.disable(&mut db);
    }

    #[test]
    fn test_sync_pushes_settings() {
        let mut db = LightRenderDatabase::new();
        let mut instance = CelestialLightInstance::default();
        let handle = instance.enable(&mut db, LightBinding::directional(LightInstanceId(1)));

        instance.settings.priority = 42;
        instance.sync(&mut db);

        assert_eq!(db.light(handle).map(|l| l.priority), Some(42));
    }
}
