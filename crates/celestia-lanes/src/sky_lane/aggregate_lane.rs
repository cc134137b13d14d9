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

//! Per-frame aggregation of the registered celestial lights.

use super::error::SkyLaneError;
use super::light_buffer::DirectionalLightBuffer;
use super::packing::{pack_directional_light, PackInput};
use super::surface_atlas::SurfaceTextureCache;
use celestia_core::renderer::{
    GraphicsDevice, LightInstanceId, LightSource, LightSourceQuery, PackedDirectionalRecord,
};
use celestia_core::sky::CelestialLight;
use celestia_data::{LightHandle, LightRenderDatabase};

/// Exposure input of a frame without any qualifying light.
pub const BASE_EXPOSURE: f32 = 1.0;

/// The outcome of one aggregation pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameLightData {
    /// The frame the data was computed for.
    pub frame_index: u64,
    /// Number of buffer slots written this frame, disabled ones included.
    pub light_count: u32,
    /// Largest `intensity * -forward.y` among qualifying lights, at least [`BASE_EXPOSURE`].
    pub exposure: f32,
}

impl Default for FrameLightData {
    fn default() -> Self {
        Self {
            frame_index: 0,
            light_count: 0,
            exposure: BASE_EXPOSURE,
        }
    }
}

/// Resolves the source light of the registry's main light.
pub fn main_light_source<'a>(
    db: &LightRenderDatabase,
    lights: &'a dyn LightSourceQuery,
) -> Option<&'a LightSource> {
    db.find_main_light(None)
        .and_then(|handle| db.light_id(handle))
        .and_then(|id| lights.light_source(id))
}

/// The lane that packs every directional light of the registry into the
/// directional light buffer.
///
/// Running it several times for the same frame index does the work once:
/// later calls return the memoized [`FrameLightData`] without scanning or
/// uploading.
#[derive(Debug, Default)]
pub struct LightAggregationLane {
    last_frame: Option<u64>,
    frame: FrameLightData,
}

impl LightAggregationLane {
    /// Creates a lane that has not aggregated any frame yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Aggregates the lights for `frame_index` and uploads the buffer.
    pub fn run(
        &mut self,
        frame_index: u64,
        db: &LightRenderDatabase,
        lights: &dyn LightSourceQuery,
        buffer: &mut DirectionalLightBuffer,
        atlas: &mut SurfaceTextureCache,
        device: &dyn GraphicsDevice,
    ) -> Result<FrameLightData, SkyLaneError> {
        if self.last_frame == Some(frame_index) {
            return Ok(self.frame);
        }

        let directional = db.directional_lights();
        if buffer.ensure_capacity(device, directional.len())? {
            log::debug!(
                "Directional light buffer resized to {} records",
                buffer.capacity()
            );
        }

        let main_light = main_light_source(db, lights);
        let mut exposure = BASE_EXPOSURE;
        let records = buffer.records_mut();
        for (slot, &handle) in directional.iter().enumerate() {
            records[slot] = match Self::qualifying(db, lights, handle) {
                Some((source, settings, light_id)) => {
                    let forward = source.transform.forward();
                    exposure = (source.intensity * -forward.y).max(exposure);
                    let input = PackInput {
                        light_id,
                        source,
                        settings,
                        main_light,
                        lights,
                    };
                    pack_directional_light(&input, atlas)
                }
                None => PackedDirectionalRecord::disabled(),
            };
        }
        for record in records.iter_mut().skip(directional.len()) {
            *record = PackedDirectionalRecord::disabled();
        }

        buffer.upload(device)?;

        self.frame = FrameLightData {
            frame_index,
            light_count: directional.len() as u32,
            exposure,
        };
        self.last_frame = Some(frame_index);
        log::debug!(
            "Aggregated {} directional lights for frame {} (exposure {})",
            self.frame.light_count,
            frame_index,
            exposure
        );
        Ok(self.frame)
    }

    /// A light takes part in the sky when it is enabled, interacts with the
    /// sky and has a non-zero intensity.
    fn qualifying<'a>(
        db: &'a LightRenderDatabase,
        lights: &'a dyn LightSourceQuery,
        handle: LightHandle,
    ) -> Option<(&'a LightSource, &'a CelestialLight, LightInstanceId)> {
        let settings = db.light(handle)?;
        let light_id = db.light_id(handle)?;
        let source = lights.light_source(light_id)?;
        (source.enabled && settings.interacts_with_sky && source.intensity != 0.0)
            .then_some((source, settings, light_id))
    }

    /// The data of the last aggregated frame.
    pub fn frame(&self) -> FrameLightData {
        self.frame
    }

    /// The last aggregated frame index, if any.
    pub fn last_frame(&self) -> Option<u64> {
        self.last_frame
    }

    /// Forgets the memoized frame so the next run aggregates again.
    pub fn invalidate(&mut self) {
        self.last_frame = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sky_lane::test_support::{CountingDevice, SlotAtlas};
    use approx::assert_relative_eq;
    use celestia_core::math::{Transform, Vec3};
    use celestia_data::LightBinding;
    use std::collections::HashMap;

    struct Fixture {
        db: LightRenderDatabase,
        lights: HashMap<LightInstanceId, LightSource>,
        buffer: DirectionalLightBuffer,
        atlas: SurfaceTextureCache,
        device: CountingDevice,
        lane: LightAggregationLane,
    }

    impl Fixture {
        fn new(capacity: usize) -> Self {
            let device = CountingDevice::default();
            let mut buffer = DirectionalLightBuffer::new();
            buffer.create(&device, capacity).unwrap();
            Self {
                db: LightRenderDatabase::new(),
                lights: HashMap::new(),
                buffer,
                atlas: SurfaceTextureCache::new(Box::new(SlotAtlas::new(4)), 0),
                device,
                lane: LightAggregationLane::new(),
            }
        }

        fn add(&mut self, id: u64, source: LightSource, settings: CelestialLight) -> LightHandle {
            let handle = self.db.create_entity(true);
            self.db
                .attach(handle, LightBinding::directional(LightInstanceId(id)), settings);
            self.lights.insert(LightInstanceId(id), source);
            handle
        }

        fn run(&mut self, frame_index: u64) -> FrameLightData {
            self.lane
                .run(
                    frame_index,
                    &self.db,
                    &self.lights,
                    &mut self.buffer,
                    &mut self.atlas,
                    &self.device,
                )
                .unwrap()
        }
    }

    fn sky_light() -> CelestialLight {
        CelestialLight {
            interacts_with_sky: true,
            ..Default::default()
        }
    }

    fn shining_down(intensity: f32) -> LightSource {
        LightSource {
            intensity,
            transform: Transform::looking_along(Vec3::NEG_Y),
            ..Default::default()
        }
    }

    #[test]
    fn test_upload_once_per_frame() {
        let mut fx = Fixture::new(4);
        fx.add(1, shining_down(2.0), sky_light());

        fx.run(7);
        fx.run(7);
        fx.run(7);
        assert_eq!(fx.device.writes(), 1);

        fx.run(8);
        assert_eq!(fx.device.writes(), 2);
        assert_eq!(fx.lane.last_frame(), Some(8));
    }

    #[test]
    fn test_memoized_frame_ignores_registry_changes() {
        let mut fx = Fixture::new(4);
        fx.add(1, shining_down(2.0), sky_light());
        let first = fx.run(1);

        fx.add(2, shining_down(9.0), sky_light());
        assert_eq!(fx.run(1), first);

        fx.lane.invalidate();
        assert_eq!(fx.run(1).light_count, 2);
    }

    #[test]
    fn test_disqualified_lights_keep_their_slot() {
        let mut fx = Fixture::new(4);
        fx.add(1, shining_down(0.0), sky_light());
        fx.add(
            2,
            LightSource {
                enabled: false,
                ..shining_down(50.0)
            },
            sky_light(),
        );
        fx.add(3, shining_down(50.0), CelestialLight::default());
        fx.add(4, shining_down(3.0), sky_light());

        let frame = fx.run(1);
        let records = fx.buffer.records();

        assert_eq!(frame.light_count, 4);
        assert!(!records[0].interacts_with_sky());
        assert!(!records[1].interacts_with_sky());
        assert!(!records[2].interacts_with_sky());
        assert!(records[3].interacts_with_sky());
        assert_relative_eq!(frame.exposure, 3.0, epsilon = 1e-5);
    }

    #[test]
    fn test_exposure_has_a_floor() {
        let mut fx = Fixture::new(4);
        // Below the horizon: -forward.y is negative.
        fx.add(
            1,
            LightSource {
                intensity: 100.0,
                transform: Transform::looking_along(Vec3::Y),
                ..Default::default()
            },
            sky_light(),
        );
        assert_eq!(fx.run(1).exposure, BASE_EXPOSURE);
    }

    #[test]
    fn test_unused_slots_are_disabled() {
        let mut fx = Fixture::new(4);
        let a = fx.add(1, shining_down(1.0), sky_light());
        fx.add(2, shining_down(1.0), sky_light());
        fx.run(1);
        assert!(fx.buffer.records()[1].interacts_with_sky());

        fx.db.destroy_entity(a);
        let frame = fx.run(2);

        assert_eq!(frame.light_count, 1);
        assert!(fx.buffer.records()[0].interacts_with_sky());
        assert!(fx.buffer.records()[1..].iter().all(|r| !r.interacts_with_sky()));
    }

    #[test]
    fn test_buffer_grows_with_the_directional_set() {
        let mut fx = Fixture::new(2);
        for id in 0..5 {
            fx.add(id, shining_down(1.0), sky_light());
        }

        let frame = fx.run(1);

        assert_eq!(frame.light_count, 5);
        assert_eq!(fx.buffer.capacity(), 5);
        assert_eq!(fx.device.created(), 2);
        assert_eq!(fx.device.bytes_written(), 5 * PackedDirectionalRecord::STRIDE);
    }

    #[test]
    fn test_lights_without_source_data_are_disabled() {
        let mut fx = Fixture::new(2);
        fx.add(1, shining_down(1.0), sky_light());
        fx.lights.clear();

        let frame = fx.run(1);
        assert_eq!(frame.light_count, 1);
        assert!(!fx.buffer.records()[0].interacts_with_sky());
    }
}
