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

//! Drives source light color and intensity from elevation.

use celestia_core::math::elevation_from_direction_y;
use celestia_core::renderer::{LightSource, LightSourceStore};
use celestia_core::sky::CelestialLight;
use celestia_data::LightRenderDatabase;

/// Applies the elevation drives of `settings` to `source`.
///
/// Returns `true` if the light has any drive.
pub fn drive_light(settings: &CelestialLight, source: &mut LightSource) -> bool {
    if settings.color_drive.is_none() && settings.intensity_drive.is_none() {
        return false;
    }
    let elevation = elevation_from_direction_y(-source.transform.forward().y);
    if let Some(gradient) = &settings.color_drive {
        source.color = gradient.evaluate(elevation);
    }
    if let Some(drive) = &settings.intensity_drive {
        source.intensity = drive.curve.evaluate(elevation) * drive.multiplier;
    }
    true
}

/// Runs the elevation drives of every registered light. Meant to run before
/// aggregation.
#[derive(Debug, Default)]
pub struct LightDriveLane;

impl LightDriveLane {
    /// Creates a new `LightDriveLane`.
    pub fn new() -> Self {
        Self
    }

    /// Returns the number of lights that were driven.
    pub fn run(&self, db: &LightRenderDatabase, lights: &mut dyn LightSourceStore) -> usize {
        let mut driven = 0;
        for &handle in db.handles() {
            let (Some(settings), Some(light_id)) = (db.light(handle), db.light_id(handle)) else {
                continue;
            };
            let Some(source) = lights.light_source_mut(light_id) else {
                continue;
            };
            if drive_light(settings, source) {
                driven += 1;
            }
        }
        driven
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use celestia_core::math::{Curve, Gradient, LinearRgba, Transform, Vec3};
    use celestia_core::renderer::LightInstanceId;
    use celestia_core::sky::IntensityDrive;
    use celestia_data::LightBinding;
    use std::collections::HashMap;

    fn driven_settings() -> CelestialLight {
        CelestialLight {
            color_drive: Some(Gradient::from_pairs(&[
                (0.0, LinearRgba::BLACK),
                (1.0, LinearRgba::rgb(1.0, 0.8, 0.6)),
            ])),
            intensity_drive: Some(IntensityDrive {
                curve: Curve::linear(&[(0.0, 0.0), (1.0, 2.0)]),
                multiplier: 5.0,
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_drive_at_zenith() {
        let mut source = LightSource {
            transform: Transform::looking_along(Vec3::NEG_Y),
            ..Default::default()
        };
        assert!(drive_light(&driven_settings(), &mut source));
        assert_eq!(source.color, LinearRgba::rgb(1.0, 0.8, 0.6));
        assert_relative_eq!(source.intensity, 10.0);
    }

    #[test]
    fn test_drive_at_horizon() {
        let mut source = LightSource {
            transform: Transform::looking_along(Vec3::X),
            ..Default::default()
        };
        drive_light(&driven_settings(), &mut source);
        assert_relative_eq!(source.intensity, 5.0, epsilon = 1e-5);
    }

    #[test]
    fn test_lights_without_drive_are_untouched() {
        let mut source = LightSource::default();
        assert!(!drive_light(&CelestialLight::default(), &mut source));
        assert_eq!(source, LightSource::default());
    }

    #[test]
    fn test_lane_skips_lights_without_source() {
        let mut db = LightRenderDatabase::new();
        for id in 1..=2 {
            let handle = db.create_entity(true);
            db.attach(
                handle,
                LightBinding::directional(LightInstanceId(id)),
                driven_settings(),
            );
        }
        let mut lights = HashMap::new();
        lights.insert(LightInstanceId(2), LightSource::default());

        let driven = LightDriveLane::new().run(&db, &mut lights);

        assert_eq!(driven, 1);
        // Default transform looks along +Z: elevation 0.5.
        assert_relative_eq!(lights[&LightInstanceId(2)].intensity, 5.0, epsilon = 1e-5);
    }
}
