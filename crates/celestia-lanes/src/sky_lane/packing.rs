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

//! Packing of one celestial light into a [`PackedDirectionalRecord`].

use super::surface_atlas::SurfaceTextureCache;
use celestia_core::math::{LinearRgba, Quat, Vec3, Vec4, DEG_TO_RAD, TAU};
use celestia_core::renderer::{
    evaluate_light_color, BodyType, LightInstanceId, LightKind, LightSource, LightSourceQuery,
    PackedDirectionalRecord,
};
use celestia_core::sky::{CelestialLight, ShadingSource, EARTHSHINE_SCALE};

/// Smallest flare size, in radians. Keeps the flare band from collapsing.
pub const MIN_FLARE_SIZE: f32 = 5.960_464_5e-8;

/// Everything needed to pack one light.
#[derive(Clone, Copy)]
pub struct PackInput<'a> {
    /// Identity of the light being packed.
    pub light_id: LightInstanceId,
    /// Current state of the light being packed.
    pub source: &'a LightSource,
    /// The celestial settings of the light.
    pub settings: &'a CelestialLight,
    /// The frame's main light, used as fallback illuminant for reflective bodies.
    pub main_light: Option<&'a LightSource>,
    /// Lookup for explicit illuminants.
    pub lights: &'a dyn LightSourceQuery,
}

/// Reciprocal of the solid angle of a cone with the given cosine of its half-angle.
///
/// Returns zero for a degenerate cone.
pub fn rcp_solid_angle(cos_half_angle: f32) -> f32 {
    let solid_angle = TAU * (1.0 - cos_half_angle);
    if solid_angle > 0.0 {
        1.0 / solid_angle
    } else {
        0.0
    }
}

/// Direction of the artificial illuminant of a manually lit body.
///
/// The phase runs a full turn in the plane that `remap` (the rotation taking
/// +X onto `forward`) derives from the XZ plane, then rotates around `forward`.
pub fn manual_sun_direction(forward: Vec3, phase: f32, phase_rotation_deg: f32) -> Vec3 {
    let rotation = Quat::from_axis_angle(forward, phase_rotation_deg * DEG_TO_RAD);
    let remap = Quat::from_rotation_arc(Vec3::X, forward);
    let angle = phase * TAU;
    rotation * remap * Vec3::new(angle.cos(), 0.0, angle.sin())
}

fn resolve_illuminant<'a>(
    input: &PackInput<'a>,
    explicit: Option<LightInstanceId>,
) -> Option<&'a LightSource> {
    let lights = input.lights;
    explicit
        .filter(|id| *id != input.light_id)
        .and_then(|id| lights.light_source(id))
        .filter(|light| light.kind == LightKind::Directional)
        .or(input.main_light)
}

/// Packs a light for the shader.
///
/// Surface textures are reserved, laid out and fetched in `atlas` on the way.
pub fn pack_directional_light(
    input: &PackInput<'_>,
    atlas: &mut SurfaceTextureCache,
) -> PackedDirectionalRecord {
    let source = input.source;
    let settings = input.settings;
    let transform = &source.transform;
    let forward = transform.forward();

    let color = evaluate_light_color(source, true);

    let angular_diameter = settings.diameter_override.apply(source.angular_diameter);
    let angular_radius = angular_diameter * 0.5 * DEG_TO_RAD;
    let distance = settings.distance;
    let radius = angular_radius.tan() * distance;

    let surface_texture_scale_offset = match settings.surface_texture.as_ref() {
        Some(texture) => {
            atlas.reserve_space(texture);
            atlas.layout_if_needed();
            atlas.fetch(texture)
        }
        None => Vec4::ZERO,
    };

    let flare_size = (settings.flare_size * DEG_TO_RAD).max(MIN_FLARE_SIZE);
    let flare_cos_inner = angular_radius.cos();
    let flare_cos_outer = (angular_radius + flare_size).cos();

    let tint = settings.surface_tint;
    let flare_tint = settings.flare_tint.scale_rgb(settings.flare_intensity);

    let mut sun_direction = Vec3::ZERO;
    let mut phase_angle_sin_cos = [0.0, 0.0];
    let (body_type, surface_color, flare_color) = match settings.shading_source {
        ShadingSource::Emission => {
            let rcp = rcp_solid_angle(flare_cos_inner);
            (
                BodyType::Emissive,
                color * tint.scale_rgb(rcp),
                color * flare_tint.scale_rgb(rcp),
            )
        }
        ShadingSource::Manual {
            sun_color,
            sun_intensity,
            phase,
            phase_rotation,
        } => {
            let sun = sun_color.scale_rgb(sun_intensity);
            sun_direction = manual_sun_direction(forward, phase, phase_rotation);
            let angle = phase * TAU;
            phase_angle_sin_cos = [angle.sin(), angle.cos()];
            (BodyType::Reflective, sun * tint, sun * flare_tint)
        }
        ShadingSource::ReflectSunLight { source: explicit } => {
            let (sun, direction) = match resolve_illuminant(input, explicit) {
                Some(light) => (
                    evaluate_light_color(light, true),
                    light.transform.forward(),
                ),
                None => (LinearRgba::BLACK, Vec3::Z),
            };
            sun_direction = direction;
            (BodyType::Reflective, sun * tint, sun * flare_tint)
        }
    };

    PackedDirectionalRecord {
        color: color.to_rgb_array(),
        radius,
        forward: forward.to_array(),
        distance_from_camera: distance,
        right: transform.right().normalize_or_zero().to_array(),
        angular_radius,
        up: transform.up().normalize_or_zero().to_array(),
        body_type: body_type as u32,
        surface_color: surface_color.to_rgb_array(),
        earthshine: settings.earthshine * EARTHSHINE_SCALE,
        surface_texture_scale_offset: surface_texture_scale_offset.to_array(),
        sun_direction: sun_direction.to_array(),
        flare_cos_inner,
        phase_angle_sin_cos,
        flare_cos_outer,
        flare_size,
        flare_color: flare_color.to_rgb_array(),
        flare_falloff: settings.flare_falloff,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sky_lane::test_support::SlotAtlas;
    use approx::assert_relative_eq;
    use celestia_core::math::{Transform, PI, RAD_TO_DEG};
    use celestia_core::renderer::{TextureId, TextureInfo};
    use celestia_core::sky::DiameterOverride;
    use std::collections::HashMap;

    fn cache() -> SurfaceTextureCache {
        SurfaceTextureCache::new(Box::new(SlotAtlas::new(4)), 0)
    }

    fn sky_light() -> CelestialLight {
        CelestialLight {
            interacts_with_sky: true,
            ..Default::default()
        }
    }

    fn pack(
        source: &LightSource,
        settings: &CelestialLight,
        main_light: Option<&LightSource>,
        lights: &HashMap<LightInstanceId, LightSource>,
    ) -> PackedDirectionalRecord {
        let input = PackInput {
            light_id: LightInstanceId(1),
            source,
            settings,
            main_light,
            lights,
        };
        pack_directional_light(&input, &mut cache())
    }

    #[test]
    fn test_emission_normalizes_by_solid_angle() {
        // An angular radius of 0.1 rad means a diameter of 0.2 rad, in degrees.
        let settings = CelestialLight {
            diameter_override: DiameterOverride::Override(0.2 * RAD_TO_DEG),
            ..sky_light()
        };
        let expected = 1.0 / (2.0 * PI * (1.0 - 0.1f32.cos()));

        let unit = LightSource::default();
        let record = pack(&unit, &settings, None, &HashMap::new());
        assert_relative_eq!(record.angular_radius, 0.1, epsilon = 1e-6);
        assert_relative_eq!(record.surface_color[0], expected, max_relative = 1e-3);
        assert_relative_eq!(record.surface_color[1], expected, max_relative = 1e-3);
        assert_eq!(record.body_type, BodyType::Emissive as u32);
        assert_eq!(record.phase_angle_sin_cos, [0.0, 0.0]);

        let bright = LightSource {
            intensity: 3.0,
            ..Default::default()
        };
        let record = pack(&bright, &settings, None, &HashMap::new());
        assert_relative_eq!(record.surface_color[2], 3.0 * expected, max_relative = 1e-3);
        assert_eq!(record.color, [3.0, 3.0, 3.0]);
    }

    #[test]
    fn test_geometry() {
        let source = LightSource {
            angular_diameter: 2.0,
            transform: Transform::looking_along(Vec3::new(0.0, -1.0, 1.0)),
            ..Default::default()
        };
        let settings = CelestialLight {
            diameter_override: DiameterOverride::Multiply(0.5),
            distance: 1000.0,
            flare_size: 3.0,
            ..sky_light()
        };
        let record = pack(&source, &settings, None, &HashMap::new());

        let angular_radius = 0.5 * DEG_TO_RAD;
        assert_relative_eq!(record.angular_radius, angular_radius);
        assert_relative_eq!(record.radius, angular_radius.tan() * 1000.0, max_relative = 1e-5);
        assert_eq!(record.distance_from_camera, 1000.0);
        assert!(record.interacts_with_sky());
        assert_relative_eq!(record.flare_size, 3.0 * DEG_TO_RAD);
        assert_relative_eq!(record.flare_cos_inner, angular_radius.cos());
        assert_relative_eq!(
            record.flare_cos_outer,
            (angular_radius + 3.0 * DEG_TO_RAD).cos()
        );
        let forward = Vec3::from_array(record.forward);
        assert_relative_eq!(forward.y, -(0.5f32).sqrt(), epsilon = 1e-5);
        assert_relative_eq!(record.earthshine, 0.01);
    }

    #[test]
    fn test_flare_size_has_a_floor() {
        let settings = CelestialLight {
            flare_size: 0.0,
            ..sky_light()
        };
        let record = pack(&LightSource::default(), &settings, None, &HashMap::new());
        assert_eq!(record.flare_size, MIN_FLARE_SIZE);
        assert!(record.flare_cos_outer <= record.flare_cos_inner);
    }

    #[test]
    fn test_manual_shading() {
        let settings = CelestialLight {
            shading_source: ShadingSource::Manual {
                sun_color: LinearRgba::rgb(1.0, 0.5, 0.25),
                sun_intensity: 2.0,
                phase: 0.25,
                phase_rotation: 0.0,
            },
            ..sky_light()
        };
        // Default transform looks along +Z.
        let record = pack(&LightSource::default(), &settings, None, &HashMap::new());

        assert_eq!(record.body_type, BodyType::Reflective as u32);
        assert_eq!(record.surface_color, [2.0, 1.0, 0.5]);
        assert_eq!(record.flare_color, [2.0, 1.0, 0.5]);
        assert_relative_eq!(record.phase_angle_sin_cos[0], 1.0, epsilon = 1e-6);
        assert_relative_eq!(record.phase_angle_sin_cos[1], 0.0, epsilon = 1e-6);

        // Quarter phase points the local Z axis, remapped from +X onto +Z.
        let expected = Quat::from_rotation_arc(Vec3::X, Vec3::Z) * Vec3::Z;
        let sun = Vec3::from_array(record.sun_direction);
        assert_relative_eq!(sun.x, expected.x, epsilon = 1e-5);
        assert_relative_eq!(sun.y, expected.y, epsilon = 1e-5);
        assert_relative_eq!(sun.z, expected.z, epsilon = 1e-5);
        assert_relative_eq!(sun.length(), 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_manual_direction_at_zero_phase_is_forward() {
        let forward = Vec3::new(0.0, 0.6, 0.8);
        let sun = manual_sun_direction(forward, 0.0, 45.0);
        // Rotating the forward axis around itself leaves it unchanged.
        assert_relative_eq!(sun.x, forward.x, epsilon = 1e-5);
        assert_relative_eq!(sun.y, forward.y, epsilon = 1e-5);
        assert_relative_eq!(sun.z, forward.z, epsilon = 1e-5);
    }

    #[test]
    fn test_reflect_uses_explicit_directional_source() {
        let sun = LightSource {
            intensity: 4.0,
            transform: Transform::looking_along(Vec3::NEG_Y),
            ..Default::default()
        };
        let mut lights = HashMap::new();
        lights.insert(LightInstanceId(2), sun);

        let settings = CelestialLight {
            shading_source: ShadingSource::ReflectSunLight {
                source: Some(LightInstanceId(2)),
            },
            surface_tint: LinearRgba::rgb(0.5, 0.5, 0.5),
            ..sky_light()
        };
        let record = pack(&LightSource::default(), &settings, None, &lights);

        assert_eq!(record.body_type, BodyType::Reflective as u32);
        assert_eq!(record.surface_color, [2.0, 2.0, 2.0]);
        assert_eq!(record.flare_color, [4.0, 4.0, 4.0]);
        assert_relative_eq!(record.sun_direction[1], -1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_reflect_falls_back_to_main_light() {
        let point = LightSource {
            kind: LightKind::Point,
            intensity: 100.0,
            ..Default::default()
        };
        let main = LightSource {
            intensity: 2.0,
            ..Default::default()
        };
        let mut lights = HashMap::new();
        lights.insert(LightInstanceId(3), point);

        for explicit in [None, Some(LightInstanceId(1)), Some(LightInstanceId(3))] {
            let settings = CelestialLight {
                shading_source: ShadingSource::ReflectSunLight { source: explicit },
                ..sky_light()
            };
            let record = pack(&LightSource::default(), &settings, Some(&main), &lights);
            assert_eq!(record.surface_color, [2.0, 2.0, 2.0], "source {explicit:?}");
        }
    }

    #[test]
    fn test_reflect_without_any_illuminant() {
        let settings = CelestialLight {
            shading_source: ShadingSource::ReflectSunLight { source: None },
            ..sky_light()
        };
        let record = pack(&LightSource::default(), &settings, None, &HashMap::new());
        assert_eq!(record.surface_color, [0.0, 0.0, 0.0]);
        assert_eq!(record.sun_direction, [0.0, 0.0, 1.0]);
        assert_eq!(record.phase_angle_sin_cos, [0.0, 0.0]);
    }

    #[test]
    fn test_surface_texture_placement() {
        let atlas = SlotAtlas::new(4);
        let mut cache = SurfaceTextureCache::new(Box::new(atlas), 0);
        let settings = CelestialLight {
            surface_texture: Some(TextureInfo::new(TextureId(7), 256, 256)),
            ..sky_light()
        };
        let lights: HashMap<LightInstanceId, LightSource> = HashMap::new();
        let source = LightSource::default();
        let input = PackInput {
            light_id: LightInstanceId(1),
            source: &source,
            settings: &settings,
            main_light: None,
            lights: &lights,
        };

        let record = pack_directional_light(&input, &mut cache);
        assert_eq!(record.surface_texture_scale_offset, [0.25, 1.0, 0.0, 0.0]);

        let untextured = pack(&source, &sky_light(), None, &lights);
        assert_eq!(untextured.surface_texture_scale_offset, [0.0; 4]);
    }
}
