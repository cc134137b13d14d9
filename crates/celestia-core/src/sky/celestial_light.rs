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

//! Stylized settings attached to a directional light to turn it into a
//! visible celestial body.

use crate::math::{Curve, Gradient, LinearRgba};
use crate::renderer::{LightInstanceId, TextureInfo};

/// Fraction of the illuminant reflected back as earthshine.
pub const EARTHSHINE_SCALE: f32 = 0.01;

/// How the authored angular diameter of the source light is adjusted.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DiameterOverride {
    /// The light's angular diameter is used unchanged.
    #[default]
    None,
    /// The light's angular diameter is multiplied by the factor.
    Multiply(f32),
    /// The angular diameter is replaced by the value, in degrees.
    Override(f32),
}

impl DiameterOverride {
    /// Applies the override to an angular diameter in degrees.
    pub fn apply(&self, diameter: f32) -> f32 {
        match *self {
            DiameterOverride::None => diameter,
            DiameterOverride::Multiply(factor) => diameter * factor,
            DiameterOverride::Override(value) => value,
        }
    }
}

/// The light source used to shade a celestial body.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ShadingSource {
    /// The body emits light.
    #[default]
    Emission,
    /// The body reflects light from a directional light in the scene.
    ///
    /// When `source` is unset, refers to the body's own light, or to a light
    /// that is not directional, the current main light is used instead.
    ReflectSunLight {
        /// The illuminating light.
        source: Option<LightInstanceId>,
    },
    /// The body is lit by an artificial light described by a phase.
    Manual {
        /// Color of the artificial illuminant.
        sun_color: LinearRgba,
        /// Intensity of the artificial illuminant.
        sun_intensity: f32,
        /// Phase fraction in `[0, 1]`, mapped to a full turn.
        phase: f32,
        /// Rotation of the phase around the body's forward axis, in degrees.
        phase_rotation: f32,
    },
}

/// Drives a light's intensity from its elevation.
#[derive(Debug, Clone, PartialEq)]
pub struct IntensityDrive {
    /// Intensity as a function of elevation.
    pub curve: Curve,
    /// Multiplier applied to the curve value.
    pub multiplier: f32,
}

/// The stylized settings of a celestial directional light.
#[derive(Debug, Clone, PartialEq)]
pub struct CelestialLight {
    /// Whether the light is drawn as a body in the sky.
    pub interacts_with_sky: bool,
    /// Adjustment of the source light's angular diameter.
    pub diameter_override: DiameterOverride,
    /// Distance of the body from the camera, in world units.
    pub distance: f32,
    /// How the body's disc is lit.
    pub shading_source: ShadingSource,
    /// Earthshine factor, before [`EARTHSHINE_SCALE`].
    pub earthshine: f32,
    /// Optional surface texture placed in the surface atlas.
    pub surface_texture: Option<TextureInfo>,
    /// Tint of the disc.
    pub surface_tint: LinearRgba,
    /// Angular size of the flare band, in degrees.
    pub flare_size: f32,
    /// Falloff exponent of the flare.
    pub flare_falloff: f32,
    /// Tint of the flare.
    pub flare_tint: LinearRgba,
    /// Intensity of the flare in `[0, 1]`.
    pub flare_intensity: f32,
    /// When set, the source light color follows this gradient over elevation.
    pub color_drive: Option<Gradient>,
    /// When set, the source light intensity follows this curve over elevation.
    pub intensity_drive: Option<IntensityDrive>,
    /// Main light priority, by convention in `[-100, 100]`.
    pub priority: i32,
}

impl Default for CelestialLight {
    fn default() -> Self {
        Self {
            interacts_with_sky: false,
            diameter_override: DiameterOverride::None,
            distance: 1.5e11,
            shading_source: ShadingSource::Emission,
            earthshine: 1.0,
            surface_texture: None,
            surface_tint: LinearRgba::WHITE,
            flare_size: 2.0,
            flare_falloff: 4.0,
            flare_tint: LinearRgba::WHITE,
            flare_intensity: 1.0,
            color_drive: None,
            intensity_drive: None,
            priority: 0,
        }
    }
}
