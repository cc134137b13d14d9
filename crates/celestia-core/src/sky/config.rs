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

//! The per-scene sky authoring configuration.

use crate::math::{Curve, Gradient, LinearRgba, Vec3};
use crate::renderer::TextureId;

/// How the sky exposure value is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExposureMode {
    /// Sampled from [`SkyConfig::exposure_curve`] at the main light elevation.
    #[default]
    Curve,
    /// Taken verbatim from [`SkyConfig::fixed_exposure`].
    Fixed,
    /// Derived from the aggregated directional exposure, plus [`SkyConfig::ev_adjustment`].
    Automatic,
}

/// The starry backdrop drawn behind the gradients.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpaceBackdrop {
    /// Whether the backdrop is drawn.
    pub render_space: bool,
    /// The space cubemap. The backdrop is skipped without it.
    pub texture: Option<TextureId>,
    /// Euler rotation of the cubemap in degrees (x, y, z).
    pub rotation: Vec3,
    /// Exposure value applied to the cubemap.
    pub ev: f32,
}

impl Default for SpaceBackdrop {
    fn default() -> Self {
        Self {
            render_space: false,
            texture: None,
            rotation: Vec3::ZERO,
            ev: 0.0,
        }
    }
}

/// The cloud layer of the sky.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CloudConfig {
    /// The cloud cubemap. No cloud pass runs without it.
    pub texture: Option<TextureId>,
}

/// Stylized sky parameters, owned by the host scene.
#[derive(Debug, Clone, PartialEq)]
pub struct SkyConfig {
    /// Zenith color as a function of main light elevation.
    pub sky_gradient: Gradient,
    /// Ground color as a function of main light elevation.
    pub ground_gradient: Gradient,
    /// Horizon line color as a function of main light elevation.
    pub horizon_line_gradient: Gradient,
    /// Strength of the horizon line, in `[0, 2]`.
    pub horizon_line_contribution: f32,
    /// Sharpness of the horizon line.
    pub horizon_line_exponent: f32,
    /// Strength of the halo around the main light, in `[0, 2]`.
    pub sun_halo_contribution: f32,
    /// Sharpness of the halo around the main light.
    pub sun_halo_exponent: f32,
    /// Selects which of the exposure sources below is used.
    pub exposure_mode: ExposureMode,
    /// Exposure over main light elevation, for [`ExposureMode::Curve`].
    pub exposure_curve: Curve,
    /// Constant exposure, for [`ExposureMode::Fixed`].
    pub fixed_exposure: f32,
    /// Offset in EV added in [`ExposureMode::Automatic`], in `[-5, 5]`.
    pub ev_adjustment: f32,
    /// The space backdrop.
    pub space: SpaceBackdrop,
    /// The cloud layer.
    pub clouds: CloudConfig,
}

impl SkyConfig {
    /// The EV adjustment clamped to its supported range.
    pub fn clamped_ev_adjustment(&self) -> f32 {
        self.ev_adjustment.clamp(-5.0, 5.0)
    }
}

impl Default for SkyConfig {
    fn default() -> Self {
        Self {
            sky_gradient: Gradient::from_pairs(&[
                (0.0, LinearRgba::from_srgb(0.02, 0.03, 0.08)),
                (0.5, LinearRgba::from_srgb(0.85, 0.45, 0.3)),
                (1.0, LinearRgba::from_srgb(0.25, 0.5, 0.95)),
            ]),
            ground_gradient: Gradient::from_pairs(&[
                (0.0, LinearRgba::from_srgb(0.01, 0.01, 0.02)),
                (1.0, LinearRgba::from_srgb(0.35, 0.33, 0.3)),
            ]),
            horizon_line_gradient: Gradient::from_pairs(&[
                (0.0, LinearRgba::BLACK),
                (0.5, LinearRgba::from_srgb(1.0, 0.6, 0.35)),
                (1.0, LinearRgba::from_srgb(0.8, 0.85, 0.9)),
            ]),
            horizon_line_contribution: 1.0,
            horizon_line_exponent: 5.0,
            sun_halo_contribution: 1.0,
            sun_halo_exponent: 125.0,
            exposure_mode: ExposureMode::Curve,
            exposure_curve: Curve::constant(0.0),
            fixed_exposure: 1.0,
            ev_adjustment: 0.0,
            space: SpaceBackdrop::default(),
            clouds: CloudConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SkyConfig::default();
        assert_eq!(config.exposure_mode, ExposureMode::Curve);
        assert_eq!(config.horizon_line_exponent, 5.0);
        assert_eq!(config.sun_halo_exponent, 125.0);
        assert!(!config.space.render_space);
        assert!(config.clouds.texture.is_none());
    }

    #[test]
    fn test_ev_adjustment_is_clamped() {
        let config = SkyConfig {
            ev_adjustment: 12.0,
            ..Default::default()
        };
        assert_eq!(config.clamped_ev_adjustment(), 5.0);
    }
}
