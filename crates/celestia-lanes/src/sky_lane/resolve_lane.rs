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

//! Resolution of the sky shading constants.

use super::aggregate_lane::FrameLightData;
use super::properties as prop;
use super::renderer::SkyRenderContext;
use celestia_core::math::{
    elevation_from_direction_y, EulerRot, LinearRgba, Mat4, Quat, Vec3, Vec4, DEG_TO_RAD,
};
use celestia_core::renderer::{
    evaluate_light_color, BufferId, LightSource, ShaderConstantSink, ShaderValue, TextureId,
};
use celestia_core::sky::{ExposureMode, SkyConfig, SpaceBackdrop};

/// Luminance that maps to 0 EV in automatic exposure.
pub const MID_GRAY_EXPOSURE: f32 = 2.5;

/// Elevation used when there is no main light.
pub const NEUTRAL_ELEVATION: f32 = 0.5;

/// Direction towards the main light and its elevation key.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SunPosition {
    /// Direction towards the light, the opposite of its forward axis.
    pub direction: Vec3,
    /// `max(direction.y * 0.5 + 0.5, 0)`, the sampling key of every elevation curve.
    pub elevation: f32,
}

impl SunPosition {
    /// Locates the main light. Without one, the direction is zero and the
    /// elevation neutral.
    pub fn from_main_light(main_light: Option<&LightSource>) -> Self {
        match main_light {
            Some(light) => {
                let direction = -light.transform.forward();
                Self {
                    direction,
                    elevation: elevation_from_direction_y(direction.y),
                }
            }
            None => Self {
                direction: Vec3::ZERO,
                elevation: NEUTRAL_ELEVATION,
            },
        }
    }
}

/// Resolves the sky exposure in EV.
pub fn resolve_exposure(config: &SkyConfig, elevation: f32, auto_exposure: f32) -> f32 {
    match config.exposure_mode {
        ExposureMode::Curve => config.exposure_curve.evaluate(elevation),
        ExposureMode::Fixed => config.fixed_exposure,
        ExposureMode::Automatic => {
            (auto_exposure / MID_GRAY_EXPOSURE).log2() + config.clamped_ev_adjustment()
        }
    }
}

/// Rotation matrix of the space cubemap from Euler angles in degrees,
/// applied around Z, then X, then Y.
pub fn space_rotation_matrix(euler_degrees: Vec3) -> Mat4 {
    let radians = euler_degrees * DEG_TO_RAD;
    Mat4::from_quat(Quat::from_euler(
        EulerRot::YXZ,
        radians.y,
        radians.x,
        radians.z,
    ))
}

/// The resolved space backdrop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpaceParameters {
    /// The space cubemap.
    pub texture: TextureId,
    /// Rotation of the cubemap.
    pub rotation: Mat4,
    /// Exposure of the cubemap, in EV.
    pub ev: f32,
}

/// Bindings owned by the renderer that the sky shader reads.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SkyBindings {
    /// `(width, height, 1 / width, 1 / height)` of the surface atlas.
    pub atlas_size: Vec4,
    /// Surface atlas metadata.
    pub atlas_data: Vec4,
    /// The surface atlas texture.
    pub atlas_texture: Option<TextureId>,
    /// The directional light buffer.
    pub directional_buffer: Option<BufferId>,
}

/// Every constant the sky shader needs for one draw.
#[derive(Debug, Clone, PartialEq)]
pub struct SkyParameters {
    /// Zenith color.
    pub sky_color: LinearRgba,
    /// Ground color.
    pub ground_color: LinearRgba,
    /// Horizon line color.
    pub horizon_line_color: LinearRgba,
    /// Horizon line strength.
    pub horizon_line_contribution: f32,
    /// Horizon line sharpness.
    pub horizon_line_exponent: f32,
    /// Main light color without intensity, white without a main light.
    pub sun_color: LinearRgba,
    /// Halo strength.
    pub sun_halo_contribution: f32,
    /// Halo sharpness.
    pub sun_halo_exponent: f32,
    /// Where the main light is.
    pub sun: SunPosition,
    /// Sky exposure in EV.
    pub exposure: f32,
    /// Whether the space backdrop is drawn.
    pub render_space: bool,
    /// The space backdrop, when a cubemap is configured.
    pub space: Option<SpaceParameters>,
    /// Matrix from pixel coordinates to world-space view direction.
    pub pixel_coord_to_view_dir: Mat4,
    /// Whether celestial discs are drawn.
    pub render_sun_disc: bool,
    /// Shader pass to draw with.
    pub pass: u32,
    /// Number of records in the directional light buffer.
    pub directional_count: u32,
    /// Renderer-owned bindings.
    pub bindings: SkyBindings,
}

impl SkyParameters {
    /// Writes every constant to `sink`.
    pub fn write_to(&self, sink: &mut dyn ShaderConstantSink) {
        let bindings = &self.bindings;
        sink.set(prop::SURFACE_ATLAS_SIZE, ShaderValue::Vector(bindings.atlas_size));
        if let Some(texture) = bindings.atlas_texture {
            sink.set(prop::SURFACE_ATLAS, ShaderValue::Texture(texture));
        }
        sink.set(prop::SURFACE_ATLAS_DATA, ShaderValue::Vector(bindings.atlas_data));
        sink.set(
            prop::DIRECTIONAL_COUNT,
            ShaderValue::Int(self.directional_count as i32),
        );
        if let Some(buffer) = bindings.directional_buffer {
            sink.set(prop::DIRECTIONAL_DATAS, ShaderValue::Buffer(buffer));
        }

        sink.set(prop::SKY_COLOR, ShaderValue::Color(self.sky_color));
        sink.set(prop::GROUND_COLOR, ShaderValue::Color(self.ground_color));
        sink.set(prop::SKY_INTENSITY, ShaderValue::Float(self.exposure));

        sink.set(prop::RENDER_SPACE, ShaderValue::Int(self.render_space as i32));
        if let Some(space) = &self.space {
            sink.set(prop::SPACE_TEXTURE, ShaderValue::Texture(space.texture));
            sink.set(prop::SPACE_ROTATION, ShaderValue::Matrix(space.rotation));
            sink.set(prop::SPACE_EV, ShaderValue::Float(space.ev));
        }

        sink.set(prop::HORIZON_LINE_COLOR, ShaderValue::Color(self.horizon_line_color));
        sink.set(
            prop::HORIZON_LINE_CONTRIBUTION,
            ShaderValue::Float(self.horizon_line_contribution),
        );
        sink.set(
            prop::HORIZON_LINE_EXPONENT,
            ShaderValue::Float(self.horizon_line_exponent),
        );
        sink.set(prop::SUN_COLOR, ShaderValue::Color(self.sun_color));
        sink.set(
            prop::SUN_HALO_CONTRIBUTION,
            ShaderValue::Float(self.sun_halo_contribution),
        );
        sink.set(prop::SUN_HALO_EXPONENT, ShaderValue::Float(self.sun_halo_exponent));
        sink.set(
            prop::SUN_DIRECTION,
            ShaderValue::Vector(self.sun.direction.extend(0.0)),
        );

        sink.set(
            prop::PIXEL_COORD_TO_VIEW_DIR,
            ShaderValue::Matrix(self.pixel_coord_to_view_dir),
        );
        sink.set(prop::RENDER_SUN_DISC, ShaderValue::Int(self.render_sun_disc as i32));
    }
}

fn resolve_space(space: &SpaceBackdrop) -> (bool, Option<SpaceParameters>) {
    match space.texture {
        Some(texture) => (
            space.render_space,
            Some(SpaceParameters {
                texture,
                rotation: space_rotation_matrix(space.rotation),
                ev: space.ev,
            }),
        ),
        None => (false, None),
    }
}

/// The lane that turns the sky configuration and the frame's main light
/// into [`SkyParameters`].
#[derive(Debug, Default)]
pub struct SkyParameterLane;

impl SkyParameterLane {
    /// Creates a new `SkyParameterLane`.
    pub fn new() -> Self {
        Self
    }

    /// Resolves the sky constants. Does not draw anything.
    pub fn resolve(
        &self,
        config: &SkyConfig,
        main_light: Option<&LightSource>,
        frame: &FrameLightData,
        ctx: &SkyRenderContext,
        bindings: SkyBindings,
    ) -> SkyParameters {
        let sun = SunPosition::from_main_light(main_light);
        let elevation = sun.elevation;
        let (render_space, space) = resolve_space(&config.space);
        let sun_color = main_light
            .map(|light| evaluate_light_color(light, false))
            .unwrap_or(LinearRgba::WHITE);

        SkyParameters {
            sky_color: config.sky_gradient.evaluate(elevation),
            ground_color: config.ground_gradient.evaluate(elevation),
            horizon_line_color: config.horizon_line_gradient.evaluate(elevation),
            horizon_line_contribution: config.horizon_line_contribution,
            horizon_line_exponent: config.horizon_line_exponent,
            sun_color,
            sun_halo_contribution: config.sun_halo_contribution,
            sun_halo_exponent: config.sun_halo_exponent,
            sun,
            exposure: resolve_exposure(config, elevation, frame.exposure),
            render_space,
            space,
            pixel_coord_to_view_dir: ctx.pixel_coord_to_view_dir,
            render_sun_disc: ctx.render_sun_disc,
            pass: prop::pass_index(ctx.render_for_cubemap),
            directional_count: frame.light_count,
            bindings,
        }
    }
}
