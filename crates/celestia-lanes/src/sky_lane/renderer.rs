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

//! The sky renderer: owns the GPU resources of the sky lanes from pipeline
//! build to cleanup.

use super::aggregate_lane::{main_light_source, FrameLightData, LightAggregationLane};
use super::cloud_lane::{CloudParameterLane, CloudParameters};
use super::error::SkyLaneError;
use super::light_buffer::DirectionalLightBuffer;
use super::resolve_lane::{SkyBindings, SkyParameterLane, SkyParameters};
use super::surface_atlas::SurfaceTextureCache;
use celestia_core::math::Mat4;
use celestia_core::renderer::{GraphicsDevice, LightSourceQuery, ShaderConstantSink, TextureAtlas};
use celestia_core::sky::{CloudConfig, SkyConfig, SkyRenderSettings};
use celestia_data::LightRenderDatabase;
use std::sync::Arc;

/// Per-render inputs supplied by the render pipeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkyRenderContext {
    /// Index of the frame being rendered. Aggregation runs once per index.
    pub frame_index: u64,
    /// Matrix from pixel coordinates to world-space view direction.
    pub pixel_coord_to_view_dir: Mat4,
    /// Whether the celestial discs are drawn. Lights are only aggregated when they are.
    pub render_sun_disc: bool,
    /// `true` when baking the environment cubemap, `false` for the full-screen sky.
    pub render_for_cubemap: bool,
}

impl Default for SkyRenderContext {
    fn default() -> Self {
        Self {
            frame_index: 0,
            pixel_coord_to_view_dir: Mat4::IDENTITY,
            render_sun_disc: true,
            render_for_cubemap: false,
        }
    }
}

/// The sky rendering context of one render pipeline.
pub struct SkyRenderer {
    device: Arc<dyn GraphicsDevice>,
    buffer: DirectionalLightBuffer,
    atlas: SurfaceTextureCache,
    aggregation: LightAggregationLane,
    resolver: SkyParameterLane,
    clouds: CloudParameterLane,
    built: bool,
}

impl std::fmt::Debug for SkyRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SkyRenderer")
            .field("buffer", &self.buffer)
            .field("atlas", &self.atlas)
            .field("last_frame", &self.aggregation.last_frame())
            .field("built", &self.built)
            .finish()
    }
}

impl SkyRenderer {
    /// Creates the directional light buffer and wraps the surface atlas.
    ///
    /// The atlas itself is created by the caller at
    /// `settings.surface_atlas_size`; an atlas of another size is used as is
    /// with a warning.
    pub fn build(
        device: Arc<dyn GraphicsDevice>,
        atlas: Box<dyn TextureAtlas>,
        settings: &SkyRenderSettings,
    ) -> Result<Self, SkyLaneError> {
        settings.validate()?;
        let (width, height) = atlas.size();
        if !settings.matches_atlas(width, height) {
            log::warn!(
                "Surface atlas is {}x{} but the sky settings ask for {}px",
                width,
                height,
                settings.surface_atlas_size
            );
        }

        let mut buffer = DirectionalLightBuffer::new();
        buffer.create(device.as_ref(), settings.max_directional_lights)?;

        log::info!(
            "Sky renderer built: {} directional lights, surface atlas mip {}",
            settings.max_directional_lights,
            settings.surface_atlas_last_valid_mip
        );

        Ok(Self {
            device,
            buffer,
            atlas: SurfaceTextureCache::new(atlas, settings.surface_atlas_last_valid_mip),
            aggregation: LightAggregationLane::new(),
            resolver: SkyParameterLane::new(),
            clouds: CloudParameterLane::new(),
            built: true,
        })
    }

    /// Resolves the sky constants for one render and writes them to `sink`.
    ///
    /// Lights are aggregated only when `ctx.render_sun_disc` is set; otherwise
    /// the last aggregated frame is reused.
    pub fn render_sky(
        &mut self,
        db: &LightRenderDatabase,
        lights: &dyn LightSourceQuery,
        config: &SkyConfig,
        ctx: &SkyRenderContext,
        sink: &mut dyn ShaderConstantSink,
    ) -> Result<SkyParameters, SkyLaneError> {
        if !self.built {
            return Err(SkyLaneError::NotBuilt);
        }

        let frame = if ctx.render_sun_disc {
            if self.aggregation.last_frame() != Some(ctx.frame_index) {
                self.atlas.new_frame();
            }
            self.aggregation.run(
                ctx.frame_index,
                db,
                lights,
                &mut self.buffer,
                &mut self.atlas,
                self.device.as_ref(),
            )?
        } else {
            self.aggregation.frame()
        };

        let bindings = SkyBindings {
            atlas_size: self.atlas.atlas_size(),
            atlas_data: self.atlas.atlas_data(),
            atlas_texture: self.atlas.texture(),
            directional_buffer: self.buffer.id(),
        };
        let main_light = main_light_source(db, lights);
        let params = self.resolver.resolve(config, main_light, &frame, ctx, bindings);
        params.write_to(sink);
        Ok(params)
    }

    /// Writes the cloud constants to `sink`. Returns `None` when there is no
    /// cloud layer to draw.
    pub fn render_clouds(
        &self,
        config: &CloudConfig,
        ctx: &SkyRenderContext,
        sink: &mut dyn ShaderConstantSink,
    ) -> Result<Option<CloudParameters>, SkyLaneError> {
        if !self.built {
            return Err(SkyLaneError::NotBuilt);
        }
        let params = self.clouds.resolve(config, ctx);
        if let Some(params) = &params {
            params.write_to(sink);
        }
        Ok(params)
    }

    /// The light data of the last aggregated frame.
    pub fn frame_data(&self) -> FrameLightData {
        self.aggregation.frame()
    }

    /// The directional light buffer.
    pub fn light_buffer(&self) -> &DirectionalLightBuffer {
        &self.buffer
    }

    /// `true` until [`cleanup`](Self::cleanup) runs.
    pub fn is_built(&self) -> bool {
        self.built
    }

    /// Destroys the directional light buffer and releases the atlas.
    pub fn cleanup(&mut self) {
        if !self.built {
            return;
        }
        self.buffer.destroy(self.device.as_ref());
        self.atlas.release();
        self.aggregation.invalidate();
        self.built = false;
        log::info!("Sky renderer cleaned up");
    }
}

impl Drop for SkyRenderer {
    fn drop(&mut self) {
        self.cleanup();
    }
}
