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

//! Cloud layer constants.

use super::properties as prop;
use super::renderer::SkyRenderContext;
use celestia_core::math::Mat4;
use celestia_core::renderer::{ShaderConstantSink, ShaderValue, TextureId};
use celestia_core::sky::CloudConfig;

/// Constants of one cloud draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CloudParameters {
    /// The cloud cubemap.
    pub texture: TextureId,
    /// Matrix from pixel coordinates to world-space view direction.
    pub pixel_coord_to_view_dir: Mat4,
    /// Shader pass: cubemap baking or full-screen.
    pub pass: u32,
}

impl CloudParameters {
    /// Writes the constants to `sink`.
    pub fn write_to(&self, sink: &mut dyn ShaderConstantSink) {
        sink.set(
            prop::PIXEL_COORD_TO_VIEW_DIR,
            ShaderValue::Matrix(self.pixel_coord_to_view_dir),
        );
        sink.set(prop::CLOUD_TEXTURE, ShaderValue::Texture(self.texture));
    }
}

/// Resolves the cloud layer for a render.
#[derive(Debug, Default)]
pub struct CloudParameterLane;

impl CloudParameterLane {
    /// Creates a new `CloudParameterLane`.
    pub fn new() -> Self {
        Self
    }

    /// Returns `None` when no cloud cubemap is configured.
    pub fn resolve(&self, config: &CloudConfig, ctx: &SkyRenderContext) -> Option<CloudParameters> {
        config.texture.map(|texture| CloudParameters {
            texture,
            pixel_coord_to_view_dir: ctx.pixel_coord_to_view_dir,
            pass: prop::pass_index(ctx.render_for_cubemap),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_texture_no_clouds() {
        let lane = CloudParameterLane::new();
        assert!(lane
            .resolve(&CloudConfig::default(), &SkyRenderContext::default())
            .is_none());
    }

    #[test]
    fn test_pass_follows_render_target() {
        let lane = CloudParameterLane::new();
        let config = CloudConfig {
            texture: Some(TextureId(3)),
        };
        let baking = SkyRenderContext {
            render_for_cubemap: true,
            ..Default::default()
        };

        let params = lane.resolve(&config, &baking).unwrap();
        assert_eq!(params.pass, prop::CUBEMAP_PASS);

        let params = lane.resolve(&config, &SkyRenderContext::default()).unwrap();
        assert_eq!(params.pass, prop::FULLSCREEN_PASS);

        let mut sink: Vec<(&'static str, ShaderValue)> = Vec::new();
        params.write_to(&mut sink);
        assert_eq!(sink.len(), 2);
        assert!(sink.contains(&(prop::CLOUD_TEXTURE, ShaderValue::Texture(TextureId(3)))));
    }
}
