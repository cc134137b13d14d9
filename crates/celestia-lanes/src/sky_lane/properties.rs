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

//! Names of the shader properties written by the sky lanes.

/// Atlas size: `(width, height, 1 / width, 1 / height)`.
pub const SURFACE_ATLAS_SIZE: &str = "_SurfaceAtlasSize";
/// The surface atlas texture.
pub const SURFACE_ATLAS: &str = "_SurfaceAtlas";
/// Atlas metadata: `(width, padding / width, last valid mip, 0)`.
pub const SURFACE_ATLAS_DATA: &str = "_SurfaceAtlasData";
/// Number of records in the directional light buffer.
pub const DIRECTIONAL_COUNT: &str = "_StylizedDirectionalCount";
/// The directional light buffer.
pub const DIRECTIONAL_DATAS: &str = "_StylizedDirectionalDatas";

/// Zenith color.
pub const SKY_COLOR: &str = "_skyColor";
/// Ground color.
pub const GROUND_COLOR: &str = "_groundColor";
/// Sky exposure, in EV.
pub const SKY_INTENSITY: &str = "_skyIntensity";
/// Horizon line color.
pub const HORIZON_LINE_COLOR: &str = "_horizonLineColor";
/// Horizon line strength.
pub const HORIZON_LINE_CONTRIBUTION: &str = "_horizonLineContribution";
/// Horizon line sharpness.
pub const HORIZON_LINE_EXPONENT: &str = "_horizonLineExponent";
/// Main light color, without intensity.
pub const SUN_COLOR: &str = "_sunColor";
/// Halo strength.
pub const SUN_HALO_CONTRIBUTION: &str = "_sunHaloContribution";
/// Halo sharpness.
pub const SUN_HALO_EXPONENT: &str = "_sunHaloExponent";
/// Direction towards the main light.
pub const SUN_DIRECTION: &str = "_sunDirection";

/// Space backdrop toggle.
pub const RENDER_SPACE: &str = "_renderSpace";
/// Space cubemap.
pub const SPACE_TEXTURE: &str = "_spaceTexture";
/// Space cubemap rotation matrix.
pub const SPACE_ROTATION: &str = "_spaceRotation";
/// Space exposure, in EV.
pub const SPACE_EV: &str = "_spaceEV";

/// Whether celestial discs are drawn.
pub const RENDER_SUN_DISC: &str = "_rendersunDisc";
/// Matrix from pixel coordinates to world-space view direction.
pub const PIXEL_COORD_TO_VIEW_DIR: &str = "_PixelCoordToViewDirWS";

/// Cloud cubemap.
pub const CLOUD_TEXTURE: &str = "_CloudTexture";

/// Shader pass used when baking the sky into a cubemap.
pub const CUBEMAP_PASS: u32 = 0;
/// Shader pass used when drawing the sky to the screen.
pub const FULLSCREEN_PASS: u32 = 1;

/// Selects the shader pass for a render.
pub fn pass_index(render_for_cubemap: bool) -> u32 {
    if render_for_cubemap {
        CUBEMAP_PASS
    } else {
        FULLSCREEN_PASS
    }
}
