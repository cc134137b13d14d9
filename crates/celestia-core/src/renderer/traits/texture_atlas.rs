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

use crate::math::Vec4;
use crate::renderer::texture::{TextureId, TextureInfo};

/// A 2D texture atlas owned by the host renderer.
///
/// The sky pipeline does not pack atlases itself. Within one frame it reserves
/// space for every surface texture it needs, asks for a relayout when a
/// reservation failed, then fetches the normalized placement of each texture.
pub trait TextureAtlas: Send {
    /// Tries to reserve space for `texture`. Returns `false` when the atlas is full.
    fn reserve_space(&mut self, texture: &TextureInfo) -> bool;

    /// Sorts and re-inserts every requested entry. Returns `false` if they still do not fit.
    fn relayout_entries(&mut self) -> bool;

    /// Returns the scale (xy) and offset (zw) of `texture` if it has a place in the atlas.
    fn cached_scale_offset(&self, texture: &TextureInfo) -> Option<Vec4>;

    /// Returns `true` when the atlas copy of `texture` is missing or stale.
    fn needs_update(&self, texture: &TextureInfo) -> bool;

    /// Copies `texture` into the atlas region described by `scale_offset`.
    fn blit_texture(&mut self, texture: &TextureInfo, scale_offset: Vec4);

    /// Forgets the textures requested during the previous frame.
    fn reset_requested_textures(&mut self);

    /// The atlas texture itself, for binding.
    fn texture(&self) -> TextureId;

    /// Width and height of the atlas in texels.
    fn size(&self) -> (u32, u32);

    /// Number of mip levels of padding around each entry.
    fn mip_padding(&self) -> u32;

    /// Releases the atlas' GPU resources.
    fn release(&mut self);
}
