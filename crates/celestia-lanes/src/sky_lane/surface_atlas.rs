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

//! Placement of celestial surface textures in the shared atlas.

use celestia_core::math::Vec4;
use celestia_core::renderer::{TextureAtlas, TextureId, TextureInfo};
use std::fmt;

/// Textures smaller than this in either dimension are never placed.
pub const MIN_SURFACE_TEXTURE_SIZE: u32 = 2;

/// Per-frame front end of the external [`TextureAtlas`].
///
/// Within a frame, every texture is reserved before it is fetched. A failed
/// reservation requests one relayout; if that fails too, the atlas is
/// considered full until the next frame and missing textures resolve to the
/// zero placement instead of an error.
pub struct SurfaceTextureCache {
    atlas: Option<Box<dyn TextureAtlas>>,
    last_valid_mip: u32,
    needs_layout: bool,
    no_more_space: bool,
}

impl fmt::Debug for SurfaceTextureCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SurfaceTextureCache")
            .field("released", &self.atlas.is_none())
            .field("last_valid_mip", &self.last_valid_mip)
            .field("needs_layout", &self.needs_layout)
            .field("no_more_space", &self.no_more_space)
            .finish()
    }
}

fn is_too_small(texture: &TextureInfo) -> bool {
    texture.width < MIN_SURFACE_TEXTURE_SIZE || texture.height < MIN_SURFACE_TEXTURE_SIZE
}

impl SurfaceTextureCache {
    /// Wraps an atlas whose mips up to `last_valid_mip` hold valid data.
    pub fn new(atlas: Box<dyn TextureAtlas>, last_valid_mip: u32) -> Self {
        Self {
            atlas: Some(atlas),
            last_valid_mip,
            needs_layout: false,
            no_more_space: false,
        }
    }

    /// Starts a new frame: forgets last frame's requests and overflow state.
    pub fn new_frame(&mut self) {
        if let Some(atlas) = self.atlas.as_mut() {
            atlas.reset_requested_textures();
        }
        self.needs_layout = false;
        self.no_more_space = false;
    }

    /// Requests a place for `texture` in the atlas.
    pub fn reserve_space(&mut self, texture: &TextureInfo) {
        if is_too_small(texture) {
            return;
        }
        if let Some(atlas) = self.atlas.as_mut() {
            if !atlas.reserve_space(texture) {
                self.needs_layout = true;
            }
        }
    }

    /// Repacks the atlas if a reservation failed since the last layout.
    pub fn layout_if_needed(&mut self) {
        if !self.needs_layout {
            return;
        }
        self.needs_layout = false;
        if let Some(atlas) = self.atlas.as_mut() {
            if !atlas.relayout_entries() {
                log::error!(
                    "No more space in the surface texture atlas, increase the atlas size in the sky settings"
                );
                self.no_more_space = true;
            }
        }
    }

    /// Returns the scale (xy) and offset (zw) of `texture` in the atlas,
    /// copying it in first when the atlas copy is stale.
    ///
    /// Returns the zero vector when the texture has no place in the atlas.
    pub fn fetch(&mut self, texture: &TextureInfo) -> Vec4 {
        if is_too_small(texture) {
            return Vec4::ZERO;
        }
        let Some(atlas) = self.atlas.as_mut() else {
            return Vec4::ZERO;
        };

        let Some(scale_offset) = atlas.cached_scale_offset(texture) else {
            if !self.no_more_space {
                log::warn!(
                    "Surface texture {:?} is not in the atlas, it will be drawn without texture",
                    texture.id
                );
            }
            return Vec4::ZERO;
        };

        if atlas.needs_update(texture) {
            atlas.blit_texture(texture, scale_offset);
        }
        scale_offset
    }

    /// `(width, height, 1 / width, 1 / height)` of the atlas.
    pub fn atlas_size(&self) -> Vec4 {
        let Some((width, height)) = self.atlas.as_ref().map(|a| a.size()) else {
            return Vec4::ZERO;
        };
        if width == 0 || height == 0 {
            return Vec4::ZERO;
        }
        let (w, h) = (width as f32, height as f32);
        Vec4::new(w, h, 1.0 / w, 1.0 / h)
    }

    /// `(width, padding / width, last valid mip, 0)` of the atlas, where the
    /// padding spans `2^mip_padding * 2` texels.
    pub fn atlas_data(&self) -> Vec4 {
        let Some(atlas) = self.atlas.as_ref() else {
            return Vec4::ZERO;
        };
        let width = atlas.size().0 as f32;
        if width == 0.0 {
            return Vec4::ZERO;
        }
        let padding = 2.0f32.powi(atlas.mip_padding() as i32) * 2.0;
        Vec4::new(width, padding / width, self.last_valid_mip as f32, 0.0)
    }

    /// The atlas texture, until the cache is released.
    pub fn texture(&self) -> Option<TextureId> {
        self.atlas.as_ref().map(|a| a.texture())
    }

    /// Returns `true` when the last relayout of this frame failed.
    pub fn is_full(&self) -> bool {
        self.no_more_space
    }

    /// Releases the atlas. Later calls are no-ops.
    pub fn release(&mut self) {
        if let Some(mut atlas) = self.atlas.take() {
            atlas.release();
        }
    }

    /// Returns `true` once [`release`](Self::release) has been called.
    pub fn is_released(&self) -> bool {
        self.atlas.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sky_lane::test_support::SlotAtlas;

    fn tex(id: usize, size: u32) -> TextureInfo {
        TextureInfo::new(TextureId(id), size, size)
    }

    #[test]
    fn test_reserve_then_fetch_places_and_blits() {
        let atlas = SlotAtlas::new(2);
        let state = atlas.state.clone();
        let mut cache = SurfaceTextureCache::new(Box::new(atlas), 0);

        cache.new_frame();
        cache.reserve_space(&tex(1, 64));
        cache.layout_if_needed();
        let placement = cache.fetch(&tex(1, 64));

        assert_eq!(placement, Vec4::new(0.5, 1.0, 0.0, 0.0));
        assert_eq!(state.lock().unwrap().blits, vec![TextureId(1)]);

        // Up to date textures are not copied again.
        cache.fetch(&tex(1, 64));
        assert_eq!(state.lock().unwrap().blits.len(), 1);
    }

    #[test]
    fn test_tiny_textures_are_ignored() {
        let atlas = SlotAtlas::new(2);
        let state = atlas.state.clone();
        let mut cache = SurfaceTextureCache::new(Box::new(atlas), 0);

        let tiny = TextureInfo::new(TextureId(5), 1, 64);
        cache.reserve_space(&tiny);
        assert_eq!(cache.fetch(&tiny), Vec4::ZERO);
        assert!(state.lock().unwrap().placed.is_empty());
    }

    #[test]
    fn test_overflow_degrades_to_zero_placement() {
        let atlas = SlotAtlas::new(1);
        let state = atlas.state.clone();
        let mut cache = SurfaceTextureCache::new(Box::new(atlas), 0);

        cache.new_frame();
        cache.reserve_space(&tex(1, 32));
        cache.reserve_space(&tex(2, 32));
        cache.layout_if_needed();

        assert!(cache.is_full());
        assert_eq!(state.lock().unwrap().relayouts, 1);
        assert_eq!(cache.fetch(&tex(2, 32)), Vec4::ZERO);
        assert_ne!(cache.fetch(&tex(1, 32)), Vec4::ZERO);

        // Relayout happens at most once per request.
        cache.layout_if_needed();
        assert_eq!(state.lock().unwrap().relayouts, 1);

        cache.new_frame();
        assert!(!cache.is_full());
        assert_eq!(state.lock().unwrap().resets, 2);
    }

    #[test]
    fn test_atlas_size_and_data() {
        let mut cache = SurfaceTextureCache::new(Box::new(SlotAtlas::new(1)), 3);

        assert_eq!(
            cache.atlas_size(),
            Vec4::new(1024.0, 512.0, 1.0 / 1024.0, 1.0 / 512.0)
        );
        // mip padding 1: 2^1 * 2 = 4 texels.
        assert_eq!(cache.atlas_data(), Vec4::new(1024.0, 4.0 / 1024.0, 3.0, 0.0));
        assert_eq!(cache.texture(), Some(TextureId(999)));

        cache.release();
        assert!(cache.is_released());
        assert_eq!(cache.texture(), None);
        assert_eq!(cache.atlas_size(), Vec4::ZERO);
    }

    #[test]
    fn test_release_reaches_the_atlas_once() {
        let atlas = SlotAtlas::new(1);
        let state = atlas.state.clone();
        let mut cache = SurfaceTextureCache::new(Box::new(atlas), 0);

        cache.release();
        cache.release();
        assert!(state.lock().unwrap().released);
        assert_eq!(cache.fetch(&tex(1, 32)), Vec4::ZERO);
    }
}
