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

//! Minimal collaborators shared by the unit tests of the sky lanes.

use celestia_core::math::Vec4;
use celestia_core::renderer::{
    BufferDescriptor, BufferId, GraphicsDevice, ResourceError, TextureAtlas, TextureId,
    TextureInfo,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// A device that only counts the calls it receives.
#[derive(Debug, Default)]
pub struct CountingDevice {
    next_id: AtomicUsize,
    created: AtomicUsize,
    destroyed: AtomicUsize,
    writes: AtomicUsize,
    bytes: AtomicUsize,
    /// Buffer creations that succeed before every later one fails.
    create_budget: Option<usize>,
}

impl CountingDevice {
    pub fn failing_after(successful_creates: usize) -> Self {
        Self {
            create_budget: Some(successful_creates),
            ..Default::default()
        }
    }

    pub fn created(&self) -> usize {
        self.created.load(Ordering::SeqCst)
    }

    pub fn destroyed(&self) -> usize {
        self.destroyed.load(Ordering::SeqCst)
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn bytes_written(&self) -> usize {
        self.bytes.load(Ordering::SeqCst)
    }
}

impl GraphicsDevice for CountingDevice {
    fn create_buffer(&self, _descriptor: &BufferDescriptor) -> Result<BufferId, ResourceError> {
        if self
            .create_budget
            .is_some_and(|budget| self.created() >= budget)
        {
            return Err(ResourceError::BackendError("out of device memory".to_string()));
        }
        self.created.fetch_add(1, Ordering::SeqCst);
        Ok(BufferId(self.next_id.fetch_add(1, Ordering::SeqCst)))
    }

    fn destroy_buffer(&self, _id: BufferId) -> Result<(), ResourceError> {
        self.destroyed.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn write_buffer(&self, _id: BufferId, _offset: u64, data: &[u8]) -> Result<(), ResourceError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.bytes.store(data.len(), Ordering::SeqCst);
        Ok(())
    }
}

/// What a [`SlotAtlas`] has been asked to do, shared with the test.
#[derive(Debug, Default)]
pub struct SlotState {
    /// Textures placed so far, with their scale/offset.
    pub placed: HashMap<TextureId, Vec4>,
    /// Textures copied into the atlas.
    pub blits: Vec<TextureId>,
    /// Number of relayout requests.
    pub relayouts: usize,
    /// Number of frame resets.
    pub resets: usize,
    /// Whether `release` was called.
    pub released: bool,
}

/// An atlas that places every texture in a row of fixed slots.
#[derive(Debug)]
pub struct SlotAtlas {
    slots: usize,
    pub state: Arc<Mutex<SlotState>>,
}

impl SlotAtlas {
    pub fn new(slots: usize) -> Self {
        Self {
            slots,
            state: Arc::default(),
        }
    }
}

impl TextureAtlas for SlotAtlas {
    fn reserve_space(&mut self, texture: &TextureInfo) -> bool {
        let mut state = self.state.lock().unwrap();
        if state.placed.contains_key(&texture.id) {
            return true;
        }
        if state.placed.len() >= self.slots {
            return false;
        }
        let slot = state.placed.len() as f32;
        let scale = 1.0 / self.slots as f32;
        state
            .placed
            .insert(texture.id, Vec4::new(scale, 1.0, slot * scale, 0.0));
        true
    }

    fn relayout_entries(&mut self) -> bool {
        self.state.lock().unwrap().relayouts += 1;
        false
    }

    fn cached_scale_offset(&self, texture: &TextureInfo) -> Option<Vec4> {
        self.state.lock().unwrap().placed.get(&texture.id).copied()
    }

    fn needs_update(&self, texture: &TextureInfo) -> bool {
        !self.state.lock().unwrap().blits.contains(&texture.id)
    }

    fn blit_texture(&mut self, texture: &TextureInfo, _scale_offset: Vec4) {
        self.state.lock().unwrap().blits.push(texture.id);
    }

    fn reset_requested_textures(&mut self) {
        self.state.lock().unwrap().resets += 1;
    }

    fn texture(&self) -> TextureId {
        TextureId(999)
    }

    fn size(&self) -> (u32, u32) {
        (1024, 512)
    }

    fn mip_padding(&self) -> u32 {
        1
    }

    fn release(&mut self) {
        self.state.lock().unwrap().released = true;
    }
}
