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

//! The GPU structured buffer holding packed directional light records.

use celestia_core::renderer::{
    BufferDescriptor, BufferId, GraphicsDevice, PackedDirectionalRecord, ResourceError,
};

const BUFFER_LABEL: &str = "Stylized Directional Lights";

/// CPU staging array and GPU buffer of [`PackedDirectionalRecord`]s.
///
/// The staging array always holds exactly `capacity` records; slots that are
/// not written during a frame stay disabled so the shader skips them.
#[derive(Debug, Default)]
pub struct DirectionalLightBuffer {
    buffer: Option<BufferId>,
    records: Vec<PackedDirectionalRecord>,
}

impl DirectionalLightBuffer {
    /// Creates an empty buffer. Nothing is allocated on the GPU yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// (Re)creates the GPU buffer with room for `capacity` records.
    ///
    /// The previous buffer and its records are only released once the new
    /// buffer exists; on failure they are left untouched.
    pub fn create(
        &mut self,
        device: &dyn GraphicsDevice,
        capacity: usize,
    ) -> Result<(), ResourceError> {
        let descriptor =
            BufferDescriptor::structured(BUFFER_LABEL, capacity, PackedDirectionalRecord::STRIDE);
        let id = device.create_buffer(&descriptor)?;

        self.destroy(device);
        self.buffer = Some(id);
        self.records = vec![PackedDirectionalRecord::disabled(); capacity];

        log::debug!(
            "Created directional light buffer for {} lights ({} bytes)",
            capacity,
            descriptor.size
        );
        Ok(())
    }

    /// Grows the buffer when it cannot hold `required` records.
    ///
    /// Returns `true` if the buffer was recreated.
    pub fn ensure_capacity(
        &mut self,
        device: &dyn GraphicsDevice,
        required: usize,
    ) -> Result<bool, ResourceError> {
        if self.buffer.is_some() && required <= self.capacity() {
            return Ok(false);
        }
        self.create(device, required.max(self.capacity()))?;
        Ok(true)
    }

    /// The staging records, one per slot.
    pub fn records(&self) -> &[PackedDirectionalRecord] {
        &self.records
    }

    /// Mutable access to the staging records.
    pub fn records_mut(&mut self) -> &mut [PackedDirectionalRecord] {
        &mut self.records
    }

    /// Copies the whole staging array to the GPU.
    pub fn upload(&self, device: &dyn GraphicsDevice) -> Result<(), ResourceError> {
        let id = self.buffer.ok_or(ResourceError::InvalidHandle)?;
        device.write_buffer(id, 0, bytemuck::cast_slice(&self.records))
    }

    /// Releases the GPU buffer. Safe to call when nothing is allocated.
    pub fn destroy(&mut self, device: &dyn GraphicsDevice) {
        if let Some(id) = self.buffer.take() {
            if let Err(e) = device.destroy_buffer(id) {
                log::warn!("Failed to destroy directional light buffer: {}", e);
            }
        }
        self.records.clear();
    }

    /// The GPU buffer, if allocated.
    pub fn id(&self) -> Option<BufferId> {
        self.buffer
    }

    /// Number of records the buffer holds.
    pub fn capacity(&self) -> usize {
        self.records.len()
    }
}
