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

//! GPU-facing celestial body records.

/// Value of [`PackedDirectionalRecord::distance_from_camera`] that tells the
/// shader to skip the record.
pub const NO_SKY_INTERACTION: f32 = -1.0;

/// How the shader lights a celestial body's disc.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum BodyType {
    /// A self-luminous body (star).
    Emissive = 0,
    /// A body lit by another source (moon).
    Reflective = 1,
}

/// Data for a single celestial directional light, formatted for GPU consumption.
///
/// Every row is 16 bytes so the layout matches a `float4`-aligned structured
/// buffer element on the shader side.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PackedDirectionalRecord {
    /// Light color pre-multiplied by intensity.
    pub color: [f32; 3],
    /// Apparent radius of the disc at `distance_from_camera`.
    pub radius: f32,

    /// Direction the light shines along.
    pub forward: [f32; 3],
    /// Distance of the body from the camera. [`NO_SKY_INTERACTION`] disables the record.
    pub distance_from_camera: f32,
    /// Right basis vector of the body.
    pub right: [f32; 3],
    /// Angular radius of the disc, in radians.
    pub angular_radius: f32,
    /// Up basis vector of the body.
    pub up: [f32; 3],
    /// A [`BodyType`] discriminant.
    pub body_type: u32,

    /// Surface color of the disc.
    pub surface_color: [f32; 3],
    /// Reflected light contribution independent of the primary illuminant.
    pub earthshine: f32,

    /// Scale (xy) and offset (zw) of the surface texture in the atlas. Zero when unused.
    pub surface_texture_scale_offset: [f32; 4],

    /// Direction of the light illuminating a reflective body.
    pub sun_direction: [f32; 3],
    /// Cosine of the angle where the flare starts.
    pub flare_cos_inner: f32,

    /// Sine and cosine of the manual phase angle. Zero for other shading sources.
    pub phase_angle_sin_cos: [f32; 2],
    /// Cosine of the angle where the flare ends.
    pub flare_cos_outer: f32,
    /// Angular size of the flare band, in radians.
    pub flare_size: f32,

    /// Color of the flare.
    pub flare_color: [f32; 3],
    /// Falloff exponent of the flare.
    pub flare_falloff: f32,
}

impl PackedDirectionalRecord {
    /// Size of one record in bytes, the structured buffer stride.
    pub const STRIDE: usize = std::mem::size_of::<Self>();

    /// A record the shader skips.
    pub fn disabled() -> Self {
        Self {
            distance_from_camera: NO_SKY_INTERACTION,
            ..<Self as bytemuck::Zeroable>::zeroed()
        }
    }

    /// Returns `true` if the shader will draw this record.
    pub fn interacts_with_sky(&self) -> bool {
        self.distance_from_camera != NO_SKY_INTERACTION
    }
}

impl Default for PackedDirectionalRecord {
    fn default() -> Self {
        Self::disabled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_is_float4_aligned() {
        assert_eq!(PackedDirectionalRecord::STRIDE % 16, 0);
        assert_eq!(PackedDirectionalRecord::STRIDE, 144);
    }

    #[test]
    fn test_disabled_record() {
        let record = PackedDirectionalRecord::disabled();
        assert!(!record.interacts_with_sky());
        assert_eq!(record.radius, 0.0);
        assert_eq!(PackedDirectionalRecord::default(), record);
    }

    #[test]
    fn test_body_type_discriminants() {
        assert_eq!(BodyType::Emissive as u32, 0);
        assert_eq!(BodyType::Reflective as u32, 1);
    }
}
