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

//! Defines the `LinearRgba` color type and associated operations.

use crate::math::Vec4;
use std::ops::{Add, Mul};

/// Lowest color temperature accepted by [`LinearRgba::from_color_temperature`], in Kelvin.
pub const MIN_COLOR_TEMPERATURE: f32 = 1000.0;
/// Highest color temperature accepted by [`LinearRgba::from_color_temperature`], in Kelvin.
pub const MAX_COLOR_TEMPERATURE: f32 = 20000.0;

/// Represents a color in a **linear RGBA** color space using `f32` components.
///
/// All light and sky colors travel through the pipeline in linear space. The
/// `f32` components allow HDR values above `1.0`, which is how light colors
/// pre-multiplied by intensity are carried around.
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(C)]
pub struct LinearRgba {
    /// The red component in linear space.
    pub r: f32,
    /// The green component in linear space.
    pub g: f32,
    /// The blue component in linear space.
    pub b: f32,
    /// The alpha (opacity) component.
    pub a: f32,
}

impl LinearRgba {
    /// Opaque white (`[1.0, 1.0, 1.0, 1.0]`).
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    /// Opaque black (`[0.0, 0.0, 0.0, 1.0]`).
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);

    /// Creates a new `LinearRgba` with explicit RGBA values.
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a new opaque `LinearRgba` (alpha = 1.0).
    #[inline]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }
}

#[inline]
fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

// --- Conversions ---
impl LinearRgba {
    /// Creates a `LinearRgba` by converting from normalized sRGB components.
    #[inline]
    pub fn from_srgb(r: f32, g: f32, b: f32) -> Self {
        Self::rgb(srgb_to_linear(r), srgb_to_linear(g), srgb_to_linear(b))
    }

    /// Returns the RGBA channels as a [`Vec4`].
    #[inline]
    pub fn to_vec4(&self) -> Vec4 {
        Vec4::new(self.r, self.g, self.b, self.a)
    }

    /// Returns the RGB channels as an array, the layout GPU records use.
    #[inline]
    pub fn to_rgb_array(&self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    /// Converts a correlated color temperature to a linear RGB tint.
    ///
    /// The temperature is placed on the Planckian locus in CIE 1960 UCS using
    /// Krystek's rational approximation, converted to XYZ with `Y = 1`, then to
    /// linear sRGB primaries. The result is normalized so that its largest
    /// channel is `1.0`, which makes it usable as a multiplicative tint.
    ///
    /// The temperature is clamped to
    /// [`MIN_COLOR_TEMPERATURE`]..=[`MAX_COLOR_TEMPERATURE`].
    pub fn from_color_temperature(kelvin: f32) -> Self {
        let t = kelvin.clamp(MIN_COLOR_TEMPERATURE, MAX_COLOR_TEMPERATURE);
        let t2 = t * t;

        let u = (0.860_117_76 + 1.541_182_5e-4 * t + 1.286_412_1e-7 * t2)
            / (1.0 + 8.424_202e-4 * t + 7.081_451_6e-7 * t2);
        let v = (0.317_398_73 + 4.228_062_5e-5 * t + 4.204_817e-8 * t2)
            / (1.0 - 2.897_418_2e-5 * t + 1.614_560_5e-7 * t2);

        let denom = 2.0 * u - 8.0 * v + 4.0;
        let x = 3.0 * u / denom;
        let y = 2.0 * v / denom;

        let big_x = x / y;
        let big_z = (1.0 - x - y) / y;

        let r = 3.240_454_2 * big_x - 1.537_138_5 - 0.498_531_4 * big_z;
        let g = -0.969_266 * big_x + 1.876_010_8 + 0.041_556 * big_z;
        let b = 0.055_643_4 * big_x - 0.204_025_9 + 1.057_225_2 * big_z;

        let r = r.max(0.0);
        let g = g.max(0.0);
        let b = b.max(0.0);
        let max = r.max(g).max(b);
        if max <= 0.0 {
            return Self::WHITE;
        }
        Self::rgb(r / max, g / max, b / max)
    }
}

// --- Manipulations ---
impl LinearRgba {
    /// Returns a new color with the same RGB components but a different alpha.
    #[inline]
    pub fn with_alpha(&self, a: f32) -> Self {
        Self { a, ..*self }
    }

    /// Linearly interpolates between two colors, alpha included.
    #[inline]
    pub fn lerp(&self, other: Self, t: f32) -> Self {
        Self::new(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
            self.a + (other.a - self.a) * t,
        )
    }

    /// Multiplies the RGB channels by `factor`, leaving alpha untouched.
    #[inline]
    pub fn scale_rgb(&self, factor: f32) -> Self {
        Self::new(self.r * factor, self.g * factor, self.b * factor, self.a)
    }
}

impl Default for LinearRgba {
    fn default() -> Self {
        Self::WHITE
    }
}

impl Mul<f32> for LinearRgba {
    type Output = Self;

    /// Scales every channel, alpha included.
    #[inline]
    fn mul(self, rhs: f32) -> Self {
        Self::new(self.r * rhs, self.g * rhs, self.b * rhs, self.a * rhs)
    }
}

impl Mul<LinearRgba> for LinearRgba {
    type Output = Self;

    /// Component-wise product.
    #[inline]
    fn mul(self, rhs: LinearRgba) -> Self {
        Self::new(self.r * rhs.r, self.g * rhs.g, self.b * rhs.b, self.a * rhs.a)
    }
}

impl Add for LinearRgba {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.r + rhs.r, self.g + rhs.g, self.b + rhs.b, self.a + rhs.a)
    }
}

impl From<LinearRgba> for Vec4 {
    fn from(c: LinearRgba) -> Self {
        c.to_vec4()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_from_srgb() {
        let c = LinearRgba::from_srgb(0.5, 0.02, 1.0);
        assert_relative_eq!(c.r, 0.214_041, epsilon = 1e-4);
        assert_relative_eq!(c.g, 0.02 / 12.92, epsilon = 1e-6);
        assert_relative_eq!(c.b, 1.0, epsilon = 1e-6);
        assert_eq!(c.a, 1.0);
    }

    #[test]
    fn test_lerp_endpoints() {
        let a = LinearRgba::BLACK;
        let b = LinearRgba::WHITE;
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_relative_eq!(a.lerp(b, 0.5).g, 0.5);
    }

    #[test]
    fn test_component_product() {
        let c = LinearRgba::rgb(2.0, 3.0, 4.0) * LinearRgba::rgb(0.5, 0.5, 0.25);
        assert_eq!(c, LinearRgba::rgb(1.0, 1.5, 1.0));
    }

    #[test]
    fn test_color_temperature_is_normalized() {
        for kelvin in [1500.0, 3000.0, 6500.0, 10000.0] {
            let c = LinearRgba::from_color_temperature(kelvin);
            let max = c.r.max(c.g).max(c.b);
            assert_relative_eq!(max, 1.0, epsilon = 1e-5);
            assert!(c.r >= 0.0 && c.g >= 0.0 && c.b >= 0.0);
        }
    }

    #[test]
    fn test_color_temperature_warm_and_cool() {
        let warm = LinearRgba::from_color_temperature(2000.0);
        assert!(warm.r > warm.b, "low temperatures are red-dominant");

        let cool = LinearRgba::from_color_temperature(15000.0);
        assert!(cool.b > cool.r, "high temperatures are blue-dominant");

        let daylight = LinearRgba::from_color_temperature(6500.0);
        assert!(daylight.r > 0.85 && daylight.g > 0.85 && daylight.b > 0.85);
    }

    #[test]
    fn test_color_temperature_clamps_input() {
        assert_eq!(
            LinearRgba::from_color_temperature(10.0),
            LinearRgba::from_color_temperature(MIN_COLOR_TEMPERATURE)
        );
        assert_eq!(
            LinearRgba::from_color_temperature(1.0e6),
            LinearRgba::from_color_temperature(MAX_COLOR_TEMPERATURE)
        );
    }
}
