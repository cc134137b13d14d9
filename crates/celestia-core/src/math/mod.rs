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

//! Provides the mathematics primitives used by the sky pipeline.
//!
//! Linear algebra types are re-exported from `glam`. This module adds the
//! color, gradient and curve types the sky configuration is authored with,
//! plus a light-weight rigid [`Transform`].
//!
//! Angles are in radians unless a name says otherwise; convert with
//! [`DEG_TO_RAD`] and [`RAD_TO_DEG`].

// --- Fundamental Constants ---

/// A small constant for floating-point comparisons.
pub const EPSILON: f32 = 1e-5;

pub use std::f32::consts::{PI, TAU};

/// The factor to convert degrees to radians (PI / 180.0).
pub const DEG_TO_RAD: f32 = PI / 180.0;
/// The factor to convert radians to degrees (180.0 / PI).
pub const RAD_TO_DEG: f32 = 180.0 / PI;

// --- Declare Sub-Modules ---

pub mod color;
pub mod curve;
pub mod gradient;
pub mod transform;

// --- Re-export Principal Types ---

pub use self::color::LinearRgba;
pub use self::curve::{Curve, Keyframe};
pub use self::gradient::{Gradient, GradientKey, GradientMode};
pub use self::transform::Transform;
pub use glam::{EulerRot, Mat4, Quat, Vec2, Vec3, Vec4};

// --- Utility Functions ---

/// Maps the vertical component of a sun direction to the normalized
/// time-of-day key used to sample every sky gradient and curve.
///
/// Straight down maps to `0.0`, the horizon to `0.5` and straight up to `1.0`.
/// Values are clamped below at zero only.
///
/// # Examples
///
/// ```
/// use celestia_core::math::elevation_from_direction_y;
/// assert_eq!(elevation_from_direction_y(1.0), 1.0);
/// assert_eq!(elevation_from_direction_y(0.0), 0.5);
/// assert_eq!(elevation_from_direction_y(-1.0), 0.0);
/// ```
#[inline]
pub fn elevation_from_direction_y(y: f32) -> f32 {
    (y * 0.5 + 0.5).max(0.0)
}
