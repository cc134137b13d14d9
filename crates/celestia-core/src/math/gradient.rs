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

//! Color gradients sampled over a normalized `[0, 1]` key.

use crate::math::LinearRgba;

/// How a [`Gradient`] fills the space between two keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GradientMode {
    /// Linear interpolation between neighbouring keys.
    #[default]
    Blend,
    /// The color of the next key is held until that key is reached.
    Fixed,
}

/// A single color stop of a [`Gradient`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientKey {
    /// Position of the key in `[0, 1]`.
    pub time: f32,
    /// Color at this key, in linear space.
    pub color: LinearRgba,
}

/// An ordered list of color keys over `[0, 1]`.
///
/// Sky, ground and horizon colors are authored as gradients keyed by the
/// elevation of the main light.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Gradient {
    keys: Vec<GradientKey>,
    mode: GradientMode,
}

impl Gradient {
    /// Creates a gradient from keys. Keys are sorted by time.
    pub fn new(keys: impl IntoIterator<Item = GradientKey>, mode: GradientMode) -> Self {
        let mut keys: Vec<GradientKey> = keys.into_iter().collect();
        keys.sort_by(|a, b| a.time.total_cmp(&b.time));
        Self { keys, mode }
    }

    /// Creates a blending gradient from `(time, color)` pairs.
    pub fn from_pairs(pairs: &[(f32, LinearRgba)]) -> Self {
        Self::new(
            pairs.iter().map(|&(time, color)| GradientKey { time, color }),
            GradientMode::Blend,
        )
    }

    /// Returns the keys, sorted by time.
    pub fn keys(&self) -> &[GradientKey] {
        &self.keys
    }

    /// Returns the blend mode.
    pub fn mode(&self) -> GradientMode {
        self.mode
    }

    /// Samples the gradient at `t`.
    ///
    /// Values before the first key return the first color, values after the last
    /// key return the last color. An empty gradient evaluates to white.
    pub fn evaluate(&self, t: f32) -> LinearRgba {
        let (first, last) = match (self.keys.first(), self.keys.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return LinearRgba::WHITE,
        };
        if t <= first.time {
            return first.color;
        }
        if t >= last.time {
            return last.color;
        }

        // `t` lies strictly inside the key range, so a window always matches.
        for pair in self.keys.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if t <= b.time {
                return match self.mode {
                    GradientMode::Fixed => b.color,
                    GradientMode::Blend => {
                        let span = b.time - a.time;
                        if span <= f32::EPSILON {
                            b.color
                        } else {
                            a.color.lerp(b.color, (t - a.time) / span)
                        }
                    }
                };
            }
        }
        last.color
    }
}
