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

//! Scalar keyframe curves with cubic Hermite interpolation.

/// A single key of a [`Curve`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Keyframe {
    /// Position of the key on the curve's time axis.
    pub time: f32,
    /// Value of the curve at `time`.
    pub value: f32,
    /// Slope arriving at this key.
    pub in_tangent: f32,
    /// Slope leaving this key.
    pub out_tangent: f32,
}

impl Keyframe {
    /// Creates a key with flat tangents.
    pub const fn new(time: f32, value: f32) -> Self {
        Self {
            time,
            value,
            in_tangent: 0.0,
            out_tangent: 0.0,
        }
    }
}

/// A scalar function of one variable, authored as keyframes.
///
/// Between two keys the curve is a cubic Hermite spline using the leaving
/// tangent of the left key and the arriving tangent of the right key. Outside
/// the key range the curve is clamped to the first or last value.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Curve {
    keys: Vec<Keyframe>,
}

impl Curve {
    /// Creates a curve from keys. Keys are sorted by time.
    pub fn new(keys: impl IntoIterator<Item = Keyframe>) -> Self {
        let mut keys: Vec<Keyframe> = keys.into_iter().collect();
        keys.sort_by(|a, b| a.time.total_cmp(&b.time));
        Self { keys }
    }

    /// Creates a curve that evaluates to `value` everywhere.
    pub fn constant(value: f32) -> Self {
        Self::new([Keyframe::new(0.0, value)])
    }

    /// Creates a curve through `(time, value)` points whose tangents are the
    /// slopes of the neighbouring segments, so it evaluates as a polyline.
    pub fn linear(points: &[(f32, f32)]) -> Self {
        let mut sorted = points.to_vec();
        sorted.sort_by(|a, b| a.0.total_cmp(&b.0));

        let slope = |a: (f32, f32), b: (f32, f32)| {
            let dt = b.0 - a.0;
            if dt.abs() <= f32::EPSILON {
                0.0
            } else {
                (b.1 - a.1) / dt
            }
        };

        let keys = (0..sorted.len()).map(|i| {
            let (time, value) = sorted[i];
            let in_tangent = if i > 0 { slope(sorted[i - 1], sorted[i]) } else { 0.0 };
            let out_tangent = if i + 1 < sorted.len() {
                slope(sorted[i], sorted[i + 1])
            } else {
                0.0
            };
            Keyframe {
                time,
                value,
                in_tangent,
                out_tangent,
            }
        });
        Self::new(keys.collect::<Vec<_>>())
    }

    /// Returns the keys, sorted by time.
    pub fn keys(&self) -> &[Keyframe] {
        &self.keys
    }

    /// Samples the curve at `t`. An empty curve evaluates to `0.0`.
    pub fn evaluate(&self, t: f32) -> f32 {
        let (first, last) = match (self.keys.first(), self.keys.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return 0.0,
        };
        if t <= first.time {
            return first.value;
        }
        if t >= last.time {
            return last.value;
        }

        for pair in self.keys.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if t <= b.time {
                let dt = b.time - a.time;
                if dt <= f32::EPSILON {
                    return b.value;
                }
                let s = (t - a.time) / dt;
                let s2 = s * s;
                let s3 = s2 * s;

                let h00 = 2.0 * s3 - 3.0 * s2 + 1.0;
                let h10 = s3 - 2.0 * s2 + s;
                let h01 = -2.0 * s3 + 3.0 * s2;
                let h11 = s3 - s2;

                return h00 * a.value
                    + h10 * dt * a.out_tangent
                    + h01 * b.value
                    + h11 * dt * b.in_tangent;
            }
        }
        last.value
    }
}
