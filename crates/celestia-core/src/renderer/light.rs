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

//! Defines the light-source collaborator types.
//!
//! The sky pipeline never owns the lights it draws. It refers to them by
//! [`LightInstanceId`] and reads their current state through a
//! [`LightSourceQuery`] supplied by the host each frame.

use crate::math::{LinearRgba, Transform};
use std::collections::HashMap;

/// A stable identity of a source light, assigned by the host scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LightInstanceId(pub u64);

/// A non-owning reference to the scene object associated with a light.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SceneObjectId(pub u64);

/// The kind of a source light.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LightKind {
    /// An infinitely distant light (sun-like). Only these take part in the sky.
    #[default]
    Directional,
    /// An omni-directional local light.
    Point,
    /// A cone-shaped local light.
    Spot,
}

/// The scene context a light lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SceneKind {
    /// A regular, rendered scene.
    #[default]
    Active,
    /// An editor preview scene. Lights in it never drive the sky.
    Preview,
}

/// A read-only snapshot of a source light, as the host renderer sees it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightSource {
    /// The kind of the light.
    pub kind: LightKind,
    /// Whether the light is currently enabled.
    pub enabled: bool,
    /// Intensity multiplier applied to `color`.
    pub intensity: f32,
    /// Filter color in linear space.
    pub color: LinearRgba,
    /// Correlated color temperature in Kelvin, when the light uses one.
    pub color_temperature: Option<f32>,
    /// Authored angular diameter of the light's disc, in degrees.
    pub angular_diameter: f32,
    /// World-space transform. Directional lights shine along `forward`.
    pub transform: Transform,
}

impl Default for LightSource {
    fn default() -> Self {
        Self {
            kind: LightKind::Directional,
            enabled: true,
            intensity: 1.0,
            color: LinearRgba::WHITE,
            color_temperature: None,
            angular_diameter: 0.5,
            transform: Transform::default(),
        }
    }
}

/// Read access to the host's source lights.
pub trait LightSourceQuery {
    /// Returns the current state of the light with the given identity, if it still exists.
    fn light_source(&self, id: LightInstanceId) -> Option<&LightSource>;
}

/// Write access to the host's source lights, for lanes that drive them.
pub trait LightSourceStore: LightSourceQuery {
    /// Returns the light with the given identity for modification.
    fn light_source_mut(&mut self, id: LightInstanceId) -> Option<&mut LightSource>;
}

impl LightSourceQuery for HashMap<LightInstanceId, LightSource> {
    fn light_source(&self, id: LightInstanceId) -> Option<&LightSource> {
        self.get(&id)
    }
}

impl LightSourceStore for HashMap<LightInstanceId, LightSource> {
    fn light_source_mut(&mut self, id: LightInstanceId) -> Option<&mut LightSource> {
        self.get_mut(&id)
    }
}

/// Evaluates the radiometric color of a light.
///
/// Returns `color * intensity` (or just `color` when `use_intensity` is false),
/// tinted by the black-body color of the light's temperature when it has one.
pub fn evaluate_light_color(light: &LightSource, use_intensity: bool) -> LinearRgba {
    let mut color = if use_intensity {
        light.color.scale_rgb(light.intensity)
    } else {
        light.color
    };
    if let Some(kelvin) = light.color_temperature {
        color = color * LinearRgba::from_color_temperature(kelvin);
    }
    color
}
