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

//! Named shader constants and the sink that receives them.

use crate::math::{LinearRgba, Mat4, Vec4};
use crate::renderer::{BufferId, TextureId};

/// A single value bound to a named shader property.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShaderValue {
    /// A scalar float.
    Float(f32),
    /// A scalar integer (also used for boolean toggles).
    Int(i32),
    /// A four-component vector.
    Vector(Vec4),
    /// A linear color.
    Color(LinearRgba),
    /// A 4x4 matrix.
    Matrix(Mat4),
    /// A texture binding.
    Texture(TextureId),
    /// A structured buffer binding.
    Buffer(BufferId),
}

/// The external shading-constant upload interface.
///
/// The sky lanes write a fixed, enumerable set of properties into the sink
/// every frame; how the values reach the GPU (property block, uniform buffer,
/// push constants) is up to the implementor.
pub trait ShaderConstantSink {
    /// Binds `value` to the property called `name`, replacing any earlier value.
    fn set(&mut self, name: &'static str, value: ShaderValue);
}

impl ShaderConstantSink for Vec<(&'static str, ShaderValue)> {
    fn set(&mut self, name: &'static str, value: ShaderValue) {
        self.push((name, value));
    }
}
