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

//! Backend-agnostic rendering contracts for the sky pipeline.
//!
//! This module defines the "common language" between the sky lanes and the
//! outside world: GPU-facing records, resource identifiers, error types and the
//! collaborator traits (like [`GraphicsDevice`] and [`TextureAtlas`]). The
//! concrete implementations live in the host renderer.

pub mod buffer;
pub mod celestial;
pub mod error;
pub mod light;
pub mod shader;
pub mod texture;
pub mod traits;

pub use self::buffer::{BufferDescriptor, BufferId, BufferUsage};
pub use self::celestial::{BodyType, PackedDirectionalRecord, NO_SKY_INTERACTION};
pub use self::error::ResourceError;
pub use self::light::{
    evaluate_light_color, LightInstanceId, LightKind, LightSource, LightSourceQuery,
    LightSourceStore, SceneKind, SceneObjectId,
};
pub use self::shader::{ShaderConstantSink, ShaderValue};
pub use self::texture::{TextureId, TextureInfo};
pub use self::traits::{GraphicsDevice, TextureAtlas};
