// Copyright 2025 the Helion contributors
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

//! Opaque resource handles and the descriptors used to create them.
//!
//! Handles are arena indices minted by the backend: the frontend can store,
//! copy, and pass them back, but cannot see any backend-internal state
//! through them. A handle becomes invalid the moment its `destroy_*` call
//! returns and stays invalid until a subsequent successful `create_*`.

use crate::math::LinearRgba;

/// An opaque handle to a backend texture.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct TextureId(
    /// The raw index minted by the backend.
    pub u32,
);

/// An opaque handle to a backend material.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct MaterialId(
    /// The raw index minted by the backend.
    pub u32,
);

/// An opaque handle to backend geometry (vertex/index buffers).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct GeometryId(
    /// The raw index minted by the backend.
    pub u32,
);

/// Describes a texture to be created by the backend.
#[derive(Debug, Clone)]
pub struct TextureDescriptor<'a> {
    /// A descriptive name, used for logging and debugging only.
    pub name: &'a str,
    /// The texture width in texels.
    pub width: u32,
    /// The texture height in texels.
    pub height: u32,
    /// The number of channels per texel (e.g. 4 for RGBA).
    pub channel_count: u8,
    /// Whether any texel has non-opaque alpha.
    pub has_transparency: bool,
    /// The raw image data, `width * height * channel_count` bytes.
    pub pixels: &'a [u8],
}

/// Describes a material to be created by the backend.
#[derive(Debug, Clone)]
pub struct MaterialDescriptor<'a> {
    /// A descriptive name, used for logging and debugging only.
    pub name: &'a str,
    /// The diffuse colour multiplied with the diffuse texture.
    pub diffuse_colour: LinearRgba,
    /// The diffuse texture, or `None` for the backend's default texture.
    pub diffuse_texture: Option<TextureId>,
}

/// Describes geometry to be uploaded by the backend.
///
/// Sizes are bytes per element; total upload sizes are `size * count` per
/// buffer. Both counts may be zero: zero vertices is degenerate-but-valid
/// geometry, and zero indices means the geometry is drawn non-indexed.
#[derive(Debug, Clone)]
pub struct GeometryDescriptor<'a> {
    /// A descriptive name, used for logging and debugging only.
    pub name: &'a str,
    /// The size of a single vertex in bytes.
    pub vertex_size: u32,
    /// The total number of vertices.
    pub vertex_count: u32,
    /// The vertex data, `vertex_size * vertex_count` bytes.
    pub vertices: &'a [u8],
    /// The size of a single index in bytes.
    pub index_size: u32,
    /// The total number of indices.
    pub index_count: u32,
    /// The index data, `index_size * index_count` bytes.
    pub indices: &'a [u8],
}

impl GeometryDescriptor<'_> {
    /// Returns `true` when the geometry carries no vertex data at all.
    pub fn is_empty(&self) -> bool {
        self.vertex_count == 0 && self.index_count == 0
    }

    /// Returns `true` when the geometry should be drawn without an index
    /// buffer.
    pub fn is_non_indexed(&self) -> bool {
        self.index_count == 0
    }
}
