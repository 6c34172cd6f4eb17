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

//! The per-frame batch of work the frontend hands to the renderer.

use crate::math::Mat4;
use crate::renderer::resource::GeometryId;

/// One draw call: a model transform paired with the geometry to draw.
///
/// The geometry handle is non-owning; the referenced geometry must stay alive
/// until the backend confirms the frame's work has completed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometryRenderData {
    /// The model (world) transform for this draw.
    pub model: Mat4,
    /// The geometry to draw.
    pub geometry: GeometryId,
}

impl GeometryRenderData {
    /// Creates render data for one draw call.
    #[inline]
    pub const fn new(model: Mat4, geometry: GeometryId) -> Self {
        Self { model, geometry }
    }
}

/// A per-frame batch of draw calls, partitioned by logical pass.
///
/// Built fresh by the frontend each tick, borrowed by the renderer for one
/// `begin_frame`/`end_frame` cycle, and never retained by the backend beyond
/// that cycle. Draw order within each partition is preserved.
#[derive(Debug, Clone, Default)]
pub struct RenderPacket {
    /// Seconds since the last frame. Never negative.
    pub delta_time: f32,
    /// Draws for the world pass, in submission order.
    pub world_geometries: Vec<GeometryRenderData>,
    /// Draws for the UI pass, in submission order.
    pub ui_geometries: Vec<GeometryRenderData>,
}

impl RenderPacket {
    /// Creates an empty packet for a frame `delta_time` seconds after the
    /// previous one.
    pub fn new(delta_time: f32) -> Self {
        debug_assert!(delta_time >= 0.0, "delta_time must be non-negative");
        Self {
            delta_time,
            world_geometries: Vec::new(),
            ui_geometries: Vec::new(),
        }
    }

    /// Returns `true` when the packet carries no draws in either pass.
    pub fn is_empty(&self) -> bool {
        self.world_geometries.is_empty() && self.ui_geometries.is_empty()
    }
}
