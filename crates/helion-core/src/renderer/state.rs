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

//! Per-frame global uniform state for the built-in renderpasses.

use crate::math::{LinearRgba, Mat4, Vec3};

/// Selects how the backend shades the scene, primarily for debugging.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize,
)]
#[repr(i32)]
pub enum RenderMode {
    /// Standard shading.
    #[default]
    Default = 0,
    /// Visualize lighting contribution only.
    Lighting = 1,
    /// Visualize surface normals.
    Normals = 2,
}

/// Shared per-frame uniforms for the world pass.
///
/// Uploaded once per frame between `begin_frame` and the world pass draws
/// (repeated uploads are last-writer-wins).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlobalWorldState {
    /// The projection matrix.
    pub projection: Mat4,
    /// The view matrix.
    pub view: Mat4,
    /// The camera position in world space.
    pub view_position: Vec3,
    /// The ambient world colour.
    pub ambient_colour: LinearRgba,
    /// The shading mode.
    pub mode: RenderMode,
}

impl Default for GlobalWorldState {
    fn default() -> Self {
        Self {
            projection: Mat4::IDENTITY,
            view: Mat4::IDENTITY,
            view_position: Vec3::ZERO,
            ambient_colour: LinearRgba::WHITE,
            mode: RenderMode::Default,
        }
    }
}

/// Shared per-frame uniforms for the UI pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlobalUiState {
    /// The projection matrix (typically orthographic).
    pub projection: Mat4,
    /// The view matrix.
    pub view: Mat4,
    /// The shading mode.
    pub mode: RenderMode,
}

impl Default for GlobalUiState {
    fn default() -> Self {
        Self {
            projection: Mat4::IDENTITY,
            view: Mat4::IDENTITY,
            mode: RenderMode::Default,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_world_state_is_neutral() {
        let state = GlobalWorldState::default();
        assert_eq!(state.projection, Mat4::IDENTITY);
        assert_eq!(state.view_position, Vec3::ZERO);
        assert_eq!(state.ambient_colour, LinearRgba::WHITE);
        assert_eq!(state.mode, RenderMode::Default);
    }

    #[test]
    fn render_mode_discriminants() {
        assert_eq!(RenderMode::Default as i32, 0);
        assert_eq!(RenderMode::Lighting as i32, 1);
        assert_eq!(RenderMode::Normals as i32, 2);
    }
}
