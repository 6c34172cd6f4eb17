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

//! The polymorphic contract every concrete renderer backend implements.

use crate::renderer::error::{RenderError, ResourceError};
use crate::renderer::packet::GeometryRenderData;
use crate::renderer::pass::RenderpassId;
use crate::renderer::resource::{
    GeometryDescriptor, GeometryId, MaterialDescriptor, MaterialId, TextureDescriptor, TextureId,
};
use crate::renderer::state::{GlobalUiState, GlobalWorldState};
use std::fmt::Debug;

/// The result of a `begin_frame` attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    /// The backend is ready to accept draw work for this frame.
    Ready,
    /// The backend is transiently unable to render this tick (e.g. a swapchain
    /// resize is in flight). Not an error: skip the rest of the frame, do not
    /// call `end_frame`, and retry next tick.
    NotReady,
}

/// The contract between the render frontend and a concrete graphics backend
/// (Vulkan, OpenGL, DirectX, ...).
///
/// The frontend holds exactly one active backend at a time behind this trait
/// and drives it from a single logical render thread; no internal locking is
/// required of implementations. Every call blocks until its backend-side work
/// (or rejection) is determined — any frames-in-flight pipelining is
/// backend-private and invisible here.
///
/// Implementations must report success and failure truthfully for every
/// fallible operation and must advance [`frame_number`](Self::frame_number)
/// by exactly one per successful [`end_frame`](Self::end_frame), and never
/// otherwise.
pub trait RendererBackend: Debug + Send {
    /// Acquires all backend-global resources.
    ///
    /// Called exactly once, before any other operation. Failure is fatal to
    /// the render subsystem; no partial-use fallback is defined.
    /// ## Arguments
    /// * `application_name` - The name of the application, for surface/debug
    ///   labels.
    fn initialize(&mut self, application_name: &str) -> Result<(), RenderError>;

    /// Releases all backend-global resources.
    ///
    /// Called exactly once after a successful `initialize`, and only after
    /// every outstanding `destroy_*` call has completed. Not guaranteed to be
    /// idempotent.
    fn shutdown(&mut self);

    /// Notifies the backend of a viewport/swapchain size change.
    ///
    /// Never called between `begin_frame` and `end_frame`; the frontend
    /// guards that window.
    fn resized(&mut self, width: u32, height: u32);

    /// Prepares the backend to accept draw work for one frame.
    ///
    /// ## Returns
    /// `Ok(FrameStatus::NotReady)` signals a recoverable skip, not an error.
    /// `Err` is reserved for fatal conditions such as device loss.
    fn begin_frame(&mut self, delta_time: f32) -> Result<FrameStatus, RenderError>;

    /// Uploads the shared per-frame uniforms for the world pass.
    fn update_global_world_state(&mut self, state: &GlobalWorldState);

    /// Uploads the shared per-frame uniforms for the UI pass.
    fn update_global_ui_state(&mut self, state: &GlobalUiState);

    /// Brings up the targets for the given renderpass.
    ///
    /// A successful begin must be matched by exactly one
    /// [`end_renderpass`](Self::end_renderpass) with the same id before the
    /// frame ends; passes never nest or overlap.
    /// ## Errors
    /// * [`RenderError::PassNotReady`] - transient; the frontend aborts the
    ///   frame cleanly and retries next tick.
    fn begin_renderpass(&mut self, pass: RenderpassId) -> Result<(), RenderError>;

    /// Tears down the targets for the given renderpass.
    fn end_renderpass(&mut self, pass: RenderpassId) -> Result<(), RenderError>;

    /// Issues one draw call using the currently open renderpass and the
    /// global state last uploaded for it.
    ///
    /// Only called inside an open renderpass inside an active frame. Failures
    /// surface later through end-of-frame or device-loss signals, not here.
    fn draw_geometry(&mut self, data: &GeometryRenderData);

    /// Finalizes and presents the frame.
    ///
    /// Only called after the matching `begin_frame` returned
    /// [`FrameStatus::Ready`]. On success the frame number advances by
    /// exactly one.
    fn end_frame(&mut self, delta_time: f32) -> Result<(), RenderError>;

    /// The number of successfully presented frames since `initialize`.
    fn frame_number(&self) -> u64;

    /// Acquires backend storage for a texture and uploads its pixel data.
    ///
    /// All-or-nothing: on failure no backend storage remains acquired and no
    /// handle is minted.
    fn create_texture(&mut self, descriptor: &TextureDescriptor<'_>)
        -> Result<TextureId, ResourceError>;

    /// Releases the backend storage of a previously created texture.
    ///
    /// ## Errors
    /// An `Err` here is a defect report (e.g. an invalid handle), not a
    /// recoverable condition; callers must not retry.
    fn destroy_texture(&mut self, id: TextureId) -> Result<(), ResourceError>;

    /// Acquires backend shading-state resources for a material.
    fn create_material(
        &mut self,
        descriptor: &MaterialDescriptor<'_>,
    ) -> Result<MaterialId, ResourceError>;

    /// Releases the backend resources of a previously created material.
    fn destroy_material(&mut self, id: MaterialId) -> Result<(), ResourceError>;

    /// Uploads vertex and index buffers for geometry.
    ///
    /// Zero counts are accepted: zero vertices is degenerate-but-valid, and
    /// zero indices selects a non-indexed draw.
    fn create_geometry(
        &mut self,
        descriptor: &GeometryDescriptor<'_>,
    ) -> Result<GeometryId, ResourceError>;

    /// Releases the buffers of previously created geometry.
    fn destroy_geometry(&mut self, id: GeometryId) -> Result<(), ResourceError>;
}
