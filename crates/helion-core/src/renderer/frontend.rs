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

//! The render frontend: owns the active backend and enforces the frame
//! lifecycle state machine.
//!
//! Call order across a frame follows a strict machine:
//!
//! ```text
//! Idle --begin_frame(Ready)--> FrameActive --begin_renderpass--> PassActive
//! PassActive --draw_geometry*--> PassActive --end_renderpass--> FrameActive
//! FrameActive --end_frame--> Idle
//! ```
//!
//! `begin_frame` reporting [`FrameStatus::NotReady`] keeps the machine in
//! `Idle`; no other frame operation may follow until the next attempt. The
//! frontend rejects every out-of-order call before it reaches the backend, so
//! a conforming backend only ever observes legal sequences.

use crate::renderer::backend::{FrameStatus, RendererBackend};
use crate::renderer::error::{RenderError, ResourceError};
use crate::renderer::packet::{GeometryRenderData, RenderPacket};
use crate::renderer::pass::RenderpassId;
use crate::renderer::resource::{
    GeometryDescriptor, GeometryId, MaterialDescriptor, MaterialId, TextureDescriptor, TextureId,
};
use crate::renderer::state::{GlobalUiState, GlobalWorldState};
use std::fmt;

/// Where the renderer currently is in the frame lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FramePhase {
    /// No frame is in flight.
    #[default]
    Idle,
    /// A frame bracket is open; no renderpass is.
    FrameActive,
    /// A frame bracket and the contained renderpass are open.
    PassActive(RenderpassId),
}

impl fmt::Display for FramePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FramePhase::Idle => write!(f, "idle"),
            FramePhase::FrameActive => write!(f, "frame-active"),
            FramePhase::PassActive(pass) => write!(f, "pass-active({pass})"),
        }
    }
}

/// What became of one [`RendererFrontend::draw_frame`] tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// The frame was fully recorded and presented; the frame number advanced.
    Rendered,
    /// The frame was skipped or aborted for a transient reason; retry next
    /// tick. The frame number did not advance.
    Skipped,
}

/// Owns the single active [`RendererBackend`] and sequences all calls into it.
///
/// Construction initializes the backend; [`shutdown`](Self::shutdown)
/// consumes the frontend so both lifecycle calls happen exactly once by
/// construction. One logical render thread drives an instance; the contract
/// defines no cross-thread safety beyond what `Send` provides.
#[derive(Debug)]
pub struct RendererFrontend {
    backend: Box<dyn RendererBackend>,
    phase: FramePhase,
    world_state: GlobalWorldState,
    ui_state: GlobalUiState,
}

impl RendererFrontend {
    /// Initializes the given backend and wraps it in a frontend.
    ///
    /// ## Errors
    /// Propagates the backend's initialization failure. That failure is fatal
    /// to the render subsystem; the backend is dropped without `shutdown`.
    pub fn new(
        mut backend: Box<dyn RendererBackend>,
        application_name: &str,
    ) -> Result<Self, RenderError> {
        backend.initialize(application_name)?;
        log::info!("Renderer frontend initialized for '{application_name}'.");
        Ok(Self {
            backend,
            phase: FramePhase::Idle,
            world_state: GlobalWorldState::default(),
            ui_state: GlobalUiState::default(),
        })
    }

    /// Shuts the backend down, consuming the frontend.
    ///
    /// All outstanding `destroy_*` calls must have completed first; any frame
    /// in flight at this point is a caller bug and is logged.
    pub fn shutdown(mut self) {
        if self.phase != FramePhase::Idle {
            log::warn!(
                "Renderer shut down while in phase {}; frame abandoned.",
                self.phase
            );
        }
        self.backend.shutdown();
        log::info!("Renderer frontend shut down.");
    }

    /// The current frame lifecycle phase.
    pub fn phase(&self) -> FramePhase {
        self.phase
    }

    /// The number of successfully presented frames.
    pub fn frame_number(&self) -> u64 {
        self.backend.frame_number()
    }

    /// Replaces the stored world-pass globals used by
    /// [`draw_frame`](Self::draw_frame). May be called at any time.
    pub fn set_world_state(&mut self, state: GlobalWorldState) {
        self.world_state = state;
    }

    /// Replaces the stored UI-pass globals used by
    /// [`draw_frame`](Self::draw_frame). May be called at any time.
    pub fn set_ui_state(&mut self, state: GlobalUiState) {
        self.ui_state = state;
    }

    /// Forwards a viewport/swapchain size change to the backend.
    ///
    /// ## Errors
    /// [`RenderError::OutOfOrder`] if a frame bracket is open; resizes are
    /// only legal outside `begin_frame`/`end_frame`.
    pub fn resized(&mut self, width: u32, height: u32) -> Result<(), RenderError> {
        if self.phase != FramePhase::Idle {
            return Err(RenderError::OutOfOrder {
                operation: "resized",
                phase: self.phase,
            });
        }
        self.backend.resized(width, height);
        Ok(())
    }

    /// Opens a frame bracket.
    ///
    /// [`FrameStatus::NotReady`] is a recoverable skip: the machine stays in
    /// `Idle` and the caller must not issue any further frame operation this
    /// tick (including `end_frame`).
    pub fn begin_frame(&mut self, delta_time: f32) -> Result<FrameStatus, RenderError> {
        if self.phase != FramePhase::Idle {
            return Err(RenderError::OutOfOrder {
                operation: "begin_frame",
                phase: self.phase,
            });
        }
        match self.backend.begin_frame(delta_time)? {
            FrameStatus::Ready => {
                self.phase = FramePhase::FrameActive;
                Ok(FrameStatus::Ready)
            }
            FrameStatus::NotReady => {
                log::debug!("Backend not ready to render; skipping frame.");
                Ok(FrameStatus::NotReady)
            }
        }
    }

    /// Uploads world-pass globals.
    ///
    /// Legal immediately after `begin_frame` or inside the open world pass;
    /// repeated uploads are last-writer-wins.
    pub fn update_global_world_state(
        &mut self,
        state: &GlobalWorldState,
    ) -> Result<(), RenderError> {
        match self.phase {
            FramePhase::FrameActive => {}
            FramePhase::PassActive(pass) if pass == RenderpassId::WORLD => {}
            _ => {
                return Err(RenderError::OutOfOrder {
                    operation: "update_global_world_state",
                    phase: self.phase,
                })
            }
        }
        self.backend.update_global_world_state(state);
        Ok(())
    }

    /// Uploads UI-pass globals. Legal immediately after `begin_frame` or
    /// inside the open UI pass.
    pub fn update_global_ui_state(&mut self, state: &GlobalUiState) -> Result<(), RenderError> {
        match self.phase {
            FramePhase::FrameActive => {}
            FramePhase::PassActive(pass) if pass == RenderpassId::UI => {}
            _ => {
                return Err(RenderError::OutOfOrder {
                    operation: "update_global_ui_state",
                    phase: self.phase,
                })
            }
        }
        self.backend.update_global_ui_state(state);
        Ok(())
    }

    /// Opens a renderpass bracket. Passes never nest: exactly one pass may be
    /// open at a time.
    ///
    /// On a backend failure the frame is aborted cleanly (back to `Idle`, no
    /// `end_frame`) and the error is propagated for the caller to classify.
    pub fn begin_renderpass(&mut self, pass: RenderpassId) -> Result<(), RenderError> {
        if self.phase != FramePhase::FrameActive {
            return Err(RenderError::OutOfOrder {
                operation: "begin_renderpass",
                phase: self.phase,
            });
        }
        match self.backend.begin_renderpass(pass) {
            Ok(()) => {
                self.phase = FramePhase::PassActive(pass);
                Ok(())
            }
            Err(err) => {
                self.phase = FramePhase::Idle;
                Err(err)
            }
        }
    }

    /// Closes the open renderpass bracket.
    ///
    /// ## Errors
    /// [`RenderError::PassMismatch`] if `pass` does not name the open pass;
    /// the open pass stays open.
    pub fn end_renderpass(&mut self, pass: RenderpassId) -> Result<(), RenderError> {
        let open = match self.phase {
            FramePhase::PassActive(open) => open,
            _ => {
                return Err(RenderError::OutOfOrder {
                    operation: "end_renderpass",
                    phase: self.phase,
                })
            }
        };
        if open != pass {
            return Err(RenderError::PassMismatch {
                open,
                requested: pass,
            });
        }
        match self.backend.end_renderpass(pass) {
            Ok(()) => {
                self.phase = FramePhase::FrameActive;
                Ok(())
            }
            Err(err) => {
                self.phase = FramePhase::Idle;
                Err(err)
            }
        }
    }

    /// Issues one draw call. Legal only while a renderpass is open.
    pub fn draw_geometry(&mut self, data: &GeometryRenderData) -> Result<(), RenderError> {
        if !matches!(self.phase, FramePhase::PassActive(_)) {
            return Err(RenderError::OutOfOrder {
                operation: "draw_geometry",
                phase: self.phase,
            });
        }
        self.backend.draw_geometry(data);
        Ok(())
    }

    /// Closes the frame bracket and presents.
    ///
    /// Legal only in `FrameActive` (every opened pass already closed, and the
    /// matching `begin_frame` reported `Ready`). The machine returns to
    /// `Idle` on success and failure alike; only success advances the frame
    /// number.
    pub fn end_frame(&mut self, delta_time: f32) -> Result<(), RenderError> {
        if self.phase != FramePhase::FrameActive {
            return Err(RenderError::OutOfOrder {
                operation: "end_frame",
                phase: self.phase,
            });
        }
        self.phase = FramePhase::Idle;
        self.backend.end_frame(delta_time)
    }

    /// Renders one complete frame from the packet: world pass (globals, then
    /// draws in submission order), UI pass, then present.
    ///
    /// Transient conditions — a not-ready `begin_frame`, a renderpass that
    /// could not be prepared, a failed present — abort the frame cleanly and
    /// return [`FrameOutcome::Skipped`]; they are logged as recoverable
    /// skips, never as errors. Fatal backend errors propagate.
    pub fn draw_frame(&mut self, packet: &RenderPacket) -> Result<FrameOutcome, RenderError> {
        match self.begin_frame(packet.delta_time)? {
            FrameStatus::Ready => {}
            FrameStatus::NotReady => return Ok(FrameOutcome::Skipped),
        }

        if let Err(err) = self.record_passes(packet) {
            return self.skip_or_fail(err);
        }
        if let Err(err) = self.end_frame(packet.delta_time) {
            return self.skip_or_fail(err);
        }
        Ok(FrameOutcome::Rendered)
    }

    fn record_passes(&mut self, packet: &RenderPacket) -> Result<(), RenderError> {
        let world_state = self.world_state;
        self.begin_renderpass(RenderpassId::WORLD)?;
        self.update_global_world_state(&world_state)?;
        for data in &packet.world_geometries {
            self.draw_geometry(data)?;
        }
        self.end_renderpass(RenderpassId::WORLD)?;

        let ui_state = self.ui_state;
        self.begin_renderpass(RenderpassId::UI)?;
        self.update_global_ui_state(&ui_state)?;
        for data in &packet.ui_geometries {
            self.draw_geometry(data)?;
        }
        self.end_renderpass(RenderpassId::UI)?;
        Ok(())
    }

    fn skip_or_fail(&mut self, err: RenderError) -> Result<FrameOutcome, RenderError> {
        if err.is_transient() {
            // The granular ops already returned the machine to Idle.
            log::warn!("Frame aborted, retrying next tick: {err}");
            Ok(FrameOutcome::Skipped)
        } else {
            Err(err)
        }
    }

    /// Creates a texture through the backend. See
    /// [`RendererBackend::create_texture`].
    pub fn create_texture(
        &mut self,
        descriptor: &TextureDescriptor<'_>,
    ) -> Result<TextureId, ResourceError> {
        self.backend.create_texture(descriptor)
    }

    /// Destroys a texture. A backend failure here is a defect and is logged;
    /// it is not surfaced as a recoverable condition.
    pub fn destroy_texture(&mut self, id: TextureId) {
        if let Err(err) = self.backend.destroy_texture(id) {
            log::error!("{err}");
        }
    }

    /// Creates a material through the backend.
    pub fn create_material(
        &mut self,
        descriptor: &MaterialDescriptor<'_>,
    ) -> Result<MaterialId, ResourceError> {
        self.backend.create_material(descriptor)
    }

    /// Destroys a material. Failures are defects and are logged.
    pub fn destroy_material(&mut self, id: MaterialId) {
        if let Err(err) = self.backend.destroy_material(id) {
            log::error!("{err}");
        }
    }

    /// Uploads geometry through the backend.
    pub fn create_geometry(
        &mut self,
        descriptor: &GeometryDescriptor<'_>,
    ) -> Result<GeometryId, ResourceError> {
        self.backend.create_geometry(descriptor)
    }

    /// Destroys geometry. Failures are defects and are logged.
    pub fn destroy_geometry(&mut self, id: GeometryId) {
        if let Err(err) = self.backend.destroy_geometry(id) {
            log::error!("{err}");
        }
    }
}
