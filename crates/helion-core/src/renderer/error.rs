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

//! Defines the hierarchy of error types for the rendering contract.

use crate::renderer::frontend::FramePhase;
use crate::renderer::pass::RenderpassId;
use std::fmt;

/// The kind of GPU-visible resource an operation was acting on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    /// A GPU-visible image resource.
    Texture,
    /// A shading-state resource.
    Material,
    /// A vertex/index buffer pair.
    Geometry,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKind::Texture => write!(f, "texture"),
            ResourceKind::Material => write!(f, "material"),
            ResourceKind::Geometry => write!(f, "geometry"),
        }
    }
}

/// An error related to the acquisition or release of a backend resource.
///
/// Creation failures are all-or-nothing: when `create_*` returns an error, no
/// backend storage remains acquired and the caller must treat the resource as
/// non-existent. Destruction failures are defects, not recoverable conditions.
#[derive(Debug)]
pub enum ResourceError {
    /// The backend could not acquire the resource's internal storage.
    CreationFailed {
        /// The kind of resource that failed to be created.
        kind: ResourceKind,
        /// Detailed error messages from the backend.
        details: String,
    },
    /// The handle does not refer to a live resource (never created, or
    /// destroyed without a subsequent successful create).
    InvalidHandle {
        /// The kind of resource the handle was expected to refer to.
        kind: ResourceKind,
    },
    /// The backend failed to release a resource. Best-effort cleanup is the
    /// backend's responsibility; callers must not retry.
    DestructionFailed {
        /// The kind of resource that failed to be destroyed.
        kind: ResourceKind,
        /// Detailed error messages from the backend.
        details: String,
    },
}

impl fmt::Display for ResourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceError::CreationFailed { kind, details } => {
                write!(f, "Failed to create {kind}: {details}")
            }
            ResourceError::InvalidHandle { kind } => {
                write!(f, "Invalid {kind} handle.")
            }
            ResourceError::DestructionFailed { kind, details } => {
                write!(f, "Defect: failed to destroy {kind}: {details}")
            }
        }
    }
}

impl std::error::Error for ResourceError {}

/// A high-level error that can occur while driving the renderer.
///
/// Variants fall into two classes (see [`RenderError::is_transient`]):
/// transient per-frame conditions the frontend recovers from by skipping to
/// the next tick, and fatal conditions that are surfaced to the caller.
#[derive(Debug)]
pub enum RenderError {
    /// An operation was attempted before the backend was initialized.
    NotInitialized,
    /// `initialize` was called on an already-initialized backend.
    AlreadyInitialized,
    /// The backend failed to acquire its global resources. Fatal to the
    /// render subsystem; no partial-use fallback exists.
    InitializationFailed(String),
    /// An operation was issued in a frame phase where it is not legal.
    OutOfOrder {
        /// The operation that was attempted.
        operation: &'static str,
        /// The frame phase the renderer was in at the time.
        phase: FramePhase,
    },
    /// `end_renderpass` named a different pass than the one currently open.
    PassMismatch {
        /// The pass that is currently open.
        open: RenderpassId,
        /// The pass the call tried to end.
        requested: RenderpassId,
    },
    /// The backend could not prepare a renderpass's targets this frame.
    /// Transient: the frame is aborted cleanly and retried next tick.
    PassNotReady {
        /// The pass that could not be brought up.
        pass: RenderpassId,
        /// Detailed error messages from the backend.
        details: String,
    },
    /// The backend could not finalize or present the frame. Transient: the
    /// frame's work is dropped and retried next tick.
    PresentationFailed(String),
    /// The graphics device was lost. Catastrophic; requires reinitialization.
    DeviceLost,
    /// An error occurred while managing a backend resource.
    Resource(ResourceError),
    /// An unexpected or internal backend error occurred.
    Internal(String),
}

impl RenderError {
    /// Returns `true` for the transient per-frame class of errors: the
    /// frontend logs them as recoverable skips (never as errors) and retries
    /// on the next tick.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            RenderError::PassNotReady { .. } | RenderError::PresentationFailed(_)
        )
    }
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::NotInitialized => {
                write!(f, "The renderer backend is not initialized.")
            }
            RenderError::AlreadyInitialized => {
                write!(f, "The renderer backend is already initialized.")
            }
            RenderError::InitializationFailed(msg) => {
                write!(f, "Failed to initialize renderer backend: {msg}")
            }
            RenderError::OutOfOrder { operation, phase } => {
                write!(f, "Operation '{operation}' is not valid in phase {phase}.")
            }
            RenderError::PassMismatch { open, requested } => {
                write!(
                    f,
                    "Renderpass mismatch: {open} is open but {requested} was ended."
                )
            }
            RenderError::PassNotReady { pass, details } => {
                write!(f, "Renderpass {pass} could not be prepared: {details}")
            }
            RenderError::PresentationFailed(msg) => {
                write!(f, "Failed to finalize/present the frame: {msg}")
            }
            RenderError::DeviceLost => write!(
                f,
                "The graphics device was lost and needs to be reinitialized."
            ),
            RenderError::Resource(err) => {
                write!(f, "Renderer resource operation failed: {err}")
            }
            RenderError::Internal(msg) => {
                write!(f, "An internal or unexpected error occurred: {msg}")
            }
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RenderError::Resource(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ResourceError> for RenderError {
    fn from(err: ResourceError) -> Self {
        RenderError::Resource(err)
    }
}
