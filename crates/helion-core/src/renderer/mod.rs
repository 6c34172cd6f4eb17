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

//! The backend-agnostic rendering contract.
//!
//! This module is the "common language" between a render frontend and any
//! concrete graphics backend. It defines the 'what' of a frame — the
//! [`RendererBackend`] trait, the frame lifecycle enforced by
//! [`RendererFrontend`], the per-frame [`RenderPacket`], and the opaque
//! resource handles — while the 'how' lives in a backend crate implementing
//! these traits for a specific graphics API.

pub mod backend;
pub mod error;
pub mod frontend;
pub mod packet;
pub mod pass;
pub mod resource;
pub mod state;

pub use self::backend::{FrameStatus, RendererBackend};
pub use self::error::{RenderError, ResourceError, ResourceKind};
pub use self::frontend::{FrameOutcome, FramePhase, RendererFrontend};
pub use self::packet::{GeometryRenderData, RenderPacket};
pub use self::pass::RenderpassId;
pub use self::resource::{
    GeometryDescriptor, GeometryId, MaterialDescriptor, MaterialId, TextureDescriptor, TextureId,
};
pub use self::state::{GlobalUiState, GlobalWorldState, RenderMode};
