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

//! The headless implementation of the [`RendererBackend`] contract.

use helion_core::math::LinearRgba;
use helion_core::renderer::{
    FramePhase, FrameStatus, GeometryDescriptor, GeometryId, GeometryRenderData, GlobalUiState,
    GlobalWorldState, MaterialDescriptor, MaterialId, RenderError, RendererBackend, RenderpassId,
    ResourceError, ResourceKind, TextureDescriptor, TextureId,
};
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Default)]
struct StatsInner {
    textures_live: usize,
    materials_live: usize,
    geometries_live: usize,
    frames_presented: u64,
    draws_last_frame: u32,
    triangles_last_frame: u32,
    world_state_updates: u64,
    ui_state_updates: u64,
}

/// A shared, cloneable view of the headless backend's counters.
///
/// Clone a handle before boxing the backend into a frontend; the handle stays
/// valid and observes every subsequent mutation. This mirrors how real
/// backends hand out resource monitors at init time.
#[derive(Debug, Clone, Default)]
pub struct HeadlessStats {
    inner: Arc<Mutex<StatsInner>>,
}

impl HeadlessStats {
    fn lock(&self) -> MutexGuard<'_, StatsInner> {
        self.inner.lock().expect("headless stats lock poisoned")
    }

    /// The number of live textures.
    pub fn texture_count(&self) -> usize {
        self.lock().textures_live
    }

    /// The number of live materials.
    pub fn material_count(&self) -> usize {
        self.lock().materials_live
    }

    /// The number of live geometries.
    pub fn geometry_count(&self) -> usize {
        self.lock().geometries_live
    }

    /// The total number of live resources of all kinds.
    pub fn resource_total(&self) -> usize {
        let inner = self.lock();
        inner.textures_live + inner.materials_live + inner.geometries_live
    }

    /// The number of successfully presented frames.
    pub fn frames_presented(&self) -> u64 {
        self.lock().frames_presented
    }

    /// The number of draw calls recorded in the last presented frame.
    pub fn draws_last_frame(&self) -> u32 {
        self.lock().draws_last_frame
    }

    /// The number of triangles submitted in the last presented frame.
    pub fn triangles_last_frame(&self) -> u32 {
        self.lock().triangles_last_frame
    }

    /// How many times world-pass globals have been uploaded.
    pub fn world_state_updates(&self) -> u64 {
        self.lock().world_state_updates
    }

    /// How many times UI-pass globals have been uploaded.
    pub fn ui_state_updates(&self) -> u64 {
        self.lock().ui_state_updates
    }
}

#[derive(Debug)]
struct TextureRecord {
    name: String,
    width: u32,
    height: u32,
}

#[derive(Debug)]
struct MaterialRecord {
    name: String,
    diffuse_colour: LinearRgba,
    diffuse_texture: Option<TextureId>,
}

#[derive(Debug)]
struct GeometryRecord {
    name: String,
    vertex_count: u32,
    index_count: u32,
}

fn allocate<T>(slots: &mut Vec<Option<T>>, record: T) -> u32 {
    if let Some(index) = slots.iter().position(Option::is_none) {
        slots[index] = Some(record);
        index as u32
    } else {
        slots.push(Some(record));
        (slots.len() - 1) as u32
    }
}

fn release<T>(
    slots: &mut [Option<T>],
    index: u32,
    kind: ResourceKind,
) -> Result<T, ResourceError> {
    slots
        .get_mut(index as usize)
        .and_then(Option::take)
        .ok_or(ResourceError::InvalidHandle { kind })
}

/// A [`RendererBackend`] that records instead of rendering.
///
/// Enforces the contract's sequencing rules on its own, independent of the
/// frontend: a backend must reject misuse even from a misbehaving caller.
/// Test hooks allow driving the transient paths (`not-ready` frames, a
/// renderpass that cannot be prepared) deterministically.
#[derive(Debug, Default)]
pub struct HeadlessRendererBackend {
    initialized: bool,
    application_name: String,
    phase: FramePhase,
    frame_number: u64,
    width: u32,
    height: u32,
    textures: Vec<Option<TextureRecord>>,
    materials: Vec<Option<MaterialRecord>>,
    geometries: Vec<Option<GeometryRecord>>,
    world_state: Option<GlobalWorldState>,
    ui_state: Option<GlobalUiState>,
    draws_this_frame: u32,
    triangles_this_frame: u32,
    passes_this_frame: Vec<RenderpassId>,
    not_ready_frames: u32,
    fail_next_renderpass: Option<RenderpassId>,
    stats: HeadlessStats,
}

impl HeadlessRendererBackend {
    /// Creates an uninitialized headless backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a shared handle to this backend's counters. Clone it before
    /// boxing the backend into a frontend.
    pub fn stats(&self) -> HeadlessStats {
        self.stats.clone()
    }

    /// Test hook: the next `count` calls to `begin_frame` report
    /// [`FrameStatus::NotReady`].
    pub fn force_not_ready_frames(&mut self, count: u32) {
        self.not_ready_frames = count;
    }

    /// Test hook: the next `begin_renderpass` for `pass` fails with
    /// [`RenderError::PassNotReady`].
    pub fn fail_next_renderpass(&mut self, pass: RenderpassId) {
        self.fail_next_renderpass = Some(pass);
    }

    /// The last viewport size reported through `resized`.
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// The world-pass globals last uploaded, if any.
    pub fn last_world_state(&self) -> Option<GlobalWorldState> {
        self.world_state
    }

    /// The UI-pass globals last uploaded, if any.
    pub fn last_ui_state(&self) -> Option<GlobalUiState> {
        self.ui_state
    }

    /// The dimensions of a live texture, or `None` for a dead handle.
    pub fn texture_size(&self, id: TextureId) -> Option<(u32, u32)> {
        self.textures
            .get(id.0 as usize)
            .and_then(|slot| slot.as_ref())
            .map(|record| (record.width, record.height))
    }

    /// The diffuse colour and texture of a live material, or `None` for a
    /// dead handle.
    pub fn material_diffuse(&self, id: MaterialId) -> Option<(LinearRgba, Option<TextureId>)> {
        self.materials
            .get(id.0 as usize)
            .and_then(|slot| slot.as_ref())
            .map(|record| (record.diffuse_colour, record.diffuse_texture))
    }

    fn texture_is_live(&self, id: TextureId) -> bool {
        matches!(self.textures.get(id.0 as usize), Some(Some(_)))
    }
}

impl RendererBackend for HeadlessRendererBackend {
    fn initialize(&mut self, application_name: &str) -> Result<(), RenderError> {
        if self.initialized {
            return Err(RenderError::AlreadyInitialized);
        }
        self.initialized = true;
        self.application_name = application_name.to_string();
        self.phase = FramePhase::Idle;
        log::info!("Headless renderer backend initialized for '{application_name}'.");
        Ok(())
    }

    fn shutdown(&mut self) {
        let outstanding = self.stats.resource_total();
        if outstanding != 0 {
            log::warn!(
                "Headless backend shut down with {outstanding} resource(s) still live; \
                 destroy_* must complete before shutdown."
            );
        }
        self.initialized = false;
        log::info!(
            "Headless renderer backend for '{}' shut down.",
            self.application_name
        );
    }

    fn resized(&mut self, width: u32, height: u32) {
        if self.phase != FramePhase::Idle {
            log::warn!("resized({width}x{height}) received inside a frame bracket; caller defect.");
        }
        self.width = width;
        self.height = height;
        log::debug!("Headless backend resized to {width}x{height}.");
    }

    fn begin_frame(&mut self, _delta_time: f32) -> Result<FrameStatus, RenderError> {
        if !self.initialized {
            return Err(RenderError::NotInitialized);
        }
        if self.phase != FramePhase::Idle {
            return Err(RenderError::OutOfOrder {
                operation: "begin_frame",
                phase: self.phase,
            });
        }
        if self.not_ready_frames > 0 {
            self.not_ready_frames -= 1;
            log::debug!("Headless backend not ready; frame skipped.");
            return Ok(FrameStatus::NotReady);
        }
        self.phase = FramePhase::FrameActive;
        self.draws_this_frame = 0;
        self.triangles_this_frame = 0;
        self.passes_this_frame.clear();
        Ok(FrameStatus::Ready)
    }

    fn update_global_world_state(&mut self, state: &GlobalWorldState) {
        self.world_state = Some(*state);
        self.stats.lock().world_state_updates += 1;
    }

    fn update_global_ui_state(&mut self, state: &GlobalUiState) {
        self.ui_state = Some(*state);
        self.stats.lock().ui_state_updates += 1;
    }

    fn begin_renderpass(&mut self, pass: RenderpassId) -> Result<(), RenderError> {
        if self.phase != FramePhase::FrameActive {
            return Err(RenderError::OutOfOrder {
                operation: "begin_renderpass",
                phase: self.phase,
            });
        }
        if self.fail_next_renderpass == Some(pass) {
            self.fail_next_renderpass = None;
            // A pass that cannot be prepared abandons the whole frame; the
            // caller restarts from begin_frame next tick.
            self.phase = FramePhase::Idle;
            return Err(RenderError::PassNotReady {
                pass,
                details: "renderpass targets unavailable".to_string(),
            });
        }
        self.phase = FramePhase::PassActive(pass);
        self.passes_this_frame.push(pass);
        Ok(())
    }

    fn end_renderpass(&mut self, pass: RenderpassId) -> Result<(), RenderError> {
        match self.phase {
            FramePhase::PassActive(open) if open == pass => {
                self.phase = FramePhase::FrameActive;
                Ok(())
            }
            FramePhase::PassActive(open) => Err(RenderError::PassMismatch {
                open,
                requested: pass,
            }),
            phase => Err(RenderError::OutOfOrder {
                operation: "end_renderpass",
                phase,
            }),
        }
    }

    fn draw_geometry(&mut self, data: &GeometryRenderData) {
        if !matches!(self.phase, FramePhase::PassActive(_)) {
            log::warn!("draw_geometry outside an open renderpass; caller defect.");
            return;
        }
        let record = match self
            .geometries
            .get(data.geometry.0 as usize)
            .and_then(|slot| slot.as_ref())
        {
            Some(record) => record,
            None => {
                log::warn!(
                    "draw_geometry with dead handle {:?}; draw dropped.",
                    data.geometry
                );
                return;
            }
        };
        // Indexed geometry draws index_count elements; non-indexed falls back
        // to the vertex count.
        let elements = if record.index_count > 0 {
            record.index_count
        } else {
            record.vertex_count
        };
        self.draws_this_frame += 1;
        self.triangles_this_frame += elements / 3;
    }

    fn end_frame(&mut self, _delta_time: f32) -> Result<(), RenderError> {
        if self.phase != FramePhase::FrameActive {
            return Err(RenderError::OutOfOrder {
                operation: "end_frame",
                phase: self.phase,
            });
        }
        self.phase = FramePhase::Idle;
        self.frame_number += 1;
        log::trace!(
            "Frame {} presented: {} pass(es), {} draw(s).",
            self.frame_number,
            self.passes_this_frame.len(),
            self.draws_this_frame
        );
        let mut stats = self.stats.lock();
        stats.frames_presented = self.frame_number;
        stats.draws_last_frame = self.draws_this_frame;
        stats.triangles_last_frame = self.triangles_this_frame;
        Ok(())
    }

    fn frame_number(&self) -> u64 {
        self.frame_number
    }

    fn create_texture(
        &mut self,
        descriptor: &TextureDescriptor<'_>,
    ) -> Result<TextureId, ResourceError> {
        let expected =
            descriptor.width as usize * descriptor.height as usize * descriptor.channel_count as usize;
        if descriptor.pixels.len() != expected {
            return Err(ResourceError::CreationFailed {
                kind: ResourceKind::Texture,
                details: format!(
                    "pixel data is {} bytes, expected {} ({}x{}x{})",
                    descriptor.pixels.len(),
                    expected,
                    descriptor.width,
                    descriptor.height,
                    descriptor.channel_count
                ),
            });
        }
        let index = allocate(
            &mut self.textures,
            TextureRecord {
                name: descriptor.name.to_string(),
                width: descriptor.width,
                height: descriptor.height,
            },
        );
        self.stats.lock().textures_live += 1;
        log::debug!("Created texture '{}' as {index}.", descriptor.name);
        Ok(TextureId(index))
    }

    fn destroy_texture(&mut self, id: TextureId) -> Result<(), ResourceError> {
        let record = release(&mut self.textures, id.0, ResourceKind::Texture)?;
        self.stats.lock().textures_live -= 1;
        log::debug!("Destroyed texture '{}'.", record.name);
        Ok(())
    }

    fn create_material(
        &mut self,
        descriptor: &MaterialDescriptor<'_>,
    ) -> Result<MaterialId, ResourceError> {
        if let Some(texture) = descriptor.diffuse_texture {
            // All-or-nothing: a dead texture reference acquires nothing.
            if !self.texture_is_live(texture) {
                return Err(ResourceError::CreationFailed {
                    kind: ResourceKind::Material,
                    details: format!("diffuse texture {texture:?} is not a live handle"),
                });
            }
        }
        let index = allocate(
            &mut self.materials,
            MaterialRecord {
                name: descriptor.name.to_string(),
                diffuse_colour: descriptor.diffuse_colour,
                diffuse_texture: descriptor.diffuse_texture,
            },
        );
        self.stats.lock().materials_live += 1;
        log::debug!("Created material '{}' as {index}.", descriptor.name);
        Ok(MaterialId(index))
    }

    fn destroy_material(&mut self, id: MaterialId) -> Result<(), ResourceError> {
        let record = release(&mut self.materials, id.0, ResourceKind::Material)?;
        self.stats.lock().materials_live -= 1;
        log::debug!("Destroyed material '{}'.", record.name);
        Ok(())
    }

    fn create_geometry(
        &mut self,
        descriptor: &GeometryDescriptor<'_>,
    ) -> Result<GeometryId, ResourceError> {
        let vertex_bytes = descriptor.vertex_size as usize * descriptor.vertex_count as usize;
        let index_bytes = descriptor.index_size as usize * descriptor.index_count as usize;
        if descriptor.vertices.len() != vertex_bytes || descriptor.indices.len() != index_bytes {
            return Err(ResourceError::CreationFailed {
                kind: ResourceKind::Geometry,
                details: format!(
                    "buffer sizes {}/{} bytes do not match descriptor ({vertex_bytes}/{index_bytes})",
                    descriptor.vertices.len(),
                    descriptor.indices.len()
                ),
            });
        }
        // Zero counts are degenerate but valid; zero indices selects a
        // non-indexed draw.
        let index = allocate(
            &mut self.geometries,
            GeometryRecord {
                name: descriptor.name.to_string(),
                vertex_count: descriptor.vertex_count,
                index_count: descriptor.index_count,
            },
        );
        self.stats.lock().geometries_live += 1;
        log::debug!("Created geometry '{}' as {index}.", descriptor.name);
        Ok(GeometryId(index))
    }

    fn destroy_geometry(&mut self, id: GeometryId) -> Result<(), ResourceError> {
        let record = release(&mut self.geometries, id.0, ResourceKind::Geometry)?;
        self.stats.lock().geometries_live -= 1;
        log::debug!("Destroyed geometry '{}'.", record.name);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn initialized_backend() -> HeadlessRendererBackend {
        let mut backend = HeadlessRendererBackend::new();
        backend.initialize("headless-tests").expect("init");
        backend
    }

    fn quad_geometry<'a>() -> GeometryDescriptor<'a> {
        GeometryDescriptor {
            name: "quad",
            vertex_size: 4,
            vertex_count: 4,
            vertices: &[0u8; 16],
            index_size: 2,
            index_count: 6,
            indices: &[0u8; 12],
        }
    }

    #[test]
    fn initialize_twice_is_rejected() {
        let mut backend = initialized_backend();
        assert!(matches!(
            backend.initialize("again"),
            Err(RenderError::AlreadyInitialized)
        ));
    }

    #[test]
    fn begin_frame_before_initialize_is_rejected() {
        let mut backend = HeadlessRendererBackend::new();
        assert!(matches!(
            backend.begin_frame(0.016),
            Err(RenderError::NotInitialized)
        ));
    }

    #[test]
    fn renderpass_outside_frame_is_rejected() {
        let mut backend = initialized_backend();
        assert!(matches!(
            backend.begin_renderpass(RenderpassId::WORLD),
            Err(RenderError::OutOfOrder { .. })
        ));
        assert!(matches!(
            backend.end_frame(0.016),
            Err(RenderError::OutOfOrder { .. })
        ));
    }

    #[test]
    fn mismatched_end_renderpass_is_rejected() {
        let mut backend = initialized_backend();
        assert_eq!(backend.begin_frame(0.016).unwrap(), FrameStatus::Ready);
        backend.begin_renderpass(RenderpassId::WORLD).unwrap();
        assert!(matches!(
            backend.end_renderpass(RenderpassId::UI),
            Err(RenderError::PassMismatch { .. })
        ));
    }

    #[test]
    fn arena_reuses_released_slots() {
        let mut backend = initialized_backend();
        let desc = TextureDescriptor {
            name: "t",
            width: 2,
            height: 2,
            channel_count: 4,
            has_transparency: false,
            pixels: &[0u8; 16],
        };
        let first = backend.create_texture(&desc).unwrap();
        backend.destroy_texture(first).unwrap();
        let second = backend.create_texture(&desc).unwrap();
        assert_eq!(first, second);
        assert_eq!(backend.stats().texture_count(), 1);
    }

    #[test]
    fn texture_with_wrong_pixel_size_acquires_nothing() {
        let mut backend = initialized_backend();
        let desc = TextureDescriptor {
            name: "short",
            width: 4,
            height: 4,
            channel_count: 4,
            has_transparency: false,
            pixels: &[0u8; 8],
        };
        assert!(matches!(
            backend.create_texture(&desc),
            Err(ResourceError::CreationFailed { .. })
        ));
        assert_eq!(backend.stats().texture_count(), 0);
    }

    #[test]
    fn material_with_dead_texture_acquires_nothing() {
        let mut backend = initialized_backend();
        let desc = MaterialDescriptor {
            name: "orphan",
            diffuse_colour: LinearRgba::WHITE,
            diffuse_texture: Some(TextureId(3)),
        };
        assert!(matches!(
            backend.create_material(&desc),
            Err(ResourceError::CreationFailed { .. })
        ));
        assert_eq!(backend.stats().material_count(), 0);
    }

    #[test]
    fn destroying_a_dead_handle_is_a_defect() {
        let mut backend = initialized_backend();
        assert!(matches!(
            backend.destroy_geometry(GeometryId(0)),
            Err(ResourceError::InvalidHandle { .. })
        ));
    }

    #[test]
    fn zero_count_geometry_is_accepted() {
        let mut backend = initialized_backend();
        let desc = GeometryDescriptor {
            name: "degenerate",
            vertex_size: 0,
            vertex_count: 0,
            vertices: &[],
            index_size: 0,
            index_count: 0,
            indices: &[],
        };
        let id = backend.create_geometry(&desc).unwrap();
        backend.destroy_geometry(id).unwrap();
        assert_eq!(backend.stats().geometry_count(), 0);
    }

    #[test]
    fn draws_with_dead_handles_are_dropped() {
        let mut backend = initialized_backend();
        let geometry = backend.create_geometry(&quad_geometry()).unwrap();
        backend.begin_frame(0.016).unwrap();
        backend.begin_renderpass(RenderpassId::WORLD).unwrap();
        backend.draw_geometry(&GeometryRenderData::new(
            helion_core::math::Mat4::IDENTITY,
            geometry,
        ));
        backend.draw_geometry(&GeometryRenderData::new(
            helion_core::math::Mat4::IDENTITY,
            GeometryId(99),
        ));
        backend.end_renderpass(RenderpassId::WORLD).unwrap();
        backend.end_frame(0.016).unwrap();
        assert_eq!(backend.stats().draws_last_frame(), 1);
        backend.destroy_geometry(geometry).unwrap();
    }

    #[test]
    fn frame_number_only_advances_on_end_frame() {
        let mut backend = initialized_backend();
        backend.force_not_ready_frames(1);
        assert_eq!(backend.begin_frame(0.016).unwrap(), FrameStatus::NotReady);
        assert_eq!(backend.frame_number(), 0);
        assert_eq!(backend.begin_frame(0.016).unwrap(), FrameStatus::Ready);
        assert_eq!(backend.frame_number(), 0);
        backend.end_frame(0.016).unwrap();
        assert_eq!(backend.frame_number(), 1);
    }
}
