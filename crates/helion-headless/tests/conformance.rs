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

//! Conformance scenarios driving the headless backend through the frontend,
//! asserting the observable properties of the rendering contract.

use helion_core::math::{LinearRgba, Mat4, Vec3};
use helion_core::renderer::{
    FrameOutcome, GeometryDescriptor, GeometryRenderData, GlobalWorldState, MaterialDescriptor,
    RenderMode, RenderPacket, RendererFrontend, TextureDescriptor,
};
use helion_headless::{HeadlessRendererBackend, HeadlessStats};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn new_renderer() -> (RendererFrontend, HeadlessStats) {
    init_logging();
    let backend = HeadlessRendererBackend::new();
    let stats = backend.stats();
    let frontend = RendererFrontend::new(Box::new(backend), "conformance").expect("init");
    (frontend, stats)
}

fn new_renderer_with(
    configure: impl FnOnce(&mut HeadlessRendererBackend),
) -> (RendererFrontend, HeadlessStats) {
    init_logging();
    let mut backend = HeadlessRendererBackend::new();
    configure(&mut backend);
    let stats = backend.stats();
    let frontend = RendererFrontend::new(Box::new(backend), "conformance").expect("init");
    (frontend, stats)
}

fn quad() -> GeometryDescriptor<'static> {
    // 4 vertices of 12 bytes (position only), 6 indices of 2 bytes.
    GeometryDescriptor {
        name: "quad",
        vertex_size: 12,
        vertex_count: 4,
        vertices: &[0u8; 48],
        index_size: 2,
        index_count: 6,
        indices: &[0u8; 12],
    }
}

#[test]
fn end_to_end_frame_renders_and_leaks_nothing() {
    let (mut renderer, stats) = new_renderer();

    let geometry = renderer.create_geometry(&quad()).expect("geometry");
    renderer.set_world_state(GlobalWorldState {
        projection: Mat4::IDENTITY,
        view: Mat4::IDENTITY,
        view_position: Vec3::ZERO,
        ambient_colour: LinearRgba::new(1.0, 1.0, 1.0, 1.0),
        mode: RenderMode::Default,
    });

    let mut packet = RenderPacket::new(0.016);
    for _ in 0..3 {
        packet
            .world_geometries
            .push(GeometryRenderData::new(Mat4::IDENTITY, geometry));
    }

    let outcome = renderer.draw_frame(&packet).expect("frame");
    assert_eq!(outcome, FrameOutcome::Rendered);
    assert_eq!(renderer.frame_number(), 1);
    assert_eq!(stats.frames_presented(), 1);
    assert_eq!(stats.draws_last_frame(), 3);
    // 6 indices per draw -> 2 triangles per draw.
    assert_eq!(stats.triangles_last_frame(), 6);
    // Both passes uploaded their globals exactly once.
    assert_eq!(stats.world_state_updates(), 1);
    assert_eq!(stats.ui_state_updates(), 1);

    renderer.destroy_geometry(geometry);
    assert_eq!(stats.resource_total(), 0);
    renderer.shutdown();
}

#[test]
fn not_ready_twice_then_success_advances_frame_number_once() {
    let (mut renderer, stats) = new_renderer_with(|backend| {
        backend.force_not_ready_frames(2);
    });
    let packet = RenderPacket::new(0.016);

    assert_eq!(renderer.draw_frame(&packet).unwrap(), FrameOutcome::Skipped);
    assert_eq!(renderer.draw_frame(&packet).unwrap(), FrameOutcome::Skipped);
    assert_eq!(renderer.frame_number(), 0);
    assert_eq!(stats.frames_presented(), 0);

    assert_eq!(renderer.draw_frame(&packet).unwrap(), FrameOutcome::Rendered);
    assert_eq!(renderer.frame_number(), 1);
    assert_eq!(stats.frames_presented(), 1);
}

#[test]
fn frame_number_counts_only_successful_end_frames() {
    let (mut renderer, _stats) = new_renderer_with(|backend| {
        backend.force_not_ready_frames(1);
    });
    let packet = RenderPacket::new(0.008);

    let mut rendered = 0u64;
    for _ in 0..6 {
        if renderer.draw_frame(&packet).unwrap() == FrameOutcome::Rendered {
            rendered += 1;
        }
    }
    // One not-ready tick interleaved; the counter tracks successes exactly.
    assert_eq!(rendered, 5);
    assert_eq!(renderer.frame_number(), 5);
}

#[test]
fn create_then_destroy_texture_leaves_counts_unchanged() {
    let (mut renderer, stats) = new_renderer();
    let before = stats.resource_total();

    let texture = renderer
        .create_texture(&TextureDescriptor {
            name: "checker",
            width: 2,
            height: 2,
            channel_count: 4,
            has_transparency: false,
            pixels: &[255u8; 16],
        })
        .expect("texture");
    assert_eq!(stats.texture_count(), 1);

    renderer.destroy_texture(texture);
    assert_eq!(stats.resource_total(), before);
}

#[test]
fn empty_geometry_is_degenerate_but_valid() {
    let (mut renderer, stats) = new_renderer();

    let geometry = renderer
        .create_geometry(&GeometryDescriptor {
            name: "degenerate",
            vertex_size: 0,
            vertex_count: 0,
            vertices: &[],
            index_size: 0,
            index_count: 0,
            indices: &[],
        })
        .expect("empty geometry must not fail by emptiness alone");

    // Drawing it is legal and contributes nothing.
    let mut packet = RenderPacket::new(0.016);
    packet
        .world_geometries
        .push(GeometryRenderData::new(Mat4::IDENTITY, geometry));
    assert_eq!(renderer.draw_frame(&packet).unwrap(), FrameOutcome::Rendered);
    assert_eq!(stats.draws_last_frame(), 1);
    assert_eq!(stats.triangles_last_frame(), 0);

    renderer.destroy_geometry(geometry);
    assert_eq!(stats.geometry_count(), 0);
}

#[test]
fn renderpass_failure_skips_frame_and_recovers_next_tick() {
    let (mut renderer, stats) = new_renderer_with(|backend| {
        backend.fail_next_renderpass(helion_core::renderer::RenderpassId::WORLD);
    });
    let geometry = renderer.create_geometry(&quad()).expect("geometry");
    let mut packet = RenderPacket::new(0.016);
    packet
        .world_geometries
        .push(GeometryRenderData::new(Mat4::IDENTITY, geometry));

    assert_eq!(renderer.draw_frame(&packet).unwrap(), FrameOutcome::Skipped);
    assert_eq!(renderer.frame_number(), 0);

    assert_eq!(renderer.draw_frame(&packet).unwrap(), FrameOutcome::Rendered);
    assert_eq!(renderer.frame_number(), 1);
    assert_eq!(stats.draws_last_frame(), 1);

    renderer.destroy_geometry(geometry);
}

#[test]
fn material_lifecycle_is_all_or_nothing() {
    let (mut renderer, stats) = new_renderer();

    let texture = renderer
        .create_texture(&TextureDescriptor {
            name: "diffuse",
            width: 1,
            height: 1,
            channel_count: 4,
            has_transparency: true,
            pixels: &[0u8; 4],
        })
        .expect("texture");
    let material = renderer
        .create_material(&MaterialDescriptor {
            name: "surface",
            diffuse_colour: LinearRgba::WHITE,
            diffuse_texture: Some(texture),
        })
        .expect("material");
    assert_eq!(stats.resource_total(), 2);

    renderer.destroy_material(material);
    renderer.destroy_texture(texture);
    assert_eq!(stats.resource_total(), 0);

    // A material referencing a dead texture acquires nothing.
    let err = renderer.create_material(&MaterialDescriptor {
        name: "orphan",
        diffuse_colour: LinearRgba::WHITE,
        diffuse_texture: Some(texture),
    });
    assert!(err.is_err());
    assert_eq!(stats.material_count(), 0);
    renderer.shutdown();
}

#[test]
fn ui_draws_run_in_the_ui_pass() {
    let (mut renderer, stats) = new_renderer();
    let geometry = renderer.create_geometry(&quad()).expect("geometry");

    let mut packet = RenderPacket::new(0.016);
    packet
        .ui_geometries
        .push(GeometryRenderData::new(Mat4::IDENTITY, geometry));
    packet
        .ui_geometries
        .push(GeometryRenderData::new(Mat4::IDENTITY, geometry));

    assert_eq!(renderer.draw_frame(&packet).unwrap(), FrameOutcome::Rendered);
    assert_eq!(stats.draws_last_frame(), 2);
    assert_eq!(stats.ui_state_updates(), 1);

    renderer.destroy_geometry(geometry);
}

#[test]
fn resize_applies_between_frames() {
    let (mut renderer, _stats) = new_renderer();
    renderer.resized(1280, 720).expect("resize while idle");
    let packet = RenderPacket::new(0.016);
    assert_eq!(renderer.draw_frame(&packet).unwrap(), FrameOutcome::Rendered);
    renderer.resized(1920, 1080).expect("resize between frames");
}
