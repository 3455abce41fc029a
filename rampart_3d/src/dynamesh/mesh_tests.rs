use super::*;
use crate::dynamesh::material::{TextureRef, VertexMaterial};
use crate::gpu::mock_device::MockDevice;
use crate::gpu::SurfaceFormat;

fn add_vertex(mesh: &mut DynamicMesh, position: Vec3) {
    mesh.begin_vertex();
    mesh.location(position);
    mesh.end_vertex();
}

fn quad_strip(mesh: &mut DynamicMesh) {
    mesh.begin_tri_strip();
    add_vertex(mesh, Vec3::new(0.0, 0.0, 0.0));
    add_vertex(mesh, Vec3::new(1.0, 0.0, 0.0));
    add_vertex(mesh, Vec3::new(0.0, 1.0, 0.0));
    add_vertex(mesh, Vec3::new(1.0, 1.0, 0.0));
}

fn texture_key(mesh: &DynamicMesh, name: &str) -> crate::dynamesh::TextureKey {
    mesh.materials().lock().unwrap().add_texture(TextureRef {
        name: name.to_string(),
        format: SurfaceFormat::A8R8G8B8,
    })
}

// ============================================================================
// Triangle emission
// ============================================================================

#[test]
fn test_no_polygon_before_three_vertices() {
    let mut mesh = DynamicMesh::new(16, 16);
    mesh.begin_tri_strip();
    add_vertex(&mut mesh, Vec3::ZERO);
    add_vertex(&mut mesh, Vec3::X);

    assert_eq!(mesh.vertex_count(), 2);
    assert_eq!(mesh.polygon_count(), 0);
}

#[test]
fn test_strip_emission_with_alternating_winding() {
    let mut mesh = DynamicMesh::new(16, 16);
    quad_strip(&mut mesh);

    assert_eq!(mesh.vertex_count(), 4);
    assert_eq!(mesh.polygon_count(), 2);
    // Second triangle swaps its last two indices to preserve facing
    assert_eq!(mesh.indices(), &[0, 1, 2, 1, 3, 2]);
}

#[test]
fn test_fan_emission_pivots_on_first_vertex() {
    let mut mesh = DynamicMesh::new(16, 16);
    mesh.begin_tri_fan();
    add_vertex(&mut mesh, Vec3::ZERO);
    add_vertex(&mut mesh, Vec3::X);
    add_vertex(&mut mesh, Vec3::Y);
    add_vertex(&mut mesh, Vec3::new(1.0, 1.0, 0.0));
    add_vertex(&mut mesh, Vec3::new(2.0, 1.0, 0.0));

    assert_eq!(mesh.polygon_count(), 3);
    assert_eq!(mesh.indices(), &[0, 1, 2, 0, 2, 3, 0, 3, 4]);
}

#[test]
fn test_second_fan_run_pivots_on_its_own_first_vertex() {
    let mut mesh = DynamicMesh::new(16, 16);
    mesh.begin_tri_fan();
    add_vertex(&mut mesh, Vec3::ZERO);
    add_vertex(&mut mesh, Vec3::X);
    add_vertex(&mut mesh, Vec3::Y);

    mesh.begin_tri_fan();
    add_vertex(&mut mesh, Vec3::new(5.0, 5.0, 0.0));
    add_vertex(&mut mesh, Vec3::new(6.0, 5.0, 0.0));
    add_vertex(&mut mesh, Vec3::new(5.0, 6.0, 0.0));

    assert_eq!(mesh.polygon_count(), 2);
    assert_eq!(mesh.indices(), &[0, 1, 2, 3, 4, 5]);
}

#[test]
fn test_staged_attributes_persist_between_vertices() {
    let mut mesh = DynamicMesh::new(16, 16);
    mesh.begin_tri_strip();

    mesh.begin_vertex();
    mesh.location(Vec3::ZERO);
    mesh.normal(Vec3::X);
    mesh.uv(Vec2::new(0.5, 0.5));
    mesh.end_vertex();

    // Location changes, normal and uv carry over
    add_vertex(&mut mesh, Vec3::X);
    add_vertex(&mut mesh, Vec3::Y);

    assert_eq!(mesh.vertex_count(), 3);
    assert_eq!(mesh.polygon_count(), 1);
}

#[test]
#[should_panic(expected = "vertex capacity")]
fn test_vertex_capacity_overrun_asserts() {
    let mut mesh = DynamicMesh::new(16, 2);
    mesh.begin_tri_strip();
    add_vertex(&mut mesh, Vec3::ZERO);
    add_vertex(&mut mesh, Vec3::X);
    add_vertex(&mut mesh, Vec3::Y);
}

#[test]
#[should_panic(expected = "polygon capacity")]
fn test_polygon_capacity_overrun_asserts() {
    let mut mesh = DynamicMesh::new(1, 16);
    quad_strip(&mut mesh);
}

// ============================================================================
// Geometry edits
// ============================================================================

#[test]
fn test_translate_vertices() {
    let mut mesh = DynamicMesh::new(16, 16);
    quad_strip(&mut mesh);

    mesh.translate_vertices(Vec3::new(10.0, 0.0, 0.0));
    assert_eq!(mesh.vertex(0), Some(Vec3::new(10.0, 0.0, 0.0)));
    assert_eq!(mesh.vertex(1), Some(Vec3::new(11.0, 0.0, 0.0)));
}

#[test]
fn test_move_vertex() {
    let mut mesh = DynamicMesh::new(16, 16);
    quad_strip(&mut mesh);

    mesh.move_vertex(2, Vec3::new(9.0, 9.0, 9.0));
    assert_eq!(mesh.vertex(2), Some(Vec3::new(9.0, 9.0, 9.0)));
    // Out-of-range moves are ignored
    mesh.move_vertex(99, Vec3::ZERO);
}

// ============================================================================
// Texture promotion (per polygon)
// ============================================================================

#[test]
fn test_first_texture_stays_uniform() {
    let mut mesh = DynamicMesh::new(16, 16);
    let smoke = texture_key(&mesh, "smoke");

    quad_strip(&mut mesh);
    mesh.set_texture(0, smoke);

    assert!(!mesh.is_multi_texture(0));
    // Uniform texture applies to every polygon, including earlier ones
    assert_eq!(mesh.texture_for_polygon(0, 0), Some(smoke));
    assert_eq!(mesh.texture_for_polygon(0, 1), Some(smoke));
}

#[test]
fn test_same_texture_short_circuits() {
    let mut mesh = DynamicMesh::new(16, 16);
    let smoke = texture_key(&mesh, "smoke");

    mesh.set_texture(0, smoke);
    mesh.set_texture(0, smoke);

    assert!(!mesh.is_multi_texture(0));
}

#[test]
fn test_second_distinct_texture_promotes_and_backfills() {
    let mut mesh = DynamicMesh::new(16, 16);
    let smoke = texture_key(&mesh, "smoke");
    let fire = texture_key(&mesh, "fire");

    mesh.set_texture(0, smoke);
    quad_strip(&mut mesh); // two polygons under "smoke"

    mesh.set_texture(0, fire);
    assert!(mesh.is_multi_texture(0));

    // One more triangle under "fire"
    add_vertex(&mut mesh, Vec3::new(2.0, 0.0, 0.0));

    assert_eq!(mesh.polygon_count(), 3);
    assert_eq!(mesh.texture_for_polygon(0, 0), Some(smoke));
    assert_eq!(mesh.texture_for_polygon(0, 1), Some(smoke));
    assert_eq!(mesh.texture_for_polygon(0, 2), Some(fire));
}

#[test]
fn test_promotion_is_one_way() {
    let mut mesh = DynamicMesh::new(16, 16);
    let smoke = texture_key(&mesh, "smoke");
    let fire = texture_key(&mesh, "fire");

    mesh.set_texture(0, smoke);
    quad_strip(&mut mesh);
    mesh.set_texture(0, fire);
    assert!(mesh.is_multi_texture(0));

    // Setting back to the original value stays per-polygon
    mesh.set_texture(0, smoke);
    assert!(mesh.is_multi_texture(0));
}

#[test]
fn test_texture_passes_are_independent() {
    let mut mesh = DynamicMesh::new(16, 16);
    let smoke = texture_key(&mesh, "smoke");
    let fire = texture_key(&mesh, "fire");

    quad_strip(&mut mesh);
    mesh.set_texture(0, smoke);
    mesh.set_texture(0, fire);
    mesh.set_texture(1, smoke);

    assert!(mesh.is_multi_texture(0));
    assert!(!mesh.is_multi_texture(1));
}

// ============================================================================
// Vertex material promotion (per vertex)
// ============================================================================

#[test]
fn test_vertex_material_promotion() {
    let mut mesh = DynamicMesh::new(16, 16);
    let (flat, shiny) = {
        let materials = mesh.materials();
        let mut table = materials.lock().unwrap();
        (
            table.add_material(VertexMaterial::with_diffuse("flat", Vec4::ONE)),
            table.add_material(VertexMaterial::with_diffuse("shiny", Vec4::new(1.0, 0.0, 0.0, 1.0))),
        )
    };

    mesh.set_vertex_material(0, flat);
    mesh.begin_tri_strip();
    add_vertex(&mut mesh, Vec3::ZERO);
    add_vertex(&mut mesh, Vec3::X);
    assert!(!mesh.is_multi_material(0));

    mesh.set_vertex_material(0, shiny);
    assert!(mesh.is_multi_material(0));
    add_vertex(&mut mesh, Vec3::Y);

    assert_eq!(mesh.material_for_vertex(0, 0), Some(flat));
    assert_eq!(mesh.material_for_vertex(0, 1), Some(flat));
    assert_eq!(mesh.material_for_vertex(0, 2), Some(shiny));
}

// ============================================================================
// Color promotion (per vertex)
// ============================================================================

#[test]
fn test_default_color_is_uniform_white() {
    let mut mesh = DynamicMesh::new(16, 16);
    quad_strip(&mut mesh);

    assert!(!mesh.is_multi_color(0));
    assert_eq!(mesh.color_for_vertex(0, 2), Vec4::ONE);
}

#[test]
fn test_distinct_color_promotes_channel() {
    let mut mesh = DynamicMesh::new(16, 16);
    mesh.begin_tri_strip();
    add_vertex(&mut mesh, Vec3::ZERO);
    add_vertex(&mut mesh, Vec3::X);

    let red = Vec4::new(1.0, 0.0, 0.0, 1.0);
    mesh.begin_vertex();
    mesh.location(Vec3::Y);
    mesh.color(0, red);
    mesh.end_vertex();

    assert!(mesh.is_multi_color(0));
    // Earlier vertices keep the old uniform white
    assert_eq!(mesh.color_for_vertex(0, 0), Vec4::ONE);
    assert_eq!(mesh.color_for_vertex(0, 1), Vec4::ONE);
    assert_eq!(mesh.color_for_vertex(0, 2), red);
    // The other channel is untouched
    assert!(!mesh.is_multi_color(1));
}

// ============================================================================
// Reset
// ============================================================================

#[test]
fn test_reset_restores_uniform_state() {
    let mut mesh = DynamicMesh::new(16, 16);
    let smoke = texture_key(&mesh, "smoke");
    let fire = texture_key(&mesh, "fire");

    mesh.set_texture(0, smoke);
    quad_strip(&mut mesh);
    mesh.set_texture(0, fire);

    mesh.reset();

    assert_eq!(mesh.vertex_count(), 0);
    assert_eq!(mesh.polygon_count(), 0);
    assert!(!mesh.is_multi_texture(0));
    assert_eq!(mesh.texture_for_polygon(0, 0), None);
    // Fresh material table
    assert_eq!(mesh.materials().lock().unwrap().texture_count(), 0);
}

#[test]
fn test_reset_is_idempotent_and_mesh_reusable() {
    let mut mesh = DynamicMesh::new(16, 16);
    quad_strip(&mut mesh);

    mesh.reset();
    mesh.reset();

    quad_strip(&mut mesh);
    assert_eq!(mesh.polygon_count(), 2);
    assert_eq!(mesh.indices(), &[0, 1, 2, 1, 3, 2]);
}

// ============================================================================
// Render
// ============================================================================

#[test]
fn test_render_creates_fresh_buffers_and_one_submit() {
    let mut device = MockDevice::new();
    let mut mesh = DynamicMesh::new(16, 16);
    quad_strip(&mut mesh);

    mesh.render(&mut device).unwrap();

    let commands = device.recorded_commands();
    assert_eq!(commands.len(), 3);
    assert!(commands[0].starts_with("create_buffer vtx 4x"));
    assert_eq!(commands[1], "create_buffer idx 6x2");
    assert_eq!(commands[2], "submit 6");
}

#[test]
fn test_render_twice_recreates_buffers() {
    let mut device = MockDevice::new();
    let mut mesh = DynamicMesh::new(16, 16);
    quad_strip(&mut mesh);

    mesh.render(&mut device).unwrap();
    mesh.render(&mut device).unwrap();

    // No caching: both frames create both buffers
    assert_eq!(device.recorded_commands().len(), 6);
}

#[test]
fn test_render_empty_mesh_is_a_no_op() {
    let mut device = MockDevice::new();
    let mut mesh = DynamicMesh::new(16, 16);

    mesh.render(&mut device).unwrap();
    assert!(device.recorded_commands().is_empty());
}

#[test]
fn test_render_buffer_failure_propagates() {
    let mut device = MockDevice::new();
    device.fail_next_create = true;
    let mut mesh = DynamicMesh::new(16, 16);
    quad_strip(&mut mesh);

    assert!(mesh.render(&mut device).is_err());
}
