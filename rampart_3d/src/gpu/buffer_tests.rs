use super::*;
use crate::gpu::mock_device::MockDevice;
use crate::gpu::device::VertexLayout;

fn test_vertices(count: usize) -> Vec<MeshVertex> {
    (0..count)
        .map(|i| MeshVertex {
            position: [i as f32, 0.0, 0.0],
            normal: [0.0, 0.0, 1.0],
            uv: [0.0, 0.0],
            color: [255, 255, 255, 255],
        })
        .collect()
}

// ============================================================================
// Vertex buffer lifecycle
// ============================================================================

#[test]
fn test_vertex_buffer_starts_invalid() {
    let vb = VertexBuffer::new();
    assert!(!vb.is_valid());
    assert_eq!(vb.element_count(), 0);
}

#[test]
fn test_vertex_buffer_create() {
    let mut device = MockDevice::new();
    let mut vb = VertexBuffer::new();

    vb.create(&mut device, VertexLayout::mesh(), &test_vertices(4), false)
        .unwrap();

    assert!(vb.is_valid());
    assert_eq!(vb.element_count(), 4);
    let commands = device.recorded_commands();
    assert_eq!(commands.len(), 1);
    assert!(commands[0].starts_with("create_buffer vtx 4x"));
}

#[test]
fn test_vertex_buffer_create_replaces_previous() {
    let mut device = MockDevice::new();
    let mut vb = VertexBuffer::new();

    vb.create(&mut device, VertexLayout::mesh(), &test_vertices(4), false)
        .unwrap();
    vb.create(&mut device, VertexLayout::mesh(), &test_vertices(8), false)
        .unwrap();

    assert!(vb.is_valid());
    assert_eq!(vb.element_count(), 8);
    assert_eq!(device.recorded_commands().len(), 2);
}

#[test]
fn test_vertex_buffer_create_empty_fails() {
    let mut device = MockDevice::new();
    let mut vb = VertexBuffer::new();
    assert!(vb.create(&mut device, VertexLayout::mesh(), &[], false).is_err());
    assert!(!vb.is_valid());
}

#[test]
fn test_vertex_buffer_create_failure_propagates() {
    let mut device = MockDevice::new();
    device.fail_next_create = true;
    let mut vb = VertexBuffer::new();

    let result = vb.create(&mut device, VertexLayout::mesh(), &test_vertices(4), false);
    assert!(result.is_err());
    assert!(!vb.is_valid());
}

// ============================================================================
// Vertex buffer updates
// ============================================================================

#[test]
fn test_vertex_buffer_update_dynamic() {
    let mut device = MockDevice::new();
    let mut vb = VertexBuffer::new();
    vb.create(&mut device, VertexLayout::mesh(), &test_vertices(4), true)
        .unwrap();

    assert!(vb.update(0, &test_vertices(2)).is_ok());
    assert!(vb.update(2, &test_vertices(2)).is_ok());
}

#[test]
fn test_vertex_buffer_update_static_fails() {
    let mut device = MockDevice::new();
    let mut vb = VertexBuffer::new();
    vb.create(&mut device, VertexLayout::mesh(), &test_vertices(4), false)
        .unwrap();

    assert!(vb.update(0, &test_vertices(2)).is_err());
}

#[test]
fn test_vertex_buffer_update_after_destroy_fails() {
    let mut device = MockDevice::new();
    let mut vb = VertexBuffer::new();
    vb.create(&mut device, VertexLayout::mesh(), &test_vertices(4), true)
        .unwrap();

    vb.destroy();
    assert!(!vb.is_valid());
    assert!(vb.update(0, &test_vertices(1)).is_err());
}

#[test]
fn test_vertex_buffer_update_out_of_range_fails() {
    let mut device = MockDevice::new();
    let mut vb = VertexBuffer::new();
    vb.create(&mut device, VertexLayout::mesh(), &test_vertices(4), true)
        .unwrap();

    assert!(vb.update(3, &test_vertices(2)).is_err());
}

#[test]
fn test_vertex_buffer_destroy_is_idempotent() {
    let mut device = MockDevice::new();
    let mut vb = VertexBuffer::new();
    vb.create(&mut device, VertexLayout::mesh(), &test_vertices(4), true)
        .unwrap();

    vb.destroy();
    vb.destroy();
    assert!(!vb.is_valid());
}

// ============================================================================
// Index buffer
// ============================================================================

#[test]
fn test_index_buffer_create_and_update() {
    let mut device = MockDevice::new();
    let mut ib = IndexBuffer::new();

    ib.create(&mut device, &[0, 1, 2, 1, 3, 2], true).unwrap();
    assert!(ib.is_valid());
    assert_eq!(ib.element_count(), 6);

    assert!(ib.update(0, &[2, 1, 0]).is_ok());
    assert!(ib.update(5, &[7, 8]).is_err());

    let commands = device.recorded_commands();
    assert_eq!(commands[0], "create_buffer idx 6x2");
}

#[test]
fn test_index_buffer_update_static_fails() {
    let mut device = MockDevice::new();
    let mut ib = IndexBuffer::new();
    ib.create(&mut device, &[0, 1, 2], false).unwrap();

    assert!(ib.update(0, &[0]).is_err());
}

#[test]
fn test_index_buffer_destroy() {
    let mut device = MockDevice::new();
    let mut ib = IndexBuffer::new();
    ib.create(&mut device, &[0, 1, 2], true).unwrap();

    ib.destroy();
    assert!(!ib.is_valid());
    assert!(ib.update(0, &[0]).is_err());
}

// ============================================================================
// Mesh vertex layout
// ============================================================================

#[test]
fn test_mesh_vertex_stride_matches_layout() {
    assert_eq!(MeshVertex::STRIDE, VertexLayout::mesh().stride());
    assert_eq!(MeshVertex::STRIDE, 36);
}
