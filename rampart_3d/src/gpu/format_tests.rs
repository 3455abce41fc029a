use super::*;

// ============================================================================
// Mapping totality
// ============================================================================

#[test]
fn test_every_surface_format_maps() {
    // Every engine format must resolve to some device format,
    // even if that is the Unknown sentinel.
    for format in SurfaceFormat::ALL {
        let _ = format.to_device();
    }
}

#[test]
fn test_unknown_maps_to_sentinel() {
    assert_eq!(SurfaceFormat::Unknown.to_device(), DeviceFormat::Unknown);
}

#[test]
fn test_unsupported_formats_map_to_sentinel() {
    // Palettized and exotic bump-map formats have no device equivalent
    assert_eq!(SurfaceFormat::P8.to_device(), DeviceFormat::Unknown);
    assert_eq!(SurfaceFormat::A8P8.to_device(), DeviceFormat::Unknown);
    assert_eq!(SurfaceFormat::R3G3B2.to_device(), DeviceFormat::Unknown);
    assert_eq!(SurfaceFormat::A8R3G3B2.to_device(), DeviceFormat::Unknown);
    assert_eq!(SurfaceFormat::A4L4.to_device(), DeviceFormat::Unknown);
    assert_eq!(SurfaceFormat::L6V5U5.to_device(), DeviceFormat::Unknown);
    assert_eq!(SurfaceFormat::X8L8V8U8.to_device(), DeviceFormat::Unknown);
}

#[test]
fn test_common_format_mappings() {
    assert_eq!(SurfaceFormat::A8R8G8B8.to_device(), DeviceFormat::BGRA8);
    assert_eq!(SurfaceFormat::X8R8G8B8.to_device(), DeviceFormat::BGRA8);
    assert_eq!(SurfaceFormat::R8G8B8.to_device(), DeviceFormat::RGB8);
    assert_eq!(SurfaceFormat::R5G6B5.to_device(), DeviceFormat::R5G6B5);
    assert_eq!(SurfaceFormat::L8.to_device(), DeviceFormat::R8);
}

#[test]
fn test_compressed_format_mappings() {
    assert_eq!(SurfaceFormat::DXT1.to_device(), DeviceFormat::BC1);
    assert_eq!(SurfaceFormat::DXT2.to_device(), DeviceFormat::BC2);
    assert_eq!(SurfaceFormat::DXT3.to_device(), DeviceFormat::BC2);
    assert_eq!(SurfaceFormat::DXT4.to_device(), DeviceFormat::BC3);
    assert_eq!(SurfaceFormat::DXT5.to_device(), DeviceFormat::BC3);
}

// ============================================================================
// Bytes per pixel
// ============================================================================

#[test]
fn test_bytes_per_pixel() {
    assert_eq!(SurfaceFormat::A8R8G8B8.bytes_per_pixel(), 4);
    assert_eq!(SurfaceFormat::X8R8G8B8.bytes_per_pixel(), 4);
    assert_eq!(SurfaceFormat::R8G8B8.bytes_per_pixel(), 3);
    assert_eq!(SurfaceFormat::R5G6B5.bytes_per_pixel(), 2);
    assert_eq!(SurfaceFormat::L8.bytes_per_pixel(), 1);
    assert_eq!(SurfaceFormat::Unknown.bytes_per_pixel(), 0);
    // Block-compressed formats have no per-pixel byte size
    assert_eq!(SurfaceFormat::DXT1.bytes_per_pixel(), 0);
}
