/// Pixel format mapping between the engine's surface formats and the
/// formats a render device understands.
///
/// The engine enumeration covers every format legacy assets can carry,
/// including palettized and bump-map formats no modern device supports.
/// The mapping is total: unsupported entries map to the Unknown sentinel
/// rather than being absent, so a bad asset degrades instead of crashing.

/// Engine-internal surface formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(non_camel_case_types)]
pub enum SurfaceFormat {
    Unknown,
    R8G8B8,
    A8R8G8B8,
    X8R8G8B8,
    R5G6B5,
    X1R5G5B5,
    A1R5G5B5,
    A4R4G4B4,
    R3G3B2,
    A8,
    A8R3G3B2,
    X4R4G4B4,
    A8P8,
    P8,
    L8,
    A8L8,
    A4L4,
    V8U8,
    L6V5U5,
    X8L8V8U8,
    DXT1,
    DXT2,
    DXT3,
    DXT4,
    DXT5,
}

/// Device-side texture formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(non_camel_case_types)]
pub enum DeviceFormat {
    /// Sentinel for formats the device cannot represent
    Unknown,
    RGB8,
    BGRA8,
    R5G6B5,
    RGB5A1,
    RGBA4,
    A8,
    R8,
    RG8,
    RG8S,
    BC1,
    BC2,
    BC3,
}

impl SurfaceFormat {
    /// Map to the closest device format.
    ///
    /// Exhaustive on purpose: adding a surface format without deciding its
    /// device mapping is a compile error.
    pub fn to_device(self) -> DeviceFormat {
        match self {
            SurfaceFormat::Unknown => DeviceFormat::Unknown,
            SurfaceFormat::R8G8B8 => DeviceFormat::RGB8,
            SurfaceFormat::A8R8G8B8 => DeviceFormat::BGRA8,
            // No alpha plane device-side; the X byte rides along as opaque alpha
            SurfaceFormat::X8R8G8B8 => DeviceFormat::BGRA8,
            SurfaceFormat::R5G6B5 => DeviceFormat::R5G6B5,
            SurfaceFormat::X1R5G5B5 => DeviceFormat::RGB5A1,
            SurfaceFormat::A1R5G5B5 => DeviceFormat::RGB5A1,
            SurfaceFormat::A4R4G4B4 => DeviceFormat::RGBA4,
            SurfaceFormat::R3G3B2 => DeviceFormat::Unknown,
            SurfaceFormat::A8 => DeviceFormat::A8,
            SurfaceFormat::A8R3G3B2 => DeviceFormat::Unknown,
            SurfaceFormat::X4R4G4B4 => DeviceFormat::RGBA4,
            SurfaceFormat::A8P8 => DeviceFormat::Unknown,
            SurfaceFormat::P8 => DeviceFormat::Unknown,
            SurfaceFormat::L8 => DeviceFormat::R8,
            SurfaceFormat::A8L8 => DeviceFormat::RG8,
            SurfaceFormat::A4L4 => DeviceFormat::Unknown,
            SurfaceFormat::V8U8 => DeviceFormat::RG8S,
            SurfaceFormat::L6V5U5 => DeviceFormat::Unknown,
            SurfaceFormat::X8L8V8U8 => DeviceFormat::Unknown,
            SurfaceFormat::DXT1 => DeviceFormat::BC1,
            SurfaceFormat::DXT2 => DeviceFormat::BC2,
            SurfaceFormat::DXT3 => DeviceFormat::BC2,
            SurfaceFormat::DXT4 => DeviceFormat::BC3,
            SurfaceFormat::DXT5 => DeviceFormat::BC3,
        }
    }

    /// Bytes per pixel for uncompressed formats, 0 for block-compressed
    /// and unknown formats.
    pub fn bytes_per_pixel(self) -> u32 {
        match self {
            SurfaceFormat::Unknown => 0,
            SurfaceFormat::R8G8B8 => 3,
            SurfaceFormat::A8R8G8B8 | SurfaceFormat::X8R8G8B8 | SurfaceFormat::X8L8V8U8 => 4,
            SurfaceFormat::R5G6B5
            | SurfaceFormat::X1R5G5B5
            | SurfaceFormat::A1R5G5B5
            | SurfaceFormat::A4R4G4B4
            | SurfaceFormat::X4R4G4B4
            | SurfaceFormat::A8P8
            | SurfaceFormat::A8L8
            | SurfaceFormat::V8U8
            | SurfaceFormat::L6V5U5 => 2,
            SurfaceFormat::R3G3B2
            | SurfaceFormat::A8
            | SurfaceFormat::P8
            | SurfaceFormat::L8
            | SurfaceFormat::A4L4 => 1,
            SurfaceFormat::A8R3G3B2 => 2,
            SurfaceFormat::DXT1
            | SurfaceFormat::DXT2
            | SurfaceFormat::DXT3
            | SurfaceFormat::DXT4
            | SurfaceFormat::DXT5 => 0,
        }
    }

    /// All surface formats, for table-driven tests
    pub const ALL: [SurfaceFormat; 25] = [
        SurfaceFormat::Unknown,
        SurfaceFormat::R8G8B8,
        SurfaceFormat::A8R8G8B8,
        SurfaceFormat::X8R8G8B8,
        SurfaceFormat::R5G6B5,
        SurfaceFormat::X1R5G5B5,
        SurfaceFormat::A1R5G5B5,
        SurfaceFormat::A4R4G4B4,
        SurfaceFormat::R3G3B2,
        SurfaceFormat::A8,
        SurfaceFormat::A8R3G3B2,
        SurfaceFormat::X4R4G4B4,
        SurfaceFormat::A8P8,
        SurfaceFormat::P8,
        SurfaceFormat::L8,
        SurfaceFormat::A8L8,
        SurfaceFormat::A4L4,
        SurfaceFormat::V8U8,
        SurfaceFormat::L6V5U5,
        SurfaceFormat::X8L8V8U8,
        SurfaceFormat::DXT1,
        SurfaceFormat::DXT2,
        SurfaceFormat::DXT3,
        SurfaceFormat::DXT4,
        SurfaceFormat::DXT5,
    ];
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "format_tests.rs"]
mod tests;
