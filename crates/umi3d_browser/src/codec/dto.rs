//! Collaboration DTO wire forms
//!
//! These records are exchanged with the collaboration server's networking
//! layer. Field order is the wire order.

use super::container::ByteContainer;
use super::error::CodecResult;
use super::field::WireCodec;
use crate::foundation::math::Vec4;

/// Implements [`WireCodec`] for a struct by writing and reading its fields
/// in the listed order
macro_rules! wire_record {
    ($record:ident { $($field:ident),* $(,)? }) => {
        impl WireCodec for $record {
            const COUNTABLE: bool = true;

            fn write(&self, out: &mut Vec<u8>) {
                $( self.$field.write(out); )*
            }

            fn read(container: &mut ByteContainer<'_>) -> CodecResult<Self> {
                Ok(Self {
                    $( $field: WireCodec::read(container)?, )*
                })
            }
        }
    };
}

/// Camera properties a user sends on join
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UserCameraDto {
    /// User scale
    pub scale: f32,
    /// Projection matrix, column-major
    pub projection: [f32; 16],
    /// Bone the camera is attached to
    pub bone_type: u32,
}

wire_record!(UserCameraDto { scale, projection, bone_type });

/// Rotation of one avatar bone
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoneDto {
    /// Bone identifier
    pub bone_type: u32,
    /// Rotation as raw (x, y, z, w)
    pub rotation: Vec4,
}

wire_record!(BoneDto { bone_type, rotation });

/// Quality metrics of a downloadable file
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AssetMetricDto {
    /// Resolution tier
    pub resolution: i32,
    /// Size in megabytes
    pub size: f32,
}

wire_record!(AssetMetricDto { resolution, size });

/// One downloadable variant of a resource
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FileDto {
    /// Download URL
    pub url: String,
    /// Asset format (e.g. "gltf")
    pub format: String,
    /// File extension including the dot
    pub extension: String,
    /// Quality metrics
    pub metrics: AssetMetricDto,
    /// Path inside an asset bundle, empty when not bundled
    pub path_if_in_bundle: String,
    /// Library the file belongs to, empty when none
    pub library_key: String,
}

wire_record!(FileDto {
    url,
    format,
    extension,
    metrics,
    path_if_in_bundle,
    library_key,
});

/// A resource available in several variants
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceDto {
    /// Variants, best first
    pub variants: Vec<FileDto>,
}

wire_record!(ResourceDto { variants });

/// PBR material description
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MaterialDto {
    /// Material id
    pub id: u64,
    /// Display name
    pub name: String,
    /// Base color as RGBA
    pub base_color: Vec4,
    /// Metallic factor
    pub metallic: f32,
    /// Roughness factor
    pub roughness: f32,
    /// Albedo texture
    pub albedo: ResourceDto,
}

wire_record!(MaterialDto {
    id,
    name,
    base_color,
    metallic,
    roughness,
    albedo,
});
