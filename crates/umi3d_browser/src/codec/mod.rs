//! Positional wire codec
//!
//! Maps typed records to and from flat byte streams. There is no framing,
//! versioning or checksum: both sides must agree on field order, and a short
//! buffer is reported as [`CodecError::Truncated`].
//!
//! ```
//! use umi3d_browser::codec::{from_bytes, to_bytes, BoneDto};
//! use umi3d_browser::foundation::math::Vec4;
//!
//! let bone = BoneDto { bone_type: 2, rotation: Vec4::new(0.0, 0.0, 0.0, 1.0) };
//! let bytes = to_bytes(&bone);
//! assert_eq!(from_bytes::<BoneDto>(&bytes).unwrap(), bone);
//! ```

pub mod container;
pub mod error;
pub mod field;
pub mod capture;
pub mod dto;

pub use container::ByteContainer;
pub use error::{CodecError, CodecResult};
pub use field::{from_bytes, is_countable, to_bytes, Dictionary, WireCodec};
pub use capture::{Entry, KeyFrame, MovementCapture, UserSettings};
pub use dto::{AssetMetricDto, BoneDto, FileDto, MaterialDto, ResourceDto, UserCameraDto};
