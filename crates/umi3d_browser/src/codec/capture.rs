//! Full-body movement capture records
//!
//! Layout (no magic number, no version tag): the user's body settings, the
//! recording rate, then every key frame.

use super::container::ByteContainer;
use super::error::CodecResult;
use super::field::{to_bytes, Dictionary, WireCodec};
use crate::foundation::math::{Quat, Vec3, Vec4};
use std::path::Path;

/// Body calibration captured alongside a recording
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserSettings {
    /// Rotation offset per joint id
    pub joint_rotation_offsets: Dictionary<i32, Quat>,
    /// Bone length per bone id
    pub bone_lengths: Dictionary<i32, f32>,
    /// Bone scale per bone id
    pub bone_scales: Dictionary<i32, f32>,
    /// Standing height in metres
    pub user_height: f32,
    /// Fingertip-to-fingertip span in metres
    pub arm_span: f32,
}

impl WireCodec for UserSettings {
    const COUNTABLE: bool = true;

    fn write(&self, out: &mut Vec<u8>) {
        self.joint_rotation_offsets.write(out);
        self.bone_lengths.write(out);
        self.bone_scales.write(out);
        self.user_height.write(out);
        self.arm_span.write(out);
    }

    fn read(container: &mut ByteContainer<'_>) -> CodecResult<Self> {
        Ok(Self {
            joint_rotation_offsets: WireCodec::read(container)?,
            bone_lengths: WireCodec::read(container)?,
            bone_scales: WireCodec::read(container)?,
            user_height: f32::read(container)?,
            arm_span: f32::read(container)?,
        })
    }
}

/// One tracked source sample inside a key frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Entry {
    /// Tracked source (bone or device) id
    pub source: i32,
    /// Position in tracking space
    pub position: Vec3,
    /// Rotation as raw (x, y, z, w)
    pub rotation: Vec4,
}

impl WireCodec for Entry {
    const COUNTABLE: bool = true;

    fn write(&self, out: &mut Vec<u8>) {
        self.source.write(out);
        self.position.write(out);
        self.rotation.write(out);
    }

    fn read(container: &mut ByteContainer<'_>) -> CodecResult<Self> {
        Ok(Self {
            source: i32::read(container)?,
            position: Vec3::read(container)?,
            rotation: Vec4::read(container)?,
        })
    }
}

/// All samples recorded at one instant
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeyFrame {
    /// Samples, one per tracked source
    pub entries: Vec<Entry>,
}

impl WireCodec for KeyFrame {
    const COUNTABLE: bool = true;

    fn write(&self, out: &mut Vec<u8>) {
        self.entries.write(out);
    }

    fn read(container: &mut ByteContainer<'_>) -> CodecResult<Self> {
        Ok(Self {
            entries: WireCodec::read(container)?,
        })
    }
}

/// A complete recording
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MovementCapture {
    /// Calibration of the recorded user
    pub settings: UserSettings,
    /// Key frames per second
    pub record_fps: f32,
    /// Key frames in playback order
    pub key_frames: Vec<KeyFrame>,
}

impl WireCodec for MovementCapture {
    const COUNTABLE: bool = true;

    fn write(&self, out: &mut Vec<u8>) {
        self.settings.write(out);
        self.record_fps.write(out);
        self.key_frames.write(out);
    }

    fn read(container: &mut ByteContainer<'_>) -> CodecResult<Self> {
        Ok(Self {
            settings: UserSettings::read(container)?,
            record_fps: f32::read(container)?,
            key_frames: WireCodec::read(container)?,
        })
    }
}

impl MovementCapture {
    /// Playback length in seconds; zero when the rate is not positive
    pub fn duration(&self) -> f32 {
        if self.record_fps > 0.0 {
            self.key_frames.len() as f32 / self.record_fps
        } else {
            0.0
        }
    }

    /// Write the recording to a file
    pub fn save(&self, path: impl AsRef<Path>) -> CodecResult<()> {
        std::fs::write(path, to_bytes(self))?;
        Ok(())
    }

    /// Read a recording from a file
    pub fn load(path: impl AsRef<Path>) -> CodecResult<Self> {
        let bytes = std::fs::read(path)?;
        let capture = Self::read(&mut ByteContainer::new(&bytes))?;
        log::debug!(
            "Loaded movement capture: {} key frames at {} fps",
            capture.key_frames.len(),
            capture.record_fps
        );
        Ok(capture)
    }
}
