//! Movement capture files on disk

use std::path::PathBuf;
use umi3d_browser::codec::{CodecError, Entry, KeyFrame, MovementCapture, UserSettings};
use umi3d_browser::foundation::math::{Quat, Vec3, Vec4};

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("umi3d_browser_{}_{name}", std::process::id()))
}

fn recording() -> MovementCapture {
    MovementCapture {
        settings: UserSettings {
            joint_rotation_offsets: vec![
                (12, Quat::from_euler_angles(0.1, 0.2, 0.3)),
                (3, Quat::identity()),
            ],
            bone_lengths: vec![(7, 0.31), (2, 0.45)],
            bone_scales: vec![],
            user_height: 1.65,
            arm_span: 1.7,
        },
        record_fps: 60.0,
        key_frames: (0..120)
            .map(|i| KeyFrame {
                entries: (0..(i % 4))
                    .map(|source| Entry {
                        source,
                        position: Vec3::new(i as f32 * 0.01, 1.0, -0.5),
                        rotation: Vec4::new(0.0, 0.0, 0.0, 1.0),
                    })
                    .collect(),
            })
            .collect(),
    }
}

#[test]
fn saved_capture_loads_identically() {
    let path = temp_path("round_trip.bin");
    let capture = recording();

    capture.save(&path).unwrap();
    let loaded = MovementCapture::load(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(loaded, capture);
    // Dictionaries keep insertion order, not key order
    assert_eq!(loaded.settings.bone_lengths[0].0, 7);
    assert!((loaded.duration() - 2.0).abs() < 1e-6);
}

#[test]
fn truncated_file_fails_to_load() {
    let path = temp_path("truncated.bin");
    recording().save(&path).unwrap();

    let bytes = std::fs::read(&path).unwrap();
    std::fs::write(&path, &bytes[..bytes.len() - 3]).unwrap();
    let result = MovementCapture::load(&path);
    std::fs::remove_file(&path).unwrap();

    assert!(matches!(result, Err(CodecError::Truncated { .. })));
}

#[test]
fn missing_file_is_an_io_error() {
    let result = MovementCapture::load(temp_path("does_not_exist.bin"));
    assert!(matches!(result, Err(CodecError::Io(_))));
}
