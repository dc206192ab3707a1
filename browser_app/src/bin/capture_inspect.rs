//! Movement capture inspector
//!
//! Decodes a movement-capture file and prints a summary.
//!
//! Usage:
//!   capture_inspect <capture.bin>
//!   capture_inspect --demo <capture.bin>   (write a synthetic capture first)

use std::collections::BTreeMap;
use std::env;
use umi3d_browser::codec::{Entry, KeyFrame, MovementCapture, UserSettings};
use umi3d_browser::foundation::logging;
use umi3d_browser::foundation::math::{Quat, Vec3, Vec4};

const HEAD: i32 = 0;
const LEFT_HAND: i32 = 1;
const RIGHT_HAND: i32 = 2;

/// Two seconds of a user waving the right hand
fn synthetic_capture() -> MovementCapture {
    let record_fps = 30.0;
    let key_frames = (0..60)
        .map(|frame| {
            let t = frame as f32 / record_fps;
            let wave = (t * std::f32::consts::TAU).sin() * 0.2;
            KeyFrame {
                entries: vec![
                    Entry {
                        source: HEAD,
                        position: Vec3::new(0.0, 1.7, 0.0),
                        rotation: Vec4::new(0.0, 0.0, 0.0, 1.0),
                    },
                    Entry {
                        source: LEFT_HAND,
                        position: Vec3::new(-0.3, 1.0, 0.2),
                        rotation: Vec4::new(0.0, 0.0, 0.0, 1.0),
                    },
                    Entry {
                        source: RIGHT_HAND,
                        position: Vec3::new(0.3 + wave, 1.5, 0.2),
                        rotation: Vec4::new(0.0, 0.0, wave.sin(), wave.cos()),
                    },
                ],
            }
        })
        .collect();

    MovementCapture {
        settings: UserSettings {
            joint_rotation_offsets: vec![(HEAD, Quat::identity())],
            bone_lengths: vec![(LEFT_HAND, 0.62), (RIGHT_HAND, 0.62)],
            bone_scales: vec![(LEFT_HAND, 1.0), (RIGHT_HAND, 1.0)],
            user_height: 1.78,
            arm_span: 1.8,
        },
        record_fps,
        key_frames,
    }
}

fn inspect(path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let capture = MovementCapture::load(path)?;

    let mut per_source: BTreeMap<i32, usize> = BTreeMap::new();
    for entry in capture.key_frames.iter().flat_map(|frame| &frame.entries) {
        *per_source.entry(entry.source).or_default() += 1;
    }

    println!("Capture: {path}");
    println!("  Rate:     {} fps", capture.record_fps);
    println!("  Frames:   {}", capture.key_frames.len());
    println!("  Duration: {:.2} s", capture.duration());
    println!(
        "  User:     height {:.2} m, arm span {:.2} m, {} bone lengths",
        capture.settings.user_height,
        capture.settings.arm_span,
        capture.settings.bone_lengths.len()
    );
    for (source, count) in per_source {
        println!("  Source {source:>3}: {count} samples");
    }
    Ok(())
}

fn main() {
    logging::init_with_level(log::LevelFilter::Info);

    let args: Vec<String> = env::args().collect();
    let path = match args.as_slice() {
        [_, flag, path] if flag == "--demo" => {
            if let Err(e) = synthetic_capture().save(path) {
                log::error!("Failed to write demo capture {path}: {e}");
                std::process::exit(1);
            }
            log::info!("Wrote synthetic capture to {path}");
            path
        }
        [_, path] => path,
        _ => {
            eprintln!("Usage: {} [--demo] <capture file>", args[0]);
            std::process::exit(1);
        }
    };

    if let Err(e) = inspect(path) {
        log::error!("Failed to decode capture {path}: {e}");
        std::process::exit(1);
    }
}
