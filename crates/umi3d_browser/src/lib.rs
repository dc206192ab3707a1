//! # UMI3D Browser Core
//!
//! Wire codec and VR selection engine of a UMI3D browser.
//!
//! ## Features
//!
//! - **Wire Codec**: Positional little-endian encoding of capture records and DTOs
//! - **Selection Engine**: Proximity zones, IntenSelect cone scoring and per-controller arbitration
//! - **ECS Loop**: Explicit world and single-threaded fixed-order scheduler
//! - **Configuration**: TOML and RON settings files
//!
//! ## Quick Start
//!
//! ```rust
//! use umi3d_browser::prelude::*;
//!
//! let config = BrowserConfig::default();
//! let mut world = World::new();
//! let hand = world.add_controller(Pose::default());
//! let cube = world.spawn_target(TargetComponent::new(Pose::from_position(Vec3::new(0.0, 0.0, 0.1))));
//! world.attach_collider(cube, CollisionShape::sphere(0.05), Vec3::zeros());
//!
//! let mut selection = SelectionSystem::new(config.selection.clone());
//! selection.add_controller(hand);
//!
//! let mut scheduler = Scheduler::new(config.scheduler.clone());
//! scheduler.add_system(Box::new(selection));
//! scheduler.tick(&mut world, 0.02);
//!
//! let selection = scheduler.system::<SelectionSystem>().unwrap();
//! assert_eq!(selection.manager(hand).unwrap().current().map(|c| c.target), Some(cube));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod config;
pub mod ecs;
pub mod physics;
pub mod codec;
pub mod selection;

/// Common imports for library users
pub mod prelude {
    pub use crate::{
        codec::{ByteContainer, CodecError, MovementCapture, WireCodec},
        config::{BrowserConfig, Config, ConfigError, SelectionConfig},
        ecs::{
            components::{HighlightComponent, TargetComponent, TargetKind},
            ColliderId, ControllerId, Entity, Scheduler, System, World,
        },
        foundation::{
            math::{Pose, Quat, Vec3, Vec4},
            time::{Countdown, Timer},
        },
        physics::{CollisionShape, Ray},
        selection::{
            DetectionOrigin, Detector, SelectionCandidate, SelectionError, SelectionManager,
            SelectionOutcome, SelectionSystem, SelectorKind,
        },
    };
}
