//! Haptic pulse requests queued for the device layer

use crate::ecs::ControllerId;

/// One vibration request for a controller
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HapticPulse {
    /// Controller to vibrate
    pub controller: ControllerId,
    /// Pulse length in seconds
    pub duration: f32,
    /// Normalized strength in [0, 1]
    pub amplitude: f32,
}
