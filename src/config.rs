/// Tunables for the player locomotion controller
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocomotionConfig {
    /// Ground speed in units per second
    pub speed: f32,
    /// Per-tick lerp factor toward a held direction
    pub approach_rate: f32,
    /// Per-tick lerp factor back to neutral when nothing is held
    pub release_rate: f32,
    /// Below this magnitude a released axis snaps to zero
    pub epsilon: f32,
    /// Vertical acceleration while airborne (negative is down)
    pub gravity: f32,
    /// Upward speed applied at takeoff
    pub jump_impulse: f32,
    /// Turn rate; `rotation_speed * dt >= 1` turns fully in one tick
    pub rotation_speed: f32,
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        Self {
            speed: 7.0,
            approach_rate: 0.2,
            release_rate: 0.5,
            epsilon: 0.01,
            gravity: -30.8,
            jump_impulse: 13.0,
            rotation_speed: 15.0,
        }
    }
}

/// Host-side frame timing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameConfig {
    /// Longest tick handed to the controller, in seconds
    pub max_step: f32,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self { max_step: 0.1 }
    }
}
