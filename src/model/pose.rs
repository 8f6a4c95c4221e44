use glam::Vec3;

/// Position and heading of a controlled actor
///
/// Only the locomotion controller writes to this during a tick; the host
/// reads it back to place the actor's mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActorPose {
    pub position: Vec3,
    /// Rotation around +Y in radians. Not wrapped.
    pub yaw: f32,
}

impl ActorPose {
    pub fn new(position: Vec3) -> Self {
        Self { position, yaw: 0.0 }
    }

    pub fn height(&self) -> f32 {
        self.position.y
    }
}

impl Default for ActorPose {
    fn default() -> Self {
        Self::new(Vec3::ZERO)
    }
}
