use glam::Vec3;

/// Vertical state of the actor. Grounded carries no speed, so "airborne"
/// and "vertical speed tracked" always agree.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum JumpState {
    #[default]
    Grounded,
    Airborne {
        /// Height at takeoff; landing happens when the actor drops back to it
        takeoff_height: f32,
        vertical_speed: f32,
    },
}

impl JumpState {
    pub fn is_airborne(&self) -> bool {
        matches!(self, JumpState::Airborne { .. })
    }

    pub fn vertical_speed(&self) -> f32 {
        match self {
            JumpState::Grounded => 0.0,
            JumpState::Airborne { vertical_speed, .. } => *vertical_speed,
        }
    }

    pub fn takeoff_height(&self) -> Option<f32> {
        match self {
            JumpState::Grounded => None,
            JumpState::Airborne { takeoff_height, .. } => Some(*takeoff_height),
        }
    }
}

/// Handles jump takeoff and gravity while airborne
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicsSystem {
    pub gravity: f32,
    pub jump_impulse: f32,
}

impl PhysicsSystem {
    pub fn new(gravity: f32, jump_impulse: f32) -> Self {
        Self { gravity, jump_impulse }
    }

    /// Leave the ground from `height`. Returns false if already airborne.
    pub fn try_jump(&self, state: &mut JumpState, height: f32) -> bool {
        if state.is_airborne() {
            return false;
        }
        *state = JumpState::Airborne {
            takeoff_height: height,
            vertical_speed: self.jump_impulse,
        };
        true
    }

    /// Integrate one tick of the jump arc. Returns true on the tick the
    /// actor lands.
    pub fn update(&self, state: &mut JumpState, pos: &mut Vec3, dt: f32) -> bool {
        let JumpState::Airborne { takeoff_height, vertical_speed } = *state else {
            return false;
        };

        // Apply gravity, then velocity
        let vertical_speed = vertical_speed + self.gravity * dt;
        pos.y += vertical_speed * dt;

        if pos.y <= takeoff_height {
            pos.y = takeoff_height;
            *state = JumpState::Grounded;
            return true;
        }
        *state = JumpState::Airborne { takeoff_height, vertical_speed };
        false
    }
}
