//! Player locomotion: buffered key state, smoothed movement intent,
//! translation, jumping and facing.
//!
//! The host feeds keyboard events into [`LocomotionController::handle_event`]
//! whenever they arrive and calls [`LocomotionController::tick`] once per
//! frame. Events never move the actor directly.

use glam::Vec3;
use tracing::{debug, trace};

use super::collision::Collider;
use super::input::{InputEvent, InputState, KeyBindings};
use super::physics::{JumpState, PhysicsSystem};
use crate::config::LocomotionConfig;
use crate::model::ActorPose;

/// Smoothed and raw movement intent
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct MotionState {
    /// Smoothed forward/back intent in [-1, 1]; Up pulls toward -1
    pub vertical: f32,
    /// Smoothed sideways intent in [-1, 1]; Left pulls toward +1
    pub horizontal: f32,
    /// Unsmoothed vertical axis in {-1, 0, 1}, used for facing
    pub vertical_axis: f32,
    /// Unsmoothed horizontal axis in {-1, 0, 1}, used for facing
    pub horizontal_axis: f32,
    /// Normalized `(horizontal, 0, vertical)`, zero without input
    pub direction: Vec3,
}

/// Drives one actor from keyboard input
#[derive(Debug, Clone)]
pub struct LocomotionController {
    pub config: LocomotionConfig,
    pub bindings: KeyBindings,
    input: InputState,
    motion: MotionState,
    jump: JumpState,
}

impl Default for LocomotionController {
    fn default() -> Self {
        Self::new(LocomotionConfig::default(), KeyBindings::default())
    }
}

impl LocomotionController {
    pub fn new(config: LocomotionConfig, bindings: KeyBindings) -> Self {
        Self {
            config,
            bindings,
            input: InputState::new(),
            motion: MotionState::default(),
            jump: JumpState::Grounded,
        }
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn motion(&self) -> &MotionState {
        &self.motion
    }

    pub fn jump_state(&self) -> &JumpState {
        &self.jump
    }

    pub fn is_airborne(&self) -> bool {
        self.jump.is_airborne()
    }

    /// Jump physics from the current config, so edits to `config` apply on
    /// the next event or tick
    fn physics(&self) -> PhysicsSystem {
        PhysicsSystem::new(self.config.gravity, self.config.jump_impulse)
    }

    /// Ingest one keyboard/window event.
    ///
    /// A jump key-down while grounded starts a jump from the pose's current
    /// height and is not forwarded to the held-key state.
    pub fn handle_event(&mut self, event: &InputEvent, pose: &ActorPose) {
        if let InputEvent::KeyDown(code) = event {
            if self.bindings.is_jump(code) {
                if self.physics().try_jump(&mut self.jump, pose.height()) {
                    debug!(takeoff = pose.height(), "jump");
                }
                return;
            }
        }
        self.input.process_event(event, &self.bindings);
    }

    /// Drop every held direction, e.g. when the host loses focus
    pub fn clear_keys(&mut self) {
        self.input.clear_keys();
    }

    /// Smooth the movement intent toward the held keys. Runs once per tick
    /// regardless of the tick length.
    pub fn update_intent(&mut self) {
        let cfg = &self.config;
        let m = &mut self.motion;

        // Up beats Down, Left beats Right
        let vertical_target = if self.input.up {
            Some(-1.0)
        } else if self.input.down {
            Some(1.0)
        } else {
            None
        };
        let horizontal_target = if self.input.left {
            Some(1.0)
        } else if self.input.right {
            Some(-1.0)
        } else {
            None
        };

        (m.vertical, m.vertical_axis) = smooth_axis(m.vertical, vertical_target, cfg);
        (m.horizontal, m.horizontal_axis) = smooth_axis(m.horizontal, horizontal_target, cfg);
        m.direction = Vec3::new(m.horizontal, 0.0, m.vertical).normalize_or_zero();
    }

    /// Move along the current intent and advance the jump arc
    pub fn translate<C: Collider + ?Sized>(&mut self, pose: &mut ActorPose, collider: &mut C, dt: f32) {
        let displacement = self.motion.direction * (self.config.speed * dt);
        if displacement != Vec3::ZERO {
            pose.position = collider.move_with_collisions(pose.position, displacement);
        }

        if self.physics().update(&mut self.jump, &mut pose.position, dt) {
            debug!(height = pose.position.y, "landed");
        }
    }

    /// Turn toward the raw input direction. Idle input leaves yaw alone,
    /// even while the smoothed intent is still decaying.
    pub fn rotate(&self, pose: &mut ActorPose, dt: f32) {
        let (h, v) = (self.motion.horizontal_axis, self.motion.vertical_axis);
        if h == 0.0 && v == 0.0 {
            return;
        }

        let target = h.atan2(v);
        let diff = target - pose.yaw;
        let diff = diff.sin().atan2(diff.cos());
        pose.yaw += diff * (self.config.rotation_speed * dt).min(1.0);
    }

    /// One frame: intent, then translation and jump, then rotation
    pub fn tick<C: Collider + ?Sized>(&mut self, pose: &mut ActorPose, collider: &mut C, dt: f32) {
        self.update_intent();
        self.translate(pose, collider, dt);
        self.rotate(pose, dt);
        trace!(
            x = pose.position.x,
            y = pose.position.y,
            z = pose.position.z,
            yaw = pose.yaw,
            dt,
            "tick"
        );
    }
}

/// Returns the new smoothed value and the raw axis for one axis
fn smooth_axis(current: f32, target: Option<f32>, cfg: &LocomotionConfig) -> (f32, f32) {
    match target {
        Some(target) => (lerp(current, target, cfg.approach_rate), target),
        None => {
            let next = lerp(current, 0.0, cfg.release_rate);
            let next = if next.abs() < cfg.epsilon { 0.0 } else { next };
            (next, 0.0)
        }
    }
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
