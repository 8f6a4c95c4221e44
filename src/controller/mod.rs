// CONTROLLER: Input, locomotion and per-frame timing
pub mod input;
pub mod physics;
pub mod collision;
pub mod locomotion;
pub mod frame_loop;

pub use input::{InputEvent, InputState, KeyBindings, Direction};
pub use physics::{JumpState, PhysicsSystem};
pub use collision::{Collider, FreeSpace, WorldBounds};
pub use locomotion::{LocomotionController, MotionState};
pub use frame_loop::FrameClock;
