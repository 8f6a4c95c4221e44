// MODEL: Actor state and animation data
pub mod pose;
pub mod animation;

pub use pose::ActorPose;
pub use animation::{Keyframe, KeyframeTrack, LoopMode, flap_eyes, flap_mouth, wing_flap_angle};
