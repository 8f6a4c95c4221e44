use glam::Vec3;

/// Collision-aware movement supplied by the host.
///
/// The controller only works out where the actor wants to go; the collider
/// decides where it actually ends up.
pub trait Collider {
    fn move_with_collisions(&mut self, from: Vec3, displacement: Vec3) -> Vec3;
}

impl<F> Collider for F
where
    F: FnMut(Vec3, Vec3) -> Vec3,
{
    fn move_with_collisions(&mut self, from: Vec3, displacement: Vec3) -> Vec3 {
        self(from, displacement)
    }
}

/// No obstacles at all
#[derive(Debug, Default, Clone, Copy)]
pub struct FreeSpace;

impl Collider for FreeSpace {
    fn move_with_collisions(&mut self, from: Vec3, displacement: Vec3) -> Vec3 {
        from + displacement
    }
}

/// Keeps the actor inside an axis-aligned box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldBounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl WorldBounds {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min: min.min(max), max: min.max(max) }
    }
}

impl Collider for WorldBounds {
    fn move_with_collisions(&mut self, from: Vec3, displacement: Vec3) -> Vec3 {
        (from + displacement).clamp(self.min, self.max)
    }
}
