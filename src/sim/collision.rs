//! Circle collision and aiming helpers
//!
//! Every collidable entity is approximated by one circle. There is no
//! spatial index: pools are small enough that pairwise checks are cheap.

use glam::Vec2;

/// A circular collision volume
pub trait Circle {
    fn center(&self) -> Vec2;
    fn radius(&self) -> f32;
}

/// Plain circle, handy for ad-hoc checks
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub center: Vec2,
    pub radius: f32,
}

impl Bounds {
    pub const fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }
}

impl Circle for Bounds {
    fn center(&self) -> Vec2 {
        self.center
    }

    fn radius(&self) -> f32 {
        self.radius
    }
}

/// Two circles collide iff their centers are strictly closer than the sum
/// of their radii. Touching circles do not collide.
#[inline]
pub fn circles_overlap(a: Vec2, a_radius: f32, b: Vec2, b_radius: f32) -> bool {
    a.distance(b) < a_radius + b_radius
}

#[inline]
pub fn check_collision(a: &impl Circle, b: &impl Circle) -> bool {
    circles_overlap(a.center(), a.radius(), b.center(), b.radius())
}

/// Direction from one point toward another
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Aim {
    /// Unit vector from `from` toward `to` (zero if the points coincide)
    pub dir: Vec2,
    /// `from - to`, kept for sprite rotation
    pub delta: Vec2,
}

impl Aim {
    pub fn between(from: Vec2, to: Vec2) -> Self {
        let delta = from - to;
        Self {
            dir: (-delta).normalize_or_zero(),
            delta,
        }
    }

    /// Rotation angle of the delta vector
    pub fn angle(&self) -> f32 {
        self.delta.y.atan2(self.delta.x)
    }
}
