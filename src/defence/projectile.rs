//! Turret shots

use glam::Vec2;

use crate::renderer::{Color, DrawCommand, Surface};
use crate::sim::{Circle, Pooled};

#[derive(Debug, Clone, Default)]
pub struct Projectile {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    free: bool,
}

impl Projectile {
    pub fn new() -> Self {
        Self {
            free: true,
            ..Default::default()
        }
    }

    pub fn start(&mut self, pos: Vec2, dir: Vec2, speed: f32, radius: f32) {
        self.pos = pos;
        self.vel = dir * speed;
        self.radius = radius;
    }

    /// Move; true once outside `bounds`
    pub fn update(&mut self, bounds: Vec2) -> bool {
        self.pos += self.vel;
        self.pos.x < 0.0 || self.pos.x > bounds.x || self.pos.y < 0.0 || self.pos.y > bounds.y
    }

    pub fn draw(&self, surface: &mut impl Surface) {
        surface.draw(DrawCommand::FillCircle {
            center: self.pos,
            radius: self.radius,
            color: Color::Gold,
        });
    }
}

impl Pooled for Projectile {
    fn is_free(&self) -> bool {
        self.free
    }

    fn set_free(&mut self, free: bool) {
        self.free = free;
    }
}

impl Circle for Projectile {
    fn center(&self) -> Vec2 {
        self.pos
    }

    fn radius(&self) -> f32 {
        self.radius
    }
}
