//! The planet being defended

use glam::Vec2;

use crate::renderer::{DrawCommand, Rect, SpriteId, Surface};
use crate::sim::Circle;

#[derive(Debug, Clone)]
pub struct Planet {
    pub pos: Vec2,
    pub radius: f32,
    pub sprite_size: f32,
}

impl Planet {
    pub fn new(radius: f32, sprite_size: f32) -> Self {
        Self {
            pos: Vec2::ZERO,
            radius,
            sprite_size,
        }
    }

    /// Recentre on the canvas and rescale
    pub fn place(&mut self, center: Vec2, radius: f32, sprite_size: f32) {
        self.pos = center;
        self.radius = radius;
        self.sprite_size = sprite_size;
    }

    pub fn draw(&self, surface: &mut impl Surface, debug: bool) {
        surface.sprite(
            SpriteId::Planet,
            None,
            Rect::centered(self.pos, Vec2::splat(self.sprite_size)),
        );
        if debug {
            surface.draw(DrawCommand::StrokeCircle {
                center: self.pos,
                radius: self.radius,
            });
        }
    }
}

impl Circle for Planet {
    fn center(&self) -> Vec2 {
        self.pos
    }

    fn radius(&self) -> f32 {
        self.radius
    }
}
