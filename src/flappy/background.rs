//! Endlessly scrolling background layer

use glam::Vec2;

use crate::renderer::{Rect, SpriteId, Surface};

/// Overlap between neighbouring copies, hides the seam
const SEAM_OVERLAP: f32 = 2.0;

#[derive(Debug, Clone)]
pub struct Background {
    /// Left edge of the first copy (always in `[-scaled_width, 0]`)
    pub x: f32,
    base_width: f32,
    base_height: f32,
    pub scaled_width: f32,
    pub scaled_height: f32,
}

impl Background {
    pub fn new(base_width: f32, base_height: f32) -> Self {
        Self {
            x: 0.0,
            base_width,
            base_height,
            scaled_width: base_width,
            scaled_height: base_height,
        }
    }

    pub fn resize(&mut self, ratio: f32) {
        self.scaled_width = self.base_width * ratio;
        self.scaled_height = self.base_height * ratio;
        self.x = 0.0;
    }

    /// Scroll left by `speed`, snapping back once a full copy has passed
    pub fn update(&mut self, speed: f32) {
        self.x -= speed;
        if self.x < -self.scaled_width {
            self.x = 0.0;
        }
    }

    pub fn draw(&self, surface: &mut impl Surface, canvas_width: f32) {
        let size = Vec2::new(self.scaled_width, self.scaled_height);
        let copies = if canvas_width >= self.scaled_width { 3 } else { 2 };
        for i in 0..copies {
            let x = self.x + (self.scaled_width - SEAM_OVERLAP) * i as f32;
            surface.sprite(
                SpriteId::Background,
                None,
                Rect {
                    pos: Vec2::new(x, 0.0),
                    size,
                },
            );
        }
    }
}
