//! Bouncing obstacles scrolling toward the player

use glam::Vec2;
use rand::Rng;

use super::state::FlappyParams;
use crate::renderer::{DrawCommand, Rect, SpriteId, Surface};
use crate::sim::{Circle, Pooled};

/// Columns in the obstacle sprite sheet
pub const OBSTACLE_FRAMES: u32 = 4;
/// Downward acceleration per frame (×ratio) once the run is over
const FALL_ACCEL: f32 = 0.1;

/// Result of one obstacle update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObstacleStep {
    Moving,
    /// Left the screen; the caller releases it
    OffScreen,
}

#[derive(Debug, Clone)]
pub struct Obstacle {
    /// Top-left corner of the sprite
    pub pos: Vec2,
    pub size: f32,
    pub speed_y: f32,
    pub frame_x: u32,
    sprite_size: f32,
    free: bool,
}

impl Obstacle {
    pub fn new(sprite_size: f32) -> Self {
        Self {
            pos: Vec2::ZERO,
            size: sprite_size,
            speed_y: 0.0,
            frame_x: 0,
            sprite_size,
            free: true,
        }
    }

    /// Place at `x` with a random height, direction and sprite frame
    pub fn start(&mut self, x: f32, speed_y: f32, params: &FlappyParams, rng: &mut impl Rng) {
        self.size = self.sprite_size * params.ratio;
        // Not `random_range`: the span is empty on degenerate canvases
        let y = rng.random::<f32>() * (params.height - self.size);
        self.pos = Vec2::new(x, y);
        let speed = speed_y * params.ratio;
        self.speed_y = if rng.random_bool(0.5) { -speed } else { speed };
        self.frame_x = rng.random_range(0..OBSTACLE_FRAMES);
    }

    /// Scroll and bounce while `playing`; fall once the run is over.
    /// The gears turn one sprite frame per `event_tick`.
    pub fn update(
        &mut self,
        params: &FlappyParams,
        playing: bool,
        event_tick: bool,
    ) -> ObstacleStep {
        if event_tick {
            self.frame_x = (self.frame_x + 1) % OBSTACLE_FRAMES;
        }
        self.pos.x -= params.speed;
        self.pos.y += self.speed_y;
        if playing {
            if self.pos.y <= 0.0 {
                self.speed_y = self.speed_y.abs();
            } else if self.pos.y >= params.height - self.size {
                self.speed_y = -self.speed_y.abs();
            }
        } else {
            self.speed_y += FALL_ACCEL * params.ratio;
        }

        if self.is_off_screen(params) {
            ObstacleStep::OffScreen
        } else {
            ObstacleStep::Moving
        }
    }

    pub fn is_off_screen(&self, params: &FlappyParams) -> bool {
        self.pos.x < -self.size || self.pos.y > params.height
    }

    pub fn draw(&self, surface: &mut impl Surface, debug: bool) {
        surface.sprite(
            SpriteId::Gears,
            Some(Rect::sheet_cell(
                self.frame_x,
                0,
                Vec2::splat(self.sprite_size),
            )),
            Rect {
                pos: self.pos,
                size: Vec2::splat(self.size),
            },
        );
        if debug {
            surface.draw(DrawCommand::StrokeCircle {
                center: self.center(),
                radius: self.radius(),
            });
        }
    }
}

impl Pooled for Obstacle {
    fn is_free(&self) -> bool {
        self.free
    }

    fn set_free(&mut self, free: bool) {
        self.free = free;
    }
}

impl Circle for Obstacle {
    fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.size * 0.5)
    }

    fn radius(&self) -> f32 {
        self.size * 0.5
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn params() -> FlappyParams {
        FlappyParams {
            width: 1024.0,
            height: 720.0,
            ratio: 1.0,
            gravity: 0.15,
            speed: 2.0,
        }
    }

    #[test]
    fn test_start_stays_on_screen() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut obstacle = Obstacle::new(120.0);
        for _ in 0..100 {
            obstacle.start(900.0, 1.0, &params(), &mut rng);
            assert!(obstacle.pos.y >= 0.0 && obstacle.pos.y <= 600.0);
            assert_eq!(obstacle.speed_y.abs(), 1.0);
            assert!(obstacle.frame_x < OBSTACLE_FRAMES);
        }
    }

    #[test]
    fn test_bounces_off_bottom() {
        let mut obstacle = Obstacle::new(120.0);
        obstacle.pos = Vec2::new(500.0, 599.5);
        obstacle.speed_y = 1.0;
        obstacle.update(&params(), true, false);
        assert_eq!(obstacle.speed_y, -1.0);
        assert_eq!(obstacle.pos.x, 498.0);
    }

    #[test]
    fn test_falls_after_game_over() {
        let mut obstacle = Obstacle::new(120.0);
        obstacle.pos = Vec2::new(500.0, 599.5);
        obstacle.speed_y = 1.0;
        obstacle.update(&params(), false, false);
        assert!((obstacle.speed_y - 1.1).abs() < 1e-6);
    }

    #[test]
    fn test_off_screen_left() {
        let mut obstacle = Obstacle::new(120.0);
        obstacle.pos = Vec2::new(-119.0, 100.0);
        assert_eq!(obstacle.update(&params(), true, false), ObstacleStep::OffScreen);
    }

    #[test]
    fn test_gears_turn_on_event_ticks() {
        let mut obstacle = Obstacle::new(120.0);
        obstacle.pos = Vec2::new(500.0, 300.0);
        obstacle.frame_x = OBSTACLE_FRAMES - 2;
        obstacle.update(&params(), true, false);
        assert_eq!(obstacle.frame_x, OBSTACLE_FRAMES - 2);
        obstacle.update(&params(), true, true);
        assert_eq!(obstacle.frame_x, OBSTACLE_FRAMES - 1);
        obstacle.update(&params(), true, true);
        assert_eq!(obstacle.frame_x, 0);
    }

    #[test]
    fn test_collision_circle() {
        let mut obstacle = Obstacle::new(120.0);
        obstacle.pos = Vec2::new(10.0, 20.0);
        assert_eq!(obstacle.center(), Vec2::new(70.0, 80.0));
        assert_eq!(obstacle.radius(), 60.0);
    }
}
