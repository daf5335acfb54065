//! Enemies flying at the planet
//!
//! Behaviour differs per [`EnemyKind`] only through its [`EnemyParams`];
//! adding a kind means adding a variant and its parameters.

use glam::Vec2;
use rand::Rng;

use crate::renderer::{DrawCommand, Rect, SpriteId, Surface, TextAlign};
use crate::sim::{Aim, Circle, Pooled};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnemyKind {
    #[default]
    Asteroid,
}

/// Per-kind constants, in reference-resolution units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyParams {
    pub sprite: SpriteId,
    /// Sprite sheet cell edge (px)
    pub cell: f32,
    pub radius: f32,
    pub lives: u32,
    /// Last death animation column; the enemy is released after it
    pub max_frame: u32,
    /// Sprite sheet rows (visual variants)
    pub rows: u32,
    /// Points for destroying one
    pub score: u32,
}

impl EnemyKind {
    pub fn params(self) -> EnemyParams {
        match self {
            EnemyKind::Asteroid => EnemyParams {
                sprite: SpriteId::Asteroid,
                cell: 80.0,
                radius: 40.0,
                lives: 5,
                max_frame: 7,
                rows: 4,
                score: 1,
            },
        }
    }
}

/// Result of one enemy update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyStep {
    Moving,
    /// Death animation finished; the caller releases it
    Finished,
}

#[derive(Debug, Clone, Default)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub lives: u32,
    pub frame_x: u32,
    pub frame_y: u32,
    free: bool,
}

impl Enemy {
    pub fn new(kind: EnemyKind) -> Self {
        Self {
            kind,
            lives: kind.params().lives,
            radius: kind.params().radius,
            free: true,
            ..Default::default()
        }
    }

    /// Spawn just outside a random screen edge, heading for `target`
    pub fn start(
        &mut self,
        bounds: Vec2,
        target: Vec2,
        speed: f32,
        ratio: f32,
        rng: &mut impl Rng,
    ) {
        let params = self.kind.params();
        self.radius = params.radius * ratio;
        self.lives = params.lives;
        self.frame_x = 0;
        self.frame_y = rng.random_range(0..params.rows);

        let r = self.radius;
        self.pos = if rng.random_bool(0.5) {
            let y = if rng.random_bool(0.5) { -r } else { bounds.y + r };
            Vec2::new(rng.random::<f32>() * bounds.x, y)
        } else {
            let x = if rng.random_bool(0.5) { -r } else { bounds.x + r };
            Vec2::new(x, rng.random::<f32>() * bounds.y)
        };
        self.vel = Aim::between(self.pos, target).dir * speed;
    }

    pub fn is_alive(&self) -> bool {
        self.lives >= 1
    }

    pub fn hit(&mut self, damage: u32) {
        self.lives = self.lives.saturating_sub(damage);
    }

    /// Move, and advance the death animation on sprite ticks
    pub fn update(&mut self, sprite_tick: bool) -> EnemyStep {
        self.pos += self.vel;
        if !self.is_alive() && sprite_tick {
            self.frame_x += 1;
        }
        if self.frame_x > self.kind.params().max_frame {
            EnemyStep::Finished
        } else {
            EnemyStep::Moving
        }
    }

    pub fn draw(&self, surface: &mut impl Surface, debug: bool) {
        let params = self.kind.params();
        surface.sprite(
            params.sprite,
            Some(Rect::sheet_cell(
                self.frame_x,
                self.frame_y,
                Vec2::splat(params.cell),
            )),
            Rect::centered(self.pos, Vec2::splat(self.radius * 2.0)),
        );
        if debug {
            surface.draw(DrawCommand::StrokeCircle {
                center: self.pos,
                radius: self.radius,
            });
            surface.text(self.lives.to_string(), self.pos, TextAlign::Center, 20.0);
        }
    }
}

impl Pooled for Enemy {
    fn is_free(&self) -> bool {
        self.free
    }

    fn set_free(&mut self, free: bool) {
        self.free = free;
    }
}

impl Circle for Enemy {
    fn center(&self) -> Vec2 {
        self.pos
    }

    fn radius(&self) -> f32 {
        self.radius
    }
}
