//! The turret orbiting the planet, always facing the pointer

use glam::Vec2;

use super::planet::Planet;
use crate::renderer::{DrawCommand, Rect, SpriteId, Surface};
use crate::sim::{Aim, Circle};

#[derive(Debug, Clone)]
pub struct Turret {
    pub pos: Vec2,
    pub radius: f32,
    pub aim: Aim,
}

impl Turret {
    pub fn new(radius: f32) -> Self {
        Self {
            pos: Vec2::ZERO,
            radius,
            aim: Aim::default(),
        }
    }

    /// Sit on the planet's rim on the side facing `pointer`
    pub fn update(&mut self, planet: &Planet, pointer: Vec2) {
        self.aim = Aim::between(planet.pos, pointer);
        self.pos = planet.pos + (planet.radius + self.radius) * self.aim.dir;
    }

    /// Where a shot leaves the barrel and the direction it travels.
    /// `None` while the pointer sits on the planet's centre.
    pub fn muzzle(&self) -> Option<(Vec2, Vec2)> {
        if self.aim.dir == Vec2::ZERO {
            return None;
        }
        Some((self.pos + self.radius * self.aim.dir, self.aim.dir))
    }

    pub fn draw(&self, surface: &mut impl Surface, debug: bool) {
        surface.draw(DrawCommand::Sprite {
            sprite: SpriteId::Turret,
            src: None,
            dest: Rect::centered(self.pos, Vec2::splat(self.radius * 2.0)),
            rotation: self.aim.angle(),
        });
        if debug {
            surface.draw(DrawCommand::StrokeCircle {
                center: self.pos,
                radius: self.radius,
            });
        }
    }
}

impl Circle for Turret {
    fn center(&self) -> Vec2 {
        self.pos
    }

    fn radius(&self) -> f32 {
        self.radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn planet() -> Planet {
        let mut planet = Planet::new(80.0, 200.0);
        planet.place(Vec2::new(500.0, 300.0), 80.0, 200.0);
        planet
    }

    #[test]
    fn test_orbits_toward_pointer() {
        let mut turret = Turret::new(40.0);
        turret.update(&planet(), Vec2::new(900.0, 300.0));
        assert_eq!(turret.pos, Vec2::new(620.0, 300.0));
        assert_eq!(turret.aim.dir, Vec2::X);

        turret.update(&planet(), Vec2::new(500.0, 0.0));
        assert!((turret.pos - Vec2::new(500.0, 180.0)).length() < 1e-3);
    }

    #[test]
    fn test_muzzle_is_one_radius_ahead() {
        let mut turret = Turret::new(40.0);
        turret.update(&planet(), Vec2::new(900.0, 300.0));
        let (pos, dir) = turret.muzzle().expect("aimed");
        assert_eq!(pos, Vec2::new(660.0, 300.0));
        assert_eq!(dir, Vec2::X);
    }

    #[test]
    fn test_pointer_on_center_cannot_shoot() {
        let mut turret = Turret::new(40.0);
        turret.update(&planet(), Vec2::new(500.0, 300.0));
        assert_eq!(turret.pos, Vec2::new(500.0, 300.0));
        assert!(turret.muzzle().is_none());
    }
}
