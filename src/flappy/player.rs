//! The flapping player

use glam::Vec2;

use super::state::FlappyParams;
use crate::renderer::{DrawCommand, Rect, SpriteId, Surface};
use crate::settings::FlappyTuning;
use crate::sim::Circle;

/// Sprite sheet row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wings {
    Idle = 0,
    Down = 1,
    Up = 2,
    Charge = 3,
}

#[derive(Debug, Clone)]
pub struct Player {
    /// Top-left corner of the sprite
    pub pos: Vec2,
    pub size: f32,
    pub speed_y: f32,
    pub flap_speed: f32,
    pub radius: f32,
    pub energy: u32,
    pub max_energy: u32,
    pub charging: bool,
    pub collided: bool,
    pub wings: Wings,
    /// Height of one energy bar cell
    pub bar_size: f32,
    tuning: PlayerTuning,
}

/// Reference values the player re-derives its sizes from
#[derive(Debug, Clone, Copy)]
struct PlayerTuning {
    x: f32,
    sprite_size: f32,
    radius: f32,
    flap_speed: f32,
    launch_speed: f32,
    energy_start: u32,
    min_energy: u32,
    drain: u32,
}

impl Player {
    pub fn new(tuning: &FlappyTuning) -> Self {
        let tuning = PlayerTuning {
            x: tuning.player_x,
            sprite_size: tuning.player_sprite_size,
            radius: tuning.player_radius,
            flap_speed: tuning.flap_speed,
            launch_speed: tuning.launch_speed,
            energy_start: tuning.energy_start,
            min_energy: tuning.energy_min_to_charge,
            drain: tuning.energy_drain,
        };
        Self {
            pos: Vec2::new(tuning.x, 0.0),
            size: tuning.sprite_size,
            speed_y: 0.0,
            flap_speed: tuning.flap_speed,
            radius: tuning.radius,
            energy: tuning.energy_start,
            max_energy: tuning.energy_start * 2,
            charging: false,
            collided: false,
            wings: Wings::Idle,
            bar_size: 5.0,
            tuning,
        }
    }

    /// Re-derive sizes from the ratio and put the player back at the start
    pub fn resize(&mut self, params: &FlappyParams) {
        let t = self.tuning;
        self.size = t.sprite_size * params.ratio;
        self.pos = Vec2::new(t.x, params.height * 0.5 - self.size * 0.5);
        self.speed_y = t.launch_speed * params.ratio;
        self.flap_speed = t.flap_speed * params.ratio;
        self.radius = t.radius * params.ratio;
        self.bar_size = (5.0 * params.ratio).floor();
        self.energy = t.energy_start;
        self.max_energy = t.energy_start * 2;
        self.collided = false;
        self.charging = false;
        self.wings = Wings::Idle;
    }

    pub fn is_touching_top(&self) -> bool {
        self.pos.y <= 0.0
    }

    pub fn is_touching_bottom(&self, params: &FlappyParams) -> bool {
        self.pos.y >= params.height - self.size
    }

    pub fn update(&mut self, params: &FlappyParams, event_tick: bool) {
        self.handle_energy(event_tick);
        if self.speed_y >= 0.0 && !self.charging {
            self.wings = Wings::Up;
        }
        self.pos.y += self.speed_y;
        if !self.is_touching_bottom(params) && !self.charging {
            self.speed_y += params.gravity;
        } else {
            self.speed_y = 0.0;
        }
        if self.is_touching_bottom(params) {
            self.pos.y = params.height - self.size;
            self.wings = Wings::Idle;
        }
    }

    pub fn flap(&mut self) {
        self.stop_charge();
        if !self.is_touching_top() {
            self.speed_y = -self.flap_speed;
            self.wings = Wings::Down;
        }
    }

    /// Start charging if there is enough energy, otherwise cancel any charge
    pub fn start_charge(&mut self) {
        if self.energy >= self.tuning.min_energy && !self.charging {
            self.charging = true;
            self.wings = Wings::Charge;
        } else {
            self.stop_charge();
        }
    }

    pub fn stop_charge(&mut self) {
        self.charging = false;
    }

    /// Regenerate on every event tick; drain while charging
    fn handle_energy(&mut self, event_tick: bool) {
        if !event_tick {
            return;
        }
        if self.energy < self.max_energy {
            self.energy += 1;
        }
        if self.charging {
            self.energy = self.energy.saturating_sub(self.tuning.drain);
            if self.energy == 0 {
                self.stop_charge();
            }
        }
    }

    pub fn draw(&self, surface: &mut impl Surface, debug: bool) {
        let cell = Vec2::splat(self.tuning.sprite_size);
        surface.sprite(
            SpriteId::Flyer,
            Some(Rect::sheet_cell(0, self.wings as u32, cell)),
            Rect {
                pos: self.pos,
                size: Vec2::splat(self.size),
            },
        );
        if debug {
            surface.draw(DrawCommand::StrokeCircle {
                center: self.center(),
                radius: self.radius,
            });
        }
    }
}

impl Circle for Player {
    fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.size * 0.5)
    }

    fn radius(&self) -> f32 {
        self.radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> FlappyParams {
        FlappyParams {
            width: 1024.0,
            height: 720.0,
            ratio: 1.0,
            gravity: 0.15,
            speed: 2.0,
        }
    }

    fn player() -> Player {
        let mut player = Player::new(&FlappyTuning::default());
        player.resize(&params());
        player
    }

    #[test]
    fn test_resize_centers_player() {
        let p = player();
        assert_eq!(p.pos.y, 720.0 * 0.5 - 100.0);
        assert_eq!(p.speed_y, -8.0);
        assert_eq!(p.radius, 40.0);
        assert_eq!(p.center(), Vec2::new(120.0, 360.0));
    }

    #[test]
    fn test_gravity_accumulates() {
        let mut p = player();
        let params = params();
        p.speed_y = 0.0;
        let y0 = p.pos.y;
        p.update(&params, false);
        p.update(&params, false);
        assert!((p.speed_y - 0.3).abs() < 1e-6);
        assert!((p.pos.y - (y0 + 0.15)).abs() < 1e-4);
    }

    #[test]
    fn test_lands_on_bottom() {
        let mut p = player();
        let params = params();
        p.pos.y = params.height;
        p.speed_y = 3.0;
        p.update(&params, false);
        assert_eq!(p.pos.y, params.height - p.size);
        assert_eq!(p.speed_y, 0.0);
        assert_eq!(p.wings, Wings::Idle);
    }

    #[test]
    fn test_flap_ignored_at_top() {
        let mut p = player();
        p.flap();
        assert_eq!(p.speed_y, -5.0);
        assert_eq!(p.wings, Wings::Down);

        p.pos.y = 0.0;
        p.speed_y = 1.0;
        p.flap();
        assert_eq!(p.speed_y, 1.0);
    }

    #[test]
    fn test_charge_drains_and_stops() {
        let mut p = player();
        p.energy = 15;
        p.start_charge();
        assert!(p.charging);

        // +1 regen, -6 drain per event tick
        p.update(&params(), true);
        assert_eq!(p.energy, 10);
        p.update(&params(), true);
        p.update(&params(), true);
        assert_eq!(p.energy, 0);
        assert!(!p.charging);
    }

    #[test]
    fn test_charge_needs_minimum_energy() {
        let mut p = player();
        p.energy = 14;
        p.start_charge();
        assert!(!p.charging);
    }

    #[test]
    fn test_second_charge_press_cancels() {
        let mut p = player();
        p.start_charge();
        assert!(p.charging);
        p.start_charge();
        assert!(!p.charging);
    }

    #[test]
    fn test_charging_hovers() {
        let mut p = player();
        p.start_charge();
        p.speed_y = 0.0;
        let y0 = p.pos.y;
        p.update(&params(), false);
        p.update(&params(), false);
        assert_eq!(p.pos.y, y0);
    }

    #[test]
    fn test_energy_regenerates_up_to_max() {
        let mut p = player();
        p.energy = p.max_energy - 1;
        p.pos.y = 720.0; // rest on the bottom
        p.update(&params(), true);
        p.update(&params(), true);
        assert_eq!(p.energy, p.max_energy);
    }
}
