//! Flappy world: owns the player, background and obstacle pool

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::background::Background;
use super::obstacle::{Obstacle, ObstacleStep};
use super::player::Player;
use crate::Game;
use crate::renderer::{Color, DrawCommand, Rect, Surface, TextAlign};
use crate::settings::{FlappyTuning, Settings};
use crate::sim::{
    FlappyInput, GamePhase, OBSTACLE_CAPACITY, PeriodicTimer, Pool, Pooled, check_collision,
};

/// Status text size (px)
const SMALL_TEXT: f32 = 15.0;
/// Game-over headline size (px)
const LARGE_TEXT: f32 = 30.0;
/// Energy at or below which the bar turns red
const LOW_ENERGY: u32 = 20;

/// World parameters entities read every frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlappyParams {
    pub width: f32,
    pub height: f32,
    pub ratio: f32,
    pub gravity: f32,
    /// Current scroll speed
    pub speed: f32,
}

pub struct FlappyGame {
    tuning: FlappyTuning,
    pub debug: bool,
    pub width: f32,
    pub height: f32,
    pub ratio: f32,
    pub gravity: f32,
    pub speed: f32,
    pub min_speed: f32,
    pub max_speed: f32,
    pub score: u32,
    pub phase: GamePhase,
    /// Run time in ms (frozen once the run is over)
    pub timer_ms: f32,
    event_timer: PeriodicTimer,
    pub player: Player,
    pub background: Background,
    pub obstacles: Pool<Obstacle>,
    rng: Pcg32,
}

impl FlappyGame {
    pub fn new(settings: &Settings, width: f32, height: f32, seed: u64) -> Self {
        let tuning = settings.flappy.clone();
        let sprite_size = tuning.obstacle_sprite_size;
        let mut game = Self {
            debug: settings.debug,
            width,
            height,
            ratio: 1.0,
            gravity: tuning.gravity,
            speed: tuning.speed,
            min_speed: tuning.speed,
            max_speed: tuning.speed * tuning.max_speed_factor,
            score: 0,
            phase: GamePhase::Playing,
            timer_ms: 0.0,
            event_timer: PeriodicTimer::new(tuning.event_interval_ms),
            player: Player::new(&tuning),
            background: Background::new(tuning.background_width, tuning.base_height),
            obstacles: Pool::new(OBSTACLE_CAPACITY, || Obstacle::new(sprite_size)),
            rng: Pcg32::seed_from_u64(seed),
            tuning,
        };
        game.resize(width, height);
        game
    }

    pub fn params(&self) -> FlappyParams {
        FlappyParams {
            width: self.width,
            height: self.height,
            ratio: self.ratio,
            gravity: self.gravity,
            speed: self.speed,
        }
    }

    /// Re-derive every size and speed from the new height and start over
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
        // Zero sizes give a zero or infinite ratio; left unguarded
        self.ratio = height / self.tuning.base_height;
        self.gravity = self.tuning.gravity * self.ratio;
        self.min_speed = self.tuning.speed * self.ratio;
        self.max_speed = self.min_speed * self.tuning.max_speed_factor;
        self.speed = self.min_speed;

        self.background.resize(self.ratio);
        let params = self.params();
        self.player.resize(&params);
        self.create_obstacles();

        self.score = 0;
        self.phase = GamePhase::Playing;
        self.timer_ms = 0.0;
        self.event_timer.reset();
        log::info!(
            "Flappy resized to {}x{} (ratio {:.3})",
            width,
            height,
            self.ratio
        );
    }

    /// Line up a fresh row of obstacles to the right of the player
    fn create_obstacles(&mut self) {
        self.obstacles.release_all();
        let params = self.params();
        let first_x = self.tuning.base_height * self.ratio;
        let spacing = self.tuning.obstacle_spacing * self.ratio;
        let count = self.tuning.obstacle_count.min(OBSTACLE_CAPACITY);
        for i in 0..count {
            let Some(obstacle) = self.obstacles.acquire() else {
                log::debug!("Obstacle pool exhausted at {}", i);
                break;
            };
            obstacle.start(
                first_x + i as f32 * spacing,
                self.tuning.obstacle_speed_y,
                &params,
                &mut self.rng,
            );
        }
    }

    /// Seconds with one decimal, e.g. `12.3`
    pub fn format_timer(&self) -> String {
        format!("{:.1}", self.timer_ms * 0.001)
    }

    fn draw_status_text(&self, surface: &mut impl Surface) {
        surface.text(
            format!("Score: {}", self.score),
            Vec2::new(self.width - 10.0, 30.0),
            TextAlign::Right,
            SMALL_TEXT,
        );
        surface.text(
            format!("Timer: {}", self.format_timer()),
            Vec2::new(10.0, 30.0),
            TextAlign::Left,
            SMALL_TEXT,
        );

        let messages = match self.phase {
            GamePhase::Playing => None,
            GamePhase::Lost => Some((
                "Getting Rusty?".to_string(),
                format!("Collision time {} seconds!", self.format_timer()),
            )),
            GamePhase::Won => Some((
                "Nailed it!".to_string(),
                format!(
                    "Can you do it faster than {} seconds?",
                    self.format_timer()
                ),
            )),
        };
        if let Some((headline, detail)) = messages {
            let center = Vec2::new(self.width * 0.5, self.height * 0.5);
            surface.text(headline, center - Vec2::Y * 40.0, TextAlign::Center, LARGE_TEXT);
            surface.text(detail, center - Vec2::Y * 20.0, TextAlign::Center, SMALL_TEXT);
            surface.text("Press 'R' to try again!", center, TextAlign::Center, SMALL_TEXT);
        }

        let color = if self.player.energy <= LOW_ENERGY {
            Color::Red
        } else if self.player.energy >= self.player.max_energy {
            Color::OrangeRed
        } else {
            Color::White
        };
        let bar = self.player.bar_size;
        for i in 0..self.player.energy {
            surface.draw(DrawCommand::FillRect {
                rect: Rect::new(10.0, self.height - 10.0 - bar * i as f32, bar * 5.0, bar),
                color,
            });
        }
    }
}

impl Game for FlappyGame {
    type Input = FlappyInput;

    fn name(&self) -> &'static str {
        "flappy"
    }

    fn resize(&mut self, width: f32, height: f32) {
        FlappyGame::resize(self, width, height);
    }

    fn restart(&mut self) {
        log::info!("Flappy restart");
        let (width, height) = (self.width, self.height);
        FlappyGame::resize(self, width, height);
    }

    fn update(&mut self, dt_ms: f32, input: &FlappyInput) {
        if input.toggle_debug {
            self.debug = !self.debug;
        }
        if input.restart {
            self.restart();
            return;
        }

        let playing = !self.phase.is_over();
        if playing {
            self.timer_ms += dt_ms;
            if input.charge {
                self.player.start_charge();
            }
            if input.flap {
                self.player.flap();
            }
        }
        let event_tick = self.event_timer.tick(dt_ms);

        self.speed = if self.player.charging {
            self.max_speed
        } else {
            self.min_speed
        };
        let params = self.params();

        self.background.update(self.speed);
        self.player.update(&params, event_tick);

        let mut passed = 0;
        let mut hit = false;
        for obstacle in self.obstacles.active_mut() {
            if obstacle.update(&params, playing, event_tick) == ObstacleStep::OffScreen {
                obstacle.set_free(true);
                passed += 1;
                continue;
            }
            if playing && check_collision(&*obstacle, &self.player) {
                hit = true;
            }
        }

        if playing {
            self.score += passed;
            let finished = if hit {
                self.player.collided = true;
                self.phase.finish(GamePhase::Lost)
            } else if self.obstacles.active_count() == 0 {
                self.phase.finish(GamePhase::Won)
            } else {
                false
            };
            if finished {
                self.player.stop_charge();
            }
        }
    }

    fn draw(&self, surface: &mut impl Surface) {
        self.background.draw(surface, self.width);
        self.player.draw(surface, self.debug);
        for obstacle in self.obstacles.active() {
            obstacle.draw(surface, self.debug);
        }
        self.draw_status_text(surface);
    }

    fn phase(&self) -> GamePhase {
        self.phase
    }

    fn debug(&self) -> bool {
        self.debug
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flappy::obstacle::OBSTACLE_FRAMES;
    use crate::renderer::{RecordingSurface, SpriteId};

    const FRAME_MS: f32 = 16.0;

    fn game_with(configure: impl FnOnce(&mut Settings)) -> FlappyGame {
        let mut settings = Settings::default();
        configure(&mut settings);
        FlappyGame::new(&settings, 1024.0, 720.0, 42)
    }

    fn idle() -> FlappyInput {
        FlappyInput::default()
    }

    #[test]
    fn test_new_game_lines_up_obstacles() {
        let game = game_with(|_| {});
        assert_eq!(game.ratio, 1.0);
        assert_eq!(game.obstacles.active_count(), OBSTACLE_CAPACITY);
        let xs: Vec<f32> = game.obstacles.active().map(|o| o.pos.x).collect();
        assert_eq!(xs[0], 720.0);
        assert_eq!(xs[1], 1320.0);
        assert_eq!(game.phase, GamePhase::Playing);
    }

    #[test]
    fn test_resize_rescales_constants() {
        let mut game = game_with(|_| {});
        game.resize(800.0, 360.0);
        assert_eq!(game.ratio, 0.5);
        assert!((game.gravity - 0.075).abs() < 1e-6);
        assert_eq!(game.min_speed, 1.0);
        assert_eq!(game.max_speed, 5.0);
        assert_eq!(game.player.radius, 20.0);
        assert_eq!(game.score, 0);
    }

    #[test]
    fn test_collision_loses_and_freezes_timer() {
        let mut game = game_with(|s| s.flappy.obstacle_count = 1);
        let center = game.player.pos + Vec2::splat(game.player.size * 0.5);
        if let Some(obstacle) = game.obstacles.active_mut().next() {
            obstacle.pos = center - Vec2::splat(obstacle.size * 0.5);
            obstacle.speed_y = 0.0;
        }

        game.update(FRAME_MS, &idle());
        assert_eq!(game.phase, GamePhase::Lost);
        assert!(game.player.collided);
        let frozen = game.timer_ms;

        game.update(FRAME_MS, &idle());
        assert_eq!(game.timer_ms, frozen);
        assert_eq!(game.phase, GamePhase::Lost);
    }

    #[test]
    fn test_clearing_every_obstacle_wins() {
        let mut game = game_with(|s| s.flappy.obstacle_count = 2);
        for obstacle in game.obstacles.active_mut() {
            obstacle.pos.x = -obstacle.size + 1.0;
            obstacle.pos.y = 0.0;
            obstacle.speed_y = 0.0;
        }
        game.update(FRAME_MS, &idle());
        assert_eq!(game.score, 2);
        assert_eq!(game.obstacles.active_count(), 0);
        assert_eq!(game.phase, GamePhase::Won);
    }

    #[test]
    fn test_restart_after_win() {
        let mut game = game_with(|s| s.flappy.obstacle_count = 0);
        game.update(FRAME_MS, &idle());
        assert_eq!(game.phase, GamePhase::Won);

        game.update(
            FRAME_MS,
            &FlappyInput {
                restart: true,
                ..Default::default()
            },
        );
        assert_eq!(game.phase, GamePhase::Playing);
        assert_eq!(game.timer_ms, 0.0);
    }

    #[test]
    fn test_win_stops_charge() {
        let mut game = game_with(|s| s.flappy.obstacle_count = 1);
        game.update(
            FRAME_MS,
            &FlappyInput {
                charge: true,
                ..Default::default()
            },
        );
        assert!(game.player.charging);

        for obstacle in game.obstacles.active_mut() {
            obstacle.pos.x = -obstacle.size - 100.0;
        }
        game.update(150.0, &idle());
        assert_eq!(game.phase, GamePhase::Won);
        assert!(!game.player.charging);

        let energy = game.player.energy;
        for _ in 0..3 {
            game.update(150.0, &idle());
        }
        assert_eq!(game.speed, game.min_speed);
        assert!(game.player.energy >= energy);
    }

    #[test]
    fn test_obstacles_animate_on_event_ticks() {
        let mut game = game_with(|_| {});
        let before: Vec<u32> = game.obstacles.active().map(|o| o.frame_x).collect();
        game.update(150.0, &idle());
        let after: Vec<u32> = game.obstacles.active().map(|o| o.frame_x).collect();
        assert_eq!(before.len(), after.len());
        for (b, a) in before.iter().zip(&after) {
            assert_eq!(*a, (b + 1) % OBSTACLE_FRAMES);
        }
    }

    #[test]
    fn test_charge_raises_scroll_speed() {
        let mut game = game_with(|_| {});
        game.update(
            FRAME_MS,
            &FlappyInput {
                charge: true,
                ..Default::default()
            },
        );
        assert_eq!(game.speed, game.max_speed);

        game.update(
            FRAME_MS,
            &FlappyInput {
                flap: true,
                ..Default::default()
            },
        );
        assert_eq!(game.speed, game.min_speed);
    }

    #[test]
    fn test_input_ignored_after_run_ends() {
        let mut game = game_with(|s| s.flappy.obstacle_count = 0);
        game.update(FRAME_MS, &idle());
        game.player.speed_y = 0.0;
        game.update(
            FRAME_MS,
            &FlappyInput {
                flap: true,
                ..Default::default()
            },
        );
        assert!(game.player.speed_y > 0.0);
    }

    #[test]
    fn test_draw_shows_status_and_messages() {
        let mut game = game_with(|s| s.flappy.obstacle_count = 0);
        game.update(FRAME_MS, &idle());

        let mut surface = RecordingSurface::new();
        game.draw(&mut surface);
        assert!(surface.has_text("Score: 0"));
        assert!(surface.has_text("Timer: 0.0"));
        assert!(surface.has_text("Nailed it!"));
        assert!(surface.has_text("Press 'R' to try again!"));
        assert_eq!(surface.sprite_count(SpriteId::Flyer), 1);
        assert_eq!(surface.sprite_count(SpriteId::Gears), 0);
    }

    #[test]
    fn test_debug_toggle_draws_collision_circles() {
        let mut game = game_with(|s| s.flappy.obstacle_count = 1);
        game.update(
            0.0,
            &FlappyInput {
                toggle_debug: true,
                ..Default::default()
            },
        );
        assert!(game.debug);

        let mut surface = RecordingSurface::new();
        game.draw(&mut surface);
        let circles = surface
            .commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::StrokeCircle { .. }))
            .count();
        assert_eq!(circles, 2);
    }

    #[test]
    fn test_degenerate_size_does_not_panic() {
        let mut game = game_with(|_| {});
        game.resize(0.0, 0.0);
        game.update(FRAME_MS, &idle());
        let mut surface = RecordingSurface::new();
        game.draw(&mut surface);
    }

    #[test]
    fn test_same_seed_same_run() {
        let mut a = game_with(|_| {});
        let mut b = game_with(|_| {});
        for i in 0..300 {
            let input = FlappyInput {
                flap: i % 20 == 0,
                ..Default::default()
            };
            a.update(FRAME_MS, &input);
            b.update(FRAME_MS, &input);
        }
        assert_eq!(a.phase, b.phase);
        assert_eq!(a.score, b.score);
        assert_eq!(a.player.pos, b.player.pos);
    }
}
