//! Defence world: the planet, its turret, and the shot and enemy pools

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::enemy::{Enemy, EnemyKind, EnemyStep};
use super::planet::Planet;
use super::projectile::Projectile;
use super::turret::Turret;
use crate::Game;
use crate::renderer::{Surface, TextAlign};
use crate::settings::{DefenceTuning, Settings};
use crate::sim::{
    DefenceInput, ENEMY_CAPACITY, GamePhase, PROJECTILE_CAPACITY, PeriodicTimer, Pool, Pooled,
    check_collision,
};

const STATUS_TEXT: f32 = 30.0;
const HEADLINE_TEXT: f32 = 50.0;

pub struct DefenceGame {
    tuning: DefenceTuning,
    pub debug: bool,
    pub width: f32,
    pub height: f32,
    pub ratio: f32,
    pub score: u32,
    pub lives: u32,
    pub phase: GamePhase,
    /// Run time in ms (frozen once the run is over)
    pub timer_ms: f32,
    /// Last known pointer position; the turret keeps facing it
    pub pointer: Vec2,
    enemy_timer: PeriodicTimer,
    sprite_timer: PeriodicTimer,
    pub planet: Planet,
    pub turret: Turret,
    pub projectiles: Pool<Projectile>,
    pub enemies: Pool<Enemy>,
    rng: Pcg32,
}

impl DefenceGame {
    pub fn new(settings: &Settings, width: f32, height: f32, seed: u64) -> Self {
        let tuning = settings.defence.clone();
        let mut game = Self {
            debug: settings.debug,
            width,
            height,
            ratio: 1.0,
            score: 0,
            lives: tuning.planet_lives,
            phase: GamePhase::Playing,
            timer_ms: 0.0,
            pointer: Vec2::ZERO,
            enemy_timer: PeriodicTimer::new(tuning.enemy_interval_ms),
            sprite_timer: PeriodicTimer::new(tuning.sprite_interval_ms),
            planet: Planet::new(tuning.planet_radius, tuning.planet_sprite_size),
            turret: Turret::new(tuning.turret_radius),
            projectiles: Pool::new(PROJECTILE_CAPACITY, Projectile::new),
            enemies: Pool::new(ENEMY_CAPACITY, || Enemy::new(EnemyKind::Asteroid)),
            rng: Pcg32::seed_from_u64(seed),
            tuning,
        };
        game.resize(width, height);
        game
    }

    pub fn bounds(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Recentre the planet, rescale everything and start a new run
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
        self.ratio = height / self.tuning.reference_height;

        let center = self.bounds() * 0.5;
        let t = &self.tuning;
        self.planet.place(
            center,
            t.planet_radius * self.ratio,
            t.planet_sprite_size * self.ratio,
        );
        self.turret.radius = t.turret_radius * self.ratio;
        self.turret.update(&self.planet, self.pointer);

        self.projectiles.release_all();
        self.enemies.release_all();
        self.enemy_timer.reset();
        self.sprite_timer.reset();

        self.score = 0;
        self.lives = self.tuning.planet_lives;
        self.phase = GamePhase::Playing;
        self.timer_ms = 0.0;
        self.spawn_enemy();
        log::info!(
            "Defence resized to {}x{} (ratio {:.3})",
            width,
            height,
            self.ratio
        );
    }

    /// Start an enemy if the pool has room
    pub fn spawn_enemy(&mut self) -> bool {
        let bounds = self.bounds();
        let target = self.planet.pos;
        let speed = self.tuning.enemy_speed * self.ratio;
        let ratio = self.ratio;
        match self.enemies.acquire() {
            Some(enemy) => {
                enemy.start(bounds, target, speed, ratio, &mut self.rng);
                true
            }
            None => {
                log::debug!("Enemy pool exhausted, skipping spawn");
                false
            }
        }
    }

    fn shoot(&mut self) {
        let Some((pos, dir)) = self.turret.muzzle() else {
            return;
        };
        let speed = self.tuning.projectile_speed * self.ratio;
        let radius = self.tuning.projectile_radius * self.ratio;
        match self.projectiles.acquire() {
            Some(projectile) => projectile.start(pos, dir, speed, radius),
            None => log::debug!("Projectile pool exhausted"),
        }
    }

    /// Seconds with one decimal, e.g. `12.3`
    pub fn format_timer(&self) -> String {
        format!("{:.1}", self.timer_ms * 0.001)
    }

    fn draw_status_text(&self, surface: &mut impl Surface) {
        surface.text(
            format!("Score: {}", self.score),
            Vec2::new(20.0, 40.0),
            TextAlign::Left,
            STATUS_TEXT,
        );
        surface.text(
            format!("Lives: {}", self.lives),
            Vec2::new(20.0, 80.0),
            TextAlign::Left,
            STATUS_TEXT,
        );
        surface.text(
            format!("Timer: {}", self.format_timer()),
            Vec2::new(self.width - 20.0, 40.0),
            TextAlign::Right,
            STATUS_TEXT,
        );

        let headline = match self.phase {
            GamePhase::Playing => return,
            GamePhase::Won => "You win!",
            GamePhase::Lost => "You lose!",
        };
        let center = self.bounds() * 0.5;
        surface.text(headline, center - Vec2::Y * 40.0, TextAlign::Center, HEADLINE_TEXT);
        surface.text(
            "Press 'R' to restart",
            center + Vec2::Y * 20.0,
            TextAlign::Center,
            STATUS_TEXT,
        );
    }
}

impl Game for DefenceGame {
    type Input = DefenceInput;

    fn name(&self) -> &'static str {
        "defence"
    }

    fn resize(&mut self, width: f32, height: f32) {
        DefenceGame::resize(self, width, height);
    }

    fn restart(&mut self) {
        log::info!("Defence restart");
        let (width, height) = (self.width, self.height);
        DefenceGame::resize(self, width, height);
    }

    fn update(&mut self, dt_ms: f32, input: &DefenceInput) {
        if input.toggle_debug {
            self.debug = !self.debug;
        }
        if input.restart {
            self.restart();
            return;
        }
        if let Some(pointer) = input.pointer {
            self.pointer = pointer;
        }

        let playing = !self.phase.is_over();
        let sprite_tick = self.sprite_timer.tick(dt_ms);
        if playing {
            self.timer_ms += dt_ms;
            if self.enemy_timer.tick(dt_ms) {
                self.spawn_enemy();
            }
        }

        self.turret.update(&self.planet, self.pointer);
        if playing {
            for _ in 0..input.shots {
                self.shoot();
            }
        }

        let bounds = self.bounds();
        for projectile in self.projectiles.active_mut() {
            if projectile.update(bounds) {
                projectile.set_free(true);
            }
        }

        let mut destroyed = 0;
        let mut impacts = 0;
        for enemy in self.enemies.active_mut() {
            if enemy.update(sprite_tick) == EnemyStep::Finished {
                enemy.set_free(true);
                continue;
            }
            if check_collision(&*enemy, &self.planet) || check_collision(&*enemy, &self.turret) {
                if enemy.is_alive() {
                    impacts += 1;
                }
                enemy.set_free(true);
                continue;
            }
            for projectile in self.projectiles.active_mut() {
                if !enemy.is_alive() {
                    break;
                }
                if check_collision(&*enemy, &*projectile) {
                    projectile.set_free(true);
                    enemy.hit(1);
                    if !enemy.is_alive() {
                        destroyed += enemy.kind.params().score;
                    }
                }
            }
        }

        if playing {
            self.score += destroyed;
            self.lives = self.lives.saturating_sub(impacts);
            if self.lives == 0 {
                self.phase.finish(GamePhase::Lost);
            } else if self.score >= self.tuning.winning_score {
                self.phase.finish(GamePhase::Won);
            }
        }
    }

    fn draw(&self, surface: &mut impl Surface) {
        self.planet.draw(surface, self.debug);
        self.turret.draw(surface, self.debug);
        for projectile in self.projectiles.active() {
            projectile.draw(surface);
        }
        for enemy in self.enemies.active() {
            enemy.draw(surface, self.debug);
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
