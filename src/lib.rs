//! Canvas Arcade - two small canvas games
//!
//! Core modules:
//! - `sim`: Game-agnostic building blocks (pools, timers, collision, input)
//! - `flappy`: Side-scrolling flight game
//! - `defence`: Planet defence shooter
//! - `renderer`: Draw command surface, Canvas 2D backend
//! - `clock`: Frame timing and the per-frame driver
//! - `settings`: Data-driven game tuning

pub mod clock;
pub mod defence;
pub mod flappy;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use clock::{Driver, FrameClock};
pub use defence::DefenceGame;
pub use flappy::FlappyGame;
pub use settings::Settings;

use renderer::Surface;
use sim::{GamePhase, InputSnapshot};

/// A game the driver can run
pub trait Game {
    /// Per-frame input this game understands
    type Input: InputSnapshot;

    fn name(&self) -> &'static str;

    /// Rescale to a new canvas size. Starts a new run.
    fn resize(&mut self, width: f32, height: f32);

    fn restart(&mut self);

    /// Advance the simulation by `dt_ms`
    fn update(&mut self, dt_ms: f32, input: &Self::Input);

    fn draw(&self, surface: &mut impl Surface);

    /// One frame: update, then draw
    fn render(&mut self, dt_ms: f32, input: &Self::Input, surface: &mut impl Surface) {
        self.update(dt_ms, input);
        self.draw(surface);
    }

    fn phase(&self) -> GamePhase;

    fn debug(&self) -> bool;
}
