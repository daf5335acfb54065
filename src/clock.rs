//! Animation-frame clock and the per-frame driver

use crate::Game;
use crate::renderer::Surface;
use crate::sim::{InputEvent, InputSnapshot};

/// Longest frame the simulation will accept (ms). Background tabs pause
/// `requestAnimationFrame`, and the first frame after resuming would
/// otherwise carry the whole pause.
pub const MAX_FRAME_DELTA_MS: f32 = 250.0;

/// Turns `requestAnimationFrame` timestamps into frame deltas
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Milliseconds since the previous call. The first call returns 0.
    pub fn tick(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last {
            Some(last) => (now_ms - last).max(0.0) as f32,
            None => 0.0,
        };
        self.last = Some(now_ms);
        dt.min(MAX_FRAME_DELTA_MS)
    }
}

/// Owns a game and feeds it one input snapshot per frame.
///
/// DOM callbacks only record events and sizes here; the game itself is
/// touched once per animation frame.
pub struct Driver<G: Game> {
    pub game: G,
    input: G::Input,
    pending_resize: Option<(f32, f32)>,
    clock: FrameClock,
}

impl<G: Game> Driver<G> {
    pub fn new(game: G) -> Self {
        Self {
            game,
            input: G::Input::default(),
            pending_resize: None,
            clock: FrameClock::new(),
        }
    }

    pub fn record(&mut self, event: &InputEvent) {
        self.input.record(event);
    }

    /// Applied at the start of the next frame; later calls win
    pub fn request_resize(&mut self, width: f32, height: f32) {
        self.pending_resize = Some((width, height));
    }

    /// Run one frame. Returns true when the debug overlay was toggled.
    pub fn frame(&mut self, now_ms: f64, surface: &mut impl Surface) -> bool {
        if let Some((width, height)) = self.pending_resize.take() {
            self.game.resize(width, height);
        }
        let dt = self.clock.tick(now_ms);
        let input = std::mem::take(&mut self.input);
        let debug = self.game.debug();
        self.game.render(dt, &input, surface);
        debug != self.game.debug()
    }
}
