//! Side-scrolling flight game
//!
//! Flap to stay airborne, dodge the bouncing gears, and clear the whole row
//! as fast as possible. Holding a charge burns energy to scroll faster.

pub mod background;
pub mod obstacle;
pub mod player;
pub mod state;

pub use background::Background;
pub use obstacle::Obstacle;
pub use player::{Player, Wings};
pub use state::{FlappyGame, FlappyParams};
