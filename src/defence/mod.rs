//! Planet defence
//!
//! A turret orbits the planet facing the pointer and shoots at enemies
//! flying in from the screen edges. Each enemy that reaches the planet or
//! the turret alive costs a life; each one destroyed scores.

pub mod enemy;
pub mod planet;
pub mod projectile;
pub mod state;
pub mod turret;

pub use enemy::{Enemy, EnemyKind, EnemyParams, EnemyStep};
pub use planet::Planet;
pub use projectile::Projectile;
pub use state::DefenceGame;
pub use turret::Turret;
