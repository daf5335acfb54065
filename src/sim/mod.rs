//! Game-agnostic simulation building blocks
//!
//! Shared by both games. Nothing here touches the browser:
//! - Pools of reusable entities
//! - Periodic timers
//! - Circle collision
//! - Input snapshots
//! - Run phase

pub mod collision;
pub mod input;
pub mod phase;
pub mod pool;
pub mod timer;

pub use collision::{Aim, Bounds, Circle, check_collision, circles_overlap};
pub use input::{DefenceInput, FlappyInput, InputEvent, InputSnapshot, Key};
pub use phase::GamePhase;
pub use pool::{ENEMY_CAPACITY, OBSTACLE_CAPACITY, PROJECTILE_CAPACITY, Pool, Pooled};
pub use timer::PeriodicTimer;
