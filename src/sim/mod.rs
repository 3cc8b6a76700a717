//! Deterministic simulation module
//!
//! All striker motion lives here. This module must be pure and deterministic:
//! - Caller-supplied timestep only
//! - Stable iteration order (strikers by insertion)
//! - No rendering or platform dependencies

pub mod board;
pub mod remote;
pub mod state;
pub mod swept;
pub mod tick;

pub use board::Board;
pub use remote::Remote;
pub use state::{RemoteCollisionEvent, SimState};
pub use swept::{CollisionTime, SweptCircle};
pub use tick::move_with_collision;
