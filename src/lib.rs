//! Striker Sim - swept-circle collisions for bowling-game strikers
//!
//! Core modules:
//! - `sim`: Deterministic simulation (swept circles, steering, per-tick update)
//! - `settings`: Tunables for striker motion, persisted as JSON

pub mod settings;
pub mod sim;

pub use settings::{Settings, Tunable};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one tick per rendered frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Striker mass (kg)
    pub const REMOTE_MASS: f32 = 50.0;
    /// Striker collision radius (m)
    pub const REMOTE_RADIUS: f32 = 1.05;

    /// Frames a striker must go without a collision before a new collision
    /// event is emitted for it
    pub const QUIET_FRAMES_BEFORE_EVENT: u32 = 3;

    /// Board half extents (m)
    pub const BOARD_HALF_WIDTH: f32 = 10.0;
    pub const BOARD_HALF_LENGTH: f32 = 20.0;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Shortest signed rotation taking `from` onto `to`, in [-π, π)
#[inline]
pub fn angle_between(from: f32, to: f32) -> f32 {
    normalize_angle(normalize_angle(to) - normalize_angle(from))
}

/// Unit vector pointing along `heading` (radians from +x)
#[inline]
pub fn heading_to_forward(heading: f32) -> Vec2 {
    Vec2::new(heading.cos(), heading.sin())
}

/// Heading (radians from +x) of a direction vector
#[inline]
pub fn forward_to_heading(dir: Vec2) -> f32 {
    dir.y.atan2(dir.x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_normalize_angle_wraps() {
        assert!((normalize_angle(3.0 * PI).abs() - PI).abs() < 1e-5);
        assert!((normalize_angle(-PI / 2.0) - (-PI / 2.0)).abs() < 1e-6);
        assert!((normalize_angle(2.5 * PI) - PI / 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_angle_between_takes_short_way() {
        // 170° to -170° is a +20° turn, not -340°
        let from = 170f32.to_radians();
        let to = (-170f32).to_radians();
        assert!((angle_between(from, to) - 20f32.to_radians()).abs() < 1e-4);
        assert!((angle_between(to, from) + 20f32.to_radians()).abs() < 1e-4);
    }

    #[test]
    fn test_heading_forward_round_trip() {
        let dir = Vec2::new(-1.0, 1.0).normalize();
        let heading = forward_to_heading(dir);
        assert!((heading_to_forward(heading) - dir).length() < 1e-5);
    }
}
