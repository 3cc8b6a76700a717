//! Striker ("remote") steering
//!
//! A striker follows its target: its heading rotates toward the target at a
//! limited turn rate, it accelerates along its heading up to a max speed, and
//! it decelerates to a stop once it is close.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{REMOTE_MASS, REMOTE_RADIUS};
use crate::settings::Settings;
use crate::sim::swept::SweptCircle;
use crate::{angle_between, forward_to_heading, heading_to_forward, normalize_angle};

/// A player-controlled striker on the board plane
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Remote {
    pub id: u32,
    pub position: Vec2,
    /// Facing angle (radians from +x)
    pub heading: f32,
    /// Velocity in m/s
    pub velocity: Vec2,
    /// Speed the striker is steering at along its heading
    pub target_speed: f32,
    pub radius: f32,
    pub mass: f32,
    /// Where the player is pointing, if anywhere
    #[serde(default)]
    pub target: Option<Vec2>,
    /// Ticks since this striker last collided (debounces collision events)
    #[serde(default)]
    pub frames_without_collision: u32,
}

impl Remote {
    pub fn new(id: u32, position: Vec2, heading: f32) -> Self {
        Self {
            id,
            position,
            heading: normalize_angle(heading),
            velocity: Vec2::ZERO,
            target_speed: 0.0,
            radius: REMOTE_RADIUS,
            mass: REMOTE_MASS,
            target: None,
            frames_without_collision: 0,
        }
    }

    pub fn forward(&self) -> Vec2 {
        heading_to_forward(self.heading)
    }

    /// Disc for this tick's collision pass
    pub fn swept_circle(&self) -> SweptCircle {
        SweptCircle::new(self.position, self.velocity, self.radius, self.mass)
    }

    /// Steer toward the current target, if there is one
    pub fn update(&mut self, dt: f32, settings: &Settings) {
        if let Some(target) = self.target {
            self.steer(target, dt, settings);
        }
    }

    /// Turn toward `target`, adjust speed, and set velocity along the heading
    pub fn steer(&mut self, target: Vec2, dt: f32, settings: &Settings) {
        let delta = target - self.position;
        let distance = delta.length();

        if distance > settings.close_enough {
            self.turn_toward(forward_to_heading(delta), dt, settings.turn_rate);

            if distance > settings.ease_in_distance {
                let acceleration = settings.acceleration.min(settings.acceleration * distance);
                self.target_speed =
                    (self.target_speed + acceleration * dt).min(settings.max_speed);
            } else {
                self.target_speed =
                    move_towards(self.target_speed, 0.0, settings.deceleration * dt);
            }
        } else {
            self.target_speed = move_towards(self.target_speed, 0.0, settings.deceleration * dt);
        }

        self.velocity = self.forward() * self.target_speed;
    }

    /// Rotate heading toward `target_heading` by at most `turn_rate * dt`
    fn turn_toward(&mut self, target_heading: f32, dt: f32, turn_rate: f32) {
        let delta = angle_between(self.heading, target_heading);
        let step = (turn_rate * dt).min(delta.abs());
        self.heading = normalize_angle(self.heading + step.copysign(delta));
    }

    /// Free motion for a tick with no collision partner
    pub fn integrate(&mut self, dt: f32) {
        self.position += self.velocity * dt;
    }
}

/// Move `current` toward `target` by at most `max_delta`
fn move_towards(current: f32, target: f32, max_delta: f32) -> f32 {
    let delta = target - current;
    if delta >= 0.0 {
        current + delta.min(max_delta)
    } else {
        current - (-delta).min(max_delta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_move_towards() {
        assert_eq!(move_towards(0.0, 1.0, 0.25), 0.25);
        assert_eq!(move_towards(1.0, 0.0, 0.25), 0.75);
        assert_eq!(move_towards(0.9, 1.0, 0.25), 1.0);
        assert_eq!(move_towards(0.1, 0.0, 0.25), 0.0);
    }

    #[test]
    fn test_turn_is_rate_limited() {
        let settings = Settings::default();
        let mut remote = Remote::new(1, Vec2::ZERO, 0.0);
        remote.steer(Vec2::new(0.0, 5.0), SIM_DT, &settings);

        let expected = settings.turn_rate * SIM_DT;
        assert!((remote.heading - expected).abs() < 1e-5);
        assert!(remote.heading < FRAC_PI_2);
    }

    #[test]
    fn test_turn_does_not_overshoot() {
        let settings = Settings {
            turn_rate: 60.0,
            ..Default::default()
        };
        let mut remote = Remote::new(1, Vec2::ZERO, 0.0);
        remote.steer(Vec2::new(0.0, 5.0), 0.1, &settings);
        assert!((remote.heading - FRAC_PI_2).abs() < 1e-5);
    }

    #[test]
    fn test_speed_never_exceeds_max() {
        let settings = Settings::default();
        let mut remote = Remote::new(1, Vec2::ZERO, 0.0);
        for _ in 0..600 {
            remote.steer(Vec2::new(1000.0, 0.0), SIM_DT, &settings);
            remote.integrate(SIM_DT);
            assert!(remote.velocity.length() <= settings.max_speed + 1e-4);
        }
        assert!((remote.target_speed - settings.max_speed).abs() < 1e-4);
    }

    #[test]
    fn test_stops_near_target() {
        let settings = Settings::default();
        let target = Vec2::new(5.0, 0.0);
        let mut remote = Remote::new(1, Vec2::ZERO, 0.0);
        for _ in 0..600 {
            remote.steer(target, SIM_DT, &settings);
            remote.integrate(SIM_DT);
        }
        assert_eq!(remote.target_speed, 0.0);
        assert_eq!(remote.velocity, Vec2::ZERO);
        assert!(remote.position.distance(target) <= settings.ease_in_distance);
        assert!(remote.position.x < target.x);
    }

    #[test]
    fn test_at_target_does_not_produce_nan() {
        let settings = Settings::default();
        let mut remote = Remote::new(1, Vec2::new(2.0, 2.0), 1.0);
        remote.target_speed = 1.0;
        remote.steer(Vec2::new(2.0, 2.0), SIM_DT, &settings);
        assert!(remote.velocity.is_finite());
        assert!(remote.heading.is_finite());
        assert_eq!(remote.heading, 1.0);
    }

    #[test]
    fn test_update_without_target_is_idle() {
        let settings = Settings::default();
        let mut remote = Remote::new(1, Vec2::ZERO, 0.0);
        remote.velocity = Vec2::new(1.0, 0.0);
        remote.update(SIM_DT, &settings);
        assert_eq!(remote.velocity, Vec2::new(1.0, 0.0));
    }
}
