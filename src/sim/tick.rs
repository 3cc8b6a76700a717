//! Per-frame striker update
//!
//! Steers every striker toward its target, then resolves the first two
//! strikers against each other with swept circles so they can never pass
//! through one another, however far they move in a frame.

use super::board::Board;
use super::remote::Remote;
use super::state::{RemoteCollisionEvent, SimState};
use super::swept::iterate_until_done;
use crate::consts::QUIET_FRAMES_BEFORE_EVENT;
use crate::settings::Settings;

/// Advance all strikers by `dt` seconds
pub fn move_with_collision(state: &mut SimState, dt: f32) {
    if state.remotes.is_empty() || dt <= 0.0 {
        return;
    }

    state.time_ticks += 1;

    let settings = &state.settings;
    for remote in &mut state.remotes {
        remote.update(dt, settings);
    }

    if !settings.enable_striker_motion {
        return;
    }

    let event = if state.remotes.len() > 1 {
        let event = resolve_pair(&mut state.remotes, settings, dt);
        for remote in state.remotes.iter_mut().skip(2) {
            move_free(remote, settings, &state.board, dt);
        }
        event
    } else {
        move_free(&mut state.remotes[0], settings, &state.board, dt);
        None
    };

    if let Some(event) = event {
        state.push_event(event);
    }
}

/// Swept-circle pass for the first two strikers
///
/// Returns a collision event when they hit and neither has collided in the
/// last few frames.
fn resolve_pair(
    remotes: &mut [Remote],
    settings: &Settings,
    dt: f32,
) -> Option<RemoteCollisionEvent> {
    let [remote0, remote1, ..] = remotes else {
        return None;
    };

    let (velocity0, velocity1) = (remote0.velocity, remote1.velocity);
    let mut sc0 = remote0.swept_circle();
    let mut sc1 = remote1.swept_circle();
    let resolution = iterate_until_done(&mut sc0, &mut sc1, dt);

    if settings.enable_velocity_kinematic {
        // Drive the bodies by the velocity that lands them where the last
        // sub-step put them
        sc0.new_velocity = (sc0.new_position - sc0.position) / dt;
        sc1.new_velocity = (sc1.new_position - sc1.position) / dt;
        remote0.position += sc0.new_velocity * dt;
        remote1.position += sc1.new_velocity * dt;
    } else {
        remote0.position = sc0.new_position;
        remote1.position = sc1.new_position;
    }

    if !resolution.collided() {
        remote0.frames_without_collision = remote0.frames_without_collision.saturating_add(1);
        remote1.frames_without_collision = remote1.frames_without_collision.saturating_add(1);
        return None;
    }

    log::debug!(
        "Remotes {} and {} collided at t = {:?} ({} iterations)",
        remote0.id,
        remote1.id,
        resolution.first_collision,
        resolution.iterations
    );

    let quiet = remote0.frames_without_collision > QUIET_FRAMES_BEFORE_EVENT
        && remote1.frames_without_collision > QUIET_FRAMES_BEFORE_EVENT;
    let event = quiet.then(|| RemoteCollisionEvent {
        remote0: remote0.id,
        impulse0: sc0.impulse(velocity0),
        remote1: remote1.id,
        impulse1: sc1.impulse(velocity1),
    });

    remote0.velocity = sc0.new_velocity;
    remote1.velocity = sc1.new_velocity;
    remote0.frames_without_collision = 0;
    remote1.frames_without_collision = 0;

    event
}

/// Move a striker with no collision partner, pinned to the board when
/// writing positions directly
fn move_free(remote: &mut Remote, settings: &Settings, board: &Board, dt: f32) {
    remote.integrate(dt);
    if !settings.enable_velocity_kinematic && settings.bounds_enable {
        remote.position = board.pin(remote.position, settings.bounds_buffer);
    }
}
