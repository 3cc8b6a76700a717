//! Swept-circle collision between two moving discs
//!
//! Continuous (time of impact) detection on the board plane followed by a
//! mass-weighted elastic response along the line of centers. Two strikers
//! moving fast enough to pass through each other within a single frame are
//! still caught, because contact is solved for as a function of time rather
//! than sampled at the end of the step.
//!
//! Numerical edge cases never raise: near-parallel motion, coincident
//! centers and vanishing mass sums all degrade to "no collision" or to
//! skipping the affected term.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Below this, `2a` in the quadratic and `m0 + m1` are treated as zero
pub const DENOMINATOR_TOO_CLOSE_TO_ZERO: f32 = 1e-5;
/// Overlap shallower than this (in squared distance) is treated as touching
pub const DISTANCE_TOO_CLOSE_TO_ZERO: f32 = 1e-5;
/// Upper bound on sub-steps resolved per call to [`iterate_until_done`]
pub const ITERATION_MAX: u32 = 3;

/// A moving disc for a single simulation step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweptCircle {
    /// Position at the start of the remaining time budget (m)
    pub position: Vec2,
    /// Velocity at the start of the remaining time budget (m/s)
    pub velocity: Vec2,
    radius: f32,
    mass: f32,
    /// Result of the most recent sub-step (m)
    pub new_position: Vec2,
    /// Result of the most recent sub-step (m/s)
    pub new_velocity: Vec2,
}

impl SweptCircle {
    pub fn new(origin: Vec2, velocity: Vec2, radius: f32, mass: f32) -> Self {
        Self {
            position: origin,
            velocity,
            radius,
            mass,
            new_position: Vec2::ZERO,
            new_velocity: Vec2::ZERO,
        }
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn mass(&self) -> f32 {
        self.mass
    }

    /// Momentum change from `old_velocity` to the resolved velocity
    pub fn impulse(&self, old_velocity: Vec2) -> Vec2 {
        (self.new_velocity - old_velocity) * self.mass
    }

    /// Commit the last sub-step as the new starting state
    fn commit(&mut self) {
        self.position = self.new_position;
        self.velocity = self.new_velocity;
    }
}

/// When, within a step, two discs touch
///
/// `None` (as `Option<CollisionTime>`) means no contact needs resolving.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum CollisionTime {
    /// Overlapping at the start of the step with no relative motion to
    /// resolve it; the discs must be pushed apart
    AlreadyOverlapping,
    /// Contact at this fraction of the step. Negative means the contact
    /// began before the step started (the discs are backed up to it)
    At(f32),
}

impl CollisionTime {
    /// Fraction of the step at which contact occurs
    pub fn fraction(self) -> f32 {
        match self {
            CollisionTime::AlreadyOverlapping => 0.0,
            CollisionTime::At(t) => t,
        }
    }

    /// True when contact is at the very start of the step
    pub fn is_immediate(self) -> bool {
        self.fraction() == 0.0
    }
}

/// Outcome of [`iterate_until_done`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution {
    /// Collision time of the first sub-step, if it had one
    pub first_collision: Option<CollisionTime>,
    /// Number of sub-steps that resolved a collision
    pub iterations: u32,
}

impl Resolution {
    pub fn collided(&self) -> bool {
        self.iterations > 0
    }
}

/// Both discs already moving away from each other along `p0_to_p1`
#[inline]
fn separating(v0: Vec2, v1: Vec2, p0_to_p1: Vec2) -> bool {
    v0.dot(p0_to_p1) < 0.0 && v1.dot(p0_to_p1) > 0.0
}

/// Earliest time, as a fraction of `dt`, at which the two discs touch
///
/// Solves `|(p1 + v1·t) − (p0 + v0·t)|² = (r0 + r1)²` for `t`, with the
/// velocities scaled to the whole step so that `t ∈ [0, 1]` spans it.
/// Already-overlapping pairs may return a negative root (contact began in
/// an earlier step) or, when re-approaching, the exit root.
pub fn time_of_collision(sc0: &SweptCircle, sc1: &SweptCircle, dt: f32) -> Option<CollisionTime> {
    let p0_to_p1 = sc1.position - sc0.position;
    if separating(sc0.velocity, sc1.velocity, p0_to_p1) {
        return None;
    }

    let radii_sum = sc0.radius + sc1.radius;
    let radii_sum_squared = radii_sum * radii_sum;

    let v0_to_v1 = sc1.velocity * dt - sc0.velocity * dt;

    // c < 0 means overlapping at t = 0
    let c = p0_to_p1.dot(p0_to_p1) - radii_sum_squared;
    let a = v0_to_v1.dot(v0_to_v1);
    if a.abs() < DENOMINATOR_TOO_CLOSE_TO_ZERO {
        // No relative motion; only an initial overlap can matter.
        // c == -radii_sum_squared means coincident centers.
        if c <= -radii_sum_squared {
            return None;
        } else if c < -DISTANCE_TOO_CLOSE_TO_ZERO {
            return Some(CollisionTime::AlreadyOverlapping);
        }
        return None;
    }

    let b = 2.0 * v0_to_v1.dot(p0_to_p1);

    let inv_2a = 1.0 / (2.0 * a);
    let minus_b = -b * inv_2a;
    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return None;
    }
    let srt = discriminant.sqrt() * inv_2a;

    // root1: contact begins, root2: contact ends
    let root1 = (minus_b - srt).min(minus_b + srt);
    let root2 = minus_b + srt;

    if root1 > 1.0 {
        return None;
    }
    if root2 < -1.0 {
        return None;
    }

    log::debug!("swept circle roots: root1 = {:.4}, root2 = {:.4}", root1, root2);

    if root1 < 0.0 && root1 > -1.0 && c < 0.0 {
        // Overlap began earlier in this window; back up to it unless the
        // exit is nearer and still ahead
        if (0.0..=1.0).contains(&root2) && root2.abs() <= root1.abs() {
            return Some(CollisionTime::At(root2));
        }
        return Some(CollisionTime::At(root1));
    }

    if root1 >= 0.0 {
        return Some(CollisionTime::At(root1));
    }

    if root2 > 0.0 {
        return Some(CollisionTime::At(root2));
    }

    None
}

/// Push overlapping discs apart along the line of centers until they touch
///
/// Returns false when there is nothing to do: the discs don't overlap, or
/// their centers coincide and there is no direction to push along.
pub fn move_out_of_collision(sc0: &mut SweptCircle, sc1: &mut SweptCircle) -> bool {
    let p0_to_p1 = sc1.position - sc0.position;
    let normal = p0_to_p1.normalize_or_zero();
    if normal == Vec2::ZERO {
        return false;
    }
    let distance = p0_to_p1.length();
    let half_overlap = (sc0.radius + sc1.radius - distance) * 0.5;
    if half_overlap <= 0.0 {
        return false;
    }
    sc0.new_position = sc0.position - normal * half_overlap;
    sc1.new_position = sc1.position + normal * half_overlap;
    true
}

/// Advance both discs by `t · dt` (the whole step when `t` is `None`)
pub fn move_to_collision(
    sc0: &mut SweptCircle,
    sc1: &mut SweptCircle,
    dt: f32,
    t: Option<CollisionTime>,
) {
    let time = t.map_or(1.0, CollisionTime::fraction) * dt;
    sc0.new_position = sc0.position + sc0.velocity * time;
    sc1.new_position = sc1.position + sc1.velocity * time;
}

/// Elastic, mass-weighted velocity exchange at the advanced positions
///
/// ```text
/// v0' = v0 − 2·m1/(m0+m1) · <v0−v1, x0−x1>/|x0−x1|² · (x0−x1)
/// v1' = v1 − 2·m0/(m0+m1) · <v1−v0, x1−x0>/|x1−x0|² · (x1−x0)
/// ```
///
/// Writes on top of `new_velocity`, which must already hold the incoming
/// velocity.
pub fn react_to_collision(sc0: &mut SweptCircle, sc1: &mut SweptCircle) {
    let p0_to_p1 = sc1.new_position - sc0.new_position;
    if separating(sc0.velocity, sc1.velocity, p0_to_p1) {
        return;
    }

    let mass_sum = sc0.mass + sc1.mass;
    if mass_sum <= DENOMINATOR_TOO_CLOSE_TO_ZERO {
        return;
    }
    let inv_mass = 1.0 / mass_sum;

    let delta10 = sc0.new_position - sc1.new_position;
    let velocity10 = sc0.velocity - sc1.velocity;

    let distance_squared = delta10.dot(delta10);
    if distance_squared > DENOMINATOR_TOO_CLOSE_TO_ZERO {
        let mass_ratio = 2.0 * sc1.mass * inv_mass;
        let projection = velocity10.dot(delta10) / distance_squared;
        sc0.new_velocity -= mass_ratio * projection * delta10;
    }

    let delta01 = -delta10;
    let distance_squared = delta01.dot(delta01);
    if distance_squared > DENOMINATOR_TOO_CLOSE_TO_ZERO {
        let mass_ratio = 2.0 * sc0.mass * inv_mass;
        let projection = (-velocity10).dot(delta01) / distance_squared;
        sc1.new_velocity -= mass_ratio * projection * delta01;
    }
}

/// Resolve one sub-step of `dt`
///
/// An immediate overlap is only pushed apart here; the bounce itself is left
/// to the next sub-step since the positions have moved.
pub fn single_iteration(
    sc0: &mut SweptCircle,
    sc1: &mut SweptCircle,
    dt: f32,
) -> Option<CollisionTime> {
    let collide_t = time_of_collision(sc0, sc1, dt);
    if let Some(t) = collide_t {
        if t.is_immediate() && move_out_of_collision(sc0, sc1) {
            sc0.new_velocity = sc0.velocity;
            sc1.new_velocity = sc1.velocity;
            return Some(t);
        }
    }

    move_to_collision(sc0, sc1, dt, collide_t);
    sc0.new_velocity = sc0.velocity;
    sc1.new_velocity = sc1.velocity;
    if collide_t.is_some() {
        react_to_collision(sc0, sc1);
    }
    collide_t
}

/// Resolve a whole step of `dt`, sub-stepping at each collision
///
/// The scratch results start out as the current state, so a non-positive
/// `dt` leaves both discs where they are.
pub fn iterate_until_done(sc0: &mut SweptCircle, sc1: &mut SweptCircle, dt: f32) -> Resolution {
    iterate_with_limit(sc0, sc1, dt, ITERATION_MAX)
}

/// [`iterate_until_done`] with an explicit sub-step cap
pub fn iterate_with_limit(
    sc0: &mut SweptCircle,
    sc1: &mut SweptCircle,
    dt: f32,
    iteration_max: u32,
) -> Resolution {
    for sc in [&mut *sc0, &mut *sc1] {
        sc.new_position = sc.position;
        sc.new_velocity = sc.velocity;
    }

    let mut first_collision = None;
    let mut dt_left = dt;
    let mut iterations = 0;
    while dt_left > 0.0 && iterations < iteration_max {
        let Some(t) = single_iteration(sc0, sc1, dt_left) else {
            break;
        };
        if iterations == 0 {
            first_collision = Some(t);
        }
        iterations += 1;
        // t may be negative when backing up out of an old overlap
        dt_left -= t.fraction().abs() * dt_left;
        sc0.commit();
        sc1.commit();
    }
    if iterations >= iteration_max {
        log::debug!("swept circle iteration cap ({}) reached", iteration_max);
    }
    Resolution {
        first_collision,
        iterations,
    }
}
