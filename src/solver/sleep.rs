//! Sleep/wake state machine.
//!
//! Active -> Sleeping after the body's speed stays below the velocity
//! threshold for the time limit (simulated seconds). Sleeping -> Active on
//! any contact impulse (see resolve.rs), or when the once-per-tick check
//! sees gravity or residual velocity above the wake thresholds. A sleeping
//! body is skipped by both integration passes.

use crate::body::Body;
use crate::math::Vec2;

#[derive(Clone, Copy, Debug)]
pub struct SleepParams {
    /// Speed below which the sleep timer accumulates
    pub velocity_threshold: f32,
    /// Simulated seconds below the threshold before falling asleep
    pub time_limit: f32,
    /// Gravitational acceleration that pulls a sleeper awake
    pub wake_accel_threshold: f32,
}

impl Default for SleepParams {
    fn default() -> Self {
        Self {
            velocity_threshold: 0.08,
            time_limit: 1.0,
            wake_accel_threshold: 0.5,
        }
    }
}

/// Advance the timer for an active body; flips the sleeping flag once the
/// limit is reached. Static bodies never sleep (they never integrate
/// anyway).
pub fn update_sleep_state(body: &mut Body, dt: f32, params: &SleepParams) {
    if body.sleeping || body.is_static() {
        return;
    }
    if body.speed() < params.velocity_threshold {
        body.sleep_timer += dt;
        if body.sleep_timer >= params.time_limit {
            body.sleeping = true;
        }
    } else {
        body.sleep_timer = 0.0;
    }
}

/// Once-per-tick wake check for a sleeping body: strong gravity or residual
/// velocity reactivates it. The evaluated acceleration is passed in because
/// sleeping bodies discard it otherwise.
pub fn try_wake(body: &mut Body, accel: Vec2, params: &SleepParams) {
    if !body.sleeping {
        return;
    }
    if accel.length() > params.wake_accel_threshold || body.speed() > params.velocity_threshold {
        body.wake();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timer_accumulates_only_below_threshold() {
        let params = SleepParams::default();
        let mut body = Body::new(10.0, 10.0, 3.0);
        body.vel = Vec2::new(0.05, 0.0);

        update_sleep_state(&mut body, 0.4, &params);
        assert!((body.sleep_timer - 0.4).abs() < 1e-6);
        assert!(!body.sleeping);

        // Speeding up resets the timer.
        body.vel = Vec2::new(1.0, 0.0);
        update_sleep_state(&mut body, 0.4, &params);
        assert_eq!(body.sleep_timer, 0.0);
    }

    #[test]
    fn body_sleeps_at_the_time_limit() {
        let params = SleepParams::default();
        let mut body = Body::new(10.0, 10.0, 3.0);
        body.vel = Vec2::zero();

        for _ in 0..10 {
            update_sleep_state(&mut body, 0.1, &params);
        }
        assert!(body.sleeping);
    }

    #[test]
    fn strong_gravity_wakes_a_sleeper() {
        let params = SleepParams::default();
        let mut body = Body::new(10.0, 10.0, 3.0);
        body.sleeping = true;

        try_wake(&mut body, Vec2::new(0.1, 0.0), &params);
        assert!(body.sleeping, "weak pull stays below the wake threshold");

        try_wake(&mut body, Vec2::new(1.0, 0.0), &params);
        assert!(!body.sleeping);
    }
}
