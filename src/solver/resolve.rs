//! Sequential impulse resolution and Baumgarte positional correction.

use super::Contact;
use crate::body::Body;
use crate::math::Vec2;

/// Fraction of the remaining penetration corrected per tick. Correcting
/// gradually instead of instantaneously avoids injecting energy.
const CORRECTION_PERCENT: f32 = 0.2;
/// Penetration below this is left alone to prevent jitter.
const CORRECTION_SLOP: f32 = 0.01;

/// Above this impact speed the effective restitution starts dropping.
const RESTITUTION_SPEED_THRESHOLD: f32 = 10.0;
const RESTITUTION_FALLOFF: f32 = 0.015;
/// Effective restitution never drops below this fraction of nominal.
const RESTITUTION_FLOOR: f32 = 0.2;

/// Tangential speeds below this count as sticking (static friction).
const STICK_SPEED_THRESHOLD: f32 = 0.1;

/// Two disjoint mutable borrows out of the body arena.
#[inline]
fn pair_mut(bodies: &mut [Body], a: usize, b: usize) -> (&mut Body, &mut Body) {
    debug_assert!(a < b);
    let (head, tail) = bodies.split_at_mut(b);
    (&mut head[a], &mut tail[0])
}

/// Resolve one contact: normal impulse with restitution, then a Coulomb
/// friction impulse, both applied to linear and angular velocity. No-op for
/// already-separating bodies. Wakes both bodies when an impulse lands.
pub fn resolve_contact(bodies: &mut [Body], contact: &Contact) {
    let normal = contact.normal;
    let (a, b) = pair_mut(bodies, contact.a, contact.b);

    // Contact points on each surface, relative to the centers.
    let r_a = normal * a.radius;
    let r_b = -normal * b.radius;

    // Relative velocity at the contact point, angular part included
    // (2D cross as perpendicular).
    let v_a = a.vel + r_a.perp() * a.angular_vel;
    let v_b = b.vel + r_b.perp() * b.angular_vel;
    let rel_vel = v_b - v_a;

    let rel_vel_norm = rel_vel.dot(normal);
    if rel_vel_norm > 0.0 {
        return; // already separating
    }

    // Effective inverse mass including the rotational terms.
    let ra_cross_n = r_a.cross(normal);
    let rb_cross_n = r_b.cross(normal);
    let inv_mass_sum = a.inv_mass
        + b.inv_mass
        + ra_cross_n * ra_cross_n * a.inv_inertia
        + rb_cross_n * rb_cross_n * b.inv_inertia;
    if inv_mass_sum == 0.0 {
        return; // two static bodies
    }

    // Combined restitution, attenuated at high impact speed (real
    // collisions bounce less the harder they hit).
    let mut restitution = (a.restitution + b.restitution) * 0.5;
    let impact_speed = rel_vel_norm.abs();
    if impact_speed > RESTITUTION_SPEED_THRESHOLD {
        let falloff = 1.0 - (impact_speed - RESTITUTION_SPEED_THRESHOLD) * RESTITUTION_FALLOFF;
        restitution *= falloff.max(RESTITUTION_FLOOR);
    }

    let j = -(1.0 + restitution) * rel_vel_norm / inv_mass_sum;
    let impulse = normal * j;

    a.vel -= impulse * a.inv_mass;
    b.vel += impulse * b.inv_mass;
    a.angular_vel -= a.inv_inertia * r_a.cross(impulse);
    b.angular_vel += b.inv_inertia * r_b.cross(impulse);

    // Friction along the contact tangent.
    let tangent = normal.perp();
    let rel_vel_tangent = rel_vel.dot(tangent);
    let mut jt = -rel_vel_tangent / inv_mass_sum;

    // Stick vs slip: near-zero tangential speed engages static friction.
    let friction = if rel_vel_tangent.abs() < STICK_SPEED_THRESHOLD {
        a.static_friction.max(b.static_friction)
    } else {
        (a.friction + b.friction) * 0.5
    };

    // Coulomb model: friction impulse bounded by the normal impulse.
    let max_friction = j.abs() * friction;
    jt = jt.clamp(-max_friction, max_friction);

    let friction_impulse = tangent * jt;
    a.vel -= friction_impulse * a.inv_mass;
    b.vel += friction_impulse * b.inv_mass;
    a.angular_vel -= a.inv_inertia * r_a.cross(friction_impulse);
    b.angular_vel += b.inv_inertia * r_b.cross(friction_impulse);

    a.colliding = true;
    b.colliding = true;
    a.wake();
    b.wake();
}

/// Push overlapping bodies apart along the normal, split by inverse-mass
/// share. Runs as its own pass after the impulse iterations.
pub fn positional_correction(bodies: &mut [Body], contact: &Contact) {
    let (a, b) = pair_mut(bodies, contact.a, contact.b);
    let inv_mass_sum = a.inv_mass + b.inv_mass;
    if inv_mass_sum == 0.0 {
        return;
    }
    let magnitude =
        (contact.penetration - CORRECTION_SLOP).max(0.0) / inv_mass_sum * CORRECTION_PERCENT;
    let correction = contact.normal * magnitude;
    a.pos -= correction * a.inv_mass;
    b.pos += correction * b.inv_mass;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn head_on_pair() -> Vec<Body> {
        let mut a = Body::new(10.0, 10.0, 3.0);
        let mut b = Body::new(15.0, 10.0, 3.0);
        a.vel = Vec2::new(2.0, 0.0);
        b.vel = Vec2::new(-2.0, 0.0);
        vec![a, b]
    }

    fn contact_between(bodies: &[Body]) -> Contact {
        let mut contacts = Vec::new();
        super::super::detect_contacts_brute(bodies, &mut contacts);
        contacts[0]
    }

    #[test]
    fn impulse_separates_an_approaching_pair() {
        let mut bodies = head_on_pair();
        let contact = contact_between(&bodies);
        resolve_contact(&mut bodies, &contact);

        assert!(bodies[0].vel.x < 0.0);
        assert!(bodies[1].vel.x > 0.0);
        assert!(bodies[0].colliding && bodies[1].colliding);
    }

    #[test]
    fn separating_pair_is_untouched() {
        let mut bodies = head_on_pair();
        bodies[0].vel = Vec2::new(-2.0, 0.0);
        bodies[1].vel = Vec2::new(2.0, 0.0);
        let contact = contact_between(&bodies);
        resolve_contact(&mut bodies, &contact);

        assert_eq!(bodies[0].vel, Vec2::new(-2.0, 0.0));
        assert_eq!(bodies[1].vel, Vec2::new(2.0, 0.0));
        assert!(!bodies[0].colliding);
    }

    #[test]
    fn contact_impulse_wakes_sleeping_bodies() {
        let mut bodies = head_on_pair();
        bodies[1].sleeping = true;
        bodies[1].sleep_timer = 5.0;
        bodies[1].vel = Vec2::zero();

        let contact = contact_between(&bodies);
        resolve_contact(&mut bodies, &contact);

        assert!(!bodies[1].sleeping);
        assert_eq!(bodies[1].sleep_timer, 0.0);
    }

    #[test]
    fn static_body_absorbs_no_velocity() {
        let mut bodies = head_on_pair();
        bodies[1].make_static();
        let contact = contact_between(&bodies);
        resolve_contact(&mut bodies, &contact);

        assert_eq!(bodies[1].vel, Vec2::zero());
        assert!(bodies[0].vel.x < 0.0, "moving body bounces off the static one");
    }

    #[test]
    fn correction_respects_slop_and_mass_share() {
        let mut bodies = vec![Body::new(10.0, 10.0, 3.0), Body::new(14.0, 10.0, 3.0)];
        let contact = contact_between(&bodies);
        let before = (bodies[1].pos - bodies[0].pos).length();
        positional_correction(&mut bodies, &contact);
        let after = (bodies[1].pos - bodies[0].pos).length();

        // Equal masses split the push evenly and only a fraction of the
        // overlap is corrected per call.
        assert!(after > before);
        assert!(after < 6.0);
        let mid_before = 12.0;
        let mid_after = (bodies[0].pos.x + bodies[1].pos.x) * 0.5;
        assert!((mid_after - mid_before).abs() < 1e-4);
    }
}
