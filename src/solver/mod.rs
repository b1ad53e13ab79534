//! Contact solver - detection, sequential impulses, walls, sleep
//!
//! Contacts are transient: detected fresh every tick from the uniform grid,
//! resolved by a fixed number of sequential-impulse iterations, then
//! positionally corrected (Baumgarte) as a separate pass. There is no
//! constraint matrix; stacked contacts converge by iteration.

pub mod boundary;
pub mod contact;
pub mod resolve;
pub mod sleep;

pub use boundary::resolve_walls;
pub use contact::{detect_contacts, detect_contacts_brute, Contact};
pub use resolve::{positional_correction, resolve_contact};
pub use sleep::{try_wake, update_sleep_state, SleepParams};

use crate::body::Body;

/// Run the impulse solver over the full contact list a fixed number of
/// times, in list order. More iterations buy accuracy at proportional cost;
/// there is no convergence guarantee, but 10 is empirically stable at these
/// mass ratios.
pub fn solve_contacts(bodies: &mut [Body], contacts: &[Contact], iterations: u32) {
    for _ in 0..iterations {
        for contact in contacts {
            resolve_contact(bodies, contact);
        }
    }
}
