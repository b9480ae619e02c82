//! Tick scheduling
//!
//! The game never drives its own clock. Whoever runs a [`Session`](crate::session::Session)
//! hands it a [`Scheduler`], which is armed after every completed tick and
//! disarmed when play stops.

pub mod manual;
pub mod timer;

use std::time::Duration;

pub use manual::ManualScheduler;
pub use timer::TickTimer;

/// A one-shot timer the session re-arms after each tick
pub trait Scheduler {
    /// Request a tick after `delay`, replacing any earlier request
    fn arm(&mut self, delay: Duration);

    /// Drop any outstanding request
    fn disarm(&mut self);

    /// Whether a tick is currently requested
    fn is_armed(&self) -> bool;
}
