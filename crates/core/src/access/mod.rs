//! Access module - the shared-PIN gate in front of mutating operations.

mod pin_guard;

pub use pin_guard::PinGuard;
