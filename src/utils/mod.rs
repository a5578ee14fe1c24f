//! Small shared utilities.

mod poll;

// Re-export public API
pub use poll::poll_until;
