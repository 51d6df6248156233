//! Shared helpers for the lock tests.

pub mod oracle;
