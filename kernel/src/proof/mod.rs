//! Proof module: domain-separated content hashing.
//!
//! Depends on nothing internal. Used by the harness to commit a completed
//! result log to a digest recorded in its run manifest.

pub mod hash;
pub mod hash_domain;
