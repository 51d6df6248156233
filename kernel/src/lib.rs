//! Serviette Kernel: the pure core of the triple search.
//!
//! # API Surface
//!
//! - [`triple::TripleV1`] -- an `(a, b, c)` candidate and its log rendering
//! - [`digits::DigitSet`] -- the set of decimal digits a value may be written with
//! - [`predicate::accepts`] -- the sum/product membership predicate
//! - [`proof::hash::canonical_hash`] -- domain-separated SHA-256 content hashing
//!
//! # Module Dependency Direction
//!
//! `digits` ← `triple` ← `predicate`, and `proof` depends on nothing internal.
//!
//! The kernel performs no I/O. Enumeration, persistence and selection live in
//! `serviette_search`; orchestration lives in `serviette_harness`.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod digits;
pub mod predicate;
pub mod proof;
pub mod triple;
