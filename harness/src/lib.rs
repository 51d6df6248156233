//! Serviette Harness: run-level orchestration for the triple search.
//!
//! The harness owns the run directory and the engine state machine. It
//! decides whether enumeration is needed, drives `serviette_search` to
//! produce or read the result log, and reports the best match.
//!
//! The harness does NOT implement the predicate, the log format, or the
//! scoring rule — it delegates to `serviette_kernel` and `serviette_search`.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod engine;
pub mod run_dir;
