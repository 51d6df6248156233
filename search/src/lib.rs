//! Serviette Search: exhaustive triple enumeration into an append-only
//! result log, and best-match selection over that log.
//!
//! This crate depends only on `serviette_kernel` — it does NOT depend on
//! `serviette_harness`.
//!
//! # Crate dependency graph
//!
//! ```text
//! serviette_kernel  ←  serviette_search  ←  serviette_harness
//! (triple, digits)     (enumerate, log,      (engine, run dir, CLI)
//!                       select)
//! ```
//!
//! # Key types
//!
//! - [`EnumerationParamsV1`](params::EnumerationParamsV1) — bound and digit set
//! - [`TripleSink`](log::TripleSink) — destination for accepted triples
//! - [`ResultLogWriter`](log_writer::ResultLogWriter) — text log writer with flush policy
//! - [`ResultLogReader`](log_reader::ResultLogReader) — fail-closed line reader
//! - [`TripleScorer`](scorer::TripleScorer) — scoring function for selection
//! - [`BestMatchV1`](select::BestMatchV1) — the selected record

#![forbid(unsafe_code)]

pub mod enumerate;
pub mod error;
pub mod log;
pub mod log_reader;
pub mod log_writer;
pub mod params;
pub mod scorer;
pub mod select;
