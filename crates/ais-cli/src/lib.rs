//! Batch conversion of localized asset inventory exports.
//!
//! The library half holds the pipeline and its outcome records so they can be
//! driven from tests; the `ais` binary adds argument parsing and terminal
//! output on top.

#![deny(unsafe_code)]

pub mod logging;
pub mod pipeline;
pub mod report;
pub mod types;
