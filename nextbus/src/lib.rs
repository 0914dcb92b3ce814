//! Next-departure lookup for Metro Transit.
//!
//! Answers "when does the next vehicle leave this stop?" from free-text
//! route, direction and stop descriptions, by resolving each description
//! to a NexTrip identifier in turn.

pub mod cli;
pub mod config;
pub mod domain;
pub mod nextrip;
pub mod pipeline;
pub mod resolve;
