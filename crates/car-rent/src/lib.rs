//! Car rental inventory: fleet records, rental eligibility, and the HTTP surface over them.

pub mod config;
pub mod error;
pub mod rentals;
pub mod telemetry;
