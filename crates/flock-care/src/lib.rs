//! Member-care heuristics and mission-trip intake for church ministry teams.

pub mod care;
pub mod config;
pub mod error;
pub mod missions;
pub mod telemetry;
