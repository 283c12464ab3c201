//! Core library for the marketing chat advisor: conversation sessions,
//! heuristic lead scoring, product recommendation, and the HTTP router
//! that exposes them.

pub mod advisor;
pub mod config;
pub mod error;
pub mod telemetry;
