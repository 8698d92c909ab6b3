//! Common library for the MindMate platform
//!
//! This crate provides shared infrastructure used by the MindMate services:
//! database connectivity, configuration, and error handling.

pub mod database;
pub mod error;
