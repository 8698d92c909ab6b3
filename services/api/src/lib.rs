//! MindMate API service
//!
//! REST backend for the MindMate student mental-health platform: accounts,
//! session booking, support groups, messaging, mood tracking, quizzes, and
//! resources.

pub mod config;
pub mod error;
pub mod extract;
pub mod jwt;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod seed;
pub mod state;
pub mod validation;
