//! Multi-tenant school administration backend.
//!
//! An axum service fronting Postgres: cookie-based JWT sessions, an edge
//! access gate applied to every request, and per-school authorization over
//! the usual admin resources (schools, classes, subjects, students,
//! teachers, enrollments).

pub mod cli;
pub mod config;
pub mod logging;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod state;
pub mod utils;
pub mod validator;
