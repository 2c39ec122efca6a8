//! Feature modules, one directory per resource.
//!
//! Each module follows the same layout: `model.rs` (rows and request DTOs),
//! `service.rs` (business logic over parameterized SQL), `controller.rs`
//! (HTTP handlers), `router.rs` (route wiring).

pub mod auth;
pub mod classes;
pub mod enrollments;
pub mod schools;
pub mod students;
pub mod subjects;
pub mod teachers;

pub use self::students::model::SchoolScope;
