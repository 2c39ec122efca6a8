//! Application configuration, loaded once at startup.
//!
//! Each submodule owns one concern and exposes a `from_env()` constructor.
//! Required values fail fast with a panic during startup; nothing reads the
//! environment at request time.
//!
//! - [`cors`]: allowed origins
//! - [`credentials`]: login lookup column overrides
//! - [`database`]: PostgreSQL pool initialization
//! - [`email`]: SMTP settings for transactional mail
//! - [`session`]: signing secret, cookie flags, client timeout durations

pub mod cors;
pub mod credentials;
pub mod database;
pub mod email;
pub mod session;
