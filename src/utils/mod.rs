//! Shared utilities.
//!
//! - [`email`]: outbound transactional email over SMTP
//! - [`errors`]: application error type and response envelope
//! - [`password`]: credential hashing and verification
//! - [`session`]: session token codec and claim types

pub mod email;
pub mod errors;
pub mod password;
pub mod session;
