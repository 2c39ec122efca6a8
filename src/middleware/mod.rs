//! Request-processing middleware and extractors.
//!
//! - [`gate`]: the edge access gate, evaluated before every handler
//! - [`auth`]: [`auth::CurrentUser`] cookie extractor
//! - [`role`]: fine-grained role and tenant-admin checks used inside handlers

pub mod auth;
pub mod gate;
pub mod role;
