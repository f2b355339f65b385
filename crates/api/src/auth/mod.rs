//! Owner session tokens.
//!
//! - [`jwt`] -- signed, short-lived tokens issued at login so the editor
//!   does not have to replay the template code on every request.

pub mod jwt;
