//! Domain core for the Valentine greeting service.
//!
//! Holds the template record model, the store port every backend
//! implements, and the credential-gated [`access::AccessFlow`] that all
//! HTTP routes go through. Nothing here touches a database or HTTP directly.

pub mod access;
pub mod email;
pub mod error;
pub mod slug;
pub mod store;
pub mod template;
pub mod types;
