//! Request extractors.
//!
//! - [`session::MaybeSession`] -- Optional owner session from a Bearer token.

pub mod session;
