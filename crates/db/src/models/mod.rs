//! Database row structs.

pub mod template;
