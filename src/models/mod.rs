//! Typed records shared by the HTTP layer, query translation and stores.

pub mod log;
pub mod search;
