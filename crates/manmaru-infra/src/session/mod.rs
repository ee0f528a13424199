//! Session storage and session-cookie signing.

pub mod cookie;
pub mod memory;
