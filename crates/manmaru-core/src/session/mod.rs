//! Session persistence abstractions.
//!
//! Defines the `SessionStore` trait that the infrastructure layer implements
//! to hold one transcript per client session.

pub mod store;
