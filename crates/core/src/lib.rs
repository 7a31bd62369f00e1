//! Domain types shared by the places database, object storage and API crates.
//!
//! Zero internal dependencies so every other crate can use it.

pub mod coordinate;
pub mod error;
pub mod object_name;
pub mod types;
