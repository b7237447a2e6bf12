//! Core data model types for bitcache

mod hashable;
mod identifier;

pub use hashable::Hashable;
pub use identifier::{Identifier, MD5_SIZE, MIN_PARSE_SIZE, SHA1_SIZE, SHA256_SIZE};
