//! In-process content-addressed collections
//!
//! Blocks pair a payload with its identifier; `IdSet` and `IdMap` are
//! lock-guarded collections keyed by identifier that can be shared
//! between threads. Persistent backends live outside this crate.

mod block;
mod map;
mod set;

pub use block::Block;
pub use map::IdMap;
pub use set::IdSet;
