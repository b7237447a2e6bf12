//! Bloom filters over identifiers
//!
//! A filter is a flat bitmap. Every hash code `h` of an inserted value
//! sets bit `h mod bitsize`, where bit `i` lives in byte `i / 8` at
//! position `i % 8` (least significant bit first). Lookups can return
//! false positives but never false negatives.
//!
//! Serialized form (all integers little-endian):
//! ```text
//! [magic: u16]      optional, see MAGIC
//! [bytesize: u64]
//! [bitmap: bytesize bytes]
//! ```

mod bloom;
mod file;
mod merge;

pub use bloom::Filter;
pub use merge::MergeOp;

/// Default bitmap size in bytes
pub const DEFAULT_CAPACITY: usize = 4096;

/// Bits reserved per expected element when sizing from a count
pub const BITS_PER_ELEMENT: usize = 8;

/// Header written before a serialized filter when requested
pub const MAGIC: u16 = 0xBC01;
