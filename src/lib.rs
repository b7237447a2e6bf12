//! # bitcache
//!
//! Content-addressable identifiers and mergeable Bloom filters.
//!
//! Blocks of data are named by a cryptographic digest (an [`Identifier`]).
//! A [`Filter`] answers "might this identifier be stored here?" cheaply,
//! so a slower backend only has to be consulted on a possible hit.
//!
//! ## Core Concepts
//!
//! - **Identifiers**: fixed-length digests (MD5, SHA-1, SHA-256 sized or
//!   any other) with hex, Base64 and integer views
//! - **Hash codes**: every 4-byte group of a digest, read little-endian,
//!   indexes one filter bit
//! - **Filters**: fixed-size bitmaps with no false negatives, combinable
//!   with OR / AND / XOR
//! - **Freezing**: identifiers and filters are mutable until frozen, then
//!   permanently read-only
//!
//! ## Example
//!
//! ```
//! use bitcache::{Filter, Identifier};
//!
//! let id = Identifier::parse("d41d8cd98f00b204e9800998ecf8427e")?;
//! let mut filter = Filter::new();
//! filter.insert(&id)?;
//! assert!(filter.contains(&id));
//! # Ok::<(), bitcache::Error>(())
//! ```

pub mod config;
pub mod encoder;
pub mod filter;
pub mod logging;
pub mod model;
pub mod store;

mod codec;
mod error;

pub use config::Config;
pub use encoder::{Encoder, BASE16, BASE62, BASE94};
pub use error::{Error, Result};
pub use filter::{Filter, MergeOp, DEFAULT_CAPACITY, MAGIC};
pub use model::{Hashable, Identifier};
pub use store::{Block, IdMap, IdSet};
