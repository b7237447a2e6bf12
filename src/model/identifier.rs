//! Content identifiers: fixed-length digests with canonical views
//!
//! An identifier wraps the digest of a block. Its size is fixed at
//! construction; the byte values may change until the identifier is
//! frozen. All multi-byte integers derived from the digest for hashing
//! purposes are read as little-endian, so hash codes (and therefore
//! filters) are identical on every platform.

use crate::codec;
use crate::encoder::Encoder;
use crate::model::Hashable;
use crate::{Error, Result};
use base64::{engine::general_purpose::STANDARD, Engine};
use num_bigint::BigUint;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::io::{Read, Write};
use std::str::FromStr;

/// Digest size of an MD5 identifier
pub const MD5_SIZE: usize = 16;
/// Digest size of a SHA-1 identifier
pub const SHA1_SIZE: usize = 20;
/// Digest size of a SHA-256 (or BLAKE3) identifier
pub const SHA256_SIZE: usize = 32;
/// Smallest digest accepted by [`Identifier::parse`]: one hash code
pub const MIN_PARSE_SIZE: usize = 4;

/// A fixed-length digest naming a block of content
#[derive(Clone)]
pub struct Identifier {
    digest: Vec<u8>,
    frozen: bool,
}

impl Identifier {
    /// Create an identifier from raw digest bytes
    pub fn new(bytes: impl Into<Vec<u8>>) -> Result<Self> {
        let digest = bytes.into();
        if digest.is_empty() {
            return Err(Error::InvalidArgument(
                "identifier digest must not be empty".into(),
            ));
        }
        Ok(Identifier {
            digest,
            frozen: false,
        })
    }

    /// Create an all-zero identifier of the given size
    pub fn zeroed(size: usize) -> Result<Self> {
        Self::new(vec![0u8; size])
    }

    /// Hash arbitrary data into a 32-byte identifier
    pub fn digest(data: &[u8]) -> Self {
        Identifier {
            digest: blake3::hash(data).as_bytes().to_vec(),
            frozen: false,
        }
    }

    /// Parse from a hex string
    pub fn parse(s: &str) -> Result<Self> {
        if s.is_empty() {
            return Err(Error::Format("empty identifier string".into()));
        }
        if s.len() % 2 != 0 {
            return Err(Error::Format(format!(
                "odd-length identifier string ({} chars): {}",
                s.len(),
                s
            )));
        }
        let digest = hex::decode(s).map_err(|e| Error::Format(format!("{}: {}", e, s)))?;
        if digest.len() < MIN_PARSE_SIZE {
            return Err(Error::Format(format!(
                "identifier must be at least {} bytes, got {}: {}",
                MIN_PARSE_SIZE,
                digest.len(),
                s
            )));
        }
        Self::new(digest)
    }

    /// Decode text produced by `encoder`, left-padding to `size` bytes
    pub fn decode(encoder: &Encoder, text: &str, size: usize) -> Result<Self> {
        let value = encoder.decode(text)?;
        let bytes = value.to_bytes_be();
        if bytes.len() > size {
            return Err(Error::Format(format!(
                "{} value needs {} bytes, more than {}",
                encoder.name(),
                bytes.len(),
                size
            )));
        }
        let mut digest = vec![0u8; size];
        digest[size - bytes.len()..].copy_from_slice(&bytes);
        Self::new(digest)
    }

    /// Read an identifier written by [`Identifier::serialize`]
    pub fn deserialize<R: Read>(input: &mut R) -> Result<Self> {
        let len = u16::from_le_bytes(codec::read_array::<2, _>(input)?);
        let digest = codec::read_payload(input, u64::from(len))?;
        Self::new(digest)
    }

    /// Digest length in bytes
    pub fn size(&self) -> usize {
        self.digest.len()
    }

    /// Check if every byte is zero
    pub fn is_zero(&self) -> bool {
        self.digest.iter().all(|&b| b == 0)
    }

    /// Check if any byte is set
    pub fn is_nonzero(&self) -> bool {
        !self.is_zero()
    }

    /// Byte at `index`, or `None` when out of range
    pub fn get(&self, index: usize) -> Option<u8> {
        self.digest.get(index).copied()
    }

    /// Replace the byte at `index`, returning the new value
    pub fn set(&mut self, index: usize, byte: u8) -> Result<u8> {
        self.ensure_mutable()?;
        let size = self.size();
        let slot = self
            .digest
            .get_mut(index)
            .ok_or(Error::OutOfBounds { index, size })?;
        *slot = byte;
        Ok(byte)
    }

    /// Set every byte to zero
    pub fn clear(&mut self) -> Result<&mut Self> {
        self.fill(0x00)
    }

    /// Set every byte to `byte`
    pub fn fill(&mut self, byte: u8) -> Result<&mut Self> {
        self.ensure_mutable()?;
        self.digest.fill(byte);
        Ok(self)
    }

    /// Iterate over the digest bytes in storage order
    pub fn bytes(&self) -> impl Iterator<Item = u8> + Clone + '_ {
        self.digest.iter().copied()
    }

    /// Compare as unsigned big-endian integers; `None` if the sizes differ
    pub fn compare(&self, other: &Identifier) -> Option<Ordering> {
        if self.size() != other.size() {
            return None;
        }
        // equal lengths: lexicographic byte order is numeric order
        Some(self.digest.cmp(&other.digest))
    }

    /// The first 4 bytes as a little-endian `u32`
    ///
    /// Digests shorter than 4 bytes are zero-padded.
    pub fn hash_code(&self) -> u32 {
        let mut word = [0u8; 4];
        let n = self.digest.len().min(4);
        word[..n].copy_from_slice(&self.digest[..n]);
        u32::from_le_bytes(word)
    }

    /// Consecutive 4-byte groups of the digest as little-endian `u32`s
    ///
    /// The first code always equals [`Identifier::hash_code`]. Trailing
    /// bytes that do not fill a whole group are ignored.
    pub fn hashes(&self) -> Vec<u32> {
        if self.digest.len() < 4 {
            return vec![self.hash_code()];
        }
        self.digest
            .chunks_exact(4)
            .map(|c| u32::from_le_bytes([c[0], c[1], c[2], c[3]]))
            .collect()
    }

    /// The digest as an unsigned big-endian integer
    pub fn to_integer(&self) -> BigUint {
        BigUint::from_bytes_be(&self.digest)
    }

    /// Get the raw bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.digest
    }

    /// Copy the raw bytes out
    pub fn to_bytes(&self) -> Vec<u8> {
        self.digest.clone()
    }

    /// Convert to hex string
    pub fn to_hex(&self) -> String {
        hex::encode(&self.digest)
    }

    /// Textual form in base 2, 8, 10 or 16
    ///
    /// Base 16 is the canonical, zero-padded hex form. The other bases
    /// render the integer value without leading zeros.
    pub fn to_string_radix(&self, base: u32) -> Result<String> {
        match base {
            16 => Ok(self.to_hex()),
            2 | 8 | 10 => Ok(self.to_integer().to_str_radix(base)),
            _ => Err(Error::InvalidArgument(format!("invalid radix {}", base))),
        }
    }

    /// Standard padded Base64 of the digest bytes
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.digest)
    }

    /// Encode the integer value with an arbitrary-base encoder
    pub fn encode(&self, encoder: &Encoder) -> String {
        encoder.encode(&self.to_integer())
    }

    /// Get a short prefix for display (first 7 chars, like git)
    pub fn short(&self) -> String {
        let hex = self.to_hex();
        hex[..hex.len().min(7)].to_string()
    }

    /// Write a `u16` little-endian length header followed by the digest
    pub fn serialize<W: Write>(&self, output: &mut W) -> Result<&Self> {
        let len = u16::try_from(self.digest.len()).map_err(|_| {
            Error::InvalidArgument(format!(
                "digest of {} bytes does not fit a 2-byte length header",
                self.digest.len()
            ))
        })?;
        output.write_all(&len.to_le_bytes())?;
        output.write_all(&self.digest)?;
        Ok(self)
    }

    /// Make this identifier permanently read-only
    pub fn freeze(&mut self) -> &mut Self {
        self.frozen = true;
        self
    }

    /// Whether [`Identifier::freeze`] has been called
    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// An unfrozen copy with its own digest buffer
    pub fn dup(&self) -> Self {
        Identifier {
            digest: self.digest.clone(),
            frozen: false,
        }
    }

    fn ensure_mutable(&self) -> Result<()> {
        if self.frozen {
            return Err(Error::Immutable("identifier"));
        }
        Ok(())
    }
}

impl Hashable for Identifier {
    fn hashes(&self) -> Vec<u32> {
        Identifier::hashes(self)
    }
}

impl PartialEq for Identifier {
    fn eq(&self, other: &Self) -> bool {
        self.digest == other.digest
    }
}

impl Eq for Identifier {}

impl PartialOrd for Identifier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.compare(other)
    }
}

impl Hash for Identifier {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u32(self.hash_code());
    }
}

impl FromStr for Identifier {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Identifier::parse(s)
    }
}

impl TryFrom<&[u8]> for Identifier {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        Identifier::new(bytes)
    }
}

impl AsRef<[u8]> for Identifier {
    fn as_ref(&self) -> &[u8] {
        &self.digest
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Identifier({})", self.short())
    }
}

impl Serialize for Identifier {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Identifier {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        let digest = hex::decode(&s)
            .map_err(|e| serde::de::Error::custom(format!("{}: {}", e, s)))?;
        Identifier::new(digest).map_err(serde::de::Error::custom)
    }
}
