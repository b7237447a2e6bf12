//! The filter bitmap and its merge algebra

use super::{MergeOp, BITS_PER_ELEMENT, DEFAULT_CAPACITY, MAGIC};
use crate::codec;
use crate::model::Hashable;
use crate::{Error, Result};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::io::{Read, Write};
use std::ops::{BitAnd, BitOr, BitXor};

/// A fixed-size Bloom filter
#[derive(Clone)]
pub struct Filter {
    bitmap: Vec<u8>,
    frozen: bool,
}

impl Filter {
    /// An empty filter of [`DEFAULT_CAPACITY`] bytes
    pub fn new() -> Self {
        Filter {
            bitmap: vec![0u8; DEFAULT_CAPACITY],
            frozen: false,
        }
    }

    /// An empty filter of `bytesize` bytes
    pub fn with_capacity(bytesize: usize) -> Result<Self> {
        Self::from_bytes(vec![0u8; bytesize])
    }

    /// Adopt an existing bitmap verbatim
    pub fn from_bytes(bitmap: impl Into<Vec<u8>>) -> Result<Self> {
        let bitmap = bitmap.into();
        if bitmap.is_empty() {
            return Err(Error::InvalidArgument(
                "filter bitmap must not be empty".into(),
            ));
        }
        Ok(Filter {
            bitmap,
            frozen: false,
        })
    }

    /// Build a filter containing every element of `elements`
    ///
    /// Without an explicit capacity the bitmap gets [`BITS_PER_ELEMENT`]
    /// bits per element (at least one byte).
    pub fn from_elements<I, H>(elements: I, capacity: Option<usize>) -> Result<Self>
    where
        I: IntoIterator<Item = H>,
        H: Hashable,
    {
        let elements: Vec<H> = elements.into_iter().collect();
        let bytesize = match capacity {
            Some(bytes) => bytes,
            None => (elements.len() * BITS_PER_ELEMENT / 8).max(1),
        };
        let mut filter = Self::with_capacity(bytesize)?;
        for element in &elements {
            filter.insert(element)?;
        }
        Ok(filter)
    }

    /// Read a filter written by [`Filter::serialize`] without a header
    pub fn deserialize<R: Read>(input: &mut R) -> Result<Self> {
        let bytesize = u64::from_le_bytes(codec::read_array::<8, _>(input)?);
        let bitmap = codec::read_payload(input, bytesize)?;
        tracing::trace!(bytesize, "deserialized filter");
        Self::from_bytes(bitmap)
    }

    /// Read a serialized filter from memory, with or without a header
    pub fn from_serialized(bytes: &[u8]) -> Result<Self> {
        let magic = MAGIC.to_le_bytes();
        if bytes.len() >= 10 && bytes[..2] == magic {
            let declared = u64::from_le_bytes([
                bytes[2], bytes[3], bytes[4], bytes[5], bytes[6], bytes[7], bytes[8], bytes[9],
            ]);
            if declared == (bytes.len() - 10) as u64 {
                return Self::deserialize(&mut &bytes[2..]);
            }
        }
        Self::deserialize(&mut &bytes[..])
    }

    /// Bitmap length in bytes
    pub fn bytesize(&self) -> usize {
        self.bitmap.len()
    }

    /// Number of addressable bits
    pub fn bitsize(&self) -> usize {
        self.bitmap.len() * 8
    }

    /// Check if no bit is set
    pub fn is_empty(&self) -> bool {
        self.bitmap.iter().all(|&b| b == 0)
    }

    /// Fraction of bits still zero, in `0.0..=1.0`
    pub fn space(&self) -> f64 {
        let zeros: u64 = self.bitmap.iter().map(|b| u64::from(b.count_zeros())).sum();
        zeros as f64 / self.bitsize() as f64
    }

    /// Whether `element` may have been inserted
    ///
    /// A `false` answer is definite; a `true` answer may be a false positive.
    pub fn contains<H: Hashable + ?Sized>(&self, element: &H) -> bool {
        element.hashes().into_iter().all(|h| self.bit(h))
    }

    /// `1` if the filter may contain `element`, `0` otherwise
    pub fn count<H: Hashable + ?Sized>(&self, element: &H) -> usize {
        usize::from(self.contains(element))
    }

    /// Set the bit for every hash code of `element`
    pub fn insert<H: Hashable + ?Sized>(&mut self, element: &H) -> Result<&mut Self> {
        self.ensure_mutable()?;
        let bitsize = self.bitsize();
        for h in element.hashes() {
            let index = h as usize % bitsize;
            self.bitmap[index / 8] |= 1 << (index % 8);
        }
        Ok(self)
    }

    /// Bit at `index`, or `None` when out of range
    pub fn get(&self, index: usize) -> Option<bool> {
        self.bitmap
            .get(index / 8)
            .map(|byte| byte & (1 << (index % 8)) != 0)
    }

    /// Set or clear the bit at `index`
    pub fn set(&mut self, index: usize, value: bool) -> Result<bool> {
        self.ensure_mutable()?;
        let size = self.bitsize();
        let byte = self
            .bitmap
            .get_mut(index / 8)
            .ok_or(Error::OutOfBounds { index, size })?;
        let mask = 1u8 << (index % 8);
        if value {
            *byte |= mask;
        } else {
            *byte &= !mask;
        }
        Ok(value)
    }

    /// Zero every bit
    pub fn clear(&mut self) -> Result<&mut Self> {
        self.ensure_mutable()?;
        self.bitmap.fill(0);
        Ok(self)
    }

    /// A new filter combining this one with `other`
    pub fn merge(&self, other: &Filter, op: MergeOp) -> Result<Filter> {
        let mut merged = self.dup();
        merged.merge_in_place(other, op)?;
        Ok(merged)
    }

    /// Combine `other` into this filter
    pub fn merge_in_place(&mut self, other: &Filter, op: MergeOp) -> Result<&mut Self> {
        self.merge_bytes(&other.bitmap, op)
    }

    /// Combine a raw bitmap of equal size into this filter
    pub fn merge_bytes(&mut self, other: &[u8], op: MergeOp) -> Result<&mut Self> {
        self.ensure_mutable()?;
        if other.len() != self.bitmap.len() {
            return Err(Error::IncompatibleSize {
                expected: self.bitmap.len(),
                found: other.len(),
            });
        }
        for (a, b) in self.bitmap.iter_mut().zip(other) {
            *a = op.apply(*a, *b);
        }
        tracing::trace!(%op, bytesize = self.bitmap.len(), "merged filter");
        Ok(self)
    }

    /// Union with `other`
    pub fn or(&self, other: &Filter) -> Result<Filter> {
        self.merge(other, MergeOp::Or)
    }

    /// Intersection with `other`
    ///
    /// The false-positive rate is at most that of either input, but can
    /// exceed that of a filter built from the true intersection.
    pub fn and(&self, other: &Filter) -> Result<Filter> {
        self.merge(other, MergeOp::And)
    }

    /// Symmetric difference with `other`
    pub fn xor(&self, other: &Filter) -> Result<Filter> {
        self.merge(other, MergeOp::Xor)
    }

    /// Union with `other`, in place
    pub fn or_in_place(&mut self, other: &Filter) -> Result<&mut Self> {
        self.merge_in_place(other, MergeOp::Or)
    }

    /// Intersection with `other`, in place
    pub fn and_in_place(&mut self, other: &Filter) -> Result<&mut Self> {
        self.merge_in_place(other, MergeOp::And)
    }

    /// Symmetric difference with `other`, in place
    pub fn xor_in_place(&mut self, other: &Filter) -> Result<&mut Self> {
        self.merge_in_place(other, MergeOp::Xor)
    }

    /// Write the length-prefixed bitmap, optionally preceded by [`MAGIC`]
    pub fn serialize<W: Write>(&self, output: &mut W, with_header: bool) -> Result<&Self> {
        if with_header {
            output.write_all(&MAGIC.to_le_bytes())?;
        }
        output.write_all(&(self.bitmap.len() as u64).to_le_bytes())?;
        output.write_all(&self.bitmap)?;
        Ok(self)
    }

    /// The serialized form as a byte vector
    pub fn to_serialized(&self, with_header: bool) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.bitmap.len() + 10);
        if with_header {
            out.extend_from_slice(&MAGIC.to_le_bytes());
        }
        out.extend_from_slice(&(self.bitmap.len() as u64).to_le_bytes());
        out.extend_from_slice(&self.bitmap);
        out
    }

    /// Hex (base 16) or binary (base 2) rendering of the bitmap
    ///
    /// Binary digits run from the most significant bit of each byte.
    pub fn to_string_radix(&self, base: u32) -> Result<String> {
        match base {
            16 => Ok(hex::encode(&self.bitmap)),
            2 => Ok(self.bitmap.iter().map(|b| format!("{:08b}", b)).collect()),
            _ => Err(Error::InvalidArgument(format!("invalid radix {}", base))),
        }
    }

    /// Get the raw bitmap
    pub fn as_bytes(&self) -> &[u8] {
        &self.bitmap
    }

    /// Make this filter permanently read-only
    pub fn freeze(&mut self) -> &mut Self {
        self.frozen = true;
        self
    }

    /// Whether [`Filter::freeze`] has been called
    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// An unfrozen copy with its own bitmap
    pub fn dup(&self) -> Self {
        Filter {
            bitmap: self.bitmap.clone(),
            frozen: false,
        }
    }

    fn bit(&self, h: u32) -> bool {
        let index = h as usize % self.bitsize();
        self.bitmap[index / 8] & (1 << (index % 8)) != 0
    }

    fn ensure_mutable(&self) -> Result<()> {
        if self.frozen {
            return Err(Error::Immutable("filter"));
        }
        Ok(())
    }
}

impl Default for Filter {
    fn default() -> Self {
        Filter::new()
    }
}

impl PartialEq for Filter {
    fn eq(&self, other: &Self) -> bool {
        self.bitmap == other.bitmap
    }
}

/// A filter equals a raw bitmap with the same bytes
impl PartialEq<[u8]> for Filter {
    fn eq(&self, other: &[u8]) -> bool {
        self.bitmap == *other
    }
}

impl PartialEq<Filter> for [u8] {
    fn eq(&self, other: &Filter) -> bool {
        other == self
    }
}

impl Eq for Filter {}

impl Hash for Filter {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.bitmap.hash(state);
    }
}

impl AsRef<[u8]> for Filter {
    fn as_ref(&self) -> &[u8] {
        &self.bitmap
    }
}

impl fmt::Debug for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Filter")
            .field("bytesize", &self.bytesize())
            .field("space", &self.space())
            .field("frozen", &self.frozen)
            .finish()
    }
}

impl BitOr for &Filter {
    type Output = Result<Filter>;

    fn bitor(self, rhs: &Filter) -> Self::Output {
        self.or(rhs)
    }
}

impl BitAnd for &Filter {
    type Output = Result<Filter>;

    fn bitand(self, rhs: &Filter) -> Self::Output {
        self.and(rhs)
    }
}

impl BitXor for &Filter {
    type Output = Result<Filter>;

    fn bitxor(self, rhs: &Filter) -> Self::Output {
        self.xor(rhs)
    }
}
