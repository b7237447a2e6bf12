//! Block type - the unit of content-addressed storage

use crate::model::{Hashable, Identifier};

/// A payload together with the identifier that names it
#[derive(Clone, Debug)]
pub struct Block {
    id: Identifier,
    data: Vec<u8>,
}

impl Block {
    /// Create a block, computing its identifier from the payload
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        let data = data.into();
        let mut id = Identifier::digest(&data);
        id.freeze();
        Block { id, data }
    }

    /// The content identifier (frozen)
    pub fn id(&self) -> &Identifier {
        &self.id
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Payload size in bytes
    pub fn size(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Check if every payload byte is zero
    pub fn is_zero(&self) -> bool {
        self.data.iter().all(|&b| b == 0)
    }

    /// Take the payload, dropping the identifier
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }
}

impl Hashable for Block {
    fn hashes(&self) -> Vec<u32> {
        self.id.hashes()
    }
}

impl PartialEq for Block {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Block {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Filter;

    #[test]
    fn test_block_identity() {
        let b1 = Block::new(b"hello".to_vec());
        let b2 = Block::new(&b"hello"[..]);
        let b3 = Block::new(b"world".to_vec());

        assert_eq!(b1, b2);
        assert_ne!(b1, b3);
        assert_eq!(b1.size(), 5);
        assert_eq!(b1.id(), &Identifier::digest(b"hello"));
        assert!(b1.id().is_frozen());
    }

    #[test]
    fn test_empty_and_zero_blocks() {
        let empty = Block::new(Vec::new());
        assert!(empty.is_empty());
        assert!(empty.is_zero());

        let zeros = Block::new(vec![0u8; 8]);
        assert!(!zeros.is_empty());
        assert!(zeros.is_zero());
        assert_eq!(zeros.into_data(), vec![0u8; 8]);
    }

    #[test]
    fn test_block_is_filterable() {
        let block = Block::new(b"payload".to_vec());
        let mut filter = Filter::new();
        filter.insert(&block).unwrap();
        assert!(filter.contains(block.id()));
    }
}
