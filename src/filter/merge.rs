//! Bitwise operations for combining equal-size filters

use crate::Error;
use std::fmt;
use std::str::FromStr;

/// How two bitmaps are combined byte by byte
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MergeOp {
    /// Union: positive wherever either input is positive
    #[default]
    Or,
    /// Intersection: never drops an element present in both inputs
    And,
    /// Symmetric difference of the bit patterns
    Xor,
}

impl MergeOp {
    /// Combine one byte from each bitmap
    pub fn apply(self, a: u8, b: u8) -> u8 {
        match self {
            MergeOp::Or => a | b,
            MergeOp::And => a & b,
            MergeOp::Xor => a ^ b,
        }
    }

    /// Lowercase name, as accepted by `FromStr`
    pub fn as_str(&self) -> &'static str {
        match self {
            MergeOp::Or => "or",
            MergeOp::And => "and",
            MergeOp::Xor => "xor",
        }
    }
}

impl fmt::Display for MergeOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MergeOp {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "or" | "|" | "union" => Ok(MergeOp::Or),
            "and" | "&" | "intersection" => Ok(MergeOp::And),
            "xor" | "^" => Ok(MergeOp::Xor),
            _ => Err(Error::InvalidArgument(format!("unknown merge op: {}", s))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply() {
        assert_eq!(MergeOp::Or.apply(0b1100, 0b1010), 0b1110);
        assert_eq!(MergeOp::And.apply(0b1100, 0b1010), 0b1000);
        assert_eq!(MergeOp::Xor.apply(0b1100, 0b1010), 0b0110);
    }

    #[test]
    fn test_parse() {
        assert_eq!("or".parse::<MergeOp>().unwrap(), MergeOp::Or);
        assert_eq!("AND".parse::<MergeOp>().unwrap(), MergeOp::And);
        assert_eq!("^".parse::<MergeOp>().unwrap(), MergeOp::Xor);
        assert!("nand".parse::<MergeOp>().is_err());
        assert_eq!(MergeOp::default(), MergeOp::Or);
    }
}
