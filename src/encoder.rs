//! Arbitrary-base digit encoders for alternate identifier spellings
//!
//! Base16 is the canonical alphabet; Base62 and Base94 give shorter,
//! still printable forms of the same integer value.

use crate::{Error, Result};
use num_bigint::BigUint;

/// A positional encoder over a fixed digit alphabet
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Encoder {
    name: &'static str,
    digits: &'static [u8],
}

/// Lowercase hexadecimal
pub const BASE16: Encoder = Encoder {
    name: "base16",
    digits: b"0123456789abcdef",
};

/// Digits, then uppercase, then lowercase letters
pub const BASE62: Encoder = Encoder {
    name: "base62",
    digits: b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz",
};

/// Every printable ASCII character from `!` to `~`
pub const BASE94: Encoder = Encoder {
    name: "base94",
    digits: b"!\"#$%&'()*+,-./0123456789:;<=>?@ABCDEFGHIJKLMNOPQRSTUVWXYZ[\\]^_`abcdefghijklmnopqrstuvwxyz{|}~",
};

impl Encoder {
    /// Look up an encoder by its numeric base
    pub fn for_base(base: u32) -> Result<Encoder> {
        match base {
            16 => Ok(BASE16),
            62 => Ok(BASE62),
            94 => Ok(BASE94),
            _ => Err(Error::InvalidArgument(format!("no encoder for base {}", base))),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn base(&self) -> u32 {
        self.digits.len() as u32
    }

    pub fn digits(&self) -> &'static [u8] {
        self.digits
    }

    /// Whether `text` is non-empty and uses only this alphabet
    pub fn matches(&self, text: &str) -> bool {
        !text.is_empty() && text.bytes().all(|c| self.digit_value(c).is_some())
    }

    /// Encode a number; zero encodes as the first digit
    pub fn encode(&self, number: &BigUint) -> String {
        if number.bits() == 0 {
            return (self.digits[0] as char).to_string();
        }
        number
            .to_radix_be(self.base())
            .into_iter()
            .map(|d| self.digits[d as usize] as char)
            .collect()
    }

    /// Decode text produced by [`Encoder::encode`]
    pub fn decode(&self, text: &str) -> Result<BigUint> {
        if text.is_empty() {
            return Err(Error::Format(format!("empty {} string", self.name)));
        }
        let values = text
            .bytes()
            .map(|c| {
                self.digit_value(c).ok_or_else(|| {
                    Error::Format(format!(
                        "invalid {} digit {:?} in {}",
                        self.name, c as char, text
                    ))
                })
            })
            .collect::<Result<Vec<u8>>>()?;
        BigUint::from_radix_be(&values, self.base())
            .ok_or_else(|| Error::Format(format!("invalid {} string: {}", self.name, text)))
    }

    fn digit_value(&self, c: u8) -> Option<u8> {
        self.digits.iter().position(|&d| d == c).map(|i| i as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alphabets() {
        assert_eq!(BASE16.base(), 16);
        assert_eq!(BASE62.base(), 62);
        assert_eq!(BASE94.base(), 94);
        for (i, &d) in BASE94.digits().iter().enumerate() {
            assert_eq!(d, 33 + i as u8);
        }
    }

    #[test]
    fn test_for_base() {
        assert_eq!(Encoder::for_base(62).unwrap(), BASE62);
        assert!(matches!(
            Encoder::for_base(64),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_encode_zero_and_small_values() {
        assert_eq!(BASE16.encode(&BigUint::from(0u32)), "0");
        assert_eq!(BASE62.encode(&BigUint::from(0u32)), "0");
        assert_eq!(BASE94.encode(&BigUint::from(0u32)), "!");
        assert_eq!(BASE16.encode(&BigUint::from(0xdeadbeefu32)), "deadbeef");
        assert_eq!(BASE62.encode(&BigUint::from(61u32)), "z");
        assert_eq!(BASE62.encode(&BigUint::from(62u32)), "10");
    }

    #[test]
    fn test_decode() {
        assert_eq!(BASE62.decode("10").unwrap(), BigUint::from(62u32));
        let n = BigUint::parse_bytes(b"d41d8cd98f00b204e9800998ecf8427e", 16).unwrap();
        for enc in [BASE16, BASE62, BASE94] {
            assert_eq!(enc.decode(&enc.encode(&n)).unwrap(), n);
        }
        assert!(matches!(BASE16.decode("foobar"), Err(Error::Format(_))));
        assert!(matches!(BASE62.decode(""), Err(Error::Format(_))));
    }

    #[test]
    fn test_matches() {
        assert!(BASE16.matches("deadbeef"));
        assert!(!BASE16.matches("foobar"));
        assert!(!BASE16.matches(""));
        assert!(BASE94.matches("a~!"));
        assert!(!BASE94.matches("a b"));
    }
}
