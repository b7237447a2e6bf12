//! Little-endian length-prefixed framing shared by identifiers and filters
//!
//! ```text
//! identifier: [len: u16 LE][digest: len bytes]
//! filter:     [magic: u16 LE]? [len: u64 LE][bitmap: len bytes]
//! ```

use crate::{Error, Result};
use std::io::{ErrorKind, Read};

/// Fill `buf` from `input`, returning how many bytes were actually read
fn read_full<R: Read + ?Sized>(input: &mut R, buf: &mut [u8]) -> Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match input.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(filled)
}

/// Read exactly `N` bytes or fail with `TruncatedInput`
pub(crate) fn read_array<const N: usize, R: Read + ?Sized>(input: &mut R) -> Result<[u8; N]> {
    let mut buf = [0u8; N];
    let found = read_full(input, &mut buf)?;
    if found < N {
        return Err(Error::TruncatedInput { expected: N, found });
    }
    Ok(buf)
}

/// Read a `len`-byte payload without trusting `len` for the allocation
pub(crate) fn read_payload<R: Read>(input: &mut R, len: u64) -> Result<Vec<u8>> {
    let mut data = Vec::new();
    input.by_ref().take(len).read_to_end(&mut data)?;
    if (data.len() as u64) < len {
        return Err(Error::TruncatedInput {
            expected: usize::try_from(len).unwrap_or(usize::MAX),
            found: data.len(),
        });
    }
    Ok(data)
}
