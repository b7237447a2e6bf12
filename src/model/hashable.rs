//! The hash-code capability consumed by filters

/// Anything that can be inserted into or tested against a [`Filter`].
///
/// Implementors return a deterministic, ordered sequence of 32-bit hash
/// codes. The same value must always produce the same codes, in every
/// process, or filters built elsewhere stop being meaningful.
///
/// [`Filter`]: crate::Filter
pub trait Hashable {
    fn hashes(&self) -> Vec<u32>;
}

impl<T: Hashable + ?Sized> Hashable for &T {
    fn hashes(&self) -> Vec<u32> {
        (**self).hashes()
    }
}

impl<T: Hashable + ?Sized> Hashable for Box<T> {
    fn hashes(&self) -> Vec<u32> {
        (**self).hashes()
    }
}
