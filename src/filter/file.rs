//! Reading and writing filters as standalone files
//!
//! Callers sharing a filter file between processes must serialize their
//! access themselves; these helpers take no locks.

use super::Filter;
use crate::Result;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

impl Filter {
    /// Load a filter file, with or without a leading magic header
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path)?;
        let filter = Self::from_serialized(&bytes)?;
        tracing::debug!(
            path = %path.display(),
            bytesize = filter.bytesize(),
            "loaded filter"
        );
        Ok(filter)
    }

    /// Write this filter to `path`, replacing any existing file
    pub fn save(&self, path: impl AsRef<Path>, with_header: bool) -> Result<()> {
        let path = path.as_ref();
        let mut writer = BufWriter::new(File::create(path)?);
        self.serialize(&mut writer, with_header)?;
        writer.flush()?;
        writer.get_ref().sync_all()?;
        tracing::debug!(
            path = %path.display(),
            bytesize = self.bytesize(),
            with_header,
            "saved filter"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{Error, Filter, Identifier};
    use tempfile::tempdir;

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let id = Identifier::digest(b"persistent");

        for with_header in [false, true] {
            let path = dir.path().join(format!("filter-{}.bin", with_header));
            let mut filter = Filter::with_capacity(512).unwrap();
            filter.insert(&id).unwrap();
            filter.save(&path, with_header).unwrap();

            let loaded = Filter::load(&path).unwrap();
            assert_eq!(loaded, filter);
            assert!(loaded.contains(&id));
            assert!(!loaded.is_frozen());
        }
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let err = Filter::load(dir.path().join("nope.bin")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_load_truncated_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("short.bin");
        let bytes = Filter::with_capacity(64).unwrap().to_serialized(false);
        std::fs::write(&path, &bytes[..40]).unwrap();

        assert!(matches!(
            Filter::load(&path),
            Err(Error::TruncatedInput { .. })
        ));
    }
}
