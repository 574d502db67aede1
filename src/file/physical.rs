//! Memory-mapped backend for tables persisted on disk.
//!
//! A host keeps its String, Attribute and Attribute Value tables in files and hands them to
//! firmware or a management client as-is. [`Physical`] maps such a file read-only so the table
//! can be iterated and searched in place.

use super::Backend;
use crate::{Error::FileError, Result};

use memmap2::Mmap;
use std::{fs, path::Path};

/// A table file mapped into memory.
#[derive(Debug)]
pub struct Physical {
    /// Memory-mapped file data
    data: Mmap,
}

impl Physical {
    /// Memory-map the file at `path`.
    ///
    /// # Errors
    /// Returns [`crate::Error::FileError`] if the file cannot be opened or mapped.
    pub fn new(path: impl AsRef<Path>) -> Result<Physical> {
        let file = fs::File::open(path).map_err(FileError)?;
        Self::from_std(&file)
    }

    /// Memory-map an already opened file.
    ///
    /// # Errors
    /// Returns [`crate::Error::FileError`] if mapping fails.
    pub fn from_std(file: &fs::File) -> Result<Physical> {
        // The mapping is read-only; tables are never written through it
        let data = unsafe { Mmap::map(file) }.map_err(FileError)?;
        Ok(Physical { data })
    }
}

impl Backend for Physical {
    fn data(&self) -> &[u8] {
        self.data.as_ref()
    }

    fn len(&self) -> usize {
        self.data.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn maps_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[0x09, 0x00, 0x01, 0x02, 0x00, 0x65, 0x66, 0x00])
            .unwrap();
        file.flush().unwrap();

        let physical = Physical::new(file.path()).unwrap();
        assert_eq!(physical.len(), 8);
        assert_eq!(&physical.data()[5..7], b"ef");

        let reopened = Physical::from_std(file.as_file()).unwrap();
        assert_eq!(reopened.data(), physical.data());
    }

    #[test]
    fn missing_file() {
        let result = Physical::new("/this/table/does/not/exist.bin");
        assert!(matches!(result, Err(FileError(_))));
    }
}
