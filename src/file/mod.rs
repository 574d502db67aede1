//! Table storage and low-level byte access.
//!
//! # Key Components
//!
//! - [`io`] - Little-endian field reads and writes over byte slices
//! - [`parser::Parser`] - Bounds-checked read cursor used by every entry decoder
//! - [`writer::Writer`] - Bounds-checked write cursor used by every entry encoder
//! - [`Backend`] - Source of persisted table bytes, implemented by [`Memory`] and the
//!   memory-mapped [`Physical`]
//! - [`TableFile`] - A persisted table together with its kind
//!
//! # Examples
//!
//! ```rust
//! use pldm_bios_table::{file::TableFile, table::TableKind, ValidationConfig};
//!
//! let data = vec![0x09, 0x00, 0x01, 0x02, 0x00, 0x65, 0x66, 0x00, 0x6d, 0x81, 0x4a, 0xb6];
//! let file = TableFile::from_mem(data, TableKind::AttrValue);
//!
//! let table = file.parse(&ValidationConfig::default())?;
//! let entry = table.find_attr_value_by_handle(9)?.expect("handle 9 present");
//! assert_eq!(entry.as_string()?.string(), b"ef");
//! # Ok::<(), pldm_bios_table::Error>(())
//! ```

pub mod io;
pub mod parser;
pub mod writer;

mod memory;
mod physical;

use std::path::Path;

use crate::{
    config::ValidationConfig,
    table::{BiosTable, TableKind},
    Result,
};

pub use memory::Memory;
pub use physical::Physical;

/// Backend trait for table data sources.
///
/// Abstracts over where persisted table bytes live, allowing both in-memory and on-disk
/// representations. All implementations must be thread-safe.
pub trait Backend: Send + Sync {
    /// Returns the entire data buffer.
    fn data(&self) -> &[u8];

    /// Returns the total length of the data buffer.
    fn len(&self) -> usize;

    /// Returns `true` if the backend holds no data.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A persisted BIOS table and the kind its entries are read as.
///
/// The bytes are owned by the backend; [`TableFile::table`] and [`TableFile::parse`] hand out
/// borrowed [`BiosTable`] views.
pub struct TableFile {
    backend: Box<dyn Backend>,
    kind: TableKind,
}

impl TableFile {
    /// Memory-map the table stored at `path`.
    ///
    /// # Errors
    /// Returns [`crate::Error::FileError`] if the file cannot be opened or mapped.
    pub fn from_path(path: impl AsRef<Path>, kind: TableKind) -> Result<TableFile> {
        let path = path.as_ref();
        let backend = Physical::new(path)?;
        log::debug!(
            "mapped {} table from {} ({} bytes)",
            kind,
            path.display(),
            backend.len()
        );
        Ok(Self::with_backend(Box::new(backend), kind))
    }

    /// Wrap a table already loaded into memory.
    #[must_use]
    pub fn from_mem(data: Vec<u8>, kind: TableKind) -> TableFile {
        Self::with_backend(Box::new(Memory::new(data)), kind)
    }

    /// Wrap any backend.
    #[must_use]
    pub fn with_backend(backend: Box<dyn Backend>, kind: TableKind) -> TableFile {
        TableFile { backend, kind }
    }

    /// The table kind.
    #[must_use]
    pub fn kind(&self) -> TableKind {
        self.kind
    }

    /// The table bytes, trailer included.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        self.backend.data()
    }

    /// Table length, trailer included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.backend.len()
    }

    /// Returns `true` for an empty file.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.backend.is_empty()
    }

    /// View the table without validating it.
    #[must_use]
    pub fn table(&self) -> BiosTable<'_> {
        BiosTable::new(self.backend.data(), self.kind)
    }

    /// View the table after running the checks enabled in `config`.
    ///
    /// # Errors
    /// Returns the errors of [`BiosTable::parse`].
    pub fn parse(&self, config: &ValidationConfig) -> Result<BiosTable<'_>> {
        BiosTable::parse(self.backend.data(), self.kind, config)
    }
}

impl std::fmt::Debug for TableFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableFile")
            .field("kind", &self.kind)
            .field("len", &self.backend.len())
            .finish()
    }
}
