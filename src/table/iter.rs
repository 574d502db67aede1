//! Kind-aware cursor over a finalized BIOS table.
//!
//! The iterator advances by each entry's self-described length. It reports the table as ended
//! once no more than [`MAX_PAD_CHECKSUM`] bytes remain, so the trailer is never read as an
//! entry. Entries must end before the final [`CHECKSUM_SIZE`] bytes; an entry whose length runs
//! into the checksum, or whose type tag cannot be sized, yields [`crate::Error::CorruptTable`].

use std::iter::FusedIterator;

use crate::{
    table::{
        attr::AttrEntry,
        checksum::{CHECKSUM_SIZE, MAX_PAD_CHECKSUM},
        string::StringEntry,
        traits::EntryReadable,
        value::AttrValueEntry,
        TableKind,
    },
    Error, Result,
};

/// One entry of a table, typed by the table kind it was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableEntry<'a> {
    /// String Table entry
    String(StringEntry<'a>),
    /// Attribute Table entry
    Attr(AttrEntry<'a>),
    /// Attribute Value Table entry
    AttrValue(AttrValueEntry<'a>),
}

impl<'a> TableEntry<'a> {
    /// Parse the entry at the start of `data` as an entry of `kind`.
    ///
    /// # Errors
    /// Returns [`Error::InvalidLength`] or [`Error::InvalidData`] as the entry parser does.
    pub fn parse(kind: TableKind, data: &'a [u8]) -> Result<Self> {
        Ok(match kind {
            TableKind::String => TableEntry::String(StringEntry::parse(data)?),
            TableKind::Attr => TableEntry::Attr(AttrEntry::parse(data)?),
            TableKind::AttrValue => TableEntry::AttrValue(AttrValueEntry::parse(data)?),
        })
    }

    /// String or attribute handle.
    #[must_use]
    pub fn handle(&self) -> u16 {
        match self {
            TableEntry::String(entry) => entry.handle(),
            TableEntry::Attr(entry) => entry.handle(),
            TableEntry::AttrValue(entry) => entry.handle(),
        }
    }

    /// The kind of table this entry was read from.
    #[must_use]
    pub fn kind(&self) -> TableKind {
        match self {
            TableEntry::String(_) => TableKind::String,
            TableEntry::Attr(_) => TableKind::Attr,
            TableEntry::AttrValue(_) => TableKind::AttrValue,
        }
    }

    /// The entry's encoded bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &'a [u8] {
        match self {
            TableEntry::String(entry) => entry.as_bytes(),
            TableEntry::Attr(entry) => entry.as_bytes(),
            TableEntry::AttrValue(entry) => entry.as_bytes(),
        }
    }

    /// Encoded length of the entry.
    #[must_use]
    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    /// Always `false`; an entry holds at least its header.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.as_bytes().is_empty()
    }

    /// The String Table entry, if this is one.
    #[must_use]
    pub fn as_string_entry(&self) -> Option<&StringEntry<'a>> {
        match self {
            TableEntry::String(entry) => Some(entry),
            _ => None,
        }
    }

    /// The Attribute Table entry, if this is one.
    #[must_use]
    pub fn as_attr(&self) -> Option<&AttrEntry<'a>> {
        match self {
            TableEntry::Attr(entry) => Some(entry),
            _ => None,
        }
    }

    /// The Attribute Value Table entry, if this is one.
    #[must_use]
    pub fn as_attr_value(&self) -> Option<&AttrValueEntry<'a>> {
        match self {
            TableEntry::AttrValue(entry) => Some(entry),
            _ => None,
        }
    }
}

/// Self-described length of the entry of `kind` at the start of `data`.
///
/// # Errors
/// Returns [`Error::InvalidLength`] if the length fields are truncated, or
/// [`Error::InvalidData`] for type tags that cannot be sized.
pub fn entry_len(kind: TableKind, data: &[u8]) -> Result<usize> {
    match kind {
        TableKind::String => StringEntry::entry_len(data),
        TableKind::Attr => AttrEntry::entry_len(data),
        TableKind::AttrValue => AttrValueEntry::entry_len(data),
    }
}

/// Cursor over the entries of one table.
///
/// Besides the explicit [`TableIter::current`] / [`TableIter::advance`] cursor API, the iterator
/// implements [`Iterator`], yielding `Result<TableEntry>` and stopping after the first error.
///
/// ```rust
/// use pldm_bios_table::table::{append_pad_checksum, TableIter, TableKind};
///
/// let mut table = vec![
///     0x00, 0x00, 0x05, 0x00, b'H', b'e', b'l', b'l', b'o',
///     0, 0, 0, 0, 0, 0, 0,
/// ];
/// append_pad_checksum(&mut table, 9);
///
/// let handles = TableIter::new(&table, TableKind::String)
///     .map(|entry| entry.map(|entry| entry.handle()))
///     .collect::<Result<Vec<_>, _>>()?;
/// assert_eq!(handles, [0]);
/// # Ok::<(), pldm_bios_table::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct TableIter<'a> {
    data: &'a [u8],
    kind: TableKind,
    offset: usize,
    failed: bool,
}

impl<'a> TableIter<'a> {
    /// Position a cursor on the first entry of `data`.
    #[must_use]
    pub fn new(data: &'a [u8], kind: TableKind) -> Self {
        TableIter {
            data,
            kind,
            offset: 0,
            failed: false,
        }
    }

    /// The table kind entries are read as.
    #[must_use]
    pub fn kind(&self) -> TableKind {
        self.kind
    }

    /// Byte offset of the current entry.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Returns `true` once no entries remain, or after a corrupt entry was met.
    #[must_use]
    pub fn is_end(&self) -> bool {
        self.failed || self.data.len().saturating_sub(self.offset) <= MAX_PAD_CHECKSUM
    }

    /// The entry at the cursor.
    ///
    /// # Errors
    /// Returns [`Error::OutOfBounds`] at the end of the table, or [`Error::CorruptTable`] if
    /// the entry cannot be sized or runs into the checksum.
    pub fn current(&self) -> Result<TableEntry<'a>> {
        let region = self.entry_region()?;
        TableEntry::parse(self.kind, region).map_err(|error| self.corrupt(&error))
    }

    /// Move the cursor past the current entry.
    ///
    /// Advancing at the end of the table does nothing. After a corrupt entry the cursor stays
    /// where it is and [`TableIter::is_end`] reports `true`.
    ///
    /// # Errors
    /// Returns [`Error::CorruptTable`] if the current entry cannot be sized or runs into the
    /// checksum.
    pub fn advance(&mut self) -> Result<()> {
        if self.is_end() {
            return Ok(());
        }

        let region = self.entry_region()?;
        let length = match entry_len(self.kind, region) {
            Ok(length) if length <= region.len() => length,
            Ok(length) => {
                let error = Error::InvalidLength {
                    required: length,
                    available: region.len(),
                };
                return Err(self.fail(&error));
            }
            Err(error) => return Err(self.fail(&error)),
        };
        self.offset += length;
        Ok(())
    }

    /// Bytes from the cursor up to the checksum.
    fn entry_region(&self) -> Result<&'a [u8]> {
        if self.is_end() {
            return Err(Error::OutOfBounds);
        }
        // is_end guarantees more than MAX_PAD_CHECKSUM bytes remain
        Ok(&self.data[self.offset..self.data.len() - CHECKSUM_SIZE])
    }

    fn corrupt(&self, cause: &Error) -> Error {
        log::warn!(
            "corrupt {} table entry at offset {}: {}",
            self.kind,
            self.offset,
            cause
        );
        corrupt_table!(self.offset, "{} entry: {}", self.kind, cause)
    }

    fn fail(&mut self, cause: &Error) -> Error {
        let error = self.corrupt(cause);
        self.failed = true;
        error
    }
}

impl<'a> Iterator for TableIter<'a> {
    type Item = Result<TableEntry<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.is_end() {
            return None;
        }

        match self.current() {
            Ok(entry) => {
                self.offset += entry.len();
                Some(Ok(entry))
            }
            Err(error) => {
                self.failed = true;
                Some(Err(error))
            }
        }
    }
}

impl FusedIterator for TableIter<'_> {}
