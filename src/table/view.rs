//! Table buffers paired with their kind.

use crate::{
    config::ValidationConfig,
    table::{
        attr::AttrEntry,
        checksum::{pad_size, verify_checksum, CHECKSUM_SIZE},
        find,
        iter::TableIter,
        string::StringEntry,
        value::AttrValueEntry,
        TableKind,
    },
    Error, Result,
};

/// A finalized BIOS table and the kind its entries are read as.
///
/// `BiosTable` borrows the bytes; it never copies or mutates them. Lookups check that the table
/// kind matches the kind of entry asked for.
///
/// ```rust
/// use pldm_bios_table::{
///     table::{BiosTable, StringEntryInfo, TableKind, TableWriter},
///     ValidationConfig,
/// };
///
/// let mut buffer = [0u8; 32];
/// let mut writer = TableWriter::new(&mut buffer, TableKind::String);
/// writer.push(&StringEntryInfo::new(1, "Allowed"))?;
/// let length = writer.finish()?;
///
/// let table = BiosTable::parse(&buffer[..length], TableKind::String, &ValidationConfig::default())?;
/// assert_eq!(table.entry_count()?, 1);
/// assert_eq!(table.find_string_by_text("Allowed")?.map(|e| e.handle()), Some(1));
/// # Ok::<(), pldm_bios_table::Error>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BiosTable<'a> {
    data: &'a [u8],
    kind: TableKind,
}

impl<'a> BiosTable<'a> {
    /// Wrap `data` without checking it.
    ///
    /// Iteration and lookups still bounds-check every entry.
    #[must_use]
    pub fn new(data: &'a [u8], kind: TableKind) -> Self {
        BiosTable { data, kind }
    }

    /// Wrap `data` after running the checks enabled in `config`.
    ///
    /// # Errors
    /// Returns [`Error::InvalidLength`] if `data` cannot hold a checksum,
    /// [`Error::CorruptTable`] if an entry or the padding is malformed, or
    /// [`Error::ChecksumMismatch`] if the trailer does not match.
    pub fn parse(data: &'a [u8], kind: TableKind, config: &ValidationConfig) -> Result<Self> {
        if data.len() < CHECKSUM_SIZE {
            return Err(Error::InvalidLength {
                required: CHECKSUM_SIZE,
                available: data.len(),
            });
        }

        let table = BiosTable { data, kind };
        if config.walks_entries() {
            let entries_end = table.entries_end()?;
            if config.verify_padding {
                table.check_padding(entries_end)?;
            }
        }
        if config.verify_checksum {
            verify_checksum(data)?;
        }
        Ok(table)
    }

    /// The table bytes, trailer included.
    #[must_use]
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// The table kind.
    #[must_use]
    pub fn kind(&self) -> TableKind {
        self.kind
    }

    /// Table length, trailer included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the table holds no bytes at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Iterate the entries.
    #[must_use]
    pub fn iter(&self) -> TableIter<'a> {
        TableIter::new(self.data, self.kind)
    }

    /// Number of entries.
    ///
    /// # Errors
    /// Returns [`Error::CorruptTable`] if an entry is malformed.
    pub fn entry_count(&self) -> Result<usize> {
        self.iter().try_fold(0, |count, entry| entry.map(|_| count + 1))
    }

    /// Find a string by handle.
    ///
    /// # Errors
    /// Returns [`Error::InvalidData`] unless this is a String Table, or
    /// [`Error::CorruptTable`] if a malformed entry precedes the match.
    pub fn find_string_by_handle(&self, handle: u16) -> Result<Option<StringEntry<'a>>> {
        self.expect_kind(TableKind::String)?;
        find::find_string_by_handle(self.data, handle)
    }

    /// Find a string by exact content.
    ///
    /// # Errors
    /// Returns [`Error::InvalidData`] unless this is a String Table, or
    /// [`Error::CorruptTable`] if a malformed entry precedes the match.
    pub fn find_string_by_text(&self, text: impl AsRef<[u8]>) -> Result<Option<StringEntry<'a>>> {
        self.expect_kind(TableKind::String)?;
        find::find_string_by_text(self.data, text)
    }

    /// Find an attribute by handle.
    ///
    /// # Errors
    /// Returns [`Error::InvalidData`] unless this is an Attribute Table, or
    /// [`Error::CorruptTable`] if a malformed entry precedes the match.
    pub fn find_attr_by_handle(&self, handle: u16) -> Result<Option<AttrEntry<'a>>> {
        self.expect_kind(TableKind::Attr)?;
        find::find_attr_by_handle(self.data, handle)
    }

    /// Find an attribute by the handle of its name string.
    ///
    /// # Errors
    /// Returns [`Error::InvalidData`] unless this is an Attribute Table, or
    /// [`Error::CorruptTable`] if a malformed entry precedes the match.
    pub fn find_attr_by_name_handle(&self, name_handle: u16) -> Result<Option<AttrEntry<'a>>> {
        self.expect_kind(TableKind::Attr)?;
        find::find_attr_by_name_handle(self.data, name_handle)
    }

    /// Find an attribute's current value by handle.
    ///
    /// # Errors
    /// Returns [`Error::InvalidData`] unless this is an Attribute Value Table, or
    /// [`Error::CorruptTable`] if a malformed entry precedes the match.
    pub fn find_attr_value_by_handle(&self, handle: u16) -> Result<Option<AttrValueEntry<'a>>> {
        self.expect_kind(TableKind::AttrValue)?;
        find::find_attr_value_by_handle(self.data, handle)
    }

    fn expect_kind(&self, expected: TableKind) -> Result<()> {
        if self.kind != expected {
            return Err(invalid_data!(
                "Expected a {} table, this is a {} table",
                expected,
                self.kind
            ));
        }
        Ok(())
    }

    /// Walk every entry and return the offset where the entry region ends.
    fn entries_end(&self) -> Result<usize> {
        let mut iter = self.iter();
        for entry in iter.by_ref() {
            entry?;
        }
        Ok(iter.offset())
    }

    fn check_padding(&self, entries_end: usize) -> Result<()> {
        let pad_end = entries_end + pad_size(entries_end);
        if pad_end + CHECKSUM_SIZE != self.data.len() {
            log::warn!(
                "{} table entries end at {}, expected trailer of {} bytes to follow, table is {} bytes",
                self.kind,
                entries_end,
                pad_end - entries_end + CHECKSUM_SIZE,
                self.data.len()
            );
            return Err(corrupt_table!(
                entries_end,
                "entry region does not end at the pad and checksum"
            ));
        }

        if let Some(position) = self.data[entries_end..pad_end]
            .iter()
            .position(|&byte| byte != 0)
        {
            log::warn!("{} table has non-zero pad byte at {}", self.kind, entries_end + position);
            return Err(corrupt_table!(entries_end + position, "non-zero pad byte"));
        }
        Ok(())
    }
}

impl<'a> IntoIterator for BiosTable<'a> {
    type Item = Result<crate::table::TableEntry<'a>>;
    type IntoIter = TableIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        table::{compute_checksum, AttrType, IntegerValueInfo, StringEntryInfo, TableWriter},
        test::{build_table, finalized_table},
    };

    fn string_table() -> Vec<u8> {
        finalized_table(&[
            &[1, 0, 5, 0, b'H', b'e', b'l', b'l', b'o'],
            &[2, 0, 6, 0, b'W', b'o', b'r', b'l', b'd', b'!'],
        ])
    }

    #[test]
    fn parse_valid_table() {
        let data = string_table();
        let table = BiosTable::parse(&data, TableKind::String, &ValidationConfig::strict()).unwrap();
        assert_eq!(table.entry_count().unwrap(), 2);
        assert_eq!(table.len(), 24);
        assert_eq!(
            table.find_string_by_handle(2).unwrap().unwrap().string(),
            b"World!"
        );
    }

    #[test]
    fn parse_rejects_bad_checksum() {
        let data = build_table(&[&[1, 0, 2, 0, b'H', b'i']]);
        assert!(matches!(
            BiosTable::parse(&data, TableKind::String, &ValidationConfig::default()),
            Err(Error::ChecksumMismatch { stored: 0, .. })
        ));
        assert!(BiosTable::parse(&data, TableKind::String, &ValidationConfig::minimal()).is_ok());
    }

    #[test]
    fn parse_rejects_dirty_pad() {
        let mut data = vec![1, 0, 2, 0, b'H', b'i', 0x55, 0, 0, 0, 0, 0];
        let checksum = compute_checksum(&data[..8]);
        data[8..].copy_from_slice(&checksum.to_le_bytes());

        let error = BiosTable::parse(&data, TableKind::String, &ValidationConfig::default())
            .unwrap_err();
        assert!(matches!(error, Error::CorruptTable { offset: 6, .. }));

        let checksum_only = ValidationConfig {
            verify_checksum: true,
            ..ValidationConfig::disabled()
        };
        assert!(BiosTable::parse(&data, TableKind::String, &checksum_only).is_ok());
    }

    #[test]
    fn parse_rejects_misplaced_trailer() {
        // Seven bytes follow a six byte entry where pad and checksum need six
        let mut data = vec![1, 0, 2, 0, b'H', b'i'];
        data.extend_from_slice(&[0; 7]);
        let checksum = compute_checksum(&data[..9]);
        data[9..].copy_from_slice(&checksum.to_le_bytes());

        let error = BiosTable::parse(&data, TableKind::String, &ValidationConfig::default())
            .unwrap_err();
        assert!(matches!(error, Error::CorruptTable { offset: 6, .. }));
        assert!(BiosTable::parse(&data, TableKind::String, &ValidationConfig::minimal()).is_ok());
    }

    #[test]
    fn parse_rejects_corrupt_entry() {
        let mut data = string_table();
        data[2] = 0xff;
        let error = BiosTable::parse(&data, TableKind::String, &ValidationConfig::minimal())
            .unwrap_err();
        assert!(error.is_corrupt_table());
        assert!(BiosTable::parse(&data, TableKind::String, &ValidationConfig::disabled()).is_ok());
    }

    #[test]
    fn parse_short_table() {
        assert!(BiosTable::parse(&[0, 0], TableKind::Attr, &ValidationConfig::disabled())
            .unwrap_err()
            .is_invalid_length());
    }

    #[test]
    fn lookups_check_kind() {
        let data = string_table();
        let table = BiosTable::new(&data, TableKind::String);
        assert!(table.find_attr_by_handle(1).unwrap_err().is_invalid_data());
        assert!(table.find_attr_value_by_handle(1).unwrap_err().is_invalid_data());
        assert!(table.find_string_by_text("Hello").unwrap().is_some());
    }

    #[test]
    fn written_value_table() {
        let mut buffer = [0u8; 32];
        let mut writer = TableWriter::new(&mut buffer, TableKind::AttrValue);
        writer
            .push(&IntegerValueInfo {
                handle: 4,
                attr_type: AttrType::IntegerReadOnly,
                value: 0x1122_3344,
            })
            .unwrap();
        let length = writer.finish().unwrap();

        let table =
            BiosTable::parse(&buffer[..length], TableKind::AttrValue, &ValidationConfig::default())
                .unwrap();
        let value = table.find_attr_value_by_handle(4).unwrap().unwrap();
        assert_eq!(value.as_integer().unwrap().value(), 0x1122_3344);
        assert_eq!(table.into_iter().count(), 1);
    }

    #[test]
    fn string_writer_round_trip() {
        let mut buffer = [0u8; 32];
        let mut writer = TableWriter::new(&mut buffer, TableKind::String);
        writer.push(&StringEntryInfo::new(9, "Enabled")).unwrap();
        let length = writer.finish().unwrap();

        let table = BiosTable::new(&buffer[..length], TableKind::String);
        assert_eq!(table.iter().next().unwrap().unwrap().handle(), 9);
    }
}
