//! Sequential table construction.

use crate::{
    table::{
        checksum::{append_pad_checksum_checked, pad_checksum_size},
        iter::{entry_len, TableIter},
        traits::EntryWritable,
        TableKind,
    },
    Error, Result,
};

/// Writes entries back to back into a caller-owned buffer, then finalizes the table.
///
/// Each push is capacity checked and validated; a failed push leaves the entries written so far
/// untouched. [`TableWriter::finish`] consumes the writer, so a table cannot be finalized twice.
///
/// ```rust
/// use pldm_bios_table::table::{
///     verify_checksum, IntegerValueInfo, AttrType, TableKind, TableWriter,
/// };
///
/// let mut buffer = [0u8; 32];
/// let mut writer = TableWriter::new(&mut buffer, TableKind::AttrValue);
/// writer.push(&IntegerValueInfo { handle: 9, attr_type: AttrType::Integer, value: 42 })?;
/// let length = writer.finish()?;
///
/// assert_eq!(length, 16);
/// verify_checksum(&buffer[..length])?;
/// # Ok::<(), pldm_bios_table::Error>(())
/// ```
#[derive(Debug)]
pub struct TableWriter<'a> {
    data: &'a mut [u8],
    kind: TableKind,
    len: usize,
    entries: usize,
}

impl<'a> TableWriter<'a> {
    /// Start an empty table of `kind` at the beginning of `data`.
    #[must_use]
    pub fn new(data: &'a mut [u8], kind: TableKind) -> Self {
        TableWriter {
            data,
            kind,
            len: 0,
            entries: 0,
        }
    }

    /// The table kind being written.
    #[must_use]
    pub fn kind(&self) -> TableKind {
        self.kind
    }

    /// Bytes of entries written so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` before the first entry is pushed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries == 0
    }

    /// Number of entries written so far.
    #[must_use]
    pub fn entries(&self) -> usize {
        self.entries
    }

    /// Table length [`TableWriter::finish`] would produce right now.
    #[must_use]
    pub fn finished_len(&self) -> usize {
        self.len + pad_checksum_size(self.len)
    }

    /// Encode `entry` after the entries written so far.
    ///
    /// Returns the offset of the new entry.
    ///
    /// # Errors
    /// Returns [`Error::InvalidData`] if the entry belongs to another table kind or fails its
    /// semantic checks, or [`Error::InvalidLength`] if it does not fit.
    pub fn push<E: EntryWritable>(&mut self, entry: &E) -> Result<usize> {
        if E::KIND != self.kind {
            return Err(invalid_data!(
                "Cannot write a {} entry into a {} table",
                E::KIND,
                self.kind
            ));
        }

        let offset = self.len;
        let written = entry.encode_checked(&mut self.data[offset..])?;
        self.len += written;
        self.entries += 1;
        Ok(offset)
    }

    /// Copy one already-encoded entry after the entries written so far.
    ///
    /// # Errors
    /// Returns [`Error::InvalidData`] if `entry` is not exactly one well-formed entry of this
    /// table kind, or [`Error::InvalidLength`] if it does not fit.
    pub fn push_raw(&mut self, entry: &[u8]) -> Result<usize> {
        let length = entry_len(self.kind, entry)?;
        if length != entry.len() {
            return Err(invalid_data!(
                "Encoded {} entry describes {} bytes but {} were given",
                self.kind,
                length,
                entry.len()
            ));
        }

        let offset = self.len;
        let available = self.data.len() - offset;
        if available < length {
            return Err(Error::InvalidLength {
                required: length,
                available,
            });
        }

        self.data[offset..offset + length].copy_from_slice(entry);
        self.len += length;
        self.entries += 1;
        Ok(offset)
    }

    /// Append pad and checksum, returning the finalized table length.
    ///
    /// # Errors
    /// Returns [`Error::InvalidLength`] if the trailer does not fit.
    pub fn finish(self) -> Result<usize> {
        let total = append_pad_checksum_checked(self.data, self.len)?;
        log::debug!(
            "wrote {} table with {} entries ({} bytes)",
            self.kind,
            self.entries,
            total
        );
        Ok(total)
    }
}

/// Copy an Attribute Value Table into `dest`, replacing the entry whose handle matches `entry`.
///
/// Every other entry is copied unchanged and in order. The replacement must keep the attribute
/// class of the stored value; switching between the writable and read-only tag of a class is
/// allowed. When no entry carries the handle, `entry` is appended after the copied entries. The copy is then padded and checksummed and its
/// finalized length returned.
///
/// # Errors
/// Returns [`Error::CorruptTable`] if `src` cannot be walked, [`Error::InvalidData`] if `entry`
/// is invalid or changes the class of the stored value, or [`Error::InvalidLength`] if `dest` is too small.
pub fn copy_and_update<E: EntryWritable>(src: &[u8], dest: &mut [u8], entry: &E) -> Result<usize> {
    let handle = entry.handle();
    let mut writer = TableWriter::new(dest, TableKind::AttrValue);
    let mut replaced = false;

    for current in TableIter::new(src, TableKind::AttrValue) {
        let current = current?;
        if current.handle() == handle && !replaced {
            if let (Some(stored), Some(updated)) = (current.as_attr_value(), entry.attr_type()) {
                if stored.attr_type().kind() != updated.kind() {
                    return Err(invalid_data!(
                        "Attribute {} holds a {} value and cannot be updated with {}",
                        handle,
                        stored.attr_type(),
                        updated
                    ));
                }
            }
            writer.push(entry)?;
            replaced = true;
        } else {
            writer.push_raw(current.as_bytes())?;
        }
    }

    if !replaced {
        log::debug!("attribute {handle} not present in source table, appending");
        writer.push(entry)?;
    }
    writer.finish()
}
