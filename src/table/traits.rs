//! Encoding and decoding traits shared by every BIOS table entry kind.

use crate::{
    table::{AttrType, TableKind},
    Result,
};

/// Borrowed, validated view over one encoded entry.
///
/// Implementors compute the entry's self-described length from its leading fields and refuse to
/// parse when the provided slice is shorter than that. A slice longer than the entry is accepted;
/// the view covers only the entry's own bytes.
pub trait EntryReadable<'a>: Sized {
    /// The table kind this entry belongs to.
    const KIND: TableKind;

    /// Compute the full encoded length of the entry starting at `data[0]`.
    ///
    /// Only the fields needed to derive the length are read; `data` may be shorter than the
    /// returned value.
    ///
    /// # Errors
    /// Returns [`crate::Error::InvalidLength`] if the length fields themselves are truncated, or
    /// [`crate::Error::InvalidData`] if a type tag makes the length undefined.
    fn entry_len(data: &[u8]) -> Result<usize>;

    /// Parse the entry at the start of `data`.
    ///
    /// # Errors
    /// Returns [`crate::Error::InvalidLength`] if `data` does not hold the whole entry, or
    /// [`crate::Error::InvalidData`] if a type tag is not supported.
    fn parse(data: &'a [u8]) -> Result<Self>;
}

/// Caller-built description of an entry that can be encoded into a destination buffer.
///
/// Encoding always writes exactly [`EntryWritable::encoded_len`] bytes at the start of the
/// destination and returns that length.
pub trait EntryWritable {
    /// The table kind this entry belongs to.
    const KIND: TableKind;

    /// Handle of the encoded entry.
    fn handle(&self) -> u16;

    /// Exact number of bytes the encoded entry occupies.
    fn encoded_len(&self) -> usize;

    /// Attribute-type tag written at byte 2, for attribute and attribute-value entries.
    fn attr_type(&self) -> Option<AttrType> {
        None
    }

    /// Semantic checks run by [`EntryWritable::encode_checked`] before writing.
    ///
    /// # Errors
    /// Returns [`crate::Error::InvalidData`] naming the violated constraint.
    fn validate(&self) -> Result<()> {
        Ok(())
    }

    /// Serialize the entry fields through `writer`.
    ///
    /// The writer is sized to exactly [`EntryWritable::encoded_len`] bytes.
    ///
    /// # Errors
    /// Returns [`crate::Error::InvalidLength`] if the writer runs out of room, or
    /// [`crate::Error::InvalidData`] if a count does not fit its wire field.
    fn write_fields(&self, writer: &mut crate::file::writer::Writer<'_>) -> Result<()>;

    /// Encode into `data`, trusting the caller to have validated the inputs.
    ///
    /// No semantic checks run.
    ///
    /// # Panics
    /// Panics if `data` is shorter than [`EntryWritable::encoded_len`], or if a count does not
    /// fit its wire field.
    fn encode(&self, data: &mut [u8]) -> usize {
        let length = self.encoded_len();
        assert!(
            length <= data.len(),
            "length <= entry_length: {} bytes required, {} available",
            length,
            data.len()
        );

        let mut writer = crate::file::writer::Writer::new(&mut data[..length]);
        if let Err(error) = self.write_fields(&mut writer) {
            panic!("unchecked {} entry encode failed: {error}", Self::KIND);
        }
        length
    }

    /// Encode into `data` after checking capacity and semantic constraints.
    ///
    /// Nothing is written when an error is returned.
    ///
    /// # Errors
    /// Returns [`crate::Error::InvalidLength`] if `data` is shorter than
    /// [`EntryWritable::encoded_len`], or [`crate::Error::InvalidData`] if
    /// [`EntryWritable::validate`] rejects the inputs.
    fn encode_checked(&self, data: &mut [u8]) -> Result<usize> {
        self.validate()?;

        let length = self.encoded_len();
        if data.len() < length {
            return Err(crate::Error::InvalidLength {
                required: length,
                available: data.len(),
            });
        }

        let mut writer = crate::file::writer::Writer::new(&mut data[..length]);
        self.write_fields(&mut writer)?;
        Ok(length)
    }
}

/// Convert a slice length into the width of its wire count field.
pub(crate) fn count_field<T: TryFrom<usize>>(count: usize, field: &str) -> Result<T> {
    T::try_from(count).map_err(|_| invalid_data!("Too many {}", field))
}
