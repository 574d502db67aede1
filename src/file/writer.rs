//! Bounds-checked write cursor used by every entry encoder.
//!
//! [`crate::file::writer::Writer`] is the mirror image of [`crate::file::parser::Parser`]: it
//! tracks a position inside a caller-supplied destination buffer and refuses any write that
//! would pass its end. Encoders compute their exact length up front, hand the writer a slice of
//! exactly that size, and then emit fields in wire order.

use crate::{
    file::io::{checked_end, write_le_at, FieldIO},
    Result,
};

/// A cursor-based writer for little-endian BIOS table data.
pub struct Writer<'a> {
    /// Destination buffer
    data: &'a mut [u8],
    /// Current position within the destination
    position: usize,
}

impl<'a> Writer<'a> {
    /// Create a new writer positioned at the start of `data`.
    #[must_use]
    pub fn new(data: &'a mut [u8]) -> Self {
        Writer { data, position: 0 }
    }

    /// Write `value` in little-endian format and advance the position.
    ///
    /// # Errors
    /// Returns [`crate::Error::InvalidLength`] if the value does not fit.
    pub fn write_le<T: FieldIO>(&mut self, value: T) -> Result<()> {
        write_le_at(self.data, &mut self.position, value)
    }

    /// Copy `bytes` verbatim and advance the position.
    ///
    /// # Errors
    /// Returns [`crate::Error::InvalidLength`] if the bytes do not fit.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        let end = checked_end(self.data.len(), self.position, bytes.len())?;
        self.data[self.position..end].copy_from_slice(bytes);
        self.position = end;
        Ok(())
    }

    /// Write `count` zero bytes and advance the position.
    ///
    /// # Errors
    /// Returns [`crate::Error::InvalidLength`] if the padding does not fit.
    pub fn write_zeros(&mut self, count: usize) -> Result<()> {
        let end = checked_end(self.data.len(), self.position, count)?;
        self.data[self.position..end].fill(0);
        self.position = end;
        Ok(())
    }
}
