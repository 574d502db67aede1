//! Bounds-checked read cursor over a BIOS table or a single table entry.
//!
//! This module provides the [`crate::file::parser::Parser`] type, a cursor that maintains a
//! position within a byte slice and validates data availability before every read. All entry
//! decoders and the length computations used by the table iterator go through it, so a malformed
//! length field can only ever produce an error, never an out-of-bounds read.
//!
//! # Usage Examples
//!
//! ```rust
//! use pldm_bios_table::Parser;
//!
//! // String table entry: handle 4, length 2, "Hi"
//! let data = [0x04, 0x00, 0x02, 0x00, b'H', b'i'];
//! let mut parser = Parser::new(&data);
//!
//! let handle = parser.read_le::<u16>()?;
//! let length = parser.read_le::<u16>()?;
//! let text = parser.read_bytes(length as usize)?;
//!
//! assert_eq!(handle, 4);
//! assert_eq!(text, b"Hi");
//! assert_eq!(parser.remaining(), 0);
//! # Ok::<(), pldm_bios_table::Error>(())
//! ```

use crate::{
    file::io::{checked_end, read_le_at, FieldIO},
    Result,
};

/// A cursor-based reader for little-endian BIOS table data.
///
/// `Parser` never copies the data it reads from; slices returned by
/// [`Parser::read_bytes`] borrow from the original buffer for its full lifetime, which is what
/// lets entry views hand out `&'a [u8]` without allocation.
///
/// Failed reads leave the position unchanged and report
/// [`crate::Error::InvalidLength`] with the absolute number of bytes the read required.
pub struct Parser<'a> {
    /// The binary data being parsed
    data: &'a [u8],
    /// Current position within the data buffer
    position: usize,
}

impl<'a> Parser<'a> {
    /// Create a new [`crate::file::parser::Parser`] from a byte slice.
    ///
    /// # Arguments
    /// * `data` - The byte slice to read from
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        Parser { data, position: 0 }
    }

    /// Create a parser positioned at `offset` within `data`.
    ///
    /// # Errors
    /// Returns [`crate::Error::InvalidLength`] if `offset` lies beyond the data.
    pub fn at(data: &'a [u8], offset: usize) -> Result<Self> {
        checked_end(data.len(), offset, 0)?;
        Ok(Parser {
            data,
            position: offset,
        })
    }

    /// Get the current position of the parser within the data buffer.
    #[must_use]
    pub fn pos(&self) -> usize {
        self.position
    }

    /// Number of bytes between the current position and the end of the data.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.position)
    }

    /// Move the position forward by the specified number of bytes.
    ///
    /// # Arguments
    /// * `step` - Amount of bytes to advance
    ///
    /// # Errors
    /// Returns [`crate::Error::InvalidLength`] if advancing by step would exceed the data length.
    pub fn advance_by(&mut self, step: usize) -> Result<()> {
        self.position = checked_end(self.data.len(), self.position, step)?;
        Ok(())
    }

    /// Read a type `T` from the current position in little-endian format and advance the position.
    ///
    /// # Errors
    /// Returns [`crate::Error::InvalidLength`] if reading would exceed the data length.
    pub fn read_le<T: FieldIO>(&mut self) -> Result<T> {
        read_le_at::<T>(self.data, &mut self.position)
    }

    /// Reads a slice of bytes of the specified length from the current position.
    ///
    /// # Arguments
    /// * `length` - The number of bytes to read
    ///
    /// # Errors
    /// Returns [`crate::Error::InvalidLength`] if reading `length` bytes would exceed the data.
    pub fn read_bytes(&mut self, length: usize) -> Result<&'a [u8]> {
        let end = checked_end(self.data.len(), self.position, length)?;
        let bytes = &self.data[self.position..end];
        self.position = end;
        Ok(bytes)
    }
}
