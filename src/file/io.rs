//! Little-endian field reading and writing utilities for BIOS table entries.
//!
//! Every multi-byte integer in a PLDM BIOS table is stored little-endian. This module provides
//! the bounds-checked primitives that the [`crate::file::parser::Parser`] and
//! [`crate::file::writer::Writer`] cursors are built on, so that no entry codec ever indexes a
//! buffer directly.
//!
//! # Key Components
//!
//! - [`crate::file::io::FieldIO`] - Trait describing the fixed-width integers a table field can hold
//! - [`crate::file::io::read_le`] - Read a value from the start of a buffer
//! - [`crate::file::io::read_le_at`] - Read a value at an offset, advancing the offset
//! - [`crate::file::io::write_le_at`] - Write a value at an offset, advancing the offset
//!
//! # Usage Examples
//!
//! ```rust
//! use pldm_bios_table::file::io::{read_le_at, write_le_at};
//!
//! let mut data = [0u8; 6];
//! let mut offset = 0;
//! write_le_at(&mut data, &mut offset, 0x0201u16)?;
//! write_le_at(&mut data, &mut offset, 0x0605_0403u32)?;
//! assert_eq!(data, [0x01, 0x02, 0x03, 0x04, 0x05, 0x06]);
//!
//! offset = 0;
//! let handle: u16 = read_le_at(&data, &mut offset)?;
//! assert_eq!(handle, 0x0201);
//! assert_eq!(offset, 2);
//! # Ok::<(), pldm_bios_table::Error>(())
//! ```
//!
//! # Error Handling
//!
//! All functions return [`crate::Error::InvalidLength`] carrying the number of bytes the access
//! would have needed and the number available, and never touch the buffer in that case.
//!
//! # Thread Safety
//!
//! All functions are pure and operate only on the buffers they are handed.

use crate::{Error, Result};

/// Trait for the fixed-width integer types stored in BIOS table fields.
///
/// Each implementation names the byte array it converts from and to; the reading and writing
/// functions use it to move between raw table bytes and typed values without any pointer casts.
pub trait FieldIO: Sized + Copy {
    /// Byte array representation of this type
    type Bytes: AsRef<[u8]> + for<'a> TryFrom<&'a [u8]>;

    /// Encoded width in bytes
    const WIDTH: usize;

    /// Read T from a byte array in little-endian
    fn from_le_bytes(bytes: Self::Bytes) -> Self;

    /// Write T to a byte array in little-endian
    fn to_le_bytes(self) -> Self::Bytes;
}

macro_rules! impl_field_io {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FieldIO for $ty {
                type Bytes = [u8; std::mem::size_of::<$ty>()];

                const WIDTH: usize = std::mem::size_of::<$ty>();

                fn from_le_bytes(bytes: Self::Bytes) -> Self {
                    <$ty>::from_le_bytes(bytes)
                }

                fn to_le_bytes(self) -> Self::Bytes {
                    <$ty>::to_le_bytes(self)
                }
            }
        )*
    };
}

impl_field_io!(u8, u16, u32, u64);

/// Safely reads a value of type `T` in little-endian byte order from the start of a buffer.
///
/// # Arguments
///
/// * `data` - The byte buffer to read from
///
/// # Errors
///
/// Returns [`crate::Error::InvalidLength`] if `data` is shorter than `T`.
pub fn read_le<T: FieldIO>(data: &[u8]) -> Result<T> {
    let mut offset = 0_usize;
    read_le_at(data, &mut offset)
}

/// Safely reads a value of type `T` in little-endian byte order at a specific offset.
///
/// The offset is advanced by the width of `T` on success and left untouched on failure.
///
/// # Arguments
///
/// * `data` - The byte buffer to read from
/// * `offset` - Mutable reference to the offset position (will be advanced after reading)
///
/// # Errors
///
/// Returns [`crate::Error::InvalidLength`] if fewer than `T::WIDTH` bytes remain at `offset`.
pub fn read_le_at<T: FieldIO>(data: &[u8], offset: &mut usize) -> Result<T> {
    let end = checked_end(data.len(), *offset, T::WIDTH)?;

    let Ok(read) = data[*offset..end].try_into() else {
        return Err(Error::InvalidLength {
            required: end,
            available: data.len(),
        });
    };

    *offset = end;

    Ok(T::from_le_bytes(read))
}

/// Safely writes a value of type `T` in little-endian byte order at a specific offset.
///
/// The offset is advanced by the width of `T` on success and left untouched on failure.
///
/// # Arguments
///
/// * `data` - The mutable byte buffer to write to
/// * `offset` - Mutable reference to the offset position (will be advanced after writing)
/// * `value` - The value to write
///
/// # Errors
///
/// Returns [`crate::Error::InvalidLength`] if fewer than `T::WIDTH` bytes remain at `offset`.
pub fn write_le_at<T: FieldIO>(data: &mut [u8], offset: &mut usize, value: T) -> Result<()> {
    let end = checked_end(data.len(), *offset, T::WIDTH)?;

    data[*offset..end].copy_from_slice(value.to_le_bytes().as_ref());
    *offset = end;

    Ok(())
}

/// Computes `offset + len`, failing if the result overflows or passes `available`.
pub(crate) fn checked_end(available: usize, offset: usize, len: usize) -> Result<usize> {
    match offset.checked_add(len) {
        Some(end) if end <= available => Ok(end),
        Some(end) => Err(Error::InvalidLength {
            required: end,
            available,
        }),
        None => Err(Error::InvalidLength {
            required: usize::MAX,
            available,
        }),
    }
}
