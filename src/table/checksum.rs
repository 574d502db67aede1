//! Pad and checksum trailer.
//!
//! A finalized table is its entry region, followed by `(4 - len % 4) % 4` zero bytes, followed by
//! the little-endian CRC-32 (IEEE 802.3) of everything before it.

use crc32fast::Hasher as Crc32;

use crate::{
    file::{io::read_le, writer::Writer},
    Error, Result,
};

/// Size of the trailing checksum in bytes.
pub const CHECKSUM_SIZE: usize = 4;

/// Largest possible pad plus checksum; a table with this many bytes or fewer left holds no
/// further entries.
pub const MAX_PAD_CHECKSUM: usize = 7;

/// Number of zero bytes needed to align `unpadded` to a multiple of four.
#[must_use]
pub fn pad_size(unpadded: usize) -> usize {
    (4 - unpadded % 4) % 4
}

/// Number of bytes appended by [`append_pad_checksum`] to an entry region of `unpadded` bytes.
///
/// ```rust
/// use pldm_bios_table::table::pad_checksum_size;
///
/// assert_eq!(pad_checksum_size(0), 4);
/// assert_eq!(pad_checksum_size(1), 7);
/// assert_eq!(pad_checksum_size(2), 6);
/// assert_eq!(pad_checksum_size(3), 5);
/// ```
#[must_use]
pub fn pad_checksum_size(unpadded: usize) -> usize {
    pad_size(unpadded) + CHECKSUM_SIZE
}

/// CRC-32 over `data`.
#[must_use]
pub fn compute_checksum(data: &[u8]) -> u32 {
    let mut hasher = Crc32::new();
    hasher.update(data);
    hasher.finalize()
}

/// Pad and checksum the entry region occupying `data[..unpadded]`.
///
/// Returns the finalized table length.
///
/// # Panics
/// Panics if `data` cannot hold the region plus its trailer.
pub fn append_pad_checksum(data: &mut [u8], unpadded: usize) -> usize {
    let total = unpadded + pad_checksum_size(unpadded);
    assert!(
        total <= data.len(),
        "table_length >= size + pad_checksum: {} bytes required, {} available",
        total,
        data.len()
    );
    match write_trailer(data, unpadded) {
        Ok(total) => total,
        Err(error) => panic!("unchecked trailer write failed: {error}"),
    }
}

/// Pad and checksum the entry region occupying `data[..unpadded]`, reporting short buffers.
///
/// # Errors
/// Returns [`Error::InvalidLength`] if `data` cannot hold the region plus its trailer; the buffer
/// is left untouched.
pub fn append_pad_checksum_checked(data: &mut [u8], unpadded: usize) -> Result<usize> {
    let total = unpadded
        .checked_add(pad_checksum_size(unpadded))
        .ok_or(Error::InvalidLength {
            required: usize::MAX,
            available: data.len(),
        })?;
    if total > data.len() {
        return Err(Error::InvalidLength {
            required: total,
            available: data.len(),
        });
    }
    write_trailer(data, unpadded)
}

/// Callers have checked that `data` holds at least `unpadded + pad_checksum_size(unpadded)` bytes.
fn write_trailer(data: &mut [u8], unpadded: usize) -> Result<usize> {
    let pad = pad_size(unpadded);
    let padded = unpadded + pad;
    Writer::new(&mut data[unpadded..]).write_zeros(pad)?;

    let checksum = compute_checksum(&data[..padded]);
    Writer::new(&mut data[padded..]).write_le(checksum)?;

    let total = padded + CHECKSUM_SIZE;
    log::debug!("finalized BIOS table: {unpadded} entry bytes, {total} bytes total, checksum {checksum:#010x}");
    Ok(total)
}

/// The checksum stored in the last four bytes of a finalized table.
///
/// # Errors
/// Returns [`Error::InvalidLength`] if `table` is shorter than [`CHECKSUM_SIZE`].
pub fn stored_checksum(table: &[u8]) -> Result<u32> {
    let start = table
        .len()
        .checked_sub(CHECKSUM_SIZE)
        .ok_or(Error::InvalidLength {
            required: CHECKSUM_SIZE,
            available: table.len(),
        })?;
    read_le::<u32>(&table[start..])
}

/// Check that the trailer checksum covers everything before it.
///
/// # Errors
/// Returns [`Error::InvalidLength`] for tables shorter than the checksum, or
/// [`Error::ChecksumMismatch`] when the stored and computed values differ.
pub fn verify_checksum(table: &[u8]) -> Result<()> {
    let stored = stored_checksum(table)?;
    let computed = compute_checksum(&table[..table.len() - CHECKSUM_SIZE]);
    if stored != computed {
        log::warn!("BIOS table checksum mismatch: stored {stored:#010x}, computed {computed:#010x}");
        return Err(Error::ChecksumMismatch { stored, computed });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pad_sizes() {
        assert_eq!(pad_size(0), 0);
        assert_eq!(pad_size(1), 3);
        assert_eq!(pad_size(4), 0);
        assert_eq!(pad_size(7), 1);

        assert_eq!(pad_checksum_size(0), 4);
        assert_eq!(pad_checksum_size(1), 7);
        assert_eq!(pad_checksum_size(2), 6);
        assert_eq!(pad_checksum_size(3), 5);
        assert_eq!(pad_checksum_size(4), 4);
    }

    #[test]
    fn append_known_vector() {
        let mut table = vec![0x09, 0x00, 0x01, 0x02, 0x00, 0x65, 0x66];
        table.resize(table.len() + pad_checksum_size(table.len()), 0xaa);

        let total = append_pad_checksum_checked(&mut table, 7).unwrap();
        assert_eq!(total, 12);
        assert_eq!(
            table,
            [0x09, 0x00, 0x01, 0x02, 0x00, 0x65, 0x66, 0x00, 0x6d, 0x81, 0x4a, 0xb6]
        );
        assert!(verify_checksum(&table).is_ok());
    }

    #[test]
    fn append_checked_short_buffer() {
        let mut table = vec![0x09, 0x00, 0x01, 0x02, 0x00, 0x65, 0x66, 0x00, 0x00, 0x00, 0x00];
        let before = table.clone();

        let error = append_pad_checksum_checked(&mut table, 7).unwrap_err();
        assert!(matches!(
            error,
            Error::InvalidLength {
                required: 12,
                available: 11
            }
        ));
        assert_eq!(table, before);
    }

    #[test]
    fn append_aligned_region_has_no_pad() {
        let mut table = vec![1, 2, 3, 4, 0, 0, 0, 0];
        assert_eq!(append_pad_checksum(&mut table, 4), 8);
        assert_eq!(stored_checksum(&table).unwrap(), compute_checksum(&[1, 2, 3, 4]));
    }

    #[test]
    #[should_panic(expected = "table_length >= size + pad_checksum")]
    fn append_unchecked_short_buffer_panics() {
        let mut table = vec![0u8; 10];
        append_pad_checksum(&mut table, 7);
    }

    #[test]
    fn verify_detects_corruption() {
        let mut table = vec![0x09, 0x00, 0x01, 0x02, 0x00, 0x65, 0x66, 0x00, 0x6d, 0x81, 0x4a, 0xb6];
        table[5] = 0x64;
        assert!(matches!(
            verify_checksum(&table),
            Err(Error::ChecksumMismatch {
                stored: 0xb64a_816d,
                ..
            })
        ));
    }

    #[test]
    fn verify_short_table() {
        assert!(matches!(
            verify_checksum(&[0, 0, 0]),
            Err(Error::InvalidLength {
                required: 4,
                available: 3
            })
        ));
    }

    #[test]
    fn empty_region() {
        let mut table = [0u8; 4];
        assert_eq!(append_pad_checksum(&mut table, 0), 4);
        assert_eq!(stored_checksum(&table).unwrap(), 0);
    }
}
