use thiserror::Error;

macro_rules! invalid_data {
    // Single string version
    ($msg:expr) => {
        crate::Error::InvalidData {
            message: $msg.to_string(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::InvalidData {
            message: format!($fmt, $($arg)*),
        }
    };
}

macro_rules! corrupt_table {
    ($offset:expr, $msg:expr) => {
        crate::Error::CorruptTable {
            offset: $offset,
            message: $msg.to_string(),
        }
    };

    ($offset:expr, $fmt:expr, $($arg:tt)*) => {
        crate::Error::CorruptTable {
            offset: $offset,
            message: format!($fmt, $($arg)*),
        }
    };
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// The variants split into the two failure classes a BIOS table codec can hit: a buffer that is
/// too small for the requested operation, and data that is present but wrong. Table-level
/// corruption found while walking a table is reported separately so that a hosting service can
/// distinguish a bad persisted table from a bad call.
///
/// # Error Categories
///
/// ## Codec Errors
/// - [`Error::InvalidLength`] - Destination or source buffer too small
/// - [`Error::InvalidData`] - Type-tag mismatch or semantic constraint violation
///
/// ## Table Errors
/// - [`Error::CorruptTable`] - Malformed entry met during iteration or lookup
/// - [`Error::ChecksumMismatch`] - Trailer checksum does not cover the table contents
///
/// ## Cursor and I/O Errors
/// - [`Error::OutOfBounds`] - Entry requested from a table cursor that is already at the end
/// - [`Error::FileError`] - Filesystem I/O errors
///
/// # Examples
///
/// ```rust
/// use pldm_bios_table::{table::string::StringEntry, Error};
///
/// let truncated = [0x01, 0x00, 0x05, 0x00, b'H'];
/// match StringEntry::parse(&truncated) {
///     Err(Error::InvalidLength { required, available }) => {
///         assert_eq!(required, 9);
///         assert_eq!(available, 5);
///     }
///     other => panic!("unexpected result: {other:?}"),
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// A buffer is too small for the requested operation.
    ///
    /// Returned by every checked encoder when the destination capacity is below the exact
    /// encoded length, and by every decoder when the source does not hold the whole entry
    /// its own length fields describe.
    ///
    /// # Fields
    ///
    /// * `required` - Number of bytes the operation needs
    /// * `available` - Number of bytes that were provided
    #[error("Invalid length - {required} bytes required, {available} available")]
    InvalidLength {
        /// Number of bytes the operation needs
        required: usize,
        /// Number of bytes that were provided
        available: usize,
    },

    /// The data is structurally present but not acceptable.
    ///
    /// Covers attribute-type mismatches (asking an integer entry for its possible values),
    /// unsupported type tags on standalone entries, and the semantic checks performed before
    /// encoding attribute entries. The message text identifies the violated constraint and is
    /// stable, callers may match on it.
    #[error("{message}")]
    InvalidData {
        /// Description of the violated constraint
        message: String,
    },

    /// A table could not be walked because one of its entries is malformed.
    ///
    /// Raised by the table iterator and every lookup built on it when an entry carries an
    /// unsupported attribute-type tag or describes a length that runs past the entry region.
    ///
    /// # Fields
    ///
    /// * `offset` - Byte offset of the offending entry within the table
    /// * `message` - Detailed description of the corruption
    #[error("Corrupt table at offset {offset}: {message}")]
    CorruptTable {
        /// Byte offset of the offending entry within the table
        offset: usize,
        /// Detailed description of the corruption
        message: String,
    },

    /// The stored table checksum does not match the table contents.
    #[error("Checksum mismatch - stored {stored:#010x}, computed {computed:#010x}")]
    ChecksumMismatch {
        /// Checksum read from the trailer
        stored: u32,
        /// Checksum computed over the entry region and pad
        computed: u32,
    },

    /// An entry was requested from a table cursor that is already past the last entry.
    #[error("Table cursor is past the last entry")]
    OutOfBounds,

    /// File I/O error.
    ///
    /// Wraps standard I/O errors raised while opening or mapping a persisted table.
    #[error("{0}")]
    FileError(#[from] std::io::Error),
}

impl Error {
    /// Returns `true` for [`Error::InvalidLength`].
    #[must_use]
    pub fn is_invalid_length(&self) -> bool {
        matches!(self, Error::InvalidLength { .. })
    }

    /// Returns `true` for [`Error::InvalidData`].
    #[must_use]
    pub fn is_invalid_data(&self) -> bool {
        matches!(self, Error::InvalidData { .. })
    }

    /// Returns `true` for [`Error::CorruptTable`].
    #[must_use]
    pub fn is_corrupt_table(&self) -> bool {
        matches!(self, Error::CorruptTable { .. })
    }
}
