//! PLDM BIOS table codec.
//!
//! A BIOS table is a caller-owned byte buffer holding variable-length entries packed back to
//! back, followed by zero to three pad bytes and a four byte CRC-32 checksum. There is no index:
//! every entry describes its own length through the fields it carries, and the table kind
//! (String, Attribute, Attribute Value) is supplied by the caller.
//!
//! # Module Organization
//!
//! - [`string`] - String Table entries ([`StringEntry`], [`StringEntryInfo`])
//! - [`attr`] - Attribute Table entries ([`AttrEntry`] and the enumeration, string and integer
//!   attribute bodies)
//! - [`value`] - Attribute Value Table entries ([`AttrValueEntry`] and the current-value bodies)
//! - [`iter`] - [`TableIter`], the kind-aware cursor that walks any table
//! - [`find`] - Linear lookups by handle, name handle and string text
//! - [`checksum`] - Pad and checksum trailer
//! - [`writer`] - [`TableWriter`], sequential table construction, and [`copy_and_update`]
//! - [`view`] - [`BiosTable`], a table buffer paired with its kind and optional validation
//!
//! # Encoding and Decoding
//!
//! Every entry kind has an info type implementing [`EntryWritable`] and a borrowed view type
//! implementing [`EntryReadable`]. Info types compute their exact encoded length before writing
//! and offer both a panicking [`EntryWritable::encode`] for inputs already known to be valid and
//! a [`EntryWritable::encode_checked`] that reports short buffers and semantic violations as
//! errors. View types validate the entry's self-described length against the slice they are
//! given before exposing any field.
//!
//! ```rust
//! use pldm_bios_table::table::{attr::EnumAttrInfo, EntryWritable};
//!
//! let info = EnumAttrInfo {
//!     handle: 0,
//!     name_handle: 1,
//!     read_only: false,
//!     pv_handles: &[2, 3],
//!     def_indices: &[0],
//! };
//!
//! let mut entry = vec![0u8; EnumAttrInfo::encoded_len_for(2, 1)];
//! info.encode_checked(&mut entry)?;
//! assert_eq!(entry, [0, 0, 0, 1, 0, 2, 2, 0, 3, 0, 1, 0]);
//! # Ok::<(), pldm_bios_table::Error>(())
//! ```

use strum::{Display, EnumCount, EnumIter};

pub mod attr;
pub mod checksum;
pub mod find;
pub mod iter;
pub mod string;
pub mod value;
pub mod view;
pub mod writer;

mod traits;

pub use attr::{
    AttrBody, AttrEntry, EnumAttr, EnumAttrInfo, IntegerAttr, IntegerAttrInfo, StringAttr,
    StringAttrInfo,
};
pub use checksum::{
    append_pad_checksum, append_pad_checksum_checked, compute_checksum, pad_checksum_size,
    pad_size, stored_checksum, verify_checksum, CHECKSUM_SIZE, MAX_PAD_CHECKSUM,
};
pub use find::{
    find_attr_by_handle, find_attr_by_name_handle, find_attr_value_by_handle,
    find_string_by_handle, find_string_by_text,
};
pub use iter::{entry_len, TableEntry, TableIter};
pub use string::{StringEntry, StringEntryInfo};
pub use traits::{EntryReadable, EntryWritable};
pub use value::{
    AttrValueEntry, EnumValue, EnumValueInfo, IntegerValue, IntegerValueInfo, StringValue,
    StringValueInfo, ValueBody,
};
pub use view::BiosTable;
pub use writer::{copy_and_update, TableWriter};

/// Bit set in an attribute-type tag to mark the read-only member of a type pair.
pub const ATTR_READ_ONLY_BIT: u8 = 0x80;

/// The three kinds of BIOS table.
///
/// Tables are untyped bytes; the kind is supplied by the caller and selects how entries are
/// interpreted and how their lengths are computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumCount)]
#[repr(u8)]
pub enum TableKind {
    /// String Table: handles mapped to raw string bytes
    #[strum(serialize = "string")]
    String = 0,
    /// Attribute Table: attribute definitions, bounds and defaults
    #[strum(serialize = "attribute")]
    Attr = 1,
    /// Attribute Value Table: current attribute values
    #[strum(serialize = "attribute value")]
    AttrValue = 2,
}

impl TableKind {
    /// Map the PLDM table-type code to a [`TableKind`].
    #[must_use]
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(TableKind::String),
            1 => Some(TableKind::Attr),
            2 => Some(TableKind::AttrValue),
            _ => None,
        }
    }
}

/// The attribute class shared by a writable/read-only pair of type tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumCount)]
pub enum AttrKind {
    /// Choice among a list of string handles
    Enumeration,
    /// Free-form string with length bounds
    String,
    /// Password; recognised but not encodable by this codec
    Password,
    /// 64-bit integer with bounds and increment
    Integer,
}

/// Attribute-type tag as stored in byte 2 of attribute and attribute-value entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumCount)]
#[repr(u8)]
pub enum AttrType {
    /// BIOSEnumeration
    Enumeration = 0x00,
    /// BIOSString
    String = 0x01,
    /// BIOSPassword
    Password = 0x02,
    /// BIOSInteger
    Integer = 0x03,
    /// BIOSEnumerationReadOnly
    EnumerationReadOnly = 0x80,
    /// BIOSStringReadOnly
    StringReadOnly = 0x81,
    /// BIOSPasswordReadOnly
    PasswordReadOnly = 0x82,
    /// BIOSIntegerReadOnly
    IntegerReadOnly = 0x83,
}

impl AttrType {
    /// Decode a raw type tag, returning `None` for values PLDM does not define.
    #[must_use]
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0x00 => Some(AttrType::Enumeration),
            0x01 => Some(AttrType::String),
            0x02 => Some(AttrType::Password),
            0x03 => Some(AttrType::Integer),
            0x80 => Some(AttrType::EnumerationReadOnly),
            0x81 => Some(AttrType::StringReadOnly),
            0x82 => Some(AttrType::PasswordReadOnly),
            0x83 => Some(AttrType::IntegerReadOnly),
            _ => None,
        }
    }

    /// Build the tag for `kind`, setting the read-only bit when requested.
    #[must_use]
    pub fn new(kind: AttrKind, read_only: bool) -> Self {
        match (kind, read_only) {
            (AttrKind::Enumeration, false) => AttrType::Enumeration,
            (AttrKind::String, false) => AttrType::String,
            (AttrKind::Password, false) => AttrType::Password,
            (AttrKind::Integer, false) => AttrType::Integer,
            (AttrKind::Enumeration, true) => AttrType::EnumerationReadOnly,
            (AttrKind::String, true) => AttrType::StringReadOnly,
            (AttrKind::Password, true) => AttrType::PasswordReadOnly,
            (AttrKind::Integer, true) => AttrType::IntegerReadOnly,
        }
    }

    /// The raw tag value.
    #[must_use]
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// The class this tag belongs to, ignoring the read-only bit.
    #[must_use]
    pub fn kind(self) -> AttrKind {
        match self {
            AttrType::Enumeration | AttrType::EnumerationReadOnly => AttrKind::Enumeration,
            AttrType::String | AttrType::StringReadOnly => AttrKind::String,
            AttrType::Password | AttrType::PasswordReadOnly => AttrKind::Password,
            AttrType::Integer | AttrType::IntegerReadOnly => AttrKind::Integer,
        }
    }

    /// Returns `true` for the read-only member of a pair.
    #[must_use]
    pub fn is_read_only(self) -> bool {
        self.as_u8() & ATTR_READ_ONLY_BIT != 0
    }
}

/// Encoding of the default and current strings of a string attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[repr(u8)]
pub enum StringType {
    /// Unknown encoding
    Unknown = 0x00,
    /// ASCII
    Ascii = 0x01,
    /// Hexadecimal digits
    Hex = 0x02,
    /// UTF-8
    Utf8 = 0x03,
    /// UTF-16, little endian
    Utf16Le = 0x04,
    /// UTF-16, big endian
    Utf16Be = 0x05,
    /// Vendor specific
    VendorSpecific = 0xff,
}

impl StringType {
    /// Decode a raw string-type tag.
    #[must_use]
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0x00 => Some(StringType::Unknown),
            0x01 => Some(StringType::Ascii),
            0x02 => Some(StringType::Hex),
            0x03 => Some(StringType::Utf8),
            0x04 => Some(StringType::Utf16Le),
            0x05 => Some(StringType::Utf16Be),
            0xff => Some(StringType::VendorSpecific),
            _ => None,
        }
    }
}

/// Decode the attribute-type tag at byte 2 of an attribute or attribute-value entry.
///
/// # Errors
/// Returns [`crate::Error::InvalidLength`] if `data` is shorter than three bytes and
/// [`crate::Error::InvalidData`] for tags PLDM does not define.
pub(crate) fn read_attr_type(parser: &mut crate::Parser<'_>) -> crate::Result<AttrType> {
    let raw = parser.read_le::<u8>()?;
    AttrType::from_u8(raw).ok_or_else(|| invalid_data!("Unknown attribute type {:#04x}", raw))
}
