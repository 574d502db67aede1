//! Attribute Value Table entries.
//!
//! ```text
//! handle:u16 | attr_type:u8 | value
//!
//! enumeration: count:u8 | index:u8[count]
//! string:      length:u16 | string:u8[length]
//! integer:     value:u64
//! ```

use crate::{
    file::{parser::Parser, writer::Writer},
    table::{
        read_attr_type,
        traits::{count_field, EntryReadable, EntryWritable},
        AttrKind, AttrType, TableKind,
    },
    Error, Result,
};

/// Handle and type tag.
const HEADER_LEN: usize = 3;

fn write_header(writer: &mut Writer<'_>, handle: u16, attr_type: AttrType) -> Result<()> {
    writer.write_le(handle)?;
    writer.write_le(attr_type.as_u8())
}

fn expect_kind(attr_type: AttrType, expected: AttrKind) -> Result<()> {
    if attr_type.kind() != expected {
        return Err(invalid_data!(
            "Attribute type {} cannot carry a {} value",
            attr_type,
            expected
        ));
    }
    Ok(())
}

/// Caller-built current value of an enumeration attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnumValueInfo<'a> {
    /// Attribute handle
    pub handle: u16,
    /// Enumeration or read-only enumeration
    pub attr_type: AttrType,
    /// Selected indices into the attribute's possible values
    pub indices: &'a [u8],
}

impl EnumValueInfo<'_> {
    /// Encoded length of an enumeration value with `count` selected indices.
    #[must_use]
    pub const fn encoded_len_for(count: usize) -> usize {
        HEADER_LEN + 1 + count
    }
}

impl EntryWritable for EnumValueInfo<'_> {
    const KIND: TableKind = TableKind::AttrValue;

    fn handle(&self) -> u16 {
        self.handle
    }

    fn encoded_len(&self) -> usize {
        Self::encoded_len_for(self.indices.len())
    }

    fn attr_type(&self) -> Option<AttrType> {
        Some(self.attr_type)
    }

    fn validate(&self) -> Result<()> {
        expect_kind(self.attr_type, AttrKind::Enumeration)?;
        count_field::<u8>(self.indices.len(), "CurrentValues").map(|_| ())
    }

    fn write_fields(&self, writer: &mut Writer<'_>) -> Result<()> {
        write_header(writer, self.handle, self.attr_type)?;
        writer.write_le(count_field::<u8>(self.indices.len(), "CurrentValues")?)?;
        writer.write_bytes(self.indices)
    }
}

/// Caller-built current value of a string attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StringValueInfo<'a> {
    /// Attribute handle
    pub handle: u16,
    /// String or read-only string
    pub attr_type: AttrType,
    /// Current string bytes
    pub string: &'a [u8],
}

impl StringValueInfo<'_> {
    /// Encoded length of a string value of `string_len` bytes.
    #[must_use]
    pub const fn encoded_len_for(string_len: usize) -> usize {
        HEADER_LEN + 2 + string_len
    }
}

impl EntryWritable for StringValueInfo<'_> {
    const KIND: TableKind = TableKind::AttrValue;

    fn handle(&self) -> u16 {
        self.handle
    }

    fn encoded_len(&self) -> usize {
        Self::encoded_len_for(self.string.len())
    }

    fn attr_type(&self) -> Option<AttrType> {
        Some(self.attr_type)
    }

    fn validate(&self) -> Result<()> {
        expect_kind(self.attr_type, AttrKind::String)?;
        count_field::<u16>(self.string.len(), "CurrentString bytes").map(|_| ())
    }

    fn write_fields(&self, writer: &mut Writer<'_>) -> Result<()> {
        write_header(writer, self.handle, self.attr_type)?;
        writer.write_le(count_field::<u16>(self.string.len(), "CurrentString bytes")?)?;
        writer.write_bytes(self.string)
    }
}

/// Caller-built current value of an integer attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntegerValueInfo {
    /// Attribute handle
    pub handle: u16,
    /// Integer or read-only integer
    pub attr_type: AttrType,
    /// Current value
    pub value: u64,
}

impl IntegerValueInfo {
    /// Encoded length of every integer value.
    pub const ENCODED_LEN: usize = HEADER_LEN + 8;
}

impl EntryWritable for IntegerValueInfo {
    const KIND: TableKind = TableKind::AttrValue;

    fn handle(&self) -> u16 {
        self.handle
    }

    fn encoded_len(&self) -> usize {
        Self::ENCODED_LEN
    }

    fn attr_type(&self) -> Option<AttrType> {
        Some(self.attr_type)
    }

    fn validate(&self) -> Result<()> {
        expect_kind(self.attr_type, AttrKind::Integer)
    }

    fn write_fields(&self, writer: &mut Writer<'_>) -> Result<()> {
        write_header(writer, self.handle, self.attr_type)?;
        writer.write_le(self.value)
    }
}

/// Selected indices of an enumeration value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnumValue<'a> {
    indices: &'a [u8],
}

impl<'a> EnumValue<'a> {
    /// Number of selected indices.
    #[must_use]
    pub fn count(&self) -> u8 {
        // Parsed from a u8 count
        self.indices.len() as u8
    }

    /// Selected indices.
    #[must_use]
    pub fn indices(&self) -> &'a [u8] {
        self.indices
    }

    /// Copy selected indices into `out`, truncating to its capacity.
    pub fn decode_indices(&self, out: &mut [u8]) -> usize {
        let count = self.indices.len().min(out.len());
        out[..count].copy_from_slice(&self.indices[..count]);
        count
    }

    /// Copy every selected index into `out`.
    ///
    /// # Errors
    /// Returns [`Error::InvalidLength`] if `out` is shorter than the index list.
    pub fn decode_indices_checked(&self, out: &mut [u8]) -> Result<usize> {
        if out.len() < self.indices.len() {
            return Err(Error::InvalidLength {
                required: self.indices.len(),
                available: out.len(),
            });
        }
        Ok(self.decode_indices(out))
    }
}

/// Current string of a string value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StringValue<'a> {
    string: &'a [u8],
}

impl<'a> StringValue<'a> {
    /// Length of the current string.
    #[must_use]
    pub fn len(&self) -> u16 {
        // Parsed from a u16 length
        self.string.len() as u16
    }

    /// Returns `true` for an empty current string.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.string.is_empty()
    }

    /// Current string bytes.
    #[must_use]
    pub fn string(&self) -> &'a [u8] {
        self.string
    }

    /// Copy the current string into `out`, truncating to its capacity.
    pub fn decode_string(&self, out: &mut [u8]) -> usize {
        let count = self.string.len().min(out.len());
        out[..count].copy_from_slice(&self.string[..count]);
        count
    }
}

/// Current value of an integer attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntegerValue {
    value: u64,
}

impl IntegerValue {
    /// The value.
    #[must_use]
    pub fn value(&self) -> u64 {
        self.value
    }
}

/// Type-specific body of an attribute-value entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueBody<'a> {
    /// Enumeration or read-only enumeration
    Enumeration(EnumValue<'a>),
    /// String or read-only string
    String(StringValue<'a>),
    /// Integer or read-only integer
    Integer(IntegerValue),
}

/// Validated view of one Attribute Value Table entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttrValueEntry<'a> {
    handle: u16,
    attr_type: AttrType,
    body: ValueBody<'a>,
    data: &'a [u8],
}

impl<'a> EntryReadable<'a> for AttrValueEntry<'a> {
    const KIND: TableKind = TableKind::AttrValue;

    fn entry_len(data: &[u8]) -> Result<usize> {
        let mut parser = Parser::at(data, 2)?;
        let attr_type = read_attr_type(&mut parser)?;

        match attr_type.kind() {
            AttrKind::Enumeration => {
                let count = usize::from(parser.read_le::<u8>()?);
                Ok(EnumValueInfo::encoded_len_for(count))
            }
            AttrKind::String => {
                let length = usize::from(parser.read_le::<u16>()?);
                Ok(StringValueInfo::encoded_len_for(length))
            }
            AttrKind::Integer => Ok(IntegerValueInfo::ENCODED_LEN),
            AttrKind::Password => Err(invalid_data!(
                "Unsupported attribute type {} ({:#04x})",
                attr_type,
                attr_type.as_u8()
            )),
        }
    }

    fn parse(data: &'a [u8]) -> Result<Self> {
        let length = Self::entry_len(data)?;
        if data.len() < length {
            return Err(Error::InvalidLength {
                required: length,
                available: data.len(),
            });
        }

        let mut parser = Parser::new(&data[..length]);
        let handle = parser.read_le::<u16>()?;
        let attr_type = read_attr_type(&mut parser)?;

        let body = match attr_type.kind() {
            AttrKind::Enumeration => {
                let count = usize::from(parser.read_le::<u8>()?);
                ValueBody::Enumeration(EnumValue {
                    indices: parser.read_bytes(count)?,
                })
            }
            AttrKind::String => {
                let length = usize::from(parser.read_le::<u16>()?);
                ValueBody::String(StringValue {
                    string: parser.read_bytes(length)?,
                })
            }
            AttrKind::Integer => ValueBody::Integer(IntegerValue {
                value: parser.read_le::<u64>()?,
            }),
            AttrKind::Password => {
                return Err(invalid_data!("Unsupported attribute type {}", attr_type));
            }
        };

        Ok(AttrValueEntry {
            handle,
            attr_type,
            body,
            data: &data[..length],
        })
    }
}

impl<'a> AttrValueEntry<'a> {
    /// Parse the attribute-value entry at the start of `data`.
    ///
    /// # Errors
    /// Returns [`Error::InvalidLength`] if `data` does not hold the whole entry, or
    /// [`Error::InvalidData`] for password and undefined type tags.
    pub fn parse(data: &'a [u8]) -> Result<Self> {
        <Self as EntryReadable>::parse(data)
    }

    /// Attribute handle.
    #[must_use]
    pub fn handle(&self) -> u16 {
        self.handle
    }

    /// Attribute-type tag.
    #[must_use]
    pub fn attr_type(&self) -> AttrType {
        self.attr_type
    }

    /// Type-specific body.
    #[must_use]
    pub fn body(&self) -> &ValueBody<'a> {
        &self.body
    }

    /// Number of bytes following the handle and type tag.
    #[must_use]
    pub fn value_len(&self) -> usize {
        self.data.len() - HEADER_LEN
    }

    /// The encoded value: every byte following the handle and type tag.
    #[must_use]
    pub fn value(&self) -> &'a [u8] {
        &self.data[HEADER_LEN..]
    }

    /// The enumeration value.
    ///
    /// # Errors
    /// Returns [`Error::InvalidData`] if this is not an enumeration value.
    pub fn as_enum(&self) -> Result<&EnumValue<'a>> {
        match &self.body {
            ValueBody::Enumeration(body) => Ok(body),
            _ => Err(self.type_mismatch(AttrKind::Enumeration)),
        }
    }

    /// The string value.
    ///
    /// # Errors
    /// Returns [`Error::InvalidData`] if this is not a string value.
    pub fn as_string(&self) -> Result<&StringValue<'a>> {
        match &self.body {
            ValueBody::String(body) => Ok(body),
            _ => Err(self.type_mismatch(AttrKind::String)),
        }
    }

    /// The integer value.
    ///
    /// # Errors
    /// Returns [`Error::InvalidData`] if this is not an integer value.
    pub fn as_integer(&self) -> Result<&IntegerValue> {
        match &self.body {
            ValueBody::Integer(body) => Ok(body),
            _ => Err(self.type_mismatch(AttrKind::Integer)),
        }
    }

    /// The entry's encoded bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &'a [u8] {
        self.data
    }

    /// Encoded length of the entry.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always `false`; an entry holds at least its header.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    fn type_mismatch(&self, expected: AttrKind) -> Error {
        invalid_data!(
            "Attribute value {} is {}, not {}",
            self.handle,
            self.attr_type,
            expected
        )
    }
}
