//! Attribute Table entries.
//!
//! ```text
//! handle:u16 | attr_type:u8 | name_handle:u16 | body
//!
//! enumeration: pv_count:u8 | pv_handle:u16[pv_count] | def_count:u8 | def_index:u8[def_count]
//! string:      string_type:u8 | min_length:u16 | max_length:u16 | def_length:u16 | def:u8[def_length]
//! integer:     lower_bound:u64 | upper_bound:u64 | scalar_increment:u32 | default_value:u64
//! ```
//!
//! Password attributes carry a tag this codec recognises but cannot size; parsing one reports
//! [`crate::Error::InvalidData`].

use crate::{
    file::{parser::Parser, writer::Writer},
    table::{
        read_attr_type,
        traits::{count_field, EntryReadable, EntryWritable},
        AttrKind, AttrType, StringType, TableKind,
    },
    Error, Result,
};

/// Handle, type tag and name handle.
const HEADER_LEN: usize = 5;
/// Header plus the two count bytes of an enumeration body.
const ENUM_FIXED_LEN: usize = HEADER_LEN + 2;
/// Header plus string type and the three u16 length fields.
const STRING_FIXED_LEN: usize = HEADER_LEN + 7;
/// Header plus bounds, increment and default.
const INTEGER_LEN: usize = HEADER_LEN + 28;

fn write_header(writer: &mut Writer<'_>, handle: u16, attr_type: AttrType, name: u16) -> Result<()> {
    writer.write_le(handle)?;
    writer.write_le(attr_type.as_u8())?;
    writer.write_le(name)
}

/// Caller-built enumeration attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnumAttrInfo<'a> {
    /// Attribute handle
    pub handle: u16,
    /// String handle of the attribute name
    pub name_handle: u16,
    /// Encode the read-only type tag
    pub read_only: bool,
    /// String handles of the possible values
    pub pv_handles: &'a [u16],
    /// Indices into `pv_handles` selected by default
    pub def_indices: &'a [u8],
}

impl EnumAttrInfo<'_> {
    /// Encoded length of an enumeration attribute with the given counts.
    #[must_use]
    pub const fn encoded_len_for(pv_count: usize, def_count: usize) -> usize {
        ENUM_FIXED_LEN + 2 * pv_count + def_count
    }

    /// Check the possible-value and default lists.
    ///
    /// Both lists are limited by their one-byte count fields. Repeated default indices are
    /// accepted as long as each selects a possible value.
    ///
    /// # Errors
    /// Returns [`Error::InvalidData`] when a list holds more than 255 items or a default index
    /// does not select a possible value.
    pub fn check(&self) -> Result<()> {
        if self.pv_handles.len() > usize::from(u8::MAX) {
            return Err(invalid_data!("Too many PossibleValues"));
        }
        if self.def_indices.len() > usize::from(u8::MAX) {
            return Err(invalid_data!("Too many DefaultValues"));
        }
        if self
            .def_indices
            .iter()
            .any(|&index| usize::from(index) >= self.pv_handles.len())
        {
            return Err(invalid_data!("Wrong DefaultValueIndex"));
        }
        Ok(())
    }
}

impl EntryWritable for EnumAttrInfo<'_> {
    const KIND: TableKind = TableKind::Attr;

    fn handle(&self) -> u16 {
        self.handle
    }

    fn encoded_len(&self) -> usize {
        Self::encoded_len_for(self.pv_handles.len(), self.def_indices.len())
    }

    fn attr_type(&self) -> Option<AttrType> {
        Some(AttrType::new(AttrKind::Enumeration, self.read_only))
    }

    fn validate(&self) -> Result<()> {
        self.check()
    }

    fn write_fields(&self, writer: &mut Writer<'_>) -> Result<()> {
        let attr_type = AttrType::new(AttrKind::Enumeration, self.read_only);
        write_header(writer, self.handle, attr_type, self.name_handle)?;

        writer.write_le(count_field::<u8>(self.pv_handles.len(), "PossibleValues")?)?;
        for &handle in self.pv_handles {
            writer.write_le(handle)?;
        }
        writer.write_le(count_field::<u8>(self.def_indices.len(), "DefaultValues")?)?;
        writer.write_bytes(self.def_indices)
    }
}

/// Caller-built string attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StringAttrInfo<'a> {
    /// Attribute handle
    pub handle: u16,
    /// String handle of the attribute name
    pub name_handle: u16,
    /// Encode the read-only type tag
    pub read_only: bool,
    /// Raw [`StringType`] tag
    pub string_type: u8,
    /// Minimum string length in bytes
    pub min_length: u16,
    /// Maximum string length in bytes
    pub max_length: u16,
    /// Default string; its length is the encoded default length
    pub def_string: &'a [u8],
}

impl StringAttrInfo<'_> {
    /// Encoded length of a string attribute whose default string is `def_len` bytes.
    #[must_use]
    pub const fn encoded_len_for(def_len: usize) -> usize {
        STRING_FIXED_LEN + def_len
    }

    /// Check length bounds, default length and string type.
    ///
    /// # Errors
    /// Returns [`Error::InvalidData`] naming the first violated constraint.
    pub fn check(&self) -> Result<()> {
        if self.min_length > self.max_length {
            return Err(invalid_data!(
                "MinimumStingLength should not be greater than MaximumStringLength"
            ));
        }

        let def_len = self.def_string.len();
        if self.min_length == self.max_length && def_len != usize::from(self.min_length) {
            return Err(invalid_data!("Wrong DefaultStringLength"));
        }
        if def_len > usize::from(self.max_length) || def_len < usize::from(self.min_length) {
            return Err(invalid_data!("Wrong DefaultStringLength"));
        }

        if StringType::from_u8(self.string_type).is_none() {
            return Err(invalid_data!("Wrong StringType"));
        }
        Ok(())
    }
}

impl EntryWritable for StringAttrInfo<'_> {
    const KIND: TableKind = TableKind::Attr;

    fn handle(&self) -> u16 {
        self.handle
    }

    fn encoded_len(&self) -> usize {
        Self::encoded_len_for(self.def_string.len())
    }

    fn attr_type(&self) -> Option<AttrType> {
        Some(AttrType::new(AttrKind::String, self.read_only))
    }

    fn validate(&self) -> Result<()> {
        self.check()
    }

    fn write_fields(&self, writer: &mut Writer<'_>) -> Result<()> {
        let attr_type = AttrType::new(AttrKind::String, self.read_only);
        write_header(writer, self.handle, attr_type, self.name_handle)?;

        writer.write_le(self.string_type)?;
        writer.write_le(self.min_length)?;
        writer.write_le(self.max_length)?;
        writer.write_le(count_field::<u16>(self.def_string.len(), "DefaultString bytes")?)?;
        writer.write_bytes(self.def_string)
    }
}

/// Caller-built integer attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntegerAttrInfo {
    /// Attribute handle
    pub handle: u16,
    /// String handle of the attribute name
    pub name_handle: u16,
    /// Encode the read-only type tag
    pub read_only: bool,
    /// Smallest accepted value
    pub lower_bound: u64,
    /// Largest accepted value
    pub upper_bound: u64,
    /// Step between accepted values
    pub scalar_increment: u32,
    /// Default value
    pub default_value: u64,
}

impl IntegerAttrInfo {
    /// Encoded length of every integer attribute.
    pub const ENCODED_LEN: usize = INTEGER_LEN;

    /// Check bounds, default and increment.
    ///
    /// A fixed attribute (`lower_bound == upper_bound`) must default to that value and use a
    /// zero increment. Otherwise the default must lie within the bounds on a multiple of the
    /// increment from the lower bound.
    ///
    /// # Errors
    /// Returns [`Error::InvalidData`] naming the first violated constraint.
    pub fn check(&self) -> Result<()> {
        if self.lower_bound == self.upper_bound {
            if self.default_value != self.lower_bound {
                return Err(invalid_data!("Wrong DefaultValue"));
            }
            if self.scalar_increment != 0 {
                return Err(invalid_data!("Wrong ScalarIncrement"));
            }
            return Ok(());
        }

        if self.lower_bound > self.upper_bound {
            return Err(invalid_data!(
                "LowerBound should not be greater than UpperBound"
            ));
        }
        if self.default_value > self.upper_bound || self.default_value < self.lower_bound {
            return Err(invalid_data!("Wrong DefaultValue"));
        }
        if self.scalar_increment == 0 {
            return Err(invalid_data!(
                "ScalarIncrement should not be zero when lower_bound != upper_bound"
            ));
        }
        if (self.default_value - self.lower_bound) % u64::from(self.scalar_increment) != 0 {
            return Err(invalid_data!("Wrong DefaultValue or ScalarIncrement"));
        }
        Ok(())
    }
}

impl EntryWritable for IntegerAttrInfo {
    const KIND: TableKind = TableKind::Attr;

    fn handle(&self) -> u16 {
        self.handle
    }

    fn encoded_len(&self) -> usize {
        Self::ENCODED_LEN
    }

    fn attr_type(&self) -> Option<AttrType> {
        Some(AttrType::new(AttrKind::Integer, self.read_only))
    }

    fn validate(&self) -> Result<()> {
        self.check()
    }

    fn write_fields(&self, writer: &mut Writer<'_>) -> Result<()> {
        let attr_type = AttrType::new(AttrKind::Integer, self.read_only);
        write_header(writer, self.handle, attr_type, self.name_handle)?;

        writer.write_le(self.lower_bound)?;
        writer.write_le(self.upper_bound)?;
        writer.write_le(self.scalar_increment)?;
        writer.write_le(self.default_value)
    }
}

/// Possible values and defaults of an enumeration attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnumAttr<'a> {
    pv_handles: &'a [u8],
    def_indices: &'a [u8],
}

impl<'a> EnumAttr<'a> {
    /// Number of possible values.
    #[must_use]
    pub fn pv_count(&self) -> u8 {
        // Parsed from a u8 count
        (self.pv_handles.len() / 2) as u8
    }

    /// The `index`th possible-value string handle.
    #[must_use]
    pub fn pv_handle(&self, index: usize) -> Option<u16> {
        let start = index.checked_mul(2)?;
        let bytes = self.pv_handles.get(start..start.checked_add(2)?)?;
        Some(u16::from_le_bytes([bytes[0], bytes[1]]))
    }

    /// Iterate the possible-value string handles.
    pub fn pv_handles(&self) -> impl ExactSizeIterator<Item = u16> + 'a {
        self.pv_handles
            .chunks_exact(2)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
    }

    /// Copy possible-value handles into `out`, truncating to its capacity.
    ///
    /// Returns the number of handles copied.
    pub fn decode_pv_handles(&self, out: &mut [u16]) -> usize {
        let mut copied = 0;
        for (slot, handle) in out.iter_mut().zip(self.pv_handles()) {
            *slot = handle;
            copied += 1;
        }
        copied
    }

    /// Copy every possible-value handle into `out`.
    ///
    /// # Errors
    /// Returns [`Error::InvalidLength`] if `out` holds fewer slots than there are handles.
    pub fn decode_pv_handles_checked(&self, out: &mut [u16]) -> Result<usize> {
        let required = usize::from(self.pv_count());
        if out.len() < required {
            return Err(Error::InvalidLength {
                required,
                available: out.len(),
            });
        }
        Ok(self.decode_pv_handles(out))
    }

    /// Number of default values.
    #[must_use]
    pub fn def_count(&self) -> u8 {
        // Parsed from a u8 count
        self.def_indices.len() as u8
    }

    /// Indices into the possible-value list selected by default.
    #[must_use]
    pub fn def_indices(&self) -> &'a [u8] {
        self.def_indices
    }

    /// Copy default indices into `out`, truncating to its capacity.
    pub fn decode_def_indices(&self, out: &mut [u8]) -> usize {
        let count = self.def_indices.len().min(out.len());
        out[..count].copy_from_slice(&self.def_indices[..count]);
        count
    }

    /// Possible-value handles selected by the defaults; indices past the list are skipped.
    pub fn def_handles(&self) -> impl Iterator<Item = u16> + '_ {
        self.def_indices
            .iter()
            .filter_map(|&index| self.pv_handle(usize::from(index)))
    }
}

/// Length bounds and default of a string attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StringAttr<'a> {
    string_type: u8,
    min_length: u16,
    max_length: u16,
    def_string: &'a [u8],
}

impl<'a> StringAttr<'a> {
    /// Raw string-type tag.
    #[must_use]
    pub fn string_type_raw(&self) -> u8 {
        self.string_type
    }

    /// Decoded string type, `None` for tags PLDM does not define.
    #[must_use]
    pub fn string_type(&self) -> Option<StringType> {
        StringType::from_u8(self.string_type)
    }

    /// Minimum string length in bytes.
    #[must_use]
    pub fn min_length(&self) -> u16 {
        self.min_length
    }

    /// Maximum string length in bytes.
    #[must_use]
    pub fn max_length(&self) -> u16 {
        self.max_length
    }

    /// Length of the default string.
    #[must_use]
    pub fn def_string_len(&self) -> u16 {
        // Parsed from a u16 length
        self.def_string.len() as u16
    }

    /// Default string bytes.
    #[must_use]
    pub fn def_string(&self) -> &'a [u8] {
        self.def_string
    }

    /// Copy the default string into `out`, truncating to its capacity.
    pub fn decode_def_string(&self, out: &mut [u8]) -> usize {
        let count = self.def_string.len().min(out.len());
        out[..count].copy_from_slice(&self.def_string[..count]);
        count
    }
}

/// Bounds, increment and default of an integer attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntegerAttr {
    lower_bound: u64,
    upper_bound: u64,
    scalar_increment: u32,
    default_value: u64,
}

impl IntegerAttr {
    /// Smallest accepted value.
    #[must_use]
    pub fn lower_bound(&self) -> u64 {
        self.lower_bound
    }

    /// Largest accepted value.
    #[must_use]
    pub fn upper_bound(&self) -> u64 {
        self.upper_bound
    }

    /// Step between accepted values.
    #[must_use]
    pub fn scalar_increment(&self) -> u32 {
        self.scalar_increment
    }

    /// Default value.
    #[must_use]
    pub fn default_value(&self) -> u64 {
        self.default_value
    }
}

/// Type-specific body of an attribute entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrBody<'a> {
    /// Enumeration or read-only enumeration
    Enumeration(EnumAttr<'a>),
    /// String or read-only string
    String(StringAttr<'a>),
    /// Integer or read-only integer
    Integer(IntegerAttr),
}

/// Validated view of one Attribute Table entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttrEntry<'a> {
    handle: u16,
    attr_type: AttrType,
    name_handle: u16,
    body: AttrBody<'a>,
    data: &'a [u8],
}

impl<'a> EntryReadable<'a> for AttrEntry<'a> {
    const KIND: TableKind = TableKind::Attr;

    fn entry_len(data: &[u8]) -> Result<usize> {
        let mut parser = Parser::at(data, 2)?;
        let attr_type = read_attr_type(&mut parser)?;

        match attr_type.kind() {
            AttrKind::Enumeration => {
                let mut parser = Parser::at(data, HEADER_LEN)?;
                let pv_count = usize::from(parser.read_le::<u8>()?);
                parser.advance_by(2 * pv_count)?;
                let def_count = usize::from(parser.read_le::<u8>()?);
                Ok(EnumAttrInfo::encoded_len_for(pv_count, def_count))
            }
            AttrKind::String => {
                let mut parser = Parser::at(data, STRING_FIXED_LEN - 2)?;
                let def_len = usize::from(parser.read_le::<u16>()?);
                Ok(StringAttrInfo::encoded_len_for(def_len))
            }
            AttrKind::Integer => Ok(IntegerAttrInfo::ENCODED_LEN),
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
        let name_handle = parser.read_le::<u16>()?;

        let body = match attr_type.kind() {
            AttrKind::Enumeration => {
                let pv_count = usize::from(parser.read_le::<u8>()?);
                let pv_handles = parser.read_bytes(2 * pv_count)?;
                let def_count = usize::from(parser.read_le::<u8>()?);
                let def_indices = parser.read_bytes(def_count)?;
                AttrBody::Enumeration(EnumAttr {
                    pv_handles,
                    def_indices,
                })
            }
            AttrKind::String => {
                let string_type = parser.read_le::<u8>()?;
                let min_length = parser.read_le::<u16>()?;
                let max_length = parser.read_le::<u16>()?;
                let def_len = usize::from(parser.read_le::<u16>()?);
                let def_string = parser.read_bytes(def_len)?;
                AttrBody::String(StringAttr {
                    string_type,
                    min_length,
                    max_length,
                    def_string,
                })
            }
            AttrKind::Integer => AttrBody::Integer(IntegerAttr {
                lower_bound: parser.read_le::<u64>()?,
                upper_bound: parser.read_le::<u64>()?,
                scalar_increment: parser.read_le::<u32>()?,
                default_value: parser.read_le::<u64>()?,
            }),
            AttrKind::Password => {
                return Err(invalid_data!("Unsupported attribute type {}", attr_type));
            }
        };

        Ok(AttrEntry {
            handle,
            attr_type,
            name_handle,
            body,
            data: &data[..length],
        })
    }
}

impl<'a> AttrEntry<'a> {
    /// Parse the attribute entry at the start of `data`.
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

    /// String handle of the attribute name.
    #[must_use]
    pub fn name_handle(&self) -> u16 {
        self.name_handle
    }

    /// Returns `true` for read-only attributes.
    #[must_use]
    pub fn is_read_only(&self) -> bool {
        self.attr_type.is_read_only()
    }

    /// Type-specific body.
    #[must_use]
    pub fn body(&self) -> &AttrBody<'a> {
        &self.body
    }

    /// The enumeration body.
    ///
    /// # Errors
    /// Returns [`Error::InvalidData`] if this is not an enumeration attribute.
    pub fn as_enum(&self) -> Result<&EnumAttr<'a>> {
        match &self.body {
            AttrBody::Enumeration(body) => Ok(body),
            _ => Err(self.type_mismatch(AttrKind::Enumeration)),
        }
    }

    /// The string body.
    ///
    /// # Errors
    /// Returns [`Error::InvalidData`] if this is not a string attribute.
    pub fn as_string(&self) -> Result<&StringAttr<'a>> {
        match &self.body {
            AttrBody::String(body) => Ok(body),
            _ => Err(self.type_mismatch(AttrKind::String)),
        }
    }

    /// The integer body.
    ///
    /// # Errors
    /// Returns [`Error::InvalidData`] if this is not an integer attribute.
    pub fn as_integer(&self) -> Result<&IntegerAttr> {
        match &self.body {
            AttrBody::Integer(body) => Ok(body),
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
            "Attribute {} is {}, not {}",
            self.handle,
            self.attr_type,
            expected
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENUM_ENTRY: [u8; 12] = [
        0, 0, // attr handle
        0, // attr type
        1, 0, // name handle
        2, // possible value count
        2, 0, // possible value handle
        3, 0, // possible value handle
        1, // default count
        0, // default index
    ];

    const STRING_ENTRY: [u8; 15] = [
        1, 0, // attr handle
        1, // attr type
        12, 0, // name handle
        1, // string type
        1, 0, // min length
        100, 0, // max length
        3, 0, // default length
        b'a', b'b', b'c',
    ];

    const INTEGER_ENTRY: [u8; 33] = [
        0, 0, // attr handle
        3, // attr type
        1, 0, // name handle
        1, 0, 0, 0, 0, 0, 0, 0, // lower bound
        10, 0, 0, 0, 0, 0, 0, 0, // upper bound
        2, 0, 0, 0, // scalar increment
        3, 0, 0, 0, 0, 0, 0, 0, // default value
    ];

    fn enum_info() -> EnumAttrInfo<'static> {
        EnumAttrInfo {
            handle: 0,
            name_handle: 1,
            read_only: false,
            pv_handles: &[2, 3],
            def_indices: &[0],
        }
    }

    fn string_info() -> StringAttrInfo<'static> {
        StringAttrInfo {
            handle: 0,
            name_handle: 3,
            read_only: false,
            string_type: 1,
            min_length: 1,
            max_length: 100,
            def_string: b"abc",
        }
    }

    fn integer_info() -> IntegerAttrInfo {
        IntegerAttrInfo {
            handle: 0,
            name_handle: 1,
            read_only: false,
            lower_bound: 1,
            upper_bound: 10,
            scalar_increment: 2,
            default_value: 3,
        }
    }

    fn message(error: Error) -> String {
        match error {
            Error::InvalidData { message } => message,
            other => panic!("expected InvalidData, got {other:?}"),
        }
    }

    #[test]
    fn enum_decode() {
        let entry = AttrEntry::parse(&ENUM_ENTRY).unwrap();
        assert_eq!(entry.attr_type(), AttrType::Enumeration);
        assert_eq!(entry.name_handle(), 1);

        let body = entry.as_enum().unwrap();
        assert_eq!(body.pv_count(), 2);
        assert_eq!(body.def_count(), 1);
        assert_eq!(body.pv_handles().collect::<Vec<_>>(), [2, 3]);
        assert_eq!(body.def_handles().collect::<Vec<_>>(), [2]);

        let mut handles = [0u16; 2];
        assert_eq!(body.decode_pv_handles(&mut handles), 2);
        assert_eq!(handles, [2, 3]);

        let mut one = [0u16; 1];
        assert_eq!(body.decode_pv_handles(&mut one), 1);
        assert_eq!(one, [2]);

        assert_eq!(body.decode_pv_handles_checked(&mut handles).unwrap(), 2);
        assert!(matches!(
            body.decode_pv_handles_checked(&mut one),
            Err(Error::InvalidLength {
                required: 2,
                available: 1
            })
        ));

        let mut defaults = [0xffu8; 4];
        assert_eq!(body.decode_def_indices(&mut defaults), 1);
        assert_eq!(defaults[0], 0);
    }

    #[test]
    fn enum_type_mismatch() {
        let mut data = ENUM_ENTRY;
        data[2] = AttrType::String.as_u8();
        // The enumeration body reinterpreted as a string attribute is too short
        assert!(AttrEntry::parse(&data).unwrap_err().is_invalid_length());

        let string = AttrEntry::parse(&STRING_ENTRY).unwrap();
        assert!(string.as_enum().unwrap_err().is_invalid_data());
        assert!(string.as_integer().unwrap_err().is_invalid_data());
    }

    #[test]
    fn enum_encode() {
        let info = enum_info();
        assert_eq!(EnumAttrInfo::encoded_len_for(2, 1), ENUM_ENTRY.len());

        let mut encoded = vec![0u8; info.encoded_len()];
        assert_eq!(info.encode(&mut encoded), ENUM_ENTRY.len());
        assert_eq!(encoded, ENUM_ENTRY);

        encoded.fill(0);
        assert_eq!(info.encode_checked(&mut encoded).unwrap(), ENUM_ENTRY.len());
        assert_eq!(encoded, ENUM_ENTRY);

        assert!(info
            .encode_checked(&mut encoded[..ENUM_ENTRY.len() - 1])
            .unwrap_err()
            .is_invalid_length());
    }

    #[test]
    #[should_panic(expected = "length <= entry_length")]
    fn enum_encode_short_buffer_panics() {
        let mut encoded = [0u8; ENUM_ENTRY.len() - 1];
        enum_info().encode(&mut encoded);
    }

    #[test]
    fn enum_read_only() {
        let info = EnumAttrInfo {
            read_only: true,
            ..enum_info()
        };
        let mut encoded = [0u8; ENUM_ENTRY.len()];
        info.encode_checked(&mut encoded).unwrap();
        assert_eq!(encoded[2], 0x80);
        assert_eq!(info.attr_type(), Some(AttrType::EnumerationReadOnly));

        let entry = AttrEntry::parse(&encoded).unwrap();
        assert!(entry.is_read_only());
        assert_eq!(entry.as_enum().unwrap().pv_count(), 2);
    }

    #[test]
    fn enum_check() {
        let bad_default = EnumAttrInfo {
            def_indices: &[2],
            ..enum_info()
        };
        assert_eq!(message(bad_default.check().unwrap_err()), "Wrong DefaultValueIndex");

        let repeated_defaults = EnumAttrInfo {
            def_indices: &[0, 1, 0],
            ..enum_info()
        };
        assert!(repeated_defaults.check().is_ok());

        let indices = vec![0u8; 256];
        let many_defaults = EnumAttrInfo {
            def_indices: &indices,
            ..enum_info()
        };
        assert_eq!(message(many_defaults.check().unwrap_err()), "Too many DefaultValues");
        let limit = EnumAttrInfo {
            def_indices: &indices[..255],
            ..enum_info()
        };
        assert!(limit.check().is_ok());

        let handles = vec![0u16; 256];
        let many_values = EnumAttrInfo {
            pv_handles: &handles,
            ..enum_info()
        };
        assert_eq!(message(many_values.check().unwrap_err()), "Too many PossibleValues");

        let mut encoded = vec![0u8; many_values.encoded_len()];
        assert!(many_values.encode_checked(&mut encoded).unwrap_err().is_invalid_data());
    }

    #[test]
    fn string_decode() {
        let entry = AttrEntry::parse(&STRING_ENTRY).unwrap();
        assert_eq!(entry.handle(), 1);
        assert_eq!(entry.name_handle(), 12);

        let body = entry.as_string().unwrap();
        assert_eq!(body.string_type(), Some(StringType::Ascii));
        assert_eq!(body.min_length(), 1);
        assert_eq!(body.max_length(), 100);
        assert_eq!(body.def_string_len(), 3);
        assert_eq!(body.def_string(), b"abc");

        let mut out = [0u8; 2];
        assert_eq!(body.decode_def_string(&mut out), 2);
        assert_eq!(&out, b"ab");

        let mut data = STRING_ENTRY;
        data[2] = AttrType::Integer.as_u8();
        assert!(AttrEntry::parse(&data).unwrap_err().is_invalid_length());
    }

    #[test]
    fn string_encode() {
        let info = string_info();
        assert_eq!(StringAttrInfo::encoded_len_for(3), STRING_ENTRY.len());

        let mut encoded = vec![0u8; info.encoded_len()];
        info.encode_checked(&mut encoded).unwrap();
        assert_eq!(
            encoded,
            [0, 0, 1, 3, 0, 1, 1, 0, 100, 0, 3, 0, b'a', b'b', b'c']
        );

        assert!(info
            .encode_checked(&mut encoded[..STRING_ENTRY.len() - 1])
            .unwrap_err()
            .is_invalid_length());
    }

    #[test]
    fn string_encode_empty_default() {
        let info = StringAttrInfo {
            min_length: 0,
            def_string: &[],
            ..string_info()
        };
        let mut encoded = vec![0u8; StringAttrInfo::encoded_len_for(0)];
        assert_eq!(info.encode(&mut encoded), 12);
        assert_eq!(encoded, [0, 0, 1, 3, 0, 1, 0, 0, 100, 0, 0, 0]);
    }

    #[test]
    fn string_check() {
        let swapped = StringAttrInfo {
            min_length: 100,
            max_length: 1,
            ..string_info()
        };
        assert_eq!(
            message(swapped.check().unwrap_err()),
            "MinimumStingLength should not be greater than MaximumStringLength"
        );
        let mut encoded = vec![0u8; swapped.encoded_len()];
        assert!(swapped.encode_checked(&mut encoded).unwrap_err().is_invalid_data());

        let fixed = StringAttrInfo {
            min_length: 4,
            max_length: 4,
            ..string_info()
        };
        assert_eq!(message(fixed.check().unwrap_err()), "Wrong DefaultStringLength");

        let short = StringAttrInfo {
            min_length: 5,
            ..string_info()
        };
        assert_eq!(message(short.check().unwrap_err()), "Wrong DefaultStringLength");

        let bad_type = StringAttrInfo {
            string_type: 0x06,
            ..string_info()
        };
        assert_eq!(message(bad_type.check().unwrap_err()), "Wrong StringType");

        assert!(string_info().check().is_ok());
    }

    #[test]
    fn integer_decode() {
        let entry = AttrEntry::parse(&INTEGER_ENTRY).unwrap();
        let body = entry.as_integer().unwrap();
        assert_eq!(body.lower_bound(), 1);
        assert_eq!(body.upper_bound(), 10);
        assert_eq!(body.scalar_increment(), 2);
        assert_eq!(body.default_value(), 3);
        assert!(entry.as_string().unwrap_err().is_invalid_data());
    }

    #[test]
    fn integer_encode() {
        let info = integer_info();
        assert_eq!(IntegerAttrInfo::ENCODED_LEN, INTEGER_ENTRY.len());

        let mut encoded = [0u8; 33];
        assert_eq!(info.encode(&mut encoded), 33);
        assert_eq!(encoded, INTEGER_ENTRY);

        encoded.fill(0);
        assert_eq!(info.encode_checked(&mut encoded).unwrap(), 33);
        assert_eq!(encoded, INTEGER_ENTRY);
        assert!(matches!(
            info.encode_checked(&mut encoded[..32]),
            Err(Error::InvalidLength {
                required: 33,
                available: 32
            })
        ));
    }

    #[test]
    fn integer_check() {
        let inverted = IntegerAttrInfo {
            lower_bound: 100,
            upper_bound: 50,
            ..integer_info()
        };
        assert_eq!(
            message(inverted.check().unwrap_err()),
            "LowerBound should not be greater than UpperBound"
        );
        let mut encoded = [0u8; 33];
        assert!(inverted.encode_checked(&mut encoded).unwrap_err().is_invalid_data());

        let fixed_wrong_default = IntegerAttrInfo {
            lower_bound: 5,
            upper_bound: 5,
            default_value: 4,
            scalar_increment: 0,
            ..integer_info()
        };
        assert_eq!(message(fixed_wrong_default.check().unwrap_err()), "Wrong DefaultValue");

        let fixed_with_increment = IntegerAttrInfo {
            lower_bound: 5,
            upper_bound: 5,
            default_value: 5,
            scalar_increment: 1,
            ..integer_info()
        };
        assert_eq!(message(fixed_with_increment.check().unwrap_err()), "Wrong ScalarIncrement");

        let outside = IntegerAttrInfo {
            default_value: 11,
            ..integer_info()
        };
        assert_eq!(message(outside.check().unwrap_err()), "Wrong DefaultValue");

        let zero_step = IntegerAttrInfo {
            scalar_increment: 0,
            ..integer_info()
        };
        assert_eq!(
            message(zero_step.check().unwrap_err()),
            "ScalarIncrement should not be zero when lower_bound != upper_bound"
        );

        let off_step = IntegerAttrInfo {
            default_value: 4,
            ..integer_info()
        };
        assert_eq!(
            message(off_step.check().unwrap_err()),
            "Wrong DefaultValue or ScalarIncrement"
        );

        assert!(integer_info().check().is_ok());
    }

    #[test]
    fn password_is_unsupported() {
        let mut data = INTEGER_ENTRY;
        data[2] = AttrType::Password.as_u8();
        assert!(AttrEntry::parse(&data).unwrap_err().is_invalid_data());
        assert!(AttrEntry::entry_len(&data).unwrap_err().is_invalid_data());

        data[2] = 0x7f;
        assert!(AttrEntry::parse(&data).unwrap_err().is_invalid_data());
    }

    #[test]
    fn entry_len_from_header() {
        assert_eq!(AttrEntry::entry_len(&ENUM_ENTRY[..11]).unwrap(), 12);
        assert_eq!(AttrEntry::entry_len(&STRING_ENTRY[..12]).unwrap(), 15);
        assert_eq!(AttrEntry::entry_len(&INTEGER_ENTRY[..3]).unwrap(), 33);
        assert!(AttrEntry::entry_len(&ENUM_ENTRY[..5]).unwrap_err().is_invalid_length());
    }
}
