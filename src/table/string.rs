//! String Table entries.
//!
//! ```text
//! handle:u16 | string_length:u16 | string:u8[string_length]
//! ```

use crate::{
    file::{parser::Parser, writer::Writer},
    table::{
        traits::{count_field, EntryReadable, EntryWritable},
        TableKind,
    },
    Error, Result,
};

/// Bytes preceding the string in a String Table entry.
const HEADER_LEN: usize = 4;

/// Caller-built String Table entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StringEntryInfo<'a> {
    /// String handle
    pub handle: u16,
    /// Raw string bytes; not NUL terminated
    pub text: &'a [u8],
}

impl<'a> StringEntryInfo<'a> {
    /// Describe a string entry holding `text`.
    #[must_use]
    pub fn new(handle: u16, text: &'a str) -> Self {
        StringEntryInfo {
            handle,
            text: text.as_bytes(),
        }
    }

    /// Encoded length of a string entry holding `string_len` bytes.
    #[must_use]
    pub const fn encoded_len_for(string_len: usize) -> usize {
        HEADER_LEN + string_len
    }
}

impl EntryWritable for StringEntryInfo<'_> {
    const KIND: TableKind = TableKind::String;

    fn handle(&self) -> u16 {
        self.handle
    }

    fn encoded_len(&self) -> usize {
        Self::encoded_len_for(self.text.len())
    }

    fn validate(&self) -> Result<()> {
        count_field::<u16>(self.text.len(), "string bytes").map(|_| ())
    }

    fn write_fields(&self, writer: &mut Writer<'_>) -> Result<()> {
        writer.write_le(self.handle)?;
        writer.write_le(count_field::<u16>(self.text.len(), "string bytes")?)?;
        writer.write_bytes(self.text)
    }
}

/// Validated view of one String Table entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StringEntry<'a> {
    handle: u16,
    string: &'a [u8],
    data: &'a [u8],
}

impl<'a> EntryReadable<'a> for StringEntry<'a> {
    const KIND: TableKind = TableKind::String;

    fn entry_len(data: &[u8]) -> Result<usize> {
        let mut parser = Parser::new(data);
        parser.advance_by(2)?;
        let string_len = parser.read_le::<u16>()?;
        Ok(StringEntryInfo::encoded_len_for(usize::from(string_len)))
    }

    fn parse(data: &'a [u8]) -> Result<Self> {
        let mut parser = Parser::new(data);
        let handle = parser.read_le::<u16>()?;
        let string_len = usize::from(parser.read_le::<u16>()?);
        if parser.remaining() < string_len {
            return Err(Error::InvalidLength {
                required: HEADER_LEN + string_len,
                available: data.len(),
            });
        }
        let string = parser.read_bytes(string_len)?;

        Ok(StringEntry {
            handle,
            string,
            data: &data[..parser.pos()],
        })
    }
}

impl<'a> StringEntry<'a> {
    /// Parse the string entry at the start of `data`.
    ///
    /// # Errors
    /// Returns [`Error::InvalidLength`] if `data` does not hold the whole entry.
    pub fn parse(data: &'a [u8]) -> Result<Self> {
        <Self as EntryReadable>::parse(data)
    }

    /// String handle.
    #[must_use]
    pub fn handle(&self) -> u16 {
        self.handle
    }

    /// Length of the string in bytes.
    #[must_use]
    pub fn string_len(&self) -> u16 {
        // Bounded by the u16 length field it was parsed from
        self.string.len() as u16
    }

    /// Raw string bytes.
    #[must_use]
    pub fn string(&self) -> &'a [u8] {
        self.string
    }

    /// The string as UTF-8 text.
    ///
    /// # Errors
    /// Returns [`Error::InvalidData`] if the bytes are not valid UTF-8.
    pub fn as_str(&self) -> Result<&'a str> {
        std::str::from_utf8(self.string)
            .map_err(|_| invalid_data!("String {} is not valid UTF-8", self.handle))
    }

    /// Copy the string into `out`, truncating to its capacity.
    ///
    /// When `out` has room, a NUL byte is written after the copied bytes. Returns the number of
    /// string bytes copied.
    pub fn decode_string(&self, out: &mut [u8]) -> usize {
        let count = self.string.len().min(out.len());
        out[..count].copy_from_slice(&self.string[..count]);
        if let Some(terminator) = out.get_mut(count) {
            *terminator = 0;
        }
        count
    }

    /// Copy the string and a NUL terminator into `out`.
    ///
    /// # Errors
    /// Returns [`Error::InvalidLength`] if `out` cannot hold the string plus terminator.
    pub fn decode_string_checked(&self, out: &mut [u8]) -> Result<usize> {
        let required = self.string.len() + 1;
        if out.len() < required {
            return Err(Error::InvalidLength {
                required,
                available: out.len(),
            });
        }
        Ok(self.decode_string(out))
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
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENTRY: [u8; 11] = [
        0x01, 0x00, // handle
        0x07, 0x00, // string length
        b'A', b'l', b'l', b'o', b'w', b'e', b'd',
    ];

    #[test]
    fn encoded_length() {
        assert_eq!(StringEntryInfo::encoded_len_for(7), 11);
        assert_eq!(StringEntryInfo::new(1, "Allowed").encoded_len(), 11);
    }

    #[test]
    fn encode() {
        let mut encoded = [0u8; 11];
        assert_eq!(StringEntryInfo::new(1, "Allowed").encode(&mut encoded), 11);
        assert_eq!(encoded, ENTRY);
    }

    #[test]
    fn encode_checked() {
        let info = StringEntryInfo::new(1, "Allowed");

        let mut encoded = [0u8; 11];
        assert_eq!(info.encode_checked(&mut encoded).unwrap(), 11);
        assert_eq!(encoded, ENTRY);

        let mut short = [0u8; 10];
        assert!(matches!(
            info.encode_checked(&mut short),
            Err(Error::InvalidLength {
                required: 11,
                available: 10
            })
        ));
    }

    #[test]
    #[should_panic(expected = "length <= entry_length")]
    fn encode_short_buffer_panics() {
        let mut short = [0u8; 10];
        StringEntryInfo::new(1, "Allowed").encode(&mut short);
    }

    #[test]
    fn encode_checked_oversized_string() {
        let text = vec![b'x'; usize::from(u16::MAX) + 1];
        let info = StringEntryInfo {
            handle: 0,
            text: &text,
        };
        let mut buffer = vec![0u8; info.encoded_len()];
        assert!(info.encode_checked(&mut buffer).unwrap_err().is_invalid_data());
    }

    #[test]
    fn decode() {
        let entry = StringEntry::parse(&ENTRY).unwrap();
        assert_eq!(entry.handle(), 1);
        assert_eq!(entry.string_len(), 7);
        assert_eq!(entry.string(), b"Allowed");
        assert_eq!(entry.as_str().unwrap(), "Allowed");
        assert_eq!(entry.len(), ENTRY.len());
    }

    #[test]
    fn decode_string_copies() {
        let entry = StringEntry::parse(&ENTRY).unwrap();

        let mut buffer = [0xffu8; 8];
        assert_eq!(entry.decode_string_checked(&mut buffer).unwrap(), 7);
        assert_eq!(&buffer, b"Allowed\0");

        let mut short = [0xffu8; 7];
        assert!(matches!(
            entry.decode_string_checked(&mut short),
            Err(Error::InvalidLength {
                required: 8,
                available: 7
            })
        ));

        assert_eq!(entry.decode_string(&mut short), 7);
        assert_eq!(&short, b"Allowed");

        let mut tiny = [0xffu8; 3];
        assert_eq!(entry.decode_string(&mut tiny), 3);
        assert_eq!(&tiny, b"All");
    }

    #[test]
    fn parse_truncated() {
        assert!(matches!(
            StringEntry::parse(&ENTRY[..10]),
            Err(Error::InvalidLength {
                required: 11,
                available: 10
            })
        ));
        assert!(StringEntry::parse(&ENTRY[..3]).unwrap_err().is_invalid_length());
    }

    #[test]
    fn parse_ignores_trailing_bytes() {
        let mut data = ENTRY.to_vec();
        data.extend_from_slice(&[0xde, 0xad]);
        let entry = StringEntry::parse(&data).unwrap();
        assert_eq!(entry.as_bytes(), &ENTRY);
        assert_eq!(StringEntry::entry_len(&data).unwrap(), 11);
    }
}
