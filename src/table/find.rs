//! Linear lookups over finalized tables.
//!
//! Every lookup walks the table from the start and returns the first match. A corrupt entry met
//! before the match aborts the search with [`crate::Error::CorruptTable`].

use crate::{
    table::{
        attr::AttrEntry,
        iter::{TableEntry, TableIter},
        string::StringEntry,
        value::AttrValueEntry,
        TableKind,
    },
    Result,
};

fn find_entry<'a, T>(
    table: &'a [u8],
    kind: TableKind,
    mut select: impl FnMut(TableEntry<'a>) -> Option<T>,
) -> Result<Option<T>> {
    for entry in TableIter::new(table, kind) {
        if let Some(found) = select(entry?) {
            return Ok(Some(found));
        }
    }
    Ok(None)
}

/// Find the string entry with `handle` in a String Table.
///
/// # Errors
/// Returns [`crate::Error::CorruptTable`] if a malformed entry precedes the match.
pub fn find_string_by_handle(table: &[u8], handle: u16) -> Result<Option<StringEntry<'_>>> {
    find_entry(table, TableKind::String, |entry| match entry {
        TableEntry::String(entry) if entry.handle() == handle => Some(entry),
        _ => None,
    })
}

/// Find the string entry whose bytes equal `text` exactly.
///
/// ```rust
/// use pldm_bios_table::table::{find_string_by_text, TableWriter, StringEntryInfo, TableKind};
///
/// let mut buffer = [0u8; 64];
/// let mut writer = TableWriter::new(&mut buffer, TableKind::String);
/// writer.push(&StringEntryInfo::new(2, "World!"))?;
/// let length = writer.finish()?;
///
/// let table = &buffer[..length];
/// assert_eq!(find_string_by_text(table, "World!")?.map(|e| e.handle()), Some(2));
/// assert!(find_string_by_text(table, "Worl")?.is_none());
/// # Ok::<(), pldm_bios_table::Error>(())
/// ```
///
/// # Errors
/// Returns [`crate::Error::CorruptTable`] if a malformed entry precedes the match.
pub fn find_string_by_text(
    table: &[u8],
    text: impl AsRef<[u8]>,
) -> Result<Option<StringEntry<'_>>> {
    let text = text.as_ref();
    find_entry(table, TableKind::String, |entry| match entry {
        TableEntry::String(entry) if entry.string() == text => Some(entry),
        _ => None,
    })
}

/// Find the attribute with `handle` in an Attribute Table.
///
/// # Errors
/// Returns [`crate::Error::CorruptTable`] if a malformed entry precedes the match.
pub fn find_attr_by_handle(table: &[u8], handle: u16) -> Result<Option<AttrEntry<'_>>> {
    find_entry(table, TableKind::Attr, |entry| match entry {
        TableEntry::Attr(entry) if entry.handle() == handle => Some(entry),
        _ => None,
    })
}

/// Find the attribute whose name is the string with `name_handle`.
///
/// # Errors
/// Returns [`crate::Error::CorruptTable`] if a malformed entry precedes the match.
pub fn find_attr_by_name_handle(table: &[u8], name_handle: u16) -> Result<Option<AttrEntry<'_>>> {
    find_entry(table, TableKind::Attr, |entry| match entry {
        TableEntry::Attr(entry) if entry.name_handle() == name_handle => Some(entry),
        _ => None,
    })
}

/// Find the current value of the attribute with `handle` in an Attribute Value Table.
///
/// # Errors
/// Returns [`crate::Error::CorruptTable`] if a malformed entry precedes the match.
pub fn find_attr_value_by_handle(table: &[u8], handle: u16) -> Result<Option<AttrValueEntry<'_>>> {
    find_entry(table, TableKind::AttrValue, |entry| match entry {
        TableEntry::AttrValue(entry) if entry.handle() == handle => Some(entry),
        _ => None,
    })
}
