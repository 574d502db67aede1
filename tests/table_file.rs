//! Loading persisted tables from disk.

use std::io::Write;

use pldm_bios_table::prelude::*;
use tempfile::NamedTempFile;

fn persisted_string_table() -> Vec<u8> {
    let mut buffer = vec![0u8; 64];
    let mut writer = TableWriter::new(&mut buffer, TableKind::String);
    writer.push(&StringEntryInfo::new(0, "PowerRestorePolicy")).unwrap();
    writer.push(&StringEntryInfo::new(1, "AlwaysOn")).unwrap();
    writer.push(&StringEntryInfo::new(2, "AlwaysOff")).unwrap();
    let length = writer.finish().unwrap();
    buffer.truncate(length);
    buffer
}

fn write_temp(data: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(data).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn load_and_query_mapped_table() {
    let table = persisted_string_table();
    let file = write_temp(&table);

    let loaded = TableFile::from_path(file.path(), TableKind::String).unwrap();
    assert_eq!(loaded.kind(), TableKind::String);
    assert_eq!(loaded.len(), table.len());
    assert_eq!(loaded.data(), table.as_slice());

    let view = loaded.parse(&ValidationConfig::strict()).unwrap();
    assert_eq!(view.entry_count().unwrap(), 3);
    let entry = view.find_string_by_text("AlwaysOff").unwrap().unwrap();
    assert_eq!(entry.handle(), 2);
}

#[test]
fn damaged_file_fails_checksum() {
    let mut table = persisted_string_table();
    // Flip a byte inside the first string
    table[4] ^= 0x20;
    let file = write_temp(&table);

    let loaded = TableFile::from_path(file.path(), TableKind::String).unwrap();
    assert!(matches!(
        loaded.parse(&ValidationConfig::default()),
        Err(Error::ChecksumMismatch { .. })
    ));

    // Entries are still walkable when only the checksum is wrong
    let view = loaded.parse(&ValidationConfig::minimal()).unwrap();
    assert_eq!(
        view.find_string_by_handle(0).unwrap().unwrap().string(),
        b"powerRestorePolicy"
    );
}

#[test]
fn missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = TableFile::from_path(dir.path().join("missing.bin"), TableKind::Attr);
    assert!(matches!(result, Err(Error::FileError(_))));
}
