#![no_main]

use libfuzzer_sys::fuzz_target;
use pldm_bios_table::prelude::*;

fuzz_target!(|data: &[u8]| {
    for kind in [TableKind::String, TableKind::Attr, TableKind::AttrValue] {
        for entry in TableIter::new(data, kind) {
            let _ = entry.map(|entry| entry.handle());
        }
        let _ = BiosTable::parse(data, kind, &ValidationConfig::default());
    }
});
