//! # pldm-bios-table Prelude
//!
//! The most commonly used types and traits of the crate, for glob import.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all table operations
pub use crate::Error;

/// The result type used throughout the crate
pub use crate::Result;

/// Load-time validation settings
pub use crate::ValidationConfig;

// ================================================================================================
// Tables
// ================================================================================================

/// Table and attribute tags
pub use crate::table::{AttrKind, AttrType, StringType, TableKind};

/// Whole-table views, iteration and construction
pub use crate::table::{copy_and_update, BiosTable, TableEntry, TableIter, TableWriter};

/// Persisted tables
pub use crate::file::TableFile;

/// Entry encoding and decoding traits
pub use crate::table::{EntryReadable, EntryWritable};

// ================================================================================================
// Entries
// ================================================================================================

/// String Table entries
pub use crate::table::{StringEntry, StringEntryInfo};

/// Attribute Table entries
pub use crate::table::{
    AttrBody, AttrEntry, EnumAttr, EnumAttrInfo, IntegerAttr, IntegerAttrInfo, StringAttr,
    StringAttrInfo,
};

/// Attribute Value Table entries
pub use crate::table::{
    AttrValueEntry, EnumValue, EnumValueInfo, IntegerValue, IntegerValueInfo, StringValue,
    StringValueInfo, ValueBody,
};

// ================================================================================================
// Lookups and Trailer
// ================================================================================================

/// Linear lookups
pub use crate::table::{
    find_attr_by_handle, find_attr_by_name_handle, find_attr_value_by_handle,
    find_string_by_handle, find_string_by_text,
};

/// Pad and checksum
pub use crate::table::{append_pad_checksum, append_pad_checksum_checked, pad_checksum_size, verify_checksum};
