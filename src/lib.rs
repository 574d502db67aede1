// Copyright 2025 The pldm-bios-table Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
// - 'file/physical.rs' uses mmap to map a persisted table into memory

//! # pldm-bios-table
//!
//! Encoding, decoding, iteration and checksumming of PLDM BIOS tables.
//!
//! A management controller and host firmware describe BIOS configuration through three tables:
//! the String Table (handles mapped to names and values), the Attribute Table (enumeration,
//! string and integer attribute definitions) and the Attribute Value Table (current values).
//! Each table is a flat byte buffer of variable-length entries with no index, closed by pad
//! bytes and a CRC-32. This crate reads and writes those buffers without copying and without
//! ever trusting a length it has not checked against the buffer.
//!
//! ## Features
//!
//! - **Zero-copy views** - Entries are borrowed views over the caller's buffer
//! - **Bounds-checked parsing** - Every self-described length is validated before use
//! - **Checked and unchecked encoders** - Validation errors as values, or a panic on misuse
//! - **Self-verifying tables** - Pad and CRC-32 trailer, verified on load when requested
//! - **Persisted tables** - Memory-mapped loading of tables stored on disk
//!
//! ## Quick Start
//!
//! ```rust
//! use pldm_bios_table::prelude::*;
//!
//! // Build an Attribute Value Table
//! let mut buffer = [0u8; 64];
//! let mut writer = TableWriter::new(&mut buffer, TableKind::AttrValue);
//! writer.push(&EnumValueInfo { handle: 0, attr_type: AttrType::Enumeration, indices: &[1] })?;
//! writer.push(&IntegerValueInfo { handle: 1, attr_type: AttrType::Integer, value: 30 })?;
//! let length = writer.finish()?;
//!
//! // Load it back with full validation
//! let table = BiosTable::parse(&buffer[..length], TableKind::AttrValue, &ValidationConfig::default())?;
//! let timeout = table.find_attr_value_by_handle(1)?.expect("attribute 1 present");
//! assert_eq!(timeout.as_integer()?.value(), 30);
//! # Ok::<(), pldm_bios_table::Error>(())
//! ```
//!
//! ## Architecture
//!
//! - [`table`] - Table kinds, entry codecs, iterator, lookups, trailer and builder
//! - [`file`] - Byte cursors and backends for persisted tables
//! - [`config`] - Load-time validation settings
//! - [`prelude`] - Convenient re-exports of commonly used types and traits
//! - [`Error`] and [`Result`] - Error handling
//!
//! ## Error Handling
//!
//! All fallible operations return [`Result<T, Error>`](Result):
//!
//! ```rust
//! use pldm_bios_table::{table::find_attr_value_by_handle, Error};
//!
//! // An attribute value entry with the unsupported password type tag
//! let table = [0x00, 0x00, 0x02, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00];
//!
//! match find_attr_value_by_handle(&table, 0) {
//!     Err(Error::CorruptTable { offset, .. }) => assert_eq!(offset, 0),
//!     other => panic!("unexpected result: {other:?}"),
//! }
//! ```
//!
//! ## Development and Testing
//!
//! ```bash
//! cargo test
//! cargo bench
//! cargo +nightly fuzz run table_iter --release
//! ```
#[macro_use]
pub(crate) mod error;

/// Shared functionality which is used in unit-tests
#[cfg(test)]
pub(crate) mod test;

/// Convenient re-exports of the most commonly used types and traits.
///
/// ```rust
/// use pldm_bios_table::prelude::*;
///
/// let entry = [0x04, 0x00, 0x07, 0x00, b'A', b'l', b'l', b'o', b'w', b'e', b'd'];
/// assert_eq!(StringEntry::parse(&entry)?.as_str()?, "Allowed");
/// # Ok::<(), Error>(())
/// ```
pub mod prelude;

/// Load-time validation settings
pub mod config;

/// Byte cursors, storage backends and persisted tables
pub mod file;

/// PLDM BIOS table codec
pub mod table;

/// `pldm-bios-table` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error type is always [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// `pldm-bios-table` Error type
///
/// Every fallible operation in the crate reports one of its variants.
pub use error::Error;

/// Load-time validation settings for [`BiosTable::parse`].
pub use config::ValidationConfig;

/// Bounds-checked read cursor over a byte slice.
///
/// # Example
///
/// ```rust
/// use pldm_bios_table::Parser;
///
/// let mut parser = Parser::new(&[0x09, 0x00, 0x01]);
/// assert_eq!(parser.read_le::<u16>()?, 9);
/// assert_eq!(parser.read_le::<u8>()?, 1);
/// assert!(parser.read_le::<u8>().is_err());
/// # Ok::<(), pldm_bios_table::Error>(())
/// ```
pub use file::parser::Parser;

/// A persisted table and its kind.
pub use file::TableFile;

/// A table buffer paired with its kind.
pub use table::{BiosTable, TableKind};
