//! Table fixtures shared by unit tests.
//!
//! [`build_table`] lays entries out the way a producer would but leaves the checksum zeroed,
//! which is enough for iteration and lookup tests. [`finalized_table`] adds a real checksum.


pub use fixtures::*;

use crate::table::{append_pad_checksum, pad_checksum_size, pad_size, CHECKSUM_SIZE};

/// Concatenate `entries`, then append zero pad and a zero checksum.
pub fn build_table(entries: &[&[u8]]) -> Vec<u8> {
    let mut table: Vec<u8> = entries.concat();
    let pad = pad_size(table.len());
    table.resize(table.len() + pad + CHECKSUM_SIZE, 0);
    table
}

/// Concatenate `entries`, then append pad and a valid checksum.
pub fn finalized_table(entries: &[&[u8]]) -> Vec<u8> {
    let mut table: Vec<u8> = entries.concat();
    let unpadded = table.len();
    table.resize(unpadded + pad_checksum_size(unpadded), 0);
    append_pad_checksum(&mut table, unpadded);
    table
}
