//! Validation configuration for loading persisted tables
//!
//! Tables built with [`crate::table::TableWriter`] are correct by construction. Tables received
//! from another party or read back from storage are not, and [`crate::table::BiosTable::parse`]
//! uses this configuration to decide how much of the table to check before handing it out.

/// Checks performed by [`crate::table::BiosTable::parse`]
///
/// Iteration and lookups bounds-check every entry regardless of this configuration; the checks
/// here only move failure detection from first use to load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationConfig {
    /// Recompute the CRC-32 over entries and pad and compare it with the trailer
    pub verify_checksum: bool,

    /// Require zero pad bytes, and an entry region that ends exactly where the pad begins
    pub verify_padding: bool,

    /// Walk every entry, rejecting unsupported type tags and entries that overrun the table
    pub verify_entries: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            verify_checksum: true,
            verify_padding: true,
            verify_entries: true,
        }
    }
}

impl ValidationConfig {
    /// Creates a disabled validation configuration
    ///
    /// Only the minimum table length is checked.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            verify_checksum: false,
            verify_padding: false,
            verify_entries: false,
        }
    }

    /// Creates a minimal validation configuration
    ///
    /// Walks the entries but trusts the trailer.
    #[must_use]
    pub fn minimal() -> Self {
        Self {
            verify_checksum: false,
            verify_padding: false,
            verify_entries: true,
        }
    }

    /// Creates a validation configuration with all checks enabled
    #[must_use]
    pub fn strict() -> Self {
        Self::default()
    }

    /// Returns `true` if `parse` has to walk the entries.
    #[must_use]
    pub(crate) fn walks_entries(&self) -> bool {
        self.verify_entries || self.verify_padding
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets() {
        let disabled = ValidationConfig::disabled();
        assert!(!disabled.verify_checksum);
        assert!(!disabled.verify_padding);
        assert!(!disabled.verify_entries);
        assert!(!disabled.walks_entries());

        let minimal = ValidationConfig::minimal();
        assert!(!minimal.verify_checksum);
        assert!(!minimal.verify_padding);
        assert!(minimal.verify_entries);

        let padding_only = ValidationConfig {
            verify_padding: true,
            ..ValidationConfig::disabled()
        };
        assert!(padding_only.walks_entries());
    }

    #[test]
    fn default_is_strict() {
        assert_eq!(ValidationConfig::default(), ValidationConfig::strict());
        assert!(ValidationConfig::default().verify_checksum);
    }
}
