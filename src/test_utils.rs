//! Test utilities for property-based testing
//!
//! This module provides generators and helpers for proptest.

#[cfg(test)]
pub mod generators {
    use proptest::prelude::*;

    /// Generate a valid recipe name (lowercase alphanumeric with hyphens)
    pub fn recipe_name() -> impl Strategy<Value = String> {
        "[a-z][a-z0-9-]{0,30}[a-z0-9]?".prop_filter("Name must not be empty", |s| !s.is_empty())
    }

    /// Generate a valid semver version string
    pub fn semver_version() -> impl Strategy<Value = String> {
        (1u32..100, 0u32..100, 0u32..100)
            .prop_map(|(major, minor, patch)| format!("{major}.{minor}.{patch}"))
    }

    /// Generate a tag-style version string (`r21e`)
    pub fn tag_version() -> impl Strategy<Value = String> {
        (1u32..30, "[a-e]").prop_map(|(number, letter)| format!("r{number}{letter}"))
    }

    /// Generate a valid SHA256 hash (64 hex characters)
    pub fn sha256_hash() -> impl Strategy<Value = String> {
        "[0-9a-f]{64}"
    }

    /// Generate a valid archive URL
    pub fn archive_url() -> impl Strategy<Value = String> {
        (
            prop_oneof!["https", "http"],
            "[a-z]{3,10}",
            "[a-z]{2,5}",
            "[a-z0-9-]{1,20}",
        )
            .prop_map(|(scheme, domain, tld, path)| {
                format!("{scheme}://{domain}.{tld}/{path}.tar.gz")
            })
    }

    /// Generate a 4-byte file signature
    pub fn signature() -> impl Strategy<Value = [u8; 4]> {
        prop::array::uniform4(0u8..)
    }
}
