//! Crate level tests for tree construction, path generation and verification

mod properties;
