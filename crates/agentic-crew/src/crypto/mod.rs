//! Cryptographic primitives backing fingerprint values.
//!
//! This module provides:
//! - HKDF-SHA256 derivation of stable identifiers from seeds
//! - Cryptographically secure random number generation

pub mod derivation;
pub mod random;
