//! Seed derivation using HKDF-SHA256.
//!
//! Turns a caller-supplied seed string into a fixed-size identifier.
//! The namespace salt and context strings must remain stable across
//! versions, otherwise seeded fingerprints change.

use hkdf::Hkdf;
use sha2::Sha256;

use crate::error::{CrewError, Result};

/// Salt separating agentic-crew derivations from any other HKDF use.
const NAMESPACE_SALT: &[u8] = b"agentic-crew/namespace/v1";

/// Length of a derived identifier in bytes.
pub const ID_LEN: usize = 16;

/// Derive an identifier from a seed and context string.
///
/// Uses HKDF-SHA256 (RFC 5869) with the seed as IKM, a fixed namespace
/// salt, and the context as info. Pure function of its inputs.
pub fn derive_id(seed: &[u8], context: &str) -> Result<[u8; ID_LEN]> {
    let hk = Hkdf::<Sha256>::new(Some(NAMESPACE_SALT), seed);
    let mut output = [0u8; ID_LEN];
    hk.expand(context.as_bytes(), &mut output)
        .map_err(|e| CrewError::DerivationFailed(format!("HKDF expand failed: {e}")))?;
    Ok(output)
}

/// Build the derivation context for fingerprint values.
pub fn fingerprint_context() -> &'static str {
    "agentic-crew/fingerprint"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derivation_deterministic() {
        let a = derive_id(b"crew-42", fingerprint_context()).unwrap();
        let b = derive_id(b"crew-42", fingerprint_context()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_seed_different_output() {
        let a = derive_id(b"seed-a", fingerprint_context()).unwrap();
        let b = derive_id(b"seed-b", fingerprint_context()).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_different_context_different_output() {
        let a = derive_id(b"same-seed", "context-a").unwrap();
        let b = derive_id(b"same-seed", "context-b").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_derive_id_propagates_as_result() {
        let id = derive_id(b"crew-42", "").unwrap();
        assert_eq!(id.len(), ID_LEN);
        assert!(id.iter().any(|&b| b != 0));
    }
}
