//! Component identity: fingerprints and the configs that own them.
//!
//! Every agent, task, and crew owns one `IdentityConfig`, which in turn
//! owns exactly one `Fingerprint`.

pub mod config;
pub mod fingerprint;

pub use config::{IdentityConfig, IdentityInput};
pub use fingerprint::{validate_metadata, Fingerprint, Metadata, MAX_METADATA_BYTES};
