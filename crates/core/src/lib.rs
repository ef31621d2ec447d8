//! # Xevan Core Algorithm
//!
//! The Xevan proof-of-work hash: an 80-byte block header is chained through
//! seventeen hash primitives, twice, and truncated to a 32-byte digest.
//!
//! ## Algorithm
//!
//! - 128-byte working buffer, zeroed per call
//! - Round 1: BLAKE, BMW, Groestl, Skein, JH, Keccak, Luffa, CubeHash,
//!   SHAvite, SIMD, ECHO, Hamsi, Fugue, Shabal, Whirlpool, SHA-512,
//!   HAVAL-256/5; the first step absorbs the header, every later step the
//!   whole buffer
//! - Bytes [32, 128) zeroed
//! - Round 2: the same seventeen steps on the padded buffer
//! - Output: bytes [0, 32)
//!
//! ## Engines
//!
//! Primitives are consumed through the [`DigestEngine`] contract. Eight have
//! pure-Rust implementations built in; with the `native` feature the sphlib C
//! library serves the rest. Without it, register engines for the remaining
//! primitives with [`TemplateBuilder::with_engine`] and install the template.
//!
//! ## Example
//!
//! ```rust,no_run
//! use xevan_core::{XevanHash, hash};
//!
//! let header = [0u8; 80];
//!
//! // Single-shot hashing against the process-wide template
//! let digest = hash(&header)?;
//!
//! // Reusable hasher (one per mining thread)
//! let mut hasher = XevanHash::new()?;
//! assert_eq!(hasher.hash(&header)?, digest);
//! # Ok::<(), xevan_core::Error>(())
//! ```

mod algorithm;
mod auxiliary;
mod cascade;
mod engine;
mod error;
mod ffi;
mod params;
mod primitives;
#[cfg(feature = "native")]
mod sph;
mod template;
mod work;

pub use algorithm::{AlgorithmRegistry, HashAlgorithm, XeHash, Xevan, ZkSnark};
#[cfg(feature = "native-aux")]
pub use auxiliary::native::{NativeXeHash, NativeZkSnark};
pub use auxiliary::{
    PROOF_SIZE, PROVING_KEY_SIZE, VERIFICATION_KEY_SIZE, XEHASH_INPUT_SIZE, XeHashBackend,
    ZKSNARK_INPUT_SIZE, ZkSnarkBackend, ZkSnarkHasher, check_input,
};
pub use cascade::{CASCADE_ORDER, WorkBuffer, XevanHash, hash, hash_header, hash_with};
pub use engine::{DigestEngine, EngineSet, Primitive};
pub use error::{EngineError, Error, Result};
pub use ffi::{XEVAN_FAILURE, XEVAN_INVALID_ARGUMENT, XEVAN_OK, xevan_hash, xevan_regenhash};
pub use params::*;
pub use primitives::{LegacyDigestEngine, RUST_CRYPTO, RustCryptoEngine, rust_crypto_engine};
#[cfg(feature = "native")]
pub use sph::{SPH, SphEngine, sph_engine};
pub use template::{ContextTemplate, TemplateBuilder, install_template, template};
pub use work::{Work, regen_hash, regen_hash_with, regen_hashes, regen_hashes_with};
