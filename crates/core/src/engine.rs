//! Digest engine contract
//!
//! Each of the seventeen primitives is consumed through the same three
//! operations: `reset`, `absorb` and `finalize_into`. The cascade never looks
//! inside an engine, so any conformant implementation can be swapped in
//! without changing the output.

use core::fmt;

use crate::error::EngineError;
use crate::params::{NARROW_DIGEST_SIZE, STAGES, WIDE_DIGEST_SIZE};

/// The seventeen hash primitives of the cascade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Primitive {
    Blake512,
    Bmw512,
    Groestl512,
    Skein512,
    Jh512,
    Keccak512,
    Luffa512,
    CubeHash512,
    Shavite512,
    Simd512,
    Echo512,
    Hamsi512,
    Fugue512,
    Shabal512,
    Whirlpool,
    Sha512,
    Haval256_5,
}

impl Primitive {
    /// All primitives in cascade order
    pub const ALL: [Primitive; STAGES] = [
        Primitive::Blake512,
        Primitive::Bmw512,
        Primitive::Groestl512,
        Primitive::Skein512,
        Primitive::Jh512,
        Primitive::Keccak512,
        Primitive::Luffa512,
        Primitive::CubeHash512,
        Primitive::Shavite512,
        Primitive::Simd512,
        Primitive::Echo512,
        Primitive::Hamsi512,
        Primitive::Fugue512,
        Primitive::Shabal512,
        Primitive::Whirlpool,
        Primitive::Sha512,
        Primitive::Haval256_5,
    ];

    /// Position of this primitive in [`Primitive::ALL`]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Digest width in bytes
    pub fn output_size(self) -> usize {
        match self {
            Primitive::Haval256_5 => NARROW_DIGEST_SIZE,
            _ => WIDE_DIGEST_SIZE,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Primitive::Blake512 => "BLAKE-512",
            Primitive::Bmw512 => "BMW-512",
            Primitive::Groestl512 => "Groestl-512",
            Primitive::Skein512 => "Skein-512",
            Primitive::Jh512 => "JH-512",
            Primitive::Keccak512 => "Keccak-512",
            Primitive::Luffa512 => "Luffa-512",
            Primitive::CubeHash512 => "CubeHash-512",
            Primitive::Shavite512 => "SHAvite-512",
            Primitive::Simd512 => "SIMD-512",
            Primitive::Echo512 => "ECHO-512",
            Primitive::Hamsi512 => "Hamsi-512",
            Primitive::Fugue512 => "Fugue-512",
            Primitive::Shabal512 => "Shabal-512",
            Primitive::Whirlpool => "Whirlpool",
            Primitive::Sha512 => "SHA-512",
            Primitive::Haval256_5 => "HAVAL-256/5",
        }
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One hash primitive instance
///
/// After `finalize_into` the engine is terminal: further `absorb` or
/// `finalize_into` calls fail with [`EngineError::NotReset`] until `reset`.
pub trait DigestEngine: Send + Sync {
    /// Which primitive this engine computes
    fn primitive(&self) -> Primitive;

    /// Short name of the implementation backing this engine
    fn backend(&self) -> &'static str;

    /// Return to the well-defined initial state
    fn reset(&mut self);

    /// Feed bytes into the running state
    fn absorb(&mut self, data: &[u8]) -> Result<(), EngineError>;

    /// Write the digest into `out`, which must be exactly `output_size()` bytes
    fn finalize_into(&mut self, out: &mut [u8]) -> Result<(), EngineError>;

    /// Clone the current state behind a fresh box
    fn box_clone(&self) -> Box<dyn DigestEngine>;

    fn output_size(&self) -> usize {
        self.primitive().output_size()
    }
}

impl Clone for Box<dyn DigestEngine> {
    fn clone(&self) -> Self {
        self.box_clone()
    }
}

impl fmt::Debug for dyn DigestEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DigestEngine")
            .field("primitive", &self.primitive())
            .field("backend", &self.backend())
            .finish()
    }
}

/// Private, mutable copy of every engine, owned by one hash computation
#[derive(Clone, Debug)]
pub struct EngineSet {
    engines: Vec<Box<dyn DigestEngine>>,
}

impl EngineSet {
    pub(crate) fn new(engines: Vec<Box<dyn DigestEngine>>) -> Self {
        debug_assert_eq!(engines.len(), STAGES);
        Self { engines }
    }

    pub fn get(&self, primitive: Primitive) -> &dyn DigestEngine {
        self.engines[primitive.index()].as_ref()
    }

    pub fn get_mut(&mut self, primitive: Primitive) -> &mut dyn DigestEngine {
        self.engines[primitive.index()].as_mut()
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn DigestEngine> {
        self.engines.iter().map(|e| e.as_ref())
    }
}
