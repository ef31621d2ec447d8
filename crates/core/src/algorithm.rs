//! Hash algorithms addressable by identifier
//!
//! A pool picks its proof-of-work function by name (`"xevan"`, `"xehash"`,
//! `"zksnark"`); each entry writes a 32-byte digest into a caller buffer.

use std::collections::HashMap;

use crate::auxiliary::{XeHashBackend, ZkSnarkBackend, ZkSnarkHasher};
use crate::cascade::hash_with;
use crate::error::{Error, Result};
use crate::params::OUTPUT_SIZE;
use crate::template::{ContextTemplate, template};

pub trait HashAlgorithm: Send + Sync {
    fn id(&self) -> &'static str;

    /// Write the digest of `data` into the first 32 bytes of `result`
    fn digest(&self, data: &[u8], result: &mut [u8]) -> Result<()>;
}

fn output_slot(result: &mut [u8]) -> Result<&mut [u8]> {
    if result.len() < OUTPUT_SIZE {
        return Err(Error::OutputTooSmall {
            required: OUTPUT_SIZE,
            actual: result.len(),
        });
    }
    Ok(&mut result[..OUTPUT_SIZE])
}

/// The seventeen-primitive cascade
pub struct Xevan {
    template: Option<&'static ContextTemplate>,
}

impl Xevan {
    /// Uses the process-wide template, resolved on first digest
    pub fn new() -> Self {
        Self { template: None }
    }

    pub fn with_template(template: &'static ContextTemplate) -> Self {
        Self {
            template: Some(template),
        }
    }
}

impl Default for Xevan {
    fn default() -> Self {
        Self::new()
    }
}

impl HashAlgorithm for Xevan {
    fn id(&self) -> &'static str {
        "xevan"
    }

    fn digest(&self, data: &[u8], result: &mut [u8]) -> Result<()> {
        let slot = output_slot(result)?;
        let template = match self.template {
            Some(t) => t,
            None => template()?,
        };
        slot.copy_from_slice(&hash_with(template, data)?);
        Ok(())
    }
}

pub struct XeHash<B> {
    backend: B,
}

impl<B: XeHashBackend> XeHash<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }
}

impl<B: XeHashBackend> HashAlgorithm for XeHash<B> {
    fn id(&self) -> &'static str {
        "xehash"
    }

    fn digest(&self, data: &[u8], result: &mut [u8]) -> Result<()> {
        let slot = output_slot(result)?;
        let mut out = [0u8; OUTPUT_SIZE];
        self.backend.hash(data, &mut out)?;
        slot.copy_from_slice(&out);
        Ok(())
    }
}

pub struct ZkSnark<B> {
    hasher: ZkSnarkHasher<B>,
}

impl<B: ZkSnarkBackend> ZkSnark<B> {
    pub fn new(backend: B) -> Self {
        Self {
            hasher: ZkSnarkHasher::new(backend),
        }
    }
}

impl<B: ZkSnarkBackend> HashAlgorithm for ZkSnark<B> {
    fn id(&self) -> &'static str {
        "zksnark"
    }

    fn digest(&self, data: &[u8], result: &mut [u8]) -> Result<()> {
        let slot = output_slot(result)?;
        slot.copy_from_slice(&self.hasher.digest(data)?);
        Ok(())
    }
}

/// Algorithms keyed by [`HashAlgorithm::id`]
#[derive(Default)]
pub struct AlgorithmRegistry {
    algorithms: HashMap<&'static str, Box<dyn HashAlgorithm>>,
}

impl AlgorithmRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the cascade pre-registered
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(Xevan::new()));
        registry
    }

    /// Add or replace the algorithm under its identifier
    pub fn register(&mut self, algorithm: Box<dyn HashAlgorithm>) {
        self.algorithms.insert(algorithm.id(), algorithm);
    }

    pub fn get(&self, id: &str) -> Result<&dyn HashAlgorithm> {
        self.algorithms
            .get(id)
            .map(|a| a.as_ref())
            .ok_or_else(|| Error::UnknownAlgorithm(id.to_string()))
    }

    pub fn ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.algorithms.keys().copied()
    }
}
