//! Mining adapter
//!
//! A work item pairs a 128-byte data block, whose first 80 bytes are the
//! block header, with the slot its digest is written to. The `#[repr(C)]`
//! layout is `{ uint8_t data[128]; uint8_t hash[32]; }`, the work struct
//! native miners already pass to `xevan_regenhash`.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::cascade::XevanHash;
use crate::error::Result;
use crate::params::{INPUT_SIZE, NONCE_OFFSET, OUTPUT_SIZE, WORK_BUFFER_SIZE};
use crate::template::{ContextTemplate, template};

#[repr(C)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Work {
    /// Header in bytes [0, 80) with the little-endian nonce at 76; the
    /// rest is not hashed
    pub data: [u8; WORK_BUFFER_SIZE],
    /// Digest of `data`, valid after `regen_hash`
    pub hash: [u8; OUTPUT_SIZE],
}

impl Work {
    pub fn new(header: [u8; INPUT_SIZE]) -> Self {
        let mut data = [0u8; WORK_BUFFER_SIZE];
        data[..INPUT_SIZE].copy_from_slice(&header);
        Self {
            data,
            hash: [0u8; OUTPUT_SIZE],
        }
    }

    /// The hashed part of `data`
    pub fn header(&self) -> &[u8] {
        &self.data[..INPUT_SIZE]
    }

    pub fn nonce(&self) -> u32 {
        let mut bytes = [0u8; 4];
        bytes.copy_from_slice(&self.data[NONCE_OFFSET..INPUT_SIZE]);
        u32::from_le_bytes(bytes)
    }

    /// Overwrite the header nonce; the stale digest is cleared
    pub fn set_nonce(&mut self, nonce: u32) {
        self.data[NONCE_OFFSET..INPUT_SIZE].copy_from_slice(&nonce.to_le_bytes());
        self.hash = [0u8; OUTPUT_SIZE];
    }
}

/// Recompute `work.hash` from `work.data` with the process-wide template
pub fn regen_hash(work: &mut Work) -> Result<()> {
    regen_hash_with(template()?, work)
}

pub fn regen_hash_with(template: &ContextTemplate, work: &mut Work) -> Result<()> {
    work.hash = XevanHash::with_template(template).hash(work.header())?;
    Ok(())
}

/// Recompute the digests of a batch of work items
///
/// Runs across all cores when the `parallel` feature is enabled; the results
/// are identical either way.
pub fn regen_hashes(works: &mut [Work]) -> Result<()> {
    regen_hashes_with(template()?, works)
}

#[cfg(feature = "parallel")]
pub fn regen_hashes_with(template: &ContextTemplate, works: &mut [Work]) -> Result<()> {
    works.par_iter_mut().try_for_each_init(
        || XevanHash::with_template(template),
        |hasher, work| {
            work.hash = hasher.hash(work.header())?;
            Ok(())
        },
    )
}

#[cfg(not(feature = "parallel"))]
pub fn regen_hashes_with(template: &ContextTemplate, works: &mut [Work]) -> Result<()> {
    let mut hasher = XevanHash::with_template(template);
    for work in works.iter_mut() {
        work.hash = hasher.hash(work.header())?;
    }
    Ok(())
}
