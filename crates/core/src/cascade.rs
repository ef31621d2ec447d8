//! Core Xevan cascade
//!
//! Two rounds over the same seventeen-primitive chain, sharing one 128-byte
//! working buffer:
//! - Round 1 absorbs the 80-byte header at BLAKE-512, then every later step
//!   absorbs the full 128-byte buffer and overwrites its head with the digest
//! - Wide steps write 64 bytes, HAVAL-256/5 writes 32; whatever sits above the
//!   written span is left over from earlier steps and is absorbed as-is
//! - Between the rounds bytes [32, 128) are zeroed
//! - Round 2 repeats the chain on the padded buffer
//! - The result is bytes [0, 32) after round 2

use crate::engine::{EngineSet, Primitive};
use crate::error::{EngineError, Error, Result};
use crate::params::*;
use crate::template::{ContextTemplate, template};

/// Step order of one round
pub const CASCADE_ORDER: [Primitive; STAGES] = Primitive::ALL;

/// The 128-byte working buffer
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorkBuffer([u8; WORK_BUFFER_SIZE]);

impl WorkBuffer {
    pub fn new() -> Self {
        Self([0u8; WORK_BUFFER_SIZE])
    }

    pub fn clear(&mut self) {
        self.0.fill(0);
    }

    /// Zero bytes [PAD_OFFSET, WORK_BUFFER_SIZE), keeping the HAVAL output
    pub fn pad(&mut self) {
        self.0[PAD_OFFSET..].fill(0);
    }

    pub fn as_bytes(&self) -> &[u8; WORK_BUFFER_SIZE] {
        &self.0
    }

    pub fn as_bytes_mut(&mut self) -> &mut [u8; WORK_BUFFER_SIZE] {
        &mut self.0
    }

    /// Truncated result: bytes [0, OUTPUT_SIZE)
    pub fn digest(&self) -> [u8; OUTPUT_SIZE] {
        let mut out = [0u8; OUTPUT_SIZE];
        out.copy_from_slice(&self.0[..OUTPUT_SIZE]);
        out
    }
}

impl Default for WorkBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Xevan hasher
///
/// Holds a reference to an immutable [`ContextTemplate`] and its own working
/// buffer. One instance per thread; the buffer is zeroed at the start of every
/// call, so it can be reused for any number of hashes.
pub struct XevanHash<'t> {
    template: &'t ContextTemplate,
    buffer: WorkBuffer,
}

impl XevanHash<'static> {
    /// Hasher over the process-wide template
    pub fn new() -> Result<Self> {
        Ok(Self::with_template(template()?))
    }
}

impl<'t> XevanHash<'t> {
    pub fn with_template(template: &'t ContextTemplate) -> Self {
        Self {
            template,
            buffer: WorkBuffer::new(),
        }
    }

    pub fn template(&self) -> &'t ContextTemplate {
        self.template
    }

    /// Compute the Xevan digest of an 80-byte header
    ///
    /// Any other length is rejected with [`Error::InvalidInputLength`].
    pub fn hash(&mut self, input: &[u8]) -> Result<[u8; OUTPUT_SIZE]> {
        self.hash_with_order(input, &CASCADE_ORDER)
    }

    pub fn hash_header(&mut self, header: &[u8; INPUT_SIZE]) -> Result<[u8; OUTPUT_SIZE]> {
        self.hash(header)
    }

    pub(crate) fn hash_with_order(
        &mut self,
        input: &[u8],
        order: &[Primitive],
    ) -> Result<[u8; OUTPUT_SIZE]> {
        if input.len() != INPUT_SIZE {
            return Err(Error::InvalidInputLength {
                expected: INPUT_SIZE,
                actual: input.len(),
            });
        }

        self.buffer.clear();

        // Round 1: header in, leftovers above each digest are kept
        let mut engines = self.template.engines();
        run_round(&mut engines, &mut self.buffer, order, Some(input))?;

        // Only the round boundary is zero-padded
        self.buffer.pad();

        // Round 2: fresh engine states from the template
        let mut engines = self.template.engines();
        run_round(&mut engines, &mut self.buffer, order, None)?;

        Ok(self.buffer.digest())
    }
}

/// One traversal of `order`
///
/// When `header` is given the first step absorbs it instead of the buffer.
pub(crate) fn run_round(
    engines: &mut EngineSet,
    buffer: &mut WorkBuffer,
    order: &[Primitive],
    mut header: Option<&[u8]>,
) -> Result<()> {
    for &primitive in order {
        let fail = move |source: EngineError| Error::Engine { primitive, source };
        let engine = engines.get_mut(primitive);

        let absorbed = match header.take() {
            Some(input) => engine.absorb(input),
            None => engine.absorb(buffer.as_bytes()),
        };
        absorbed.map_err(fail)?;

        let width = primitive.output_size();
        engine
            .finalize_into(&mut buffer.as_bytes_mut()[..width])
            .map_err(fail)?;
    }
    Ok(())
}

/// Hash an 80-byte header with the process-wide template
pub fn hash(input: &[u8]) -> Result<[u8; OUTPUT_SIZE]> {
    hash_with(template()?, input)
}

pub fn hash_header(header: &[u8; INPUT_SIZE]) -> Result<[u8; OUTPUT_SIZE]> {
    hash(header)
}

/// Hash an 80-byte header with an explicit template
pub fn hash_with(template: &ContextTemplate, input: &[u8]) -> Result<[u8; OUTPUT_SIZE]> {
    XevanHash::with_template(template).hash(input)
}
