//! Context template
//!
//! Seventeen engines in their freshly initialized state. Built once, never
//! mutated afterwards; every hash computation clones it into a private
//! [`EngineSet`] instead of re-running each primitive's initialization.

use std::sync::OnceLock;

use crate::engine::{DigestEngine, EngineSet, Primitive};
use crate::error::{Error, Result};
use crate::params::STAGES;
use crate::primitives::rust_crypto_engine;

/// Process-wide template used by [`crate::hash`]
static TEMPLATE: OnceLock<ContextTemplate> = OnceLock::new();

/// Why the default template could not be built, once that has been tried
static BUILD_FAILURE: OnceLock<Error> = OnceLock::new();

/// Immutable snapshot of all engines' initial states
#[derive(Debug)]
pub struct ContextTemplate {
    engines: Vec<Box<dyn DigestEngine>>,
}

impl ContextTemplate {
    pub fn builder() -> TemplateBuilder {
        TemplateBuilder::new()
    }

    /// Build the default template: pure-Rust engines where available, the
    /// native sphlib engines for everything else when the `native` feature is on
    pub fn build() -> Result<Self> {
        let builder = TemplateBuilder::new().rust_crypto();
        #[cfg(feature = "native")]
        let builder = builder.native();
        builder.build()
    }

    /// Private copy of every engine for one hash computation
    pub fn engines(&self) -> EngineSet {
        EngineSet::new(self.engines.iter().map(|e| e.box_clone()).collect())
    }

    pub fn engine(&self, primitive: Primitive) -> &dyn DigestEngine {
        self.engines[primitive.index()].as_ref()
    }

    /// Backend serving each primitive, in cascade order
    pub fn backends(&self) -> impl Iterator<Item = (Primitive, &'static str)> + '_ {
        self.engines.iter().map(|e| (e.primitive(), e.backend()))
    }
}

/// Assembles a [`ContextTemplate`] from engine sources
///
/// Later sources only fill primitives that are still missing, except
/// [`TemplateBuilder::with_engine`], which always overrides.
#[derive(Default)]
pub struct TemplateBuilder {
    slots: [Option<Box<dyn DigestEngine>>; STAGES],
}

impl TemplateBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fill the primitives that have a pure-Rust implementation
    pub fn rust_crypto(mut self) -> Self {
        for primitive in Primitive::ALL {
            let slot = &mut self.slots[primitive.index()];
            if slot.is_none() {
                *slot = rust_crypto_engine(primitive);
            }
        }
        self
    }

    /// Fill every remaining primitive from sphlib
    #[cfg(feature = "native")]
    pub fn native(mut self) -> Self {
        for primitive in Primitive::ALL {
            let slot = &mut self.slots[primitive.index()];
            if slot.is_none() {
                *slot = Some(crate::sph::sph_engine(primitive));
            }
        }
        self
    }

    /// Register a caller-supplied engine for its primitive
    pub fn with_engine(mut self, engine: Box<dyn DigestEngine>) -> Self {
        let index = engine.primitive().index();
        self.slots[index] = Some(engine);
        self
    }

    /// Primitives with no engine yet
    pub fn missing(&self) -> Vec<Primitive> {
        Primitive::ALL
            .iter()
            .copied()
            .filter(|p| self.slots[p.index()].is_none())
            .collect()
    }

    pub fn build(self) -> Result<ContextTemplate> {
        let mut engines = Vec::with_capacity(STAGES);
        for (primitive, slot) in Primitive::ALL.into_iter().zip(self.slots) {
            let mut engine = slot.ok_or(Error::MissingPrimitive(primitive))?;
            if engine.output_size() != primitive.output_size() {
                return Err(Error::OutputWidth {
                    primitive,
                    expected: primitive.output_size(),
                    actual: engine.output_size(),
                });
            }
            // The template must hold initial states only
            engine.reset();
            log::debug!("{} served by {}", primitive, engine.backend());
            engines.push(engine);
        }
        log::info!("xevan context template built ({} engines)", engines.len());
        Ok(ContextTemplate { engines })
    }
}

/// Process-wide template, built on first use
///
/// Concurrent first callers may each build a candidate; exactly one is
/// published and every caller observes that one.
///
/// A failed default build is remembered and returned on later calls without
/// rebuilding; [`install_template`] still succeeds afterwards.
pub fn template() -> Result<&'static ContextTemplate> {
    if let Some(template) = TEMPLATE.get() {
        return Ok(template);
    }
    if let Some(err) = BUILD_FAILURE.get() {
        return Err(err.clone());
    }
    match ContextTemplate::build() {
        Ok(built) => Ok(TEMPLATE.get_or_init(|| built)),
        Err(err) => {
            log::warn!("default xevan template unavailable: {}", err);
            Err(BUILD_FAILURE.get_or_init(|| err).clone())
        }
    }
}

/// Install a caller-built template as the process-wide one
///
/// Must happen before the first [`template`] call; fails afterwards.
pub fn install_template(template: ContextTemplate) -> Result<&'static ContextTemplate> {
    TEMPLATE
        .set(template)
        .map_err(|_| Error::TemplateInstalled)?;
    TEMPLATE.get().ok_or(Error::TemplateInstalled)
}
