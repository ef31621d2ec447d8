//! Digest engines backed by pure-Rust primitive crates
//!
//! Eight of the seventeen primitives have maintained RustCrypto-style crates.
//! The rest (BMW, Luffa, CubeHash, SHAvite, SIMD, ECHO, Hamsi, Fugue and
//! HAVAL) come from the native sphlib backend or are registered by the caller.

use digest::Digest;
use digest::consts::U64;

use crate::engine::{DigestEngine, Primitive};
use crate::error::EngineError;

/// Backend label for RustCrypto engines
pub const RUST_CRYPTO: &str = "rust-crypto";

/// Adapter over any `digest` 0.10 hasher
///
/// `finalize_into` swaps in a fresh state and finalizes the old one, so the
/// engine only becomes usable again after `reset`.
#[derive(Clone)]
pub struct RustCryptoEngine<D> {
    primitive: Primitive,
    state: D,
    finalized: bool,
}

impl<D: Digest> RustCryptoEngine<D> {
    pub fn new(primitive: Primitive) -> Self {
        Self {
            primitive,
            state: D::new(),
            finalized: false,
        }
    }
}

impl<D> DigestEngine for RustCryptoEngine<D>
where
    D: Digest + Clone + Send + Sync + 'static,
{
    fn primitive(&self) -> Primitive {
        self.primitive
    }

    fn backend(&self) -> &'static str {
        RUST_CRYPTO
    }

    fn reset(&mut self) {
        self.state = D::new();
        self.finalized = false;
    }

    fn absorb(&mut self, data: &[u8]) -> Result<(), EngineError> {
        if self.finalized {
            return Err(EngineError::NotReset);
        }
        Digest::update(&mut self.state, data);
        Ok(())
    }

    fn finalize_into(&mut self, out: &mut [u8]) -> Result<(), EngineError> {
        if self.finalized {
            return Err(EngineError::NotReset);
        }
        let expected = <D as Digest>::output_size();
        if out.len() != expected {
            return Err(EngineError::OutputSize {
                expected,
                actual: out.len(),
            });
        }
        let state = core::mem::replace(&mut self.state, D::new());
        out.copy_from_slice(&state.finalize());
        self.finalized = true;
        Ok(())
    }

    fn box_clone(&self) -> Box<dyn DigestEngine> {
        Box::new(self.clone())
    }

    fn output_size(&self) -> usize {
        <D as Digest>::output_size()
    }
}

/// Adapter over hashers still published against the `digest` 0.9 API
#[derive(Clone)]
pub struct LegacyDigestEngine<D> {
    primitive: Primitive,
    state: D,
    finalized: bool,
}

impl<D: digest_legacy::Digest> LegacyDigestEngine<D> {
    pub fn new(primitive: Primitive) -> Self {
        Self {
            primitive,
            state: D::new(),
            finalized: false,
        }
    }
}

impl<D> DigestEngine for LegacyDigestEngine<D>
where
    D: digest_legacy::Digest + Clone + Send + Sync + 'static,
{
    fn primitive(&self) -> Primitive {
        self.primitive
    }

    fn backend(&self) -> &'static str {
        RUST_CRYPTO
    }

    fn reset(&mut self) {
        self.state = D::new();
        self.finalized = false;
    }

    fn absorb(&mut self, data: &[u8]) -> Result<(), EngineError> {
        if self.finalized {
            return Err(EngineError::NotReset);
        }
        digest_legacy::Digest::update(&mut self.state, data);
        Ok(())
    }

    fn finalize_into(&mut self, out: &mut [u8]) -> Result<(), EngineError> {
        if self.finalized {
            return Err(EngineError::NotReset);
        }
        let expected = <D as digest_legacy::Digest>::output_size();
        if out.len() != expected {
            return Err(EngineError::OutputSize {
                expected,
                actual: out.len(),
            });
        }
        let state = core::mem::replace(&mut self.state, D::new());
        out.copy_from_slice(&digest_legacy::Digest::finalize(state));
        self.finalized = true;
        Ok(())
    }

    fn box_clone(&self) -> Box<dyn DigestEngine> {
        Box::new(self.clone())
    }

    fn output_size(&self) -> usize {
        <D as digest_legacy::Digest>::output_size()
    }
}

/// Pure-Rust engine for `primitive`, if one exists
pub fn rust_crypto_engine(primitive: Primitive) -> Option<Box<dyn DigestEngine>> {
    let engine: Box<dyn DigestEngine> = match primitive {
        Primitive::Blake512 => Box::new(LegacyDigestEngine::<blake_hash::Blake512>::new(primitive)),
        Primitive::Groestl512 => Box::new(RustCryptoEngine::<groestl::Groestl512>::new(primitive)),
        Primitive::Skein512 => Box::new(RustCryptoEngine::<skein::Skein512<U64>>::new(primitive)),
        Primitive::Jh512 => Box::new(RustCryptoEngine::<jh::Jh512>::new(primitive)),
        // sphlib's keccak512 uses the Keccak submission padding, not FIPS 202
        Primitive::Keccak512 => Box::new(RustCryptoEngine::<sha3::Keccak512>::new(primitive)),
        Primitive::Shabal512 => Box::new(RustCryptoEngine::<shabal::Shabal512>::new(primitive)),
        Primitive::Whirlpool => Box::new(RustCryptoEngine::<whirlpool::Whirlpool>::new(primitive)),
        Primitive::Sha512 => Box::new(RustCryptoEngine::<sha2::Sha512>::new(primitive)),
        _ => return None,
    };
    Some(engine)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn covers_expected_primitives() {
        let covered: Vec<Primitive> = Primitive::ALL
            .iter()
            .copied()
            .filter(|p| rust_crypto_engine(*p).is_some())
            .collect();
        assert_eq!(
            covered,
            vec![
                Primitive::Blake512,
                Primitive::Groestl512,
                Primitive::Skein512,
                Primitive::Jh512,
                Primitive::Keccak512,
                Primitive::Shabal512,
                Primitive::Whirlpool,
                Primitive::Sha512,
            ]
        );
    }

    #[test]
    fn output_widths_match_primitive() {
        for p in Primitive::ALL {
            if let Some(engine) = rust_crypto_engine(p) {
                assert_eq!(engine.output_size(), p.output_size(), "{}", p);
                assert_eq!(engine.primitive(), p);
            }
        }
    }

    #[test]
    fn sha512_known_answer() {
        let mut engine = rust_crypto_engine(Primitive::Sha512).unwrap();
        engine.absorb(b"abc").unwrap();
        let mut out = [0u8; 64];
        engine.finalize_into(&mut out).unwrap();
        assert_eq!(
            hex::encode(out),
            "ddaf35a193617abacc417349ae20413112e6fa4e89a97ea20a9eeee64b55d39a\
             2192992a274fc1a836ba3c23a3feebbd454d4423643ce80e2a9ac94fa54ca49f"
        );
    }

    #[test]
    fn adapter_matches_direct_crate_call() {
        let data = [0x5au8; 128];
        let mut engine = rust_crypto_engine(Primitive::Groestl512).unwrap();
        engine.absorb(&data).unwrap();
        let mut out = [0u8; 64];
        engine.finalize_into(&mut out).unwrap();
        assert_eq!(out.as_slice(), groestl::Groestl512::digest(data).as_slice());

        let mut engine = rust_crypto_engine(Primitive::Keccak512).unwrap();
        engine.absorb(&data).unwrap();
        engine.finalize_into(&mut out).unwrap();
        assert_eq!(out.as_slice(), sha3::Keccak512::digest(data).as_slice());
    }

    #[test]
    fn finalize_is_terminal_until_reset() {
        let mut engine = rust_crypto_engine(Primitive::Whirlpool).unwrap();
        let mut first = [0u8; 64];
        engine.absorb(b"xevan").unwrap();
        engine.finalize_into(&mut first).unwrap();

        let mut out = [0u8; 64];
        assert_eq!(engine.absorb(b"more"), Err(EngineError::NotReset));
        assert_eq!(engine.finalize_into(&mut out), Err(EngineError::NotReset));

        engine.reset();
        engine.absorb(b"xevan").unwrap();
        engine.finalize_into(&mut out).unwrap();
        assert_eq!(first, out);
    }

    #[test]
    fn wrong_output_slot_rejected() {
        let mut engine = rust_crypto_engine(Primitive::Blake512).unwrap();
        let mut short = [0u8; 32];
        assert_eq!(
            engine.finalize_into(&mut short),
            Err(EngineError::OutputSize {
                expected: 64,
                actual: 32
            })
        );
    }

    #[test]
    fn clone_carries_absorbed_state() {
        let mut engine = rust_crypto_engine(Primitive::Skein512).unwrap();
        engine.absorb(b"prefix").unwrap();
        let mut copy = engine.box_clone();

        let mut a = [0u8; 64];
        let mut b = [0u8; 64];
        engine.finalize_into(&mut a).unwrap();
        copy.finalize_into(&mut b).unwrap();
        assert_eq!(a, b);
    }
}
