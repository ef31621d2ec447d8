//! Digest engines over the sphlib C implementations
//!
//! Every sphlib context is a plain-old-data struct without interior
//! pointers, so an initialized context can be cloned with a byte copy. This is
//! what makes the context template cheap: `init` runs once, each hash call
//! copies the bytes.

use core::ffi::c_void;

use crate::engine::{DigestEngine, Primitive};
use crate::error::EngineError;

/// Backend label for sphlib engines
pub const SPH: &str = "sphlib";

/// Upper bound on `sizeof` of any sphlib context used by the cascade
///
/// The largest (ECHO-512 and SIMD-512) are well under 512 bytes.
const CONTEXT_CAPACITY: usize = 1024;

#[repr(C, align(16))]
#[derive(Clone, Copy)]
struct RawContext([u8; CONTEXT_CAPACITY]);

type InitFn = unsafe extern "C" fn(cc: *mut c_void);
type UpdateFn = unsafe extern "C" fn(cc: *mut c_void, data: *const c_void, len: usize);
type CloseFn = unsafe extern "C" fn(cc: *mut c_void, dst: *mut c_void);

#[derive(Clone, Copy)]
struct Functions {
    init: InitFn,
    update: UpdateFn,
    close: CloseFn,
}

unsafe extern "C" {
    fn sph_blake512_init(cc: *mut c_void);
    fn sph_blake512(cc: *mut c_void, data: *const c_void, len: usize);
    fn sph_blake512_close(cc: *mut c_void, dst: *mut c_void);

    fn sph_bmw512_init(cc: *mut c_void);
    fn sph_bmw512(cc: *mut c_void, data: *const c_void, len: usize);
    fn sph_bmw512_close(cc: *mut c_void, dst: *mut c_void);

    fn sph_groestl512_init(cc: *mut c_void);
    fn sph_groestl512(cc: *mut c_void, data: *const c_void, len: usize);
    fn sph_groestl512_close(cc: *mut c_void, dst: *mut c_void);

    fn sph_skein512_init(cc: *mut c_void);
    fn sph_skein512(cc: *mut c_void, data: *const c_void, len: usize);
    fn sph_skein512_close(cc: *mut c_void, dst: *mut c_void);

    fn sph_jh512_init(cc: *mut c_void);
    fn sph_jh512(cc: *mut c_void, data: *const c_void, len: usize);
    fn sph_jh512_close(cc: *mut c_void, dst: *mut c_void);

    fn sph_keccak512_init(cc: *mut c_void);
    fn sph_keccak512(cc: *mut c_void, data: *const c_void, len: usize);
    fn sph_keccak512_close(cc: *mut c_void, dst: *mut c_void);

    fn sph_luffa512_init(cc: *mut c_void);
    fn sph_luffa512(cc: *mut c_void, data: *const c_void, len: usize);
    fn sph_luffa512_close(cc: *mut c_void, dst: *mut c_void);

    fn sph_cubehash512_init(cc: *mut c_void);
    fn sph_cubehash512(cc: *mut c_void, data: *const c_void, len: usize);
    fn sph_cubehash512_close(cc: *mut c_void, dst: *mut c_void);

    fn sph_shavite512_init(cc: *mut c_void);
    fn sph_shavite512(cc: *mut c_void, data: *const c_void, len: usize);
    fn sph_shavite512_close(cc: *mut c_void, dst: *mut c_void);

    fn sph_simd512_init(cc: *mut c_void);
    fn sph_simd512(cc: *mut c_void, data: *const c_void, len: usize);
    fn sph_simd512_close(cc: *mut c_void, dst: *mut c_void);

    fn sph_echo512_init(cc: *mut c_void);
    fn sph_echo512(cc: *mut c_void, data: *const c_void, len: usize);
    fn sph_echo512_close(cc: *mut c_void, dst: *mut c_void);

    fn sph_hamsi512_init(cc: *mut c_void);
    fn sph_hamsi512(cc: *mut c_void, data: *const c_void, len: usize);
    fn sph_hamsi512_close(cc: *mut c_void, dst: *mut c_void);

    fn sph_fugue512_init(cc: *mut c_void);
    fn sph_fugue512(cc: *mut c_void, data: *const c_void, len: usize);
    fn sph_fugue512_close(cc: *mut c_void, dst: *mut c_void);

    fn sph_shabal512_init(cc: *mut c_void);
    fn sph_shabal512(cc: *mut c_void, data: *const c_void, len: usize);
    fn sph_shabal512_close(cc: *mut c_void, dst: *mut c_void);

    fn sph_whirlpool_init(cc: *mut c_void);
    fn sph_whirlpool(cc: *mut c_void, data: *const c_void, len: usize);
    fn sph_whirlpool_close(cc: *mut c_void, dst: *mut c_void);

    fn sph_sha512_init(cc: *mut c_void);
    // sph_sha2.h defines sph_sha512 as a macro over the shared SHA-384 update
    fn sph_sha384(cc: *mut c_void, data: *const c_void, len: usize);
    fn sph_sha512_close(cc: *mut c_void, dst: *mut c_void);

    fn sph_haval256_5_init(cc: *mut c_void);
    fn sph_haval256_5(cc: *mut c_void, data: *const c_void, len: usize);
    fn sph_haval256_5_close(cc: *mut c_void, dst: *mut c_void);
}

fn functions(primitive: Primitive) -> Functions {
    macro_rules! fns {
        ($init:ident, $update:ident, $close:ident) => {
            Functions {
                init: $init,
                update: $update,
                close: $close,
            }
        };
    }

    match primitive {
        Primitive::Blake512 => fns!(sph_blake512_init, sph_blake512, sph_blake512_close),
        Primitive::Bmw512 => fns!(sph_bmw512_init, sph_bmw512, sph_bmw512_close),
        Primitive::Groestl512 => fns!(sph_groestl512_init, sph_groestl512, sph_groestl512_close),
        Primitive::Skein512 => fns!(sph_skein512_init, sph_skein512, sph_skein512_close),
        Primitive::Jh512 => fns!(sph_jh512_init, sph_jh512, sph_jh512_close),
        Primitive::Keccak512 => fns!(sph_keccak512_init, sph_keccak512, sph_keccak512_close),
        Primitive::Luffa512 => fns!(sph_luffa512_init, sph_luffa512, sph_luffa512_close),
        Primitive::CubeHash512 => {
            fns!(sph_cubehash512_init, sph_cubehash512, sph_cubehash512_close)
        }
        Primitive::Shavite512 => fns!(sph_shavite512_init, sph_shavite512, sph_shavite512_close),
        Primitive::Simd512 => fns!(sph_simd512_init, sph_simd512, sph_simd512_close),
        Primitive::Echo512 => fns!(sph_echo512_init, sph_echo512, sph_echo512_close),
        Primitive::Hamsi512 => fns!(sph_hamsi512_init, sph_hamsi512, sph_hamsi512_close),
        Primitive::Fugue512 => fns!(sph_fugue512_init, sph_fugue512, sph_fugue512_close),
        Primitive::Shabal512 => fns!(sph_shabal512_init, sph_shabal512, sph_shabal512_close),
        Primitive::Whirlpool => fns!(sph_whirlpool_init, sph_whirlpool, sph_whirlpool_close),
        Primitive::Sha512 => fns!(sph_sha512_init, sph_sha384, sph_sha512_close),
        Primitive::Haval256_5 => {
            fns!(sph_haval256_5_init, sph_haval256_5, sph_haval256_5_close)
        }
    }
}

/// One sphlib context together with its entry points
pub struct SphEngine {
    primitive: Primitive,
    fns: Functions,
    ctx: Box<RawContext>,
    finalized: bool,
}

impl SphEngine {
    pub fn new(primitive: Primitive) -> Self {
        let fns = functions(primitive);
        let mut ctx = Box::new(RawContext([0u8; CONTEXT_CAPACITY]));
        // SAFETY: ctx is larger than and aligned for every sphlib context
        unsafe { (fns.init)(ctx.0.as_mut_ptr().cast()) };
        Self {
            primitive,
            fns,
            ctx,
            finalized: false,
        }
    }
}

impl DigestEngine for SphEngine {
    fn primitive(&self) -> Primitive {
        self.primitive
    }

    fn backend(&self) -> &'static str {
        SPH
    }

    fn reset(&mut self) {
        // SAFETY: see SphEngine::new
        unsafe { (self.fns.init)(self.ctx.0.as_mut_ptr().cast()) };
        self.finalized = false;
    }

    fn absorb(&mut self, data: &[u8]) -> Result<(), EngineError> {
        if self.finalized {
            return Err(EngineError::NotReset);
        }
        // SAFETY: context was initialized by `init`; data is a valid slice
        unsafe {
            (self.fns.update)(
                self.ctx.0.as_mut_ptr().cast(),
                data.as_ptr().cast(),
                data.len(),
            )
        };
        Ok(())
    }

    fn finalize_into(&mut self, out: &mut [u8]) -> Result<(), EngineError> {
        if self.finalized {
            return Err(EngineError::NotReset);
        }
        let expected = self.primitive.output_size();
        if out.len() != expected {
            return Err(EngineError::OutputSize {
                expected,
                actual: out.len(),
            });
        }
        // SAFETY: out holds exactly the primitive's digest width
        unsafe { (self.fns.close)(self.ctx.0.as_mut_ptr().cast(), out.as_mut_ptr().cast()) };
        self.finalized = true;
        Ok(())
    }

    fn box_clone(&self) -> Box<dyn DigestEngine> {
        Box::new(SphEngine {
            primitive: self.primitive,
            fns: self.fns,
            ctx: self.ctx.clone(),
            finalized: self.finalized,
        })
    }
}

pub fn sph_engine(primitive: Primitive) -> Box<dyn DigestEngine> {
    Box::new(SphEngine::new(primitive))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::rust_crypto_engine;

    fn run(engine: &mut dyn DigestEngine, data: &[u8]) -> Vec<u8> {
        let mut out = vec![0u8; engine.output_size()];
        engine.absorb(data).unwrap();
        engine.finalize_into(&mut out).unwrap();
        out
    }

    #[test]
    fn sph_matches_rust_crypto_where_both_exist() {
        let data: Vec<u8> = (0..128u8).collect();
        for p in Primitive::ALL {
            if let Some(mut pure) = rust_crypto_engine(p) {
                let mut native = sph_engine(p);
                assert_eq!(
                    run(pure.as_mut(), &data),
                    run(native.as_mut(), &data),
                    "{} differs between backends",
                    p
                );
            }
        }
    }

    #[test]
    fn byte_copy_clone_is_independent() {
        let template = sph_engine(Primitive::Hamsi512);
        let mut a = template.box_clone();
        let mut b = template.box_clone();
        let first = run(a.as_mut(), b"one");
        assert_eq!(first, run(b.as_mut(), b"one"));

        // consuming the copies leaves the template untouched
        let mut c = template.box_clone();
        assert_eq!(first, run(c.as_mut(), b"one"));
    }
}
