//! Auxiliary black-box algorithms
//!
//! The CryptoNight-style XeHash and the zk-SNARK prove/verify flow live in
//! external native libraries. Only their fixed-width byte-buffer entry points
//! are modelled here.

use std::sync::OnceLock;

use crate::error::{Error, Result};
use crate::params::OUTPUT_SIZE;

pub const PROVING_KEY_SIZE: usize = 1024;
pub const VERIFICATION_KEY_SIZE: usize = 512;
pub const PROOF_SIZE: usize = 256;

/// Bytes `xehash` reads from its input: it hashes `sizeof(input)`, the width
/// of a pointer, not the caller's buffer length
pub const XEHASH_INPUT_SIZE: usize = core::mem::size_of::<*const u8>();

/// Bytes the zk-SNARK circuit reads: `input[0]` and `input[1]` become the
/// field elements `x` and `y`
pub const ZKSNARK_INPUT_SIZE: usize = 2;

/// Reject inputs shorter than what a native entry point will read
pub fn check_input(input: &[u8], required: usize) -> Result<()> {
    if input.len() < required {
        return Err(Error::InputTooShort {
            required,
            actual: input.len(),
        });
    }
    Ok(())
}

/// CryptoNight-style hash: 32-byte output
pub trait XeHashBackend: Send + Sync {
    fn hash(&self, input: &[u8], output: &mut [u8; OUTPUT_SIZE]) -> Result<()>;
}

/// Keypair / proof / verify triple of a zk-SNARK library
pub trait ZkSnarkBackend: Send + Sync {
    fn generate_keypair(
        &self,
        proving_key: &mut [u8; PROVING_KEY_SIZE],
        verification_key: &mut [u8; VERIFICATION_KEY_SIZE],
    );

    fn generate_proof(
        &self,
        proving_key: &[u8; PROVING_KEY_SIZE],
        input: &[u8],
        proof: &mut [u8; PROOF_SIZE],
    ) -> Result<()>;

    fn verify(
        &self,
        verification_key: &[u8; VERIFICATION_KEY_SIZE],
        proof: &[u8; PROOF_SIZE],
        input: &[u8],
    ) -> Result<bool>;

    /// One-shot digest of `input`: fresh keypair, prove, verify, then the
    /// first 32 bytes of the proof
    fn hash(&self, input: &[u8], output: &mut [u8; OUTPUT_SIZE]) -> Result<()> {
        let mut proving = Box::new([0u8; PROVING_KEY_SIZE]);
        let mut verification = Box::new([0u8; VERIFICATION_KEY_SIZE]);
        self.generate_keypair(&mut proving, &mut verification);
        *output = prove_and_verify(self, &proving, &verification, input)?;
        Ok(())
    }
}

fn prove_and_verify<B: ZkSnarkBackend + ?Sized>(
    backend: &B,
    proving: &[u8; PROVING_KEY_SIZE],
    verification: &[u8; VERIFICATION_KEY_SIZE],
    input: &[u8],
) -> Result<[u8; OUTPUT_SIZE]> {
    let mut proof = [0u8; PROOF_SIZE];
    backend.generate_proof(proving, input, &mut proof)?;

    if !backend.verify(verification, &proof, input)? {
        return Err(Error::ProofRejected);
    }

    let mut out = [0u8; OUTPUT_SIZE];
    out.copy_from_slice(&proof[..OUTPUT_SIZE]);
    Ok(out)
}

struct KeyPair {
    proving: Box<[u8; PROVING_KEY_SIZE]>,
    verification: Box<[u8; VERIFICATION_KEY_SIZE]>,
}

/// Proof-derived digest: prove `input`, verify the proof, keep its first
/// 32 bytes
///
/// Same result as [`ZkSnarkBackend::hash`], but the keypair is generated once
/// per hasher, on first use.
pub struct ZkSnarkHasher<B> {
    backend: B,
    keys: OnceLock<KeyPair>,
}

impl<B: ZkSnarkBackend> ZkSnarkHasher<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            keys: OnceLock::new(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn keys(&self) -> &KeyPair {
        self.keys.get_or_init(|| {
            let mut proving = Box::new([0u8; PROVING_KEY_SIZE]);
            let mut verification = Box::new([0u8; VERIFICATION_KEY_SIZE]);
            self.backend
                .generate_keypair(&mut proving, &mut verification);
            log::debug!("zk-SNARK keypair generated");
            KeyPair {
                proving,
                verification,
            }
        })
    }

    pub fn digest(&self, input: &[u8]) -> Result<[u8; OUTPUT_SIZE]> {
        let keys = self.keys();
        prove_and_verify(&self.backend, &keys.proving, &keys.verification, input)
    }
}

/// Bindings to `libxehash` and `libzksnark`
#[cfg(feature = "native-aux")]
pub mod native {
    use super::*;

    unsafe extern "C" {
        fn xehash(input: *const u8, output: *mut u8);

        fn zksnark_generate_keypair(proving_key: *mut u8, verification_key: *mut u8);
        fn zksnark_generate_proof(proving_key: *const u8, input: *const u8, proof: *mut u8);
        fn zksnark_verify(verification_key: *const u8, proof: *const u8, input: *const u8) -> bool;
        fn zksnark_hash(input: *const u8, output: *mut u8);
    }

    /// `libxehash`; reads the first [`XEHASH_INPUT_SIZE`] bytes of the input
    /// regardless of its length
    pub struct NativeXeHash;

    impl XeHashBackend for NativeXeHash {
        fn hash(&self, input: &[u8], output: &mut [u8; OUTPUT_SIZE]) -> Result<()> {
            check_input(input, XEHASH_INPUT_SIZE)?;
            // SAFETY: input holds at least the bytes xehash reads; output is 32 bytes
            unsafe { xehash(input.as_ptr(), output.as_mut_ptr()) }
            Ok(())
        }
    }

    /// `libzksnark`; every entry point reads [`ZKSNARK_INPUT_SIZE`] input bytes
    pub struct NativeZkSnark;

    impl ZkSnarkBackend for NativeZkSnark {
        fn generate_keypair(
            &self,
            proving_key: &mut [u8; PROVING_KEY_SIZE],
            verification_key: &mut [u8; VERIFICATION_KEY_SIZE],
        ) {
            // SAFETY: buffers match the library's fixed key sizes
            unsafe { zksnark_generate_keypair(proving_key.as_mut_ptr(), verification_key.as_mut_ptr()) }
        }

        fn generate_proof(
            &self,
            proving_key: &[u8; PROVING_KEY_SIZE],
            input: &[u8],
            proof: &mut [u8; PROOF_SIZE],
        ) -> Result<()> {
            check_input(input, ZKSNARK_INPUT_SIZE)?;
            // SAFETY: key and proof match the library's fixed sizes, input was checked
            unsafe { zksnark_generate_proof(proving_key.as_ptr(), input.as_ptr(), proof.as_mut_ptr()) }
            Ok(())
        }

        fn verify(
            &self,
            verification_key: &[u8; VERIFICATION_KEY_SIZE],
            proof: &[u8; PROOF_SIZE],
            input: &[u8],
        ) -> Result<bool> {
            check_input(input, ZKSNARK_INPUT_SIZE)?;
            // SAFETY: key and proof match the library's fixed sizes, input was checked
            Ok(unsafe { zksnark_verify(verification_key.as_ptr(), proof.as_ptr(), input.as_ptr()) })
        }

        /// The library's own pipeline. A rejected proof is raised as a C++
        /// exception inside `libzksnark` rather than reported here.
        fn hash(&self, input: &[u8], output: &mut [u8; OUTPUT_SIZE]) -> Result<()> {
            check_input(input, ZKSNARK_INPUT_SIZE)?;
            // SAFETY: input was checked; output is 32 bytes
            unsafe { zksnark_hash(input.as_ptr(), output.as_mut_ptr()) }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sha2::{Digest, Sha256};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Toy backend: the "proof" is SHA-256(pk || x || y) followed by a
    /// per-position counter; verification recomputes it from the
    /// verification key
    struct ToySnark {
        keypairs: AtomicUsize,
        accept: bool,
    }

    impl ToySnark {
        fn new(accept: bool) -> Self {
            Self {
                keypairs: AtomicUsize::new(0),
                accept,
            }
        }

        fn prove(key: &[u8], input: &[u8]) -> Result<[u8; PROOF_SIZE]> {
            check_input(input, ZKSNARK_INPUT_SIZE)?;
            let tag = Sha256::new()
                .chain_update(key)
                .chain_update(&input[..ZKSNARK_INPUT_SIZE])
                .finalize();
            let mut proof = [0u8; PROOF_SIZE];
            proof[..32].copy_from_slice(&tag);
            for (i, byte) in proof[32..].iter_mut().enumerate() {
                *byte = i as u8;
            }
            Ok(proof)
        }
    }

    impl ZkSnarkBackend for ToySnark {
        fn generate_keypair(
            &self,
            proving_key: &mut [u8; PROVING_KEY_SIZE],
            verification_key: &mut [u8; VERIFICATION_KEY_SIZE],
        ) {
            self.keypairs.fetch_add(1, Ordering::SeqCst);
            proving_key[..16].fill(0x42);
            verification_key[..16].fill(0x42);
        }

        fn generate_proof(
            &self,
            proving_key: &[u8; PROVING_KEY_SIZE],
            input: &[u8],
            proof: &mut [u8; PROOF_SIZE],
        ) -> Result<()> {
            *proof = Self::prove(&proving_key[..16], input)?;
            Ok(())
        }

        fn verify(
            &self,
            verification_key: &[u8; VERIFICATION_KEY_SIZE],
            proof: &[u8; PROOF_SIZE],
            input: &[u8],
        ) -> Result<bool> {
            Ok(self.accept && *proof == Self::prove(&verification_key[..16], input)?)
        }
    }

    #[test]
    fn digest_is_proof_prefix() {
        let hasher = ZkSnarkHasher::new(ToySnark::new(true));
        let input = [3u8, 5, 0xff, 0xff];
        let proof = ToySnark::prove(&[0x42; 16], &input).unwrap();
        assert_eq!(hasher.digest(&input).unwrap(), proof[..OUTPUT_SIZE]);
    }

    #[test]
    fn one_shot_hash_matches_hasher() {
        let backend = ToySnark::new(true);
        let mut out = [0u8; OUTPUT_SIZE];
        backend.hash(b"header one", &mut out).unwrap();
        assert_eq!(backend.keypairs.load(Ordering::SeqCst), 1);

        let hasher = ZkSnarkHasher::new(ToySnark::new(true));
        assert_eq!(hasher.digest(b"header one").unwrap(), out);
    }

    #[test]
    fn keypair_generated_once() {
        let hasher = ZkSnarkHasher::new(ToySnark::new(true));
        let a = hasher.digest(b"ab header").unwrap();
        let b = hasher.digest(b"cd header").unwrap();
        assert_ne!(a, b);
        assert_eq!(hasher.digest(b"ab header").unwrap(), a);
        assert_eq!(hasher.backend().keypairs.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn rejected_proof_is_an_error() {
        let hasher = ZkSnarkHasher::new(ToySnark::new(false));
        assert_eq!(hasher.digest(b"header"), Err(Error::ProofRejected));
    }

    #[test]
    fn short_input_rejected_before_proving() {
        let hasher = ZkSnarkHasher::new(ToySnark::new(true));
        assert_eq!(
            hasher.digest(&[7]),
            Err(Error::InputTooShort {
                required: ZKSNARK_INPUT_SIZE,
                actual: 1
            })
        );
    }

    #[test]
    fn check_input_bounds() {
        assert!(check_input(&[0u8; 8], XEHASH_INPUT_SIZE.min(8)).is_ok());
        assert_eq!(
            check_input(&[], XEHASH_INPUT_SIZE),
            Err(Error::InputTooShort {
                required: XEHASH_INPUT_SIZE,
                actual: 0
            })
        );
    }
}
