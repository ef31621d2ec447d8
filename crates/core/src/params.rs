//! Xevan Algorithm Parameters
//!
//! Buffer geometry of the cascade. Every value here is consensus critical.

/// Block header size absorbed by the first cascade step
pub const INPUT_SIZE: usize = 80;

/// Working buffer size in bytes
pub const WORK_BUFFER_SIZE: usize = 128;

/// Final digest size
pub const OUTPUT_SIZE: usize = 32;

/// Output width of the 512-bit primitives
pub const WIDE_DIGEST_SIZE: usize = 64;

/// Output width of HAVAL-256/5
pub const NARROW_DIGEST_SIZE: usize = 32;

/// First byte zeroed between the two rounds
pub const PAD_OFFSET: usize = 32;

/// Number of full traversals of the primitive chain
pub const CASCADE_ROUNDS: usize = 2;

/// Number of primitives per round
pub const STAGES: usize = 17;

/// Offset of the little-endian u32 nonce inside the header
pub const NONCE_OFFSET: usize = 76;
