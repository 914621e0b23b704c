// Copyright 2025 Irreducible Inc.
//! Numeric policy constants shared by the codec, limb transcoder and randomness engine.

/// Number of Miller-Rabin rounds run against each prime candidate.
///
/// Every round lets a composite through with probability at most 1/4, so 64 rounds bound the
/// false-positive rate by 2^-128.
pub const MILLER_RABIN_ROUNDS: usize = 64;

/// Smallest bit length for which two distinct odd primes with the top bit set exist (5 and 7).
pub const MIN_PRIME_BITS: u32 = 3;

/// Trial division uses every prime below this bound before Miller-Rabin runs.
pub const SMALL_PRIME_BOUND: u32 = 1 << 10;

/// Magnitude budget, in bits, assumed by the limb transcoder when the caller declares none.
pub const DEFAULT_MAX_BITLEN: u32 = 8;

/// Extra bits added to the declared magnitude budget before sizing the limb axis.
pub const LIMB_HEADROOM_BITS: u32 = 32;
