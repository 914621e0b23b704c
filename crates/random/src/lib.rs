// Copyright 2025 Irreducible Inc.
//! Random big-integer tensors.
//!
//! [`uniform`] fills a tensor with values uniform below a bound by rejection sampling, and
//! [`rsa_modulus`] draws two distinct probable primes of a given bit length together with their
//! product. Both have `_with_rng` variants taking a caller-supplied cryptographic generator.

pub mod cancel;
pub mod prime;
pub mod rsa;
pub mod uniform;

pub use cancel::CancelToken;
pub use prime::{PrimeConfig, is_probable_prime, random_prime};
pub use rsa::{RsaModulus, rsa_modulus, rsa_modulus_with_rng};
pub use uniform::{sample_below, uniform, uniform_with_rng};
