// Copyright 2025 Irreducible Inc.
//! Probable-prime testing and random prime search.

use std::sync::LazyLock;

use bigtensor_core::{
	Error, Result,
	consts::{MILLER_RABIN_ROUNDS, MIN_PRIME_BITS, SMALL_PRIME_BOUND},
};
use num_bigint::BigUint;
use num_traits::{One, ToPrimitive, Zero};
use rand::{CryptoRng, Rng};

use crate::{cancel::CancelToken, uniform::draw_below};

/// Every prime below [`SMALL_PRIME_BOUND`], ascending.
static SMALL_PRIMES: LazyLock<Vec<u32>> = LazyLock::new(|| sieve(SMALL_PRIME_BOUND));

fn sieve(bound: u32) -> Vec<u32> {
	let bound = bound as usize;
	let mut composite = vec![false; bound];
	let mut primes = Vec::new();
	for n in 2..bound {
		if composite[n] {
			continue;
		}
		primes.push(n as u32);
		for multiple in (n * n..bound).step_by(n) {
			composite[multiple] = true;
		}
	}
	primes
}

/// Settings of a random prime search.
#[derive(Clone, Debug)]
pub struct PrimeConfig {
	/// Miller-Rabin rounds per candidate that survives trial division. [`random_prime`] rejects
	/// fewer than [`MILLER_RABIN_ROUNDS`].
	pub rounds: usize,
	/// Polled once per candidate.
	pub cancel: CancelToken,
}

impl Default for PrimeConfig {
	fn default() -> Self {
		Self {
			rounds: MILLER_RABIN_ROUNDS,
			cancel: CancelToken::new(),
		}
	}
}

/// Tests `n` for primality.
///
/// Trial division against the small-prime table settles every `n` below
/// `SMALL_PRIME_BOUND^2`. Larger survivors run `rounds` Miller-Rabin rounds with witnesses
/// drawn from `rng`; a composite passes with probability at most `4^-rounds`.
pub fn is_probable_prime<R: Rng + ?Sized>(rng: &mut R, n: &BigUint, rounds: usize) -> bool {
	if let Some(small) = n.to_u32().filter(|&small| small < SMALL_PRIME_BOUND) {
		return SMALL_PRIMES.binary_search(&small).is_ok();
	}
	if SMALL_PRIMES.iter().any(|&p| (n % p).is_zero()) {
		return false;
	}
	let bound = SMALL_PRIME_BOUND as u64;
	if n.to_u64().is_some_and(|n| n < bound * bound) {
		return true;
	}
	miller_rabin(rng, n, rounds)
}

/// Runs Miller-Rabin rounds on an odd `n > 3`.
fn miller_rabin<R: Rng + ?Sized>(rng: &mut R, n: &BigUint, rounds: usize) -> bool {
	let one = BigUint::one();
	let n_minus_one = n - 1u32;
	// n - 1 = d * 2^s with d odd.
	let s = n_minus_one.trailing_zeros().unwrap_or(0);
	let d = &n_minus_one >> s;
	// Witnesses are drawn from [2, n - 2].
	let witness_span = n - 3u32;

	'witness: for _ in 0..rounds {
		let a = draw_below(rng, &witness_span) + 2u32;
		let mut x = a.modpow(&d, n);
		if x == one || x == n_minus_one {
			continue;
		}
		for _ in 1..s {
			x = (&x * &x) % n;
			if x == n_minus_one {
				continue 'witness;
			}
		}
		return false;
	}
	true
}

/// Draws a probable prime with exactly `bits` bits.
///
/// Candidates have their top and bottom bits set and are tested with [`is_probable_prime`]
/// until one passes. The search stops with [`Error::Cancelled`] once `config.cancel` fires.
/// Fails with [`Error::TooFewRounds`] when `config.rounds` is below [`MILLER_RABIN_ROUNDS`].
pub fn random_prime<R: Rng + CryptoRng + ?Sized>(
	rng: &mut R,
	bits: u32,
	config: &PrimeConfig,
) -> Result<BigUint> {
	if bits < MIN_PRIME_BITS {
		return Err(Error::BitLengthTooSmall {
			bits,
			min: MIN_PRIME_BITS,
		});
	}
	if config.rounds < MILLER_RABIN_ROUNDS {
		return Err(Error::TooFewRounds {
			rounds: config.rounds,
			min: MILLER_RABIN_ROUNDS,
		});
	}
	let _span = tracing::debug_span!("random_prime", bits).entered();

	let top = BigUint::one() << (bits - 1);
	let mut candidates = 0u64;
	loop {
		if config.cancel.is_cancelled() {
			tracing::warn!(candidates, "prime search cancelled");
			return Err(Error::Cancelled { candidates });
		}
		candidates += 1;

		let mut candidate = draw_below(rng, &top) | &top;
		candidate.set_bit(0, true);
		if is_probable_prime(rng, &candidate, config.rounds) {
			tracing::debug!(candidates, "found probable prime");
			return Ok(candidate);
		}
		tracing::trace!(candidates, "rejected composite candidate");
	}
}

#[cfg(test)]
mod tests {
	use rand::{SeedableRng, rngs::StdRng};

	use super::*;

	#[test]
	fn small_prime_table() {
		assert_eq!(SMALL_PRIMES.len(), 172);
		assert_eq!(SMALL_PRIMES[..6], [2, 3, 5, 7, 11, 13]);
		assert_eq!(SMALL_PRIMES.last(), Some(&1021));
	}

	#[test]
	fn classifies_small_numbers() {
		let mut rng = StdRng::seed_from_u64(0);
		let primes: Vec<u32> = (0..100)
			.filter(|&n| is_probable_prime(&mut rng, &BigUint::from(n), 8))
			.collect();
		assert_eq!(primes, SMALL_PRIMES[..25]);
		// Products of two primes just above the table bound reach Miller-Rabin.
		assert!(!is_probable_prime(&mut rng, &BigUint::from(1031u32 * 1033), 8));
		assert!(is_probable_prime(&mut rng, &BigUint::from(1_000_003u32), 8));
	}

	#[test]
	fn candidates_have_exact_width() {
		let mut rng = StdRng::seed_from_u64(7);
		for bits in [3, 4, 17, 64, 96] {
			let p = random_prime(&mut rng, bits, &PrimeConfig::default()).unwrap();
			assert_eq!(p.bits(), bits as u64);
			assert!(p.bit(0));
		}
	}

	#[test]
	fn three_bit_primes() {
		let mut rng = StdRng::seed_from_u64(3);
		for _ in 0..20 {
			let p = random_prime(&mut rng, 3, &PrimeConfig::default()).unwrap();
			assert!(p == BigUint::from(5u32) || p == BigUint::from(7u32));
		}
	}

	#[test]
	fn too_few_bits() {
		let mut rng = StdRng::seed_from_u64(0);
		assert_eq!(
			random_prime(&mut rng, 2, &PrimeConfig::default()),
			Err(Error::BitLengthTooSmall { bits: 2, min: 3 })
		);
	}

	#[test]
	fn too_few_rounds() {
		let mut rng = StdRng::seed_from_u64(0);
		for rounds in [0, 1, MILLER_RABIN_ROUNDS - 1] {
			let config = PrimeConfig {
				rounds,
				..PrimeConfig::default()
			};
			let err = random_prime(&mut rng, 64, &config).unwrap_err();
			assert_eq!(
				err,
				Error::TooFewRounds {
					rounds,
					min: MILLER_RABIN_ROUNDS,
				}
			);
			assert_eq!(err.kind(), bigtensor_core::ErrorKind::Domain);
		}
	}

	#[test]
	fn cancelled_search_draws_nothing() {
		let mut rng = StdRng::seed_from_u64(0);
		let config = PrimeConfig::default();
		config.cancel.cancel();
		assert_eq!(
			random_prime(&mut rng, 512, &config),
			Err(Error::Cancelled { candidates: 0 })
		);
	}
}
