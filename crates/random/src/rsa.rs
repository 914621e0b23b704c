// Copyright 2025 Irreducible Inc.

use bigtensor_core::{BigTensor, BigValue, Result};
use num_bigint::BigUint;
use rand::{CryptoRng, Rng};

use crate::prime::{PrimeConfig, random_prime};

/// Two distinct probable primes and their product, each held in a `[1, 1]` tensor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RsaModulus {
	pub p: BigTensor,
	pub q: BigTensor,
	pub n: BigTensor,
}

impl RsaModulus {
	/// Returns `(p, q, n)`.
	pub fn into_parts(self) -> (BigTensor, BigTensor, BigTensor) {
		(self.p, self.q, self.n)
	}
}

/// Generates an RSA modulus from two `bits`-bit primes drawn from the thread-local generator.
pub fn rsa_modulus(bits: u32) -> Result<RsaModulus> {
	rsa_modulus_with_rng(&mut rand::rng(), bits, &PrimeConfig::default())
}

/// Generates an RSA modulus from two `bits`-bit primes drawn from `rng`.
///
/// `q` is resampled until it differs from `p`. The product `n` has `2 * bits - 1` or
/// `2 * bits` bits.
pub fn rsa_modulus_with_rng<R: Rng + CryptoRng + ?Sized>(
	rng: &mut R,
	bits: u32,
	config: &PrimeConfig,
) -> Result<RsaModulus> {
	let _span = tracing::debug_span!("rsa_modulus", bits).entered();

	let p = random_prime(rng, bits, config)?;
	let q = loop {
		let q = random_prime(rng, bits, config)?;
		if q != p {
			break q;
		}
		tracing::trace!("second prime equals the first, resampling");
	};
	let n = &p * &q;
	Ok(RsaModulus {
		p: cell(p)?,
		q: cell(q)?,
		n: cell(n)?,
	})
}

fn cell(value: BigUint) -> Result<BigTensor> {
	BigTensor::new([1, 1], vec![BigValue::from_biguint(value)])
}

#[cfg(test)]
mod tests {
	use bigtensor_core::Shape;
	use rand::{SeedableRng, rngs::StdRng};

	use super::*;

	#[test]
	fn three_bit_modulus_is_35() {
		let mut rng = StdRng::seed_from_u64(0);
		let rsa = rsa_modulus_with_rng(&mut rng, 3, &PrimeConfig::default()).unwrap();
		assert_ne!(rsa.p, rsa.q);
		assert_eq!(rsa.n.values(), &[BigValue::from(35)]);
		assert_eq!(rsa.n.shape(), &Shape::from([1, 1]));
	}
}
