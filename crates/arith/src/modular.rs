// Copyright 2025 Irreducible Inc.
//! Scalar modular arithmetic on [`BigValue`]s.

use bigtensor_core::{BigValue, Fault};
use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, Signed, Zero};

/// Computes `base^exponent mod modulus` by left-to-right binary exponentiation.
///
/// The result lies in `[0, |modulus|)`; a negative base is reduced first.
pub fn mod_pow(base: &BigValue, exponent: &BigValue, modulus: &BigValue) -> Result<BigValue, Fault> {
	if exponent.is_negative() {
		return Err(Fault::NegativeExponent);
	}
	if modulus.is_zero() {
		return Err(Fault::ZeroModulus);
	}
	let modulus = modulus.magnitude();
	if modulus.is_one() {
		return Ok(BigValue::ZERO);
	}

	let base = reduce(base.as_bigint(), modulus);
	let exponent = exponent.magnitude();

	let mut acc = BigUint::one();
	for i in (0..exponent.bits()).rev() {
		acc = &acc * &acc % modulus;
		if exponent.bit(i) {
			acc = acc * &base % modulus;
		}
	}
	Ok(BigValue::from_biguint(acc))
}

/// Computes the inverse of `value` modulo `modulus` with the extended Euclidean algorithm.
///
/// Returns the unique `b` in `[0, |modulus|)` with `value * b = 1 (mod modulus)`. Modulo one
/// every value is congruent to zero and the inverse is reported as zero.
pub fn mod_inverse(value: &BigValue, modulus: &BigValue) -> Result<BigValue, Fault> {
	if modulus.is_zero() {
		return Err(Fault::ZeroModulus);
	}
	let modulus = modulus.as_bigint().abs();
	let value = value.as_bigint().mod_floor(&modulus);

	// Invariant: old_r = old_s * value (mod modulus), r = s * value (mod modulus).
	let (mut old_r, mut r) = (value, modulus.clone());
	let (mut old_s, mut s) = (BigInt::one(), BigInt::zero());
	while !r.is_zero() {
		let q = &old_r / &r;
		let next_r = &old_r - &q * &r;
		old_r = std::mem::replace(&mut r, next_r);
		let next_s = &old_s - &q * &s;
		old_s = std::mem::replace(&mut s, next_s);
	}

	if !old_r.is_one() {
		return Err(Fault::NoInverse);
	}
	Ok(BigValue::from(old_s.mod_floor(&modulus)))
}

fn reduce(value: &BigInt, modulus: &BigUint) -> BigUint {
	let modulus = BigInt::from(modulus.clone());
	value
		.mod_floor(&modulus)
		.to_biguint()
		.unwrap_or_default()
}

#[cfg(test)]
mod tests {
	use proptest::prelude::*;

	use super::*;

	fn v(x: i64) -> BigValue {
		BigValue::from(x)
	}

	fn naive_pow_mod(base: i64, exp: u32, modulus: i64) -> i64 {
		let modulus = modulus.abs() as i128;
		let mut acc = 1i128 % modulus;
		for _ in 0..exp {
			acc = (acc * base as i128).rem_euclid(modulus);
		}
		acc as i64
	}

	#[test]
	fn small_powers() {
		assert_eq!(mod_pow(&v(3), &v(4), &v(5)).unwrap(), v(1));
		assert_eq!(mod_pow(&v(4), &v(2), &v(5)).unwrap(), v(1));
		assert_eq!(mod_pow(&v(3), &v(2), &v(5)).unwrap(), v(4));
		assert_eq!(mod_pow(&v(7), &v(0), &v(5)).unwrap(), v(1));
		assert_eq!(mod_pow(&v(7), &v(0), &v(1)).unwrap(), v(0));
		assert_eq!(mod_pow(&v(-2), &v(3), &v(5)).unwrap(), v(2));
	}

	#[test]
	fn wide_power() {
		let base = BigValue::from((1u128 << 100) + 277);
		let modulus: BigValue = "1000000000000000000000000000057".parse().unwrap();
		assert_eq!(
			mod_pow(&base, &v(65537), &modulus).unwrap().to_string(),
			"266882515139661987613779981348"
		);
	}

	#[test]
	fn power_domain_errors() {
		assert_eq!(mod_pow(&v(2), &v(-1), &v(5)), Err(Fault::NegativeExponent));
		assert_eq!(mod_pow(&v(2), &v(3), &v(0)), Err(Fault::ZeroModulus));
	}

	#[test]
	fn inverse_of_wide_value() {
		let x: BigValue = "123456789123456789123456789".parse().unwrap();
		let m = v(10_000_000);
		let inv = mod_inverse(&x, &m).unwrap();
		assert_eq!(inv, v(9_890_109));
		assert_eq!((&x * &inv).mod_floor(&m).unwrap(), v(1));
	}

	#[test]
	fn inverse_errors() {
		assert_eq!(mod_inverse(&v(6), &v(9)), Err(Fault::NoInverse));
		assert_eq!(mod_inverse(&v(0), &v(7)), Err(Fault::NoInverse));
		assert_eq!(mod_inverse(&v(3), &v(0)), Err(Fault::ZeroModulus));
		assert_eq!(mod_inverse(&v(3), &v(1)).unwrap(), v(0));
		assert_eq!(mod_inverse(&v(-3), &v(7)).unwrap(), v(2));
	}

	proptest! {
		#[test]
		fn pow_matches_repeated_multiplication(
			base in -1000i64..1000,
			exp in 0u32..40,
			modulus in prop_oneof![-5000i64..-1, 1i64..5000],
		) {
			prop_assert_eq!(
				mod_pow(&v(base), &v(exp as i64), &v(modulus)).unwrap(),
				v(naive_pow_mod(base, exp, modulus))
			);
		}

		#[test]
		fn inverse_times_value_is_one(x in any::<i64>(), m in 2i64..i64::MAX) {
			let (x, m) = (v(x), v(m));
			match mod_inverse(&x, &m) {
				Ok(inv) => {
					prop_assert!(!inv.is_negative() && inv < m);
					prop_assert_eq!((&x * &inv).mod_floor(&m).unwrap(), v(1));
				}
				Err(fault) => {
					prop_assert_eq!(fault, Fault::NoInverse);
					let g = x.as_bigint().gcd(m.as_bigint());
					prop_assert!(!g.is_one());
				}
			}
		}
	}
}
