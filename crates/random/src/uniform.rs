// Copyright 2025 Irreducible Inc.
//! Uniform sampling below a big bound.

use bigtensor_core::{BigTensor, BigValue, Error, Result, Shape};
use num_bigint::BigUint;
use num_traits::Zero;
use rand::{CryptoRng, Rng};

/// Draws a uniform value in `[0, bound)` by rejection sampling.
///
/// Each attempt draws exactly `bits(bound)` random bits, so at most half of the attempts are
/// rejected on average. Fails with [`Error::NonPositiveBound`] when `bound` is zero.
pub fn sample_below<R: Rng + ?Sized>(rng: &mut R, bound: &BigUint) -> Result<BigUint> {
	if bound.is_zero() {
		return Err(Error::NonPositiveBound {
			bound: bound.to_string(),
		});
	}
	Ok(draw_below(rng, bound))
}

/// [`sample_below`] for a bound the caller has already checked to be non-zero.
pub(crate) fn draw_below<R: Rng + ?Sized>(rng: &mut R, bound: &BigUint) -> BigUint {
	debug_assert!(!bound.is_zero());
	let bits = bound.bits();
	let n_bytes = bits.div_ceil(8) as usize;
	let excess = (n_bytes as u64 * 8 - bits) as u32;
	let mut bytes = vec![0u8; n_bytes];
	let mut rejected = 0u64;
	loop {
		rng.fill_bytes(&mut bytes);
		// Little-endian: the most significant byte is last.
		if let Some(top) = bytes.last_mut() {
			*top >>= excess;
		}
		let draw = BigUint::from_bytes_le(&bytes);
		if &draw < bound {
			if rejected > 0 {
				tracing::trace!(rejected, "sample accepted after rejections");
			}
			return draw;
		}
		rejected += 1;
	}
}

/// A tensor of independent values uniform over `[0, max_value)`, drawn from the thread-local
/// generator.
pub fn uniform(shape: impl Into<Shape>, max_value: &BigValue) -> Result<BigTensor> {
	uniform_with_rng(&mut rand::rng(), shape, max_value)
}

/// Like [`uniform`], drawing from `rng`.
pub fn uniform_with_rng<R: Rng + CryptoRng + ?Sized>(
	rng: &mut R,
	shape: impl Into<Shape>,
	max_value: &BigValue,
) -> Result<BigTensor> {
	if !max_value.is_positive() {
		return Err(Error::NonPositiveBound {
			bound: max_value.to_string(),
		});
	}
	let shape = shape.into();
	let _span = tracing::debug_span!(
		"uniform",
		%shape,
		bound_bits = max_value.bits(),
	)
	.entered();

	let bound = max_value.magnitude();
	BigTensor::from_fn(shape, |_| BigValue::from_biguint(draw_below(rng, bound)))
}

#[cfg(test)]
mod tests {
	use rand::{SeedableRng, rngs::StdRng};

	use super::*;

	#[test]
	fn bound_of_one_yields_zeros() {
		let mut rng = StdRng::seed_from_u64(0);
		let t = uniform_with_rng(&mut rng, [3, 2], &BigValue::one()).unwrap();
		assert_eq!(t.shape(), &Shape::from([3, 2]));
		assert!(t.iter().all(BigValue::is_zero));
	}

	#[test]
	fn byte_aligned_bound() {
		let mut rng = StdRng::seed_from_u64(1);
		let bound = BigUint::from(256u32);
		let mut seen_high = false;
		for _ in 0..2000 {
			let v = sample_below(&mut rng, &bound).unwrap();
			assert!(v < bound);
			seen_high |= v >= BigUint::from(128u32);
		}
		assert!(seen_high);
	}

	#[test]
	fn non_positive_bounds_are_rejected() {
		for bound in [BigValue::ZERO, BigValue::from(-3)] {
			let err = uniform([2], &bound).unwrap_err();
			assert_eq!(err.kind(), bigtensor_core::ErrorKind::Domain);
		}
	}

	#[test]
	fn zero_bound_is_rejected() {
		let mut rng = StdRng::seed_from_u64(0);
		assert_eq!(
			sample_below(&mut rng, &BigUint::ZERO),
			Err(Error::NonPositiveBound { bound: "0".into() })
		);
		assert_eq!(sample_below(&mut rng, &BigUint::from(1u32)).unwrap(), BigUint::ZERO);
	}

	#[test]
	fn overflowing_shape_draws_nothing() {
		let mut rng = StdRng::seed_from_u64(0);
		let err = uniform_with_rng(&mut rng, [1 << 32, 1 << 32], &BigValue::from(10)).unwrap_err();
		assert!(matches!(err, Error::ShapeOverflow { .. }));
	}

	#[test]
	fn empty_shape_draws_nothing() {
		let t = uniform([0, 4], &BigValue::from(10)).unwrap();
		assert!(t.is_empty());
	}
}
