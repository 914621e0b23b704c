// Copyright 2025 Irreducible Inc.
//! The arbitrary-precision integer value.

use std::{
	fmt,
	ops::{Add, Mul, Neg, Sub},
	str::FromStr,
};

use num_bigint::{BigInt, BigUint, Sign};
use num_integer::Integer;
use num_traits::{One, Signed, Zero};

use crate::error::Fault;

/// An immutable arbitrary-precision signed integer.
///
/// Values have no identity beyond their numeric value. Arithmetic through the operator impls is
/// exact; the modular helpers return the representative in `[0, |modulus|)`.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BigValue(BigInt);

/// Returned when text is not an optionally signed run of ASCII decimal digits.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid integer literal")]
pub struct ParseBigValueError;

impl BigValue {
	pub const ZERO: BigValue = BigValue(BigInt::ZERO);

	pub fn one() -> Self {
		Self(BigInt::one())
	}

	pub fn from_biguint(magnitude: BigUint) -> Self {
		Self(BigInt::from_biguint(Sign::Plus, magnitude))
	}

	pub fn as_bigint(&self) -> &BigInt {
		&self.0
	}

	pub fn into_bigint(self) -> BigInt {
		self.0
	}

	/// The absolute value as an unsigned integer.
	pub fn magnitude(&self) -> &BigUint {
		self.0.magnitude()
	}

	pub fn is_zero(&self) -> bool {
		self.0.is_zero()
	}

	pub fn is_negative(&self) -> bool {
		self.0.is_negative()
	}

	pub fn is_positive(&self) -> bool {
		self.0.is_positive()
	}

	/// Bit length of the magnitude; zero has bit length 0.
	pub fn bits(&self) -> u64 {
		self.0.bits()
	}

	/// Smallest native width that holds this value.
	///
	/// For signed targets this is the two's-complement width including the sign bit. Negative
	/// values never fit an unsigned target; they report their magnitude width plus a sign bit.
	pub fn required_bits(&self, signed: bool) -> u64 {
		match (signed, self.is_negative()) {
			(false, false) => self.bits(),
			(false, true) => self.bits() + 1,
			(true, false) => self.bits() + 1,
			(true, true) => (self.magnitude() - 1u32).bits() + 1,
		}
	}

	/// Parses an ASCII literal: an optional `+` or `-` followed by one or more decimal digits.
	///
	/// Leading zeros are accepted and `-0` parses to zero.
	pub fn parse_literal(literal: &[u8]) -> Result<Self, ParseBigValueError> {
		let (sign, digits) = match literal.split_first() {
			Some((b'-', rest)) => (Sign::Minus, rest),
			Some((b'+', rest)) => (Sign::Plus, rest),
			_ => (Sign::Plus, literal),
		};
		if digits.is_empty() || !digits.iter().all(u8::is_ascii_digit) {
			return Err(ParseBigValueError);
		}
		let magnitude = BigUint::parse_bytes(digits, 10).ok_or(ParseBigValueError)?;
		Ok(Self(BigInt::from_biguint(sign, magnitude)))
	}

	/// Returns `self mod modulus` in `[0, |modulus|)`.
	pub fn mod_floor(&self, modulus: &BigValue) -> Result<BigValue, Fault> {
		if modulus.is_zero() {
			return Err(Fault::DivisionByZero);
		}
		let modulus = modulus.0.abs();
		Ok(Self(self.0.mod_floor(&modulus)))
	}
}

impl fmt::Display for BigValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		fmt::Display::fmt(&self.0, f)
	}
}

impl FromStr for BigValue {
	type Err = ParseBigValueError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::parse_literal(s.as_bytes())
	}
}

impl From<BigInt> for BigValue {
	fn from(value: BigInt) -> Self {
		Self(value)
	}
}

impl From<BigUint> for BigValue {
	fn from(value: BigUint) -> Self {
		Self::from_biguint(value)
	}
}

impl From<BigValue> for BigInt {
	fn from(value: BigValue) -> Self {
		value.0
	}
}

macro_rules! impl_from_primitive {
	($($t:ty),*) => {
		$(
			impl From<$t> for BigValue {
				fn from(value: $t) -> Self {
					Self(BigInt::from(value))
				}
			}
		)*
	};
}

impl_from_primitive!(i8, i16, i32, i64, i128, u8, u16, u32, u64, u128, usize);

macro_rules! impl_binary_op {
	($trait:ident, $method:ident) => {
		impl $trait<&BigValue> for &BigValue {
			type Output = BigValue;

			fn $method(self, rhs: &BigValue) -> BigValue {
				BigValue((&self.0).$method(&rhs.0))
			}
		}

		impl $trait for BigValue {
			type Output = BigValue;

			fn $method(self, rhs: BigValue) -> BigValue {
				BigValue(self.0.$method(rhs.0))
			}
		}
	};
}

impl_binary_op!(Add, add);
impl_binary_op!(Sub, sub);
impl_binary_op!(Mul, mul);

impl Neg for &BigValue {
	type Output = BigValue;

	fn neg(self) -> BigValue {
		BigValue(-&self.0)
	}
}

impl Neg for BigValue {
	type Output = BigValue;

	fn neg(self) -> BigValue {
		BigValue(-self.0)
	}
}

#[cfg(test)]
mod tests {
	use proptest::prelude::*;

	use super::*;

	fn v(s: &str) -> BigValue {
		s.parse().unwrap()
	}

	#[test]
	fn canonical_decimal() {
		assert_eq!(v("007").to_string(), "7");
		assert_eq!(v("-0").to_string(), "0");
		assert_eq!(v("+42").to_string(), "42");
		assert_eq!(v("-000123").to_string(), "-123");
		assert_eq!(
			v("123456789123456789123456789").to_string(),
			"123456789123456789123456789"
		);
	}

	#[test]
	fn rejects_malformed_literals() {
		for bad in ["", "-", "+", "1_000", "12a", " 1", "1 ", "0x10", "--1", "1.0", "١٢"] {
			assert!(bad.parse::<BigValue>().is_err(), "{bad:?} should not parse");
		}
	}

	#[test]
	fn exact_sum_of_wide_values() {
		let x = v("123456789123456789687293389");
		let y = v("123456789123456789687293432");
		assert_eq!((&x + &y).to_string(), "246913578246913579374586821");
		assert_eq!((&x - &y).to_string(), "-43");
	}

	#[test]
	fn required_bits_matches_native_ranges() {
		assert_eq!(BigValue::from(i32::MAX).required_bits(true), 32);
		assert_eq!(BigValue::from(i32::MIN).required_bits(true), 32);
		assert_eq!(BigValue::from(i32::MAX as i64 + 1).required_bits(true), 33);
		assert_eq!(BigValue::from(u8::MAX).required_bits(false), 8);
		assert_eq!(BigValue::from(256u32).required_bits(false), 9);
		assert_eq!(BigValue::from(-1).required_bits(true), 1);
		assert_eq!(BigValue::ZERO.required_bits(false), 0);
		assert_eq!(BigValue::from(1u64 << 40).required_bits(true), 42);
	}

	#[test]
	fn mod_floor_is_non_negative() {
		assert_eq!(BigValue::from(-7).mod_floor(&BigValue::from(5)).unwrap(), BigValue::from(3));
		assert_eq!(BigValue::from(7).mod_floor(&BigValue::from(-5)).unwrap(), BigValue::from(2));
		assert_eq!(
			BigValue::from(7).mod_floor(&BigValue::ZERO),
			Err(Fault::DivisionByZero)
		);
	}

	proptest! {
		#[test]
		fn display_parse_round_trip(x in any::<i128>()) {
			let value = BigValue::from(x);
			prop_assert_eq!(value.to_string(), x.to_string());
			prop_assert_eq!(value.to_string().parse::<BigValue>().unwrap(), value);
		}

		#[test]
		fn arithmetic_matches_i128(a in any::<i64>(), b in any::<i64>()) {
			let (x, y) = (BigValue::from(a), BigValue::from(b));
			prop_assert_eq!(&x + &y, BigValue::from(a as i128 + b as i128));
			prop_assert_eq!(&x - &y, BigValue::from(a as i128 - b as i128));
			prop_assert_eq!(&x * &y, BigValue::from(a as i128 * b as i128));
		}
	}
}
