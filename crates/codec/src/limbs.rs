// Copyright 2025 Irreducible Inc.
//! Limb transcoding.
//!
//! A big value is written as `limb[0] + limb[1]·2^w + limb[2]·2^(2w) + ...`, least significant
//! limb first, where every limb is a non-negative native integer below `2^w`. The limbs of a
//! tensor occupy one extra trailing axis whose length is fixed by the [`LimbPolicy`] alone, so
//! the shape of an exported array never reveals the magnitude of the values inside it.

use bigtensor_core::{
	BigTensor, BigValue, DType, Error, Result, Shape,
	consts::{DEFAULT_MAX_BITLEN, LIMB_HEADROOM_BITS},
};
use num_bigint::BigUint;

use crate::native::{NativeArray, NativeData};

/// Declares the native layout of exported limbs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LimbPolicy {
	/// Native dtype of each limb.
	pub dtype: DType,
	/// Largest magnitude, in bits, the layout is sized for. Defaults to [`DEFAULT_MAX_BITLEN`].
	pub max_bitlen: Option<u32>,
	/// Requested limb width. It is capped at the usable bits of `dtype`, which is also the
	/// default.
	pub limb_bits: Option<u32>,
}

impl Default for LimbPolicy {
	fn default() -> Self {
		Self::new(DType::Int32)
	}
}

impl LimbPolicy {
	pub fn new(dtype: DType) -> Self {
		Self {
			dtype,
			max_bitlen: None,
			limb_bits: None,
		}
	}

	pub fn with_max_bitlen(self, max_bitlen: u32) -> Self {
		Self {
			max_bitlen: Some(max_bitlen),
			..self
		}
	}

	pub fn with_limb_bits(self, limb_bits: u32) -> Self {
		Self {
			limb_bits: Some(limb_bits),
			..self
		}
	}

	/// Width of a single limb: the requested width capped at the dtype's usable bits.
	pub fn limb_width(&self) -> Result<u32> {
		let usable = self.dtype.usable_bits().ok_or(Error::UnsupportedDtype {
			op: "export_limbs",
			dtype: self.dtype,
		})?;
		match self.limb_bits {
			Some(0) => Err(Error::ZeroLimbWidth),
			Some(bits) => Ok(bits.min(usable)),
			None => Ok(usable),
		}
	}

	/// Length of the limb axis: enough limbs for the declared magnitude plus
	/// [`LIMB_HEADROOM_BITS`].
	pub fn limb_count(&self) -> Result<usize> {
		let width = self.limb_width()?;
		let budget = self.max_bitlen.unwrap_or(DEFAULT_MAX_BITLEN) as u64 + LIMB_HEADROOM_BITS as u64;
		Ok(budget.div_ceil(width as u64) as usize)
	}
}

/// A native array whose trailing axis holds the limbs of one big value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LimbArray {
	array: NativeArray,
	limb_bits: u32,
}

impl LimbArray {
	/// Wraps a host array whose trailing axis holds limbs of `limb_bits` bits each.
	///
	/// The array must have an integer dtype wide enough for the limbs and a non-empty trailing
	/// axis. Individual limb values are checked by [`import_limbs`].
	pub fn from_native(array: NativeArray, limb_bits: u32) -> Result<Self> {
		let dtype = array.dtype();
		let usable = dtype.usable_bits().ok_or(Error::UnsupportedDtype {
			op: "import_limbs",
			dtype,
		})?;
		if limb_bits == 0 {
			return Err(Error::ZeroLimbWidth);
		}
		if limb_bits > usable {
			return Err(Error::LimbWidthTooLarge {
				limb_bits,
				usable,
				dtype,
			});
		}
		match array.shape().split_last() {
			None => Err(Error::MissingLimbAxis {
				shape: array.shape().clone(),
			}),
			Some((_, 0)) => Err(Error::EmptyLimbAxis {
				shape: array.shape().clone(),
			}),
			Some(_) => Ok(Self { array, limb_bits }),
		}
	}

	pub fn array(&self) -> &NativeArray {
		&self.array
	}

	pub fn into_native(self) -> NativeArray {
		self.array
	}

	pub fn shape(&self) -> &Shape {
		self.array.shape()
	}

	pub fn dtype(&self) -> DType {
		self.array.dtype()
	}

	pub fn limb_bits(&self) -> u32 {
		self.limb_bits
	}

	/// Length of the trailing limb axis.
	pub fn limb_count(&self) -> usize {
		self.shape().dims().last().copied().unwrap_or_default()
	}
}

/// Splits every value of `tensor` into limbs laid out according to `policy`.
///
/// Fails for negative values and for values wider than `limb_count * limb_width` bits.
pub fn export_limbs(tensor: &BigTensor, policy: &LimbPolicy) -> Result<LimbArray> {
	let width = policy.limb_width()?;
	let count = policy.limb_count()?;
	let capacity = count as u64 * width as u64;
	let _span = tracing::debug_span!(
		"export_limbs",
		dtype = %policy.dtype,
		width,
		count,
		n_values = tensor.len(),
	)
	.entered();

	let shape = tensor.shape().with_trailing(count);
	let mut limbs = Vec::with_capacity(shape.num_elements()?);
	for (index, value) in tensor.iter().enumerate() {
		if value.is_negative() {
			return Err(Error::NegativeLimbValue { index });
		}
		let bits = value.bits();
		if bits > capacity {
			return Err(Error::LimbCapacityExceeded {
				index,
				bits,
				capacity,
			});
		}
		limbs.extend(split_limbs(value.magnitude(), width, count));
	}

	// Every limb is below 2^width and width never exceeds the usable bits of the dtype, so the
	// narrowing casts below are lossless.
	let data = match policy.dtype {
		DType::Int8 => NativeData::Int8(limbs.iter().map(|&l| l as i8).collect()),
		DType::Int16 => NativeData::Int16(limbs.iter().map(|&l| l as i16).collect()),
		DType::Int32 => NativeData::Int32(limbs.iter().map(|&l| l as i32).collect()),
		DType::Int64 => NativeData::Int64(limbs.iter().map(|&l| l as i64).collect()),
		DType::UInt8 => NativeData::UInt8(limbs.iter().map(|&l| l as u8).collect()),
		DType::UInt16 => NativeData::UInt16(limbs.iter().map(|&l| l as u16).collect()),
		DType::UInt32 => NativeData::UInt32(limbs.iter().map(|&l| l as u32).collect()),
		DType::UInt64 => NativeData::UInt64(limbs),
		DType::String | DType::Bytes => {
			return Err(Error::UnsupportedDtype {
				op: "export_limbs",
				dtype: policy.dtype,
			});
		}
	};

	let array = NativeArray::from_parts(shape, data);
	Ok(LimbArray {
		array,
		limb_bits: width,
	})
}

/// Reassembles big values from their limbs, dropping the trailing limb axis.
///
/// Fails when a limb is negative or does not fit the declared limb width, since such an array
/// does not describe a unique value.
pub fn import_limbs(limbs: &LimbArray) -> Result<BigTensor> {
	let width = limbs.limb_bits;
	let Some((shape, count)) = limbs.shape().split_last() else {
		return Err(Error::MissingLimbAxis {
			shape: limbs.shape().clone(),
		});
	};
	if count == 0 {
		return Err(Error::EmptyLimbAxis {
			shape: limbs.shape().clone(),
		});
	}
	let _span = tracing::debug_span!("import_limbs", width, count, %shape).entered();

	let flat = match limbs.array.data() {
		NativeData::Int8(v) => widen(v),
		NativeData::Int16(v) => widen(v),
		NativeData::Int32(v) => widen(v),
		NativeData::Int64(v) => widen(v),
		NativeData::UInt8(v) => widen(v),
		NativeData::UInt16(v) => widen(v),
		NativeData::UInt32(v) => widen(v),
		NativeData::UInt64(v) => widen(v),
		NativeData::String(_) | NativeData::Bytes(_) => {
			return Err(Error::UnsupportedDtype {
				op: "import_limbs",
				dtype: limbs.dtype(),
			});
		}
	};

	let bound = 1i128 << width;
	if let Some(index) = flat.iter().position(|&limb| limb < 0 || limb >= bound) {
		return Err(Error::LimbOutOfRange {
			index,
			limb_bits: width,
		});
	}

	let values = flat
		.chunks(count)
		.map(|row| {
			let magnitude = row.iter().rev().fold(BigUint::ZERO, |acc, &limb| {
				(acc << width) + BigUint::from(limb as u64)
			});
			BigValue::from_biguint(magnitude)
		})
		.collect();
	BigTensor::new(shape, values)
}

/// Extracts `count` limbs of `width <= 64` bits from the little-endian 64-bit digits of
/// `magnitude`.
fn split_limbs(magnitude: &BigUint, width: u32, count: usize) -> impl Iterator<Item = u64> {
	let digits = magnitude.to_u64_digits();
	let mask = if width >= 64 { u64::MAX } else { (1u64 << width) - 1 };
	(0..count).map(move |i| {
		let offset = i as u64 * width as u64;
		let word = (offset / 64) as usize;
		let shift = (offset % 64) as u32;
		let lo = digits.get(word).copied().unwrap_or(0) >> shift;
		let hi = match shift {
			0 => 0,
			_ => digits.get(word + 1).copied().unwrap_or(0) << (64 - shift),
		};
		(lo | hi) & mask
	})
}

fn widen<T: Copy + Into<i128>>(values: &[T]) -> Vec<i128> {
	values.iter().map(|&v| v.into()).collect()
}
