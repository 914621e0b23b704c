// Copyright 2025 Irreducible Inc.
//! Import and export between [`NativeArray`]s and [`BigTensor`]s.

use bigtensor_core::{BigTensor, BigValue, DType, Error, Result};
use num_bigint::BigInt;
use num_traits::ToPrimitive;

use crate::native::{NativeArray, NativeData};

/// Parses every element of `array` into a [`BigValue`], keeping the shape.
///
/// Integer elements convert exactly. Text elements must be an optional sign followed by ASCII
/// decimal digits.
pub fn import(array: &NativeArray) -> Result<BigTensor> {
	let _span = tracing::debug_span!(
		"import",
		dtype = %array.dtype(),
		shape = %array.shape(),
	)
	.entered();

	let values = match array.data() {
		NativeData::Int8(v) => from_ints(v),
		NativeData::Int16(v) => from_ints(v),
		NativeData::Int32(v) => from_ints(v),
		NativeData::Int64(v) => from_ints(v),
		NativeData::UInt8(v) => from_ints(v),
		NativeData::UInt16(v) => from_ints(v),
		NativeData::UInt32(v) => from_ints(v),
		NativeData::UInt64(v) => from_ints(v),
		NativeData::String(v) => parse_literals(v.iter().map(|s| s.as_bytes()))?,
		NativeData::Bytes(v) => parse_literals(v.iter().map(Vec::as_slice))?,
	};
	BigTensor::new(array.shape().clone(), values)
}

/// Converts every element of `tensor` to `dtype`, keeping the shape.
///
/// Text dtypes always succeed with the canonical decimal form. Integer dtypes fail with an
/// overflow error naming the first element outside the dtype's range; values are never wrapped.
pub fn export(tensor: &BigTensor, dtype: DType) -> Result<NativeArray> {
	let _span = tracing::debug_span!("export", %dtype, shape = %tensor.shape()).entered();

	let data = match dtype {
		DType::Int8 => NativeData::Int8(to_ints(tensor, dtype, <BigInt as ToPrimitive>::to_i8)?),
		DType::Int16 => {
			NativeData::Int16(to_ints(tensor, dtype, <BigInt as ToPrimitive>::to_i16)?)
		}
		DType::Int32 => {
			NativeData::Int32(to_ints(tensor, dtype, <BigInt as ToPrimitive>::to_i32)?)
		}
		DType::Int64 => {
			NativeData::Int64(to_ints(tensor, dtype, <BigInt as ToPrimitive>::to_i64)?)
		}
		DType::UInt8 => NativeData::UInt8(to_ints(tensor, dtype, <BigInt as ToPrimitive>::to_u8)?),
		DType::UInt16 => {
			NativeData::UInt16(to_ints(tensor, dtype, <BigInt as ToPrimitive>::to_u16)?)
		}
		DType::UInt32 => {
			NativeData::UInt32(to_ints(tensor, dtype, <BigInt as ToPrimitive>::to_u32)?)
		}
		DType::UInt64 => {
			NativeData::UInt64(to_ints(tensor, dtype, <BigInt as ToPrimitive>::to_u64)?)
		}
		DType::String => NativeData::String(tensor.iter().map(ToString::to_string).collect()),
		DType::Bytes => {
			NativeData::Bytes(tensor.iter().map(|v| v.to_string().into_bytes()).collect())
		}
	};
	NativeArray::new(tensor.shape().clone(), data)
}

fn from_ints<T: Copy + Into<BigValue>>(values: &[T]) -> Vec<BigValue> {
	values.iter().map(|&x| x.into()).collect()
}

fn parse_literals<'a>(literals: impl Iterator<Item = &'a [u8]>) -> Result<Vec<BigValue>> {
	literals
		.enumerate()
		.map(|(index, literal)| {
			BigValue::parse_literal(literal).map_err(|_| Error::Parse {
				index,
				literal: String::from_utf8_lossy(literal).into_owned(),
			})
		})
		.collect()
}

fn to_ints<T>(
	tensor: &BigTensor,
	dtype: DType,
	convert: fn(&BigInt) -> Option<T>,
) -> Result<Vec<T>> {
	tensor
		.iter()
		.enumerate()
		.map(|(index, value)| {
			convert(value.as_bigint()).ok_or_else(|| Error::Overflow {
				index,
				dtype,
				required_bits: value.required_bits(dtype.is_signed()),
			})
		})
		.collect()
}

impl TryFrom<&NativeArray> for BigTensor {
	type Error = Error;

	fn try_from(array: &NativeArray) -> Result<Self> {
		import(array)
	}
}

/// Host conversion of a big tensor yields its decimal strings.
impl From<&BigTensor> for NativeArray {
	fn from(tensor: &BigTensor) -> Self {
		let data = NativeData::String(tensor.iter().map(ToString::to_string).collect());
		NativeArray::from_parts(tensor.shape().clone(), data)
	}
}
