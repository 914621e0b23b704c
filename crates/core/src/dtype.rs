// Copyright 2025 Irreducible Inc.
//! Elemental dtypes of host-visible native arrays.

use std::{fmt, str::FromStr};

use crate::error::Error;

/// The elemental type of a native (host-framework) array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DType {
	Int8,
	Int16,
	Int32,
	Int64,
	UInt8,
	UInt16,
	UInt32,
	UInt64,
	/// Decimal text, one UTF-8 string per element.
	String,
	/// Decimal text as ASCII byte strings.
	Bytes,
}

impl DType {
	/// Every dtype: the fixed-width integers, narrowest first within each signedness, then the
	/// text dtypes.
	pub const ALL: [DType; 10] = [
		DType::Int8,
		DType::Int16,
		DType::Int32,
		DType::Int64,
		DType::UInt8,
		DType::UInt16,
		DType::UInt32,
		DType::UInt64,
		DType::String,
		DType::Bytes,
	];

	/// The fixed-width integer dtypes, in [`DType::ALL`] order.
	pub fn integers() -> impl Iterator<Item = DType> {
		Self::ALL.into_iter().filter(|dtype| dtype.is_integer())
	}

	/// Storage width in bits, or `None` for the text dtypes.
	pub fn bit_width(self) -> Option<u32> {
		match self {
			DType::Int8 | DType::UInt8 => Some(8),
			DType::Int16 | DType::UInt16 => Some(16),
			DType::Int32 | DType::UInt32 => Some(32),
			DType::Int64 | DType::UInt64 => Some(64),
			DType::String | DType::Bytes => None,
		}
	}

	pub fn is_signed(self) -> bool {
		matches!(self, DType::Int8 | DType::Int16 | DType::Int32 | DType::Int64)
	}

	pub fn is_integer(self) -> bool {
		self.bit_width().is_some()
	}

	/// Bits available for a non-negative value, i.e. the storage width minus the sign bit of
	/// signed dtypes.
	pub fn usable_bits(self) -> Option<u32> {
		self.bit_width().map(|bits| if self.is_signed() { bits - 1 } else { bits })
	}

	pub fn name(self) -> &'static str {
		match self {
			DType::Int8 => "int8",
			DType::Int16 => "int16",
			DType::Int32 => "int32",
			DType::Int64 => "int64",
			DType::UInt8 => "uint8",
			DType::UInt16 => "uint16",
			DType::UInt32 => "uint32",
			DType::UInt64 => "uint64",
			DType::String => "string",
			DType::Bytes => "bytes",
		}
	}
}

impl fmt::Display for DType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

impl FromStr for DType {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::ALL
			.into_iter()
			.find(|dtype| dtype.name() == s)
			.ok_or_else(|| Error::UnknownDtype { name: s.to_string() })
	}
}
