// Copyright 2025 Irreducible Inc.
//! Host-visible native arrays.

use bigtensor_core::{DType, Error, Result, Shape};

/// Flat row-major storage of a native array, one variant per [`DType`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NativeData {
	Int8(Vec<i8>),
	Int16(Vec<i16>),
	Int32(Vec<i32>),
	Int64(Vec<i64>),
	UInt8(Vec<u8>),
	UInt16(Vec<u16>),
	UInt32(Vec<u32>),
	UInt64(Vec<u64>),
	String(Vec<String>),
	Bytes(Vec<Vec<u8>>),
}

impl NativeData {
	pub fn dtype(&self) -> DType {
		match self {
			NativeData::Int8(_) => DType::Int8,
			NativeData::Int16(_) => DType::Int16,
			NativeData::Int32(_) => DType::Int32,
			NativeData::Int64(_) => DType::Int64,
			NativeData::UInt8(_) => DType::UInt8,
			NativeData::UInt16(_) => DType::UInt16,
			NativeData::UInt32(_) => DType::UInt32,
			NativeData::UInt64(_) => DType::UInt64,
			NativeData::String(_) => DType::String,
			NativeData::Bytes(_) => DType::Bytes,
		}
	}

	pub fn len(&self) -> usize {
		match self {
			NativeData::Int8(v) => v.len(),
			NativeData::Int16(v) => v.len(),
			NativeData::Int32(v) => v.len(),
			NativeData::Int64(v) => v.len(),
			NativeData::UInt8(v) => v.len(),
			NativeData::UInt16(v) => v.len(),
			NativeData::UInt32(v) => v.len(),
			NativeData::UInt64(v) => v.len(),
			NativeData::String(v) => v.len(),
			NativeData::Bytes(v) => v.len(),
		}
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

/// An element type that can back a [`NativeArray`].
pub trait NativeElement: Sized {
	const DTYPE: DType;

	fn into_data(values: Vec<Self>) -> NativeData;

	fn slice(data: &NativeData) -> Option<&[Self]>;
}

macro_rules! impl_native_element {
	($($t:ty => $variant:ident),* $(,)?) => {
		$(
			impl NativeElement for $t {
				const DTYPE: DType = DType::$variant;

				fn into_data(values: Vec<Self>) -> NativeData {
					NativeData::$variant(values)
				}

				fn slice(data: &NativeData) -> Option<&[Self]> {
					match data {
						NativeData::$variant(values) => Some(values),
						_ => None,
					}
				}
			}
		)*
	};
}

impl_native_element!(
	i8 => Int8,
	i16 => Int16,
	i32 => Int32,
	i64 => Int64,
	u8 => UInt8,
	u16 => UInt16,
	u32 => UInt32,
	u64 => UInt64,
	String => String,
	Vec<u8> => Bytes,
);

/// A rectangular array of native values with a declared shape and dtype.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NativeArray {
	shape: Shape,
	data: NativeData,
}

impl NativeArray {
	/// Creates an array, checking that `data` fills `shape` exactly.
	pub fn new(shape: impl Into<Shape>, data: NativeData) -> Result<Self> {
		let shape = shape.into();
		let expected = shape.num_elements()?;
		if data.len() != expected {
			return Err(Error::DataLength {
				shape,
				expected,
				actual: data.len(),
			});
		}
		Ok(Self { shape, data })
	}

	/// Pairs a shape with data already known to fill it.
	pub(crate) fn from_parts(shape: Shape, data: NativeData) -> Self {
		debug_assert_eq!(shape.num_elements().ok(), Some(data.len()));
		Self { shape, data }
	}

	/// Creates an array from typed values.
	pub fn from_vec<T: NativeElement>(shape: impl Into<Shape>, values: Vec<T>) -> Result<Self> {
		Self::new(shape, T::into_data(values))
	}

	/// Creates an array of decimal strings.
	pub fn from_strs(shape: impl Into<Shape>, values: &[&str]) -> Result<Self> {
		Self::from_vec(shape, values.iter().map(|s| s.to_string()).collect::<Vec<_>>())
	}

	pub fn shape(&self) -> &Shape {
		&self.shape
	}

	pub fn dtype(&self) -> DType {
		self.data.dtype()
	}

	pub fn data(&self) -> &NativeData {
		&self.data
	}

	pub fn into_data(self) -> NativeData {
		self.data
	}

	pub fn len(&self) -> usize {
		self.data.len()
	}

	pub fn is_empty(&self) -> bool {
		self.data.is_empty()
	}

	/// Borrows the elements as `T`, or `None` when `T` is not this array's element type.
	pub fn as_slice<T: NativeElement>(&self) -> Option<&[T]> {
		T::slice(&self.data)
	}
}
