// Copyright 2025 Irreducible Inc.
//! The immutable array-of-[`BigValue`] container.

use std::sync::Arc;

use crate::{
	error::{Error, Result},
	shape::Shape,
	value::BigValue,
};

/// A rectangular, row-major array of [`BigValue`]s.
///
/// The shape is fixed at construction and the backing storage is shared, so cloning a tensor
/// is cheap and no operation ever mutates one in place.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BigTensor {
	shape: Shape,
	values: Arc<[BigValue]>,
}

impl BigTensor {
	/// Creates a tensor, checking that `values` fills `shape` exactly.
	pub fn new(shape: impl Into<Shape>, values: Vec<BigValue>) -> Result<Self> {
		let shape = shape.into();
		let expected = shape.num_elements()?;
		if values.len() != expected {
			return Err(Error::DataLength {
				shape,
				expected,
				actual: values.len(),
			});
		}
		Ok(Self {
			shape,
			values: values.into(),
		})
	}

	/// Creates a rank-0 tensor holding a single value.
	pub fn scalar(value: BigValue) -> Self {
		Self {
			shape: Shape::scalar(),
			values: Arc::from([value]),
		}
	}

	/// Creates a tensor by evaluating `f` at every flat index.
	///
	/// Fails before calling `f` when the shape's element count overflows.
	pub fn from_fn(shape: impl Into<Shape>, f: impl FnMut(usize) -> BigValue) -> Result<Self> {
		let shape = shape.into();
		let values = (0..shape.num_elements()?).map(f).collect();
		Ok(Self { shape, values })
	}

	pub fn shape(&self) -> &Shape {
		&self.shape
	}

	pub fn values(&self) -> &[BigValue] {
		&self.values
	}

	pub fn len(&self) -> usize {
		self.values.len()
	}

	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}

	pub fn iter(&self) -> std::slice::Iter<'_, BigValue> {
		self.values.iter()
	}

	/// Looks up the element at a multi-dimensional index.
	pub fn get(&self, index: &[usize]) -> Option<&BigValue> {
		if index.len() != self.shape.rank() {
			return None;
		}
		let mut flat = 0;
		for (&i, &dim) in index.iter().zip(self.shape.dims()) {
			if i >= dim {
				return None;
			}
			flat = flat * dim + i;
		}
		self.values.get(flat)
	}

	/// Returns the same values viewed under a new shape with equal element count.
	pub fn reshape(&self, shape: impl Into<Shape>) -> Result<Self> {
		let shape = shape.into();
		let expected = shape.num_elements()?;
		if expected != self.len() {
			return Err(Error::DataLength {
				expected,
				actual: self.len(),
				shape,
			});
		}
		Ok(Self {
			shape,
			values: Arc::clone(&self.values),
		})
	}
}

impl<'a> IntoIterator for &'a BigTensor {
	type Item = &'a BigValue;
	type IntoIter = std::slice::Iter<'a, BigValue>;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn new_checks_element_count() {
		let err = BigTensor::new([2, 2], vec![BigValue::ZERO; 3]).unwrap_err();
		assert_eq!(
			err,
			Error::DataLength {
				shape: Shape::from([2, 2]),
				expected: 4,
				actual: 3,
			}
		);
	}

	#[test]
	fn overflowing_shapes_are_rejected() {
		let shape = Shape::from([1 << 32, 1 << 32]);
		let overflow = Error::ShapeOverflow {
			shape: shape.clone(),
		};
		assert_eq!(BigTensor::new(shape.clone(), Vec::new()), Err(overflow.clone()));
		let mut calls = 0;
		let result = BigTensor::from_fn(shape.clone(), |_| {
			calls += 1;
			BigValue::ZERO
		});
		assert_eq!(result, Err(overflow.clone()));
		assert_eq!(calls, 0);
		let t = BigTensor::scalar(BigValue::ZERO);
		assert_eq!(t.reshape(shape), Err(overflow));
	}

	#[test]
	fn get_is_row_major() {
		let t = BigTensor::from_fn([2, 3], BigValue::from).unwrap();
		assert_eq!(t.get(&[1, 0]), Some(&BigValue::from(3usize)));
		assert_eq!(t.get(&[0, 2]), Some(&BigValue::from(2usize)));
		assert_eq!(t.get(&[2, 0]), None);
		assert_eq!(t.get(&[0]), None);
	}

	#[test]
	fn reshape_shares_storage() {
		let t = BigTensor::from_fn([2, 3], BigValue::from).unwrap();
		let r = t.reshape([3, 2]).unwrap();
		assert_eq!(r.values(), t.values());
		assert!(t.reshape([4]).is_err());
	}

	#[test]
	fn scalar_has_one_element() {
		let t = BigTensor::scalar(BigValue::from(9));
		assert_eq!(t.len(), 1);
		assert_eq!(t.get(&[]), Some(&BigValue::from(9)));
	}
}
