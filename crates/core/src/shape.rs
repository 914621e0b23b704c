// Copyright 2025 Irreducible Inc.
//! Tensor shapes and the broadcasting rule.

use std::fmt;

use crate::error::{Error, Result};

/// An ordered list of dimension sizes. The empty shape is a scalar holding one element.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Shape {
	dims: Vec<usize>,
}

impl Shape {
	pub fn new(dims: impl Into<Vec<usize>>) -> Self {
		Self { dims: dims.into() }
	}

	pub fn scalar() -> Self {
		Self::default()
	}

	pub fn rank(&self) -> usize {
		self.dims.len()
	}

	pub fn dims(&self) -> &[usize] {
		&self.dims
	}

	/// Total number of elements, or [`Error::ShapeOverflow`] when the product of the dimensions
	/// does not fit a `usize`.
	pub fn num_elements(&self) -> Result<usize> {
		self.dims
			.iter()
			.try_fold(1usize, |acc, &dim| acc.checked_mul(dim))
			.ok_or_else(|| Error::ShapeOverflow {
				shape: self.clone(),
			})
	}

	/// Returns this shape extended by one trailing axis of length `len`.
	pub fn with_trailing(&self, len: usize) -> Self {
		let mut dims = self.dims.clone();
		dims.push(len);
		Self { dims }
	}

	/// Splits off the trailing axis, returning the leading shape and the trailing length.
	pub fn split_last(&self) -> Option<(Shape, usize)> {
		let (&last, leading) = self.dims.split_last()?;
		Some((Shape::new(leading), last))
	}

	/// Computes the shape produced by broadcasting `self` against `other`.
	///
	/// Dimensions are aligned from the trailing end, missing leading dimensions count as 1, and
	/// each aligned pair must be equal or contain a 1.
	pub fn broadcast(&self, other: &Shape) -> Result<Shape> {
		let rank = self.rank().max(other.rank());
		let mut dims = vec![1; rank];
		for (i, dim) in dims.iter_mut().rev().enumerate() {
			let a = self.dim_from_end(i);
			let b = other.dim_from_end(i);
			*dim = match (a, b) {
				(a, b) if a == b => a,
				(1, b) => b,
				(a, 1) => a,
				_ => {
					return Err(Error::ShapeMismatch {
						lhs: self.clone(),
						rhs: other.clone(),
					});
				}
			};
		}
		let shape = Shape { dims };
		shape.num_elements()?;
		Ok(shape)
	}

	/// Broadcasts any number of shapes together, left to right.
	pub fn broadcast_all<'a>(shapes: impl IntoIterator<Item = &'a Shape>) -> Result<Shape> {
		shapes
			.into_iter()
			.try_fold(Shape::scalar(), |acc, shape| acc.broadcast(shape))
	}

	/// Maps a flat row-major index of the broadcast shape `target` onto the flat index of the
	/// element of `self` it reads from.
	///
	/// `target` must be the result of broadcasting `self` with some other shape.
	pub fn broadcast_source_index(&self, target: &Shape, flat: usize) -> usize {
		debug_assert!(target.rank() >= self.rank());
		let offset = target.rank() - self.rank();
		let mut remaining = flat;
		let mut source = 0;
		let mut stride = 1;
		for axis in (0..target.rank()).rev() {
			let coord = remaining % target.dims[axis];
			remaining /= target.dims[axis];
			if axis >= offset {
				let dim = self.dims[axis - offset];
				if dim != 1 {
					source += coord * stride;
				}
				stride *= dim;
			}
		}
		source
	}

	fn dim_from_end(&self, i: usize) -> usize {
		if i < self.rank() {
			self.dims[self.rank() - 1 - i]
		} else {
			1
		}
	}
}

impl fmt::Display for Shape {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "[")?;
		for (i, d) in self.dims.iter().enumerate() {
			if i > 0 {
				write!(f, ", ")?;
			}
			write!(f, "{d}")?;
		}
		write!(f, "]")
	}
}

impl From<Vec<usize>> for Shape {
	fn from(dims: Vec<usize>) -> Self {
		Self { dims }
	}
}

impl From<&[usize]> for Shape {
	fn from(dims: &[usize]) -> Self {
		Self::new(dims)
	}
}

impl<const N: usize> From<[usize; N]> for Shape {
	fn from(dims: [usize; N]) -> Self {
		Self::new(dims)
	}
}
