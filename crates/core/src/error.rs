// Copyright 2025 Irreducible Inc.
//! Hosts error definitions shared by every bigtensor crate.

use crate::{dtype::DType, shape::Shape};

/// Coarse classification of an [`Error`], stable across variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
	/// A literal could not be parsed as an integer.
	Parse,
	/// A value does not fit the requested native dtype.
	Overflow,
	/// Operand shapes are incompatible.
	Shape,
	/// An operand lies outside the domain of the operation.
	Domain,
	/// Division by a zero modulus.
	Division,
	/// A modular inverse does not exist.
	NoInverse,
	/// A limb layout cannot hold or unambiguously describe a value.
	Capacity,
	/// The caller cancelled a long-running search.
	Cancelled,
}

/// Failure of a scalar kernel on a single element.
///
/// The elementwise driver attaches the failing index and op name, see [`Error::Element`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum Fault {
	#[error("division by zero")]
	DivisionByZero,
	#[error("negative exponent")]
	NegativeExponent,
	#[error("zero modulus")]
	ZeroModulus,
	#[error("operand is not invertible modulo the modulus")]
	NoInverse,
}

impl Fault {
	pub fn kind(self) -> ErrorKind {
		match self {
			Fault::DivisionByZero => ErrorKind::Division,
			Fault::NegativeExponent | Fault::ZeroModulus => ErrorKind::Domain,
			Fault::NoInverse => ErrorKind::NoInverse,
		}
	}
}

#[allow(missing_docs)] // errors are self-documenting
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
	#[error("element #{index}: {literal:?} is not an integer literal")]
	Parse { index: usize, literal: String },
	#[error("element #{index} needs {required_bits} bits and does not fit {dtype}")]
	Overflow {
		index: usize,
		dtype: DType,
		required_bits: u64,
	},
	#[error("shapes {lhs} and {rhs} cannot be broadcast together")]
	ShapeMismatch { lhs: Shape, rhs: Shape },
	#[error("shape {shape} has more elements than fit in memory")]
	ShapeOverflow { shape: Shape },
	#[error("shape {shape} holds {expected} elements, got {actual}")]
	DataLength {
		shape: Shape,
		expected: usize,
		actual: usize,
	},
	#[error("{op} failed at element #{index}: {fault}")]
	Element {
		op: &'static str,
		index: usize,
		fault: Fault,
	},
	#[error("upper bound must be positive, got {bound}")]
	NonPositiveBound { bound: String },
	#[error("bit length {bits} is below the minimum of {min}")]
	BitLengthTooSmall { bits: u32, min: u32 },
	#[error("{rounds} Miller-Rabin rounds requested, at least {min} are required")]
	TooFewRounds { rounds: usize, min: usize },
	#[error("{op} does not support dtype {dtype}")]
	UnsupportedDtype { op: &'static str, dtype: DType },
	#[error("unknown dtype {name:?}")]
	UnknownDtype { name: String },
	#[error("element #{index} is negative and has no limb decomposition")]
	NegativeLimbValue { index: usize },
	#[error("element #{index} needs {bits} bits, the limb layout holds {capacity}")]
	LimbCapacityExceeded { index: usize, bits: u64, capacity: u64 },
	#[error("limb width must be at least one bit")]
	ZeroLimbWidth,
	#[error("limb width {limb_bits} exceeds the {usable} usable bits of {dtype}")]
	LimbWidthTooLarge {
		limb_bits: u32,
		usable: u32,
		dtype: DType,
	},
	#[error("limb array of shape {shape} has no limb axis")]
	MissingLimbAxis { shape: Shape },
	#[error("limb array of shape {shape} has an empty limb axis")]
	EmptyLimbAxis { shape: Shape },
	#[error("limb #{index} lies outside [0, 2^{limb_bits})")]
	LimbOutOfRange { index: usize, limb_bits: u32 },
	#[error("search cancelled after {candidates} candidates")]
	Cancelled { candidates: u64 },
}

impl Error {
	pub fn kind(&self) -> ErrorKind {
		match self {
			Error::Parse { .. } | Error::UnknownDtype { .. } => ErrorKind::Parse,
			Error::Overflow { .. } => ErrorKind::Overflow,
			Error::ShapeMismatch { .. } | Error::ShapeOverflow { .. } | Error::DataLength { .. } => {
				ErrorKind::Shape
			}
			Error::Element { fault, .. } => fault.kind(),
			Error::NonPositiveBound { .. }
			| Error::BitLengthTooSmall { .. }
			| Error::TooFewRounds { .. }
			| Error::UnsupportedDtype { .. }
			| Error::NegativeLimbValue { .. } => ErrorKind::Domain,
			Error::LimbCapacityExceeded { .. }
			| Error::ZeroLimbWidth
			| Error::LimbWidthTooLarge { .. }
			| Error::MissingLimbAxis { .. }
			| Error::EmptyLimbAxis { .. }
			| Error::LimbOutOfRange { .. } => ErrorKind::Capacity,
			Error::Cancelled { .. } => ErrorKind::Cancelled,
		}
	}
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
