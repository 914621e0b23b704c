// Copyright 2025 Irreducible Inc.
//! Kernel system.
//!
//! Kernels are scalar computations over [`BigValue`]s. [`apply`] lifts a kernel to tensors by
//! broadcasting its operands and evaluating every output element independently.

use bigtensor_core::{BigTensor, BigValue, Error, Fault, Result, Shape};
#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Scalar operation of fixed arity.
pub trait Kernel<const ARITY: usize>: Send + Sync {
	/// Name reported in errors and tracing spans.
	const NAME: &'static str;

	/// Evaluate the kernel on one tuple of operands.
	fn execute(&self, args: [&BigValue; ARITY]) -> Result<BigValue, Fault>;
}

/// Applies `kernel` elementwise over the broadcast of `operands`.
///
/// Either every element succeeds or the error names an offending flat index of the output.
pub fn apply<K, const ARITY: usize>(kernel: &K, operands: [&BigTensor; ARITY]) -> Result<BigTensor>
where
	K: Kernel<ARITY>,
{
	let shape = Shape::broadcast_all(operands.iter().map(|t| t.shape()))?;
	let n_elements = shape.num_elements()?;
	let _span = tracing::debug_span!("elementwise", op = K::NAME, %shape, n_elements).entered();

	let eval = |index: usize| {
		let args = operands.map(|operand| {
			&operand.values()[operand.shape().broadcast_source_index(&shape, index)]
		});
		kernel.execute(args).map_err(|fault| Error::Element {
			op: K::NAME,
			index,
			fault,
		})
	};

	#[cfg(feature = "rayon")]
	let values = (0..n_elements).into_par_iter().map(eval).collect::<Result<Vec<_>>>()?;
	#[cfg(not(feature = "rayon"))]
	let values = (0..n_elements).map(eval).collect::<Result<Vec<_>>>()?;

	BigTensor::new(shape, values)
}
