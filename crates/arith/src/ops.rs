// Copyright 2025 Irreducible Inc.
//! Kernels for the elementwise operators.

use bigtensor_core::{BigValue, Fault};

use crate::{
	kernel::Kernel,
	modular::{mod_inverse, mod_pow},
};

/// Exact sum.
pub struct AddKernel;

impl Kernel<2> for AddKernel {
	const NAME: &'static str = "add";

	fn execute(&self, [x, y]: [&BigValue; 2]) -> Result<BigValue, Fault> {
		Ok(x + y)
	}
}

/// Exact difference.
pub struct SubKernel;

impl Kernel<2> for SubKernel {
	const NAME: &'static str = "subtract";

	fn execute(&self, [x, y]: [&BigValue; 2]) -> Result<BigValue, Fault> {
		Ok(x - y)
	}
}

/// Exact product.
pub struct MulKernel;

impl Kernel<2> for MulKernel {
	const NAME: &'static str = "multiply";

	fn execute(&self, [x, y]: [&BigValue; 2]) -> Result<BigValue, Fault> {
		Ok(x * y)
	}
}

/// Non-negative remainder `x mod n`.
pub struct ModKernel;

impl Kernel<2> for ModKernel {
	const NAME: &'static str = "modulus";

	fn execute(&self, [x, n]: [&BigValue; 2]) -> Result<BigValue, Fault> {
		x.mod_floor(n)
	}
}

/// Modular exponentiation `x^y mod m`.
pub struct PowKernel;

impl Kernel<3> for PowKernel {
	const NAME: &'static str = "power";

	fn execute(&self, [x, y, m]: [&BigValue; 3]) -> Result<BigValue, Fault> {
		mod_pow(x, y, m)
	}
}

/// Modular inverse of `x` modulo `m`.
pub struct InverseKernel;

impl Kernel<2> for InverseKernel {
	const NAME: &'static str = "inverse";

	fn execute(&self, [x, m]: [&BigValue; 2]) -> Result<BigValue, Fault> {
		mod_inverse(x, m)
	}
}
