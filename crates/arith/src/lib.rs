// Copyright 2025 Irreducible Inc.
//! Elementwise arithmetic over [`BigTensor`]s.
//!
//! Every operation broadcasts its operands, so a `[1, 1]` tensor combines with a `[1, 2]`
//! tensor by replicating its single element. Results are exact; the modular operations return
//! representatives in `[0, |m|)`.

pub mod kernel;
pub mod modular;
pub mod ops;


use bigtensor_core::{BigTensor, Result};
pub use kernel::{Kernel, apply};
pub use modular::{mod_inverse, mod_pow};
use ops::{AddKernel, InverseKernel, ModKernel, MulKernel, PowKernel, SubKernel};

pub fn add(x: &BigTensor, y: &BigTensor) -> Result<BigTensor> {
	apply(&AddKernel, [x, y])
}

pub fn subtract(x: &BigTensor, y: &BigTensor) -> Result<BigTensor> {
	apply(&SubKernel, [x, y])
}

pub fn multiply(x: &BigTensor, y: &BigTensor) -> Result<BigTensor> {
	apply(&MulKernel, [x, y])
}

/// `x mod n`, failing with a division error where `n` is zero.
pub fn modulus(x: &BigTensor, n: &BigTensor) -> Result<BigTensor> {
	apply(&ModKernel, [x, n])
}

/// `x^y mod m`, failing where `y` is negative or `m` is zero.
pub fn power(x: &BigTensor, y: &BigTensor, m: &BigTensor) -> Result<BigTensor> {
	apply(&PowKernel, [x, y, m])
}

/// Multiplicative inverse of `x` modulo `m`, failing where `gcd(x, m) != 1`.
pub fn inverse(x: &BigTensor, m: &BigTensor) -> Result<BigTensor> {
	apply(&InverseKernel, [x, m])
}
