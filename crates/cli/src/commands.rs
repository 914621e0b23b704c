// Copyright 2025 Irreducible Inc.
use std::time::Duration;

use anyhow::{Context, Result, bail, ensure};
use bigtensor_arith::{add, inverse, modulus, multiply, power, subtract};
use bigtensor_codec::{LimbPolicy, NativeArray, export_limbs, import, import_limbs};
use bigtensor_core::{BigTensor, BigValue, DType, Shape};
use bigtensor_random::{CancelToken, PrimeConfig, rsa_modulus_with_rng, uniform};
use clap::ValueEnum;
use itertools::Itertools;

/// Elementwise operation selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ArithOp {
	Add,
	Sub,
	Mul,
	/// `x mod y`
	Mod,
	/// `x^y mod m`
	Pow,
	/// Inverse of `x` modulo `y`
	Inv,
}

/// Imports a comma-separated list of decimal literals as a `[1, len]` tensor.
pub fn parse_row(list: &str) -> Result<BigTensor> {
	let literals = list.split(',').map(str::trim).collect::<Vec<_>>();
	let array = NativeArray::from_strs([1, literals.len()], &literals)?;
	import(&array).with_context(|| format!("Failed to parse value list '{list}'"))
}

/// Parses a comma-separated list of dimensions. An empty list is the scalar shape.
pub fn parse_shape(dims: &str) -> Result<Shape> {
	if dims.trim().is_empty() {
		return Ok(Shape::scalar());
	}
	let dims = dims
		.split(',')
		.map(|d| {
			d.trim()
				.parse::<usize>()
				.with_context(|| format!("Invalid dimension '{d}'"))
		})
		.collect::<Result<Vec<_>>>()?;
	Ok(Shape::new(dims))
}

fn render(tensor: &BigTensor) -> String {
	format!("{} [{}]", tensor.shape(), tensor.iter().join(", "))
}

pub fn arith(op: ArithOp, x: &str, y: &str, m: Option<&str>) -> Result<String> {
	let x = parse_row(x)?;
	let y = parse_row(y)?;
	let z = match op {
		ArithOp::Add => add(&x, &y),
		ArithOp::Sub => subtract(&x, &y),
		ArithOp::Mul => multiply(&x, &y),
		ArithOp::Mod => modulus(&x, &y),
		ArithOp::Inv => inverse(&x, &y),
		ArithOp::Pow => {
			let Some(m) = m else {
				bail!("pow requires a modulus (--m)");
			};
			power(&x, &y, &parse_row(m)?)
		}
	}
	.with_context(|| format!("{op:?} failed"))?;
	Ok(render(&z))
}

/// Splits `values` into limbs, prints one row of limbs per value and checks that the limbs
/// reassemble to the input.
pub fn limbs(
	dtype: DType,
	max_bitlen: Option<u32>,
	limb_bits: Option<u32>,
	values: &[String],
) -> Result<String> {
	let literals = values.iter().map(String::as_str).collect::<Vec<_>>();
	let tensor = import(&NativeArray::from_strs([literals.len()], &literals)?)
		.context("Failed to parse values")?;
	let policy = LimbPolicy {
		dtype,
		max_bitlen,
		limb_bits,
	};

	let limbs = export_limbs(&tensor, &policy).context("Failed to export limbs")?;
	let restored = import_limbs(&limbs).context("Failed to import limbs")?;
	ensure!(restored == tensor, "limbs of {} did not reassemble to the input", render(&tensor));

	let flat = import(limbs.array())?;
	let mut out = format!(
		"{dtype}: {} limbs of {} bits, shape {}",
		limbs.limb_count(),
		limbs.limb_bits(),
		limbs.shape()
	);
	for (value, row) in tensor.iter().zip(flat.values().chunks(limbs.limb_count())) {
		out.push_str(&format!("\n{value} = [{}]", row.iter().join(", ")));
	}
	Ok(out)
}

pub fn sample(shape: &str, max: &str) -> Result<String> {
	let shape = parse_shape(shape)?;
	let max: BigValue = max
		.trim()
		.parse()
		.with_context(|| format!("Invalid bound '{max}'"))?;
	let t = uniform(shape, &max).context("Sampling failed")?;
	Ok(render(&t))
}

pub fn rsa(bits: u32, rounds: u64, timeout_secs: Option<u64>) -> Result<String> {
	let rounds = usize::try_from(rounds).context("Too many Miller-Rabin rounds")?;
	let cancel = match timeout_secs {
		Some(secs) => CancelToken::with_deadline(Duration::from_secs(secs)),
		None => CancelToken::new(),
	};
	let config = PrimeConfig { rounds, cancel };
	let (p, q, n) = rsa_modulus_with_rng(&mut rand::rng(), bits, &config)
		.with_context(|| format!("Failed to generate a {bits}-bit RSA modulus"))?
		.into_parts();
	Ok(format!("p = {}\nq = {}\nn = {}", p.values()[0], q.values()[0], n.values()[0]))
}
