// Copyright 2025 Irreducible Inc.
mod commands;

use anyhow::Result;
use bigtensor_core::{DType, consts::MILLER_RABIN_ROUNDS};
use clap::{ArgAction, Parser, Subcommand};
use commands::ArithOp;
use tracing::Level;

/// Exact big-integer tensor arithmetic, limb transcoding and sampling.
#[derive(Debug, Parser)]
#[command(name = "bigtensor", version)]
struct Args {
	/// Increase log verbosity on stderr (-v info, -vv debug, -vvv trace)
	#[arg(short, long, action = ArgAction::Count, global = true)]
	verbose: u8,

	#[command(subcommand)]
	command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
	/// Apply an elementwise operation to rows of decimal values
	Arith {
		#[arg(value_enum)]
		op: ArithOp,

		/// Comma-separated left operand
		#[arg(long, allow_hyphen_values = true)]
		x: String,

		/// Comma-separated right operand (the modulus for `mod` and `inv`, the exponent for `pow`)
		#[arg(long, allow_hyphen_values = true)]
		y: String,

		/// Comma-separated modulus for `pow`
		#[arg(long)]
		m: Option<String>,
	},

	/// Split values into native limbs and reassemble them
	Limbs {
		/// Native dtype of each limb
		#[arg(long, default_value = "int32")]
		dtype: DType,

		/// Magnitude, in bits, the limb layout is sized for
		#[arg(long)]
		max_bitlen: Option<u32>,

		/// Limb width, capped at the usable bits of the dtype
		#[arg(long)]
		limb_bits: Option<u32>,

		/// Non-negative decimal values
		#[arg(required = true)]
		values: Vec<String>,
	},

	/// Sample a tensor uniformly below a bound
	Uniform {
		/// Comma-separated dimensions
		#[arg(long, default_value = "")]
		shape: String,

		/// Exclusive upper bound
		#[arg(long)]
		max: String,
	},

	/// Generate an RSA modulus from two random primes
	Rsa {
		/// Bit length of each prime
		#[arg(long, value_parser = clap::value_parser!(u32).range(3..))]
		bits: u32,

		/// Miller-Rabin rounds per candidate
		#[arg(
			long,
			default_value_t = MILLER_RABIN_ROUNDS as u64,
			value_parser = clap::value_parser!(u64).range(MILLER_RABIN_ROUNDS as u64..),
		)]
		rounds: u64,

		/// Abandon the prime search after this many seconds
		#[arg(long)]
		timeout_secs: Option<u64>,
	},
}

fn init_tracing(verbose: u8) {
	let level = match verbose {
		0 => Level::WARN,
		1 => Level::INFO,
		2 => Level::DEBUG,
		_ => Level::TRACE,
	};
	tracing_subscriber::fmt()
		.with_writer(std::io::stderr)
		.with_max_level(level)
		.init();
}

fn main() -> Result<()> {
	let args = Args::parse();
	init_tracing(args.verbose);

	let output = match args.command {
		Commands::Arith { op, x, y, m } => commands::arith(op, &x, &y, m.as_deref())?,
		Commands::Limbs {
			dtype,
			max_bitlen,
			limb_bits,
			values,
		} => commands::limbs(dtype, max_bitlen, limb_bits, &values)?,
		Commands::Uniform { shape, max } => commands::sample(&shape, &max)?,
		Commands::Rsa {
			bits,
			rounds,
			timeout_secs,
		} => commands::rsa(bits, rounds, timeout_secs)?,
	};
	println!("{output}");
	Ok(())
}

#[cfg(test)]
mod tests {
	use clap::CommandFactory;

	use super::*;

	#[test]
	fn cli_definition_is_consistent() {
		Args::command().debug_assert();
	}

	#[test]
	fn parses_subcommands() {
		let args = Args::parse_from(["bigtensor", "-vv", "arith", "add", "--x", "-1,2", "--y", "3"]);
		assert_eq!(args.verbose, 2);
		assert!(matches!(args.command, Commands::Arith { op: ArithOp::Add, .. }));

		let args = Args::parse_from(["bigtensor", "limbs", "--dtype", "uint8", "10", "20"]);
		let Commands::Limbs { dtype, values, .. } = args.command else {
			panic!("expected limbs");
		};
		assert_eq!(dtype, DType::UInt8);
		assert_eq!(values, ["10", "20"]);

		assert!(Args::try_parse_from(["bigtensor", "rsa", "--bits", "2"]).is_err());
	}

	#[test]
	fn rsa_rounds_have_a_floor() {
		let args = Args::parse_from(["bigtensor", "rsa", "--bits", "64"]);
		let Commands::Rsa { rounds, .. } = args.command else {
			panic!("expected rsa");
		};
		assert_eq!(rounds, MILLER_RABIN_ROUNDS as u64);

		for rounds in ["0", "63"] {
			assert!(
				Args::try_parse_from(["bigtensor", "rsa", "--bits", "64", "--rounds", rounds]).is_err()
			);
		}
		assert!(Args::try_parse_from(["bigtensor", "rsa", "--bits", "64", "--rounds", "100"]).is_ok());
	}
}
