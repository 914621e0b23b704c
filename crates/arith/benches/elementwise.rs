// Copyright 2025 Irreducible Inc.

use bigtensor_arith::{add, inverse, multiply, power};
use bigtensor_core::{BigTensor, BigValue};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use num_bigint::BigUint;
use rand::{Rng, SeedableRng, rngs::StdRng};

fn random_tensor(rng: &mut impl Rng, n: usize, bits: usize) -> BigTensor {
	let n_bytes = bits.div_ceil(8);
	BigTensor::from_fn([n], |_| {
		let mut bytes = vec![0u8; n_bytes];
		rng.fill(bytes.as_mut_slice());
		BigValue::from(BigUint::from_bytes_le(&bytes))
	})
	.unwrap()
}

fn bench_elementwise(c: &mut Criterion) {
	let mut group = c.benchmark_group("elementwise");
	let mut rng = StdRng::seed_from_u64(0);
	let n = 1024;

	for bits in [64, 256, 2048] {
		let parameter = format!("bits={bits}");
		let x = random_tensor(&mut rng, n, bits);
		let y = random_tensor(&mut rng, n, bits);
		// An odd modulus keeps most inverses defined.
		let m = BigTensor::scalar(BigValue::from(
			(BigUint::from(1u32) << bits) - BigUint::from(159u32),
		));
		group.throughput(Throughput::Elements(n as u64));

		group.bench_function(BenchmarkId::new("add", &parameter), |b| {
			b.iter(|| add(&x, &y).unwrap())
		});
		group.bench_function(BenchmarkId::new("multiply", &parameter), |b| {
			b.iter(|| multiply(&x, &y).unwrap())
		});
		group.bench_function(BenchmarkId::new("power", &parameter), |b| {
			b.iter(|| power(&x, &y, &m).unwrap())
		});
		group.bench_function(BenchmarkId::new("inverse", &parameter), |b| {
			b.iter(|| inverse(&x, &m))
		});
	}

	group.finish();
}

criterion_group!(elementwise_bench, bench_elementwise);
criterion_main!(elementwise_bench);
