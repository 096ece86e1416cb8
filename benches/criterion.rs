// Copyright 2026 The twinsieve authors
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Scaling benchmarks for the sieving phase.
//!
//! The dynamic-scheduling claim is a performance property, not a correctness
//! one: at a fixed bound, elapsed time should not increase monotonically as
//! worker threads are added up to the core count. It is measured here rather
//! than asserted in CI.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::num::NonZeroUsize;
use twinsieve::{sieve_parallel, sieve_sequential, twin_pairs};

const NUM_THREADS: &[usize] = &[1, 2, 4, 6];
const BOUNDS: &[u64] = &[100_000, 1_000_000, 10_000_000];

fn sieve(c: &mut Criterion) {
    let mut group = c.benchmark_group("sieve");
    for &bound in BOUNDS {
        // One flag byte per integer in [0, bound].
        group.throughput(Throughput::Bytes(bound + 1));
        group.bench_with_input(BenchmarkId::new("sequential", bound), &bound, |b, &bound| {
            b.iter(|| sieve_sequential(bound).unwrap())
        });
        for &num_threads in NUM_THREADS {
            group.bench_with_input(
                BenchmarkId::new(format!("parallel@{num_threads}"), bound),
                &bound,
                |b, &bound| {
                    let num_threads = NonZeroUsize::try_from(num_threads).unwrap();
                    b.iter(|| sieve_parallel(bound, num_threads).unwrap())
                },
            );
        }
    }
    group.finish();
}

fn twin_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("twin_scan");
    for &bound in BOUNDS {
        let primes = sieve_sequential(bound).unwrap().freeze().primes();
        group.bench_with_input(BenchmarkId::from_parameter(bound), &primes, |b, primes| {
            b.iter(|| twin_pairs(primes))
        });
    }
    group.finish();
}

criterion_group!(benches, sieve, twin_scan);
criterion_main!(benches);
