// Copyright 2026 The twinsieve authors
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The timed driver: sieve, extract, scan and report.
//!
//! Pure sequencing and measurement. The driver resolves the bound, runs the
//! three stages under a monotonic wall-clock timer and writes the report; it
//! contains no sieve logic of its own.

use crate::error::Error;
use crate::macros::log_debug;
use crate::sieve::{sieve_parallel, sieve_sequential};
use crate::twins::{twin_pairs, write_pairs};
use std::io::{BufRead, Write};
use std::num::NonZeroUsize;
use std::time::Instant;

/// Default sieve bound, matching the reference workload of 10^9.
pub const DEFAULT_BOUND: u64 = 1_000_000_000;

/// Default worker-thread count for the parallel sieving phase.
pub const DEFAULT_NUM_THREADS: usize = 6;

/// Where the sieve bound comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoundSource {
    /// Use the given bound as-is.
    Fixed(u64),
    /// Read the bound from the driver's input stream.
    Stdin,
}

/// Run configuration for the driver.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    /// Where the sieve bound comes from.
    pub source: BoundSource,
    /// Number of worker threads for the parallel sieving phase.
    ///
    /// A runtime value rather than a constant, so that callers (and tests)
    /// can compare 1-thread and N-thread runs of the same bound.
    pub num_threads: NonZeroUsize,
    /// Run the sequential baseline instead of the parallel sieve.
    pub sequential: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: BoundSource::Fixed(DEFAULT_BOUND),
            num_threads: NonZeroUsize::new(DEFAULT_NUM_THREADS).expect("non-zero default"),
            sequential: false,
        }
    }
}

/// Results of a completed run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Report {
    /// The bound that was sieved, inclusive.
    pub bound: u64,
    /// Number of primes in `[2, bound]`.
    pub prime_count: usize,
    /// Number of twin-prime pairs in `[2, bound]`.
    pub twin_count: usize,
    /// Wall-clock time of the sieve, extraction and scan, in milliseconds.
    pub elapsed_ms: u128,
}

/// Resolves the bound, runs sieve → extraction → twin scan under a
/// wall-clock timer, and writes the report to `output`.
///
/// `input` is only read when the configured source is [`BoundSource::Stdin`].
/// All errors propagate here and abort the run before any partial report is
/// written; there are no retries.
pub fn run(
    config: &Config,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Result<Report, Error> {
    let bound = match config.source {
        BoundSource::Fixed(bound) => bound,
        BoundSource::Stdin => read_bound(input)?,
    };
    log_debug!(
        "Sieving [0, {bound}] with {} worker thread(s)",
        if config.sequential {
            1
        } else {
            config.num_threads.get()
        }
    );

    // The timer covers allocation as well: at the default bound, zeroing a
    // gigabyte of flags is part of the measured work.
    let start = Instant::now();
    let marking = if config.sequential {
        sieve_sequential(bound)?
    } else {
        sieve_parallel(bound, config.num_threads)?
    };
    let primes = marking.freeze().primes();
    let pairs = twin_pairs(&primes);
    write_pairs(&pairs, output)?;
    let elapsed_ms = start.elapsed().as_millis();

    writeln!(output, "Parallel Execution Time: {elapsed_ms}ms")?;
    writeln!(output, "Number of Primes: {}", primes.len())?;

    Ok(Report {
        bound,
        prime_count: primes.len(),
        twin_count: pairs.len(),
        elapsed_ms,
    })
}

/// Reads the bound as a decimal integer from the first input line.
fn read_bound(input: &mut impl BufRead) -> Result<u64, Error> {
    let mut line = String::new();
    input.read_line(&mut line)?;
    let trimmed = line.trim();
    trimmed.parse().map_err(|_| Error::InvalidBound {
        input: trimmed.to_owned(),
    })
}
