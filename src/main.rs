// Copyright 2026 The twinsieve authors
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! CLI entry point for the twinsieve binary.

use clap::Parser;
use std::num::NonZeroUsize;
use std::process::ExitCode;
use twinsieve::{run, BoundSource, Config, DEFAULT_BOUND, DEFAULT_NUM_THREADS};

/// Counts the primes up to a bound and enumerates the twin-prime pairs among
/// them, using a parallel Sieve of Eratosthenes.
#[derive(Parser, Debug, PartialEq, Eq)]
#[command(version)]
struct Cli {
    /// Upper bound of the search space, inclusive.
    #[arg(long, default_value_t = DEFAULT_BOUND)]
    bound: u64,

    /// Read the bound from standard input instead of --bound.
    #[arg(long, default_value_t = false)]
    stdin: bool,

    /// Number of worker threads for the sieving phase.
    #[arg(long, default_value_t = NonZeroUsize::new(DEFAULT_NUM_THREADS).expect("non-zero default"))]
    threads: NonZeroUsize,

    /// Run the sequential baseline instead of the parallel sieve.
    #[arg(long, default_value_t = false)]
    sequential: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let config = Config {
        source: if cli.stdin {
            BoundSource::Stdin
        } else {
            BoundSource::Fixed(cli.bound)
        },
        num_threads: cli.threads,
        sequential: cli.sequential,
    };

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    match run(&config, &mut stdin.lock(), &mut stdout.lock()) {
        Ok(_report) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("twinsieve: {e}");
            ExitCode::FAILURE
        }
    }
}
