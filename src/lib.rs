// Copyright 2026 The twinsieve authors
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

#![doc = include_str!("../README.md")]
#![forbid(missing_docs, unsafe_code)]

mod driver;
mod error;
mod macros;
mod pool;
mod sieve;
mod twins;

pub use driver::{run, BoundSource, Config, Report, DEFAULT_BOUND, DEFAULT_NUM_THREADS};
pub use error::Error;
pub use sieve::{sieve_parallel, sieve_sequential, FrozenMarking, Marking};
pub use twins::{twin_pairs, write_pairs};
