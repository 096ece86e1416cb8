// Copyright 2026 The twinsieve authors
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Errors reported by the sieve and the driver.

use thiserror::Error;

/// Errors that can occur while preparing or running a sieve.
///
/// The computation itself is deterministic and pure, so none of these are
/// worth retrying: a retry would reproduce the same failure.
#[derive(Debug, Error)]
pub enum Error {
    /// The bound read from standard input was not a non-negative integer.
    #[error("invalid bound: {input:?} is not a non-negative integer")]
    InvalidBound {
        /// Raw input that failed to parse.
        input: String,
    },

    /// The marking array for the requested bound could not be allocated.
    ///
    /// This is the dominant real-world failure mode at the bounds this tool
    /// targets: the default bound of 10^9 needs about a gigabyte of flags.
    /// The bound is never silently clamped.
    #[error("cannot allocate marking array for bound {bound} ({bytes} bytes required)")]
    Allocation {
        /// Requested sieve bound.
        bound: u64,
        /// Number of bytes the marking array would occupy.
        bytes: u64,
    },

    /// Reading the bound or writing the report failed.
    #[error("i/o error")]
    Io(#[from] std::io::Error),
}
