// Copyright 2026 The twinsieve authors
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The sieve engine: composite marking and prime extraction.
//!
//! The classic Sieve of Eratosthenes, in a sequential variant and a parallel
//! variant that distributes the outer loop over candidate factors across a
//! fixed pool of workers. Both produce bit-identical markings: parallelism
//! changes the wall-clock time, never the result.

use crate::error::Error;
use crate::macros::log_warn;
use crate::pool::{fork_join, CandidateQueue};
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicBool, Ordering};

/// Composite marking for every integer in `[0, bound]`.
///
/// Index `i` is true once `i` is known composite; 0 and 1 are pre-marked
/// composite by convention. Flags are monotone (only ever set, never
/// cleared), so two workers striking the same index for different factors
/// always agree and relaxed stores suffice. No lock guards the flags; the
/// only coordination between workers is the candidate queue.
pub struct Marking {
    flags: Box<[AtomicBool]>,
    bound: u64,
}

impl Marking {
    /// Allocates a zeroed marking for `[0, bound]`, with 0 and 1 pre-marked.
    ///
    /// Allocation is fallible by design: at the bounds this tool targets
    /// (the default is 10^9) the flags occupy a gigabyte, and a failure must
    /// name the bound and the bytes required rather than abort or clamp.
    pub fn allocate(bound: u64) -> Result<Self, Error> {
        let len = usize::try_from(bound)
            .ok()
            .and_then(|bound| bound.checked_add(1))
            .ok_or(Error::Allocation {
                bound,
                bytes: bound.saturating_add(1),
            })?;
        let mut flags = Vec::new();
        flags.try_reserve_exact(len).map_err(|_| Error::Allocation {
            bound,
            bytes: len as u64,
        })?;
        flags.resize_with(len, AtomicBool::default);

        let marking = Self {
            flags: flags.into_boxed_slice(),
            bound,
        };
        if bound >= 1 {
            marking.mark(0);
            marking.mark(1);
        } else {
            marking.mark(0);
        }
        Ok(marking)
    }

    /// Upper bound of the marking, inclusive.
    pub fn bound(&self) -> u64 {
        self.bound
    }

    fn mark(&self, index: usize) {
        self.flags[index].store(true, Ordering::Relaxed);
    }

    fn is_unmarked(&self, index: usize) -> bool {
        !self.flags[index].load(Ordering::Relaxed)
    }

    /// Strikes every multiple of `factor` from `factor * factor` upwards.
    ///
    /// Starts at `factor * factor`: every smaller multiple has a smaller
    /// prime factor and was already struck on that factor's behalf.
    ///
    /// This loop must stay on a single thread. Splitting it across workers
    /// was tried and measured slower: the strides are short for all but the
    /// smallest factors, and the per-candidate scheduling overhead dwarfs
    /// the marking work.
    fn strike_multiples(&self, factor: usize) {
        for multiple in (factor * factor..self.flags.len()).step_by(factor) {
            self.mark(multiple);
        }
    }

    /// Converts the marking into its immutable form.
    ///
    /// Consuming `self` is what enforces the phase boundary: once frozen, no
    /// code path can mutate a flag, so every reader past the fork-join
    /// barrier observes the fully completed marking.
    pub fn freeze(self) -> FrozenMarking {
        FrozenMarking {
            flags: self
                .flags
                .into_vec()
                .into_iter()
                .map(AtomicBool::into_inner)
                .collect(),
            bound: self.bound,
        }
    }
}

/// An immutable composite marking, produced by [`Marking::freeze`].
#[derive(Debug, PartialEq, Eq)]
pub struct FrozenMarking {
    flags: Box<[bool]>,
    bound: u64,
}

impl FrozenMarking {
    /// Upper bound of the marking, inclusive.
    pub fn bound(&self) -> u64 {
        self.bound
    }

    /// Whether `value` is marked composite.
    pub fn is_composite(&self, value: u64) -> bool {
        usize::try_from(value).is_ok_and(|value| self.flags.get(value).copied().unwrap_or(false))
    }

    /// Collects the primes in `[2, bound]` in strictly increasing order.
    ///
    /// A single sequential pass. Collecting in parallel was tried and
    /// abandoned: appending to a shared growable vector synchronizes on
    /// every push, and scatter-gather into per-worker buffers needs a merge
    /// step that costs more than this scan at these sizes. The twin-prime
    /// scan also requires the output sorted, which the in-order pass gives
    /// for free.
    pub fn primes(&self) -> Vec<u64> {
        self.flags
            .iter()
            .enumerate()
            .skip(2)
            .filter(|(_, &composite)| !composite)
            .map(|(value, _)| value as u64)
            .collect()
    }
}

/// Largest `r` with `r * r <= n`.
fn floor_sqrt(n: u64) -> u64 {
    let mut r = (n as f64).sqrt() as u64;
    while r.checked_mul(r).map_or(true, |square| square > n) {
        r -= 1;
    }
    while (r + 1).checked_mul(r + 1).is_some_and(|square| square <= n) {
        r += 1;
    }
    r
}

/// Strikes all composites in the marking on the current thread.
fn strike_all(marking: &Marking) {
    let sqrt = floor_sqrt(marking.bound()) as usize;
    for factor in 2..=sqrt {
        if marking.is_unmarked(factor) {
            marking.strike_multiples(factor);
        }
    }
}

/// Marks every composite in `[0, bound]` on the current thread.
///
/// Bounds below 2 are not an error; they produce a marking with no primes.
pub fn sieve_sequential(bound: u64) -> Result<Marking, Error> {
    let marking = Marking::allocate(bound)?;
    strike_all(&marking);
    Ok(marking)
}

/// Marks every composite in `[0, bound]`, distributing the outer loop over
/// candidate factors across `num_threads` worker threads.
///
/// Each worker greedily pulls the next candidate from a shared
/// [`CandidateQueue`] and strikes that candidate's multiples alone. A worker
/// may claim a composite candidate before the worker handling its smallest
/// prime factor has struck it; striking the multiples of a composite is
/// redundant but harmless, since every such multiple is composite anyway.
///
/// If no worker thread can be spawned, the sieve falls back to the
/// sequential variant after a warning instead of failing the run.
pub fn sieve_parallel(bound: u64, num_threads: NonZeroUsize) -> Result<Marking, Error> {
    let marking = Marking::allocate(bound)?;
    let sqrt = floor_sqrt(bound) as usize;
    let queue = CandidateQueue::new(2, sqrt + 1);

    let spawned = fork_join(num_threads, |_id| {
        while let Some(factor) = queue.claim() {
            if marking.is_unmarked(factor) {
                marking.strike_multiples(factor);
            }
        }
    });
    if spawned == 0 {
        log_warn!("No worker threads available; sieving sequentially instead");
        strike_all(&marking);
    }
    Ok(marking)
}
