// Copyright 2026 The twinsieve authors
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Worker-thread machinery for the parallel sieving phase.
//!
//! The pool is deliberately minimal: the sieve runs exactly one fork-join
//! round, so there is no round signalling between rounds. Spawning the scoped
//! workers is the fork; the end of the scope is the join barrier, and nothing
//! reads the marking before every worker has exited.

use crate::macros::{log_debug, log_warn};
use crossbeam_utils::CachePadded;
// Platforms that support `libc::sched_setaffinity()`.
#[cfg(all(
    not(miri),
    any(
        target_os = "android",
        target_os = "dragonfly",
        target_os = "freebsd",
        target_os = "linux"
    )
))]
use nix::{
    sched::{sched_setaffinity, CpuSet},
    unistd::Pid,
};
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicUsize, Ordering};

/// A shared queue of outer-loop candidate factors, handed out greedily.
///
/// Workloads shrink as the candidate grows (a larger factor has fewer
/// multiples below the bound), so a static split of the candidate range would
/// leave the workers owning the small candidates still striking multiples
/// while the rest sit idle at the barrier. Instead, each worker claims the
/// next unprocessed candidate as soon as it finishes its previous one.
pub(crate) struct CandidateQueue {
    /// Next candidate not yet claimed by any worker.
    next: CachePadded<AtomicUsize>,
    /// One past the last candidate to process.
    end: usize,
}

impl CandidateQueue {
    /// Creates a queue over the candidates in `start..end`.
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            next: CachePadded::new(AtomicUsize::new(start)),
            end,
        }
    }

    /// Claims the next candidate, or [`None`] once the range is exhausted.
    ///
    /// Relaxed ordering is sufficient: the counter is the only coordination
    /// between workers, and no worker ever observes another worker's claim.
    pub fn claim(&self) -> Option<usize> {
        let candidate = self.next.fetch_add(1, Ordering::Relaxed);
        if candidate < self.end {
            Some(candidate)
        } else {
            None
        }
    }
}

/// Runs `work` on up to `num_threads` scoped worker threads and joins them
/// all before returning.
///
/// Returns the number of workers that were actually spawned. A failed spawn
/// is logged and skipped: the remaining workers drain the whole queue anyway
/// under greedy assignment. A return value of zero means no parallelism is
/// available at all and the caller should fall back to its sequential path.
pub(crate) fn fork_join(num_threads: NonZeroUsize, work: impl Fn(usize) + Sync) -> usize {
    let work = &work;
    let mut spawned = 0;
    std::thread::scope(|scope| {
        for id in 0..num_threads.get() {
            let builder = std::thread::Builder::new().name(format!("twinsieve-worker-{id}"));
            match builder.spawn_scoped(scope, move || {
                pin_to_cpu(id);
                work(id);
                log_debug!("[worker {id}] Finished, waiting at the barrier");
            }) {
                Ok(_handle) => spawned += 1,
                Err(_e) => log_warn!("Failed to spawn worker thread #{id}: {_e}"),
            }
        }
        // All handles are joined when the scope exits: this is the fork-join
        // barrier after which the marking may be read.
    });
    spawned
}

/// Pins the current thread to the CPU with the given index.
#[cfg(all(
    not(miri),
    any(
        target_os = "android",
        target_os = "dragonfly",
        target_os = "freebsd",
        target_os = "linux"
    )
))]
fn pin_to_cpu(id: usize) {
    let mut cpu_set = CpuSet::new();
    if let Err(_e) = cpu_set.set(id) {
        log_warn!("Failed to set CPU affinity for thread #{id}: {_e}");
    } else if let Err(_e) = sched_setaffinity(Pid::from_raw(0), &cpu_set) {
        log_warn!("Failed to set CPU affinity for thread #{id}: {_e}");
    } else {
        log_debug!("Pinned thread #{id} to CPU #{id}");
    }
}

/// Pinning threads to CPUs is not implemented on this platform.
#[cfg(any(
    miri,
    not(any(
        target_os = "android",
        target_os = "dragonfly",
        target_os = "freebsd",
        target_os = "linux"
    ))
))]
fn pin_to_cpu(_id: usize) {}

#[cfg(test)]
mod test {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn queue_hands_out_each_candidate_once() {
        let queue = CandidateQueue::new(2, 1_000);
        let claimed = Mutex::new(Vec::new());

        let spawned = fork_join(NonZeroUsize::try_from(4).unwrap(), |_id| {
            let mut local = Vec::new();
            while let Some(candidate) = queue.claim() {
                local.push(candidate);
            }
            claimed.lock().unwrap().append(&mut local);
        });
        assert_eq!(spawned, 4);

        let mut claimed = claimed.into_inner().unwrap();
        claimed.sort_unstable();
        assert_eq!(claimed, (2..1_000).collect::<Vec<usize>>());
    }

    #[test]
    fn empty_queue_yields_nothing() {
        let queue = CandidateQueue::new(2, 2);
        assert_eq!(queue.claim(), None);
        assert_eq!(queue.claim(), None);
    }

    #[test]
    fn inverted_queue_yields_nothing() {
        // A bound below 4 has no candidate factors at all.
        let queue = CandidateQueue::new(2, 1);
        assert_eq!(queue.claim(), None);
    }

    #[test]
    fn fork_join_runs_every_worker() {
        let ran = Mutex::new([false; 6]);
        let spawned = fork_join(NonZeroUsize::try_from(6).unwrap(), |id| {
            ran.lock().unwrap()[id] = true;
        });
        assert_eq!(spawned, 6);
        assert_eq!(ran.into_inner().unwrap(), [true; 6]);
    }
}
