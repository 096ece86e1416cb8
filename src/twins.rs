// Copyright 2026 The twinsieve authors
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Twin-prime detection over an ordered prime sequence.

use std::io::Write;

/// Collects every adjacent pair of primes differing by exactly 2, in order.
///
/// The input must be strictly increasing, which [`primes`] guarantees: the
/// adjacent-difference check only finds twins in sorted input.
///
/// Pairs are reported in their `(6k - 1, 6k + 1)` form, bracketing a
/// multiple of six. (3, 5) is the lone twin pair not of that form and is not
/// reported; the enumeration starts at (5, 7).
///
/// The scan stays sequential and in-order on purpose. Splitting it across
/// worker threads made the emitted pairs interleave, since the print order
/// became nondeterministic, and serializing each emission behind a lock ran
/// no faster than a single thread. Stages before this one may be parallel;
/// this one may not.
///
/// [`primes`]: crate::FrozenMarking::primes
pub fn twin_pairs(primes: &[u64]) -> Vec<(u64, u64)> {
    primes
        .windows(2)
        .filter(|pair| pair[1] - pair[0] == 2 && pair[0] % 6 == 5)
        .map(|pair| (pair[0], pair[1]))
        .collect()
}

/// Writes the pairs as comma-separated `(p,p+2)` tuples followed by their
/// count, matching the report format scripts already parse.
pub fn write_pairs(pairs: &[(u64, u64)], output: &mut impl Write) -> std::io::Result<()> {
    for (first, second) in pairs {
        write!(output, "({first},{second}), ")?;
    }
    write!(output, "\nCount of Pairs of Twin Primes: {}\n", pairs.len())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn twins_below_30() {
        let primes = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29];
        assert_eq!(twin_pairs(&primes), [(5, 7), (11, 13), (17, 19)]);
    }

    #[test]
    fn twins_below_10() {
        assert_eq!(twin_pairs(&[2, 3, 5, 7]), [(5, 7)]);
    }

    #[test]
    fn no_twins() {
        assert!(twin_pairs(&[]).is_empty());
        assert!(twin_pairs(&[2]).is_empty());
        assert!(twin_pairs(&[2, 7, 23]).is_empty());
    }

    #[test]
    fn three_and_five_are_not_reported() {
        // The only twin pair not bracketing a multiple of six.
        assert_eq!(twin_pairs(&[2, 3, 5, 7, 11]), [(5, 7)]);
    }

    #[test]
    fn non_adjacent_gap_of_two_is_not_a_twin() {
        // 23 and 25 differ by 2 but 25 is absent from the sequence.
        assert_eq!(twin_pairs(&[23, 29, 31]), [(29, 31)]);
    }

    #[test]
    fn pairs_render_in_report_format() {
        let mut output = Vec::new();
        write_pairs(&[(5, 7), (11, 13)], &mut output).unwrap();
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "(5,7), (11,13), \nCount of Pairs of Twin Primes: 2\n"
        );
    }
}
