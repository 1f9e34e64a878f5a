//! Reverse-lexicographic restricted-growth-string enumerators.
//!
//! These walk the same sets of strings as their [`lex`](crate::lex)
//! counterparts but in exactly reversed order: the first string produced is
//! the lexicographically greatest, and a step finds the rightmost position
//! that can be decremented without making the lower bound on distinct
//! values unreachable, decrements it, then refills the suffix with the
//! largest permitted values. The prefix-maximum vector `b` has length
//! `n + 1`, with `b[i + 1]` holding the maximum of `a[0..=i]`.

use crate::{assert_rgs, check_bound, check_len, normalize_counts, BoundsError};

/// Reverse-lexicographic enumerator for distinct-value counts in
/// `kmin..=kmax`. With `kmin = 1, kmax = n` this is the reversal of
/// [`lex::Full`](crate::lex::Full); with `kmin = kmax` the reversal of
/// [`lex::Exact`](crate::lex::Exact).
#[derive(Debug, Clone)]
pub struct Between {
    a: Vec<usize>,
    b: Vec<usize>,
    n: usize,
    kmin: usize,
    kmax: usize,
    first: bool,
}

impl Between {
    pub fn new(n: usize, kmin: usize, kmax: usize) -> Result<Self, BoundsError> {
        check_len(n)?;
        check_bound(kmin, n)?;
        check_bound(kmax, n)?;
        if kmin > kmax {
            return Err(BoundsError::InvertedBounds { lo: kmin, hi: kmax });
        }
        let mut a = vec![0; n];
        let mut b = vec![0; n + 1];
        // Lex-greatest string under the cap: 0, 1, 2, .., then kmax - 1.
        for i in 0..n {
            a[i] = i.min(kmax - 1);
            b[i + 1] = a[i];
        }
        Ok(Self {
            a,
            b,
            n,
            kmin,
            kmax,
            first: true,
        })
    }

    pub fn advance(&mut self) -> Option<&[usize]> {
        if self.first {
            self.first = false;
            return Some(&self.a);
        }
        let n = self.n;
        // A decrement at i is ruled out when a[i] is already zero or when
        // the suffix could no longer supply kmin distinct values.
        let mut i = n - 1;
        while i > 0 && (self.a[i] == 0 || self.kmin > self.b[i] + (n - i)) {
            i -= 1;
        }
        if i == 0 {
            return None;
        }
        self.a[i] -= 1;
        self.b[i + 1] = self.a[i].max(self.b[i]);
        // Climb as fast as the cap allows, then stay at the cap.
        let mut j = i + 1;
        while j < n && self.b[j] < self.kmax - 1 {
            self.a[j] = self.b[j] + 1;
            self.b[j + 1] = self.a[j];
            j += 1;
        }
        while j < n {
            self.a[j] = self.kmax - 1;
            self.b[j + 1] = self.kmax - 1;
            j += 1;
        }
        assert_rgs(&self.a, self.kmax, None);
        debug_assert!(self.b[n] + 1 >= self.kmin);
        Some(&self.a)
    }
}

/// Reverse-lexicographic enumerator for an arbitrary set of allowed
/// distinct-value counts: the exact reversal of
/// [`lex::Discrete`](crate::lex::Discrete).
///
/// Besides `m[v]` (smallest allowed count that is at least `v`, used to
/// keep decrements completable) this needs the reverse table `mr[v]`, the
/// largest allowed count that is at most `v`, which caps the greedy refill
/// of the suffix.
#[derive(Debug, Clone)]
pub struct Discrete {
    a: Vec<usize>,
    b: Vec<usize>,
    counts: Vec<usize>,
    m: Vec<usize>,
    mr: Vec<usize>,
    n: usize,
    kmax: usize,
    first: bool,
}

impl Discrete {
    pub fn new(n: usize, counts: Vec<usize>) -> Result<Self, BoundsError> {
        check_len(n)?;
        let counts = normalize_counts(counts, n)?;
        let kmax = counts[counts.len() - 1];
        let mut a = vec![0; n];
        let mut b = vec![0; n + 1];
        for i in 0..n {
            a[i] = i.min(kmax - 1);
            b[i + 1] = a[i];
        }
        let mut m = vec![0; kmax + 1];
        let mut c = 0;
        for &k in &counts {
            while c < k + 1 {
                m[c] = k;
                c += 1;
            }
        }
        let mut mr = vec![0; kmax + 1];
        for w in counts.windows(2) {
            for v in w[0]..w[1] {
                mr[v] = w[0];
            }
        }
        mr[kmax] = kmax;
        Ok(Self {
            a,
            b,
            counts,
            m,
            mr,
            n,
            kmax,
            first: true,
        })
    }

    pub fn advance(&mut self) -> Option<&[usize]> {
        if self.first {
            self.first = false;
            return Some(&self.a);
        }
        let n = self.n;
        let mut i = n - 1;
        while i > 0 {
            // Maximum of a[0..=i] as it would stand after the decrement.
            let tmp_max = self.a[i].saturating_sub(1).max(self.b[i]);
            let feasible =
                self.a[i] != 0 && self.m[tmp_max + 1] - tmp_max - 1 <= n - i - 1;
            if feasible {
                break;
            }
            i -= 1;
        }
        if i == 0 {
            return None;
        }
        self.a[i] -= 1;
        self.b[i + 1] = self.a[i].max(self.b[i]);
        // The largest allowed count still reachable bounds the refill.
        let max_possible = self.b[i + 1] + n - i;
        let keff = if max_possible >= self.mr.len() {
            self.kmax
        } else {
            self.mr[max_possible]
        };
        let mut j = i + 1;
        while j < n && self.b[j] < keff - 1 {
            self.a[j] = self.b[j] + 1;
            self.b[j + 1] = self.a[j];
            j += 1;
        }
        while j < n {
            self.a[j] = keff - 1;
            self.b[j + 1] = keff - 1;
            j += 1;
        }
        assert_rgs(&self.a, self.kmax, Some(&self.counts));
        Some(&self.a)
    }
}
