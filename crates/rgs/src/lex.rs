//! Lexicographic restricted-growth-string enumerators.
//!
//! All five enumerators share one skeleton: keep the current vector `a`
//! together with a prefix-maximum vector `b` (`b[i]` is the maximum of
//! `a[0..i]`), scan from the right for the last position that can still be
//! incremented, increment it, and refill the suffix with the smallest legal
//! values. The variants differ only in the cap applied to each `a[i]`, in
//! the initial tail needed to satisfy a lower bound on the number of
//! distinct values, and in how the suffix refill keeps that lower bound
//! reachable.

use crate::{assert_rgs, check_bound, check_len, normalize_counts, BoundsError};

/// Enumerates every restricted-growth string of a given length, starting
/// from the all-zero vector. The number of strings produced is the Bell
/// number of the length.
#[derive(Debug, Clone)]
pub struct Full {
    a: Vec<usize>,
    b: Vec<usize>,
    n: usize,
    first: bool,
}

impl Full {
    pub fn new(n: usize) -> Result<Self, BoundsError> {
        check_len(n)?;
        Ok(Self {
            a: vec![0; n],
            b: vec![0; n],
            n,
            first: true,
        })
    }

    /// Steps to the next string, returning `None` forever once the
    /// lexicographically greatest string has been produced.
    pub fn advance(&mut self) -> Option<&[usize]> {
        if self.first {
            self.first = false;
            return Some(&self.a);
        }
        let n = self.n;
        let mut i = n - 1;
        while i > 0 && (self.a[i] == n - 1 || self.a[i] > self.b[i]) {
            i -= 1;
        }
        if i == 0 {
            return None;
        }
        self.a[i] += 1;
        for j in i + 1..n {
            self.a[j] = 0;
            self.b[j] = self.b[j - 1].max(self.a[j - 1]);
        }
        assert_rgs(&self.a, n, None);
        Some(&self.a)
    }
}

/// Enumerates the restricted-growth strings with at most `k` distinct
/// values: identical to [`Full`] except that every slot is capped at
/// `k - 1`.
#[derive(Debug, Clone)]
pub struct AtMost {
    a: Vec<usize>,
    b: Vec<usize>,
    n: usize,
    k: usize,
    first: bool,
}

impl AtMost {
    pub fn new(n: usize, k: usize) -> Result<Self, BoundsError> {
        check_len(n)?;
        check_bound(k, n)?;
        Ok(Self {
            a: vec![0; n],
            b: vec![0; n],
            n,
            k,
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
        while i > 0 && (self.a[i] == self.k - 1 || self.a[i] > self.b[i]) {
            i -= 1;
        }
        if i == 0 {
            return None;
        }
        self.a[i] += 1;
        for j in i + 1..n {
            self.a[j] = 0;
            self.b[j] = self.b[j - 1].max(self.a[j - 1]);
        }
        assert_rgs(&self.a, self.k, None);
        Some(&self.a)
    }
}

/// Enumerates the restricted-growth strings with exactly `k` distinct
/// values by walking the at-most-`k` sequence and skipping the strings
/// that fall short. The skipped prefixes are still visited, so a step is
/// only amortized constant time, matching the at-most enumerator overall.
#[derive(Debug, Clone)]
pub struct Exact {
    a: Vec<usize>,
    b: Vec<usize>,
    n: usize,
    k: usize,
    first: bool,
}

impl Exact {
    pub fn new(n: usize, k: usize) -> Result<Self, BoundsError> {
        check_len(n)?;
        check_bound(k, n)?;
        let mut a = vec![0; n];
        let mut b = vec![0; n];
        // Lex-least string with k blocks: zeros, then the tail 1, 2, .., k-1.
        let mut i = n - 1;
        while i > n - k {
            a[i] = k + i - n;
            b[i] = k + i - n - 1;
            i -= 1;
        }
        Ok(Self {
            a,
            b,
            n,
            k,
            first: true,
        })
    }

    pub fn advance(&mut self) -> Option<&[usize]> {
        if self.first {
            self.first = false;
            return Some(&self.a);
        }
        let n = self.n;
        loop {
            let mut i = n - 1;
            while i > 0 && (self.a[i] == self.k - 1 || self.a[i] > self.b[i]) {
                i -= 1;
            }
            if i == 0 {
                return None;
            }
            self.a[i] += 1;
            for j in i + 1..n {
                self.a[j] = 0;
                self.b[j] = self.b[j - 1].max(self.a[j - 1]);
            }
            if self.a[n - 1].max(self.b[n - 1]) == self.k - 1 {
                break;
            }
        }
        assert_rgs(&self.a, self.k, None);
        Some(&self.a)
    }
}

/// Enumerates the restricted-growth strings whose distinct-value count
/// lies in `kmin..=kmax`.
///
/// Unlike [`Exact`], no skipping happens: after an increment the suffix is
/// refilled with as many zeros as the lower bound allows, followed by the
/// smallest values that still reach `kmin` distinct values by the end.
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
        let mut b = vec![0; n];
        let mut i = n - 1;
        while i > n - kmin {
            a[i] = kmin + i - n;
            b[i] = kmin + i - n - 1;
            i -= 1;
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
        let mut i = n - 1;
        while i > 0 && (self.a[i] == self.kmax - 1 || self.a[i] > self.b[i]) {
            i -= 1;
        }
        if i == 0 {
            return None;
        }
        self.a[i] += 1;
        // Zeros we can afford before the suffix must start climbing
        // towards kmin - 1.
        let mut zeros = (self.a[i].max(self.b[i]) + n - i).saturating_sub(self.kmin);
        let mut j = i + 1;
        while zeros > 0 && j < n {
            self.a[j] = 0;
            self.b[j] = self.b[j - 1].max(self.a[j - 1]);
            j += 1;
            zeros -= 1;
        }
        while j < n {
            self.a[j] = self.b[j - 1].max(self.a[j - 1]) + 1;
            self.b[j] = self.b[j - 1].max(self.a[j - 1]);
            j += 1;
        }
        assert_rgs(&self.a, self.kmax, None);
        Some(&self.a)
    }
}

/// Enumerates the restricted-growth strings whose distinct-value count is
/// a member of an arbitrary allowed set.
///
/// `m[v]` is the smallest allowed count that is at least `v`; the backward
/// scan consults it to reject increments whose suffix cannot be completed
/// into an allowed count, and the suffix refill uses it to budget the
/// leading zeros. The prefix-maximum vector has one extra slot here,
/// `b[i + 1]` holding the maximum of `a[0..=i]`.
#[derive(Debug, Clone)]
pub struct Discrete {
    a: Vec<usize>,
    b: Vec<usize>,
    counts: Vec<usize>,
    m: Vec<usize>,
    n: usize,
    kmax: usize,
    first: bool,
}

impl Discrete {
    /// Builds the enumerator for the allowed counts in `counts`, which may
    /// arrive unsorted and with duplicates; both are normalised away.
    pub fn new(n: usize, counts: Vec<usize>) -> Result<Self, BoundsError> {
        check_len(n)?;
        let counts = normalize_counts(counts, n)?;
        let kmin = counts[0];
        let kmax = counts[counts.len() - 1];
        let mut a = vec![0; n];
        let mut b = vec![0; n + 1];
        let mut i = n - 1;
        while i > n - kmin {
            a[i] = kmin + i - n;
            b[i] = kmin + i - n - 1;
            i -= 1;
        }
        let mut m = vec![0; kmax + 1];
        let mut c = 0;
        for &k in &counts {
            while c < k + 1 {
                m[c] = k;
                c += 1;
            }
        }
        Ok(Self {
            a,
            b,
            counts,
            m,
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
            // Maximum of a[0..=i] as it would stand after the increment.
            let tmp_max = (self.a[i] + 1).max(self.b[i]);
            let feasible = self.a[i] != self.kmax - 1
                && self.m[tmp_max + 1] - tmp_max - 1 <= n - i - 1
                && self.a[i] <= self.b[i];
            if feasible {
                break;
            }
            i -= 1;
        }
        if i == 0 {
            return None;
        }
        self.a[i] += 1;
        self.b[i + 1] = self.a[i].max(self.b[i]);
        let mut zeros = self.b[i + 1] + n - i - self.m[self.b[i + 1] + 1];
        let mut j = i + 1;
        while zeros > 0 && j < n {
            self.a[j] = 0;
            self.b[j + 1] = self.b[j];
            j += 1;
            zeros -= 1;
        }
        while j < n {
            self.a[j] = self.b[j] + 1;
            self.b[j + 1] = self.a[j];
            j += 1;
        }
        assert_rgs(&self.a, self.kmax, Some(&self.counts));
        Some(&self.a)
    }
}
