//! Alias-method sampling of discrete weighted distributions.
//!
//! O(n) preprocessing of a non-negative weight vector into a table that
//! supports O(1) draws with no retries. Heat-bath excitation generators
//! build one table per occupied-pair label at construction time and only
//! read them afterwards, so draws need no synchronization.

use derive_more::{Constructor, Error};
use rand::Rng;

type Result<T> = std::result::Result<T, AliasError>;

/// Error in the construction of an alias table.
#[derive(Debug, Clone, Error, Constructor)]
pub struct AliasError {
    pub details: String,
}

impl std::fmt::Display for AliasError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "alias table construction error: {}", self.details)
    }
}

/// Alias table over a single weighted distribution.
/// # Definition
/// Two parallel arrays of length $n$: a cutoff probability and an alias
/// index per bin, built by the standard two-pointer overfull/underfull
/// algorithm. A draw selects a bin uniformly, then returns either the bin
/// or its alias according to a uniform real compared against the cutoff.
/// The un-normalized weight sum is retained so callers can reconstruct
/// $P(i) = w_i / \text{norm}$ without re-deriving it.
#[derive(Debug, Clone)]
pub struct Aliaser {
    prob: Vec<f64>,
    alias: Vec<usize>,
    norm: f64,
}

impl Aliaser {
    /// Build from non-negative, not necessarily normalized weights.
    /// # Arguments
    /// * __`weights`__ - One non-negative weight per outcome.
    ///
    /// An empty or all-zero weight vector has no valid outcome and is
    /// reported as an error rather than silently producing a table that
    /// always returns index 0 with a misleading nonzero probability.
    pub fn new(weights: &[f64]) -> Result<Aliaser> {
        let norm: f64 = weights.iter().sum();
        if weights.is_empty() || norm <= 0.0 {
            return Err(AliasError::new(
                "all-zero weight vector: no valid outcome to sample".to_owned(),
            ));
        }
        let n = weights.len();
        let mut prob = vec![0.0; n];
        let mut alias = vec![0usize; n];
        // scaled weights: mean 1 per bin
        let mut scaled: Vec<f64> = weights.iter().map(|w| w * n as f64 / norm).collect();
        let mut small: Vec<usize> = Vec::with_capacity(n);
        let mut large: Vec<usize> = Vec::with_capacity(n);
        for (i, &s) in scaled.iter().enumerate() {
            debug_assert!(s >= 0.0, "negative weight");
            if s < 1.0 {
                small.push(i);
            } else {
                large.push(i);
            }
        }
        while let (Some(&s), Some(&l)) = (small.last(), large.last()) {
            small.pop();
            prob[s] = scaled[s];
            alias[s] = l;
            scaled[l] = (scaled[l] + scaled[s]) - 1.0;
            if scaled[l] < 1.0 {
                large.pop();
                small.push(l);
            }
        }
        // remaining bins are exactly full up to rounding
        for &l in &large {
            prob[l] = 1.0;
        }
        for &s in &small {
            prob[s] = 1.0;
        }
        Ok(Aliaser { prob, alias, norm })
    }

    #[inline(always)]
    pub fn nprob(&self) -> usize {
        self.prob.len()
    }

    /// Un-normalized total weight.
    #[inline(always)]
    pub fn norm(&self) -> f64 {
        self.norm
    }

    /// Draw an outcome index in O(1): one uniform integer, one uniform
    /// real, no retries.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        let bin = rng.gen_range(0..self.prob.len());
        if rng.gen::<f64>() < self.prob[bin] {
            bin
        } else {
            self.alias[bin]
        }
    }

    /// Cutoff probability of one bin, for table-validity checks.
    pub fn prob_entry(&self, i: usize) -> f64 {
        self.prob[i]
    }

    /// Alias index of one bin, for table-validity checks.
    pub fn alias_entry(&self, i: usize) -> usize {
        self.alias[i]
    }
}

/// A family of independent alias tables sharing a common row length, one
/// per label (e.g. one per occupied orbital pair).
/// # Usage
/// Rows are populated collectively via [MultiAliaser::update] during the
/// one-time setup step, then the structure is immutable. Rows whose weight
/// vector is all zero are left empty and report `norm() == 0`: at draw
/// time such a row has no valid target and the caller emits a null
/// excitation instead of drawing. The distribution of the (potentially
/// expensive) weight computation across processes is the concern of an
/// external collaborator; this structure only holds the resulting tables.
#[derive(Debug, Clone)]
pub struct MultiAliaser {
    rows: Vec<Option<Aliaser>>,
    nind: usize,
}

impl MultiAliaser {
    pub fn new(nrow: usize, nind: usize) -> Self {
        MultiAliaser {
            rows: vec![None; nrow],
            nind,
        }
    }

    #[inline(always)]
    pub fn nrow(&self) -> usize {
        self.rows.len()
    }

    /// Rebuild one row from a weight vector. All-zero rows are recorded as
    /// having no valid targets.
    pub fn update(&mut self, irow: usize, weights: &[f64]) {
        debug_assert_eq!(weights.len(), self.nind, "weight vector length mismatch");
        self.rows[irow] = Aliaser::new(weights).ok();
    }

    /// Replace every row at once; used by parallel construction.
    pub fn set_rows(&mut self, rows: Vec<Option<Aliaser>>) {
        debug_assert_eq!(rows.len(), self.rows.len(), "row count mismatch");
        self.rows = rows;
    }

    /// Un-normalized weight sum of one row, 0 when the row has no valid
    /// targets.
    #[inline(always)]
    pub fn norm(&self, irow: usize) -> f64 {
        self.rows[irow].as_ref().map_or(0.0, |a| a.norm())
    }

    pub fn draw<R: Rng + ?Sized>(&self, irow: usize, rng: &mut R) -> usize {
        self.rows[irow]
            .as_ref()
            .expect("drawing from a row with no valid targets")
            .draw(rng)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use assert::close;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn rejects_all_zero_weights() {
        assert!(Aliaser::new(&[]).is_err());
        assert!(Aliaser::new(&[0.0, 0.0, 0.0]).is_err());
        assert!(Aliaser::new(&[0.0, 1.0e-300, 0.0]).is_ok());
    }

    #[test]
    fn table_is_valid() {
        let w = [0.1, 0.0, 3.2, 1.7, 0.4, 0.4, 2.2];
        let a = Aliaser::new(&w).unwrap();
        close(a.norm(), w.iter().sum::<f64>(), 1e-14);
        for i in 0..a.nprob() {
            assert!(a.alias_entry(i) < w.len());
            assert!((0.0..=1.0 + 1e-12).contains(&a.prob_entry(i)));
        }
    }

    #[test]
    fn empirical_frequencies_converge() {
        let w = [1.0, 2.0, 0.0, 4.0, 0.5];
        let a = Aliaser::new(&w).unwrap();
        let mut rng = SmallRng::seed_from_u64(42);
        const NDRAW: usize = 1_000_000;
        let mut counts = [0usize; 5];
        for _ in 0..NDRAW {
            counts[a.draw(&mut rng)] += 1;
        }
        assert_eq!(counts[2], 0);
        for i in 0..w.len() {
            let expect = w[i] / a.norm();
            let freq = counts[i] as f64 / NDRAW as f64;
            // statistical tolerance ~ 5 / sqrt(N)
            close(freq, expect, 5.0 / (NDRAW as f64).sqrt());
        }
    }

    #[test]
    fn multi_rows_independent() {
        let mut multi = MultiAliaser::new(3, 4);
        multi.update(0, &[1.0, 0.0, 0.0, 1.0]);
        multi.update(1, &[0.0; 4]);
        multi.update(2, &[0.0, 5.0, 0.0, 0.0]);
        assert!(multi.norm(1) == 0.0);
        close(multi.norm(0), 2.0, 1e-14);
        let mut rng = SmallRng::seed_from_u64(3);
        for _ in 0..100 {
            let d = multi.draw(0, &mut rng);
            assert!(d == 0 || d == 3);
            assert_eq!(multi.draw(2, &mut rng), 1);
        }
    }
}
