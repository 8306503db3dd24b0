//! Integer index maps used throughout the sampling code.

use num::integer::lcm;

/// Number of strictly ordered pairs drawn from $n$ objects.
#[inline(always)]
pub fn npair(n: usize) -> usize {
    (n * n.saturating_sub(1)) / 2
}

/// Flat index of the strictly-lower-triangular pair $(i, j)$ with $i > j$.
/// # Definition
/// $$
/// \text{strig}(i,j)=\frac{i(i-1)}{2}+j
/// $$
#[inline(always)]
pub fn strigmap(i: usize, j: usize) -> usize {
    debug_assert!(j < i, "strict lower triangle requires j < i");
    (i * (i - 1)) / 2 + j
}

/// Inverse of [strigmap]. Returns `(i, j)` with `i > j`.
#[inline(always)]
pub fn inv_strigmap(ij: usize) -> (usize, usize) {
    // Solve i(i-1)/2 <= ij by inverting the quadratic, then correct for
    // floating point error in the isqrt.
    let mut i = ((1.0 + 8.0 * ij as f64).sqrt() as usize + 1) / 2;
    while (i * (i - 1)) / 2 > ij {
        i -= 1;
    }
    while ((i + 1) * i) / 2 <= ij {
        i += 1;
    }
    (i, ij - (i * (i - 1)) / 2)
}

/// Flat index of the rectangular pair $(i, a)$ with row length `ncol`.
#[inline(always)]
pub fn rectmap(i: usize, a: usize, ncol: usize) -> usize {
    i * ncol + a
}

/// Inverse of [rectmap]. Returns `(i, a)`.
#[inline(always)]
pub fn inv_rectmap(ia: usize, ncol: usize) -> (usize, usize) {
    (ia / ncol, ia % ncol)
}

/// Least common multiple of all whole numbers up to and including `n`.
/// The lattice excitation generators use this to fold two correlated
/// uniform draws into a single PRNG call.
pub fn lcm_le(n: usize) -> usize {
    (1..=n.max(1)).fold(1usize, lcm)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn strig_round_trip() {
        let mut ij = 0;
        for i in 1..40 {
            for j in 0..i {
                assert_eq!(strigmap(i, j), ij);
                assert_eq!(inv_strigmap(ij), (i, j));
                ij += 1;
            }
        }
        assert_eq!(ij, npair(40));
    }

    #[test]
    fn rect_round_trip() {
        for i in 0..13 {
            for a in 0..7 {
                assert_eq!(inv_rectmap(rectmap(i, a, 7), 7), (i, a));
            }
        }
    }

    #[test]
    fn lcm_le_values() {
        assert_eq!(lcm_le(0), 1);
        assert_eq!(lcm_le(1), 1);
        assert_eq!(lcm_le(4), 12);
        assert_eq!(lcm_le(6), 60);
        // every count below the bound divides the lcm
        for nadj in 1..=6 {
            assert_eq!(lcm_le(6) % nadj, 0);
        }
    }
}
