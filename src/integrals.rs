//! Dense coefficient stores for ab-initio and transcorrelated Hamiltonians.
//!
//! The arrays are populated by the caller (file readers are external
//! collaborators) and are read-only for the lifetime of a run once the
//! owning Hamiltonian has been constructed, which is what permits
//! lock-free concurrent evaluation.

/// One-body coefficients $T_{ai}$ over spin orbitals.
#[derive(Debug, Clone)]
pub struct Integrals1e {
    norb: usize,
    data: Vec<f64>,
}

impl Integrals1e {
    pub fn new(norb: usize) -> Self {
        Integrals1e {
            norb,
            data: vec![0.0; norb * norb],
        }
    }

    #[inline(always)]
    pub fn norb(&self) -> usize {
        self.norb
    }

    #[inline(always)]
    pub fn get(&self, a: usize, i: usize) -> f64 {
        self.data[a * self.norb + i]
    }

    /// Set the element and its Hermitian partner.
    pub fn set(&mut self, a: usize, i: usize, value: f64) {
        self.data[a * self.norb + i] = value;
        self.data[i * self.norb + a] = value;
    }

    pub fn any_nonzero_diagonal(&self) -> bool {
        (0..self.norb).any(|i| self.get(i, i) != 0.0)
    }

    pub fn any_nonzero_offdiagonal(&self) -> bool {
        (0..self.norb).any(|a| (0..a).any(|i| self.get(a, i) != 0.0))
    }
}

/// Two-body coefficients in physicists' notation $\langle ij\vert ab\rangle$
/// over spin orbitals, with the antisymmetrized combination
/// $\langle ij\vert\vert ab\rangle=\langle ij\vert ab\rangle-\langle ij\vert ba\rangle$
/// exposed for matrix elements and heat-bath weights.
#[derive(Debug, Clone)]
pub struct Integrals2e {
    norb: usize,
    data: Vec<f64>,
}

impl Integrals2e {
    pub fn new(norb: usize) -> Self {
        Integrals2e {
            norb,
            data: vec![0.0; norb * norb * norb * norb],
        }
    }

    #[inline(always)]
    pub fn norb(&self) -> usize {
        self.norb
    }

    #[inline(always)]
    fn flat(&self, i: usize, j: usize, a: usize, b: usize) -> usize {
        ((i * self.norb + j) * self.norb + a) * self.norb + b
    }

    #[inline(always)]
    pub fn get(&self, i: usize, j: usize, a: usize, b: usize) -> f64 {
        self.data[self.flat(i, j, a, b)]
    }

    /// Set $\langle ij\vert ab\rangle$ together with its index-symmetry
    /// partners (real orbitals assumed).
    pub fn set(&mut self, i: usize, j: usize, a: usize, b: usize, value: f64) {
        // <ij|ab> = <ji|ba> = <ab|ij> = <ba|ji>
        for (p, q, r, s) in [(i, j, a, b), (j, i, b, a), (a, b, i, j), (b, a, j, i)] {
            let flat = self.flat(p, q, r, s);
            self.data[flat] = value;
        }
    }

    /// Antisymmetrized element $\langle ij\vert\vert ab\rangle$.
    #[inline(always)]
    pub fn phys_antisym(&self, i: usize, j: usize, a: usize, b: usize) -> f64 {
        self.get(i, j, a, b) - self.get(i, j, b, a)
    }

    pub fn any_nonzero(&self) -> bool {
        self.data.iter().any(|&v| v != 0.0)
    }
}

/// Three-body coefficients $L_{aibjck}$ for transcorrelated terms, stored
/// as the raw pair-symmetric tensor with the fully antisymmetrized
/// 6-permutation combination computed on access.
#[derive(Debug, Clone)]
pub struct Integrals3e {
    norb: usize,
    data: Vec<f64>,
}

impl Integrals3e {
    pub fn new(norb: usize) -> Self {
        Integrals3e {
            norb,
            data: vec![0.0; norb.pow(6)],
        }
    }

    #[inline(always)]
    pub fn norb(&self) -> usize {
        self.norb
    }

    #[inline(always)]
    fn flat(&self, a: usize, i: usize, b: usize, j: usize, c: usize, k: usize) -> usize {
        let n = self.norb;
        ((((a * n + i) * n + b) * n + j) * n + c) * n + k
    }

    #[inline(always)]
    pub fn get(&self, a: usize, i: usize, b: usize, j: usize, c: usize, k: usize) -> f64 {
        self.data[self.flat(a, i, b, j, c, k)]
    }

    /// Set $L_{ai,bj,ck}$ together with its pair-permutation partners.
    pub fn set(&mut self, a: usize, i: usize, b: usize, j: usize, c: usize, k: usize, value: f64) {
        let pairs = [(a, i), (b, j), (c, k)];
        // symmetric under any permutation of the (cre, ann) index pairs
        for perm in PERMS3 {
            let (p0, p1, p2) = (pairs[perm[0]], pairs[perm[1]], pairs[perm[2]]);
            let flat = self.flat(p0.0, p0.1, p1.0, p1.1, p2.0, p2.1);
            self.data[flat] = value;
        }
    }

    /// Fully antisymmetrized element: the signed sum over the six
    /// assignments of the annihilation triple to the creation triple.
    pub fn antisym(&self, a: usize, b: usize, c: usize, i: usize, j: usize, k: usize) -> f64 {
        let anns = [i, j, k];
        let mut out = 0.0;
        for (iperm, perm) in PERMS3.iter().enumerate() {
            let sign = if PERM3_ODD[iperm] { -1.0 } else { 1.0 };
            out += sign * self.get(a, anns[perm[0]], b, anns[perm[1]], c, anns[perm[2]]);
        }
        out
    }

    pub fn any_nonzero(&self) -> bool {
        self.data.iter().any(|&v| v != 0.0)
    }
}

const PERMS3: [[usize; 3]; 6] = [
    [0, 1, 2],
    [1, 2, 0],
    [2, 0, 1],
    [0, 2, 1],
    [1, 0, 2],
    [2, 1, 0],
];
const PERM3_ODD: [bool; 6] = [false, false, false, true, true, true];

#[cfg(test)]
mod test {
    use super::*;
    use assert::close;

    #[test]
    fn one_body_symmetry() {
        let mut t = Integrals1e::new(4);
        t.set(0, 2, -1.5);
        close(t.get(2, 0), -1.5, 1e-15);
        assert!(t.any_nonzero_offdiagonal());
        assert!(!t.any_nonzero_diagonal());
    }

    #[test]
    fn two_body_symmetry_and_antisym() {
        let mut u = Integrals2e::new(4);
        u.set(0, 1, 2, 3, 0.25);
        close(u.get(1, 0, 3, 2), 0.25, 1e-15);
        close(u.get(2, 3, 0, 1), 0.25, 1e-15);
        close(u.phys_antisym(0, 1, 2, 3), 0.25, 1e-15);
        u.set(0, 1, 3, 2, 0.1);
        close(u.phys_antisym(0, 1, 2, 3), 0.15, 1e-15);
        close(u.phys_antisym(0, 1, 3, 2), -0.15, 1e-15);
    }

    #[test]
    fn three_body_antisym_alternates() {
        let mut l = Integrals3e::new(3);
        l.set(0, 0, 1, 1, 2, 2, 1.0);
        // swapping two annihilation indices flips the sign
        close(
            l.antisym(0, 1, 2, 0, 1, 2),
            -l.antisym(0, 1, 2, 1, 0, 2),
            1e-15,
        );
        // repeated annihilation index vanishes
        close(l.antisym(0, 1, 2, 0, 0, 2), 0.0, 1e-15);
    }
}
