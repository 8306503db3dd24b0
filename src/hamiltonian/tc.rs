//! Transcorrelated extension of a fermionic Hamiltonian.

use log::info;

use crate::connection::FrmConn;
use crate::hamiltonian::{FrmHam, TermContribs};
use crate::integrals::Integrals3e;
use crate::lattice::Lattice;
use crate::onv::FrmOnv;

/// Similarity transformation $e^{-\tau}\hat He^{\tau}$ of a base
/// Hamiltonian, which terminates at a three-body operator whose
/// coefficients are given by the antisymmetrized elements of the
/// $L$-matrix. The transformed operator is no longer hermitian, so
/// elements of a connection and its reverse generally differ.
///
/// The base Hamiltonian is held by composition: every element query adds
/// the occupied-orbital contractions of the three-body term to the
/// corresponding base element.
pub struct TcFrmHam<H: FrmHam> {
    base: H,
    lmat: Integrals3e,
}

impl<H: FrmHam> TcFrmHam<H> {
    /// # Arguments
    /// * __`base`__ - Untransformed Hamiltonian.
    /// * __`lmat`__ - Three-body coefficients over the $2N_s$ spin
    /// orbitals of the base.
    pub fn new(base: H, lmat: Integrals3e) -> Self {
        debug_assert_eq!(2 * base.nsite(), lmat.norb(), "L-matrix of wrong basis size");
        info!(
            "transcorrelated Hamiltonian over {} spin orbitals",
            lmat.norb()
        );
        TcFrmHam { base, lmat }
    }
}

impl<H: FrmHam> FrmHam for TcFrmHam<H> {
    fn nsite(&self) -> usize {
        self.base.nsite()
    }

    fn get_coeff_1100(&self, a: usize, i: usize) -> f64 {
        self.base.get_coeff_1100(a, i)
    }

    fn get_coeff_2200(&self, a: usize, b: usize, i: usize, j: usize) -> f64 {
        self.base.get_coeff_2200(a, b, i, j)
    }

    fn get_coeff_3300(&self, a: usize, b: usize, c: usize, i: usize, j: usize, k: usize) -> f64 {
        self.lmat.antisym(a, b, c, i, j, k)
    }

    /// Base diagonal plus the full contraction
    /// $\sum_{i<j<k\in\text{occ}}L^{ijk}_{ijk}$.
    fn get_element_0000(&self, onv: &FrmOnv) -> f64 {
        let occs = onv.occ_inds();
        let mut element = self.base.get_element_0000(onv);
        for (n, &k) in occs.iter().enumerate() {
            for (m, &j) in occs[..n].iter().enumerate() {
                for &i in &occs[..m] {
                    element += self.lmat.antisym(i, j, k, i, j, k);
                }
            }
        }
        element
    }

    fn get_element_1100(&self, onv: &FrmOnv, conn: &FrmConn) -> f64 {
        let i = conn.ann()[0];
        let a = conn.cre()[0];
        let occs = onv.occ_inds();
        let mut contraction = 0.0;
        for (n, &k) in occs.iter().enumerate() {
            if k == i {
                continue;
            }
            for &j in &occs[..n] {
                if j == i {
                    continue;
                }
                contraction += self.lmat.antisym(a, j, k, i, j, k);
            }
        }
        if conn.phase(onv) {
            contraction = -contraction;
        }
        self.base.get_element_1100(onv, conn) + contraction
    }

    fn get_element_2200(&self, onv: &FrmOnv, conn: &FrmConn) -> f64 {
        let (i, j) = (conn.ann()[0], conn.ann()[1]);
        let (a, b) = (conn.cre()[0], conn.cre()[1]);
        let mut contraction = 0.0;
        for k in onv.occ_inds() {
            if k != i && k != j {
                contraction += self.lmat.antisym(a, b, k, i, j, k);
            }
        }
        if conn.phase(onv) {
            contraction = -contraction;
        }
        self.base.get_element_2200(onv, conn) + contraction
    }

    fn get_element_3300(&self, onv: &FrmOnv, conn: &FrmConn) -> f64 {
        let (i, j, k) = (conn.ann()[0], conn.ann()[1], conn.ann()[2]);
        let (a, b, c) = (conn.cre()[0], conn.cre()[1], conn.cre()[2]);
        let element = self.lmat.antisym(a, b, c, i, j, k);
        if conn.phase(onv) {
            -element
        } else {
            element
        }
    }

    fn contribs_1100(&self) -> Option<&TermContribs> {
        self.base.contribs_1100()
    }

    fn contribs_2200(&self) -> Option<&TermContribs> {
        self.base.contribs_2200()
    }

    fn lattice(&self) -> Option<&Lattice> {
        self.base.lattice()
    }
}
