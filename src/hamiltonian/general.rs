//! Ab-initio fermionic Hamiltonian backed by dense integral arrays.

use log::info;

use crate::connection::FrmConn;
use crate::exsig::{EX_0000, EX_1100, EX_2200};
use crate::hamiltonian::{FrmHam, TermContribs};
use crate::integrals::{Integrals1e, Integrals2e};
use crate::onv::FrmOnv;

/// Fermionic Hamiltonian whose coefficients obey no rule simpler than the
/// arrays themselves: the one- and two-body integrals are stored
/// explicitly over spin orbitals and Slater-Condon contractions are
/// evaluated against the occupied set of the queried ONV.
/// # Usage
/// The integral arrays are populated by the caller (readers for on-disk
/// formats are external collaborators) and handed over at construction,
/// after which they are immutable.
pub struct GeneralFrmHam {
    nsite: usize,
    e_core: f64,
    tmat: Integrals1e,
    umat: Integrals2e,
    contribs_1100: TermContribs,
    contribs_2200: TermContribs,
}

impl GeneralFrmHam {
    /// # Arguments
    /// * __`e_core`__ - Scalar core energy added to every diagonal element.
    /// * __`tmat`__ - One-body integrals $T_{ai}$ over the $2N_s$ spin orbitals.
    /// * __`umat`__ - Two-body integrals $\langle ij\vert ab\rangle$ over the
    /// same spin orbitals.
    pub fn new(e_core: f64, tmat: Integrals1e, umat: Integrals2e) -> Self {
        let norb = tmat.norb();
        debug_assert_eq!(norb, umat.norb(), "integral arrays of unequal basis size");
        debug_assert_eq!(norb % 2, 0, "odd spin orbital count");
        let mut contribs_1100 = TermContribs::new(EX_1100);
        if tmat.any_nonzero_diagonal() {
            contribs_1100.set_nonzero(EX_0000);
        }
        if tmat.any_nonzero_offdiagonal() {
            contribs_1100.set_nonzero(EX_1100);
        }
        let mut contribs_2200 = TermContribs::new(EX_2200);
        if umat.any_nonzero() {
            // scanning the full array for the separate contraction levels
            // is not worth the cost; a nonzero 2-body array is taken to
            // contribute at every level
            contribs_2200.set_nonzero(EX_0000);
            contribs_2200.set_nonzero(EX_1100);
            contribs_2200.set_nonzero(EX_2200);
        }
        info!(
            "General fermion Hamiltonian over {} spin orbitals, core energy {:.6}",
            norb, e_core
        );
        contribs_1100.log("1-body");
        contribs_2200.log("2-body");
        GeneralFrmHam {
            nsite: norb / 2,
            e_core,
            tmat,
            umat,
            contribs_1100,
            contribs_2200,
        }
    }
}

impl FrmHam for GeneralFrmHam {
    fn nsite(&self) -> usize {
        self.nsite
    }

    fn get_coeff_1100(&self, a: usize, i: usize) -> f64 {
        self.tmat.get(a, i)
    }

    fn get_coeff_2200(&self, a: usize, b: usize, i: usize, j: usize) -> f64 {
        self.umat.phys_antisym(a, b, i, j)
    }

    /// $$
    /// E_0=E_\text{core}+\sum_{i\in\text{occ}}T_{ii}
    /// +\sum_{i<j\in\text{occ}}\langle ij\vert\vert ij\rangle
    /// $$
    fn get_element_0000(&self, onv: &FrmOnv) -> f64 {
        let occs = onv.occ_inds();
        let mut element = self.e_core;
        for (n, &i) in occs.iter().enumerate() {
            element += self.tmat.get(i, i);
            for &j in &occs[..n] {
                element += self.umat.phys_antisym(i, j, i, j);
            }
        }
        element
    }

    /// $$
    /// \langle x^a_i\vert\hat H\vert x\rangle=
    /// \pm\left(T_{ai}+\sum_{j\in\text{occ}}\langle aj\vert\vert ij\rangle\right)
    /// $$
    fn get_element_1100(&self, onv: &FrmOnv, conn: &FrmConn) -> f64 {
        debug_assert_eq!(conn.exsig(), EX_1100, "rank mismatch for 1100 query");
        let i = conn.ann()[0];
        let a = conn.cre()[0];
        let mut element = self.tmat.get(a, i);
        for j in onv.occ_inds() {
            if j != i {
                element += self.umat.phys_antisym(a, j, i, j);
            }
        }
        if conn.phase(onv) {
            -element
        } else {
            element
        }
    }

    /// $$
    /// \langle x^{ab}_{ij}\vert\hat H\vert x\rangle=
    /// \pm\langle ab\vert\vert ij\rangle
    /// $$
    fn get_element_2200(&self, onv: &FrmOnv, conn: &FrmConn) -> f64 {
        debug_assert_eq!(conn.exsig(), EX_2200, "rank mismatch for 2200 query");
        let (i, j) = (conn.ann()[0], conn.ann()[1]);
        let (a, b) = (conn.cre()[0], conn.cre()[1]);
        let element = self.umat.phys_antisym(a, b, i, j);
        if conn.phase(onv) {
            -element
        } else {
            element
        }
    }

    fn contribs_1100(&self) -> Option<&TermContribs> {
        Some(&self.contribs_1100)
    }

    fn contribs_2200(&self) -> Option<&TermContribs> {
        Some(&self.contribs_2200)
    }
}
