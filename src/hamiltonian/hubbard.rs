//! Single-band Hubbard model on an arbitrary lattice.

use log::info;

use crate::connection::FrmConn;
use crate::exsig::{EX_0000, EX_1100, EX_2200};
use crate::hamiltonian::{FrmHam, TermContribs};
use crate::lattice::Lattice;
use crate::onv::FrmOnv;

/// $$
/// \hat H=-t\sum_{\langle x,y\rangle\sigma}
/// \hat c^\dagger_{x\sigma}\hat c_{y\sigma}
/// +U\sum_x\hat n_{x\uparrow}\hat n_{x\downarrow}
/// $$
/// The hopping coefficient between adjacent sites carries the lattice bond
/// phase, so antiperiodic boundary conditions are expressed in the lattice
/// rather than here. The on-site repulsion is purely diagonal, so the only
/// off-diagonal matrix elements are spin-conserving singles between
/// adjacent sites.
pub struct HubbardFrmHam {
    lattice: Lattice,
    u: f64,
    t: f64,
    contribs_1100: TermContribs,
    contribs_2200: TermContribs,
}

impl HubbardFrmHam {
    /// # Arguments
    /// * __`lattice`__ - Site connectivity with bond phases.
    /// * __`u`__ - On-site repulsion $U$.
    /// * __`t`__ - Hopping amplitude $t$.
    pub fn new(lattice: Lattice, u: f64, t: f64) -> Self {
        let mut contribs_1100 = TermContribs::new(EX_1100);
        if t != 0.0 {
            contribs_1100.set_nonzero(EX_1100);
        }
        let mut contribs_2200 = TermContribs::new(EX_2200);
        if u != 0.0 {
            contribs_2200.set_nonzero(EX_0000);
        }
        info!(
            "Hubbard Hamiltonian on {} sites with U = {:.6}, t = {:.6}",
            lattice.nsite(),
            u,
            t
        );
        HubbardFrmHam {
            lattice,
            u,
            t,
            contribs_1100,
            contribs_2200,
        }
    }
}

impl FrmHam for HubbardFrmHam {
    fn nsite(&self) -> usize {
        self.lattice.nsite()
    }

    /// Nonzero only when `a` and `i` share a spin and their sites are
    /// adjacent, in which case the value is $-t$ times the bond phase.
    fn get_coeff_1100(&self, a: usize, i: usize) -> f64 {
        let nsite = self.lattice.nsite();
        if (a < nsite) != (i < nsite) {
            return 0.0;
        }
        match self.lattice.phase(i % nsite, a % nsite) {
            Some(phase) => -self.t * f64::from(phase),
            None => 0.0,
        }
    }

    /// $U$ times the number of doubly occupied sites.
    fn get_element_0000(&self, onv: &FrmOnv) -> f64 {
        self.u * onv.doubly_occ_sites().len() as f64
    }

    fn get_element_1100(&self, onv: &FrmOnv, conn: &FrmConn) -> f64 {
        let element = self.get_coeff_1100(conn.cre()[0], conn.ann()[0]);
        if conn.phase(onv) {
            -element
        } else {
            element
        }
    }

    fn get_element_2200(&self, _onv: &FrmOnv, _conn: &FrmConn) -> f64 {
        0.0
    }

    fn contribs_1100(&self) -> Option<&TermContribs> {
        Some(&self.contribs_1100)
    }

    fn contribs_2200(&self) -> Option<&TermContribs> {
        Some(&self.contribs_2200)
    }

    fn lattice(&self) -> Option<&Lattice> {
        Some(&self.lattice)
    }
}
