//! Antiferromagnetic Heisenberg spin model in the fermionic basis.

use log::info;

use crate::connection::FrmConn;
use crate::exsig::{EX_0000, EX_2200};
use crate::hamiltonian::{FrmHam, TermContribs};
use crate::lattice::Lattice;
use crate::onv::FrmOnv;

/// $$
/// \hat H=J\sum_{\langle x,y\rangle}\hat{\vec S}_x\cdot\hat{\vec S}_y
/// $$
/// expressed over spin orbitals at half filling with one electron per
/// site. The $\hat S^z_x\hat S^z_y$ part is diagonal and the transverse
/// part exchanges the spins on a pair of adjacent, oppositely polarised
/// sites. Such an exchange is a fermionic double excitation, so its
/// element carries the usual antisymmetry phase.
pub struct HeisenbergFrmHam {
    lattice: Lattice,
    j: f64,
    contribs_2200: TermContribs,
}

impl HeisenbergFrmHam {
    /// # Arguments
    /// * __`lattice`__ - Site connectivity. Only adjacency matters here,
    /// the bond phases are ignored.
    /// * __`j`__ - Exchange constant $J$, positive for antiferromagnetic
    /// coupling.
    pub fn new(lattice: Lattice, j: f64) -> Self {
        let mut contribs_2200 = TermContribs::new(EX_2200);
        if j != 0.0 {
            contribs_2200.set_nonzero(EX_0000);
            contribs_2200.set_nonzero(EX_2200);
        }
        info!(
            "Heisenberg Hamiltonian on {} sites with J = {:.6}",
            lattice.nsite(),
            j
        );
        HeisenbergFrmHam {
            lattice,
            j,
            contribs_2200,
        }
    }

    /// Local $2S^z$ of a site, i.e. $n_\uparrow-n_\downarrow$.
    fn sz2(&self, onv: &FrmOnv, isite: usize) -> i32 {
        let nsite = self.lattice.nsite();
        i32::from(onv.get(isite)) - i32::from(onv.get(isite + nsite))
    }

    /// True when the connection exchanges the antiparallel spins of a pair
    /// of adjacent sites.
    fn is_exchange(&self, conn: &FrmConn) -> bool {
        let nsite = self.lattice.nsite();
        let (i, j) = (conn.ann()[0], conn.ann()[1]);
        let (a, b) = (conn.cre()[0], conn.cre()[1]);
        // index lists are sorted, so i and a are the alpha operators
        if i >= nsite || j < nsite || a >= nsite || b < nsite {
            return false;
        }
        // the alpha ann site gains a beta electron and vice versa
        if i + nsite != b || j != a + nsite {
            return false;
        }
        self.lattice.phase(i, a).is_some()
    }
}

impl FrmHam for HeisenbergFrmHam {
    fn nsite(&self) -> usize {
        self.lattice.nsite()
    }

    /// $$
    /// \frac{J}{4}\sum_{\langle x,y\rangle}
    /// (n_{x\uparrow}-n_{x\downarrow})(n_{y\uparrow}-n_{y\downarrow})
    /// $$
    fn get_element_0000(&self, onv: &FrmOnv) -> f64 {
        let mut sum = 0;
        for x in 0..self.lattice.nsite() {
            for adj in self.lattice.adj_row(x) {
                if adj.isite > x {
                    sum += self.sz2(onv, x) * self.sz2(onv, adj.isite);
                }
            }
        }
        0.25 * self.j * f64::from(sum)
    }

    fn get_element_1100(&self, _onv: &FrmOnv, _conn: &FrmConn) -> f64 {
        0.0
    }

    fn get_element_2200(&self, onv: &FrmOnv, conn: &FrmConn) -> f64 {
        if !self.is_exchange(conn) {
            return 0.0;
        }
        let element = 0.5 * self.j;
        if conn.phase(onv) {
            -element
        } else {
            element
        }
    }

    fn contribs_2200(&self) -> Option<&TermContribs> {
        Some(&self.contribs_2200)
    }

    fn lattice(&self) -> Option<&Lattice> {
        Some(&self.lattice)
    }
}
