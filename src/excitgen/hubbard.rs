//! Lattice hopping excitation generation.

use rand::Rng;

use crate::connection::FrmConn;
use crate::excitgen::FrmExcitGen;
use crate::exsig::{Exsig, EX_1100};
use crate::hamiltonian::FrmHam;
use crate::lattice::Lattice;
use crate::onv::FrmOnv;

/// Uniform hopping generator for lattice Hamiltonians whose only single
/// excitations are nearest-neighbor hops.
/// # Definition
/// An electron is selected uniformly, then a destination uniformly among
/// the adjacent sites vacant in the electron's spin channel, so
///
/// $$
/// p(x^a_i\vert x)=\frac{1}{N_en^i_\text{vac-adj}}
/// $$
///
/// Both selections are folded into one random integer: the draw is taken
/// in $\[0,N_eL)$ where $L$ is the least common multiple of all integers
/// up to the maximum coordination number. The quotient by $L$ selects the
/// electron and the remainder, reduced modulo the number of valid
/// destinations, selects the hop. Since every possible destination count
/// divides $L$, the reduction is exactly uniform.
pub struct HubbardUniform<'a> {
    ham: &'a dyn FrmHam,
    lattice: &'a Lattice,
}

impl<'a> HubbardUniform<'a> {
    /// # Arguments
    /// * __`ham`__ - Lattice model Hamiltonian; must expose its lattice.
    pub fn new(ham: &'a dyn FrmHam) -> Self {
        let lattice = ham
            .lattice()
            .expect("hopping generator requires a lattice Hamiltonian");
        HubbardUniform { ham, lattice }
    }

    /// Adjacent sites of `isite` vacant in the `ispinorb`'s channel,
    /// reported as destination spin orbitals.
    fn valid_dests(&self, src: &FrmOnv, ispinorb: usize) -> Vec<usize> {
        let isite = src.isite(ispinorb);
        let spin = src.ispin(ispinorb);
        self.lattice
            .adj_row(isite)
            .iter()
            .map(|adj| src.ispinorb(spin, adj.isite))
            .filter(|&a| !src.get(a))
            .collect()
    }
}

impl FrmExcitGen for HubbardUniform<'_> {
    fn exsig(&self) -> Exsig {
        EX_1100
    }

    fn ham(&self) -> &dyn FrmHam {
        self.ham
    }

    fn draw<R: Rng + ?Sized>(
        &self,
        src: &FrmOnv,
        rng: &mut R,
        conn: &mut FrmConn,
    ) -> Option<f64> {
        let occs = src.occ_inds();
        let lcm = self.lattice.lcm_le_nadj_max();
        let rand = rng.gen_range(0..occs.len() * lcm);
        let i = occs[rand / lcm];
        let dests = self.valid_dests(src, i);
        if dests.is_empty() {
            return None;
        }
        let a = dests[(rand % lcm) % dests.len()];
        conn.set_single(i, a);
        Some(1.0 / (occs.len() * dests.len()) as f64)
    }

    fn prob(&self, src: &FrmOnv, conn: &FrmConn) -> f64 {
        let i = conn.ann()[0];
        let a = conn.cre()[0];
        if src.ispin(i) != src.ispin(a) {
            return 0.0;
        }
        if self.lattice.phase(src.isite(i), src.isite(a)).is_none() {
            return 0.0;
        }
        let ndest = self.valid_dests(src, i).len();
        if ndest == 0 {
            return 0.0;
        }
        1.0 / (src.nsetbit() * ndest) as f64
    }

    fn approx_nconn(&self, src: &FrmOnv) -> usize {
        src.nsetbit() * self.lattice.nadj_max()
    }
}
