//! Spin exchange excitation generation.

use rand::Rng;

use crate::connection::FrmConn;
use crate::excitgen::FrmExcitGen;
use crate::exsig::{Exsig, EX_2200};
use crate::hamiltonian::FrmHam;
use crate::lattice::Lattice;
use crate::onv::FrmOnv;

/// Generator of the antiparallel nearest-neighbor exchanges which are the
/// only off-diagonal connections of a Heisenberg Hamiltonian.
/// # Definition
/// An electron is selected uniformly, then an exchange partner uniformly
/// among the adjacent sites carrying an opposite lone spin. The same
/// random integer folding as the hopping generator applies. A given
/// exchange is reachable from either of its two endpoints, so the
/// normalized probability sums both selection paths:
///
/// $$
/// p=\frac{1}{N_e}\left(
/// \frac{1}{n^x_\text{anti}}+\frac{1}{n^y_\text{anti}}\right)
/// $$
pub struct HeisenbergExchange<'a> {
    ham: &'a dyn FrmHam,
    lattice: &'a Lattice,
}

impl<'a> HeisenbergExchange<'a> {
    pub fn new(ham: &'a dyn FrmHam) -> Self {
        let lattice = ham
            .lattice()
            .expect("exchange generator requires a lattice Hamiltonian");
        HeisenbergExchange { ham, lattice }
    }

    /// An exchange from the electron on (`isite`, spin) requires the
    /// partner site to hold a lone opposite spin and the electron's own
    /// site to hold no opposite spin.
    fn partner_sites(&self, src: &FrmOnv, ispinorb: usize) -> Vec<usize> {
        let isite = src.isite(ispinorb);
        let spin = src.ispin(ispinorb);
        if src.get(src.ispinorb(spin.flip(), isite)) {
            return Vec::new();
        }
        self.lattice
            .adj_row(isite)
            .iter()
            .map(|adj| adj.isite)
            .filter(|&jsite| {
                src.get(src.ispinorb(spin.flip(), jsite)) && !src.get(src.ispinorb(spin, jsite))
            })
            .collect()
    }

    fn set_exchange(src: &FrmOnv, ispinorb: usize, jsite: usize, conn: &mut FrmConn) {
        let spin = src.ispin(ispinorb);
        let isite = src.isite(ispinorb);
        conn.set_double(
            ispinorb,
            src.ispinorb(spin.flip(), jsite),
            src.ispinorb(spin.flip(), isite),
            src.ispinorb(spin, jsite),
        );
    }
}

impl FrmExcitGen for HeisenbergExchange<'_> {
    fn exsig(&self) -> Exsig {
        EX_2200
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
        let partners = self.partner_sites(src, i);
        if partners.is_empty() {
            return None;
        }
        let jsite = partners[(rand % lcm) % partners.len()];
        Self::set_exchange(src, i, jsite, conn);
        Some(self.prob_from(src, i, partners.len(), jsite))
    }

    fn prob(&self, src: &FrmOnv, conn: &FrmConn) -> f64 {
        // the two annihilated spin orbitals are the two selection paths
        let i = conn.ann()[0];
        let j = conn.ann()[1];
        let partners = self.partner_sites(src, i);
        if !partners.contains(&src.isite(j)) {
            return 0.0;
        }
        self.prob_from(src, i, partners.len(), src.isite(j))
    }

    fn approx_nconn(&self, src: &FrmOnv) -> usize {
        src.nsetbit() * self.lattice.nadj_max()
    }
}

impl HeisenbergExchange<'_> {
    /// Sum of the forward path through the electron on `ispinorb` and the
    /// reverse path through its partner on `jsite`.
    fn prob_from(&self, src: &FrmOnv, ispinorb: usize, npartner: usize, jsite: usize) -> f64 {
        let spin = src.ispin(ispinorb);
        let jspinorb = src.ispinorb(spin.flip(), jsite);
        let npartner_rev = self.partner_sites(src, jspinorb).len();
        debug_assert!(npartner_rev > 0, "reverse path of a drawn exchange is open");
        let nelec = src.nsetbit() as f64;
        (1.0 / npartner as f64 + 1.0 / npartner_rev as f64) / nelec
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::hamiltonian::heisenberg::HeisenbergFrmHam;
    use assert::close;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn neel_ring_draws_every_bond() {
        let ham = HeisenbergFrmHam::new(Lattice::ortho_1d(4, true), 1.0);
        let excit = HeisenbergExchange::new(&ham);
        let src = FrmOnv::from_sites(4, &[0, 2], &[1, 3]);
        let mut rng = SmallRng::seed_from_u64(23);
        let mut conn = FrmConn::new();
        let mut seen = std::collections::HashSet::new();
        for _ in 0..400 {
            let prob = excit.draw(&src, &mut rng, &mut conn).unwrap();
            // every electron has 2 antiparallel neighbors; both paths open
            close(prob, (0.5 + 0.5) / 4.0, 1e-14);
            close(excit.prob(&src, &conn), prob, 1e-14);
            seen.insert((conn.ann().to_vec(), conn.cre().to_vec()));
        }
        // one exchange per lattice bond
        assert_eq!(seen.len(), 4);
    }

    #[test]
    fn ferromagnetic_state_draws_null() {
        let ham = HeisenbergFrmHam::new(Lattice::ortho_1d(4, true), 1.0);
        let excit = HeisenbergExchange::new(&ham);
        let src = FrmOnv::from_sites(4, &[0, 1, 2, 3], &[]);
        let mut rng = SmallRng::seed_from_u64(8);
        let mut conn = FrmConn::new();
        for _ in 0..50 {
            assert!(excit.draw(&src, &mut rng, &mut conn).is_none());
        }
    }
}
