//! Uniform boson ladder excitation generation.

use rand::Rng;

use crate::connection::FrmBosConn;
use crate::excitgen::LadderExcitGen;
use crate::hamiltonian::FrmBosHam;
use crate::onv::FrmBosOnv;

/// Uniform single phonon creation or annihilation for density-coupled
/// fermion-boson Hamiltonians.
/// # Definition
/// A mode is selected uniformly among those whose site carries at least
/// one electron, since the coupling element vanishes elsewhere, then the
/// ladder direction is selected with probability $\frac{1}{2}$ each way.
/// Creation on a mode at the occupation cutoff and annihilation on an
/// empty mode are null.
///
/// $$
/// p=\frac{1}{2n_\text{occ-site}}
/// $$
pub struct UniformLadder<'a> {
    ham: &'a dyn FrmBosHam,
}

impl<'a> UniformLadder<'a> {
    pub fn new(ham: &'a dyn FrmBosHam) -> Self {
        UniformLadder { ham }
    }

    fn coupled_modes(src: &FrmBosOnv) -> Vec<usize> {
        (0..src.bos.nmode())
            .filter(|&imode| src.frm.site_nocc(imode) > 0)
            .collect()
    }
}

impl LadderExcitGen for UniformLadder<'_> {
    fn ham(&self) -> &dyn FrmBosHam {
        self.ham
    }

    fn draw<R: Rng + ?Sized>(
        &self,
        src: &FrmBosOnv,
        rng: &mut R,
        conn: &mut FrmBosConn,
    ) -> Option<f64> {
        let modes = Self::coupled_modes(src);
        if modes.is_empty() {
            return None;
        }
        let rand = rng.gen_range(0..2 * modes.len());
        let imode = modes[rand / 2];
        let cre = rand % 2 == 0;
        if cre && src.bos.get(imode) == src.bos.nmax() {
            return None;
        }
        if !cre && src.bos.get(imode) == 0 {
            return None;
        }
        conn.frm.clear();
        if cre {
            conn.bos.set_cre(imode, 1);
        } else {
            conn.bos.set_ann(imode, 1);
        }
        Some(0.5 / modes.len() as f64)
    }

    fn prob(&self, src: &FrmBosOnv, conn: &FrmBosConn) -> f64 {
        let (ncre, nann) = conn.bos.nops();
        debug_assert_eq!(ncre + nann, 1, "not a single ladder operation");
        let imode = if ncre == 1 {
            conn.bos.cre()[0].imode
        } else {
            conn.bos.ann()[0].imode
        };
        if src.frm.site_nocc(imode) == 0 {
            return 0.0;
        }
        0.5 / Self::coupled_modes(src).len() as f64
    }

    fn approx_nconn(&self, src: &FrmBosOnv) -> usize {
        2 * Self::coupled_modes(src).len()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::hamiltonian::frmbos::HolsteinLadderHam;
    use crate::onv::{BosOnv, FrmOnv};
    use assert::close;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn draws_only_on_electron_carrying_modes() {
        let ham = HolsteinLadderHam::new(3, 0.25);
        let excit = UniformLadder::new(&ham);
        let src = FrmBosOnv {
            frm: FrmOnv::from_sites(3, &[0], &[2]),
            bos: BosOnv::from_occs(&[1, 0, 1], 4),
        };
        let mut rng = SmallRng::seed_from_u64(77);
        let mut conn = FrmBosConn::new();
        for _ in 0..200 {
            if let Some(prob) = excit.draw(&src, &mut rng, &mut conn) {
                close(prob, 0.25, 1e-14);
                close(excit.prob(&src, &conn), prob, 1e-14);
                let (ncre, nann) = conn.bos.nops();
                assert_eq!(ncre + nann, 1);
                let element = excit.ham().get_element(&src, &conn);
                assert!(element.abs() > 0.0);
            }
        }
    }

    #[test]
    fn cutoff_draws_are_null() {
        let ham = HolsteinLadderHam::new(1, 0.25);
        let excit = UniformLadder::new(&ham);
        let src = FrmBosOnv {
            frm: FrmOnv::from_sites(1, &[0], &[]),
            bos: BosOnv::from_occs(&[0], 0),
        };
        let mut rng = SmallRng::seed_from_u64(4);
        let mut conn = FrmBosConn::new();
        // the only mode is both at cutoff and empty
        for _ in 0..20 {
            assert!(excit.draw(&src, &mut rng, &mut conn).is_none());
        }
    }
}
