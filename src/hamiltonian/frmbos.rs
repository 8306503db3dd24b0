//! Fermion-boson coupling of Holstein type.

use log::info;

use crate::connection::FrmBosConn;
use crate::onv::FrmBosOnv;

use super::FrmBosHam;

/// $$
/// \hat H_\text{c}=g\sum_x\hat n_x(\hat b^\dagger_x+\hat b_x)
/// $$
/// One phonon mode per site, coupled to the local electron density. The
/// fermionic sector is untouched by this term, so its elements connect
/// ONVs which differ only in a single boson on one mode.
pub struct HolsteinLadderHam {
    nsite: usize,
    g: f64,
}

impl HolsteinLadderHam {
    /// # Arguments
    /// * __`nsite`__ - Number of sites, and hence modes.
    /// * __`g`__ - Density-displacement coupling strength $g$.
    pub fn new(nsite: usize, g: f64) -> Self {
        info!(
            "Holstein coupling over {} site-local modes with g = {:.6}",
            nsite, g
        );
        HolsteinLadderHam { nsite, g }
    }

    fn occ_fac(&self, onv: &FrmBosOnv, conn: &FrmBosConn) -> Option<(usize, f64)> {
        debug_assert!(conn.frm.ann().is_empty() && conn.frm.cre().is_empty());
        let (ncre, nann) = conn.bos.nops();
        debug_assert_eq!(ncre + nann, 1, "not a single ladder operation");
        if ncre == 1 {
            let imode = conn.bos.cre()[0].imode;
            let n = onv.bos.get(imode);
            if n + 1 > onv.bos.nmax() {
                return None;
            }
            Some((imode, f64::from(n + 1).sqrt()))
        } else {
            let imode = conn.bos.ann()[0].imode;
            Some((imode, f64::from(onv.bos.get(imode)).sqrt()))
        }
    }

    fn ladder_element(&self, onv: &FrmBosOnv, conn: &FrmBosConn) -> f64 {
        match self.occ_fac(onv, conn) {
            Some((imode, fac)) => self.g * onv.frm.site_nocc(imode) as f64 * fac,
            None => 0.0,
        }
    }
}

impl FrmBosHam for HolsteinLadderHam {
    fn nsite(&self) -> usize {
        self.nsite
    }

    fn nmode(&self) -> usize {
        self.nsite
    }

    fn get_coeff_0010(&self, _imode: usize) -> f64 {
        self.g
    }

    /// $gn_x\sqrt{n^\text{bos}_x+1}$ for a phonon created on mode $x$.
    fn get_element_0010(&self, onv: &FrmBosOnv, conn: &FrmBosConn) -> f64 {
        self.ladder_element(onv, conn)
    }

    /// $gn_x\sqrt{n^\text{bos}_x}$ for a phonon annihilated on mode $x$.
    fn get_element_0001(&self, onv: &FrmBosOnv, conn: &FrmBosConn) -> f64 {
        self.ladder_element(onv, conn)
    }
}
