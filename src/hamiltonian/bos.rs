//! Number-conserving bosonic Hamiltonian with general mode coupling.

use log::info;

use crate::connection::BosConn;
use crate::onv::BosOnv;

use super::BosHam;

/// $$
/// \hat H_\text{bos}=\sum_{ij}\omega_{ij}\hat b^\dagger_i\hat b_j
/// $$
/// The diagonal of $\omega$ gives the mode energies and the off-diagonal
/// entries transfer single bosons between modes with the usual
/// $\sqrt{n_j(n_i+1)}$ occupation factors.
pub struct GeneralBosHam {
    nmode: usize,
    coeffs: Vec<f64>,
}

impl GeneralBosHam {
    pub fn new(nmode: usize, coeffs: Vec<f64>) -> Self {
        debug_assert_eq!(coeffs.len(), nmode * nmode, "coefficient array of wrong size");
        info!("general boson Hamiltonian over {} modes", nmode);
        GeneralBosHam { nmode, coeffs }
    }

    /// Harmonic mode energies without any transfer coupling.
    pub fn harmonic(omegas: &[f64]) -> Self {
        let nmode = omegas.len();
        let mut coeffs = vec![0.0; nmode * nmode];
        for (i, &omega) in omegas.iter().enumerate() {
            coeffs[i * nmode + i] = omega;
        }
        Self::new(nmode, coeffs)
    }
}

impl BosHam for GeneralBosHam {
    fn nmode(&self) -> usize {
        self.nmode
    }

    fn get_coeff_0011(&self, i: usize, j: usize) -> f64 {
        self.coeffs[i * self.nmode + j]
    }

    /// $\sum_i\omega_{ii}n_i$
    fn get_element_0000(&self, onv: &BosOnv) -> f64 {
        (0..self.nmode)
            .map(|i| self.get_coeff_0011(i, i) * f64::from(onv.get(i)))
            .sum()
    }

    /// $\omega_{ij}\sqrt{n_j(n_i+1)}$ for a transfer $j\rightarrow i$.
    fn get_element_0011(&self, onv: &BosOnv, conn: &BosConn) -> f64 {
        let i = conn.cre()[0].imode;
        let j = conn.ann()[0].imode;
        if onv.get(i) + 1 > onv.nmax() {
            return 0.0;
        }
        let occ_fac = f64::from(onv.get(j)) * f64::from(onv.get(i) + 1);
        self.get_coeff_0011(i, j) * occ_fac.sqrt()
    }
}
