//! Uniform single excitation generation.

use rand::Rng;

use crate::connection::FrmConn;
use crate::excitgen::FrmExcitGen;
use crate::exsig::{Exsig, EX_1100};
use crate::hamiltonian::FrmHam;
use crate::onv::FrmOnv;
use crate::utils::inv_rectmap;
use crate::Spin;

/// Spin-conserving singles drawn uniformly within a spin channel.
/// # Definition
/// A channel is drawable when it has at least one occupied and one vacant
/// spin orbital. One drawable channel is selected uniformly, then an
/// (occupied, vacant) pair is selected uniformly within it via a single
/// random integer and the rectangular index map, so
///
/// $$
/// p(x^a_i\vert x)=
/// \frac{1}{n_\text{ch}n^\sigma_\text{occ}n^\sigma_\text{vac}}
/// $$
///
/// No importance information enters the draw; the generator is a fallback
/// for Hamiltonians without exploitable structure in their single
/// excitations.
pub struct UniformSingles<'a> {
    ham: &'a dyn FrmHam,
}

impl<'a> UniformSingles<'a> {
    pub fn new(ham: &'a dyn FrmHam) -> Self {
        UniformSingles { ham }
    }

    fn ndrawable_channels(src: &FrmOnv) -> usize {
        [Spin::Up, Spin::Down]
            .into_iter()
            .filter(|&spin| {
                let nocc = src.occ_inds_spin(spin).len();
                nocc > 0 && nocc < src.nsite()
            })
            .count()
    }
}

impl FrmExcitGen for UniformSingles<'_> {
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
        let drawable: Vec<Spin> = [Spin::Up, Spin::Down]
            .into_iter()
            .filter(|&spin| {
                let nocc = src.occ_inds_spin(spin).len();
                nocc > 0 && nocc < src.nsite()
            })
            .collect();
        if drawable.is_empty() {
            return None;
        }
        let spin = drawable[rng.gen_range(0..drawable.len())];
        let occs = src.occ_inds_spin(spin);
        let vacs = src.vac_inds_spin(spin);
        let (iocc, ivac) = inv_rectmap(rng.gen_range(0..occs.len() * vacs.len()), vacs.len());
        conn.set_single(occs[iocc], vacs[ivac]);
        Some(1.0 / (drawable.len() * occs.len() * vacs.len()) as f64)
    }

    fn prob(&self, src: &FrmOnv, conn: &FrmConn) -> f64 {
        let i = conn.ann()[0];
        let a = conn.cre()[0];
        let spin = src.ispin(i);
        if spin != src.ispin(a) || !src.get(i) || src.get(a) {
            return 0.0;
        }
        let nocc = src.occ_inds_spin(spin).len();
        let nvac = src.nsite() - nocc;
        1.0 / (Self::ndrawable_channels(src) * nocc * nvac) as f64
    }

    fn approx_nconn(&self, src: &FrmOnv) -> usize {
        [Spin::Up, Spin::Down]
            .into_iter()
            .map(|spin| {
                let nocc = src.occ_inds_spin(spin).len();
                nocc * (src.nsite() - nocc)
            })
            .sum()
    }
}
