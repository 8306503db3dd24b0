//! Precomputed heat-bath double excitation generation.

use log::info;
use rayon::prelude::*;

use crate::alias::{Aliaser, MultiAliaser};
use crate::connection::FrmConn;
use crate::excitgen::{FrmExcitGen, HELEM_TOL};
use crate::exsig::{Exsig, EX_2200};
use crate::hamiltonian::FrmHam;
use crate::onv::FrmOnv;
use crate::utils::{inv_strigmap, npair, strigmap};

/// Heat-bath doubles: the creation pair is drawn from a precomputed alias
/// table conditioned on the annihilation pair.
/// # Definition
/// For every strictly ordered spin orbital pair $(i,j)$ an alias table is
/// built at construction over all ordered pairs $(a,b)$ with weight
/// $\vert\langle ab\vert\vert ij\rangle\vert$, pairs colliding with
/// $(i,j)$ weighted zero. At draw time the annihilation pair is selected
/// uniformly among occupied pairs and $(a,b)$ is drawn from the table of
/// that row, so
///
/// $$
/// p(x^{ab}_{ij}\vert x)=
/// \frac{\vert H_{x'x}\vert}{W_{ij}\binom{N_e}{2}}
/// $$
///
/// where $W_{ij}$ is the weight sum of the row. Since the tables do not
/// know the instantaneous occupation, a drawn $(a,b)$ may land on an
/// occupied orbital; such draws are null. The element magnitude is a
/// byproduct of the probability, which makes the combined
/// draw-with-element the primary entry point.
///
/// The table build is the only expensive step,
/// $O(N_\text{pair}^2)$ coefficient reads for
/// $N_\text{pair}=\binom{2N_s}{2}$, and is parallelized over rows.
pub struct Pchb2200<'a> {
    ham: &'a dyn FrmHam,
    aliasers: MultiAliaser,
    nspinorb: usize,
}

impl<'a> Pchb2200<'a> {
    pub fn new(ham: &'a dyn FrmHam) -> Self {
        let nspinorb = 2 * ham.nsite();
        let nrow = npair(nspinorb);
        let rows: Vec<Option<Aliaser>> = (0..nrow)
            .into_par_iter()
            .map(|irow| {
                let (i, j) = inv_strigmap(irow);
                let mut weights = vec![0.0; nrow];
                for (iab, w) in weights.iter_mut().enumerate() {
                    let (a, b) = inv_strigmap(iab);
                    if a == i || a == j || b == i || b == j {
                        continue;
                    }
                    *w = ham.get_coeff_2200(a, b, j, i).abs();
                }
                Aliaser::new(&weights).ok()
            })
            .collect();
        let nempty = rows.iter().filter(|r| r.is_none()).count();
        let mut aliasers = MultiAliaser::new(nrow, nrow);
        aliasers.set_rows(rows);
        info!(
            "built heat-bath doubles tables: {} rows of {} targets, {} rows empty",
            nrow, nrow, nempty
        );
        Pchb2200 {
            ham,
            aliasers,
            nspinorb,
        }
    }

    /// Weight sum of the table row of an ordered annihilation pair.
    pub fn row_norm(&self, i: usize, j: usize) -> f64 {
        self.aliasers.norm(strigmap(i.max(j), i.min(j)))
    }
}

impl FrmExcitGen for Pchb2200<'_> {
    fn exsig(&self) -> Exsig {
        EX_2200
    }

    fn ham(&self) -> &dyn FrmHam {
        self.ham
    }

    /// Delegates to [FrmExcitGen::draw_with_element] and discards the
    /// element: heat-bath generation yields it for free, so a plain draw
    /// has nothing cheaper to do.
    fn draw<R: rand::Rng + ?Sized>(
        &self,
        src: &FrmOnv,
        rng: &mut R,
        conn: &mut FrmConn,
    ) -> Option<f64> {
        self.draw_with_element(src, rng, conn).map(|(prob, _)| prob)
    }

    fn prob(&self, src: &FrmOnv, conn: &FrmConn) -> f64 {
        let (i, j) = (conn.ann()[0], conn.ann()[1]);
        let (a, b) = (conn.cre()[0], conn.cre()[1]);
        let norm = self.aliasers.norm(strigmap(j, i));
        if norm == 0.0 {
            return 0.0;
        }
        let weight = self.ham.get_coeff_2200(b, a, j, i).abs();
        weight / (norm * npair(src.nsetbit()) as f64)
    }

    fn draw_with_element<R: rand::Rng + ?Sized>(
        &self,
        src: &FrmOnv,
        rng: &mut R,
        conn: &mut FrmConn,
    ) -> Option<(f64, f64)> {
        let occs = src.occ_inds();
        let npair_elec = npair(occs.len());
        if npair_elec == 0 {
            return None;
        }
        let (n, m) = inv_strigmap(rng.gen_range(0..npair_elec));
        let (i, j) = (occs[m], occs[n]);
        let irow = strigmap(j, i);
        let norm = self.aliasers.norm(irow);
        if norm == 0.0 {
            return None;
        }
        let (a, b) = inv_strigmap(self.aliasers.draw(irow, rng));
        if src.get(a) || src.get(b) {
            return None;
        }
        conn.set_double(i, j, b, a);
        let helem = self.ham.get_element_2200(src, conn);
        if helem.abs() < HELEM_TOL {
            return None;
        }
        Some((helem.abs() / (norm * npair_elec as f64), helem))
    }

    fn approx_nconn(&self, src: &FrmOnv) -> usize {
        let nelec = src.nsetbit();
        npair(nelec) * npair(self.nspinorb - nelec)
    }
}
