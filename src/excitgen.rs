//! Stochastic excitation generation.
//!
//! An excitation generator draws a connection from a source ONV with a
//! probability it can also report exactly. The spawning step of the
//! propagation divides the matrix element of the drawn connection by that
//! probability, so any mismatch between the two is a bias, not merely an
//! inefficiency. Generators are immutable after construction and hold a
//! borrow of the Hamiltonian whose elements they sample.

use rand::Rng;

use crate::connection::{FrmBosConn, FrmConn};
use crate::exsig::Exsig;
use crate::hamiltonian::{FrmBosHam, FrmHam};
use crate::onv::{FrmBosOnv, FrmOnv};

pub mod heisenberg;
pub mod hubbard;
pub mod ladder;
pub mod pchb;
pub mod uniform;

/// Magnitude below which a drawn matrix element is treated as zero and
/// the draw reported as null.
pub const HELEM_TOL: f64 = 1e-12;

/// A drawer of fermionic connections of one fixed excitation signature.
pub trait FrmExcitGen: Send + Sync {
    /// Signature of every connection this generator can draw.
    fn exsig(&self) -> Exsig;

    /// The Hamiltonian whose elements the draws are importance-related to.
    fn ham(&self) -> &dyn FrmHam;

    /// Attempt to draw a connection from `src` into `conn`.
    /// # Returns
    /// * __`prob`__ - Normalized probability of the drawn connection, or
    /// `None` for a null excitation (the attempt consumed random numbers
    /// but produced no valid connection).
    fn draw<R: Rng + ?Sized>(&self, src: &FrmOnv, rng: &mut R, conn: &mut FrmConn)
        -> Option<f64>;

    /// Probability that [FrmExcitGen::draw] from `src` would produce
    /// exactly `conn`, summed over all internal selection paths that lead
    /// to it.
    fn prob(&self, src: &FrmOnv, conn: &FrmConn) -> f64;

    /// Draw a connection together with its matrix element. Draws whose
    /// element magnitude is below [HELEM_TOL] are nulled since they would
    /// spawn nothing.
    ///
    /// Heat-bath generators override this as the primary entry point: they
    /// obtain the element as a byproduct of the draw itself.
    fn draw_with_element<R: Rng + ?Sized>(
        &self,
        src: &FrmOnv,
        rng: &mut R,
        conn: &mut FrmConn,
    ) -> Option<(f64, f64)> {
        let prob = self.draw(src, rng, conn)?;
        let helem = self.ham().get_element(src, conn);
        if helem.abs() < HELEM_TOL {
            return None;
        }
        Some((prob, helem))
    }

    /// Order-of-magnitude estimate of the number of distinct connections
    /// reachable from `src`, for time step initialization.
    fn approx_nconn(&self, src: &FrmOnv) -> usize;
}

/// A drawer of single boson ladder connections of a fermion-boson product
/// state.
pub trait LadderExcitGen: Send + Sync {
    fn ham(&self) -> &dyn FrmBosHam;

    /// Attempt to draw a single boson creation or annihilation.
    fn draw<R: Rng + ?Sized>(
        &self,
        src: &FrmBosOnv,
        rng: &mut R,
        conn: &mut FrmBosConn,
    ) -> Option<f64>;

    /// Probability of drawing exactly `conn` from `src`.
    fn prob(&self, src: &FrmBosOnv, conn: &FrmBosConn) -> f64;

    /// As [FrmExcitGen::approx_nconn].
    fn approx_nconn(&self, src: &FrmBosOnv) -> usize;

    /// As [FrmExcitGen::draw_with_element], for the coupled product space.
    fn draw_with_element<R: Rng + ?Sized>(
        &self,
        src: &FrmBosOnv,
        rng: &mut R,
        conn: &mut FrmBosConn,
    ) -> Option<(f64, f64)> {
        let prob = self.draw(src, rng, conn)?;
        let helem = self.ham().get_element(src, conn);
        if helem.abs() < HELEM_TOL {
            return None;
        }
        Some((prob, helem))
    }
}
