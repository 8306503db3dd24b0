//! The Hamiltonian term hierarchy.
//!
//! A many-body Hamiltonian is assembled from up to three species sectors:
//! a purely fermionic term, a purely bosonic term, and a fermion-boson
//! product ("ladder") term. Each term answers diagonal and off-diagonal
//! matrix element queries for the excitation ranks it supports, folding
//! the fermionic antisymmetry phase in exactly once, and exposes its raw
//! coefficients so that heat-bath excitation generators can weight draws
//! before committing to one.

use log::info;

use crate::connection::{BosConn, FrmBosConn, FrmConn};
use crate::exsig::{Exsig, EX_0000, EX_0001, EX_0010, EX_0011, EX_1100, EX_2200, EX_3300};
use crate::lattice::Lattice;
use crate::onv::{BosOnv, FrmBosOnv, FrmOnv};

pub mod bos;
pub mod frmbos;
pub mod general;
pub mod heisenberg;
pub mod hubbard;
pub mod sum;
pub mod tc;

/// Per-rank-signature record of which excitation signatures a term can
/// produce structurally nonzero elements for. Populated once while the
/// term's coefficients are loaded, immutable afterward; consumed by setup
/// code to prune which excitation generators are instantiated, and logged
/// for diagnostics.
#[derive(Debug, Clone)]
pub struct TermContribs {
    ranksig: Exsig,
    nonzero: Vec<(Exsig, bool)>,
}

impl TermContribs {
    pub fn new(ranksig: Exsig) -> Self {
        debug_assert!(ranksig.is_valid(), "invalid rank signature");
        let nonzero = (0..crate::exsig::NDISTINCT as u32)
            .map(Exsig::from_int)
            .filter(|e| e.is_contrib_of(ranksig))
            .map(|e| (e, false))
            .collect();
        TermContribs { ranksig, nonzero }
    }

    pub fn ranksig(&self) -> Exsig {
        self.ranksig
    }

    pub fn set_nonzero(&mut self, exsig: Exsig) {
        debug_assert!(
            exsig.is_contrib_of(self.ranksig),
            "exsig is not a contraction of this rank signature"
        );
        for entry in self.nonzero.iter_mut() {
            if entry.0 == exsig {
                entry.1 = true;
                return;
            }
        }
    }

    pub fn is_nonzero(&self, exsig: Exsig) -> bool {
        self.nonzero
            .iter()
            .any(|&(e, nonzero)| e == exsig && nonzero)
    }

    pub fn any_nonzero(&self) -> bool {
        self.nonzero.iter().any(|&(_, nonzero)| nonzero)
    }

    /// One-time diagnostic record of the structure of the term.
    pub fn log(&self, term_name: &str) {
        for &(e, nonzero) in &self.nonzero {
            if nonzero {
                info!(
                    "{} term of rank {} contributes nonzero elements for exsig {}",
                    term_name, self.ranksig, e
                );
            }
        }
    }
}

/// Interactions between the fermionic parts of the basis states, up to
/// three-body number-conserving operator products:
/// $$
/// \hat H=\sum_{ai}T_{ai}\ a^\dagger i
/// +\frac14\sum_{abij}\langle ab\vert\vert ij\rangle\ a^\dagger b^\dagger ji
/// +\sum_{abcijk}L_{abcijk}\ a^\dagger b^\dagger c^\dagger kji
/// $$
/// `get_coeff_*` retrieves elements of the parametrising arrays (or their
/// procedural lattice-model equivalents, which are never stored);
/// `get_element_*` computes the occupied contractions of a connection of
/// the given rank and folds in the antisymmetry phase exactly once.
pub trait FrmHam: Send + Sync {
    /// Number of spatial sites/orbitals of the basis.
    fn nsite(&self) -> usize;

    fn get_coeff_1100(&self, _a: usize, _i: usize) -> f64 {
        0.0
    }

    /// Antisymmetrized two-body coefficient $\langle ab\vert\vert ij\rangle$.
    fn get_coeff_2200(&self, _a: usize, _b: usize, _i: usize, _j: usize) -> f64 {
        0.0
    }

    fn get_coeff_3300(
        &self,
        _a: usize,
        _b: usize,
        _c: usize,
        _i: usize,
        _j: usize,
        _k: usize,
    ) -> f64 {
        0.0
    }

    /// Diagonal element $\langle x\vert\hat H\vert x\rangle$.
    fn get_element_0000(&self, onv: &FrmOnv) -> f64;

    /// Element of a single excitation, phase folded in.
    fn get_element_1100(&self, onv: &FrmOnv, conn: &FrmConn) -> f64;

    /// Element of a double excitation, phase folded in.
    fn get_element_2200(&self, onv: &FrmOnv, conn: &FrmConn) -> f64;

    /// Element of a triple excitation; only transcorrelated terms produce
    /// these.
    fn get_element_3300(&self, _onv: &FrmOnv, _conn: &FrmConn) -> f64 {
        0.0
    }

    /// Dispatch an element query on the rank of the connection. Ranks the
    /// term makes no contribution for yield a well-defined 0.
    fn get_element(&self, onv: &FrmOnv, conn: &FrmConn) -> f64 {
        match conn.exsig() {
            e if e == EX_0000 => self.get_element_0000(onv),
            e if e == EX_1100 => self.get_element_1100(onv, conn),
            e if e == EX_2200 => self.get_element_2200(onv, conn),
            e if e == EX_3300 => self.get_element_3300(onv, conn),
            _ => 0.0,
        }
    }

    fn contribs_1100(&self) -> Option<&TermContribs> {
        None
    }

    fn contribs_2200(&self) -> Option<&TermContribs> {
        None
    }

    /// A structurally disabled term (e.g. zero sites) returns 0 for every
    /// query. This is distinct from a numerically-near-zero but
    /// structurally active term.
    fn is_disabled(&self) -> bool {
        self.nsite() == 0
    }

    /// Capability accessor for lattice-aware terms: excitation generators
    /// that restrict draws to lattice-adjacent sites query this instead of
    /// downcasting the term.
    fn lattice(&self) -> Option<&Lattice> {
        None
    }
}

/// Purely bosonic number-conserving interactions.
pub trait BosHam: Send + Sync {
    fn nmode(&self) -> usize;

    /// Single-mode transfer coefficient of $b^\dagger_i b_j$.
    fn get_coeff_0011(&self, _i: usize, _j: usize) -> f64 {
        0.0
    }

    fn get_element_0000(&self, onv: &BosOnv) -> f64;

    /// Number-conserving single-boson transfer element, occupation factors
    /// $\sqrt{n_j(n_i+1)}$ included.
    fn get_element_0011(&self, onv: &BosOnv, conn: &BosConn) -> f64;

    fn get_element(&self, onv: &BosOnv, conn: &BosConn) -> f64 {
        match conn.exsig() {
            e if e == EX_0000 => self.get_element_0000(onv),
            e if e == EX_0011 => self.get_element_0011(onv, conn),
            _ => 0.0,
        }
    }

    fn is_disabled(&self) -> bool {
        self.nmode() == 0
    }
}

/// Interactions coupling the fermion and boson sectors through boson
/// ladder operators.
pub trait FrmBosHam: Send + Sync {
    fn nsite(&self) -> usize;
    fn nmode(&self) -> usize;

    /// Coupling strength of the boson ladder on one mode.
    fn get_coeff_0010(&self, _imode: usize) -> f64 {
        0.0
    }

    /// Single boson creation element, $\sqrt{n+1}$ factor included.
    fn get_element_0010(&self, onv: &FrmBosOnv, conn: &FrmBosConn) -> f64;

    /// Single boson annihilation element, $\sqrt{n}$ factor included.
    fn get_element_0001(&self, onv: &FrmBosOnv, conn: &FrmBosConn) -> f64;

    fn get_element(&self, onv: &FrmBosOnv, conn: &FrmBosConn) -> f64 {
        match conn.exsig() {
            e if e == EX_0010 => self.get_element_0010(onv, conn),
            e if e == EX_0001 => self.get_element_0001(onv, conn),
            _ => 0.0,
        }
    }

    fn is_disabled(&self) -> bool {
        self.nsite() == 0 || self.nmode() == 0
    }
}

/// Generalized Hamiltonian: the sum of the configured species-sector
/// terms. Absent sectors are explicit options, never globally shared null
/// sentinel instances.
pub struct Hamiltonian {
    pub frm: Option<Box<dyn FrmHam>>,
    pub bos: Option<Box<dyn BosHam>>,
    pub frmbos: Option<Box<dyn FrmBosHam>>,
}

impl Hamiltonian {
    pub fn new(
        frm: Option<Box<dyn FrmHam>>,
        bos: Option<Box<dyn BosHam>>,
        frmbos: Option<Box<dyn FrmBosHam>>,
    ) -> Self {
        Hamiltonian { frm, bos, frmbos }
    }

    pub fn from_frm(frm: Box<dyn FrmHam>) -> Self {
        Hamiltonian::new(Some(frm), None, None)
    }

    /// Diagonal element: the sum of the sector diagonals.
    pub fn get_element_diag(&self, onv: &FrmBosOnv) -> f64 {
        let mut out = 0.0;
        if let Some(frm) = &self.frm {
            out += frm.get_element_0000(&onv.frm);
        }
        if let Some(bos) = &self.bos {
            out += bos.get_element_0000(&onv.bos);
        }
        out
    }

    /// Off-diagonal element dispatched on the combined exsig of the
    /// connection. At most one sector contributes to any one exsig.
    pub fn get_element(&self, onv: &FrmBosOnv, conn: &FrmBosConn) -> f64 {
        let exsig = conn.exsig();
        if !exsig.is_valid() {
            return 0.0;
        }
        if exsig == EX_0000 {
            return self.get_element_diag(onv);
        }
        if exsig.is_pure_frm() {
            return self
                .frm
                .as_ref()
                .map_or(0.0, |h| h.get_element(&onv.frm, &conn.frm));
        }
        if exsig.is_pure_bos() {
            if exsig == EX_0011 {
                return self
                    .bos
                    .as_ref()
                    .map_or(0.0, |h| h.get_element(&onv.bos, &conn.bos));
            }
            // ladder moves change the boson number while leaving the
            // fermion sector untouched
            return self
                .frmbos
                .as_ref()
                .map_or(0.0, |h| h.get_element(onv, conn));
        }
        0.0
    }

    /// True when no configured term can change the total boson number.
    pub fn boson_number_conserving(&self) -> bool {
        self.frmbos.as_ref().map_or(true, |h| h.is_disabled())
    }
}
