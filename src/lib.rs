//! Stochastic sampling core for full configuration interaction quantum
//! Monte Carlo.
//!
//! The crate provides the pieces of an FCIQMC engine that sit between the
//! many-body basis and the propagator: occupation number vectors and the
//! operator strings connecting them, Hamiltonian matrix elements, and the
//! excitation generators that sample off-diagonal connections with known
//! probability.
//!
//! # Definition
//! A walker population evolves under repeated application of
//!
//! $$
//! \psi_x(\tau+\delta\tau)=\psi_x(\tau)
//! -\delta\tau\sum_{x'}\left(H_{xx'}-S\delta_{xx'}\right)\psi_{x'}(\tau)
//! $$
//!
//! where the off-diagonal sum is sampled rather than enumerated. For each
//! occupied basis state $\vert x\rangle$ an excitation generator draws a
//! connected $\vert x'\rangle$ with probability $p(x'\vert x)$, and the
//! spawned weight is $\delta\tau H_{x'x}/p(x'\vert x)$. Everything here
//! exists to make that one quotient cheap and unbiased: the element
//! $H_{x'x}$ with its fermionic phase, and the exact $p$ of the draw.
//!
//! # Usage
//! ```rust
//! use fciqmc::excitgen::hubbard::HubbardUniform;
//! use fciqmc::excitgen::FrmExcitGen;
//! use fciqmc::hamiltonian::hubbard::HubbardFrmHam;
//! use fciqmc::connection::FrmConn;
//! use fciqmc::lattice::Lattice;
//! use fciqmc::onv::FrmOnv;
//! use rand::rngs::SmallRng;
//! use rand::SeedableRng;
//!
//! let ham = HubbardFrmHam::new(Lattice::ortho_1d(6, true), 4.0, 1.0);
//! let onv = FrmOnv::from_sites(6, &[0, 2, 4], &[1, 3, 5]);
//! let mut rng = SmallRng::seed_from_u64(7);
//! let excit = HubbardUniform::new(&ham);
//! let mut conn = FrmConn::new();
//! if let Some((prob, helem)) = excit.draw_with_element(&onv, &mut rng, &mut conn) {
//!     let _spawn = helem / prob;
//! }
//! ```

/// O(1) categorical sampling by the alias method.
pub mod alias;
/// Operator strings connecting pairs of ONVs, with fermionic phase.
pub mod connection;
/// Stochastic excitation generation with exactly known probabilities.
pub mod excitgen;
/// Compact encoding of excitation signatures.
pub mod exsig;
/// Matrix element evaluation for the supported Hamiltonian terms.
pub mod hamiltonian;
/// Dense symmetry-packed coefficient arrays.
pub mod integrals;
/// Site connectivity for lattice model Hamiltonians.
pub mod lattice;
/// Occupation number vectors over fermionic and bosonic degrees of freedom.
pub mod onv;
/// Unicode characters for state rendering.
pub mod strings;
/// Index maps and small integer helpers.
pub mod utils;

/// Spin channel of a spin orbital.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Spin {
    Up,
    Down,
}

impl Spin {
    /// The opposite channel.
    pub fn flip(self) -> Spin {
        match self {
            Spin::Up => Spin::Down,
            Spin::Down => Spin::Up,
        }
    }
}

impl std::fmt::Display for Spin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let c = match self {
            Spin::Up => strings::UPARROW,
            Spin::Down => strings::DOWNARROW,
        };
        write!(f, "{}", c)
    }
}
