//! Site adjacency for lattice-model Hamiltonians.
//!
//! Lattice construction proper is the concern of a collaborator; this
//! module only carries the adjacency interface the model Hamiltonians and
//! their excitation generators consume: per-site neighbor lists with bond
//! phases, and the lattice-wide LCM of per-site adjacency counts used to
//! fold two correlated uniform draws into a single PRNG call.

use log::info;

use crate::utils::lcm_le;

/// One lattice bond endpoint: the neighboring site and the $\pm 1$ phase
/// the hopping coefficient picks up across the bond (e.g. $-1$ across an
/// antiperiodic boundary).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Adj {
    pub isite: usize,
    pub phase: i32,
}

#[derive(Debug, Clone)]
pub struct Lattice {
    adj: Vec<Vec<Adj>>,
    nadj_max: usize,
    lcm_le_nadj_max: usize,
}

impl Lattice {
    /// Build from explicit per-site adjacency rows.
    pub fn from_adj(adj: Vec<Vec<Adj>>) -> Self {
        let nadj_max = adj.iter().map(|row| row.len()).max().unwrap_or(0);
        let lattice = Lattice {
            nadj_max,
            lcm_le_nadj_max: lcm_le(nadj_max),
            adj,
        };
        info!(
            "Lattice with {} sites, max coordination {}, adjacency-count LCM {}",
            lattice.nsite(),
            lattice.nadj_max,
            lattice.lcm_le_nadj_max
        );
        lattice
    }

    /// One-dimensional chain or ring with unit bond phases.
    pub fn ortho_1d(nsite: usize, periodic: bool) -> Self {
        debug_assert!(nsite > 1, "lattice needs at least two sites");
        let mut adj = vec![Vec::new(); nsite];
        for i in 0..nsite.saturating_sub(1) {
            adj[i].push(Adj { isite: i + 1, phase: 1 });
            adj[i + 1].push(Adj { isite: i, phase: 1 });
        }
        if periodic && nsite > 2 {
            adj[nsite - 1].push(Adj { isite: 0, phase: 1 });
            adj[0].push(Adj { isite: nsite - 1, phase: 1 });
        }
        for row in adj.iter_mut() {
            row.sort_by_key(|a| a.isite);
        }
        Lattice::from_adj(adj)
    }

    #[inline(always)]
    pub fn nsite(&self) -> usize {
        self.adj.len()
    }

    #[inline(always)]
    pub fn nadj(&self, isite: usize) -> usize {
        self.adj[isite].len()
    }

    #[inline(always)]
    pub fn nadj_max(&self) -> usize {
        self.nadj_max
    }

    /// Least common multiple of every whole number up to the maximum
    /// coordination number: any per-site adjacency count divides it.
    #[inline(always)]
    pub fn lcm_le_nadj_max(&self) -> usize {
        self.lcm_le_nadj_max
    }

    #[inline(always)]
    pub fn adj_row(&self, isite: usize) -> &[Adj] {
        &self.adj[isite]
    }

    /// Bond phase between two sites, `None` when they are not adjacent.
    pub fn phase(&self, isite: usize, jsite: usize) -> Option<i32> {
        self.adj[isite]
            .iter()
            .find(|a| a.isite == jsite)
            .map(|a| a.phase)
    }
}
