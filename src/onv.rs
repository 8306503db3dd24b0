//! Occupation number vectors.
//!
//! The many-body basis states of the sampled Hilbert space. Fermionic
//! occupations are single bits over spin orbitals, bosonic occupations are
//! small non-negative integers per mode bounded by a configured cutoff.

use crate::Spin;

const NBIT_WORD: usize = u64::BITS as usize;

/// Fermionic occupation number vector.
/// # Definition
/// A bit vector over the $2N_s$ spin orbitals of the basis. The indexing
/// is spin-blocked: spin-up (alpha) orbitals occupy
/// indices $i\in\[0,N_s)$ and spin-down (beta) orbitals occupy indices
/// $i\in\[N_s,2N_s)$. Bit $i$ of word $i/64$ is the occupation of spin
/// orbital $i$.
/// # Usage
/// ```rust
/// use fciqmc::onv::FrmOnv;
/// let mut onv = FrmOnv::new(4);
/// onv.set(0);
/// onv.set(5);
/// assert_eq!(onv.nsetbit(), 2);
/// assert!(onv.get(5));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FrmOnv {
    words: Vec<u64>,
    nsite: usize,
}

impl FrmOnv {
    /// Empty ONV over `nsite` spatial sites ($2\times$`nsite` spin orbitals).
    pub fn new(nsite: usize) -> Self {
        let nspinorb = 2 * nsite;
        FrmOnv {
            words: vec![0u64; (nspinorb + NBIT_WORD - 1) / NBIT_WORD],
            nsite,
        }
    }

    /// ONV with the given spin orbitals occupied.
    pub fn from_spinorbs(nsite: usize, occ: &[usize]) -> Self {
        let mut onv = FrmOnv::new(nsite);
        for &i in occ {
            debug_assert!(!onv.get(i), "duplicate spin orbital index");
            onv.set(i);
        }
        onv
    }

    /// ONV with the given alpha and beta site lists occupied.
    pub fn from_sites(nsite: usize, alpha: &[usize], beta: &[usize]) -> Self {
        let mut onv = FrmOnv::new(nsite);
        for &i in alpha {
            onv.set(onv.ispinorb(Spin::Up, i));
        }
        for &i in beta {
            onv.set(onv.ispinorb(Spin::Down, i));
        }
        onv
    }

    #[inline(always)]
    pub fn nsite(&self) -> usize {
        self.nsite
    }

    #[inline(always)]
    pub fn nspinorb(&self) -> usize {
        2 * self.nsite
    }

    #[inline(always)]
    pub fn nword(&self) -> usize {
        self.words.len()
    }

    /// Raw storage word, exposed so that the phase computation can cache
    /// popcounts at word boundaries.
    #[inline(always)]
    pub fn word(&self, iword: usize) -> u64 {
        self.words[iword]
    }

    #[inline(always)]
    pub fn get(&self, ispinorb: usize) -> bool {
        debug_assert!(ispinorb < self.nspinorb(), "spin orbital index OOB");
        (self.words[ispinorb / NBIT_WORD] >> (ispinorb % NBIT_WORD)) & 1 != 0
    }

    #[inline(always)]
    pub fn set(&mut self, ispinorb: usize) {
        debug_assert!(ispinorb < self.nspinorb(), "spin orbital index OOB");
        self.words[ispinorb / NBIT_WORD] |= 1u64 << (ispinorb % NBIT_WORD);
    }

    #[inline(always)]
    pub fn clr(&mut self, ispinorb: usize) {
        debug_assert!(ispinorb < self.nspinorb(), "spin orbital index OOB");
        self.words[ispinorb / NBIT_WORD] &= !(1u64 << (ispinorb % NBIT_WORD));
    }

    /// Total number of occupied spin orbitals.
    pub fn nsetbit(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    pub fn is_zero(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    /// Spatial site of a spin orbital.
    #[inline(always)]
    pub fn isite(&self, ispinorb: usize) -> usize {
        ispinorb % self.nsite
    }

    /// Spin channel of a spin orbital.
    #[inline(always)]
    pub fn ispin(&self, ispinorb: usize) -> Spin {
        if ispinorb < self.nsite {
            Spin::Up
        } else {
            Spin::Down
        }
    }

    /// Spin orbital of a (spin, site) pair.
    #[inline(always)]
    pub fn ispinorb(&self, spin: Spin, isite: usize) -> usize {
        debug_assert!(isite < self.nsite, "site index OOB");
        match spin {
            Spin::Up => isite,
            Spin::Down => isite + self.nsite,
        }
    }

    /// Ascending list of occupied spin orbitals.
    pub fn occ_inds(&self) -> Vec<usize> {
        let mut inds = Vec::with_capacity(self.nsetbit());
        for iword in 0..self.nword() {
            let mut work = self.words[iword];
            while work != 0 {
                inds.push(work.trailing_zeros() as usize + iword * NBIT_WORD);
                work &= work - 1;
            }
        }
        inds
    }

    /// Ascending list of vacant spin orbitals.
    pub fn vac_inds(&self) -> Vec<usize> {
        (0..self.nspinorb()).filter(|&i| !self.get(i)).collect()
    }

    /// Ascending list of occupied spin orbitals in one spin channel.
    pub fn occ_inds_spin(&self, spin: Spin) -> Vec<usize> {
        let (lo, hi) = self.spin_range(spin);
        (lo..hi).filter(|&i| self.get(i)).collect()
    }

    /// Ascending list of vacant spin orbitals in one spin channel.
    pub fn vac_inds_spin(&self, spin: Spin) -> Vec<usize> {
        let (lo, hi) = self.spin_range(spin);
        (lo..hi).filter(|&i| !self.get(i)).collect()
    }

    /// Number of electrons on a spatial site (0, 1, or 2).
    #[inline(always)]
    pub fn site_nocc(&self, isite: usize) -> usize {
        self.get(self.ispinorb(Spin::Up, isite)) as usize
            + self.get(self.ispinorb(Spin::Down, isite)) as usize
    }

    /// Sites carrying both an alpha and a beta electron.
    pub fn doubly_occ_sites(&self) -> Vec<usize> {
        (0..self.nsite).filter(|&i| self.site_nocc(i) == 2).collect()
    }

    fn spin_range(&self, spin: Spin) -> (usize, usize) {
        match spin {
            Spin::Up => (0, self.nsite),
            Spin::Down => (self.nsite, 2 * self.nsite),
        }
    }
}

impl std::fmt::Display for FrmOnv {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "|")?;
        for i in 0..self.nsite {
            let c = match (self.get(i), self.get(i + self.nsite)) {
                (false, false) => crate::strings::EMPTY_SITE,
                (true, false) => crate::strings::UPARROW,
                (false, true) => crate::strings::DOWNARROW,
                (true, true) => crate::strings::DOUBLE_OCC,
            };
            write!(f, "{}", c)?;
        }
        write!(f, ">")
    }
}

/// Bosonic occupation number vector.
/// # Definition
/// One occupation integer per mode, bounded above by the configured cutoff
/// `nmax`. The cutoff truncates the infinite bosonic Fock space to a
/// finite sampled basis.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BosOnv {
    occ: Vec<u32>,
    nmax: u32,
}

impl BosOnv {
    pub fn new(nmode: usize, nmax: u32) -> Self {
        BosOnv {
            occ: vec![0; nmode],
            nmax,
        }
    }

    pub fn from_occs(occ: &[u32], nmax: u32) -> Self {
        debug_assert!(occ.iter().all(|&n| n <= nmax), "occupation exceeds cutoff");
        BosOnv {
            occ: occ.to_vec(),
            nmax,
        }
    }

    #[inline(always)]
    pub fn nmode(&self) -> usize {
        self.occ.len()
    }

    #[inline(always)]
    pub fn nmax(&self) -> u32 {
        self.nmax
    }

    #[inline(always)]
    pub fn get(&self, imode: usize) -> u32 {
        self.occ[imode]
    }

    pub fn set(&mut self, imode: usize, n: u32) {
        debug_assert!(n <= self.nmax, "occupation exceeds cutoff");
        self.occ[imode] = n;
    }

    /// Total boson number.
    pub fn nboson(&self) -> u32 {
        self.occ.iter().sum()
    }
}

impl std::fmt::Display for BosOnv {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "|")?;
        for (i, n) in self.occ.iter().enumerate() {
            if i != 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", n)?;
        }
        write!(f, ")")
    }
}

/// Product state of a fermionic and a bosonic ONV, for coupled
/// fermion-boson Hamiltonians.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FrmBosOnv {
    pub frm: FrmOnv,
    pub bos: BosOnv,
}

impl FrmBosOnv {
    pub fn new(nsite: usize, nmode: usize, nmax: u32) -> Self {
        FrmBosOnv {
            frm: FrmOnv::new(nsite),
            bos: BosOnv::new(nmode, nmax),
        }
    }
}

impl std::fmt::Display for FrmBosOnv {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.frm, self.bos)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn set_clr_get() {
        let mut onv = FrmOnv::new(40);
        for &i in &[0usize, 17, 39, 63, 64, 79] {
            assert!(!onv.get(i));
            onv.set(i);
            assert!(onv.get(i));
        }
        assert_eq!(onv.nsetbit(), 6);
        onv.clr(64);
        assert!(!onv.get(64));
        assert_eq!(onv.nsetbit(), 5);
    }

    #[test]
    fn occ_vac_partition() {
        let onv = FrmOnv::from_spinorbs(5, &[0, 3, 4, 7, 9]);
        let occs = onv.occ_inds();
        let vacs = onv.vac_inds();
        assert_eq!(occs, vec![0, 3, 4, 7, 9]);
        assert_eq!(occs.len() + vacs.len(), onv.nspinorb());
        for &i in &vacs {
            assert!(!onv.get(i));
        }
    }

    #[test]
    fn spin_channels() {
        // 3 sites: alpha on 0, 2; beta on 0
        let onv = FrmOnv::from_sites(3, &[0, 2], &[0]);
        assert_eq!(onv.occ_inds_spin(Spin::Up), vec![0, 2]);
        assert_eq!(onv.occ_inds_spin(Spin::Down), vec![3]);
        assert_eq!(onv.vac_inds_spin(Spin::Up), vec![1]);
        assert_eq!(onv.doubly_occ_sites(), vec![0]);
        assert_eq!(onv.site_nocc(2), 1);
    }

    #[test]
    fn bos_occupations() {
        let mut bos = BosOnv::new(4, 3);
        bos.set(1, 2);
        bos.set(3, 3);
        assert_eq!(bos.nboson(), 5);
        assert_eq!(bos.get(1), 2);
        assert_eq!(bos.nmode(), 4);
    }
}
