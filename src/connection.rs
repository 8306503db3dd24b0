//! Connections between occupation number vectors.
//!
//! A connection is the second-quantized operator string transforming one
//! ONV into another: the set difference of their occupied indices, split
//! into an annihilation list (occupied in the source only) and a creation
//! list (occupied in the destination only). For fermions the string also
//! carries the $\pm 1$ phase demanded by antisymmetry.

use crate::exsig::Exsig;
use crate::onv::{BosOnv, FrmBosOnv, FrmOnv};

const NBIT_WORD: usize = u64::BITS as usize;

/// Fermionic connection.
/// # Definition
/// Ascending, disjoint lists of annihilated and created spin orbital
/// indices. An index never appears in both lists: a connection produced by
/// [FrmConn::connect] records only the net edit between two states, and
/// excitation generators must respect the same contract.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrmConn {
    ann: Vec<usize>,
    cre: Vec<usize>,
}

impl FrmConn {
    pub fn new() -> Self {
        FrmConn::default()
    }

    pub fn clear(&mut self) {
        self.ann.clear();
        self.cre.clear();
    }

    #[inline(always)]
    pub fn ann(&self) -> &[usize] {
        &self.ann
    }

    #[inline(always)]
    pub fn cre(&self) -> &[usize] {
        &self.cre
    }

    /// Overwrite with a single excitation $i\to a$.
    pub fn set_single(&mut self, i: usize, a: usize) {
        debug_assert_ne!(i, a, "coincident annihilation and creation index");
        self.clear();
        self.ann.push(i);
        self.cre.push(a);
    }

    /// Overwrite with a double excitation $ij\to ab$.
    pub fn set_double(&mut self, i: usize, j: usize, a: usize, b: usize) {
        debug_assert!(i != j && a != b, "repeated operator index");
        debug_assert!(
            i != a && i != b && j != a && j != b,
            "coincident annihilation and creation index"
        );
        self.clear();
        self.ann.push(i.min(j));
        self.ann.push(i.max(j));
        self.cre.push(a.min(b));
        self.cre.push(a.max(b));
    }

    /// Scan two ONVs word by word and record their occupation difference.
    pub fn connect(&mut self, src: &FrmOnv, dst: &FrmOnv) {
        debug_assert_eq!(src.nsite(), dst.nsite(), "src and dst bases differ");
        self.clear();
        for iword in 0..src.nword() {
            let bit_offset = iword * NBIT_WORD;
            let src_work = src.word(iword);
            let dst_work = dst.word(iword);
            let mut work = src_work & !dst_work;
            while work != 0 {
                self.ann.push(work.trailing_zeros() as usize + bit_offset);
                work &= work - 1;
            }
            let mut work = dst_work & !src_work;
            while work != 0 {
                self.cre.push(work.trailing_zeros() as usize + bit_offset);
                work &= work - 1;
            }
        }
    }

    /// Apply the operator string to `src`, producing the destination ONV.
    /// Inverse of [FrmConn::connect]:
    /// `connect(src, &apply(src)) == self` for any connection produced by
    /// `connect`.
    pub fn apply(&self, src: &FrmOnv) -> FrmOnv {
        debug_assert!(self.is_valid(), "operator lists not ascending/disjoint");
        let mut dst = src.clone();
        for &i in &self.ann {
            debug_assert!(src.get(i), "annihilation index vacant in src ONV");
            dst.clr(i);
        }
        for &a in &self.cre {
            debug_assert!(!src.get(a), "creation index occupied in src ONV");
            dst.set(a);
        }
        dst
    }

    /// The connection performing the reverse edit.
    pub fn reverse(&self) -> FrmConn {
        FrmConn {
            ann: self.cre.clone(),
            cre: self.ann.clone(),
        }
    }

    /// Antisymmetry phase of the operator string applied to `src`.
    /// # Definition
    /// Walks the merged ascending sequence of annihilation and creation
    /// indices. The parity contribution of one operator at index $p$ is
    /// the number of electrons of `src` below $p$; whenever a creation
    /// operator is passed while an odd number of annihilation operators
    /// remain unapplied, an extra flip accounts for the electrons already
    /// removed. Closed-form corrections for the ordering of the lists
    /// complete the count.
    ///
    /// The merged walk visits indices in ascending order, so the popcount
    /// below each index is accumulated as a running word parity advanced
    /// alongside the walk. No per-word storage is needed and the cost is
    /// O(#words + #operators) for any basis the ONV type admits.
    /// # Returns
    /// * __`phase`__ - `true` when the operator string introduces a sign
    /// of $-1$.
    pub fn phase(&self, src: &FrmOnv) -> bool {
        debug_assert!(self.is_valid(), "operator lists not ascending/disjoint");
        // parity of the popcount of all words below `parity_word`
        let mut parity_word = 0usize;
        let mut parity = false;
        let mut independent_phase = |ibit: usize| -> bool {
            let iword = ibit / NBIT_WORD;
            while parity_word < iword {
                parity ^= src.word(parity_word).count_ones() & 1 != 0;
                parity_word += 1;
            }
            let below = src.word(iword) & ((1u64 << (ibit % NBIT_WORD)) - 1);
            parity ^ (below.count_ones() & 1 != 0)
        };

        let mut out = false;
        let (mut ia, mut ic) = (0usize, 0usize);
        while ia < self.ann.len() || ic < self.cre.len() {
            if ic < self.cre.len() && (ia == self.ann.len() || self.cre[ic] < self.ann[ia]) {
                let ann_remain_odd = (self.ann.len() - ia) & 1 != 0;
                out ^= independent_phase(self.cre[ic]) ^ ann_remain_odd;
                ic += 1;
            } else {
                debug_assert!(
                    ic == self.cre.len() || self.ann[ia] < self.cre[ic],
                    "coincident annihilation and creation index"
                );
                out ^= independent_phase(self.ann[ia]);
                ia += 1;
            }
        }
        out ^= (self.ann.len() / 2) & 1 != 0;
        // nann * ncre is odd only if both are odd
        out ^= (self.ann.len() & 1 != 0) && (self.cre.len() & 1 != 0);
        out
    }

    /// Excitation signature of the operator string.
    pub fn exsig(&self) -> Exsig {
        Exsig::encode(self.cre.len() as u32, self.ann.len() as u32, 0, 0)
    }

    fn is_valid(&self) -> bool {
        let asc = |v: &[usize]| v.windows(2).all(|w| w[0] < w[1]);
        let disjoint = self.ann.iter().all(|i| !self.cre.contains(i));
        asc(&self.ann) && asc(&self.cre) && disjoint
    }
}

/// A bosonic operator acting `nop` times on one mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BosOp {
    pub imode: usize,
    pub nop: u32,
}

/// Bosonic connection: net occupation change per mode, compacted into
/// operator counts. No phase arises for bosons.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BosConn {
    ann: Vec<BosOp>,
    cre: Vec<BosOp>,
}

impl BosConn {
    pub fn new() -> Self {
        BosConn::default()
    }

    pub fn clear(&mut self) {
        self.ann.clear();
        self.cre.clear();
    }

    #[inline(always)]
    pub fn ann(&self) -> &[BosOp] {
        &self.ann
    }

    #[inline(always)]
    pub fn cre(&self) -> &[BosOp] {
        &self.cre
    }

    /// Overwrite with a single boson creation on `imode`.
    pub fn set_cre(&mut self, imode: usize, nop: u32) {
        self.clear();
        self.cre.push(BosOp { imode, nop });
    }

    /// Overwrite with a single boson annihilation on `imode`.
    pub fn set_ann(&mut self, imode: usize, nop: u32) {
        self.clear();
        self.ann.push(BosOp { imode, nop });
    }

    /// Overwrite with a number-conserving transfer of one boson from
    /// `jmode` to `imode`.
    pub fn set_transfer(&mut self, imode: usize, jmode: usize) {
        debug_assert_ne!(imode, jmode, "transfer between identical modes");
        self.clear();
        self.ann.push(BosOp { imode: jmode, nop: 1 });
        self.cre.push(BosOp { imode, nop: 1 });
    }

    /// Record the multiplicity difference between two bosonic ONVs.
    pub fn connect(&mut self, src: &BosOnv, dst: &BosOnv) {
        debug_assert_eq!(src.nmode(), dst.nmode(), "src and dst bases differ");
        self.clear();
        for imode in 0..src.nmode() {
            let s = src.get(imode);
            let d = dst.get(imode);
            if d < s {
                self.ann.push(BosOp { imode, nop: s - d });
            } else if d > s {
                self.cre.push(BosOp { imode, nop: d - s });
            }
        }
    }

    /// Apply the operator counts to `src`. Inverse of [BosConn::connect].
    pub fn apply(&self, src: &BosOnv) -> BosOnv {
        let mut dst = src.clone();
        for op in &self.ann {
            debug_assert!(src.get(op.imode) >= op.nop, "mode under-occupied in src");
            dst.set(op.imode, src.get(op.imode) - op.nop);
        }
        for op in &self.cre {
            let n = dst.get(op.imode) + op.nop;
            debug_assert!(n <= src.nmax(), "occupation exceeds cutoff");
            dst.set(op.imode, n);
        }
        dst
    }

    /// Total numbers of creation and annihilation operators.
    pub fn nops(&self) -> (u32, u32) {
        let ncre = self.cre.iter().map(|op| op.nop).sum();
        let nann = self.ann.iter().map(|op| op.nop).sum();
        (ncre, nann)
    }

    pub fn exsig(&self) -> Exsig {
        let (ncre, nann) = self.nops();
        Exsig::encode(0, 0, ncre, nann)
    }
}

/// Connection between two fermion-boson product states.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrmBosConn {
    pub frm: FrmConn,
    pub bos: BosConn,
}

impl FrmBosConn {
    pub fn new() -> Self {
        FrmBosConn::default()
    }

    pub fn clear(&mut self) {
        self.frm.clear();
        self.bos.clear();
    }

    pub fn connect(&mut self, src: &FrmBosOnv, dst: &FrmBosOnv) {
        self.frm.connect(&src.frm, &dst.frm);
        self.bos.connect(&src.bos, &dst.bos);
    }

    pub fn apply(&self, src: &FrmBosOnv) -> FrmBosOnv {
        FrmBosOnv {
            frm: self.frm.apply(&src.frm),
            bos: self.bos.apply(&src.bos),
        }
    }

    /// Combined signature over both species.
    pub fn exsig(&self) -> Exsig {
        let (nbc, nba) = self.bos.nops();
        Exsig::encode(
            self.frm.cre().len() as u32,
            self.frm.ann().len() as u32,
            nbc,
            nba,
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::onv::FrmOnv;
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    fn random_onv(rng: &mut SmallRng, nsite: usize, nelec: usize) -> FrmOnv {
        let mut onv = FrmOnv::new(nsite);
        while onv.nsetbit() < nelec {
            onv.set(rng.gen_range(0..2 * nsite));
        }
        onv
    }

    #[test]
    fn connect_apply_round_trip() {
        let mut rng = SmallRng::seed_from_u64(13);
        let mut conn = FrmConn::new();
        for _ in 0..500 {
            let src = random_onv(&mut rng, 40, 11);
            let dst = random_onv(&mut rng, 40, 11);
            conn.connect(&src, &dst);
            assert_eq!(conn.apply(&src), dst);
            let mut conn2 = FrmConn::new();
            conn2.connect(&src, &conn.apply(&src));
            assert_eq!(conn2, conn);
        }
    }

    /// For a single excitation the phase is the parity of the number of
    /// occupied orbitals strictly between the two operator indices.
    #[test]
    fn single_phase_counts_electrons_between() {
        let mut rng = SmallRng::seed_from_u64(7);
        let mut conn = FrmConn::new();
        for _ in 0..500 {
            let src = random_onv(&mut rng, 50, 17);
            let occs = src.occ_inds();
            let vacs = src.vac_inds();
            let i = occs[rng.gen_range(0..occs.len())];
            let a = vacs[rng.gen_range(0..vacs.len())];
            conn.set_single(i, a);
            let (lo, hi) = (i.min(a), i.max(a));
            let nbetween = (lo + 1..hi).filter(|&p| src.get(p)).count();
            assert_eq!(conn.phase(&src), nbetween % 2 == 1, "i={} a={}", i, a);
        }
    }

    /// Applying a connection and then its reverse returns to the original
    /// ONV with no net sign: the forward phase on the source equals the
    /// reverse phase on the destination.
    #[test]
    fn phase_involution() {
        let mut rng = SmallRng::seed_from_u64(23);
        let mut conn = FrmConn::new();
        for _ in 0..500 {
            let src = random_onv(&mut rng, 33, 9);
            let dst = random_onv(&mut rng, 33, 9);
            conn.connect(&src, &dst);
            let rev = conn.reverse();
            assert_eq!(rev.apply(&dst), src);
            assert_eq!(conn.phase(&src), rev.phase(&dst));
        }
    }

    /// The phase must be independent of word boundaries: shifting the same
    /// occupation pattern deeper into a multi-word ONV cannot change it.
    #[test]
    fn phase_word_boundary() {
        let mut conn = FrmConn::new();
        for shift in [0usize, 60, 64, 70] {
            let src = FrmOnv::from_spinorbs(80, &[shift, shift + 1, shift + 2, shift + 5]);
            conn.set_single(shift + 1, shift + 4);
            // one occupied orbital (shift+2) lies strictly between
            assert!(conn.phase(&src), "shift={}", shift);
        }
    }

    /// A basis wide enough that the spin orbital indices span well over
    /// 64 storage words must behave the same as a small one.
    #[test]
    fn phase_on_wide_basis() {
        // 2100 sites: 4200 spin orbitals, 66 words
        let src = FrmOnv::from_spinorbs(2100, &[3, 4090, 4100, 4105]);
        assert!(src.nword() > 64);
        let mut conn = FrmConn::new();
        conn.set_single(4090, 4104);
        // one occupied orbital (4100) lies strictly between
        assert!(conn.phase(&src));
        conn.set_single(3, 4106);
        // three occupied orbitals lie strictly between
        assert!(conn.phase(&src));
        conn.set_single(4105, 4101);
        // none strictly between
        assert!(!conn.phase(&src));
    }

    #[test]
    fn exsig_of_connections() {
        let src = FrmOnv::from_spinorbs(4, &[0, 1, 4, 5]);
        let dst = FrmOnv::from_spinorbs(4, &[0, 2, 4, 6]);
        let mut conn = FrmConn::new();
        conn.connect(&src, &dst);
        assert_eq!(conn.exsig(), crate::exsig::EX_2200);
    }

    #[test]
    fn bos_connect_apply() {
        let src = BosOnv::from_occs(&[0, 2, 1, 0], 4);
        let dst = BosOnv::from_occs(&[1, 0, 1, 2], 4);
        let mut conn = BosConn::new();
        conn.connect(&src, &dst);
        assert_eq!(conn.apply(&src), dst);
        let (ncre, nann) = conn.nops();
        assert_eq!((ncre, nann), (3, 2));
        assert_eq!(conn.exsig(), Exsig::encode(0, 0, 3, 2));
    }
}
