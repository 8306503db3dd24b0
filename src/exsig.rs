//! Excitation signatures.
//!
//! A second-quantized operator product is classified by the number of
//! fermion creation, fermion annihilation, boson creation and boson
//! annihilation operators it carries. The four counts are packed into a
//! single integer so that Hamiltonian terms and excitation generators can
//! be looked up by rank in O(1).

/// Number of bits reserved for each fermionic operator count. This bounds
/// the maximum representable excitation rank, so it is a crate-level policy
/// rather than a hard-coded literal: widen it to express higher-body
/// lattice or transcorrelated models.
pub const NBIT_NOP_FRM: u32 = 3;
/// Number of bits reserved for each bosonic operator count.
pub const NBIT_NOP_BOS: u32 = 2;

const MASK_FRM: u32 = (1 << NBIT_NOP_FRM) - 1;
const MASK_BOS: u32 = (1 << NBIT_NOP_BOS) - 1;

/// Total number of distinct valid signatures.
pub const NDISTINCT: usize = 1 << (2 * NBIT_NOP_FRM + 2 * NBIT_NOP_BOS);

/// Compact encoding of the rank of a second-quantized operator product.
/// # Definition
/// The packed fields are, from the least significant bit:
/// fermion creation count, fermion annihilation count, boson creation
/// count, boson annihilation count. Out-of-range counts encode to the
/// reserved [Exsig::INVALID] sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Exsig(u32);

impl Exsig {
    /// Reserved sentinel for unrepresentable operator products.
    pub const INVALID: Exsig = Exsig(u32::MAX);

    pub const fn encode(nfrm_cre: u32, nfrm_ann: u32, nbos_cre: u32, nbos_ann: u32) -> Exsig {
        if nfrm_cre > MASK_FRM || nfrm_ann > MASK_FRM || nbos_cre > MASK_BOS || nbos_ann > MASK_BOS
        {
            return Exsig::INVALID;
        }
        Exsig(
            nfrm_cre
                | (nfrm_ann << NBIT_NOP_FRM)
                | (nbos_cre << (2 * NBIT_NOP_FRM))
                | (nbos_ann << (2 * NBIT_NOP_FRM + NBIT_NOP_BOS)),
        )
    }

    #[inline(always)]
    pub const fn nfrm_cre(self) -> u32 {
        self.0 & MASK_FRM
    }

    #[inline(always)]
    pub const fn nfrm_ann(self) -> u32 {
        (self.0 >> NBIT_NOP_FRM) & MASK_FRM
    }

    #[inline(always)]
    pub const fn nbos_cre(self) -> u32 {
        (self.0 >> (2 * NBIT_NOP_FRM)) & MASK_BOS
    }

    #[inline(always)]
    pub const fn nbos_ann(self) -> u32 {
        (self.0 >> (2 * NBIT_NOP_FRM + NBIT_NOP_BOS)) & MASK_BOS
    }

    #[inline(always)]
    pub const fn is_valid(self) -> bool {
        (self.0 as usize) < NDISTINCT
    }

    /// True when the product conserves the fermion number.
    #[inline(always)]
    pub const fn conserves_nfrm(self) -> bool {
        self.nfrm_cre() == self.nfrm_ann()
    }

    /// True when the product conserves the boson number.
    #[inline(always)]
    pub const fn conserves_nbos(self) -> bool {
        self.nbos_cre() == self.nbos_ann()
    }

    /// True when no bosonic operators appear.
    #[inline(always)]
    pub const fn is_pure_frm(self) -> bool {
        self.nbos_cre() == 0 && self.nbos_ann() == 0
    }

    /// True when no fermionic operators appear.
    #[inline(always)]
    pub const fn is_pure_bos(self) -> bool {
        self.nfrm_cre() == 0 && self.nfrm_ann() == 0
    }

    /// True when `self` can arise as an occupied contraction of a term with
    /// rank signature `ranksig`, i.e. the same number of fermionic creation
    /// and annihilation operators have been contracted away and likewise
    /// for the bosonic operators.
    pub const fn is_contrib_of(self, ranksig: Exsig) -> bool {
        if !self.is_valid() || !ranksig.is_valid() {
            return false;
        }
        let dc = ranksig.nfrm_cre() as i64 - self.nfrm_cre() as i64;
        let da = ranksig.nfrm_ann() as i64 - self.nfrm_ann() as i64;
        let dbc = ranksig.nbos_cre() as i64 - self.nbos_cre() as i64;
        let dba = ranksig.nbos_ann() as i64 - self.nbos_ann() as i64;
        dc >= 0 && dc == da && dbc >= 0 && dbc == dba
    }

    pub const fn to_int(self) -> u32 {
        self.0
    }

    /// Reinterpret a packed integer as a signature.
    pub const fn from_int(i: u32) -> Exsig {
        Exsig(i)
    }
}

impl std::fmt::Display for Exsig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if !self.is_valid() {
            return write!(f, "invalid");
        }
        write!(
            f,
            "{}{}{}{}",
            self.nfrm_cre(),
            self.nfrm_ann(),
            self.nbos_cre(),
            self.nbos_ann()
        )
    }
}

/// Diagonal (no operators).
pub const EX_0000: Exsig = Exsig::encode(0, 0, 0, 0);
/// Fermionic single excitation.
pub const EX_1100: Exsig = Exsig::encode(1, 1, 0, 0);
/// Fermionic double excitation.
pub const EX_2200: Exsig = Exsig::encode(2, 2, 0, 0);
/// Fermionic triple excitation (transcorrelated terms only).
pub const EX_3300: Exsig = Exsig::encode(3, 3, 0, 0);
/// Bosonic number-conserving single mode transfer.
pub const EX_0011: Exsig = Exsig::encode(0, 0, 1, 1);
/// Single boson creation (ladder).
pub const EX_0010: Exsig = Exsig::encode(0, 0, 1, 0);
/// Single boson annihilation (ladder).
pub const EX_0001: Exsig = Exsig::encode(0, 0, 0, 1);

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn round_trip_whole_domain() {
        for nfc in 0..=MASK_FRM {
            for nfa in 0..=MASK_FRM {
                for nbc in 0..=MASK_BOS {
                    for nba in 0..=MASK_BOS {
                        let e = Exsig::encode(nfc, nfa, nbc, nba);
                        assert!(e.is_valid());
                        assert_eq!(
                            (e.nfrm_cre(), e.nfrm_ann(), e.nbos_cre(), e.nbos_ann()),
                            (nfc, nfa, nbc, nba)
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn overflow_is_sentinel() {
        assert_eq!(Exsig::encode(MASK_FRM + 1, 0, 0, 0), Exsig::INVALID);
        assert_eq!(Exsig::encode(0, MASK_FRM + 1, 0, 0), Exsig::INVALID);
        assert_eq!(Exsig::encode(0, 0, MASK_BOS + 1, 0), Exsig::INVALID);
        assert_eq!(Exsig::encode(0, 0, 0, MASK_BOS + 1), Exsig::INVALID);
        assert!(!Exsig::INVALID.is_valid());
    }

    #[test]
    fn contribs() {
        assert!(EX_0000.is_contrib_of(EX_2200));
        assert!(EX_1100.is_contrib_of(EX_2200));
        assert!(EX_2200.is_contrib_of(EX_2200));
        assert!(!EX_2200.is_contrib_of(EX_1100));
        assert!(!Exsig::encode(2, 1, 0, 0).is_contrib_of(EX_2200));
        assert!(EX_0011.is_contrib_of(Exsig::encode(1, 1, 1, 1)));
    }

    #[test]
    fn conservation_predicates() {
        assert!(EX_1100.conserves_nfrm());
        assert!(!Exsig::encode(1, 0, 0, 0).conserves_nfrm());
        assert!(EX_0011.conserves_nbos());
        assert!(!EX_0010.conserves_nbos());
        assert!(EX_2200.is_pure_frm());
        assert!(EX_0011.is_pure_bos());
    }
}
