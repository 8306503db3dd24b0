//! Linear combination of two fermionic Hamiltonians.

use crate::connection::FrmConn;
use crate::hamiltonian::FrmHam;
use crate::onv::FrmOnv;

/// Sum $\hat H_1+\lambda\hat H_2$ of two fermionic Hamiltonians over the
/// same basis. Useful for interpolations and for perturbatively coupled
/// model pairs. Term contributions are taken from the first summand only,
/// since the generic union of two contribution tables would require owned
/// storage the trait does not model.
pub struct SumFrmHam<H1: FrmHam, H2: FrmHam> {
    h1: H1,
    h2: H2,
    coeff: f64,
}

impl<H1: FrmHam, H2: FrmHam> SumFrmHam<H1, H2> {
    /// # Arguments
    /// * __`h1`__ - First summand.
    /// * __`h2`__ - Second summand.
    /// * __`coeff`__ - Scalar $\lambda$ multiplying the second summand.
    pub fn new(h1: H1, h2: H2, coeff: f64) -> Self {
        debug_assert_eq!(h1.nsite(), h2.nsite(), "summands of unequal basis size");
        SumFrmHam { h1, h2, coeff }
    }
}

impl<H1: FrmHam, H2: FrmHam> FrmHam for SumFrmHam<H1, H2> {
    fn nsite(&self) -> usize {
        self.h1.nsite()
    }

    fn get_coeff_1100(&self, a: usize, i: usize) -> f64 {
        self.h1.get_coeff_1100(a, i) + self.coeff * self.h2.get_coeff_1100(a, i)
    }

    fn get_coeff_2200(&self, a: usize, b: usize, i: usize, j: usize) -> f64 {
        self.h1.get_coeff_2200(a, b, i, j) + self.coeff * self.h2.get_coeff_2200(a, b, i, j)
    }

    fn get_element_0000(&self, onv: &FrmOnv) -> f64 {
        self.h1.get_element_0000(onv) + self.coeff * self.h2.get_element_0000(onv)
    }

    fn get_element_1100(&self, onv: &FrmOnv, conn: &FrmConn) -> f64 {
        self.h1.get_element_1100(onv, conn) + self.coeff * self.h2.get_element_1100(onv, conn)
    }

    fn get_element_2200(&self, onv: &FrmOnv, conn: &FrmConn) -> f64 {
        self.h1.get_element_2200(onv, conn) + self.coeff * self.h2.get_element_2200(onv, conn)
    }

    fn get_element_3300(&self, onv: &FrmOnv, conn: &FrmConn) -> f64 {
        self.h1.get_element_3300(onv, conn) + self.coeff * self.h2.get_element_3300(onv, conn)
    }

    fn contribs_1100(&self) -> Option<&crate::hamiltonian::TermContribs> {
        self.h1.contribs_1100()
    }

    fn contribs_2200(&self) -> Option<&crate::hamiltonian::TermContribs> {
        self.h1.contribs_2200()
    }

    fn lattice(&self) -> Option<&crate::lattice::Lattice> {
        self.h1.lattice()
    }
}
