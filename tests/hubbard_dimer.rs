use assert::close;
use fciqmc::connection::FrmConn;
use fciqmc::excitgen::hubbard::HubbardUniform;
use fciqmc::excitgen::FrmExcitGen;
use fciqmc::hamiltonian::hubbard::HubbardFrmHam;
use fciqmc::hamiltonian::FrmHam;
use fciqmc::lattice::Lattice;
use fciqmc::onv::FrmOnv;
use rand_mt::Mt64;

// Hubbard's model $U$ parameter
const CONS_U: f64 = 4.0;
// Hubbard's model $t$ parameter
const CONS_T: f64 = 1.0;

const SEED: u64 = 14588210878733;

fn dimer() -> HubbardFrmHam {
    HubbardFrmHam::new(Lattice::ortho_1d(2, false), CONS_U, CONS_T)
}

/// The half-filled dimer basis in the $S_z=0$ sector contains the two
/// doubly occupied states and the two covalent states. All matrix elements
/// of the 4x4 Hamiltonian are checked against their analytic values.
#[test]
fn dimer_matrix_elements_are_analytic() {
    let ham = dimer();
    let basis = [
        FrmOnv::from_sites(2, &[0], &[0]),
        FrmOnv::from_sites(2, &[1], &[1]),
        FrmOnv::from_sites(2, &[0], &[1]),
        FrmOnv::from_sites(2, &[1], &[0]),
    ];
    for onv in &basis[..2] {
        close(ham.get_element_0000(onv), CONS_U, 1e-13);
    }
    for onv in &basis[2..] {
        close(ham.get_element_0000(onv), 0.0, 1e-13);
    }
    // every ionic-covalent pair is connected by one hop of magnitude t
    let mut conn = FrmConn::new();
    for ionic in &basis[..2] {
        for covalent in &basis[2..] {
            conn.connect(ionic, covalent);
            close(ham.get_element(ionic, &conn).abs(), CONS_T, 1e-13);
        }
    }
    // the two ionic states are not connected (a double hop)
    conn.connect(&basis[0], &basis[1]);
    close(ham.get_element(&basis[0], &conn), 0.0, 1e-13);
}

/// The hopping term is hermitian: the element of every connection equals
/// the element of its reverse from the destination state.
#[test]
fn elements_are_hermitian() {
    let ham = dimer();
    let src = FrmOnv::from_sites(2, &[0], &[0]);
    let dst = FrmOnv::from_sites(2, &[1], &[0]);
    let mut conn = FrmConn::new();
    conn.connect(&src, &dst);
    let forward = ham.get_element(&src, &conn);
    let reverse_conn = conn.reverse();
    let backward = ham.get_element(&dst, &reverse_conn);
    close(forward, backward, 1e-13);
}

/// Spawning weights helem/prob drawn by the uniform hopping generator,
/// accumulated per destination, reproduce the exact off-diagonal row of
/// the Hamiltonian.
#[test]
fn sampled_row_converges_to_exact() {
    env_logger::init();
    let ham = dimer();
    let excit = HubbardUniform::new(&ham);
    let src = FrmOnv::from_sites(2, &[0], &[0]);
    let mut rng = Mt64::new(SEED);
    let mut conn = FrmConn::new();

    const NDRAW: usize = 200_000;
    let mut acc = std::collections::HashMap::new();
    for _ in 0..NDRAW {
        if let Some((prob, helem)) = excit.draw_with_element(&src, &mut rng, &mut conn) {
            let dst = conn.apply(&src);
            *acc.entry(dst).or_insert(0.0) += helem / prob;
        }
    }
    // both electrons can only hop to site 1, each drawn with prob 1/2
    assert_eq!(acc.len(), 2);
    for (dst, sum) in acc {
        conn.connect(&src, &dst);
        let exact = ham.get_element(&src, &conn);
        close(sum / NDRAW as f64, exact, 0.05);
    }
}
