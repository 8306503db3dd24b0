use assert::close;
use fciqmc::connection::FrmConn;
use fciqmc::excitgen::hubbard::HubbardUniform;
use fciqmc::excitgen::uniform::UniformSingles;
use fciqmc::excitgen::FrmExcitGen;
use fciqmc::hamiltonian::hubbard::HubbardFrmHam;
use fciqmc::hamiltonian::FrmHam;
use fciqmc::integrals::{Integrals1e, Integrals2e};
use fciqmc::hamiltonian::general::GeneralFrmHam;
use fciqmc::lattice::Lattice;
use fciqmc::onv::FrmOnv;
use rand_mt::Mt64;

const SEED: u64 = 7723911480126;

const NDRAW: usize = 1_000_000;
// statistical tolerance for frequencies over NDRAW draws
const STAT_TOL: f64 = 5e-3;

/// Every single excitation of an asymmetric open state is drawn by the
/// uniform generator at its reported frequency, and the total drawn
/// frequency accounts for all probability since the generator has no null
/// draws when both channels are drawable.
#[test]
fn uniform_singles_frequencies() {
    env_logger::init();
    let norb = 12;
    let mut tmat = Integrals1e::new(norb);
    for a in 0..norb {
        for i in 0..norb {
            tmat.set(a, i, 1.0);
        }
    }
    let ham = GeneralFrmHam::new(0.0, tmat, Integrals2e::new(norb));
    let excit = UniformSingles::new(&ham);
    let src = FrmOnv::from_sites(6, &[0, 1, 4], &[2, 5]);
    let mut rng = Mt64::new(SEED);
    let mut conn = FrmConn::new();

    let mut counts = std::collections::HashMap::new();
    for _ in 0..NDRAW {
        let prob = excit
            .draw(&src, &mut rng, &mut conn)
            .expect("no null draws with both channels open");
        close(excit.prob(&src, &conn), prob, 1e-14);
        *counts.entry((conn.ann()[0], conn.cre()[0])).or_insert(0usize) += 1;
    }
    // 3 alpha occ * 3 alpha vac + 2 beta occ * 4 beta vac
    assert_eq!(counts.len(), 17);
    let mut total = 0.0;
    for ((i, a), count) in counts {
        conn.set_single(i, a);
        let prob = excit.prob(&src, &conn);
        close(count as f64 / NDRAW as f64, prob, STAT_TOL);
        total += prob;
    }
    close(total, 1.0, 1e-13);
}

/// Hopping draws on a frustration-free ring: reported probabilities match
/// empirical frequencies, and null draws account for exactly the blocked
/// electron selections.
#[test]
fn hubbard_uniform_frequencies_and_null_fraction() {
    let nsite = 6;
    let ham = HubbardFrmHam::new(Lattice::ortho_1d(nsite, true), 4.0, 1.0);
    let excit = HubbardUniform::new(&ham);
    // the alpha electron at site 1 is enclosed by sites 0 and 2: blocked
    let src = FrmOnv::from_sites(nsite, &[0, 1, 2], &[0, 3]);
    let mut rng = Mt64::new(SEED);
    let mut conn = FrmConn::new();

    let mut counts = std::collections::HashMap::new();
    let mut nnull = 0usize;
    for _ in 0..NDRAW {
        match excit.draw(&src, &mut rng, &mut conn) {
            Some(prob) => {
                close(excit.prob(&src, &conn), prob, 1e-14);
                *counts.entry((conn.ann()[0], conn.cre()[0])).or_insert(0usize) += 1;
            }
            None => nnull += 1,
        }
    }
    // exactly one of the five electrons is blocked
    close(nnull as f64 / NDRAW as f64, 1.0 / 5.0, STAT_TOL);
    for ((i, a), count) in counts {
        conn.set_single(i, a);
        let prob = excit.prob(&src, &conn);
        close(count as f64 / NDRAW as f64, prob, STAT_TOL);
    }
}
