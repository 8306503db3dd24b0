use criterion::{black_box, criterion_group, Criterion};
use fciqmc::connection::FrmConn;
use fciqmc::excitgen::pchb::Pchb2200;
use fciqmc::excitgen::FrmExcitGen;
use fciqmc::hamiltonian::general::GeneralFrmHam;
use fciqmc::integrals::{Integrals1e, Integrals2e};
use fciqmc::onv::FrmOnv;
use rand::rngs::SmallRng;
use rand::SeedableRng;

fn dense_ham(nsite: usize) -> GeneralFrmHam {
    let norb = 2 * nsite;
    let mut umat = Integrals2e::new(norb);
    for i in 0..norb {
        for j in 0..i {
            for a in 0..norb {
                for b in 0..a {
                    umat.set(i, j, a, b, 1.0 / (1 + i + j + a + b) as f64);
                }
            }
        }
    }
    GeneralFrmHam::new(0.0, Integrals1e::new(norb), umat)
}

pub fn pchb_build(c: &mut Criterion) {
    let ham = dense_ham(8);
    c.bench_function("Build heat-bath tables 16 spin orbitals", |b| {
        b.iter(|| Pchb2200::new(black_box(&ham)))
    });
}

pub fn pchb_draw(c: &mut Criterion) {
    let ham = dense_ham(8);
    let excit = Pchb2200::new(&ham);
    let src = FrmOnv::from_sites(8, &[0, 2, 4, 6], &[1, 3, 5, 7]);
    let mut rng = SmallRng::seed_from_u64(2);
    let mut conn = FrmConn::new();
    let mut res = 0.0;
    c.bench_function("Draw heat-bath double", |b| {
        b.iter(|| {
            if let Some((prob, helem)) = excit.draw_with_element(black_box(&src), &mut rng, &mut conn)
            {
                res = helem / prob;
            }
        })
    });
}

criterion_group!(benches, pchb_build, pchb_draw,);
