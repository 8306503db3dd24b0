use criterion::{black_box, criterion_group, Criterion};
use fciqmc::connection::FrmConn;
use fciqmc::onv::FrmOnv;

pub fn phase_single_word(c: &mut Criterion) {
    let onv = FrmOnv::from_sites(16, &[0, 2, 4, 6, 8, 10, 12, 14], &[1, 3, 5, 7, 9, 11, 13, 15]);
    let mut conn = FrmConn::new();
    conn.set_single(4, 5);
    let mut res = false;
    c.bench_function("Phase of a single within one word", |b| {
        b.iter(|| {
            res = conn.phase(black_box(&onv));
        })
    });
}

pub fn phase_multi_word(c: &mut Criterion) {
    // 100 sites: 200 spin orbitals over 4 words
    let alpha: Vec<usize> = (0..100).step_by(2).collect();
    let beta: Vec<usize> = (1..100).step_by(2).collect();
    let onv = FrmOnv::from_sites(100, &alpha, &beta);
    let mut conn = FrmConn::new();
    conn.set_double(0, 2, 190, 192);
    let mut res = false;
    c.bench_function("Phase of a word-spanning double", |b| {
        b.iter(|| {
            res = conn.phase(black_box(&onv));
        })
    });
}

criterion_group!(benches, phase_single_word, phase_multi_word,);
