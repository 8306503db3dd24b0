use criterion::{black_box, criterion_group, Criterion};
use fciqmc::alias::Aliaser;
use rand::rngs::SmallRng;
use rand::SeedableRng;

pub fn alias_build(c: &mut Criterion) {
    let weights: Vec<f64> = (0..4096).map(|i| ((i * 37) % 101) as f64).collect();
    c.bench_function("Build alias table 4096 bins", |b| {
        b.iter(|| Aliaser::new(black_box(&weights)).unwrap())
    });
}

pub fn alias_draw(c: &mut Criterion) {
    let weights: Vec<f64> = (0..4096).map(|i| ((i * 37) % 101) as f64).collect();
    let aliaser = Aliaser::new(&weights).unwrap();
    let mut rng = SmallRng::seed_from_u64(1);
    let mut res = 0usize;
    c.bench_function("Draw from alias table 4096 bins", |b| {
        b.iter(|| {
            res = aliaser.draw(black_box(&mut rng));
        })
    });
}

criterion_group!(benches, alias_build, alias_draw,);
