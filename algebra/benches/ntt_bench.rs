use algebra::polynomial::FieldPolynomial;
use algebra::{NttField, NumberTheoryTransform, U32Field};
use criterion::{criterion_group, criterion_main, Criterion};
use rand::prelude::*;

type Fp = U32Field<132120577>;

pub fn criterion_benchmark(c: &mut Criterion) {
    let log_n = 10;
    let n = 1 << log_n;

    let table = Fp::generate_ntt_table(log_n).unwrap();

    let mut rng = StdRng::seed_from_u64(0);
    let poly = FieldPolynomial::<Fp>::random(n, &mut rng);

    c.bench_function(&format!("ntt forward {n}"), |b| {
        b.iter_batched(
            || poly.clone(),
            |p| table.transform_inplace(p),
            criterion::BatchSize::SmallInput,
        )
    });

    let values = table.transform(&poly);
    c.bench_function(&format!("ntt inverse {n}"), |b| {
        b.iter_batched(
            || values.clone(),
            |v| table.inverse_transform_inplace(v),
            criterion::BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
