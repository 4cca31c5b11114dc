use boolean_fhe::{Decryptor, Encryptor, Evaluator, KeyGen};
use criterion::{criterion_group, criterion_main, Criterion};
use fhe_core::PN10QP27;
use rand::prelude::*;
use rand_chacha::ChaCha20Rng;

pub fn criterion_benchmark(c: &mut Criterion) {
    let mut rng = ChaCha20Rng::seed_from_u64(0xBE);

    let skp = KeyGen::generate_secret_key(*PN10QP27, &mut rng);
    let encryptor = Encryptor::new(&skp);
    let decryptor = Decryptor::new(&skp);
    let evaluator = Evaluator::new(&skp, &mut rng);

    let c0 = encryptor.encrypt(true, &mut rng);
    let c1 = encryptor.encrypt(false, &mut rng);
    let c2 = encryptor.encrypt(true, &mut rng);

    c.bench_function("nand", |b| b.iter(|| evaluator.nand(&c0, &c1).unwrap()));
    c.bench_function("xor", |b| b.iter(|| evaluator.xor(&c0, &c1).unwrap()));
    c.bench_function("majority", |b| {
        b.iter(|| evaluator.majority(&c0, &c1, &c2).unwrap())
    });
    c.bench_function("not", |b| b.iter(|| evaluator.not(&c0)));
    c.bench_function("refresh", |b| b.iter(|| evaluator.refresh(&c0).unwrap()));

    let refreshed = evaluator.refresh(&c0).unwrap();
    assert!(decryptor.decrypt(&refreshed));
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
