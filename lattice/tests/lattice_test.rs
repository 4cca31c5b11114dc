use algebra::polynomial::{FieldNttPolynomial, FieldPolynomial};
use algebra::random::DiscreteGaussian;
use algebra::reduce::RingReduce;
use algebra::{Basis, Field, NttField, NumberTheoryTransform, U32Field};
use lattice::{NttRgsw, NttRlweSpace, PolyDecomposeSpace, Rlwe, RlweSpace};
use rand::prelude::*;
use rand_chacha::ChaCha20Rng;

type Fp = U32Field<132120577>;
const P: u32 = 132120577;
const LOG_N: u32 = 8;
const N: usize = 1 << LOG_N;

fn setup() -> (
    ChaCha20Rng,
    <Fp as NttField>::Table,
    FieldPolynomial<Fp>,
    FieldNttPolynomial<Fp>,
    DiscreteGaussian<u32>,
) {
    let mut rng = ChaCha20Rng::seed_from_u64(1234);
    let table = Fp::generate_ntt_table(LOG_N).unwrap();
    let secret_key = FieldPolynomial::<Fp>::random_binary(N, &mut rng);
    let ntt_secret_key = table.transform(&secret_key);
    let gaussian = DiscreteGaussian::new(0.0, 3.2, P - 1).unwrap();
    (rng, table, secret_key, ntt_secret_key, gaussian)
}

/// `b - a·s`, the plaintext plus noise.
fn phase(
    rlwe: &Rlwe<Fp>,
    ntt_secret_key: &FieldNttPolynomial<Fp>,
    table: &<Fp as NttField>::Table,
) -> FieldPolynomial<Fp> {
    let mut a_ntt = table.transform(rlwe.a());
    a_ntt *= ntt_secret_key;
    let a_mul_s = table.inverse_transform_inplace(a_ntt);

    let mut m = rlwe.b().clone();
    m -= &a_mul_s;
    m
}

fn centred(v: u32) -> i64 {
    if v > P / 2 {
        v as i64 - P as i64
    } else {
        v as i64
    }
}

#[test]
fn rlwe_zero_sample_has_small_phase() {
    let (mut rng, table, _sk, ntt_sk, gaussian) = setup();

    let sample = Rlwe::generate_random_zero_sample(&ntt_sk, gaussian, &table, &mut rng);
    let m = phase(&sample, &ntt_sk, &table);

    assert!(m.iter().all(|&v| centred(v).abs() < 64));
}

#[test]
fn external_product_by_one_preserves_message() {
    let (mut rng, table, _sk, ntt_sk, gaussian) = setup();
    let basis = Basis::<Fp>::new(7);

    let delta = P >> 3;

    // RLWE(Δ·1) as a trivial sample
    let mut message = FieldPolynomial::<Fp>::zero(N);
    message[0] = delta;
    let mut rlwe = Rlwe::generate_random_zero_sample(&ntt_sk, gaussian, &table, &mut rng);
    *rlwe.b_mut() += &message;

    let rgsw_one =
        NttRgsw::generate_random_one_sample(&ntt_sk, basis, gaussian, &table, &mut rng);
    let rgsw_zero =
        NttRgsw::generate_random_zero_sample(&ntt_sk, basis, gaussian, &table, &mut rng);

    let mut decompose_space = PolyDecomposeSpace::new(N);
    let mut median = NttRlweSpace::new(N);
    let mut product = RlweSpace::new(N);

    rlwe.mul_ntt_rgsw_inplace(
        &rgsw_one,
        &table,
        &mut decompose_space,
        &mut median,
        &mut product,
    );
    let m = phase(&product, &ntt_sk, &table);
    assert!(centred(Fp::MODULUS.reduce_sub(m[0], delta)).abs() < (delta / 8) as i64);

    rlwe.mul_ntt_rgsw_inplace(
        &rgsw_zero,
        &table,
        &mut decompose_space,
        &mut median,
        &mut product,
    );
    let m = phase(&product, &ntt_sk, &table);
    assert!(centred(m[0]).abs() < (delta / 8) as i64);
}

#[test]
fn extract_lwe_matches_constant_coefficient() {
    let (mut rng, table, sk, ntt_sk, gaussian) = setup();

    let delta = P >> 3;
    let mut rlwe = Rlwe::generate_random_zero_sample(&ntt_sk, gaussian, &table, &mut rng);
    let mut message = FieldPolynomial::<Fp>::zero(N);
    message[0] = delta;
    message[1] = Fp::MODULUS.reduce_mul(delta, 3);
    *rlwe.b_mut() += &message;

    let lwe = rlwe.extract_lwe_locally();
    let phase = Fp::MODULUS.reduce_sub(
        lwe.b(),
        Fp::MODULUS.reduce_dot_product(lwe.a(), sk.as_slice()),
    );

    assert!(centred(Fp::MODULUS.reduce_sub(phase, delta)).abs() < 64);
}

#[test]
fn monomial_multiplication_rotates_negacyclically() {
    let mut poly = FieldPolynomial::<Fp>::zero(N);
    poly[0] = 1;
    poly[1] = 7;

    // trivial RLWE carrying the polynomial in its body
    let rhs = Rlwe::new(FieldPolynomial::zero(N), poly);

    // r < N: plain rotation
    let mut acc = Rlwe::<Fp>::zero(N);
    acc.add_assign_rhs_mul_monic_monomial(&rhs, N, 2);
    assert_eq!(acc.b()[2], 1);
    assert_eq!(acc.b()[3], 7);

    // rotation across the degree boundary picks up a sign flip
    let mut acc = Rlwe::<Fp>::zero(N);
    acc.add_assign_rhs_mul_monic_monomial(&rhs, N, N - 1);
    assert_eq!(acc.b()[N - 1], 1);
    assert_eq!(acc.b()[0], P - 7);

    // r in [N, 2N): X^N = -1
    let mut acc = Rlwe::<Fp>::zero(N);
    acc.add_assign_rhs_mul_monic_monomial(&rhs, N, N + 2);
    assert_eq!(acc.b()[2], P - 1);
    assert_eq!(acc.b()[3], P - 7);
}
