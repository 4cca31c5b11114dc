use boolean_fhe::{BitCiphertext, Decryptor, Encryptor, Evaluator, KeyGen};
use fhe_core::{ByteCodec, FheError, Fp27, LweCiphertext, ParameterPreset, PN10QP27};
use once_cell::sync::Lazy;
use rand::prelude::*;
use rand_chacha::ChaCha20Rng;

struct Context {
    evaluator: Evaluator<u16, Fp27>,
    encryptor: Encryptor<u16>,
    decryptor: Decryptor<u16>,
}

static CONTEXT: Lazy<Context> = Lazy::new(|| {
    let mut rng = ChaCha20Rng::seed_from_u64(0xB001);
    let skp = KeyGen::generate_secret_key(*PN10QP27, &mut rng);
    Context {
        encryptor: Encryptor::new(&skp),
        decryptor: Decryptor::new(&skp),
        evaluator: Evaluator::new(&skp, &mut rng),
    }
});

fn encrypt(m: bool) -> BitCiphertext<u16> {
    let mut rng = ChaCha20Rng::from_entropy();
    CONTEXT.encryptor.encrypt(m, &mut rng)
}

#[test]
fn not_is_free_and_correct() {
    for m in [false, true] {
        let c = encrypt(m);
        assert_eq!(CONTEXT.decryptor.decrypt(&CONTEXT.evaluator.not(&c)), !m);
    }
}

#[test]
fn two_input_gates_match_truth_tables() {
    let ctx = &*CONTEXT;
    for a in [false, true] {
        for b in [false, true] {
            let ca = encrypt(a);
            let cb = encrypt(b);

            let cases: [(&str, BitCiphertext<u16>, bool); 6] = [
                ("and", ctx.evaluator.and(&ca, &cb).unwrap(), a & b),
                ("nand", ctx.evaluator.nand(&ca, &cb).unwrap(), !(a & b)),
                ("or", ctx.evaluator.or(&ca, &cb).unwrap(), a | b),
                ("nor", ctx.evaluator.nor(&ca, &cb).unwrap(), !(a | b)),
                ("xor", ctx.evaluator.xor(&ca, &cb).unwrap(), a ^ b),
                ("xnor", ctx.evaluator.xnor(&ca, &cb).unwrap(), !(a ^ b)),
            ];

            for (name, c, expected) in cases {
                assert_eq!(
                    ctx.decryptor.decrypt(&c),
                    expected,
                    "{name}({a}, {b}) decrypted wrong"
                );
            }
        }
    }
}

#[test]
fn and_true_false_is_false() {
    let c = CONTEXT
        .evaluator
        .and(&encrypt(true), &encrypt(false))
        .unwrap();
    assert!(!CONTEXT.decryptor.decrypt(&c));
}

#[test]
fn xor_true_true_exercises_the_doubled_sum_wrap() {
    let c = CONTEXT
        .evaluator
        .xor(&encrypt(true), &encrypt(true))
        .unwrap();
    assert!(!CONTEXT.decryptor.decrypt(&c));
}

#[test]
fn majority_is_single_bootstrap_and_correct() {
    let ctx = &*CONTEXT;

    // the seed scenario
    let c = ctx
        .evaluator
        .majority(&encrypt(true), &encrypt(false), &encrypt(true))
        .unwrap();
    assert!(ctx.decryptor.decrypt(&c));

    for bits in 0..8u8 {
        let (a, b, c) = (bits & 1 != 0, bits & 2 != 0, bits & 4 != 0);
        let result = ctx
            .evaluator
            .majority(&encrypt(a), &encrypt(b), &encrypt(c))
            .unwrap();
        let expected = (a & b) | (b & c) | (a & c);
        assert_eq!(ctx.decryptor.decrypt(&result), expected);
    }
}

#[test]
fn three_input_trees_and_mux() {
    let ctx = &*CONTEXT;
    for bits in 0..8u8 {
        let (a, b, c) = (bits & 1 != 0, bits & 2 != 0, bits & 4 != 0);
        let (ca, cb, cc) = (encrypt(a), encrypt(b), encrypt(c));

        assert_eq!(
            ctx.decryptor.decrypt(&ctx.evaluator.and3(&ca, &cb, &cc).unwrap()),
            a & b & c
        );
        assert_eq!(
            ctx.decryptor.decrypt(&ctx.evaluator.or3(&ca, &cb, &cc).unwrap()),
            a | b | c
        );
        assert_eq!(
            ctx.decryptor.decrypt(&ctx.evaluator.nand3(&ca, &cb, &cc).unwrap()),
            !(a & b & c)
        );
        assert_eq!(
            ctx.decryptor.decrypt(&ctx.evaluator.nor3(&ca, &cb, &cc).unwrap()),
            !(a | b | c)
        );
        assert_eq!(
            ctx.decryptor.decrypt(&ctx.evaluator.mux(&ca, &cb, &cc).unwrap()),
            if a { b } else { c }
        );
    }
}

#[test]
fn negated_input_gate_variants() {
    let ctx = &*CONTEXT;
    for a in [false, true] {
        for b in [false, true] {
            let (ca, cb) = (encrypt(a), encrypt(b));
            assert_eq!(
                ctx.decryptor.decrypt(&ctx.evaluator.and_not_left(&ca, &cb).unwrap()),
                !a & b
            );
            assert_eq!(
                ctx.decryptor.decrypt(&ctx.evaluator.and_not_right(&ca, &cb).unwrap()),
                a & !b
            );
            assert_eq!(
                ctx.decryptor.decrypt(&ctx.evaluator.or_not_left(&ca, &cb).unwrap()),
                !a | b
            );
            assert_eq!(
                ctx.decryptor.decrypt(&ctx.evaluator.or_not_right(&ca, &cb).unwrap()),
                a | !b
            );
        }
    }
}

#[test]
fn de_morgan_holds_on_the_bit_layer() {
    let ctx = &*CONTEXT;
    for a in [false, true] {
        for b in [false, true] {
            let (ca, cb) = (encrypt(a), encrypt(b));
            let lhs = ctx.evaluator.not(&ctx.evaluator.and(&ca, &cb).unwrap());
            let rhs = ctx
                .evaluator
                .or(&ctx.evaluator.not(&ca), &ctx.evaluator.not(&cb))
                .unwrap();
            assert_eq!(ctx.decryptor.decrypt(&lhs), ctx.decryptor.decrypt(&rhs));
        }
    }
}

#[test]
fn refresh_chain_keeps_the_bit_alive() {
    let ctx = &*CONTEXT;
    let mut c = encrypt(true);
    for _ in 0..32 {
        c = ctx.evaluator.refresh(&c).unwrap();
    }
    let (m, noise) = ctx.decryptor.decrypt_with_noise(&c);
    assert!(m);
    assert!(noise < 1024u16);
}

#[test]
#[ignore = "long refresh marathon, run explicitly"]
fn refresh_chain_survives_a_thousand_rounds() {
    let ctx = &*CONTEXT;
    let mut c = encrypt(true);
    for _ in 0..1000 {
        c = ctx.evaluator.refresh(&c).unwrap();
    }
    assert!(ctx.decryptor.decrypt(&c));
}

#[test]
fn trivial_ciphertexts_feed_gates() {
    let ctx = &*CONTEXT;
    let zero = ctx.evaluator.trivial(false);
    let one = ctx.evaluator.trivial(true);

    assert!(!ctx.decryptor.decrypt(&zero));
    assert!(ctx.decryptor.decrypt(&one));

    let c = ctx.evaluator.or(&zero, &encrypt(true)).unwrap();
    assert!(ctx.decryptor.decrypt(&c));
    let c = ctx.evaluator.and(&one, &encrypt(false)).unwrap();
    assert!(!ctx.decryptor.decrypt(&c));
}

#[test]
fn foreign_preset_is_rejected_before_any_work() {
    let ctx = &*CONTEXT;
    let c = encrypt(true);
    let foreign = BitCiphertext::new(
        LweCiphertext::<u16>::zero(ParameterPreset::PN11QP27.lwe_dimension()),
        ParameterPreset::PN11QP27,
    );

    assert!(matches!(
        ctx.evaluator.and(&c, &foreign),
        Err(FheError::ParameterMismatch { .. })
    ));
    assert!(matches!(
        ctx.evaluator.refresh(&foreign),
        Err(FheError::ParameterMismatch { .. })
    ));
}

#[test]
fn bit_ciphertext_round_trips_bit_identically() {
    let c = encrypt(true);
    let bytes = c.to_bytes();
    let parsed = BitCiphertext::<u16>::from_bytes(&bytes).unwrap();
    assert_eq!(parsed, c);
    assert_eq!(parsed.to_bytes(), bytes);
    assert!(CONTEXT.decryptor.decrypt(&parsed));
}
