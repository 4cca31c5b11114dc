use boolean_fhe::{Decryptor, Encryptor, Evaluator, KeyGen};
use fhe_core::{ByteCodec, FheError, Fp27, PN10QP27};
use integer_fhe::{IntegerDecryptor, IntegerEncryptor, IntegerEvaluator, UintCiphertext};
use once_cell::sync::Lazy;
use rand::prelude::*;
use rand_chacha::ChaCha20Rng;

struct Context {
    evaluator: Evaluator<u16, Fp27>,
    encryptor: IntegerEncryptor<u16>,
    decryptor: IntegerDecryptor<u16>,
    bit_encryptor: Encryptor<u16>,
    bit_decryptor: Decryptor<u16>,
}

static CONTEXT: Lazy<Context> = Lazy::new(|| {
    let mut rng = ChaCha20Rng::seed_from_u64(0x1147);
    let skp = KeyGen::generate_secret_key(*PN10QP27, &mut rng);
    Context {
        encryptor: IntegerEncryptor::new(&skp),
        decryptor: IntegerDecryptor::new(&skp),
        bit_encryptor: Encryptor::new(&skp),
        bit_decryptor: Decryptor::new(&skp),
        evaluator: Evaluator::new(&skp, &mut rng),
    }
});

fn encrypt(value: u128, width: usize) -> UintCiphertext<u16> {
    let mut rng = ChaCha20Rng::from_entropy();
    CONTEXT.encryptor.encrypt_u128(value, width, &mut rng).unwrap()
}

fn decrypt(c: &UintCiphertext<u16>) -> u128 {
    CONTEXT.decryptor.decrypt_u128(c).unwrap()
}

#[test]
fn codec_round_trips_every_supported_width() {
    for &(width, value) in &[
        (1usize, 1u128),
        (4, 11),
        (8, 200),
        (16, 54321),
        (32, 0xDEAD_BEEF),
        (64, u64::MAX as u128 - 5),
        (128, u128::MAX / 3),
    ] {
        assert_eq!(decrypt(&encrypt(value, width)), value, "width {width}");
    }
}

#[test]
fn address_width_round_trips() {
    // a 20-byte address as a 160-bit word
    let address: [u8; 20] = [
        0xEF, 0xBE, 0xAD, 0xDE, 0xEF, 0xBE, 0xAD, 0xDE, 0xEF, 0xBE, 0xAD, 0xDE, 0xEF, 0xBE,
        0xAD, 0xDE, 0xEF, 0xBE, 0xAD, 0xDE,
    ];
    let mut rng = ChaCha20Rng::seed_from_u64(160);
    let c = CONTEXT
        .encryptor
        .encrypt_le_bytes(&address, 160, &mut rng)
        .unwrap();
    assert_eq!(c.width(), 160);
    assert_eq!(CONTEXT.decryptor.decrypt_le_bytes(&c), address);
}

#[test]
fn word_width_round_trips() {
    let word: Vec<u8> = (0..32).map(|i| i as u8 ^ 0xA5).collect();
    let mut rng = ChaCha20Rng::seed_from_u64(256);
    let c = CONTEXT
        .encryptor
        .encrypt_le_bytes(&word, 256, &mut rng)
        .unwrap();
    assert_eq!(CONTEXT.decryptor.decrypt_le_bytes(&c), word);
}

#[test]
fn add_is_modular() {
    let ev = IntegerEvaluator::new(&CONTEXT.evaluator);

    let sum = ev.add(&encrypt(200, 8), &encrypt(55, 8)).unwrap();
    assert_eq!(decrypt(&sum), 255);

    let wrapped = ev.add(&encrypt(255, 8), &encrypt(1, 8)).unwrap();
    assert_eq!(decrypt(&wrapped), 0);
}

#[test]
fn sub_wraps_on_underflow() {
    let ev = IntegerEvaluator::new(&CONTEXT.evaluator);

    let diff = ev.sub(&encrypt(0, 8), &encrypt(1, 8)).unwrap();
    assert_eq!(decrypt(&diff), 255);

    let a = encrypt(9, 4);
    assert_eq!(decrypt(&ev.sub(&a, &a).unwrap()), 0);
}

#[test]
fn add_laws_hold() {
    let ev = IntegerEvaluator::new(&CONTEXT.evaluator);

    let (a, b) = (encrypt(9, 4), encrypt(14, 4));
    let ab = ev.add(&a, &b).unwrap();
    let ba = ev.add(&b, &a).unwrap();
    assert_eq!(decrypt(&ab), decrypt(&ba));
    assert_eq!(decrypt(&ab), (9 + 14) % 16);

    let neg = ev.neg(&a).unwrap();
    assert_eq!(decrypt(&ev.add(&a, &neg).unwrap()), 0);

    let c = encrypt(6, 4);
    let left = ev.add(&ev.add(&a, &b).unwrap(), &c).unwrap();
    let right = ev.add(&a, &ev.add(&b, &c).unwrap()).unwrap();
    assert_eq!(decrypt(&left), decrypt(&right));
    assert_eq!(decrypt(&left), (9 + 14 + 6) % 16);
}

#[test]
fn scalar_add_matches_plain_addition() {
    let ev = IntegerEvaluator::new(&CONTEXT.evaluator);
    let a = encrypt(200, 8);

    assert_eq!(decrypt(&ev.scalar_add(&a, 55).unwrap()), 255);
    assert_eq!(decrypt(&ev.scalar_add(&a, 56).unwrap()), 0);
    assert_eq!(decrypt(&ev.scalar_add(&a, 0).unwrap()), 200);
    assert_eq!(decrypt(&ev.scalar_add(&a, 0x10).unwrap()), 216);
}

#[test]
fn comparisons_read_the_final_borrow() {
    let ev = IntegerEvaluator::new(&CONTEXT.evaluator);
    let dec = &CONTEXT.bit_decryptor;

    let (a, b) = (encrypt(10, 4), encrypt(15, 4));
    assert!(dec.decrypt(&ev.lt(&a, &b).unwrap()));
    assert!(!dec.decrypt(&ev.lt(&b, &a).unwrap()));
    assert!(dec.decrypt(&ev.le(&a, &b).unwrap()));
    assert!(dec.decrypt(&ev.gt(&b, &a).unwrap()));
    assert!(!dec.decrypt(&ev.ge(&a, &b).unwrap()));

    let five = encrypt(5, 4);
    assert!(dec.decrypt(&ev.eq(&five, &encrypt(5, 4)).unwrap()));
    assert!(!dec.decrypt(&ev.eq(&five, &encrypt(6, 4)).unwrap()));
    assert!(dec.decrypt(&ev.ne(&five, &encrypt(6, 4)).unwrap()));
    assert!(dec.decrypt(&ev.le(&five, &encrypt(5, 4)).unwrap()));
}

#[test]
fn select_follows_the_encrypted_selector() {
    let ev = IntegerEvaluator::new(&CONTEXT.evaluator);
    let mut rng = ChaCha20Rng::seed_from_u64(9);

    let sel = CONTEXT.bit_encryptor.encrypt(true, &mut rng);
    let chosen = ev.select(&sel, &encrypt(10, 4), &encrypt(5, 4)).unwrap();
    assert_eq!(decrypt(&chosen), 10);

    let sel = CONTEXT.bit_encryptor.encrypt(false, &mut rng);
    let chosen = ev.select(&sel, &encrypt(10, 4), &encrypt(5, 4)).unwrap();
    assert_eq!(decrypt(&chosen), 5);
}

#[test]
fn min_max() {
    let ev = IntegerEvaluator::new(&CONTEXT.evaluator);
    let (a, b) = (encrypt(12, 4), encrypt(7, 4));

    assert_eq!(decrypt(&ev.min(&a, &b).unwrap()), 7);
    assert_eq!(decrypt(&ev.max(&a, &b).unwrap()), 12);
}

#[test]
fn bitwise_ops_are_bit_parallel() {
    let ev = IntegerEvaluator::new(&CONTEXT.evaluator);
    let (a, b) = (encrypt(0b1100, 4), encrypt(0b1010, 4));

    assert_eq!(decrypt(&ev.and(&a, &b).unwrap()), 0b1000);
    assert_eq!(decrypt(&ev.or(&a, &b).unwrap()), 0b1110);
    assert_eq!(decrypt(&ev.xor(&a, &b).unwrap()), 0b0110);
    assert_eq!(decrypt(&ev.not(&a).unwrap()), 0b0011);

    // idempotence and cancellation
    assert_eq!(decrypt(&ev.xor(&a, &a).unwrap()), 0);
    assert_eq!(decrypt(&ev.and(&a, &a).unwrap()), 0b1100);
    assert_eq!(decrypt(&ev.or(&a, &a).unwrap()), 0b1100);
    assert_eq!(decrypt(&ev.not(&ev.not(&a).unwrap()).unwrap()), 0b1100);
}

#[test]
fn shifts_rewire_with_zero_fill() {
    let ev = IntegerEvaluator::new(&CONTEXT.evaluator);
    let a = encrypt(0b0110_1001, 8);

    assert_eq!(decrypt(&ev.shl(&a, 2).unwrap()), 0b1010_0100);
    assert_eq!(decrypt(&ev.shr(&a, 3).unwrap()), 0b0000_1101);
    assert_eq!(decrypt(&ev.shl(&a, 8).unwrap()), 0);
    assert_eq!(decrypt(&ev.shr(&a, 20).unwrap()), 0);
    assert_eq!(decrypt(&ev.shl(&a, 0).unwrap()), 0b0110_1001);
}

#[test]
fn cast_zero_extends_and_truncates() {
    let ev = IntegerEvaluator::new(&CONTEXT.evaluator);
    let a = encrypt(200, 8);

    let wide = ev.cast_to(&a, 16).unwrap();
    assert_eq!(wide.width(), 16);
    assert_eq!(decrypt(&wide), 200);

    let back = ev.cast_to(&wide, 8).unwrap();
    assert_eq!(decrypt(&back), 200);

    let narrow = ev.cast_to(&a, 4).unwrap();
    assert_eq!(decrypt(&narrow), 200 % 16);
}

#[test]
fn refresh_preserves_the_value() {
    let ev = IntegerEvaluator::new(&CONTEXT.evaluator);
    let a = encrypt(0b1011, 4);
    assert_eq!(decrypt(&ev.refresh(&a).unwrap()), 0b1011);
}

#[test]
fn width_and_preset_safety() {
    let ev = IntegerEvaluator::new(&CONTEXT.evaluator);

    let mut rng = ChaCha20Rng::seed_from_u64(77);
    assert!(matches!(
        CONTEXT.encryptor.encrypt_u128(1, 3, &mut rng),
        Err(FheError::UnsupportedWidth(3))
    ));

    let (a, b) = (encrypt(1, 4), encrypt(1, 8));
    assert!(matches!(
        ev.add(&a, &b),
        Err(FheError::WidthMismatch { left: 4, right: 8 })
    ));

    assert!(matches!(
        ev.cast_to(&a, 7),
        Err(FheError::UnsupportedWidth(7))
    ));
}

#[test]
fn mul_and_div_are_reserved() {
    let ev = IntegerEvaluator::new(&CONTEXT.evaluator);
    let (a, b) = (encrypt(3, 4), encrypt(5, 4));

    assert!(matches!(ev.mul(&a, &b), Err(FheError::NotImplemented(_))));
    assert!(matches!(ev.div(&a, &b), Err(FheError::NotImplemented(_))));
}

#[test]
fn uint_ciphertext_round_trips_bit_identically() {
    let a = encrypt(0xBEEF, 16);
    let bytes = a.to_bytes();
    let parsed = UintCiphertext::<u16>::from_bytes(&bytes).unwrap();
    assert_eq!(parsed, a);
    assert_eq!(parsed.to_bytes(), bytes);
    assert_eq!(decrypt(&parsed), 0xBEEF);
}
