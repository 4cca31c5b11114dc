use algebra::polynomial::FieldPolynomial;
use algebra::reduce::RingReduce;
use algebra::Field;
use fhe_core::{
    BootstrapKey, ByteCodec, FheError, Fp27, LwePublicKey, SecretKeyPack, PN10QP27,
};
use rand::prelude::*;
use rand_chacha::ChaCha20Rng;

type Skp = SecretKeyPack<u16, Fp27>;

#[test]
fn encrypt_decrypt_all_messages() {
    let mut rng = ChaCha20Rng::seed_from_u64(1);
    let params = *PN10QP27;
    let skp = Skp::new(params, &mut rng);

    for m in 0..8u16 {
        let c = skp.encrypt(m, &mut rng);
        let (decrypted, noise) = skp.decrypt_with_noise(&c);
        assert_eq!(decrypted, m);
        assert!(noise < params.scaling_factor() / 2);
    }
}

#[test]
fn public_key_encrypt_decrypt() {
    let mut rng = ChaCha20Rng::seed_from_u64(2);
    let params = *PN10QP27;
    let skp = Skp::new(params, &mut rng);

    let pk = LwePublicKey::new(
        skp.lwe_secret_key(),
        params.lwe_params(),
        params.preset(),
        &mut rng,
    );

    for m in [0u16, 1, 5, 7] {
        let c = pk.encrypt(m, params.lwe_params(), &mut rng);
        assert_eq!(skp.decrypt(&c), m);
    }
}

#[test]
fn bootstrap_refreshes_noise_and_applies_test_polynomial() {
    let mut rng = ChaCha20Rng::seed_from_u64(3);
    let params = *PN10QP27;
    let skp = Skp::new(params, &mut rng);
    let bsk = BootstrapKey::new(&skp, &mut rng);

    let n = params.ring_dimension();
    let q_div_8 = Fp27::MODULUS.modulus_value() >> 3;

    // a threshold test polynomial: Δ·[phase >= Δ/2] on the free half-period
    let mut lut = FieldPolynomial::<Fp27>::zero(n);
    lut[n / 4..].iter_mut().for_each(|v| *v = q_div_8);

    let delta = params.scaling_factor();
    let modulus = params.lwe_cipher_modulus();

    for m in [0u16, 1] {
        let mut c = skp.encrypt(m, &mut rng);
        // shift the phase to mid-octant before thresholding
        modulus.reduce_add_assign(c.b_mut(), delta / 2);

        let refreshed = bsk.bootstrap(&c, lut.clone()).unwrap();
        let (decrypted, noise) = skp.decrypt_with_noise(&refreshed);

        assert_eq!(decrypted, m);
        assert!(noise < delta / 4, "output noise {noise} too large");
    }
}

#[test]
fn bootstrap_rejects_wrong_dimension() {
    let mut rng = ChaCha20Rng::seed_from_u64(4);
    let params = *PN10QP27;
    let skp = Skp::new(params, &mut rng);
    let bsk = BootstrapKey::new(&skp, &mut rng);

    let short = fhe_core::LweCiphertext::<u16>::zero(params.lwe_dimension() - 1);
    let lut = FieldPolynomial::<Fp27>::zero(params.ring_dimension());

    assert!(matches!(
        bsk.bootstrap(&short, lut),
        Err(FheError::DimensionMismatch { .. })
    ));
}

#[test]
fn key_generation_is_reproducible_with_a_seeded_prg() {
    use algebra::random::Prg;

    let a = Skp::new(*PN10QP27, &mut Prg::seed_from_u64(99));
    let b = Skp::new(*PN10QP27, &mut Prg::seed_from_u64(99));
    assert_eq!(a.to_bytes(), b.to_bytes());

    let c = Skp::new(*PN10QP27, &mut Prg::seed_from_u64(100));
    assert_ne!(a.to_bytes(), c.to_bytes());
}

#[test]
fn secret_key_pack_round_trips_bit_identically() {
    let mut rng = ChaCha20Rng::seed_from_u64(5);
    let skp = Skp::new(*PN10QP27, &mut rng);

    let bytes = skp.to_bytes();
    let parsed = Skp::from_bytes(&bytes).unwrap();
    assert_eq!(parsed.to_bytes(), bytes);
    assert_eq!(
        parsed.lwe_secret_key().as_ref(),
        skp.lwe_secret_key().as_ref()
    );
}

#[test]
fn public_key_round_trips_bit_identically() {
    let mut rng = ChaCha20Rng::seed_from_u64(6);
    let params = *PN10QP27;
    let skp = Skp::new(params, &mut rng);
    let pk = LwePublicKey::new(
        skp.lwe_secret_key(),
        params.lwe_params(),
        params.preset(),
        &mut rng,
    );

    let bytes = pk.to_bytes();
    let parsed = LwePublicKey::<u16>::from_bytes(&bytes).unwrap();
    assert_eq!(parsed.to_bytes(), bytes);
}

#[test]
fn bootstrap_key_round_trips_bit_identically() {
    let mut rng = ChaCha20Rng::seed_from_u64(7);
    let skp = Skp::new(*PN10QP27, &mut rng);
    let bsk = BootstrapKey::new(&skp, &mut rng);

    let bytes = bsk.to_bytes();
    let parsed = BootstrapKey::<u16, Fp27>::from_bytes(&bytes).unwrap();
    assert_eq!(parsed.to_bytes(), bytes);
}

#[test]
fn serialization_rejects_corrupted_frames() {
    use fhe_core::SerializeError;

    let mut rng = ChaCha20Rng::seed_from_u64(8);
    let skp = Skp::new(*PN10QP27, &mut rng);
    let bytes = skp.to_bytes();

    let mut bad_magic = bytes.clone();
    bad_magic[0] = 0x00;
    assert!(matches!(
        Skp::from_bytes(&bad_magic),
        Err(SerializeError::BadMagic(0))
    ));

    let mut bad_version = bytes.clone();
    bad_version[1] = 99;
    assert!(matches!(
        Skp::from_bytes(&bad_version),
        Err(SerializeError::UnsupportedVersion(99))
    ));

    let mut bad_preset = bytes.clone();
    bad_preset[2] = 0xEE;
    assert!(matches!(
        Skp::from_bytes(&bad_preset),
        Err(SerializeError::UnknownPreset(0xEE))
    ));

    let mut truncated = bytes.clone();
    truncated.truncate(bytes.len() - 1);
    assert!(matches!(
        Skp::from_bytes(&truncated),
        Err(SerializeError::Io(_))
    ));

    let mut trailing = bytes.clone();
    trailing.push(0);
    assert!(matches!(
        Skp::from_bytes(&trailing),
        Err(SerializeError::TrailingBytes(1))
    ));
}
