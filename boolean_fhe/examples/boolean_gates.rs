use boolean_fhe::{Decryptor, Encryptor, Evaluator, KeyGen};
use fhe_core::PN10QP27;
use rand::prelude::*;
use rand_chacha::ChaCha20Rng;

fn main() {
    let mut rng = ChaCha20Rng::from_entropy();

    println!("generating keys for {}", PN10QP27.preset());
    let skp = KeyGen::generate_secret_key(*PN10QP27, &mut rng);
    let encryptor = Encryptor::new(&skp);
    let decryptor = Decryptor::new(&skp);
    let evaluator = Evaluator::new(&skp, &mut rng);

    let a = rng.gen::<bool>();
    let b = rng.gen::<bool>();

    let ca = encryptor.encrypt(a, &mut rng);
    let cb = encryptor.encrypt(b, &mut rng);

    let and = evaluator.and(&ca, &cb).unwrap();
    let xor = evaluator.xor(&ca, &cb).unwrap();
    let nand = evaluator.nand(&ca, &cb).unwrap();

    println!("a = {a}, b = {b}");
    println!("and  -> {}", decryptor.decrypt(&and));
    println!("xor  -> {}", decryptor.decrypt(&xor));
    println!("nand -> {}", decryptor.decrypt(&nand));

    assert_eq!(decryptor.decrypt(&and), a & b);
    assert_eq!(decryptor.decrypt(&xor), a ^ b);
    assert_eq!(decryptor.decrypt(&nand), !(a & b));
}
