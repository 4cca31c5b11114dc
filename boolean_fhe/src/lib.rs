//! Boolean gates on encrypted bits via programmable bootstrapping.

mod ciphertext;
mod decrypt;
mod encrypt;
mod evaluate;
mod key_gen;
mod lut;

pub use ciphertext::BitCiphertext;
pub use decrypt::Decryptor;
pub use encrypt::{Encryptor, PublicEncryptor};
pub use evaluate::Evaluator;
pub use key_gen::KeyGen;
pub use lut::{
    and_majority_lut, identity_lut, nand_lut, nor_lut, or_lut, xor_lut,
};
