//! Fixed-width unsigned integer circuits over encrypted bits.

mod ciphertext;
mod codec;
mod evaluate;

pub use ciphertext::{UintCiphertext, SUPPORTED_WIDTHS};
pub use codec::{IntegerDecryptor, IntegerEncryptor, PublicIntegerEncryptor};
pub use evaluate::IntegerEvaluator;
