//! Key material, the programmable bootstrapping pipeline and the stable
//! byte format shared by the boolean and integer layers.

mod blind_rotation_key;
mod bootstrap;
mod ciphertext;
mod error;
mod key_switching_key;
mod modulus_switch;
mod parameter;
mod plaintext;
mod public_key;
mod secret_key;

pub mod serialize;

pub use blind_rotation_key::BlindRotationKey;
pub use bootstrap::BootstrapKey;
pub use ciphertext::LweCiphertext;
pub use error::{FheError, SerializeError};
pub use key_switching_key::LweKeySwitchingKey;
pub use modulus_switch::lwe_modulus_switch;
pub use parameter::{
    build_parameters, ConstParameters, Fp27, LweParameters, ParameterPreset, Parameters, PN10QP27,
    PN11QP27,
};
pub use plaintext::{decode, encode};
pub use public_key::LwePublicKey;
pub use secret_key::{LweSecretKey, RlweSecretKey, SecretKeyPack};
pub use serialize::{kind, ByteCodec, MAGIC, VERSION};
