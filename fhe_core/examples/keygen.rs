//! Generates a full key set for the default preset and persists it with the
//! stable byte format, the way a serving wrapper would populate its key
//! directory.
//!
//! Usage: `keygen [DIR]` (defaults to `./keys`).

use std::fs;
use std::path::PathBuf;

use fhe_core::{BootstrapKey, ByteCodec, LwePublicKey, SecretKeyPack, PN10QP27};
use rand::rngs::OsRng;

fn main() -> std::io::Result<()> {
    let dir: PathBuf = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "keys".to_string())
        .into();
    fs::create_dir_all(&dir)?;

    let params = *PN10QP27;
    let mut rng = OsRng;

    println!("generating secret key pack ({})", params.preset());
    let skp = SecretKeyPack::new(params, &mut rng);

    println!("generating public key");
    let pk = LwePublicKey::new(
        skp.lwe_secret_key(),
        params.lwe_params(),
        params.preset(),
        &mut rng,
    );

    println!("generating bootstrap key (this dominates time and memory)");
    let bsk = BootstrapKey::new(&skp, &mut rng);

    for (name, bytes) in [
        ("secret_key.bin", skp.to_bytes()),
        ("public_key.bin", pk.to_bytes()),
        ("bootstrap_key.bin", bsk.to_bytes()),
    ] {
        let path = dir.join(name);
        fs::write(&path, &bytes)?;
        println!("wrote {} ({} bytes)", path.display(), bytes.len());
    }

    Ok(())
}
