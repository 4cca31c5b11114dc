use lattice::Lwe;

/// The LWE ciphertext carried through every gate.
pub type LweCiphertext<C> = Lwe<C>;
