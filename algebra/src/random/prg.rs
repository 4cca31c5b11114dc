use rand::{CryptoRng, Error, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::AlgebraError;

/// A seedable cryptographic PRG.
///
/// Used wherever determinism matters: reproducible tests and public-key
/// derivation. An optional byte budget makes exhaustion observable through
/// [`RngCore::try_fill_bytes`]; the infallible methods panic once the budget
/// is spent, which only deterministic test setups can reach.
#[derive(Clone, Debug)]
pub struct Prg {
    inner: ChaCha20Rng,
    remaining: Option<u64>,
}

impl Prg {
    /// Creates a [`Prg`] from a 32-byte seed.
    #[inline]
    pub fn from_seed(seed: [u8; 32]) -> Self {
        Self {
            inner: ChaCha20Rng::from_seed(seed),
            remaining: None,
        }
    }

    /// Creates a [`Prg`] from a `u64` seed.
    #[inline]
    pub fn seed_from_u64(seed: u64) -> Self {
        Self {
            inner: ChaCha20Rng::seed_from_u64(seed),
            remaining: None,
        }
    }

    /// Creates a [`Prg`] that refuses to emit more than `budget` bytes.
    #[inline]
    pub fn with_byte_budget(seed: [u8; 32], budget: u64) -> Self {
        Self {
            inner: ChaCha20Rng::from_seed(seed),
            remaining: Some(budget),
        }
    }

    /// Creates a [`Prg`] from the operating system entropy source.
    #[inline]
    pub fn from_entropy() -> Self {
        Self {
            inner: ChaCha20Rng::from_entropy(),
            remaining: None,
        }
    }

    #[inline]
    fn consume(&mut self, bytes: u64) -> Result<(), AlgebraError> {
        match self.remaining {
            None => Ok(()),
            Some(ref mut remaining) => {
                if *remaining < bytes {
                    Err(AlgebraError::RngExhausted)
                } else {
                    *remaining -= bytes;
                    Ok(())
                }
            }
        }
    }
}

impl RngCore for Prg {
    #[inline]
    fn next_u32(&mut self) -> u32 {
        self.consume(4).expect("prg exhausted");
        self.inner.next_u32()
    }

    #[inline]
    fn next_u64(&mut self) -> u64 {
        self.consume(8).expect("prg exhausted");
        self.inner.next_u64()
    }

    #[inline]
    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.consume(dest.len() as u64).expect("prg exhausted");
        self.inner.fill_bytes(dest);
    }

    #[inline]
    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.consume(dest.len() as u64).map_err(Error::new)?;
        self.inner.try_fill_bytes(dest)
    }
}

impl CryptoRng for Prg {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_stream() {
        let mut a = Prg::seed_from_u64(42);
        let mut b = Prg::seed_from_u64(42);
        for _ in 0..16 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
    }

    #[test]
    fn budget_exhaustion_is_reported() {
        let mut prg = Prg::with_byte_budget([0u8; 32], 8);
        let mut buf = [0u8; 8];
        assert!(prg.try_fill_bytes(&mut buf).is_ok());
        assert!(prg.try_fill_bytes(&mut buf).is_err());
    }
}
