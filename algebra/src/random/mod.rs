//! Randomness: discrete Gaussian and binary/ternary samplers, plus a
//! seedable PRG for reproducible key material.

mod prg;

pub use prg::Prg;

use rand::{CryptoRng, Rng};
use rand_distr::{Distribution, Normal};

use crate::integer::UnsignedInteger;
use crate::AlgebraError;

/// Samples a vector of uniform binary values.
pub fn sample_binary_values<T, R>(length: usize, rng: &mut R) -> Vec<T>
where
    T: UnsignedInteger,
    R: Rng + CryptoRng,
{
    let mut v = vec![T::ZERO; length];
    let mut iter = v.chunks_exact_mut(32);
    for chunk in &mut iter {
        let mut r = rng.next_u32();
        for elem in chunk.iter_mut() {
            *elem = T::as_from(r & 0b1);
            r >>= 1;
        }
    }
    let mut r = rng.next_u32();
    for elem in iter.into_remainder() {
        *elem = T::as_from(r & 0b1);
        r >>= 1;
    }
    v
}

/// The rounded Gaussian distribution `N(mean, std_dev²)` over `Z_m`,
/// centred and symmetric, with samples rejected beyond `6σ`.
#[derive(Clone, Copy, Debug)]
pub struct DiscreteGaussian<T: UnsignedInteger> {
    normal: Normal<f64>,
    max_deviation: f64,
    modulus_minus_one: T,
}

impl<T: UnsignedInteger> DiscreteGaussian<T> {
    /// Creates a new [`DiscreteGaussian<T>`] over `Z_m` with
    /// `m - 1 = modulus_minus_one`.
    #[inline]
    pub fn new(
        mean: f64,
        std_dev: f64,
        modulus_minus_one: T,
    ) -> Result<DiscreteGaussian<T>, AlgebraError> {
        if !std_dev.is_finite() || std_dev < 0.0 {
            return Err(AlgebraError::DistributionError);
        }
        match Normal::new(mean, std_dev) {
            Ok(normal) => Ok(DiscreteGaussian {
                normal,
                max_deviation: std_dev * 6.0,
                modulus_minus_one,
            }),
            Err(_) => Err(AlgebraError::DistributionError),
        }
    }

    /// Returns the standard deviation `σ`.
    #[inline]
    pub fn std_dev(&self) -> f64 {
        self.normal.std_dev()
    }
}

impl<T: UnsignedInteger> Distribution<T> for DiscreteGaussian<T> {
    #[inline]
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> T {
        if self.max_deviation < 0.5 {
            return T::ZERO;
        }
        let mean = self.normal.mean();

        loop {
            let value = self.normal.sample(rng);
            if (value - mean).abs() < self.max_deviation {
                let round = value.round();
                if round < -0.5 {
                    return self.modulus_minus_one - T::as_from(-round) + T::ONE;
                } else {
                    return T::as_from(round);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::prelude::*;

    use super::*;

    #[test]
    fn gaussian_stays_within_tail_bound() {
        let mut rng = StdRng::seed_from_u64(17);
        let q: u32 = 1 << 15;
        let gaussian = DiscreteGaussian::<u32>::new(0.0, 3.2, q - 1).unwrap();

        for _ in 0..1000 {
            let v = gaussian.sample(&mut rng);
            // centred: values near 0 or near q
            let centred = if v > q / 2 { q - v } else { v };
            assert!(centred <= 20, "sample {v} too far out");
        }
    }

    #[test]
    fn binary_values_are_bits() {
        let mut rng = StdRng::seed_from_u64(23);
        let v: Vec<u16> = sample_binary_values(1000, &mut rng);
        assert!(v.iter().all(|&b| b <= 1));
        assert!(v.iter().any(|&b| b == 1));
    }
}
