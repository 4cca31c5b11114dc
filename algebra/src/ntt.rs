//! Negacyclic number theoretic transform over `Z_P[X]/(X^N + 1)`.

use std::marker::PhantomData;

use crate::arith::minimal_primitive_root;
use crate::field::Field;
use crate::modulus::BarrettModulus;
use crate::polynomial::{FieldNttPolynomial, FieldPolynomial};
use crate::reduce::RingReduce;
use crate::AlgebraError;

/// The transform interface the ring layer programs against.
pub trait NumberTheoryTransform {
    /// The field this table transforms.
    type Field: Field;

    /// Returns the ring dimension `N`.
    fn dimension(&self) -> usize;

    /// In-place forward transform of a coefficient slice.
    fn transform_slice(&self, poly: &mut [<Self::Field as Field>::ValueT]);

    /// In-place inverse transform of an evaluation slice.
    fn inverse_transform_slice(&self, values: &mut [<Self::Field as Field>::ValueT]);

    /// Forward transform of a borrowed polynomial.
    fn transform(&self, poly: &FieldPolynomial<Self::Field>) -> FieldNttPolynomial<Self::Field>;

    /// Forward transform consuming the polynomial.
    fn transform_inplace(
        &self,
        poly: FieldPolynomial<Self::Field>,
    ) -> FieldNttPolynomial<Self::Field>;

    /// Inverse transform consuming the evaluation form.
    fn inverse_transform_inplace(
        &self,
        values: FieldNttPolynomial<Self::Field>,
    ) -> FieldPolynomial<Self::Field>;
}

/// Precomputed data for the transform: the primitive `2N`-th root, its
/// powers in bit-reversed order for the forward pass, the inverse powers for
/// the backward pass and `N^{-1}`.
pub struct FieldNttTable<F> {
    root: u32,
    inv_root: u32,
    modulus: BarrettModulus<u32>,
    log_n: u32,
    n: usize,
    inv_n: u32,
    root_powers: Vec<u32>,
    inv_root_powers: Vec<u32>,
    _marker: PhantomData<F>,
}

impl<F> FieldNttTable<F>
where
    F: Field<ValueT = u32, Modulus = BarrettModulus<u32>>,
{
    /// Creates a new [`FieldNttTable<F>`] for dimension `N = 2^log_n`.
    pub fn new(modulus: BarrettModulus<u32>, log_n: u32) -> Result<Self, AlgebraError> {
        let n = 1usize << log_n;

        if n as u64 >= modulus.value() as u64 {
            return Err(AlgebraError::DegreeTooLarge {
                degree: n,
                modulus: modulus.value() as u64,
            });
        }

        let root = minimal_primitive_root(modulus, log_n + 1)?;
        let inv_root = modulus.reduce_inv(root);

        let mut root_powers = vec![0u32; n];
        let mut inv_root_powers = vec![0u32; n];
        let mut power = 1u32;
        let mut inv_power = 1u32;
        for i in 0..n {
            let rev = reverse_lsbs(i, log_n);
            root_powers[rev] = power;
            inv_root_powers[rev] = inv_power;
            power = modulus.reduce_mul(power, root);
            inv_power = modulus.reduce_mul(inv_power, inv_root);
        }

        let inv_n = modulus.reduce_inv(n as u32);

        Ok(Self {
            root,
            inv_root,
            modulus,
            log_n,
            n,
            inv_n,
            root_powers,
            inv_root_powers,
            _marker: PhantomData,
        })
    }

    /// Returns the primitive `2N`-th root of unity.
    #[inline]
    pub fn root(&self) -> u32 {
        self.root
    }

    /// Returns the inverse of the root.
    #[inline]
    pub fn inv_root(&self) -> u32 {
        self.inv_root
    }

    /// Returns `log2(N)`.
    #[inline]
    pub fn log_n(&self) -> u32 {
        self.log_n
    }
}

impl<F> NumberTheoryTransform for FieldNttTable<F>
where
    F: Field<ValueT = u32, Modulus = BarrettModulus<u32>>,
{
    type Field = F;

    #[inline]
    fn dimension(&self) -> usize {
        self.n
    }

    fn transform_slice(&self, poly: &mut [u32]) {
        debug_assert_eq!(poly.len(), self.n);
        let modulus = self.modulus;

        let mut t = self.n;
        let mut m = 1usize;
        while m < self.n {
            t >>= 1;
            for i in 0..m {
                let j1 = 2 * i * t;
                let s = self.root_powers[m + i];
                for j in j1..j1 + t {
                    let u = poly[j];
                    let v = modulus.reduce_mul(poly[j + t], s);
                    poly[j] = modulus.reduce_add(u, v);
                    poly[j + t] = modulus.reduce_sub(u, v);
                }
            }
            m <<= 1;
        }
    }

    fn inverse_transform_slice(&self, values: &mut [u32]) {
        debug_assert_eq!(values.len(), self.n);
        let modulus = self.modulus;

        let mut t = 1usize;
        let mut m = self.n;
        while m > 1 {
            let h = m >> 1;
            let mut j1 = 0usize;
            for i in 0..h {
                let s = self.inv_root_powers[h + i];
                for j in j1..j1 + t {
                    let u = values[j];
                    let v = values[j + t];
                    values[j] = modulus.reduce_add(u, v);
                    values[j + t] = modulus.reduce_mul(modulus.reduce_sub(u, v), s);
                }
                j1 += 2 * t;
            }
            t <<= 1;
            m = h;
        }

        for v in values.iter_mut() {
            *v = modulus.reduce_mul(*v, self.inv_n);
        }
    }

    #[inline]
    fn transform(&self, poly: &FieldPolynomial<F>) -> FieldNttPolynomial<F> {
        let mut values = poly.as_slice().to_vec();
        self.transform_slice(&mut values);
        FieldNttPolynomial::new(values)
    }

    #[inline]
    fn transform_inplace(&self, mut poly: FieldPolynomial<F>) -> FieldNttPolynomial<F> {
        self.transform_slice(poly.as_mut_slice());
        FieldNttPolynomial::new(poly.inner_data())
    }

    #[inline]
    fn inverse_transform_inplace(&self, mut values: FieldNttPolynomial<F>) -> FieldPolynomial<F> {
        self.inverse_transform_slice(values.as_mut_slice());
        FieldPolynomial::new(values.inner_data())
    }
}

#[inline]
fn reverse_lsbs(value: usize, bits: u32) -> usize {
    if bits == 0 {
        0
    } else {
        value.reverse_bits() >> (usize::BITS - bits)
    }
}

#[cfg(test)]
mod tests {
    use rand::distributions::Uniform;
    use rand::prelude::*;

    use super::*;
    use crate::reduce::RingReduce;
    use crate::{NttField, U32Field};

    type Fp = U32Field<132120577>;
    const P: u32 = 132120577;

    fn random_poly(n: usize, rng: &mut StdRng) -> Vec<u32> {
        let distr = Uniform::new(0, P);
        (0..n).map(|_| distr.sample(rng)).collect()
    }

    #[test]
    fn transform_round_trip() {
        let mut rng = StdRng::seed_from_u64(7);
        let table = Fp::generate_ntt_table(8).unwrap();

        let poly = random_poly(256, &mut rng);
        let mut values = poly.clone();
        table.transform_slice(&mut values);
        table.inverse_transform_slice(&mut values);
        assert_eq!(poly, values);
    }

    #[test]
    fn pointwise_mul_matches_schoolbook_negacyclic() {
        let mut rng = StdRng::seed_from_u64(11);
        let n = 64usize;
        let table = Fp::generate_ntt_table(6).unwrap();
        let modulus = Fp::MODULUS;

        let a = random_poly(n, &mut rng);
        let b = random_poly(n, &mut rng);

        // schoolbook negacyclic convolution
        let mut expected = vec![0u32; n];
        for i in 0..n {
            for j in 0..n {
                let prod = modulus.reduce_mul(a[i], b[j]);
                let k = i + j;
                if k < n {
                    modulus.reduce_add_assign(&mut expected[k], prod);
                } else {
                    modulus.reduce_sub_assign(&mut expected[k - n], prod);
                }
            }
        }

        let mut av = a.clone();
        let mut bv = b.clone();
        table.transform_slice(&mut av);
        table.transform_slice(&mut bv);
        let mut cv: Vec<u32> = av
            .iter()
            .zip(&bv)
            .map(|(&x, &y)| modulus.reduce_mul(x, y))
            .collect();
        table.inverse_transform_slice(&mut cv);

        assert_eq!(expected, cv);
    }
}
