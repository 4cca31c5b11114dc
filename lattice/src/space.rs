use std::ops::{Deref, DerefMut};

use algebra::polynomial::{FieldNttPolynomial, FieldPolynomial};
use algebra::NttField;

use crate::{NttRlwe, Rlwe};

/// Pre-allocated space for gadget decomposition: a working copy of the
/// decomposed polynomial and a slot for the current digit level.
pub struct PolyDecomposeSpace<F: NttField> {
    working: FieldPolynomial<F>,
    digits: FieldNttPolynomial<F>,
}

impl<F: NttField> PolyDecomposeSpace<F> {
    /// Creates a new [`PolyDecomposeSpace<F>`].
    #[inline]
    pub fn new(coeff_count: usize) -> Self {
        Self {
            working: FieldPolynomial::zero(coeff_count),
            digits: FieldNttPolynomial::zero(coeff_count),
        }
    }

    /// Gets the mutable pre-allocated parts.
    #[inline]
    pub fn get_mut(&mut self) -> (&mut FieldPolynomial<F>, &mut FieldNttPolynomial<F>) {
        (&mut self.working, &mut self.digits)
    }
}

/// Pre-allocated space holding an [`Rlwe<F>`].
pub struct RlweSpace<F: NttField>(Rlwe<F>);

impl<F: NttField> RlweSpace<F> {
    /// Creates a new [`RlweSpace<F>`].
    #[inline]
    pub fn new(coeff_count: usize) -> Self {
        Self(Rlwe::zero(coeff_count))
    }
}

impl<F: NttField> Deref for RlweSpace<F> {
    type Target = Rlwe<F>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<F: NttField> DerefMut for RlweSpace<F> {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

/// Pre-allocated space holding an [`NttRlwe<F>`].
pub struct NttRlweSpace<F: NttField>(NttRlwe<F>);

impl<F: NttField> NttRlweSpace<F> {
    /// Creates a new [`NttRlweSpace<F>`].
    #[inline]
    pub fn new(coeff_count: usize) -> Self {
        Self(NttRlwe::zero(coeff_count))
    }
}

impl<F: NttField> Deref for NttRlweSpace<F> {
    type Target = NttRlwe<F>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<F: NttField> DerefMut for NttRlweSpace<F> {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}
