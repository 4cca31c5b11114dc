//! Test polynomial builders.
//!
//! A test polynomial assigns an output to every phase octant. Only the free
//! half-period `[0, N)` is stored; negacyclicity forces the values on
//! `[N, 2N)` to the negation. All gate builders put `Δ_Q = Q/8` on the
//! octants that decode to `true` and zero elsewhere, so bootstrap outputs
//! land directly on the canonical `{0, Δ}` bit encoding.
//!
//! Gate linear parts shift their phase by `Δ/2` beforehand (the XOR family
//! doubles instead), which keeps every reachable phase half an octant away
//! from a value boundary.

use algebra::polynomial::FieldPolynomial;
use algebra::NttField;

#[inline]
fn banded_lut<Q: NttField>(
    ring_dimension: usize,
    band_start: usize,
    band_end: usize,
) -> FieldPolynomial<Q> {
    let delta = Q::MODULUS_VALUE >> 3usize;
    let mut lut = FieldPolynomial::zero(ring_dimension);
    lut[band_start..band_end].iter_mut().for_each(|v| *v = delta);
    lut
}

/// The lut for `and` and `majority`: `true` on phases in `[2Δ, 4Δ)`.
#[inline]
pub fn and_majority_lut<Q: NttField>(ring_dimension: usize) -> FieldPolynomial<Q> {
    banded_lut(ring_dimension, ring_dimension >> 1, ring_dimension)
}

/// The lut for `nand`: `true` on phases in `[0, 2Δ)`.
#[inline]
pub fn nand_lut<Q: NttField>(ring_dimension: usize) -> FieldPolynomial<Q> {
    banded_lut(ring_dimension, 0, ring_dimension >> 1)
}

/// The lut for `or`: `true` on phases in `[Δ, 4Δ)`.
#[inline]
pub fn or_lut<Q: NttField>(ring_dimension: usize) -> FieldPolynomial<Q> {
    banded_lut(ring_dimension, ring_dimension >> 2, ring_dimension)
}

/// The lut for `nor`: `true` on phases in `[0, Δ)`.
#[inline]
pub fn nor_lut<Q: NttField>(ring_dimension: usize) -> FieldPolynomial<Q> {
    banded_lut(ring_dimension, 0, ring_dimension >> 2)
}

/// The lut for `xor` on the doubled sum: `true` on phases in `[Δ, 3Δ)`.
///
/// The doubled `(true, true)` input lands at `4Δ = q/2`, inside the
/// negacyclically forced half where the stored zero band repeats negated,
/// so it still decodes to `false`.
#[inline]
pub fn xor_lut<Q: NttField>(ring_dimension: usize) -> FieldPolynomial<Q> {
    banded_lut(
        ring_dimension,
        ring_dimension >> 2,
        (ring_dimension >> 2) * 3,
    )
}

/// The identity lut used by `refresh`: thresholds at `Δ/2`, reproducing the
/// input bit with reset noise.
#[inline]
pub fn identity_lut<Q: NttField>(ring_dimension: usize) -> FieldPolynomial<Q> {
    or_lut(ring_dimension)
}
