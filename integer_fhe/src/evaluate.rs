use algebra::integer::UnsignedInteger;
use algebra::NttField;
use boolean_fhe::{BitCiphertext, Evaluator};
use fhe_core::FheError;
use rayon::prelude::*;

use crate::ciphertext::check_width;
use crate::UintCiphertext;

/// Fixed-width unsigned integer circuits, composed entirely from boolean
/// gates.
///
/// The integer evaluator borrows the bit evaluator; construction is a
/// one-shot wiring of the two layers, with no hidden state. Every gate
/// refreshes noise, so circuits compose to arbitrary depth, and the circuit
/// order is fixed (LSB-first ripple for add/sub, a balanced tree for eq) so
/// noise growth is reproducible.
pub struct IntegerEvaluator<'a, C: UnsignedInteger, Q: NttField> {
    bit_evaluator: &'a Evaluator<C, Q>,
}

impl<'a, C: UnsignedInteger, Q: NttField> IntegerEvaluator<'a, C, Q> {
    /// Creates a new [`IntegerEvaluator`] over a bit evaluator.
    #[inline]
    pub fn new(bit_evaluator: &'a Evaluator<C, Q>) -> Self {
        Self { bit_evaluator }
    }

    /// Returns the underlying bit evaluator.
    #[inline]
    pub fn bit_evaluator(&self) -> &Evaluator<C, Q> {
        self.bit_evaluator
    }

    fn check(&self, a: &UintCiphertext<C>) -> Result<(), FheError> {
        check_width(a.width())?;
        let expected = self.bit_evaluator.parameters().preset();
        if a.preset() != expected {
            return Err(FheError::ParameterMismatch {
                expected,
                found: a.preset(),
            });
        }
        Ok(())
    }

    fn check_pair(
        &self,
        a: &UintCiphertext<C>,
        b: &UintCiphertext<C>,
    ) -> Result<(), FheError> {
        if a.width() != b.width() {
            return Err(FheError::WidthMismatch {
                left: a.width(),
                right: b.width(),
            });
        }
        self.check(a)?;
        self.check(b)
    }

    fn check_selector(&self, sel: &BitCiphertext<C>) -> Result<(), FheError> {
        let expected = self.bit_evaluator.parameters().preset();
        if sel.preset() != expected {
            return Err(FheError::ParameterMismatch {
                expected,
                found: sel.preset(),
            });
        }
        Ok(())
    }

    fn wrap(&self, bits: Vec<BitCiphertext<C>>) -> UintCiphertext<C> {
        UintCiphertext::new(bits, self.bit_evaluator.parameters().preset())
    }

    /// A trivial all-zero integer of the given width.
    fn trivial_zero(&self, width: usize) -> UintCiphertext<C> {
        self.wrap(
            (0..width)
                .map(|_| self.bit_evaluator.trivial(false))
                .collect(),
        )
    }

    /// Computes `a + b mod 2^w` with an LSB-first ripple carry.
    ///
    /// Each middle bit costs two xors and one single-bootstrap majority for
    /// the carry; the first bit starts from a known-zero carry and the last
    /// bit drops its carry out, `3w - 2` bootstraps in total.
    pub fn add(
        &self,
        a: &UintCiphertext<C>,
        b: &UintCiphertext<C>,
    ) -> Result<UintCiphertext<C>, FheError> {
        self.check_pair(a, b)?;
        let ev = self.bit_evaluator;
        let w = a.width();

        let mut bits = Vec::with_capacity(w);
        bits.push(ev.xor(a.bit(0), b.bit(0))?);
        if w == 1 {
            return Ok(self.wrap(bits));
        }

        let mut carry = ev.and(a.bit(0), b.bit(0))?;
        for i in 1..w {
            let half = ev.xor(a.bit(i), b.bit(i))?;
            bits.push(ev.xor(&half, &carry)?);
            if i + 1 < w {
                carry = ev.majority(a.bit(i), b.bit(i), &carry)?;
            }
        }

        Ok(self.wrap(bits))
    }

    /// Computes `a - b mod 2^w` with an LSB-first ripple borrow.
    pub fn sub(
        &self,
        a: &UintCiphertext<C>,
        b: &UintCiphertext<C>,
    ) -> Result<UintCiphertext<C>, FheError> {
        self.check_pair(a, b)?;
        let ev = self.bit_evaluator;
        let w = a.width();

        let mut bits = Vec::with_capacity(w);
        bits.push(ev.xor(a.bit(0), b.bit(0))?);
        if w == 1 {
            return Ok(self.wrap(bits));
        }

        let mut borrow = ev.and(&ev.not(a.bit(0)), b.bit(0))?;
        for i in 1..w {
            let half = ev.xor(a.bit(i), b.bit(i))?;
            bits.push(ev.xor(&half, &borrow)?);
            if i + 1 < w {
                borrow = ev.majority(&ev.not(a.bit(i)), b.bit(i), &borrow)?;
            }
        }

        Ok(self.wrap(bits))
    }

    /// Computes `-a mod 2^w`.
    #[inline]
    pub fn neg(&self, a: &UintCiphertext<C>) -> Result<UintCiphertext<C>, FheError> {
        self.check(a)?;
        self.sub(&self.trivial_zero(a.width()), a)
    }

    /// Adds the public constant `constant mod 2^w`.
    ///
    /// Set constant bits flip the matching input bit for free; the carry
    /// chain only runs above the lowest set bit, and bits that never met a
    /// bootstrap are refreshed at the end so repeated scalar additions do
    /// not accumulate noise.
    pub fn scalar_add(
        &self,
        a: &UintCiphertext<C>,
        constant: u128,
    ) -> Result<UintCiphertext<C>, FheError> {
        self.check(a)?;
        let ev = self.bit_evaluator;
        let w = a.width();

        let constant = if w >= 128 {
            constant
        } else {
            constant & ((1u128 << w) - 1)
        };
        if constant == 0 {
            return Ok(a.clone());
        }

        let low = constant.trailing_zeros() as usize;
        let mut bits = Vec::with_capacity(w);

        // below the lowest set bit nothing changes
        for i in 0..low {
            bits.push(ev.refresh(a.bit(i))?);
        }

        // at the lowest set bit the carry in is known zero: the sum bit is
        // a free flip and the carry out is the input bit itself
        bits.push(ev.refresh(&ev.not(a.bit(low)))?);
        let mut carry = a.bit(low).clone();

        for i in low + 1..w {
            let k_i = i < 128 && (constant >> i) & 1 == 1;
            if k_i {
                bits.push(ev.xnor(a.bit(i), &carry)?);
                if i + 1 < w {
                    carry = ev.or(a.bit(i), &carry)?;
                }
            } else {
                bits.push(ev.xor(a.bit(i), &carry)?);
                if i + 1 < w {
                    carry = ev.and(a.bit(i), &carry)?;
                }
            }
        }

        Ok(self.wrap(bits))
    }

    /// Computes the equality bit with per-bit xnors folded by a balanced
    /// tree of ands.
    pub fn eq(
        &self,
        a: &UintCiphertext<C>,
        b: &UintCiphertext<C>,
    ) -> Result<BitCiphertext<C>, FheError> {
        self.check_pair(a, b)?;
        let ev = self.bit_evaluator;

        let mut layer = a
            .bits()
            .iter()
            .zip(b.bits())
            .map(|(x, y)| ev.xnor(x, y))
            .collect::<Result<Vec<_>, _>>()?;

        while layer.len() > 1 {
            let mut next = Vec::with_capacity(layer.len().div_ceil(2));
            let mut chunks = layer.chunks_exact(2);
            for pair in &mut chunks {
                next.push(ev.and(&pair[0], &pair[1])?);
            }
            if let [odd] = chunks.remainder() {
                next.push(odd.clone());
            }
            layer = next;
        }

        Ok(layer.pop().unwrap())
    }

    /// Computes the inequality bit.
    #[inline]
    pub fn ne(
        &self,
        a: &UintCiphertext<C>,
        b: &UintCiphertext<C>,
    ) -> Result<BitCiphertext<C>, FheError> {
        Ok(self.bit_evaluator.not(&self.eq(a, b)?))
    }

    /// Computes `a < b` as the final borrow of the ripple subtractor.
    pub fn lt(
        &self,
        a: &UintCiphertext<C>,
        b: &UintCiphertext<C>,
    ) -> Result<BitCiphertext<C>, FheError> {
        self.check_pair(a, b)?;
        let ev = self.bit_evaluator;

        let mut borrow = ev.and(&ev.not(a.bit(0)), b.bit(0))?;
        for i in 1..a.width() {
            borrow = ev.majority(&ev.not(a.bit(i)), b.bit(i), &borrow)?;
        }
        Ok(borrow)
    }

    /// Computes `a <= b`.
    #[inline]
    pub fn le(
        &self,
        a: &UintCiphertext<C>,
        b: &UintCiphertext<C>,
    ) -> Result<BitCiphertext<C>, FheError> {
        Ok(self.bit_evaluator.not(&self.lt(b, a)?))
    }

    /// Computes `a > b`.
    #[inline]
    pub fn gt(
        &self,
        a: &UintCiphertext<C>,
        b: &UintCiphertext<C>,
    ) -> Result<BitCiphertext<C>, FheError> {
        self.lt(b, a)
    }

    /// Computes `a >= b`.
    #[inline]
    pub fn ge(
        &self,
        a: &UintCiphertext<C>,
        b: &UintCiphertext<C>,
    ) -> Result<BitCiphertext<C>, FheError> {
        Ok(self.bit_evaluator.not(&self.lt(a, b)?))
    }

    /// Computes `min(a, b)`.
    #[inline]
    pub fn min(
        &self,
        a: &UintCiphertext<C>,
        b: &UintCiphertext<C>,
    ) -> Result<UintCiphertext<C>, FheError> {
        let sel = self.lt(a, b)?;
        self.select(&sel, a, b)
    }

    /// Computes `max(a, b)`.
    #[inline]
    pub fn max(
        &self,
        a: &UintCiphertext<C>,
        b: &UintCiphertext<C>,
    ) -> Result<UintCiphertext<C>, FheError> {
        let sel = self.lt(a, b)?;
        self.select(&sel, b, a)
    }

    /// Computes the bitwise and, parallel over bits.
    pub fn and(
        &self,
        a: &UintCiphertext<C>,
        b: &UintCiphertext<C>,
    ) -> Result<UintCiphertext<C>, FheError> {
        self.check_pair(a, b)?;
        let ev = self.bit_evaluator;
        let bits = a
            .bits()
            .par_iter()
            .zip(b.bits().par_iter())
            .map(|(x, y)| ev.and(x, y))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(self.wrap(bits))
    }

    /// Computes the bitwise or, parallel over bits.
    pub fn or(
        &self,
        a: &UintCiphertext<C>,
        b: &UintCiphertext<C>,
    ) -> Result<UintCiphertext<C>, FheError> {
        self.check_pair(a, b)?;
        let ev = self.bit_evaluator;
        let bits = a
            .bits()
            .par_iter()
            .zip(b.bits().par_iter())
            .map(|(x, y)| ev.or(x, y))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(self.wrap(bits))
    }

    /// Computes the bitwise xor, parallel over bits.
    pub fn xor(
        &self,
        a: &UintCiphertext<C>,
        b: &UintCiphertext<C>,
    ) -> Result<UintCiphertext<C>, FheError> {
        self.check_pair(a, b)?;
        let ev = self.bit_evaluator;
        let bits = a
            .bits()
            .par_iter()
            .zip(b.bits().par_iter())
            .map(|(x, y)| ev.xor(x, y))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(self.wrap(bits))
    }

    /// Computes the bitwise not. Free, no bootstrap.
    pub fn not(&self, a: &UintCiphertext<C>) -> Result<UintCiphertext<C>, FheError> {
        self.check(a)?;
        let ev = self.bit_evaluator;
        Ok(self.wrap(a.bits().iter().map(|x| ev.not(x)).collect()))
    }

    /// Shifts left by a public amount: pure rewiring with trivial zeros
    /// shifted in.
    pub fn shl(
        &self,
        a: &UintCiphertext<C>,
        amount: usize,
    ) -> Result<UintCiphertext<C>, FheError> {
        self.check(a)?;
        let w = a.width();
        let keep = w.saturating_sub(amount);

        let mut bits = Vec::with_capacity(w);
        for _ in 0..w - keep {
            bits.push(self.bit_evaluator.trivial(false));
        }
        bits.extend(a.bits()[..keep].iter().cloned());
        Ok(self.wrap(bits))
    }

    /// Shifts right by a public amount: pure rewiring with trivial zeros
    /// shifted in.
    pub fn shr(
        &self,
        a: &UintCiphertext<C>,
        amount: usize,
    ) -> Result<UintCiphertext<C>, FheError> {
        self.check(a)?;
        let w = a.width();
        let keep = w.saturating_sub(amount);

        let mut bits: Vec<_> = a.bits()[w - keep..].iter().cloned().collect();
        while bits.len() < w {
            bits.push(self.bit_evaluator.trivial(false));
        }
        Ok(self.wrap(bits))
    }

    /// Selects `a` where `sel` is true, `b` otherwise, with a per-bit mux
    /// sharing the selector.
    pub fn select(
        &self,
        sel: &BitCiphertext<C>,
        a: &UintCiphertext<C>,
        b: &UintCiphertext<C>,
    ) -> Result<UintCiphertext<C>, FheError> {
        self.check_selector(sel)?;
        self.check_pair(a, b)?;
        let ev = self.bit_evaluator;

        let bits = a
            .bits()
            .par_iter()
            .zip(b.bits().par_iter())
            .map(|(x, y)| ev.mux(sel, x, y))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(self.wrap(bits))
    }

    /// Truncates or zero-extends to `width`.
    pub fn cast_to(
        &self,
        a: &UintCiphertext<C>,
        width: usize,
    ) -> Result<UintCiphertext<C>, FheError> {
        self.check(a)?;
        check_width(width)?;

        let mut bits: Vec<_> = a.bits().iter().take(width).cloned().collect();
        while bits.len() < width {
            bits.push(self.bit_evaluator.trivial(false));
        }
        Ok(self.wrap(bits))
    }

    /// Refreshes every bit, parallel over bits.
    pub fn refresh(&self, a: &UintCiphertext<C>) -> Result<UintCiphertext<C>, FheError> {
        self.check(a)?;
        let ev = self.bit_evaluator;
        let bits = a
            .bits()
            .par_iter()
            .map(|x| ev.refresh(x))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(self.wrap(bits))
    }

    /// Reserved: integer multiplication is not implemented.
    pub fn mul(
        &self,
        _a: &UintCiphertext<C>,
        _b: &UintCiphertext<C>,
    ) -> Result<UintCiphertext<C>, FheError> {
        Err(FheError::NotImplemented("integer multiplication"))
    }

    /// Reserved: integer division is not implemented.
    pub fn div(
        &self,
        _a: &UintCiphertext<C>,
        _b: &UintCiphertext<C>,
    ) -> Result<UintCiphertext<C>, FheError> {
        Err(FheError::NotImplemented("integer division"))
    }
}
