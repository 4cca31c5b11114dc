use algebra::integer::UnsignedInteger;
use algebra::polynomial::FieldPolynomial;
use algebra::reduce::RingReduce;
use algebra::NttField;
use fhe_core::{BootstrapKey, FheError, LweCiphertext, Parameters, SecretKeyPack};
use rand::{CryptoRng, Rng};

use crate::lut::{and_majority_lut, identity_lut, nand_lut, nor_lut, or_lut, xor_lut};
use crate::BitCiphertext;

/// The gate evaluator.
///
/// Every non-trivial gate is one linear combination of its inputs followed
/// by a single programmable bootstrap, which both applies the gate's truth
/// table and resets the noise, so gates compose to arbitrary depth.
pub struct Evaluator<C: UnsignedInteger, Q: NttField> {
    bootstrap_key: BootstrapKey<C, Q>,
}

impl<C: UnsignedInteger, Q: NttField> Evaluator<C, Q> {
    /// Creates a new [`Evaluator<C, Q>`], generating the bootstrap key.
    #[inline]
    pub fn new<R>(secret_key_pack: &SecretKeyPack<C, Q>, rng: &mut R) -> Self
    where
        R: Rng + CryptoRng,
    {
        Self {
            bootstrap_key: BootstrapKey::new(secret_key_pack, rng),
        }
    }

    /// Creates an [`Evaluator<C, Q>`] around an existing bootstrap key,
    /// e.g. one parsed from bytes on the evaluating side.
    #[inline]
    pub fn from_bootstrap_key(bootstrap_key: BootstrapKey<C, Q>) -> Self {
        Self { bootstrap_key }
    }

    /// Returns the parameters.
    #[inline]
    pub fn parameters(&self) -> &Parameters<C, Q> {
        self.bootstrap_key.parameters()
    }

    /// Returns the bootstrap key.
    #[inline]
    pub fn bootstrap_key(&self) -> &BootstrapKey<C, Q> {
        &self.bootstrap_key
    }

    fn check(&self, c: &BitCiphertext<C>) -> Result<(), FheError> {
        let expected = self.parameters().preset();
        if c.preset() != expected {
            return Err(FheError::ParameterMismatch {
                expected,
                found: c.preset(),
            });
        }
        Ok(())
    }

    #[inline]
    fn wrap(&self, cipher: LweCiphertext<C>) -> BitCiphertext<C> {
        BitCiphertext::new(cipher, self.parameters().preset())
    }

    fn bootstrap_lwe(
        &self,
        cipher: LweCiphertext<C>,
        lut: FieldPolynomial<Q>,
    ) -> Result<BitCiphertext<C>, FheError> {
        self.bootstrap_key
            .bootstrap(&cipher, lut)
            .map(|c| self.wrap(c))
            .map_err(|e| FheError::BootstrapFailed(Box::new(e)))
    }

    /// Sums the inputs, shifts the phase by `Δ/2` and bootstraps with `lut`.
    fn threshold_gate(
        &self,
        inputs: &[&BitCiphertext<C>],
        lut: FieldPolynomial<Q>,
    ) -> Result<BitCiphertext<C>, FheError> {
        let parameters = self.parameters();
        let modulus = parameters.lwe_cipher_modulus();

        let mut sum = inputs[0].cipher().clone();
        for c in &inputs[1..] {
            sum.add_reduce_assign_component_wise(c.cipher(), modulus);
        }

        let half_delta = parameters.scaling_factor() / C::TWO;
        modulus.reduce_add_assign(sum.b_mut(), half_delta);

        self.bootstrap_lwe(sum, lut)
    }

    /// Evaluates `lut` at the phase of `c`, exposing the programmable
    /// bootstrap directly.
    pub fn bootstrap(
        &self,
        c: &BitCiphertext<C>,
        lut: FieldPolynomial<Q>,
    ) -> Result<BitCiphertext<C>, FheError> {
        self.check(c)?;
        self.bootstrap_lwe(c.cipher().clone(), lut)
    }

    /// Produces a noiseless trivial encryption of `message`, valid under
    /// any key.
    pub fn trivial(&self, message: bool) -> BitCiphertext<C> {
        let parameters = self.parameters();
        let mut cipher = LweCiphertext::zero(parameters.lwe_dimension());
        if message {
            *cipher.b_mut() = parameters.scaling_factor();
        }
        self.wrap(cipher)
    }

    /// Performs the homomorphic not operation: negation plus a constant
    /// offset of `Δ` on the body. Free, no bootstrap.
    pub fn not(&self, c: &BitCiphertext<C>) -> BitCiphertext<C> {
        let parameters = self.parameters();
        let modulus = parameters.lwe_cipher_modulus();

        let mut neg = c.cipher().neg_reduce(modulus);
        modulus.reduce_add_assign(neg.b_mut(), parameters.scaling_factor());

        BitCiphertext::new(neg, c.preset())
    }

    /// Performs the homomorphic and operation: `true` iff the phase sum
    /// reaches `1.5Δ`.
    pub fn and(
        &self,
        c0: &BitCiphertext<C>,
        c1: &BitCiphertext<C>,
    ) -> Result<BitCiphertext<C>, FheError> {
        self.check(c0)?;
        self.check(c1)?;
        let lut = and_majority_lut(self.parameters().ring_dimension());
        self.threshold_gate(&[c0, c1], lut)
    }

    /// Performs the homomorphic nand operation.
    pub fn nand(
        &self,
        c0: &BitCiphertext<C>,
        c1: &BitCiphertext<C>,
    ) -> Result<BitCiphertext<C>, FheError> {
        self.check(c0)?;
        self.check(c1)?;
        let lut = nand_lut(self.parameters().ring_dimension());
        self.threshold_gate(&[c0, c1], lut)
    }

    /// Performs the homomorphic or operation: `true` iff the phase sum
    /// reaches `0.5Δ`.
    pub fn or(
        &self,
        c0: &BitCiphertext<C>,
        c1: &BitCiphertext<C>,
    ) -> Result<BitCiphertext<C>, FheError> {
        self.check(c0)?;
        self.check(c1)?;
        let lut = or_lut(self.parameters().ring_dimension());
        self.threshold_gate(&[c0, c1], lut)
    }

    /// Performs the homomorphic nor operation.
    pub fn nor(
        &self,
        c0: &BitCiphertext<C>,
        c1: &BitCiphertext<C>,
    ) -> Result<BitCiphertext<C>, FheError> {
        self.check(c0)?;
        self.check(c1)?;
        let lut = nor_lut(self.parameters().ring_dimension());
        self.threshold_gate(&[c0, c1], lut)
    }

    /// Performs the homomorphic xor operation with a single bootstrap.
    ///
    /// The sum is doubled before bootstrapping; the `(true, true)` input
    /// wraps into the negacyclic half of the test polynomial and still
    /// decodes to `false`.
    pub fn xor(
        &self,
        c0: &BitCiphertext<C>,
        c1: &BitCiphertext<C>,
    ) -> Result<BitCiphertext<C>, FheError> {
        self.check(c0)?;
        self.check(c1)?;
        let parameters = self.parameters();
        let modulus = parameters.lwe_cipher_modulus();

        let mut sum = c0
            .cipher()
            .add_reduce_component_wise_ref(c1.cipher(), modulus);
        sum.double_reduce_assign(modulus);

        self.bootstrap_lwe(sum, xor_lut(parameters.ring_dimension()))
    }

    /// Performs the homomorphic xnor operation: the free negation of
    /// [`Evaluator::xor`].
    ///
    /// Under the `{0, Δ}` encoding a single-bootstrap xnor would need the
    /// test polynomial to take the same value at a phase and its antipode,
    /// which negacyclicity forbids.
    pub fn xnor(
        &self,
        c0: &BitCiphertext<C>,
        c1: &BitCiphertext<C>,
    ) -> Result<BitCiphertext<C>, FheError> {
        Ok(self.not(&self.xor(c0, c1)?))
    }

    /// Performs `and` with the first input negated: `(not c0) and c1`.
    #[inline]
    pub fn and_not_left(
        &self,
        c0: &BitCiphertext<C>,
        c1: &BitCiphertext<C>,
    ) -> Result<BitCiphertext<C>, FheError> {
        self.and(&self.not(c0), c1)
    }

    /// Performs `and` with the second input negated: `c0 and (not c1)`.
    #[inline]
    pub fn and_not_right(
        &self,
        c0: &BitCiphertext<C>,
        c1: &BitCiphertext<C>,
    ) -> Result<BitCiphertext<C>, FheError> {
        self.and(c0, &self.not(c1))
    }

    /// Performs `or` with the first input negated: `(not c0) or c1`.
    #[inline]
    pub fn or_not_left(
        &self,
        c0: &BitCiphertext<C>,
        c1: &BitCiphertext<C>,
    ) -> Result<BitCiphertext<C>, FheError> {
        self.or(&self.not(c0), c1)
    }

    /// Performs `or` with the second input negated: `c0 or (not c1)`.
    #[inline]
    pub fn or_not_right(
        &self,
        c0: &BitCiphertext<C>,
        c1: &BitCiphertext<C>,
    ) -> Result<BitCiphertext<C>, FheError> {
        self.or(c0, &self.not(c1))
    }

    /// Performs the homomorphic majority operation on three inputs with a
    /// single bootstrap: `true` iff at least two inputs are `true`.
    pub fn majority(
        &self,
        c0: &BitCiphertext<C>,
        c1: &BitCiphertext<C>,
        c2: &BitCiphertext<C>,
    ) -> Result<BitCiphertext<C>, FheError> {
        self.check(c0)?;
        self.check(c1)?;
        self.check(c2)?;
        let lut = and_majority_lut(self.parameters().ring_dimension());
        self.threshold_gate(&[c0, c1, c2], lut)
    }

    /// Performs the homomorphic mux operation:
    /// `if c0 { c1 } else { c2 }`, composed as
    /// `OR(AND(c0, c1), AND(NOT(c0), c2))` with three bootstraps.
    pub fn mux(
        &self,
        c0: &BitCiphertext<C>,
        c1: &BitCiphertext<C>,
        c2: &BitCiphertext<C>,
    ) -> Result<BitCiphertext<C>, FheError> {
        self.check(c0)?;
        self.check(c1)?;
        self.check(c2)?;

        let not_c0 = self.not(c0);
        let (t0, t1) = rayon::join(|| self.and(c0, c1), || self.and(&not_c0, c2));
        let (t0, t1) = (t0?, t1?);

        let lut = or_lut(self.parameters().ring_dimension());
        self.threshold_gate(&[&t0, &t1], lut)
    }

    /// Performs the homomorphic and of three inputs as a tree of two
    /// two-input gates.
    pub fn and3(
        &self,
        c0: &BitCiphertext<C>,
        c1: &BitCiphertext<C>,
        c2: &BitCiphertext<C>,
    ) -> Result<BitCiphertext<C>, FheError> {
        let t = self.and(c0, c1)?;
        self.and(&t, c2)
    }

    /// Performs the homomorphic or of three inputs as a tree of two
    /// two-input gates.
    pub fn or3(
        &self,
        c0: &BitCiphertext<C>,
        c1: &BitCiphertext<C>,
        c2: &BitCiphertext<C>,
    ) -> Result<BitCiphertext<C>, FheError> {
        let t = self.or(c0, c1)?;
        self.or(&t, c2)
    }

    /// Performs the homomorphic nand of three inputs.
    pub fn nand3(
        &self,
        c0: &BitCiphertext<C>,
        c1: &BitCiphertext<C>,
        c2: &BitCiphertext<C>,
    ) -> Result<BitCiphertext<C>, FheError> {
        Ok(self.not(&self.and3(c0, c1, c2)?))
    }

    /// Performs the homomorphic nor of three inputs.
    pub fn nor3(
        &self,
        c0: &BitCiphertext<C>,
        c1: &BitCiphertext<C>,
        c2: &BitCiphertext<C>,
    ) -> Result<BitCiphertext<C>, FheError> {
        Ok(self.not(&self.or3(c0, c1, c2)?))
    }

    /// Refreshes a ciphertext: the identity test polynomial resets the
    /// noise without changing the bit.
    pub fn refresh(&self, c: &BitCiphertext<C>) -> Result<BitCiphertext<C>, FheError> {
        self.check(c)?;
        let lut = identity_lut(self.parameters().ring_dimension());
        self.threshold_gate(&[c], lut)
    }
}
