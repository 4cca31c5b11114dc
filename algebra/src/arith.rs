//! Primitive root search for NTT-friendly prime moduli.

use crate::modulus::BarrettModulus;
use crate::reduce::RingReduce;
use crate::AlgebraError;

/// Returns the minimal primitive `2^log_order`-th root of unity modulo the
/// given prime.
///
/// The root is derived from a generator of the multiplicative group: the
/// group order `p - 1` is factored by trial division, a generator is found by
/// checking the cofactor powers, and the minimal root is selected among the
/// odd powers of the derived root of the requested order.
pub fn minimal_primitive_root(
    modulus: BarrettModulus<u32>,
    log_order: u32,
) -> Result<u32, AlgebraError> {
    let p = modulus.value();
    let order = 1u64 << log_order;
    let group_order = p as u64 - 1;

    if group_order % order != 0 {
        return Err(AlgebraError::NoPrimitiveRoot {
            order,
            modulus: p as u64,
        });
    }

    let factors = prime_factors(group_order);
    let generator = (2..p)
        .find(|&candidate| {
            factors
                .iter()
                .all(|&f| modulus.reduce_pow(candidate, group_order / f) != 1)
        })
        .ok_or(AlgebraError::NoPrimitiveRoot {
            order,
            modulus: p as u64,
        })?;

    let root = modulus.reduce_pow(generator, group_order / order);
    debug_assert_eq!(modulus.reduce_pow(root, order >> 1), p - 1);

    // Every odd power of `root` has the same order; pick the smallest.
    let square = modulus.reduce_mul(root, root);
    let mut minimal = root;
    let mut power = root;
    for _ in 1..(order >> 1) {
        power = modulus.reduce_mul(power, square);
        if power < minimal {
            minimal = power;
        }
    }

    Ok(minimal)
}

fn prime_factors(mut n: u64) -> Vec<u64> {
    let mut factors = Vec::new();
    let mut d = 2u64;
    while d * d <= n {
        if n % d == 0 {
            factors.push(d);
            while n % d == 0 {
                n /= d;
            }
        }
        d += 1;
    }
    if n > 1 {
        factors.push(n);
    }
    factors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_has_exact_order() {
        let modulus = BarrettModulus::new(132120577);
        let log_order = 11; // 2N for N = 1024
        let root = minimal_primitive_root(modulus, log_order).unwrap();

        let order = 1u64 << log_order;
        assert_eq!(modulus.reduce_pow(root, order), 1);
        assert_eq!(modulus.reduce_pow(root, order >> 1), modulus.value() - 1);
    }

    #[test]
    fn rejects_incompatible_order() {
        // 17 - 1 = 16, so no 32nd root exists.
        let modulus = BarrettModulus::new(17);
        assert!(minimal_primitive_root(modulus, 5).is_err());
    }
}
