use algebra::integer::UnsignedInteger;
use lattice::Lwe;

/// Rescales `v` from `Z_{modulus_in}` to `Z_{modulus_out}` by nearest
/// integer rounding, ties to even, entirely in integer arithmetic.
#[inline]
fn switch_value(v: u64, modulus_in: u64, modulus_out: u64) -> u64 {
    let numerator = v as u128 * modulus_out as u128;
    let quotient = (numerator / modulus_in as u128) as u64;
    let twice_remainder = (numerator % modulus_in as u128) << 1;

    let rounded = match twice_remainder.cmp(&(modulus_in as u128)) {
        std::cmp::Ordering::Less => quotient,
        std::cmp::Ordering::Greater => quotient + 1,
        std::cmp::Ordering::Equal => quotient + (quotient & 1),
    };

    if rounded >= modulus_out {
        rounded - modulus_out
    } else {
        rounded
    }
}

/// Switches an LWE sample from `modulus_in` to `modulus_out`, rounding each
/// component to the nearest target residue with ties to even.
pub fn lwe_modulus_switch<CIn, COut>(
    ciphertext: &Lwe<CIn>,
    modulus_in: u64,
    modulus_out: u64,
) -> Lwe<COut>
where
    CIn: UnsignedInteger,
    COut: UnsignedInteger,
{
    let switch = |v: CIn| COut::as_from(switch_value(v.as_into(), modulus_in, modulus_out));

    let a: Vec<COut> = ciphertext.a().iter().map(|&v| switch(v)).collect();
    let b = switch(ciphertext.b());

    Lwe::new(a, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_to_nearest() {
        // 2^15 -> 2^11: scale 1/16
        assert_eq!(switch_value(16, 1 << 15, 1 << 11), 1);
        assert_eq!(switch_value(23, 1 << 15, 1 << 11), 1);
        assert_eq!(switch_value(25, 1 << 15, 1 << 11), 2);
    }

    #[test]
    fn ties_go_to_even() {
        // v * 2^11 / 2^15 = v / 16; v = 24 -> 1.5, v = 40 -> 2.5
        assert_eq!(switch_value(24, 1 << 15, 1 << 11), 2);
        assert_eq!(switch_value(40, 1 << 15, 1 << 11), 2);
    }

    #[test]
    fn wraps_to_zero_at_the_top() {
        // the last residue rounds up to the modulus and wraps
        assert_eq!(switch_value((1 << 15) - 1, 1 << 15, 1 << 11), 0);
    }

    #[test]
    fn prime_to_pow_of_2_is_exact_enough() {
        let q_in = 132120577u64;
        let q_out = 1u64 << 15;
        // Δ_in · m should land on Δ_out · m
        for m in 0..8u64 {
            let v = (q_in >> 3) * m;
            let switched = switch_value(v, q_in, q_out);
            let expected = (q_out >> 3) * m;
            assert!(switched.abs_diff(expected) <= 1);
        }
    }
}
