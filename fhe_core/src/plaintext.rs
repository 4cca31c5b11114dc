use algebra::integer::UnsignedInteger;

/// Encodes a message in `[0, t)` as `m · (q / t)`.
///
/// Both `t` and `q` must be powers of two.
#[inline]
pub fn encode<C: UnsignedInteger>(message: C, t: C, q: C) -> C {
    debug_assert!(t.count_ones() == 1 && q.count_ones() == 1);
    debug_assert!(message < t);
    message << (q / t).trailing_zeros() as usize
}

/// Decodes a plaintext back to its message in `[0, t)` by rounding to the
/// nearest multiple of `q / t`.
#[inline]
pub fn decode<C: UnsignedInteger>(plaintext: C, t: C, q: C) -> C {
    debug_assert!(t.count_ones() == 1 && q.count_ones() == 1);
    // keep one extra bit for the rounding decision
    let temp = plaintext >> ((q / t).trailing_zeros() - 1) as usize;
    ((temp >> 1) + (temp & C::ONE)) & (t - C::ONE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_and_rounding() {
        let t: u16 = 8;
        let q: u16 = 1 << 15;
        let delta = q / t;

        for m in 0..t {
            assert_eq!(decode(encode(m, t, q), t, q), m);
            // noise below Δ/2 decodes to the same message
            let noisy_up = encode(m, t, q) + delta / 2 - 1;
            assert_eq!(decode(noisy_up, t, q), m);
            let noisy_down = encode(m, t, q).wrapping_sub(delta / 2 - 1) & (q - 1);
            assert_eq!(decode(noisy_down, t, q), m);
        }
    }
}
