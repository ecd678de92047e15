use itertools::Itertools;
use rsa_witgen_number::FieldElement;

use crate::div_ceil;

/// Carries a register array whose entries are signed values below `2^m` in
/// magnitude into limbs of `n` bits.
///
/// The result has `values.len() + ceil(m / n)` limbs, all in `[0, 2^n)`. Carries out
/// of negative registers round towards minus infinity. The carry out of the top limb
/// is dropped, so a total that is negative or too large comes out modulo
/// `2^(n * (len + ceil(m / n)))`. With `m == 0` every register is zero and `values` is
/// returned as is.
pub fn get_proper_representation<T: FieldElement>(m: usize, n: usize, values: &[T]) -> Vec<T> {
    if m == 0 {
        return values.to_vec();
    }
    let k = values.len();
    let pieces_per_value = div_ceil(m, n);
    let base = T::two_pow(n);
    let pieces = values
        .iter()
        .map(|&value| split(n, pieces_per_value, value))
        .collect_vec();

    let mut carry = T::zero();
    (0..k + pieces_per_value)
        .map(|idx| {
            let register = carry
                + (idx.saturating_sub(pieces_per_value - 1)..k.min(idx + 1))
                    .map(|i| pieces[i][idx - i])
                    .sum::<T>();
            let (low, high) = if register.is_negative() {
                let magnitude = -register;
                let low = magnitude.integer_mod(base);
                let high = -magnitude.integer_div(base);
                if low.is_zero() {
                    (low, high)
                } else {
                    (base - low, high - T::one())
                }
            } else {
                (register.integer_mod(base), register.integer_div(base))
            };
            carry = high;
            low
        })
        .collect()
}

/// Splits a signed value into `count` pieces of `n` bits, each carrying the value's sign.
fn split<T: FieldElement>(n: usize, count: usize, value: T) -> Vec<T> {
    let base = T::two_pow(n);
    let negative = value.is_negative();
    let magnitude = (if negative { -value } else { value }).to_integer();
    (0..count)
        .map(|j| {
            let piece = T::from(magnitude >> (n * j)).integer_mod(base);
            if negative {
                -piece
            } else {
                piece
            }
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::limbs_to_biguint;
    use num_bigint::{BigInt, BigUint, RandBigInt};
    use num_traits::{One, Signed, Zero};
    use pretty_assertions::assert_eq;
    use rand::{rngs::StdRng, Rng, SeedableRng};
    use rsa_witgen_number::Bn254Field;
    use test_log::test;

    type F = Bn254Field;

    fn signed_value(registers: &[F], n: usize) -> BigInt {
        registers
            .iter()
            .rev()
            .fold(BigInt::zero(), |acc, r| (acc << n) + r.to_signed_integer())
    }

    #[test]
    fn preserves_value() {
        let mut rng = StdRng::seed_from_u64(0);
        let (n, k, m) = (16, 7, 37);
        let bound = BigInt::one() << m;
        let lower = -&bound + 1;
        for _ in 0..200 {
            let non_negative = rng.gen_bool(0.5);
            let values = (0..k)
                .map(|_| {
                    let v = rng.gen_bigint_range(&lower, &bound);
                    let v = if non_negative { v.abs() } else { v };
                    F::from_signed_integer(&v)
                })
                .collect_vec();
            let proper = get_proper_representation(m, n, &values);
            let len = k + div_ceil(m, n);
            assert_eq!(proper.len(), len);
            let two_pow_n = BigUint::one() << n;
            assert!(proper.iter().all(|l| l.to_arbitrary_integer() < two_pow_n));

            let modulus = BigInt::one() << (n * len);
            let expected = (signed_value(&values, n) % &modulus + &modulus) % &modulus;
            assert_eq!(BigInt::from(limbs_to_biguint(&proper, n)), expected);
        }
    }

    #[test]
    fn carries_into_new_limbs() {
        let two_pow_20 = F::two_pow(20);
        let proper = get_proper_representation(21, 8, &[two_pow_20 + F::from(3u32)]);
        assert_eq!(proper, [3u32, 0, 16, 0].map(F::from).to_vec());
    }

    #[test]
    fn zero_bound_keeps_registers() {
        let values = [F::zero(); 3];
        assert_eq!(get_proper_representation(0, 8, &values), values.to_vec());
        assert_eq!(get_proper_representation::<F>(0, 8, &[]), Vec::<F>::new());
    }

    #[test]
    fn negative_registers_round_down() {
        // -2^8 == 0 + 255 * 2^8 + 255 * 2^16 modulo 2^24, no limb may equal 2^8.
        let proper = get_proper_representation(9, 8, &[F::from(-256)]);
        assert_eq!(proper, [0u32, 255, 255].map(F::from).to_vec());
        // 5 - 2^8 + 2^16 == 5 + 255 * 2^8
        let proper = get_proper_representation(9, 8, &[F::from(5), F::from(-1), F::from(1)]);
        assert_eq!(proper, [5u32, 255, 0, 0, 0].map(F::from).to_vec());
    }
}
