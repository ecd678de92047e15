use num_bigint::BigUint;
use num_traits::{One, Zero};
use rsa_witgen_number::FieldElement;

use crate::BigIntError;

/// Splits `value` into `limb_count` little-endian limbs of `limb_bits` bits.
pub fn biguint_to_limbs<T: FieldElement>(
    value: &BigUint,
    limb_bits: usize,
    limb_count: usize,
) -> Result<Vec<T>, BigIntError> {
    if value.bits() > (limb_bits * limb_count) as u64 {
        return Err(BigIntError::Overflow {
            bits: value.bits(),
            limb_bits,
            limb_count,
        });
    }
    let mask = (BigUint::one() << limb_bits) - 1u32;
    Ok((0..limb_count)
        .map(|i| T::from((value >> (limb_bits * i)) & &mask))
        .collect())
}

/// The integer a little-endian limb array stands for. Limbs are read as their
/// canonical representatives.
pub fn limbs_to_biguint<T: FieldElement>(limbs: &[T], limb_bits: usize) -> BigUint {
    limbs.iter().rev().fold(BigUint::zero(), |acc, limb| {
        (acc << limb_bits) + limb.to_arbitrary_integer()
    })
}
