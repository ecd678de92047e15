//! Long-integer arithmetic on little-endian arrays of limbs.
//!
//! A limb array `a` with limb width `n` stands for `sum(a[i] * 2^(n * i))`. Every limb
//! is a field element, and the routines below only use the operations an arithmetic
//! circuit has at hand: field arithmetic plus integer division, remainder and signed
//! comparison on canonical representatives. Reads past the end of an array yield zero.

mod limbs;
mod long;
mod poly;
mod representation;

pub use limbs::{biguint_to_limbs, limbs_to_biguint};
pub use long::{
    long_add, long_cmp, long_div, long_gt, long_scalar_mult, long_sub, short_div,
    short_div_norm, LongDivision,
};
pub use poly::{poly_eval, poly_interp, Interpolator};
pub use representation::get_proper_representation;

use rsa_witgen_number::FieldElement;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum BigIntError {
    #[error("division by a zero divisor")]
    DivisionByZero,
    #[error("a {bits}-bit value does not fit into {limb_count} limbs of {limb_bits} bits")]
    Overflow {
        bits: u64,
        limb_bits: usize,
        limb_count: usize,
    },
}

/// `ceil(m / n)`.
pub fn div_ceil(m: usize, n: usize) -> usize {
    m.div_ceil(n)
}

/// The number of bits needed to write `n`, i.e. the smallest `i` with `n >> i == 0`.
pub fn log_ceil(n: usize) -> usize {
    (usize::BITS - n.leading_zeros()) as usize
}

/// The limb at `index`, zero past the end of the array.
pub(crate) fn limb<T: FieldElement>(limbs: &[T], index: usize) -> T {
    limbs.get(index).copied().unwrap_or_else(T::zero)
}
