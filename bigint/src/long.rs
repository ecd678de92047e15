use std::cmp::Ordering;
use std::iter::once;

use itertools::Itertools;
use rsa_witgen_number::FieldElement;

use crate::{limb, BigIntError};

/// Quotient and remainder of [`long_div`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LongDivision<T> {
    pub quotient: Vec<T>,
    pub remainder: Vec<T>,
}

/// Schoolbook addition. The result has one limb more than the longer operand.
pub fn long_add<T: FieldElement>(n: usize, a: &[T], b: &[T]) -> Vec<T> {
    let base = T::two_pow(n);
    let mut carry = T::zero();
    let mut sum = (0..a.len().max(b.len()))
        .map(|i| {
            let column = limb(a, i) + limb(b, i) + carry;
            carry = column.integer_div(base);
            column.integer_mod(base)
        })
        .collect_vec();
    sum.push(carry);
    sum
}

/// Multiplies every limb of `b` by `scalar` and propagates the carries.
/// The result has `b.len() + 1` limbs.
pub fn long_scalar_mult<T: FieldElement>(n: usize, scalar: T, b: &[T]) -> Vec<T> {
    let base = T::two_pow(n);
    let mut out = vec![T::zero(); b.len() + 1];
    for (i, &limb) in b.iter().enumerate() {
        let temp = out[i] + scalar * limb;
        out[i] = temp.integer_mod(base);
        out[i + 1] += temp.integer_div(base);
    }
    out
}

/// Schoolbook subtraction with borrow, `a.len()` limbs of output.
///
/// A borrow out of the top limb is dropped, so the result is only meaningful for
/// `a >= b`.
pub fn long_sub<T: FieldElement>(n: usize, a: &[T], b: &[T]) -> Vec<T> {
    let base = T::two_pow(n);
    let mut borrow = false;
    a.iter()
        .enumerate()
        .map(|(i, &a_i)| {
            let subtrahend = limb(b, i) + T::from(borrow);
            borrow = a_i.signed_cmp(&subtrahend) == Ordering::Less;
            if borrow {
                base + a_i - subtrahend
            } else {
                a_i - subtrahend
            }
        })
        .collect()
}

/// Compares two limb arrays, most significant limb first. Limbs compare as signed
/// values and missing limbs count as zero.
pub fn long_cmp<T: FieldElement>(a: &[T], b: &[T]) -> Ordering {
    (0..a.len().max(b.len()))
        .rev()
        .map(|i| limb(a, i).signed_cmp(&limb(b, i)))
        .find(|ordering| *ordering != Ordering::Equal)
        .unwrap_or(Ordering::Equal)
}

pub fn long_gt<T: FieldElement>(a: &[T], b: &[T]) -> bool {
    long_cmp(a, b) == Ordering::Greater
}

/// One quotient digit of `a / b` for a normalized divisor `b` of `k` limbs and a
/// dividend `a` of `k + 1` limbs with `a < b * 2^n`.
///
/// The digit is estimated from the two leading limbs of `a` and the leading limb of
/// `b`, clamped to `2^n - 1`, and corrected downwards at most twice.
pub fn short_div_norm<T: FieldElement>(n: usize, a: &[T], b: &[T]) -> Result<T, BigIntError> {
    let k = b.len();
    debug_assert_eq!(a.len(), k + 1);
    let leading = match b.last() {
        Some(leading) if !leading.is_zero() => *leading,
        _ => return Err(BigIntError::DivisionByZero),
    };
    let base = T::two_pow(n);
    let mut qhat = (a[k] * base + a[k - 1]).integer_div(leading);
    if qhat.signed_cmp(&(base - T::one())) == Ordering::Greater {
        qhat = base - T::one();
    }

    let mult = long_scalar_mult(n, qhat, b);
    Ok(if long_gt(&mult, a) {
        let mult = long_sub(n, &mult, b);
        if long_gt(&mult, a) {
            qhat - T::from(2u32)
        } else {
            qhat - T::one()
        }
    } else {
        qhat
    })
}

/// One quotient digit of `a / b` for a `k`-limb divisor and a `k + 1`-limb dividend
/// with `a < b * 2^n`. Both operands get scaled by `2^n \ (b[k-1] + 1)` first.
/// An empty divisor counts as zero.
pub fn short_div<T: FieldElement>(n: usize, a: &[T], b: &[T]) -> Result<T, BigIntError> {
    let k = b.len();
    debug_assert_eq!(a.len(), k + 1);
    let Some(&leading) = b.last() else {
        return Err(BigIntError::DivisionByZero);
    };
    let scale = T::two_pow(n).integer_div(leading + T::one());
    let norm_a = long_scalar_mult(n, scale, a);
    let norm_b = long_scalar_mult(n, scale, b);
    if norm_b[k].is_zero() {
        short_div_norm(n, &norm_a[..=k], &norm_b[..k])
    } else {
        short_div_norm(n, &norm_a, &norm_b)
    }
}

/// Long division of a `b.len() + m`-limb dividend by the divisor `b`.
///
/// Leading zero limbs of `b` are stripped before the digit loop, so the quotient has
/// `m + 1` limbs plus one more per stripped limb. The remainder has `b.len()` limbs.
/// Limbs of `a` beyond `b.len() + m` are ignored.
pub fn long_div<T: FieldElement>(
    n: usize,
    m: usize,
    a: &[T],
    b: &[T],
) -> Result<LongDivision<T>, BigIntError> {
    let k = b.len();
    let significant = b
        .iter()
        .rposition(|l| !l.is_zero())
        .ok_or(BigIntError::DivisionByZero)?
        + 1;
    let divisor = &b[..significant];
    if significant < k {
        log::trace!("Dividing by a divisor with {} leading zero limbs", k - significant);
    }

    let width = k + m;
    let top = width - significant;
    let mut remainder = (0..width).map(|i| limb(a, i)).collect_vec();
    let mut quotient = vec![T::zero(); top + 1];
    for i in (0..=top).rev() {
        let dividend = if i == top {
            remainder[top..]
                .iter()
                .copied()
                .chain(once(T::zero()))
                .collect_vec()
        } else {
            remainder[i..=i + significant].to_vec()
        };
        quotient[i] = short_div(n, &dividend, divisor)?;

        let mut subtrahend = vec![T::zero(); width];
        for (j, v) in long_scalar_mult(n, quotient[i], divisor)
            .into_iter()
            .enumerate()
            .filter(|(j, _)| i + j < width)
        {
            subtrahend[i + j] = v;
        }
        remainder = long_sub(n, &remainder, &subtrahend);
    }
    remainder.truncate(k);
    Ok(LongDivision {
        quotient,
        remainder,
    })
}
