use std::{cmp::Ordering, fmt, hash::Hash, iter, ops::*};

use num_traits::{One, Zero};

use crate::{AbstractNumberType, SignedNumberType};

/// The fixed-width unsigned integer behind a field element.
pub trait LargeInt:
    Copy
    + Send
    + Sync
    + PartialEq
    + Eq
    + PartialOrd
    + Ord
    + Hash
    + From<u32>
    + From<u64>
    + BitAnd<Output = Self>
    + Shr<usize, Output = Self>
    + fmt::Debug
    + fmt::Display
    + fmt::LowerHex
{
    /// Number of significant bits, zero for zero.
    fn num_bits(&self) -> usize;

    fn bit(&self, index: usize) -> bool;

    fn is_zero(&self) -> bool;

    fn to_arbitrary_integer(self) -> AbstractNumberType;

    fn try_into_u64(&self) -> Option<u64>;
}

/// An element of a prime field.
///
/// Besides the field operations, the trait exposes the integer semantics circuits
/// attach to field elements: integer division and remainder on canonical
/// representatives, and a signed view where every element above `(p - 1) / 2`
/// stands for a negative number.
pub trait FieldElement:
    'static
    + Copy
    + Default
    + Send
    + Sync
    + PartialEq
    + Eq
    + Hash
    + Add<Output = Self>
    + AddAssign
    + Sub<Output = Self>
    + SubAssign
    + Mul<Output = Self>
    + MulAssign
    + Div<Output = Self>
    + Neg<Output = Self>
    + Zero
    + One
    + iter::Sum
    + iter::Product
    + fmt::Display
    + fmt::Debug
    + fmt::LowerHex
    + From<Self::Integer>
    + From<AbstractNumberType>
    + From<u32>
    + From<u64>
    + From<i32>
    + From<i64>
    + From<bool>
{
    /// The underlying fixed-width integer type
    type Integer: LargeInt;

    /// Number of bits of the field modulus.
    const BITS: usize;

    fn to_integer(&self) -> Self::Integer;

    fn to_arbitrary_integer(&self) -> AbstractNumberType {
        self.to_integer().to_arbitrary_integer()
    }

    fn modulus() -> Self::Integer;

    fn pow(self, exponent: Self::Integer) -> Self;

    /// The multiplicative inverse, `None` for zero.
    fn inverse(self) -> Option<Self>;

    /// True if the canonical representative is larger than `(p - 1) / 2`.
    fn is_negative(&self) -> bool;

    /// Integer division of the canonical representatives.
    ///
    /// Panics if `other` is zero.
    fn integer_div(self, other: Self) -> Self {
        (self.to_arbitrary_integer() / other.to_arbitrary_integer()).into()
    }

    /// Remainder of the canonical representatives.
    ///
    /// Panics if `other` is zero.
    fn integer_mod(self, other: Self) -> Self {
        (self.to_arbitrary_integer() % other.to_arbitrary_integer()).into()
    }

    /// `2^exponent` reduced into the field.
    fn two_pow(exponent: usize) -> Self {
        (AbstractNumberType::one() << exponent).into()
    }

    /// Compares the signed interpretations of two elements.
    fn signed_cmp(&self, other: &Self) -> Ordering {
        match (self.is_negative(), other.is_negative()) {
            (false, true) => Ordering::Greater,
            (true, false) => Ordering::Less,
            _ => self.to_integer().cmp(&other.to_integer()),
        }
    }

    fn to_signed_integer(&self) -> SignedNumberType {
        if self.is_negative() {
            -SignedNumberType::from((-*self).to_arbitrary_integer())
        } else {
            SignedNumberType::from(self.to_arbitrary_integer())
        }
    }

    /// Maps an arbitrary signed integer into the field.
    fn from_signed_integer(value: &SignedNumberType) -> Self {
        let magnitude = Self::from(value.magnitude().clone());
        if value.sign() == num_bigint::Sign::Minus {
            -magnitude
        } else {
            magnitude
        }
    }

    fn try_into_u64(&self) -> Option<u64> {
        self.to_integer().try_into_u64()
    }
}
