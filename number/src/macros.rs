/// Forwards a binary operator and its assigning form to the wrapped ark field.
macro_rules! forward_binary_op {
    ($name:ident, $trait:ident, $method:ident, $assign_trait:ident, $assign_method:ident) => {
        impl std::ops::$trait for $name {
            type Output = $name;

            fn $method(self, rhs: Self) -> Self {
                std::ops::$trait::$method(self.value, rhs.value).into()
            }
        }

        impl std::ops::$assign_trait for $name {
            fn $assign_method(&mut self, rhs: Self) {
                std::ops::$assign_trait::$assign_method(&mut self.value, rhs.value);
            }
        }
    };
}

/// Conversions from primitive integers, going through the ark field's own.
macro_rules! from_primitive {
    ($name:ident, $ark_type:ty, $($primitive:ty),+) => {
        $(
            impl From<$primitive> for $name {
                fn from(n: $primitive) -> Self {
                    <$ark_type>::from(n).into()
                }
            }
        )+
    };
}

/// Implements [`crate::FieldElement`] and its integer type for an ark prime field.
macro_rules! prime_field {
    ($name:ident, $ark_type:ty) => {
        use crate::traits::{FieldElement, LargeInt};
        use ark_ff::{BigInteger, Field, PrimeField};
        use num_bigint::BigUint;
        use num_traits::{One, Zero};
        use std::fmt;

        type ArkInt = <$ark_type as PrimeField>::BigInt;

        #[derive(Clone, Copy, PartialEq, Eq, Debug, Default, PartialOrd, Ord, Hash)]
        pub struct $name {
            value: $ark_type,
        }

        /// The canonical representative of a field element.
        #[derive(Clone, Copy, PartialEq, Eq, Debug, Default, PartialOrd, Ord, Hash)]
        pub struct LargeIntImpl(ArkInt);

        impl fmt::Display for LargeIntImpl {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }

        impl fmt::LowerHex for LargeIntImpl {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::LowerHex::fmt(&self.to_arbitrary_integer(), f)
            }
        }

        impl From<u32> for LargeIntImpl {
            fn from(v: u32) -> Self {
                LargeIntImpl(v.into())
            }
        }

        impl From<u64> for LargeIntImpl {
            fn from(v: u64) -> Self {
                LargeIntImpl(v.into())
            }
        }

        impl std::ops::Shr<usize> for LargeIntImpl {
            type Output = Self;

            fn shr(mut self, bits: usize) -> Self {
                // Shifting by the full width or more clears the value.
                match u32::try_from(bits) {
                    Ok(bits) => self.0.divn(bits),
                    Err(_) => self.0 = ArkInt::from(0u64),
                }
                self
            }
        }

        impl std::ops::BitAnd for LargeIntImpl {
            type Output = Self;

            fn bitand(mut self, other: Self) -> Self {
                let words = self.0.as_mut().iter_mut().zip(other.0.as_ref());
                words.for_each(|(x, y)| *x &= y);
                self
            }
        }

        impl LargeInt for LargeIntImpl {
            fn num_bits(&self) -> usize {
                self.0.num_bits() as usize
            }

            fn bit(&self, index: usize) -> bool {
                self.0.get_bit(index)
            }

            fn is_zero(&self) -> bool {
                self.0.as_ref().iter().all(|word| *word == 0)
            }

            fn to_arbitrary_integer(self) -> BigUint {
                self.0.into()
            }

            fn try_into_u64(&self) -> Option<u64> {
                match self.0.as_ref() {
                    [low, high @ ..] if high.iter().all(|word| *word == 0) => Some(*low),
                    _ => None,
                }
            }
        }

        impl From<$ark_type> for $name {
            fn from(value: $ark_type) -> Self {
                Self { value }
            }
        }

        impl From<BigUint> for $name {
            fn from(n: BigUint) -> Self {
                <$ark_type>::from(n).into()
            }
        }

        impl From<LargeIntImpl> for $name {
            /// Values at or above the modulus are reduced.
            fn from(n: LargeIntImpl) -> Self {
                <$ark_type>::from_bigint(n.0)
                    .unwrap_or_else(|| <$ark_type>::from_le_bytes_mod_order(&n.0.to_bytes_le()))
                    .into()
            }
        }

        from_primitive!($name, $ark_type, u32, u64, i32, i64, bool);

        forward_binary_op!($name, Add, add, AddAssign, add_assign);
        forward_binary_op!($name, Sub, sub, SubAssign, sub_assign);
        forward_binary_op!($name, Mul, mul, MulAssign, mul_assign);

        impl std::ops::Div for $name {
            type Output = $name;

            /// Multiplication by the inverse. Panics on division by zero.
            fn div(self, rhs: Self) -> Self {
                (self.value / rhs.value).into()
            }
        }

        impl std::ops::Neg for $name {
            type Output = $name;

            fn neg(self) -> Self {
                (-self.value).into()
            }
        }

        impl Zero for $name {
            fn zero() -> Self {
                <$ark_type>::zero().into()
            }

            fn is_zero(&self) -> bool {
                self.value.is_zero()
            }
        }

        impl One for $name {
            fn one() -> Self {
                <$ark_type>::one().into()
            }
        }

        impl std::iter::Sum for $name {
            fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
                iter.fold(Self::zero(), |acc, x| acc + x)
            }
        }

        impl std::iter::Product for $name {
            fn product<I: Iterator<Item = Self>>(iter: I) -> Self {
                iter.fold(Self::one(), |acc, x| acc * x)
            }
        }

        impl FieldElement for $name {
            type Integer = LargeIntImpl;

            const BITS: usize = <$ark_type as PrimeField>::MODULUS_BIT_SIZE as usize;

            fn to_integer(&self) -> LargeIntImpl {
                LargeIntImpl(self.value.into_bigint())
            }

            fn modulus() -> LargeIntImpl {
                LargeIntImpl(<$ark_type>::MODULUS)
            }

            fn pow(self, exponent: LargeIntImpl) -> Self {
                self.value.pow(exponent.0).into()
            }

            fn inverse(self) -> Option<Self> {
                self.value.inverse().map(Self::from)
            }

            fn is_negative(&self) -> bool {
                self.value.into_bigint() > <$ark_type>::MODULUS_MINUS_ONE_DIV_TWO
            }
        }

        /// Prints the signed representative, so `p - 1` shows as `-1`.
        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                if self.is_negative() {
                    write!(f, "-{}", (-*self).to_integer())
                } else {
                    write!(f, "{}", self.to_integer())
                }
            }
        }

        impl fmt::LowerHex for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::LowerHex::fmt(&self.to_integer(), f)
            }
        }
    };
}
