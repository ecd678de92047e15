//! Prime field elements with the integer semantics of arithmetic circuits.

#[macro_use]
mod macros;
mod bn254;
mod traits;

pub use bn254::Bn254Field;
pub use traits::{FieldElement, LargeInt};

/// An arbitrary precision big integer, to be used as a last recourse
pub type AbstractNumberType = num_bigint::BigUint;

/// The signed counterpart of [`AbstractNumberType`].
pub type SignedNumberType = num_bigint::BigInt;
