//! The circuit templates, from bit decomposition up to the signature check.

pub mod bits;
pub mod carry;
pub mod compare;
pub mod fp_mul;
pub mod fp_pow;
pub mod gates;
pub mod rsa_pad;
pub mod rsa_verify;
