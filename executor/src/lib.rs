//! Witness generation for RSA signature verification circuits.

pub mod witgen;
