pub use rsa_witgen_bigint as bigint;
pub use rsa_witgen_executor as executor;
pub use rsa_witgen_number as number;

pub use rsa_witgen_executor::witgen::{
    LimbLayout, RsaVerifyInputs, RsaWitness, RsaWitnessGenerator, WitgenError,
};

pub use rsa_witgen_number::Bn254Field;
pub use rsa_witgen_number::FieldElement;

use num_bigint::BigUint;

/// Generates the BN254 witness for checking `signature` against `modulus` and the
/// SHA-256 `digest` of the signed message, all given as big-endian bytes, using the
/// default limb layout.
pub fn generate_witness(
    signature: &[u8],
    modulus: &[u8],
    digest: &[u8],
) -> Result<RsaWitness<Bn254Field>, WitgenError> {
    let layout = LimbLayout::default();
    log::debug!(
        "Checking a {}-bit signature",
        BigUint::from_bytes_be(modulus).bits()
    );
    let inputs = RsaVerifyInputs::from_be_bytes(layout, signature, modulus, digest)?;
    RsaWitnessGenerator::new(layout).generate(&inputs)
}
