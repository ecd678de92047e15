use itertools::Itertools;
use rsa_witgen_number::FieldElement;

use super::bits::{Num2Bits, Num2BitsWitness};
use super::compare::{BigLessThan, BigLessThanWitness};
use super::fp_pow::{FpPow65537Mod, FpPowWitness};
use super::rsa_pad::{RsaPad, RsaPadWitness};
use crate::witgen::{
    LayoutError, LimbLayout, RsaVerifyInputs, Signals, WitgenContext, WitgenError,
};

/// Checks an RSA signature with public exponent 65537 over a SHA-256 digest:
/// `signature < modulus` and `signature^65537 mod modulus` equals the PKCS#1 v1.5
/// encoding of the digest.
#[derive(Clone, Debug)]
pub struct RsaVerify65537<T> {
    layout: LimbLayout,
    padder: RsaPad,
    less_than: BigLessThan,
    pow: FpPow65537Mod<T>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RsaVerifyWitness<T> {
    pub signature: Vec<T>,
    pub modulus: Vec<T>,
    pub base_message: Vec<T>,
    pub padder: RsaPadWitness<T>,
    pub signature_range_check: Vec<Num2BitsWitness<T>>,
    pub big_less_than: BigLessThanWitness<T>,
    pub big_pow: FpPowWitness<T>,
}

impl<T: FieldElement> Signals<T> for RsaVerifyWitness<T> {
    fn collect_signals(&self, out: &mut Vec<T>) {
        out.extend_from_slice(&self.signature);
        out.extend_from_slice(&self.modulus);
        out.extend_from_slice(&self.base_message);
        self.padder.collect_signals(out);
        self.signature_range_check.collect_signals(out);
        self.big_less_than.collect_signals(out);
        self.big_pow.collect_signals(out);
    }
}

impl<T: FieldElement> RsaVerify65537<T> {
    pub fn new(layout: LimbLayout) -> Result<Self, LayoutError> {
        Ok(Self {
            layout,
            padder: RsaPad::new(layout)?,
            less_than: BigLessThan::new(layout),
            pow: FpPow65537Mod::new(layout),
        })
    }

    pub fn name(&self) -> String {
        format!(
            "RSAVerify65537({}, {})",
            self.layout.limb_bits(),
            self.layout.limb_count()
        )
    }

    /// Computes all signals of the check, with `ctx` positioned at the verifier
    /// instance. The first failing assertion aborts the run and is classified by
    /// the step it belongs to.
    pub fn generate(
        &self,
        ctx: &mut WitgenContext,
        inputs: RsaVerifyInputs<T>,
    ) -> Result<RsaVerifyWitness<T>, WitgenError> {
        inputs.check_shape(self.layout)?;
        let RsaVerifyInputs {
            signature,
            modulus,
            base_message,
        } = inputs;

        let padder = ctx
            .run("padder", &self.padder, (modulus.clone(), base_message.clone()))
            .map_err(WitgenError::MalformedInput)?;

        let n2b = Num2Bits::new(self.layout.limb_bits());
        let signature_range_check = signature
            .iter()
            .enumerate()
            .map(|(i, &limb)| ctx.run(format!("signature_range_check[{i}]"), &n2b, limb))
            .collect::<Result<Vec<_>, _>>()
            .map_err(WitgenError::MalformedInput)?;

        let big_less_than = ctx
            .run(
                "big_less_than",
                &self.less_than,
                (signature.clone(), modulus.clone()),
            )
            .map_err(WitgenError::Internal)?;
        ctx.assert_eq(big_less_than.out, T::one(), "signature is below the modulus")
            .map_err(WitgenError::InvalidSignature)?;

        let big_pow = ctx
            .run("big_pow", &self.pow, (signature.clone(), modulus.clone()))
            .map_err(WitgenError::Internal)?;
        for (&limb, &expected) in big_pow.out.iter().zip_eq(&padder.padded_message) {
            ctx.assert_eq(limb, expected, "signature decrypts to the padded message")
                .map_err(WitgenError::InvalidSignature)?;
        }

        Ok(RsaVerifyWitness {
            signature,
            modulus,
            base_message,
            padder,
            signature_range_check,
            big_less_than,
            big_pow,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::witgen::{ConstraintError, FailureKind};
    use num_bigint::BigUint;
    use pretty_assertions::assert_eq;
    use rsa_witgen_number::Bn254Field;
    use test_log::test;

    type F = Bn254Field;

    /// A 512-bit prime modulus and the signature of SHA-256("hello world") under it.
    const MODULUS: &str = "992a2829c5e5064184c46f726fbb28f307ffe38e69b52fc2c9ff909007ee64fe\
                           bee33d4a9e47539449a35964d9f3dd4579e08f8680f4edd89a1d3876f6c8a64b";
    const SIGNATURE: &str = "95da32503986ced634f0b371a80a087a93c02138541265c996f64c4a73f42753\
                             6c43bd2efbcd8fdfda0a32de7944d4e4fd281835e664dddf6782f0c92fb58a37";
    const DIGEST: &str = "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9";

    fn hex(s: &str) -> BigUint {
        BigUint::parse_bytes(s.as_bytes(), 16).unwrap()
    }

    fn layout() -> LimbLayout {
        LimbLayout::new(64, 8).unwrap()
    }

    fn verify(
        signature: &BigUint,
        modulus: &BigUint,
        digest: &BigUint,
    ) -> Result<RsaVerifyWitness<F>, WitgenError> {
        let inputs = RsaVerifyInputs::from_integers(layout(), signature, modulus, digest)?;
        RsaVerify65537::new(layout())?.generate(&mut WitgenContext::new("main"), inputs)
    }

    #[test]
    fn accepts_valid_signature() {
        let witness = verify(&hex(SIGNATURE), &hex(MODULUS), &hex(DIGEST)).unwrap();
        assert_eq!(witness.big_less_than.out, F::from(1u32));
        assert_eq!(witness.big_pow.out, witness.padder.padded_message);
        assert_eq!(witness.to_signals()[..8], witness.signature[..]);
    }

    #[test]
    fn rejects_other_digest() {
        let digest = hex(DIGEST) - 1u32;
        let error = verify(&hex(SIGNATURE), &hex(MODULUS), &digest).unwrap_err();
        let WitgenError::InvalidSignature(error) = error else {
            panic!("unexpected error {error}");
        };
        assert_eq!(error.path, "main");
        assert!(matches!(
            error.kind,
            FailureKind::NotEqual {
                description: "signature decrypts to the padded message",
                ..
            }
        ));
    }

    #[test]
    fn rejects_unreduced_signature() {
        let modulus = hex(MODULUS);
        let signature = &modulus + hex(SIGNATURE);
        // Too wide for the layout.
        assert!(matches!(
            verify(&signature, &modulus, &hex(DIGEST)),
            Err(WitgenError::InputOverflow {
                signal: "signature",
                ..
            })
        ));
        let error = verify(&modulus, &modulus, &hex(DIGEST)).unwrap_err();
        assert!(matches!(
            error,
            WitgenError::InvalidSignature(ConstraintError {
                kind: FailureKind::NotEqual {
                    description: "signature is below the modulus",
                    ..
                },
                ..
            })
        ));
    }

    #[test]
    fn classifies_malformed_inputs() {
        let mut inputs =
            RsaVerifyInputs::from_integers(layout(), &hex(SIGNATURE), &hex(MODULUS), &hex(DIGEST))
                .unwrap();
        inputs.signature[3] = F::from(BigUint::from(1u32) << 64u32);
        let verifier = RsaVerify65537::new(layout()).unwrap();
        let error = verifier
            .generate(&mut WitgenContext::new("main"), inputs.clone())
            .unwrap_err();
        let WitgenError::MalformedInput(error) = error else {
            panic!("unexpected error {error}");
        };
        assert_eq!(error.path, "main.signature_range_check[3]");

        inputs.modulus.pop();
        assert_eq!(
            verifier.generate(&mut WitgenContext::new("main"), inputs),
            Err(WitgenError::InputLength {
                signal: "modulus",
                expected: 8,
                actual: 7
            })
        );
    }

    #[test]
    fn digest_wider_than_sha256() {
        let digest = hex(DIGEST) << 8u32;
        assert!(matches!(
            verify(&hex(SIGNATURE), &hex(MODULUS), &digest),
            Err(WitgenError::MalformedInput(_))
        ));
    }
}
