use std::collections::BTreeMap;

use num_bigint::BigUint;
use rsa_witgen_bigint::biguint_to_limbs;
use rsa_witgen_number::FieldElement;

use super::error::WitgenError;
use super::layout::LimbLayout;

pub const SIGNATURE: &str = "signature";
pub const MODULUS: &str = "modulus";
pub const BASE_MESSAGE: &str = "base_message";

/// Names of the input signals in the order the witness lists them.
pub const INPUT_SIGNALS: [&str; 3] = [SIGNATURE, MODULUS, BASE_MESSAGE];

/// The three limb arrays a signature check consumes. `base_message` holds the
/// SHA-256 digest of the signed message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RsaVerifyInputs<T> {
    pub signature: Vec<T>,
    pub modulus: Vec<T>,
    pub base_message: Vec<T>,
}

impl<T: FieldElement> RsaVerifyInputs<T> {
    pub fn from_integers(
        layout: LimbLayout,
        signature: &BigUint,
        modulus: &BigUint,
        digest: &BigUint,
    ) -> Result<Self, WitgenError> {
        let split = |signal: &'static str, value: &BigUint| {
            biguint_to_limbs(value, layout.limb_bits(), layout.limb_count())
                .map_err(|source| WitgenError::InputOverflow { signal, source })
        };
        Ok(Self {
            signature: split(SIGNATURE, signature)?,
            modulus: split(MODULUS, modulus)?,
            base_message: split(BASE_MESSAGE, digest)?,
        })
    }

    /// Reads big-endian byte strings, as found in DER encoded keys and raw signatures.
    pub fn from_be_bytes(
        layout: LimbLayout,
        signature: &[u8],
        modulus: &[u8],
        digest: &[u8],
    ) -> Result<Self, WitgenError> {
        Self::from_integers(
            layout,
            &BigUint::from_bytes_be(signature),
            &BigUint::from_bytes_be(modulus),
            &BigUint::from_bytes_be(digest),
        )
    }

    /// Takes the limb arrays from a map keyed by input signal name.
    /// Unknown names are ignored.
    pub fn from_signal_map(signals: &BTreeMap<String, Vec<T>>) -> Result<Self, WitgenError> {
        let get = |name: &str| {
            signals
                .get(name)
                .cloned()
                .ok_or_else(|| WitgenError::MissingInput(name.to_string()))
        };
        Ok(Self {
            signature: get(SIGNATURE)?,
            modulus: get(MODULUS)?,
            base_message: get(BASE_MESSAGE)?,
        })
    }

    pub fn to_signal_map(&self) -> BTreeMap<String, Vec<T>> {
        self.named_arrays()
            .into_iter()
            .map(|(name, limbs)| (name.to_string(), limbs.to_vec()))
            .collect()
    }

    fn named_arrays(&self) -> [(&'static str, &[T]); 3] {
        [
            (SIGNATURE, self.signature.as_slice()),
            (MODULUS, self.modulus.as_slice()),
            (BASE_MESSAGE, self.base_message.as_slice()),
        ]
    }

    /// Number of input signals for `layout`, without the constant one.
    pub fn signal_count(layout: LimbLayout) -> usize {
        INPUT_SIGNALS.len() * layout.limb_count()
    }

    /// Checks that every array has one limb per limb of the layout.
    pub fn check_shape(&self, layout: LimbLayout) -> Result<(), WitgenError> {
        let expected = layout.limb_count();
        for (signal, limbs) in self.named_arrays() {
            if limbs.len() != expected {
                return Err(WitgenError::InputLength {
                    signal,
                    expected,
                    actual: limbs.len(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;
    use rsa_witgen_bigint::BigIntError;
    use rsa_witgen_number::Bn254Field;
    use test_log::test;

    type F = Bn254Field;

    #[test]
    fn bytes_and_integers_agree() {
        let layout = LimbLayout::new(64, 4).unwrap();
        let from_bytes =
            RsaVerifyInputs::<F>::from_be_bytes(layout, &[1, 2, 3], &[0xff; 32], &[7]).unwrap();
        let from_integers = RsaVerifyInputs::from_integers(
            layout,
            &BigUint::from(0x010203u32),
            &((BigUint::from(1u32) << 256u32) - 1u32),
            &BigUint::from(7u32),
        )
        .unwrap();
        assert_eq!(from_bytes, from_integers);
        assert_eq!(from_bytes.signature[0], F::from(0x010203u32));
        assert_eq!(from_bytes.modulus, vec![F::from(u64::MAX); 4]);
        assert_eq!(RsaVerifyInputs::<F>::signal_count(layout), 12);
    }

    #[test]
    fn oversized_input() {
        let layout = LimbLayout::new(64, 4).unwrap();
        let error = RsaVerifyInputs::<F>::from_be_bytes(layout, &[1; 33], &[1], &[1]).unwrap_err();
        assert_eq!(
            error,
            WitgenError::InputOverflow {
                signal: SIGNATURE,
                source: BigIntError::Overflow {
                    bits: 257,
                    limb_bits: 64,
                    limb_count: 4
                }
            }
        );
    }

    #[test]
    fn signal_map() {
        let layout = LimbLayout::new(64, 2).unwrap();
        let inputs = RsaVerifyInputs::<F>::from_be_bytes(layout, &[1], &[2], &[3]).unwrap();
        let mut map = inputs.to_signal_map();
        assert_eq!(map.keys().collect::<Vec<_>>(), ["base_message", "modulus", "signature"]);
        assert_eq!(RsaVerifyInputs::from_signal_map(&map), Ok(inputs));

        map.remove(MODULUS);
        assert_eq!(
            RsaVerifyInputs::from_signal_map(&map),
            Err(WitgenError::MissingInput("modulus".to_string()))
        );
    }

    #[test]
    fn shape() {
        let layout = LimbLayout::new(64, 2).unwrap();
        let mut inputs = RsaVerifyInputs::<F>::from_be_bytes(layout, &[1], &[2], &[3]).unwrap();
        assert_eq!(inputs.check_shape(layout), Ok(()));
        inputs.base_message.push(F::from(0u32));
        assert_eq!(
            inputs.check_shape(layout),
            Err(WitgenError::InputLength {
                signal: BASE_MESSAGE,
                expected: 2,
                actual: 3
            })
        );
    }
}
