use itertools::Itertools;
use rsa_witgen_number::FieldElement;

use super::bits::{Bits2Num, Bits2NumWitness, Num2Bits, Num2BitsWitness};
use super::gates::{IsZero, IsZeroWitness};
use crate::witgen::{ConstraintError, LayoutError, LimbLayout, Signals, Template, WitgenContext};

/// Width of a SHA-256 digest.
pub const DIGEST_BITS: usize = 256;

/// DER encoding of the SHA-256 `DigestInfo` header that precedes the digest.
pub const DIGEST_INFO: [u8; 19] = [
    0x30, 0x31, 0x30, 0x0d, 0x06, 0x09, 0x60, 0x86, 0x48, 0x01, 0x65, 0x03, 0x04, 0x02, 0x01,
    0x05, 0x00, 0x04, 0x20,
];

/// End of the `DigestInfo` header, where the zero separator byte starts.
pub const PREFIX_END: usize = DIGEST_BITS + 8 * DIGEST_INFO.len();

/// End of the zero separator byte, where the `0xff` run starts.
pub const SEPARATOR_END: usize = PREFIX_END + 8;

/// PKCS#1 v1.5 asks for at least eight `0xff` octets. Together with the low bit of the
/// `0x01` byte that makes 65 one-bits right above the separator.
pub const MIN_PADDING_ONES: usize = 65;

/// Smallest limb layout that can hold the padding.
pub const MIN_MODULUS_BITS: usize = SEPARATOR_END + MIN_PADDING_ONES;

/// Bit `index` of the big-endian `DigestInfo` header.
fn digest_info_bit(index: usize) -> bool {
    let byte = DIGEST_INFO[DIGEST_INFO.len() - 1 - index / 8];
    (byte >> (index % 8)) & 1 == 1
}

/// Builds the PKCS#1 v1.5 encoded message `00 01 ff .. ff 00 DigestInfo digest` for a
/// SHA-256 digest, sized to the byte length of the modulus.
///
/// The length of the `0xff` run is derived from the modulus bits: a byte of the run is
/// `0xff` as long as some modulus bit lies at least one byte above it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RsaPad {
    layout: LimbLayout,
}

impl RsaPad {
    pub fn new(layout: LimbLayout) -> Result<Self, LayoutError> {
        if layout.total_bits() < MIN_MODULUS_BITS {
            return Err(LayoutError::TooSmallForPadding {
                total_bits: layout.total_bits(),
                required: MIN_MODULUS_BITS,
            });
        }
        Ok(Self { layout })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RsaPadWitness<T> {
    pub padded_message: Vec<T>,
    pub modulus: Vec<T>,
    pub base_message: Vec<T>,
    pub padded_message_bits: Vec<T>,
    pub modulus_bits: Vec<T>,
    pub base_message_bits: Vec<T>,
    pub base_message_n2b: Vec<Num2BitsWitness<T>>,
    pub modulus_n2b: Vec<Num2BitsWitness<T>>,
    /// One per byte of the `0xff` run candidates, lowest byte first.
    pub modulus_zero: Vec<IsZeroWitness<T>>,
    pub padded_message_b2n: Vec<Bits2NumWitness<T>>,
}

impl<T: FieldElement> Signals<T> for RsaPadWitness<T> {
    fn collect_signals(&self, out: &mut Vec<T>) {
        for signals in [
            &self.padded_message,
            &self.modulus,
            &self.base_message,
            &self.padded_message_bits,
            &self.modulus_bits,
            &self.base_message_bits,
        ] {
            out.extend_from_slice(signals);
        }
        self.base_message_n2b.collect_signals(out);
        self.modulus_n2b.collect_signals(out);
        self.modulus_zero.collect_signals(out);
        self.padded_message_b2n.collect_signals(out);
    }
}

impl<T: FieldElement> Template<T> for RsaPad {
    /// `(modulus, base_message)`
    type Input = (Vec<T>, Vec<T>);
    type Witness = RsaPadWitness<T>;

    fn name(&self) -> String {
        format!(
            "RSAPad({}, {})",
            self.layout.limb_bits(),
            self.layout.limb_count()
        )
    }

    fn run(
        &self,
        ctx: &mut WitgenContext,
        (modulus, base_message): (Vec<T>, Vec<T>),
    ) -> Result<RsaPadWitness<T>, ConstraintError> {
        let (n, k) = (self.layout.limb_bits(), self.layout.limb_count());
        let total = n * k;
        assert!(modulus.len() == k && base_message.len() == k);

        let n2b = Num2Bits::new(n);
        let mut base_message_n2b = Vec::with_capacity(k);
        let mut modulus_n2b = Vec::with_capacity(k);
        for i in 0..k {
            base_message_n2b.push(ctx.run(
                format!("base_message_n2b[{i}]"),
                &n2b,
                base_message[i],
            )?);
            modulus_n2b.push(ctx.run(format!("modulus_n2b[{i}]"), &n2b, modulus[i])?);
        }
        let base_message_bits = base_message_n2b
            .iter()
            .flat_map(|w| w.out.iter().copied())
            .collect_vec();
        let modulus_bits = modulus_n2b
            .iter()
            .flat_map(|w| w.out.iter().copied())
            .collect_vec();

        for &bit in &base_message_bits[DIGEST_BITS..] {
            ctx.assert_zero(bit, "digest has no bits above 256")?;
        }

        let mut padded = vec![T::zero(); total];
        padded[..DIGEST_BITS].copy_from_slice(&base_message_bits[..DIGEST_BITS]);
        for (i, bit) in padded[DIGEST_BITS..PREFIX_END].iter_mut().enumerate() {
            *bit = T::from(digest_info_bit(i));
        }

        // Walk down from the top. The topmost byte stays zero, every byte-aligned bit
        // below it is set iff some modulus bit lies a byte or more above it, and the
        // other bits of a byte copy the aligned bit one position above them.
        let mut modulus_zero = vec![];
        let mut modulus_prefix = T::zero();
        for i in (SEPARATOR_END..total.saturating_sub(8)).rev() {
            modulus_prefix += modulus_bits[i + 8];
            if i % 8 == 0 {
                let index = (i - SEPARATOR_END) / 8;
                let zero = ctx.run(format!("modulus_zero[{index}]"), &IsZero, modulus_prefix)?;
                padded[i] = T::one() - zero.out;
                modulus_zero.push(zero);
            } else {
                padded[i] = padded[i + 1];
            }
        }
        modulus_zero.reverse();

        for &bit in &padded[SEPARATOR_END..MIN_MODULUS_BITS] {
            ctx.assert_eq(bit, T::one(), "padding has at least 65 one-bits")?;
        }

        let b2n = Bits2Num::new(n);
        let padded_message_b2n = padded
            .chunks(n)
            .enumerate()
            .map(|(i, bits)| ctx.run(format!("padded_message_b2n[{i}]"), &b2n, bits.to_vec()))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(RsaPadWitness {
            padded_message: padded_message_b2n.iter().map(|w| w.out).collect(),
            modulus,
            base_message,
            padded_message_bits: padded,
            modulus_bits,
            base_message_bits,
            base_message_n2b,
            modulus_n2b,
            modulus_zero,
            padded_message_b2n,
        })
    }
}
