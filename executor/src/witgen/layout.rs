use rsa_witgen_bigint::log_ceil;

use super::components::carry::EPSILON;
use super::error::LayoutError;

/// Largest bit width the carry checker may range check in the BN254 scalar field.
pub const MAX_RANGE_CHECK_BITS: usize = 253;

/// How big integers are split into limbs: `limb_count` limbs of `limb_bits` bits each.
///
/// Every multiplication produces residual coefficients of up to
/// `2 * limb_bits + log_ceil(limb_count) + 2` bits, which have to stay range-checkable
/// inside the field. The default layout, 32 limbs of 121 bits, is the widest one with
/// 32 limbs and holds moduli of up to 3872 bits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LimbLayout {
    limb_bits: usize,
    limb_count: usize,
}

impl Default for LimbLayout {
    fn default() -> Self {
        Self {
            limb_bits: 121,
            limb_count: 32,
        }
    }
}

impl LimbLayout {
    pub fn new(limb_bits: usize, limb_count: usize) -> Result<Self, LayoutError> {
        if limb_count < 2 {
            return Err(LayoutError::TooFewLimbs(limb_count));
        }
        if limb_bits == 0 {
            return Err(LayoutError::EmptyLimbs);
        }
        let layout = Self {
            limb_bits,
            limb_count,
        };
        let required = layout.carry_bits() + EPSILON;
        if required > MAX_RANGE_CHECK_BITS {
            return Err(LayoutError::FieldOverflow {
                limb_bits,
                limb_count,
                required,
                available: MAX_RANGE_CHECK_BITS,
            });
        }
        Ok(layout)
    }

    pub fn limb_bits(&self) -> usize {
        self.limb_bits
    }

    pub fn limb_count(&self) -> usize {
        self.limb_count
    }

    pub fn total_bits(&self) -> usize {
        self.limb_bits * self.limb_count
    }

    /// Bit bound of the coefficients of `a * b - q * p - r` before carrying.
    pub fn carry_bits(&self) -> usize {
        2 * self.limb_bits + log_ceil(self.limb_count) + 2
    }
}
