use rsa_witgen_number::FieldElement;

use super::fp_mul::{FpMul, FpMulWitness};
use crate::witgen::{ConstraintError, LimbLayout, Signals, Template, WitgenContext};

/// The RSA public exponent `2^16 + 1`.
pub const PUBLIC_EXPONENT: u32 = 65537;

/// Number of squarings before the final multiplication by the base.
pub const SQUARINGS: usize = PUBLIC_EXPONENT.ilog2() as usize;

/// `base^65537 mod modulus`: sixteen squarings followed by one multiplication
/// with the base.
#[derive(Clone, Debug)]
pub struct FpPow65537Mod<T> {
    mul: FpMul<T>,
    layout: LimbLayout,
}

impl<T: FieldElement> FpPow65537Mod<T> {
    pub fn new(layout: LimbLayout) -> Self {
        Self {
            mul: FpMul::new(layout),
            layout,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FpPowWitness<T> {
    pub out: Vec<T>,
    pub base: Vec<T>,
    pub modulus: Vec<T>,
    /// `doublers[i]` outputs `base^(2^(i + 1))`.
    pub doublers: Vec<FpMulWitness<T>>,
    pub adder: FpMulWitness<T>,
}

impl<T: FieldElement> Signals<T> for FpPowWitness<T> {
    fn collect_signals(&self, out: &mut Vec<T>) {
        out.extend_from_slice(&self.out);
        out.extend_from_slice(&self.base);
        out.extend_from_slice(&self.modulus);
        self.doublers.collect_signals(out);
        self.adder.collect_signals(out);
    }
}

impl<T: FieldElement> Template<T> for FpPow65537Mod<T> {
    /// `(base, modulus)`
    type Input = (Vec<T>, Vec<T>);
    type Witness = FpPowWitness<T>;

    fn name(&self) -> String {
        format!(
            "FpPow65537Mod({}, {})",
            self.layout.limb_bits(),
            self.layout.limb_count()
        )
    }

    fn run(
        &self,
        ctx: &mut WitgenContext,
        (base, modulus): (Vec<T>, Vec<T>),
    ) -> Result<FpPowWitness<T>, ConstraintError> {
        let mut doublers: Vec<FpMulWitness<T>> = Vec::with_capacity(SQUARINGS);
        for i in 0..SQUARINGS {
            let square = doublers.last().map_or(&base, |d| &d.out).clone();
            let input = (square.clone(), square, modulus.clone());
            doublers.push(ctx.run(format!("doublers[{i}]"), &self.mul, input)?);
        }
        let power = doublers.last().map_or(&base, |d| &d.out).clone();
        let adder = ctx.run("adder", &self.mul, (power, base.clone(), modulus.clone()))?;
        log::trace!("Computed base^{PUBLIC_EXPONENT} at {}", ctx.path());

        Ok(FpPowWitness {
            out: adder.out.clone(),
            base,
            modulus,
            doublers,
            adder,
        })
    }
}
