use itertools::Itertools;
use rsa_witgen_number::FieldElement;

use crate::witgen::{ConstraintError, Signals, Template, WitgenContext};

/// Decomposes a value into `bits` little-endian bits and checks that they
/// reconstruct it, which fails for values that do not fit into `bits` bits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Num2Bits {
    pub bits: usize,
}

impl Num2Bits {
    pub fn new(bits: usize) -> Self {
        Self { bits }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Num2BitsWitness<T> {
    pub out: Vec<T>,
    pub input: T,
}

impl<T: FieldElement> Signals<T> for Num2BitsWitness<T> {
    fn collect_signals(&self, out: &mut Vec<T>) {
        out.extend_from_slice(&self.out);
        out.push(self.input);
    }
}

impl<T: FieldElement> Template<T> for Num2Bits {
    type Input = T;
    type Witness = Num2BitsWitness<T>;

    fn name(&self) -> String {
        format!("Num2Bits({})", self.bits)
    }

    fn run(
        &self,
        ctx: &mut WitgenContext,
        input: T,
    ) -> Result<Num2BitsWitness<T>, ConstraintError> {
        let value = input.to_integer();
        let one = T::Integer::from(1u32);
        let out = (0..self.bits)
            .map(|i| T::from((value >> i) & one))
            .collect_vec();

        let mut sum = T::zero();
        let mut e2 = T::one();
        for &bit in &out {
            ctx.assert_zero(bit * (bit - T::one()), "bit is boolean")?;
            sum += bit * e2;
            e2 += e2;
        }
        ctx.assert_eq(sum, input, "bits add up to the input")?;
        Ok(Num2BitsWitness { out, input })
    }
}

/// Packs `bits` little-endian bits into one value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bits2Num {
    pub bits: usize,
}

impl Bits2Num {
    pub fn new(bits: usize) -> Self {
        Self { bits }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bits2NumWitness<T> {
    pub out: T,
    pub input: Vec<T>,
}

impl<T: FieldElement> Signals<T> for Bits2NumWitness<T> {
    fn collect_signals(&self, out: &mut Vec<T>) {
        out.push(self.out);
        out.extend_from_slice(&self.input);
    }
}

impl<T: FieldElement> Template<T> for Bits2Num {
    type Input = Vec<T>;
    type Witness = Bits2NumWitness<T>;

    fn name(&self) -> String {
        format!("Bits2Num({})", self.bits)
    }

    fn run(
        &self,
        _ctx: &mut WitgenContext,
        input: Vec<T>,
    ) -> Result<Bits2NumWitness<T>, ConstraintError> {
        assert_eq!(input.len(), self.bits);
        let mut out = T::zero();
        let mut e2 = T::one();
        for &bit in &input {
            out += bit * e2;
            e2 += e2;
        }
        Ok(Bits2NumWitness { out, input })
    }
}
