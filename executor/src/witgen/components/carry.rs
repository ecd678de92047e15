use rsa_witgen_number::FieldElement;

use super::bits::{Num2Bits, Num2BitsWitness};
use crate::witgen::{ConstraintError, Signals, Template, WitgenContext};

/// Slack bits added to the carry range checks.
pub const EPSILON: usize = 3;

/// Checks that a register array with signed entries below `2^m` in magnitude,
/// read in base `2^n`, is exactly zero as an integer.
///
/// The carries `carry[i] = (in[i] + carry[i - 1]) / 2^n` must be exact, and each one
/// is range checked after adding the bias `2^(m + EPSILON - n - 1)`. The last register
/// has to cancel the final carry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CheckCarryToZero {
    n: usize,
    m: usize,
    k: usize,
}

impl CheckCarryToZero {
    /// Panics if `m + EPSILON > 253` or `k < 2`.
    pub fn new(n: usize, m: usize, k: usize) -> Self {
        assert!(m + EPSILON <= 253, "carries of {m} bits are too wide");
        assert!(k >= 2, "at least two registers are required");
        Self { n, m, k }
    }

    fn range_bits(&self) -> usize {
        self.m + EPSILON - self.n
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheckCarryToZeroWitness<T> {
    pub input: Vec<T>,
    pub carry: Vec<T>,
    pub carry_range_checks: Vec<Num2BitsWitness<T>>,
}

impl<T: FieldElement> Signals<T> for CheckCarryToZeroWitness<T> {
    fn collect_signals(&self, out: &mut Vec<T>) {
        out.extend_from_slice(&self.input);
        out.extend_from_slice(&self.carry);
        self.carry_range_checks.collect_signals(out);
    }
}

impl<T: FieldElement> Template<T> for CheckCarryToZero {
    type Input = Vec<T>;
    type Witness = CheckCarryToZeroWitness<T>;

    fn name(&self) -> String {
        format!("CheckCarryToZero({}, {}, {})", self.n, self.m, self.k)
    }

    fn run(
        &self,
        ctx: &mut WitgenContext,
        input: Vec<T>,
    ) -> Result<CheckCarryToZeroWitness<T>, ConstraintError> {
        assert_eq!(input.len(), self.k);
        let base = T::two_pow(self.n);
        let bias = T::two_pow(self.range_bits() - 1);
        let range_check = Num2Bits::new(self.range_bits());

        let mut carry: Vec<T> = Vec::with_capacity(self.k - 1);
        let mut carry_range_checks = Vec::with_capacity(self.k - 1);
        for (i, &register) in input[..self.k - 1].iter().enumerate() {
            let incoming = register + carry.last().copied().unwrap_or_else(T::zero);
            let outgoing = incoming / base;
            ctx.assert_eq(incoming, outgoing * base, "carry is exact")?;
            carry_range_checks.push(ctx.run(
                format!("carry_range_checks[{i}]"),
                &range_check,
                outgoing + bias,
            )?);
            carry.push(outgoing);
        }
        ctx.assert_zero(
            input[self.k - 1] + carry[self.k - 2],
            "last register cancels the final carry",
        )?;

        Ok(CheckCarryToZeroWitness {
            input,
            carry,
            carry_range_checks,
        })
    }
}
