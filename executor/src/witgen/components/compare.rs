use rsa_witgen_number::FieldElement;

use super::bits::{Num2Bits, Num2BitsWitness};
use super::gates::{Gate, GateWitness, IsEqual, IsEqualWitness};
use crate::witgen::{ConstraintError, LimbLayout, Signals, Template, WitgenContext};

/// Outputs 1 if `a < b` and 0 otherwise, for inputs of at most `bits` bits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LessThan {
    bits: usize,
}

impl LessThan {
    /// Panics if `bits` exceeds 252.
    pub fn new(bits: usize) -> Self {
        assert!(bits <= 252, "LessThan supports at most 252 bits, got {bits}");
        Self { bits }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LessThanWitness<T> {
    pub out: T,
    pub input: [T; 2],
    pub n2b: Num2BitsWitness<T>,
}

impl<T: FieldElement> Signals<T> for LessThanWitness<T> {
    fn collect_signals(&self, out: &mut Vec<T>) {
        out.push(self.out);
        out.extend(self.input);
        self.n2b.collect_signals(out);
    }
}

impl<T: FieldElement> Template<T> for LessThan {
    type Input = [T; 2];
    type Witness = LessThanWitness<T>;

    fn name(&self) -> String {
        format!("LessThan({})", self.bits)
    }

    fn run(
        &self,
        ctx: &mut WitgenContext,
        input: [T; 2],
    ) -> Result<LessThanWitness<T>, ConstraintError> {
        let n2b = ctx.run(
            "n2b",
            &Num2Bits::new(self.bits + 1),
            input[0] + T::two_pow(self.bits) - input[1],
        )?;
        Ok(LessThanWitness {
            out: T::one() - n2b.out[self.bits],
            input,
            n2b,
        })
    }
}

/// Outputs 1 if the limb array `a` is below `b` and 0 otherwise.
///
/// Compares every limb pair with [`LessThan`] and [`IsEqual`] and folds the results
/// from the most significant limb down: `ors[i]` is set iff `a` and `b` agree on all
/// limbs above some `j >= i` and `a[j] < b[j]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BigLessThan {
    layout: LimbLayout,
}

impl BigLessThan {
    pub fn new(layout: LimbLayout) -> Self {
        Self { layout }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BigLessThanWitness<T> {
    pub out: T,
    pub a: Vec<T>,
    pub b: Vec<T>,
    pub lt: Vec<LessThanWitness<T>>,
    pub eq: Vec<IsEqualWitness<T>>,
    /// `ors[i]`, `ands[i]` and `eq_ands[i]` for `i` in `0..k - 1`.
    pub ors: Vec<GateWitness<T>>,
    pub ands: Vec<GateWitness<T>>,
    pub eq_ands: Vec<GateWitness<T>>,
}

impl<T: FieldElement> Signals<T> for BigLessThanWitness<T> {
    fn collect_signals(&self, out: &mut Vec<T>) {
        out.push(self.out);
        out.extend_from_slice(&self.a);
        out.extend_from_slice(&self.b);
        self.lt.collect_signals(out);
        self.eq.collect_signals(out);
        self.ors.collect_signals(out);
        self.ands.collect_signals(out);
        self.eq_ands.collect_signals(out);
    }
}

impl<T: FieldElement> Template<T> for BigLessThan {
    type Input = (Vec<T>, Vec<T>);
    type Witness = BigLessThanWitness<T>;

    fn name(&self) -> String {
        format!(
            "BigLessThan({}, {})",
            self.layout.limb_bits(),
            self.layout.limb_count()
        )
    }

    fn run(
        &self,
        ctx: &mut WitgenContext,
        (a, b): (Vec<T>, Vec<T>),
    ) -> Result<BigLessThanWitness<T>, ConstraintError> {
        let k = self.layout.limb_count();
        assert!(a.len() == k && b.len() == k);
        let less_than = LessThan::new(self.layout.limb_bits());

        let lt = (0..k)
            .map(|i| ctx.run(format!("lt[{i}]"), &less_than, [a[i], b[i]]))
            .collect::<Result<Vec<_>, _>>()?;
        let eq = (0..k)
            .map(|i| ctx.run(format!("eq[{i}]"), &IsEqual, [a[i], b[i]]))
            .collect::<Result<Vec<_>, _>>()?;

        let mut ors = Vec::with_capacity(k - 1);
        let mut ands = Vec::with_capacity(k - 1);
        let mut eq_ands = Vec::with_capacity(k - 1);
        // Whether all limbs above `i` are equal, and whether `a` is below `b` on them.
        let mut equal_above = eq[k - 1].out;
        let mut less_above = lt[k - 1].out;
        for i in (0..k - 1).rev() {
            let and = ctx.run(format!("ands[{i}]"), &Gate::And, (equal_above, lt[i].out))?;
            let eq_and = ctx.run(
                format!("eq_ands[{i}]"),
                &Gate::And,
                (equal_above, eq[i].out),
            )?;
            let or = ctx.run(format!("ors[{i}]"), &Gate::Or, (less_above, and.out))?;
            equal_above = eq_and.out;
            less_above = or.out;
            ands.push(and);
            eq_ands.push(eq_and);
            ors.push(or);
        }
        // Built from the top limb down, stored by limb index.
        ors.reverse();
        ands.reverse();
        eq_ands.reverse();

        Ok(BigLessThanWitness {
            out: less_above,
            a,
            b,
            lt,
            eq,
            ors,
            ands,
            eq_ands,
        })
    }
}
