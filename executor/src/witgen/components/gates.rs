use rsa_witgen_number::FieldElement;

use crate::witgen::{ConstraintError, Signals, Template, WitgenContext};

/// Outputs 1 if the input is zero and 0 otherwise.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IsZero;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IsZeroWitness<T> {
    pub out: T,
    pub input: T,
    /// The inverse of the input, zero for a zero input.
    pub inv: T,
}

impl<T: FieldElement> Signals<T> for IsZeroWitness<T> {
    fn collect_signals(&self, out: &mut Vec<T>) {
        out.extend([self.out, self.input, self.inv]);
    }
}

impl<T: FieldElement> Template<T> for IsZero {
    type Input = T;
    type Witness = IsZeroWitness<T>;

    fn name(&self) -> String {
        "IsZero".to_string()
    }

    fn run(&self, ctx: &mut WitgenContext, input: T) -> Result<IsZeroWitness<T>, ConstraintError> {
        let inv = input.inverse().unwrap_or_else(T::zero);
        let out = T::one() - input * inv;
        ctx.assert_zero(input * out, "input * out == 0")?;
        Ok(IsZeroWitness { out, input, inv })
    }
}

/// Outputs 1 if both inputs are equal and 0 otherwise.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IsEqual;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IsEqualWitness<T> {
    pub out: T,
    pub input: [T; 2],
    pub is_zero: IsZeroWitness<T>,
}

impl<T: FieldElement> Signals<T> for IsEqualWitness<T> {
    fn collect_signals(&self, out: &mut Vec<T>) {
        out.push(self.out);
        out.extend(self.input);
        self.is_zero.collect_signals(out);
    }
}

impl<T: FieldElement> Template<T> for IsEqual {
    type Input = [T; 2];
    type Witness = IsEqualWitness<T>;

    fn name(&self) -> String {
        "IsEqual".to_string()
    }

    fn run(
        &self,
        ctx: &mut WitgenContext,
        input: [T; 2],
    ) -> Result<IsEqualWitness<T>, ConstraintError> {
        let is_zero = ctx.run("is_zero", &IsZero, input[1] - input[0])?;
        Ok(IsEqualWitness {
            out: is_zero.out,
            input,
            is_zero,
        })
    }
}

/// Boolean gates on 0/1 inputs. The inputs are not checked to be boolean.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gate {
    And,
    Or,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GateWitness<T> {
    pub out: T,
    pub a: T,
    pub b: T,
}

impl<T: FieldElement> Signals<T> for GateWitness<T> {
    fn collect_signals(&self, out: &mut Vec<T>) {
        out.extend([self.out, self.a, self.b]);
    }
}

impl<T: FieldElement> Template<T> for Gate {
    type Input = (T, T);
    type Witness = GateWitness<T>;

    fn name(&self) -> String {
        match self {
            Gate::And => "AND",
            Gate::Or => "OR",
        }
        .to_string()
    }

    fn run(
        &self,
        _ctx: &mut WitgenContext,
        (a, b): (T, T),
    ) -> Result<GateWitness<T>, ConstraintError> {
        let out = match self {
            Gate::And => a * b,
            Gate::Or => a + b - a * b,
        };
        Ok(GateWitness { out, a, b })
    }
}
