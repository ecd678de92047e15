use itertools::Itertools;
use rsa_witgen_bigint::{
    get_proper_representation, log_ceil, long_div, poly_eval, Interpolator, LongDivision,
};
use rsa_witgen_number::FieldElement;

use super::bits::{Num2Bits, Num2BitsWitness};
use super::carry::{CheckCarryToZero, CheckCarryToZeroWitness};
use crate::witgen::{ConstraintError, LimbLayout, Signals, Template, WitgenContext};

/// Modular multiplication `a * b mod p` of limb arrays.
///
/// The product is computed in evaluation form: both factors are evaluated at the
/// points `0..2k - 1`, multiplied pointwise and interpolated back to the `2k - 1`
/// coefficients of the unreduced product. Quotient and remainder come from long
/// division of the carried product. The identity `a * b - q * p - r = 0` is then
/// checked over the integers by interpolating its residual and handing it to
/// [`CheckCarryToZero`].
#[derive(Clone, Debug)]
pub struct FpMul<T> {
    layout: LimbLayout,
    interpolator: Interpolator<T>,
    carry_check: CheckCarryToZero,
}

impl<T: FieldElement> FpMul<T> {
    pub fn new(layout: LimbLayout) -> Self {
        let (n, k) = (layout.limb_bits(), layout.limb_count());
        Self {
            layout,
            interpolator: Interpolator::new(2 * k - 1),
            carry_check: CheckCarryToZero::new(n, layout.carry_bits(), 2 * k - 1),
        }
    }

    fn range_check(
        &self,
        ctx: &mut WitgenContext,
        name: &str,
        limbs: &[T],
    ) -> Result<Vec<Num2BitsWitness<T>>, ConstraintError> {
        let n2b = Num2Bits::new(self.layout.limb_bits());
        limbs
            .iter()
            .enumerate()
            .map(|(i, &limb)| ctx.run(format!("{name}[{i}]"), &n2b, limb))
            .collect()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FpMulWitness<T> {
    pub out: Vec<T>,
    pub a: Vec<T>,
    pub b: Vec<T>,
    pub p: Vec<T>,
    /// `a(x) * b(x)` at the points `0..2k - 1`.
    pub v_ab: Vec<T>,
    pub q: Vec<T>,
    pub r: Vec<T>,
    /// `p(x) * q(x) + r(x)` at the points `0..2k - 1`.
    pub v_pq_r: Vec<T>,
    /// `v_ab - v_pq_r`
    pub v_t: Vec<T>,
    pub range_a: Vec<Num2BitsWitness<T>>,
    pub range_b: Vec<Num2BitsWitness<T>>,
    pub range_q: Vec<Num2BitsWitness<T>>,
    pub range_r: Vec<Num2BitsWitness<T>>,
    pub t_check: CheckCarryToZeroWitness<T>,
}

impl<T: FieldElement> Signals<T> for FpMulWitness<T> {
    fn collect_signals(&self, out: &mut Vec<T>) {
        for signals in [
            &self.out, &self.a, &self.b, &self.p, &self.v_ab, &self.q, &self.r, &self.v_pq_r,
            &self.v_t,
        ] {
            out.extend_from_slice(signals);
        }
        self.range_a.collect_signals(out);
        self.range_b.collect_signals(out);
        self.range_q.collect_signals(out);
        self.range_r.collect_signals(out);
        self.t_check.collect_signals(out);
    }
}

impl<T: FieldElement> Template<T> for FpMul<T> {
    /// `(a, b, p)`
    type Input = (Vec<T>, Vec<T>, Vec<T>);
    type Witness = FpMulWitness<T>;

    fn name(&self) -> String {
        format!(
            "FpMul({}, {})",
            self.layout.limb_bits(),
            self.layout.limb_count()
        )
    }

    fn run(
        &self,
        ctx: &mut WitgenContext,
        (a, b, p): (Vec<T>, Vec<T>, Vec<T>),
    ) -> Result<FpMulWitness<T>, ConstraintError> {
        let (n, k) = (self.layout.limb_bits(), self.layout.limb_count());
        assert!(a.len() == k && b.len() == k && p.len() == k);

        let range_a = self.range_check(ctx, "range_a", &a)?;
        let range_b = self.range_check(ctx, "range_b", &b)?;

        let points = (0..2 * k - 1).map(|x| T::from(x as u64)).collect_vec();
        let v_ab = points
            .iter()
            .map(|&x| poly_eval(&a, x) * poly_eval(&b, x))
            .collect_vec();

        let ab = self.interpolator.interpolate(&v_ab);
        let ab_proper = get_proper_representation(2 * n + log_ceil(k), n, &ab);
        let LongDivision {
            mut quotient,
            remainder: r,
        } = long_div(n, k, &ab_proper, &p).map_err(|e| ctx.fail(e))?;
        // For reduced factors the quotient is below p and fits into k limbs.
        if quotient[k..].iter().any(|limb| !limb.is_zero()) {
            log::debug!("FpMul quotient exceeds {k} limbs, factors are not reduced");
        }
        quotient.truncate(k);
        let q = quotient;

        let range_q = self.range_check(ctx, "range_q", &q)?;
        let range_r = self.range_check(ctx, "range_r", &r)?;

        let v_pq_r = points
            .iter()
            .map(|&x| poly_eval(&p, x) * poly_eval(&q, x) + poly_eval(&r, x))
            .collect_vec();
        let v_t = v_ab
            .iter()
            .zip_eq(&v_pq_r)
            .map(|(&ab, &pq_r)| ab - pq_r)
            .collect_vec();
        let t = self.interpolator.interpolate(&v_t);
        let t_check = ctx.run("t_check", &self.carry_check, t)?;

        Ok(FpMulWitness {
            out: r.clone(),
            a,
            b,
            p,
            v_ab,
            q,
            r,
            v_pq_r,
            v_t,
            range_a,
            range_b,
            range_q,
            range_r,
            t_check,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use num_bigint::{BigUint, RandBigInt};
    use num_traits::One;
    use pretty_assertions::assert_eq;
    use rand::{rngs::StdRng, SeedableRng};
    use rsa_witgen_bigint::{biguint_to_limbs, limbs_to_biguint};
    use rsa_witgen_number::Bn254Field;
    use test_log::test;

    type F = Bn254Field;

    fn fp_mul(
        layout: LimbLayout,
        a: &BigUint,
        b: &BigUint,
        p: &BigUint,
    ) -> Result<FpMulWitness<F>, ConstraintError> {
        let (n, k) = (layout.limb_bits(), layout.limb_count());
        let limbs = |v: &BigUint| biguint_to_limbs::<F>(v, n, k).unwrap();
        let input = (limbs(a), limbs(b), limbs(p));
        WitgenContext::new("main").run("mul", &FpMul::new(layout), input)
    }

    fn check_random_products(layout: LimbLayout, seed: u64, count: usize) {
        let mut rng = StdRng::seed_from_u64(seed);
        let bits = layout.total_bits() as u64;
        let (low, high) = (BigUint::one() << (bits - 20), BigUint::one() << bits);
        for _ in 0..count {
            let p = rng.gen_biguint_range(&low, &high);
            let a = rng.gen_biguint_below(&p);
            let b = rng.gen_biguint_below(&p);
            let witness = fp_mul(layout, &a, &b, &p).unwrap();
            assert_eq!(
                limbs_to_biguint(&witness.out, layout.limb_bits()),
                &a * &b % &p
            );
            assert_eq!(limbs_to_biguint(&witness.q, layout.limb_bits()), &a * &b / &p);
        }
    }

    #[test]
    fn small_limbs() {
        check_random_products(LimbLayout::new(16, 4).unwrap(), 0, 30);
    }

    #[test]
    fn default_layout() {
        check_random_products(LimbLayout::default(), 1, 2);
    }

    #[test]
    fn short_modulus_in_wide_layout() {
        // A 3072-bit modulus leaves the top limbs of the default layout empty.
        let layout = LimbLayout::default();
        let mut rng = StdRng::seed_from_u64(2);
        let p = rng.gen_biguint(3072) | (BigUint::one() << 3071u32);
        let a = rng.gen_biguint_below(&p);
        let b = rng.gen_biguint_below(&p);
        let witness = fp_mul(layout, &a, &b, &p).unwrap();
        assert_eq!(limbs_to_biguint(&witness.out, 121), &a * &b % &p);
    }

    #[test]
    fn signal_count() {
        let layout = LimbLayout::new(16, 4).unwrap();
        let p = BigUint::from(0xffff_ffff_ffff_ffc5u64);
        let witness = fp_mul(layout, &BigUint::from(3u32), &BigUint::from(5u32), &p).unwrap();
        let (n, k) = (16, 4);
        let limb_arrays = 6 * k + 3 * (2 * k - 1);
        let range_checks = 4 * k * (n + 1);
        let carry_bits = layout.carry_bits() + 3 - n;
        let carry_check = (2 * k - 1) + (2 * k - 2) + (2 * k - 2) * (carry_bits + 1);
        assert_eq!(witness.signal_count(), limb_arrays + range_checks + carry_check);
        assert_eq!(witness.out[0], F::from(15u32));
    }

    #[test]
    fn unreduced_limb_is_rejected() {
        let layout = LimbLayout::new(16, 4).unwrap();
        let limbs = vec![F::from(1u32 << 16), F::from(0u32), F::from(0u32), F::from(0u32)];
        let p = biguint_to_limbs(&BigUint::from(1_000_003u32), 16, 4).unwrap();
        let error = WitgenContext::new("main")
            .run("mul", &FpMul::new(layout), (limbs.clone(), limbs, p))
            .unwrap_err();
        assert_eq!(error.path, "main.mul.range_a[0]");
    }

    #[test]
    fn zero_modulus() {
        let layout = LimbLayout::new(16, 4).unwrap();
        let zero = vec![F::from(0u32); 4];
        let error = WitgenContext::new("main")
            .run("mul", &FpMul::new(layout), (zero.clone(), zero.clone(), zero))
            .unwrap_err();
        assert_eq!(
            error.kind,
            crate::witgen::FailureKind::Arithmetic(rsa_witgen_bigint::BigIntError::DivisionByZero)
        );
    }
}
