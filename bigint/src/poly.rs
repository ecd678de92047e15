use itertools::Itertools;
use rsa_witgen_number::FieldElement;

/// Evaluates the polynomial with coefficients `coeffs` (lowest degree first) at `x`.
pub fn poly_eval<T: FieldElement>(coeffs: &[T], x: T) -> T {
    coeffs
        .iter()
        .rev()
        .fold(T::zero(), |acc, &coeff| acc * x + coeff)
}

/// Recovers the coefficients of the polynomial of degree `< values.len()` that takes
/// `values[i]` at the point `i`.
pub fn poly_interp<T: FieldElement>(values: &[T]) -> Vec<T> {
    Interpolator::new(values.len()).interpolate(values)
}

/// Lagrange interpolation over the points `0, 1, ..., len - 1`.
///
/// Keeps `prod_i (x - i)` and the inverted denominators `prod_{j != i} (i - j)`
/// around, so several interpolations over the same points share the setup.
#[derive(Clone, Debug)]
pub struct Interpolator<T> {
    full_poly: Vec<T>,
    inv_denominators: Vec<T>,
}

impl<T: FieldElement> Interpolator<T> {
    pub fn new(len: usize) -> Self {
        let point = |i: usize| T::from(i as u64);

        let mut full_poly = vec![T::zero(); len + 1];
        full_poly[0] = T::one();
        for i in 0..len {
            for j in (0..=i).rev() {
                let lower = full_poly[j];
                full_poly[j + 1] += lower;
                full_poly[j] = lower * -point(i);
            }
        }

        let inv_denominators = (0..len)
            .map(|i| {
                let denominator: T = (0..len)
                    .filter(|&j| j != i)
                    .map(|j| point(i) - point(j))
                    .product();
                T::one() / denominator
            })
            .collect_vec();

        Self {
            full_poly,
            inv_denominators,
        }
    }

    pub fn len(&self) -> usize {
        self.inv_denominators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inv_denominators.is_empty()
    }

    pub fn interpolate(&self, values: &[T]) -> Vec<T> {
        let len = self.len();
        assert_eq!(values.len(), len, "wrong number of evaluations");
        let mut out = vec![T::zero(); len];
        for (i, (&value, &inv_denominator)) in
            values.iter().zip_eq(&self.inv_denominators).enumerate()
        {
            let scaled = value * inv_denominator;
            let point = T::from(i as u64);
            // Synthetic division of the full polynomial by (x - i).
            let mut rem = self.full_poly[len];
            for j in (0..len).rev() {
                out[j] += scaled * rem;
                rem = self.full_poly[j] + point * rem;
            }
            debug_assert!(rem.is_zero());
        }
        out
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;
    use rand::{rngs::StdRng, Rng, SeedableRng};
    use rsa_witgen_number::Bn254Field;
    use test_log::test;

    type F = Bn254Field;

    fn convolution(a: &[F], b: &[F]) -> Vec<F> {
        let mut out = vec![F::from(0u32); a.len() + b.len() - 1];
        for (i, &x) in a.iter().enumerate() {
            for (j, &y) in b.iter().enumerate() {
                out[i + j] += x * y;
            }
        }
        out
    }

    #[test]
    fn eval() {
        let coeffs = [3u32, 0, 2].map(F::from);
        assert_eq!(poly_eval(&coeffs, F::from(0u32)), F::from(3u32));
        assert_eq!(poly_eval(&coeffs, F::from(5u32)), F::from(53u32));
        assert_eq!(poly_eval(&[], F::from(5u32)), F::from(0u32));
    }

    #[test]
    fn interpolation_recovers_coefficients() {
        let coeffs = [7i32, -2, 0, 11].map(F::from);
        let values = (0..4u32)
            .map(|x| poly_eval(&coeffs, F::from(x)))
            .collect_vec();
        assert_eq!(poly_interp(&values), coeffs.to_vec());
    }

    #[test]
    fn evaluation_product_is_convolution() {
        let mut rng = StdRng::seed_from_u64(0);
        let len = 8;
        let interpolator = Interpolator::new(2 * len - 1);
        for _ in 0..20 {
            let a = (0..len).map(|_| F::from(rng.gen::<u64>())).collect_vec();
            let b = (0..len).map(|_| F::from(rng.gen::<u64>())).collect_vec();
            let product = (0..2 * len - 1)
                .map(|x| {
                    let x = F::from(x as u64);
                    poly_eval(&a, x) * poly_eval(&b, x)
                })
                .collect_vec();
            assert_eq!(interpolator.interpolate(&product), convolution(&a, &b));
        }
    }
}
