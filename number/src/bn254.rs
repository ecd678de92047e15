use ark_bn254::Fr;
prime_field!(Bn254Field, Fr);

#[cfg(test)]
mod tests {
    use super::Bn254Field;
    use crate::{FieldElement, LargeInt, SignedNumberType};
    use num_bigint::BigUint;
    use num_traits::{Num, One, Zero};
    use pretty_assertions::assert_eq;
    use std::cmp::Ordering;
    use test_log::test;

    fn modulus() -> BigUint {
        BigUint::from_str_radix(
            "21888242871839275222246405745257275088548364400416034343698204186575808495617",
            10,
        )
        .unwrap()
    }

    #[test]
    fn minus_one() {
        let minus_one = Bn254Field::from(0) - Bn254Field::from(1);
        assert_eq!(
            minus_one.to_arbitrary_integer(),
            modulus() - BigUint::one()
        );
        assert_eq!(minus_one.to_string(), "-1");
        assert!(minus_one.is_negative());
        assert_eq!(Bn254Field::modulus().to_arbitrary_integer(), modulus());
        assert_eq!(Bn254Field::BITS, 254);
    }

    #[test]
    fn sign_boundary() {
        let half = Bn254Field::from((modulus() - BigUint::one()) / BigUint::from(2u32));
        assert!(!half.is_negative());
        assert!((half + Bn254Field::one()).is_negative());
        assert_eq!(
            half.signed_cmp(&(half + Bn254Field::one())),
            Ordering::Greater
        );
        assert_eq!(
            Bn254Field::from(-5).signed_cmp(&Bn254Field::from(-3)),
            Ordering::Less
        );
        assert_eq!(
            Bn254Field::from(3).signed_cmp(&Bn254Field::from(3)),
            Ordering::Equal
        );
    }

    #[test]
    fn signed_round_trip() {
        for v in [-1_000_000_007i64, -1, 0, 1, 1 << 40] {
            let x = Bn254Field::from(v);
            assert_eq!(x.to_signed_integer(), SignedNumberType::from(v));
            assert_eq!(Bn254Field::from_signed_integer(&SignedNumberType::from(v)), x);
        }
    }

    #[test]
    fn integer_ops() {
        let a = Bn254Field::from(1000u32);
        let b = Bn254Field::from(7u32);
        assert_eq!(a.integer_div(b), Bn254Field::from(142u32));
        assert_eq!(a.integer_mod(b), Bn254Field::from(6u32));
        // Integer semantics act on the canonical representative.
        let minus_one = -Bn254Field::one();
        assert_eq!(
            minus_one.integer_mod(Bn254Field::from(2u32)),
            Bn254Field::zero()
        );
        assert_eq!(Bn254Field::two_pow(10), Bn254Field::from(1024u32));
        assert_eq!(Bn254Field::two_pow(254), Bn254Field::from(BigUint::one() << 254));
    }

    #[test]
    fn shifts_and_bits() {
        let int = |v: u32| -> <Bn254Field as FieldElement>::Integer { v.into() };
        let x = Bn254Field::from(0b1011_0000u32).to_integer();
        assert_eq!(x >> 4, int(0b1011));
        assert_eq!((x >> 5) & int(1), int(1));
        assert_eq!((x >> 6) & int(1), int(0));
        assert!(x.bit(7));
        assert_eq!(x.num_bits(), 8);
        assert_eq!((x >> 300).try_into_u64(), Some(0));
        assert_eq!((-Bn254Field::one()).try_into_u64(), None);
    }

    #[test]
    fn inverse() {
        assert_eq!(Bn254Field::zero().inverse(), None);
        let x = Bn254Field::from(12345u32);
        assert_eq!(x * x.inverse().unwrap(), Bn254Field::one());
        assert_eq!(
            [2u32, 3, 7].into_iter().map(Bn254Field::from).product::<Bn254Field>(),
            Bn254Field::from(42u32)
        );
    }
}
